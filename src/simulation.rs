//! Bouncing SDF primitive field.
//!
//! A fixed population of spheres, each moving with a constant per-tick
//! velocity and reflected off per-axis bounds. Storage is a pair of fixed
//! arrays sized to [`MAX_PRIMITIVES`]; how many of them the renderer should
//! draw is a separate `active_count`.
//!
//! A field only exists once [`PrimitiveField::initialize`] has run, so the
//! "tick before initialize" state is not representable.

use glam::Vec3A;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;
use crate::interval::{Bounds, Interval, Side};
use crate::primitive::{Color, Primitive, WHITE};
use crate::random::PrimitiveRng;

/// Number of primitive slots.
pub const MAX_PRIMITIVES: usize = 100;

/// Distance every primitive travels per tick.
pub const SPEED: f32 = 0.05;

/// Width of the cube initial positions are drawn from, centered on the origin.
pub const SPAWN_RANGE: f32 = 10.0;

/// Limits primitives are kept inside.
pub const FIELD_BOUNDS: Bounds = Bounds::new(
    Interval::new(-10.0, 10.0),
    Interval::new(5.0, 15.0),
    Interval::new(-10.0, 10.0),
);

/// Which slots a tick advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPolicy {
    /// Every slot moves, including those past `active_count`
    #[default]
    AllSlots,
    /// Only the first `active_count` slots move
    ActiveOnly,
}

/// Parameters for [`PrimitiveField::initialize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSettings {
    /// Slots the renderer should draw
    pub active_count: usize,
    /// Shared sphere radius
    pub size: f32,
    /// Starting color of every primitive
    pub color: Color,
    /// Which slots a tick advances
    pub policy: TickPolicy,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            active_count: 10,
            size: 1.0,
            color: WHITE,
            policy: TickPolicy::AllSlots,
        }
    }
}

/// Owned copy of the field state, safe to hand to another reader.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSnapshot {
    /// All slots in index order; always `MAX_PRIMITIVES` long
    pub primitives: Vec<Primitive>,
    /// How many leading slots should be drawn
    pub active_count: usize,
    /// Ticks advanced since initialization
    pub tick: u64,
}

impl FieldSnapshot {
    /// The slots that should be drawn.
    pub fn active(&self) -> &[Primitive] {
        &self.primitives[..self.active_count]
    }
}

/// Running primitive field.
#[derive(Debug, Clone)]
pub struct PrimitiveField {
    primitives: [Primitive; MAX_PRIMITIVES],
    velocities: [Vec3A; MAX_PRIMITIVES],
    active_count: usize,
    size: f32,
    bounds: Bounds,
    policy: TickPolicy,
    tick: u64,
}

impl PrimitiveField {
    /// Populate every slot with a random position and direction.
    ///
    /// Each slot draws a unit direction (scaled to [`SPEED`]) and then a
    /// position uniformly inside the [`SPAWN_RANGE`] cube. Slots past
    /// `active_count` are populated too.
    pub fn initialize(settings: &FieldSettings, rng: &mut PrimitiveRng) -> Result<Self, SimulationError> {
        check_capacity(settings.active_count)?;

        let half = SPAWN_RANGE / 2.0;
        let mut primitives = [Primitive::default(); MAX_PRIMITIVES];
        let mut velocities = [Vec3A::ZERO; MAX_PRIMITIVES];

        for (primitive, velocity) in primitives.iter_mut().zip(velocities.iter_mut()) {
            *velocity = rng.random_unit_direction() * SPEED;
            *primitive = Primitive::new(
                rng.random_vec3a_range(-half, half),
                settings.size,
                settings.color,
            );
        }

        info!(
            "Primitive field initialized: {} slots, {} active, size {}",
            MAX_PRIMITIVES, settings.active_count, settings.size
        );

        Ok(Self {
            primitives,
            velocities,
            active_count: settings.active_count,
            size: settings.size,
            bounds: FIELD_BOUNDS,
            policy: settings.policy,
            tick: 0,
        })
    }

    /// Advance the field by one fixed step.
    ///
    /// Moves each slot by its velocity, resets its radius to the current
    /// size, then reflects it off every axis bound it crossed: the velocity
    /// component is negated and the coordinate clamped onto the bound. Axes
    /// are handled independently, so a corner hit flips several components
    /// in the same tick.
    ///
    /// Returns how many axis reflections happened.
    pub fn tick(&mut self) -> usize {
        let slots = match self.policy {
            TickPolicy::AllSlots => MAX_PRIMITIVES,
            TickPolicy::ActiveOnly => self.active_count,
        };

        let mut bounces = 0;
        for (primitive, velocity) in self.primitives[..slots]
            .iter_mut()
            .zip(self.velocities[..slots].iter_mut())
        {
            primitive.center += *velocity;
            primitive.radius = self.size;

            for (axis, limits) in self.bounds.axes().into_iter().enumerate() {
                if limits.side(primitive.center[axis]) != Side::Inside {
                    velocity[axis] = -velocity[axis];
                    primitive.center[axis] = limits.clamp(primitive.center[axis]);
                    bounces += 1;
                }
            }
        }

        self.tick += 1;
        if bounces > 0 {
            debug!("tick {}: {} reflections", self.tick, bounces);
        }
        bounces
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            primitives: self.primitives.to_vec(),
            active_count: self.active_count,
            tick: self.tick,
        }
    }

    /// All slots, including inactive ones.
    pub fn primitives(&self) -> &[Primitive; MAX_PRIMITIVES] {
        &self.primitives
    }

    /// Per-slot velocities.
    pub fn velocities(&self) -> &[Vec3A; MAX_PRIMITIVES] {
        &self.velocities
    }

    /// Slots the renderer should draw
    pub fn active_count(&self) -> usize {
        self.active_count
    }

    /// Change how many slots the renderer should draw.
    ///
    /// Under [`TickPolicy::ActiveOnly`] the slots that become active have
    /// not been advanced while hidden, so they are clamped into the bounds
    /// and given the current size before they can be drawn.
    pub fn set_active_count(&mut self, count: usize) -> Result<(), SimulationError> {
        check_capacity(count)?;
        if self.policy == TickPolicy::ActiveOnly && count > self.active_count {
            for primitive in &mut self.primitives[self.active_count..count] {
                primitive.center = self.bounds.clamp(primitive.center);
                primitive.radius = self.size;
            }
        }
        self.active_count = count;
        Ok(())
    }

    /// Current shared radius
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Change the shared radius. Applied to every slot on the next tick.
    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    /// Override one slot's color.
    pub fn set_color(&mut self, index: usize, color: Color) -> Result<(), SimulationError> {
        self.slot_mut(index)?.color = color;
        Ok(())
    }

    /// Override one slot's radius until the next tick resets it.
    pub fn set_radius(&mut self, index: usize, radius: f32) -> Result<(), SimulationError> {
        self.slot_mut(index)?.radius = radius;
        Ok(())
    }

    /// Place one slot and give it a new velocity.
    ///
    /// The position is taken as given; it is brought back inside the bounds
    /// by the next tick.
    pub fn set_motion(&mut self, index: usize, center: Vec3A, velocity: Vec3A) -> Result<(), SimulationError> {
        self.slot_mut(index)?.center = center;
        self.velocities[index] = velocity;
        Ok(())
    }

    /// Which slots a tick advances
    pub fn policy(&self) -> TickPolicy {
        self.policy
    }

    /// Switch between advancing all slots and only the active ones.
    pub fn set_policy(&mut self, policy: TickPolicy) {
        self.policy = policy;
    }

    /// Limits primitives are kept inside
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Ticks advanced since initialization
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Primitive, SimulationError> {
        self.primitives.get_mut(index).ok_or(SimulationError::SlotOutOfRange {
            index,
            capacity: MAX_PRIMITIVES,
        })
    }
}

fn check_capacity(count: usize) -> Result<(), SimulationError> {
    if count > MAX_PRIMITIVES {
        return Err(SimulationError::CapacityExceeded {
            requested: count,
            capacity: MAX_PRIMITIVES,
        });
    }
    Ok(())
}
