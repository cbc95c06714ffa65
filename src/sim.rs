use nalgebra::Point3;
use serde::Serialize;
use tracing::{debug, info};

use crate::camera::{self, CameraAnchor, CameraMode};
use crate::collision::{self, BoundaryVolume};
use crate::engine::{EngineState, EngineStateMachine};
use crate::input::{Action, InputSnapshot};
use crate::kinematics::{GROUND_LEVEL, Vehicle, VehicleConfig};

/// Nominal frame interval the per-tick tuning constants were set
/// against. A tick of this length runs at `dt_factor == 1`.
pub const BASE_TICK_MS: f32 = 1000.0 / 60.0;

const BOB_RATE: f32 = 0.005; // radians per clock millisecond
const BOB_AMPLITUDE: f32 = 0.005;
const HOP_FACTOR: f32 = 0.5; // vertical kick per unit of bounced speed

// ---------------------------------------------
// PUBLISHED STATE
// ---------------------------------------------

/// Per-tick output for the presentation sink: everything the renderer
/// and HUD read, nothing they may write back.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub position: [f32; 3],
    pub heading: f32,
    pub speed: f32,
    pub speed_kmh: f32,
    pub engine: EngineState,
    pub camera: CameraAnchor,
    pub collided: bool,
}

// ---------------------------------------------
// ORCHESTRATOR
// ---------------------------------------------

/// Owns the whole simulation state and advances it one frame at a time.
/// Strictly single-threaded: the scheduler that drives the loop calls
/// `tick` once per rendered frame, never concurrently.
pub struct Simulation {
    vehicle: Vehicle,
    engine: EngineStateMachine,
    boundaries: Vec<BoundaryVolume>,
    camera_mode: CameraMode,
    tick: u64,
    clock_ms: f32,         // accumulated sim time, drives the idle bob
    toggle_was_held: bool, // rising-edge detection for ToggleEngine
}

impl Simulation {
    pub fn new(config: VehicleConfig, boundaries: Vec<BoundaryVolume>) -> Self {
        Self {
            vehicle: Vehicle::new(config),
            engine: EngineStateMachine::new(),
            boundaries,
            camera_mode: CameraMode::Chase,
            tick: 0,
            clock_ms: 0.0,
            toggle_was_held: false,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn engine(&self) -> &EngineStateMachine {
        &self.engine
    }

    pub fn boundaries(&self) -> &[BoundaryVolume] {
        &self.boundaries
    }

    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    /// Switch between chase and free-orbit anchoring. Called by the
    /// presentation layer, takes effect on the next tick.
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera_mode = mode;
    }

    /// Advance one frame. `elapsed_ms` is the monotonic time since the
    /// previous tick, handed in by the scheduler that owns the loop.
    pub fn tick(&mut self, input: &InputSnapshot, elapsed_ms: f32) -> Snapshot {
        let dt_factor = elapsed_ms / BASE_TICK_MS;
        self.tick += 1;
        self.clock_ms += elapsed_ms;

        // Ignition: held-state in, one toggle per press out.
        let toggle_held = input.held(Action::ToggleEngine);
        if toggle_held && !self.toggle_was_held {
            self.engine.toggle();
        }
        self.toggle_was_held = toggle_held;

        self.engine.tick(elapsed_ms);

        // Finish any airborne recovery before the drive model runs.
        self.settle_vertical(dt_factor);

        self.vehicle
            .integrate_speed(input, self.engine.is_ready(), dt_factor);
        self.vehicle.steer(input, dt_factor);

        let pre_step = self.vehicle.position;
        let displacement = self.vehicle.forward_displacement(dt_factor);
        self.vehicle.position += displacement;

        // Cosmetic engine bob while powered, on the ground and rolling.
        if self.engine.is_ready() && self.vehicle.grounded && self.vehicle.speed != 0.0 {
            self.vehicle.position.y = GROUND_LEVEL + (self.clock_ms * BOB_RATE).sin() * BOB_AMPLITUDE;
        }

        let collided = collision::check(&collision::vehicle_aabb(&self.vehicle), &self.boundaries);
        if collided {
            self.resolve_bounce(pre_step, dt_factor);
        }

        debug!(
            tick = self.tick,
            speed = self.vehicle.speed,
            heading = self.vehicle.heading,
            "tick complete"
        );
        self.publish(collided)
    }

    /// Bounce response: revert to the pre-step pose, invert and dampen
    /// the speed, push back out at the damped speed, and kick off the
    /// landing hop. Damping below one guarantees repeated impacts decay
    /// to rest instead of ping-ponging forever.
    fn resolve_bounce(&mut self, pre_step: Point3<f32>, dt_factor: f32) {
        let v = &mut self.vehicle;
        v.position = pre_step;
        v.speed = -v.speed * v.config.bounce_factor;
        let push_back = v.forward_displacement(dt_factor);
        v.position += push_back;
        v.vertical_velocity = v.speed.abs() * HOP_FACTOR;
        v.grounded = false;
        info!(speed = v.speed, "boundary impact, bounced");
    }

    /// Airborne vertical motion after a bounce: rise on the seeded
    /// velocity, lose `gravity` per tick, snap back onto the ground.
    fn settle_vertical(&mut self, dt_factor: f32) {
        let v = &mut self.vehicle;
        if v.grounded {
            return;
        }
        v.position.y += v.vertical_velocity * dt_factor;
        v.vertical_velocity -= v.config.gravity * dt_factor;
        if v.position.y <= GROUND_LEVEL {
            v.position.y = GROUND_LEVEL;
            v.vertical_velocity = 0.0;
            v.grounded = true;
        }
    }

    fn publish(&self, collided: bool) -> Snapshot {
        let v = &self.vehicle;
        Snapshot {
            tick: self.tick,
            position: [v.position.x, v.position.y, v.position.z],
            heading: v.heading,
            speed: v.speed,
            speed_kmh: v.speed_kmh(),
            engine: self.engine.state(),
            camera: camera::anchor(v, self.camera_mode),
            collided,
        }
    }
}
