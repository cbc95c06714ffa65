use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::input::{Action, InputSnapshot};

/// Height of the driving surface. The vehicle sits here except during
/// the brief hop after a boundary impact.
pub const GROUND_LEVEL: f32 = 0.0;

// ============================================
// VEHICLE TUNING
// ============================================

#[derive(Debug, Clone, Copy)]
pub struct VehicleConfig {
    pub acceleration: f32,      // speed units gained per tick under throttle
    pub deceleration: f32,      // speed units shed per tick while coasting
    pub max_forward_speed: f32, // forward cap (speed runs negative going forward)
    pub max_reverse_speed: f32, // reverse tops out at half of this
    pub max_turn_angle: f32,    // radians
    pub turn_ease: f32,         // lerp factor per tick, strictly inside (0, 1)
    pub bounce_factor: f32,     // speed damping on boundary impact, < 1
    pub gravity: f32,           // vertical speed lost per tick while airborne
    pub max_speed_kmh: f32,     // HUD reading at max forward speed
    pub half_extents: [f32; 3], // chassis box in local space [hx, hy, hz]
}

pub const COUPE: VehicleConfig = VehicleConfig {
    acceleration: 0.008,
    deceleration: 0.005,
    max_forward_speed: 5.0,
    max_reverse_speed: 5.0,
    max_turn_angle: 0.03,
    turn_ease: 0.1,
    bounce_factor: 0.5,
    gravity: 0.015,
    max_speed_kmh: 200.0,

    half_extents: [2.0, 1.25, 5.0], // model normalized to a 10-unit footprint
};

// ============================================
// VEHICLE STATE
// ============================================

/// The sole simulated actor. Owned by the simulation; the renderer only
/// ever reads the published snapshot.
///
/// Sign convention inherited from the displacement formula (translate by
/// `-speed` along the local forward axis): negative speed is forward
/// travel, positive is reverse.
pub struct Vehicle {
    pub config: VehicleConfig,
    pub position: Point3<f32>,  // world space
    pub heading: f32,           // yaw in radians; wraps through the trig, never normalized
    pub speed: f32,             // signed, see above
    pub turn_angle: f32,        // eased toward its target every tick
    pub vertical_velocity: f32, // up-positive, nonzero only while airborne
    pub grounded: bool,
}

impl Vehicle {
    /// A stopped vehicle at the world origin.
    pub fn new(config: VehicleConfig) -> Self {
        debug_assert!(
            config.turn_ease > 0.0 && config.turn_ease < 1.0,
            "turn easing must stay strictly inside (0, 1)"
        );
        debug_assert!(
            config.bounce_factor < 1.0,
            "bounce damping must shed speed on every impact"
        );
        Self {
            config,
            position: Point3::origin(),
            heading: 0.0,
            speed: 0.0,
            turn_angle: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
        }
    }

    /// World rotation for the current heading (yaw about +Y).
    pub fn rotation(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.heading)
    }

    /// World-space displacement for one tick at the current speed and
    /// heading: `-speed` along the local forward axis.
    pub fn forward_displacement(&self, dt_factor: f32) -> Vector3<f32> {
        self.rotation() * Vector3::new(0.0, 0.0, -self.speed * dt_factor)
    }

    /// Integrate speed for one tick.
    ///
    /// Powered regime (engine warmed up): throttle accelerates toward
    /// the forward or reverse cap, otherwise speed relaxes toward zero.
    /// Unpowered regime: speed only relaxes toward zero, twice as fast
    /// while the brake is held. Engine readiness gates acceleration,
    /// not deceleration.
    pub fn integrate_speed(&mut self, input: &InputSnapshot, engine_ready: bool, dt_factor: f32) {
        let cfg = self.config;
        if engine_ready {
            if input.held(Action::Forward) {
                self.speed = (self.speed - cfg.acceleration * dt_factor).max(-cfg.max_forward_speed);
            } else if input.held(Action::Backward) {
                self.speed =
                    (self.speed + cfg.acceleration * dt_factor).min(cfg.max_reverse_speed / 2.0);
            } else {
                self.relax_speed(cfg.deceleration * dt_factor);
            }
        } else {
            let brake = if input.held(Action::Backward) {
                cfg.deceleration * 2.0
            } else {
                cfg.deceleration
            };
            self.relax_speed(brake * dt_factor);
        }
    }

    /// Step speed toward zero without overshooting past it.
    fn relax_speed(&mut self, step: f32) {
        if self.speed > 0.0 {
            self.speed = (self.speed - step).max(0.0);
        } else if self.speed < 0.0 {
            self.speed = (self.speed + step).min(0.0);
        }
    }

    /// Ease the turn angle toward its target and advance the heading.
    ///
    /// Steering only bites while the vehicle is moving. The target sign
    /// flips in reverse so left stays left relative to travel, and the
    /// heading advances by `turn_angle * |speed|` - faster means
    /// sharper, which is the arcade feel, not a yaw-rate model.
    pub fn steer(&mut self, input: &InputSnapshot, dt_factor: f32) {
        if self.speed == 0.0 {
            return;
        }
        let flip = if self.speed > 0.0 { -1.0 } else { 1.0 }; // reversing?
        let target = if input.held(Action::TurnLeft) {
            self.config.max_turn_angle * flip
        } else if input.held(Action::TurnRight) {
            -self.config.max_turn_angle * flip
        } else {
            0.0
        };
        self.turn_angle = lerp(self.turn_angle, target, self.config.turn_ease);
        self.heading += self.turn_angle * self.speed.abs() * dt_factor;
    }

    /// HUD speed in display units: the fraction of the forward cap
    /// scaled to the configured top reading, rounded, unsigned.
    pub fn speed_kmh(&self) -> f32 {
        (self.speed / self.config.max_forward_speed * self.config.max_speed_kmh)
            .round()
            .abs()
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
