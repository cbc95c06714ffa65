use nalgebra::Vector3;
use serde::Serialize;

use crate::kinematics::Vehicle;

// ---------------------------------------------
// CAMERA ANCHORING
// ---------------------------------------------

/// How the external camera wants to be anchored this tick. Toggled by
/// the presentation layer, consumed read-only here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    /// Behind-and-above, locked to the vehicle heading.
    Chase,
    /// Externally steered orbit around the vehicle.
    FreeOrbit,
}

/// Desired camera anchor for one tick. In `Chase` mode `point` is the
/// wanted eye position and `look_target` sits ahead of the vehicle; in
/// `FreeOrbit` both collapse to the orbit pivot above the vehicle.
/// Smoothing toward these is the renderer's job, not ours.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CameraAnchor {
    pub point: [f32; 3],
    pub look_target: [f32; 3],
}

const CHASE_OFFSET: Vector3<f32> = Vector3::new(0.0, 5.0, -10.0);
const CHASE_LOOK_AHEAD: Vector3<f32> = Vector3::new(0.0, 0.0, 20.0);
const ORBIT_PIVOT_LIFT: f32 = 4.0;

/// Compute the anchor for the active mode from the vehicle transform.
pub fn anchor(vehicle: &Vehicle, mode: CameraMode) -> CameraAnchor {
    match mode {
        CameraMode::Chase => {
            let rot = vehicle.rotation();
            let point = vehicle.position + rot * CHASE_OFFSET;
            let look = vehicle.position + rot * CHASE_LOOK_AHEAD;
            CameraAnchor {
                point: [point.x, point.y, point.z],
                look_target: [look.x, look.y, look.z],
            }
        }
        CameraMode::FreeOrbit => {
            let pivot = vehicle.position + Vector3::new(0.0, ORBIT_PIVOT_LIFT, 0.0);
            CameraAnchor {
                point: [pivot.x, pivot.y, pivot.z],
                look_target: [pivot.x, pivot.y, pivot.z],
            }
        }
    }
}
