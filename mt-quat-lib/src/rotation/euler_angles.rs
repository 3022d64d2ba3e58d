use nalgebra::Matrix3;

// cos(pitch) below this is treated as gimbal lock
const GIMBAL_LOCK_EPSILON: f64 = 1e-9;

/// Roll, pitch and yaw in degrees for extrinsic X, then Y, then Z rotations,
/// i.e. `R = Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EulerAngles {
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

pub fn euler_angles_xyz(m: &Matrix3<f64>) -> EulerAngles {
    let pitch = (-m[(2, 0)]).clamp(-1.0, 1.0).asin();
    let cos_pitch = m[(2, 1)].hypot(m[(2, 2)]);

    let (roll, yaw) = if cos_pitch > GIMBAL_LOCK_EPSILON {
        (m[(2, 1)].atan2(m[(2, 2)]), m[(1, 0)].atan2(m[(0, 0)]))
    } else {
        // roll and yaw share an axis, put everything into roll
        ((-m[(2, 0)] * m[(0, 1)]).atan2(m[(1, 1)]), 0.0)
    };

    EulerAngles {
        roll: roll.to_degrees(),
        pitch: pitch.to_degrees(),
        yaw: yaw.to_degrees(),
    }
}
