use nalgebra::{Matrix3, Quaternion};

/// Which of Shepperd's four formulas is numerically safe for a matrix.
///
/// When the trace is positive `w` is the largest component and dividing by it
/// is safe. Otherwise the largest diagonal entry picks the component to pivot
/// on, which keeps the divisor away from zero near 180° rotations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShepperdBranch {
    Trace(f64),
    DominantX,
    DominantY,
    DominantZ,
}

impl ShepperdBranch {
    pub fn select(m: &Matrix3<f64>) -> Self {
        let trace = m.trace();
        if trace > 0.0 {
            Self::Trace(trace)
        } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            Self::DominantX
        } else if m[(1, 1)] > m[(2, 2)] {
            Self::DominantY
        } else {
            Self::DominantZ
        }
    }

    /// Unnormalized (w, x, y, z) for this branch.
    fn components(self, m: &Matrix3<f64>) -> [f64; 4] {
        let (r00, r01, r02) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
        let (r10, r11, r12) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
        let (r20, r21, r22) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);

        match self {
            Self::Trace(trace) => {
                let s = 0.5 / (trace + 1.0).sqrt();
                [0.25 / s, (r21 - r12) * s, (r02 - r20) * s, (r10 - r01) * s]
            }
            Self::DominantX => {
                let s = 2.0 * (1.0 + r00 - r11 - r22).sqrt();
                [(r21 - r12) / s, 0.25 * s, (r01 + r10) / s, (r02 + r20) / s]
            }
            Self::DominantY => {
                let s = 2.0 * (1.0 + r11 - r00 - r22).sqrt();
                [(r02 - r20) / s, (r01 + r10) / s, 0.25 * s, (r12 + r21) / s]
            }
            Self::DominantZ => {
                let s = 2.0 * (1.0 + r22 - r00 - r11).sqrt();
                [(r10 - r01) / s, (r02 + r20) / s, (r12 + r21) / s, 0.25 * s]
            }
        }
    }
}

/// Converts a rotation matrix to a unit quaternion (scalar first).
///
/// The matrix is not re-orthonormalized. Passing something that is not a
/// proper rotation gives an unspecified but finite quaternion and never
/// panics. Only NaN entries give a NaN result.
pub fn matrix_to_quaternion(m: &Matrix3<f64>) -> Quaternion<f64> {
    let [w, x, y, z] = ShepperdBranch::select(m).components(m);
    let q = Quaternion::new(w, x, y, z);
    q / q.norm()
}
