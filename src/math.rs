//! Pose math: matrix/quaternion conversions and projection composition.

use crate::vr_field_view::VRFieldOfView;

/// Row-major 3x4 rigid transform as reported by VR runtimes.
/// Rows are the rotation basis, column 3 is the translation.
pub type Matrix34 = [[f32; 4]; 3];

/// Extracts the rotation of a 3x4 rigid transform as a unit quaternion
/// `[x, y, z, w]`.
///
/// Four branches keyed on the dominant diagonal term keep the square root
/// away from zero. Precondition: the 3x3 submatrix is a proper rotation
/// (orthonormal, determinant +1); the result is not re-normalized.
// Adapted from http://www.euclideanspace.com/maths/geometry/rotations/conversions/matrixToQuaternion/index.htm
pub fn matrix_to_quaternion(m: &Matrix34) -> [f32; 4] {
    let trace = m[0][0] + m[1][1] + m[2][2];
    if trace > 0.0 {
        let s = (trace + 1.0).sqrt() * 2.0;
        [
            (m[2][1] - m[1][2]) / s,
            (m[0][2] - m[2][0]) / s,
            (m[1][0] - m[0][1]) / s,
            0.25 * s,
        ]
    } else if m[0][0] > m[1][1] && m[0][0] > m[2][2] {
        let s = (1.0 + m[0][0] - m[1][1] - m[2][2]).sqrt() * 2.0;
        [
            0.25 * s,
            (m[0][1] + m[1][0]) / s,
            (m[0][2] + m[2][0]) / s,
            (m[2][1] - m[1][2]) / s,
        ]
    } else if m[1][1] > m[2][2] {
        let s = (1.0 + m[1][1] - m[0][0] - m[2][2]).sqrt() * 2.0;
        [
            (m[0][1] + m[1][0]) / s,
            0.25 * s,
            (m[1][2] + m[2][1]) / s,
            (m[0][2] - m[2][0]) / s,
        ]
    } else {
        let s = (1.0 + m[2][2] - m[0][0] - m[1][1]).sqrt() * 2.0;
        [
            (m[0][2] + m[2][0]) / s,
            (m[1][2] + m[2][1]) / s,
            0.25 * s,
            (m[1][0] - m[0][1]) / s,
        ]
    }
}

/// Builds the 3x4 rotation matrix of a unit quaternion, translation zeroed.
pub fn quaternion_to_matrix(q: &[f32; 4]) -> Matrix34 {
    let (x, y, z, w) = (q[0], q[1], q[2], q[3]);
    [
        [
            1.0 - 2.0 * (y * y + z * z),
            2.0 * (x * y - z * w),
            2.0 * (x * z + y * w),
            0.0,
        ],
        [
            2.0 * (x * y + z * w),
            1.0 - 2.0 * (x * x + z * z),
            2.0 * (y * z - x * w),
            0.0,
        ],
        [
            2.0 * (x * z - y * w),
            2.0 * (y * z + x * w),
            1.0 - 2.0 * (x * x + y * y),
            0.0,
        ],
    ]
}

/// Rotates a vector by a unit quaternion without building the full matrix:
/// `v + 2w(u x v) + 2(u x (u x v))` where `u` is the quaternion's vector part.
#[inline]
pub fn rotate_vector_by_quaternion(q: &[f32; 4], v: &[f32; 3]) -> [f32; 3] {
    let u = [q[0], q[1], q[2]];
    let w = q[3];
    let uv = cross(&u, v);
    let uuv = cross(&u, &uv);
    [
        v[0] + 2.0 * (w * uv[0] + uuv[0]),
        v[1] + 2.0 * (w * uv[1] + uuv[1]),
        v[2] + 2.0 * (w * uv[2] + uuv[2]),
    ]
}

#[inline]
pub fn matrix_to_translation(m: &Matrix34) -> [f32; 3] {
    [m[0][3], m[1][3], m[2][3]]
}

#[inline]
fn cross(a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Composes a column-major 4x4 projection matrix from raw tangent bounds,
/// GL clip conventions (depth -1..1, right-handed eye space).
pub fn projection_from_raw(fov: &VRFieldOfView, near_z: f32, far_z: f32) -> [f32; 16] {
    let left = fov.left;
    let right = fov.right;
    let top = fov.top;
    let bottom = fov.bottom;
    if right == left || bottom == top || far_z == near_z {
        // Degenerate bounds cannot form a frustum.
        return identity_matrix!();
    }

    let idx = 1.0 / (right - left);
    let idy = 1.0 / (bottom - top);
    let sx = right + left;
    let sy = bottom + top;

    let mut out = [0.0; 16];
    out[0] = 2.0 * idx;
    out[5] = 2.0 * idy;
    out[8] = sx * idx;
    out[9] = sy * idy;
    out[10] = -(far_z + near_z) / (far_z - near_z);
    out[11] = -1.0;
    out[14] = -(2.0 * far_z * near_z) / (far_z - near_z);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPSILON: f32 = 1e-5;

    fn quaternion_norm(q: &[f32; 4]) -> f32 {
        (q[0] * q[0] + q[1] * q[1] + q[2] * q[2] + q[3] * q[3]).sqrt()
    }

    fn random_unit_quaternion(rng: &mut StdRng) -> [f32; 4] {
        loop {
            let q: [f32; 4] = [
                rng.gen_range(-1.0f32..1.0),
                rng.gen_range(-1.0f32..1.0),
                rng.gen_range(-1.0f32..1.0),
                rng.gen_range(-1.0f32..1.0),
            ];
            let norm = quaternion_norm(&q);
            if norm > 0.1 {
                return [q[0] / norm, q[1] / norm, q[2] / norm, q[3] / norm];
            }
        }
    }

    fn assert_matrix_near(a: &Matrix34, b: &Matrix34) {
        for row in 0..3 {
            for col in 0..4 {
                assert!(
                    (a[row][col] - b[row][col]).abs() < EPSILON,
                    "matrices differ at [{}][{}]: {} vs {}",
                    row,
                    col,
                    a[row][col],
                    b[row][col]
                );
            }
        }
    }

    #[test]
    fn identity_matrix_yields_identity_quaternion() {
        let m: Matrix34 = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ];
        let q = matrix_to_quaternion(&m);
        assert!((q[0]).abs() < EPSILON);
        assert!((q[1]).abs() < EPSILON);
        assert!((q[2]).abs() < EPSILON);
        assert!((q[3] - 1.0).abs() < EPSILON);
    }

    #[test]
    fn half_turns_exercise_every_branch() {
        // Half turns about each axis have trace -1, forcing the three
        // diagonal-dominant branches; identity covers the trace branch.
        let half_turns: [[f32; 4]; 3] = [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
        ];
        for expected in &half_turns {
            let m = quaternion_to_matrix(expected);
            let q = matrix_to_quaternion(&m);
            assert!((quaternion_norm(&q) - 1.0).abs() < EPSILON);
            // Quaternions are sign-ambiguous: q and -q encode one rotation.
            let dot = q[0] * expected[0]
                + q[1] * expected[1]
                + q[2] * expected[2]
                + q[3] * expected[3];
            assert!((dot.abs() - 1.0).abs() < EPSILON, "dot {}", dot);
        }
    }

    #[test]
    fn random_rotations_round_trip() {
        let mut rng = StdRng::seed_from_u64(0x4d41_5448);
        for _ in 0..20 {
            let q = random_unit_quaternion(&mut rng);
            let m = quaternion_to_matrix(&q);
            let q2 = matrix_to_quaternion(&m);
            assert!((quaternion_norm(&q2) - 1.0).abs() < EPSILON);
            let m2 = quaternion_to_matrix(&q2);
            assert_matrix_near(&m, &m2);
        }
    }

    #[test]
    fn rotation_by_identity_quaternion_is_identity() {
        let identity = [0.0, 0.0, 0.0, 1.0];
        for v in &[
            [1.0, 0.0, 0.0],
            [0.0, -2.5, 0.0],
            [0.3, 1.6, -4.0],
            [0.0, 0.0, 0.0],
        ] {
            let rotated = rotate_vector_by_quaternion(&identity, v);
            assert!((rotated[0] - v[0]).abs() < EPSILON);
            assert!((rotated[1] - v[1]).abs() < EPSILON);
            assert!((rotated[2] - v[2]).abs() < EPSILON);
        }
    }

    #[test]
    fn rotation_matches_matrix_form() {
        let mut rng = StdRng::seed_from_u64(0x524f_5441);
        for _ in 0..20 {
            let q = random_unit_quaternion(&mut rng);
            let v: [f32; 3] = [
                rng.gen_range(-10.0f32..10.0),
                rng.gen_range(-10.0f32..10.0),
                rng.gen_range(-10.0f32..10.0),
            ];
            let rotated = rotate_vector_by_quaternion(&q, &v);
            let m = quaternion_to_matrix(&q);
            for row in 0..3 {
                let expected = m[row][0] * v[0] + m[row][1] * v[1] + m[row][2] * v[2];
                assert!(
                    (rotated[row] - expected).abs() < 1e-4,
                    "row {}: {} vs {}",
                    row,
                    rotated[row],
                    expected
                );
            }
        }
    }

    #[test]
    fn quarter_turn_about_y_sends_x_to_minus_z() {
        let half = std::f32::consts::FRAC_1_SQRT_2;
        let q = [0.0, half, 0.0, half];
        let rotated = rotate_vector_by_quaternion(&q, &[1.0, 0.0, 0.0]);
        assert!((rotated[0]).abs() < EPSILON);
        assert!((rotated[1]).abs() < EPSILON);
        assert!((rotated[2] + 1.0).abs() < EPSILON);
    }

    #[test]
    fn translation_comes_from_fourth_column() {
        let m: Matrix34 = [
            [1.0, 0.0, 0.0, 0.5],
            [0.0, 1.0, 0.0, 1.6],
            [0.0, 0.0, 1.0, -0.3],
        ];
        assert_eq!(matrix_to_translation(&m), [0.5, 1.6, -0.3]);
    }

    #[test]
    fn projection_matches_frustum_bounds() {
        let fov = VRFieldOfView {
            left: -1.0,
            right: 1.0,
            top: -1.0,
            bottom: 1.0,
        };
        let p = projection_from_raw(&fov, 0.1, 100.0);
        assert!((p[0] - 1.0).abs() < EPSILON);
        assert!((p[5] - 1.0).abs() < EPSILON);
        assert!((p[8]).abs() < EPSILON);
        assert!((p[9]).abs() < EPSILON);
        assert!((p[10] + 100.1 / 99.9).abs() < EPSILON);
        assert!((p[11] + 1.0).abs() < EPSILON);
        assert!((p[14] + 20.0 / 99.9).abs() < EPSILON);
        assert!((p[15]).abs() < EPSILON);
    }

    #[test]
    fn asymmetric_bounds_shift_the_frustum_center() {
        let fov = VRFieldOfView {
            left: -1.4,
            right: 1.2,
            top: -1.5,
            bottom: 1.5,
        };
        let p = projection_from_raw(&fov, 0.01, 1000.0);
        let idx = 1.0 / (fov.right - fov.left);
        assert!((p[0] - 2.0 * idx).abs() < EPSILON);
        assert!((p[8] - (fov.right + fov.left) * idx).abs() < EPSILON);
    }

    #[test]
    fn degenerate_bounds_fall_back_to_identity() {
        let fov = VRFieldOfView::default();
        let p = projection_from_raw(&fov, 0.1, 100.0);
        assert_eq!(p, identity_matrix!());
    }
}
