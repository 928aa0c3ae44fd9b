//! Tolerance assertions shared by the workspace's numeric tests.

use crate::Matrix4;

/// Asserts `|a - b| <= tol` with a readable failure message.
#[track_caller]
pub fn assert_close(a: f64, b: f64, tol: f64) {
    assert!(
        (a - b).abs() <= tol,
        "|{} - {}| = {:e} exceeds {:e}",
        a,
        b,
        (a - b).abs(),
        tol
    );
}

/// Asserts every element of two matrices agrees within `tol`.
#[track_caller]
pub fn assert_matrix_close(a: &Matrix4, b: &Matrix4, tol: f64) {
    let diff = a.max_abs_diff(b);
    assert!(diff <= tol, "max element difference {:e} exceeds {:e}\n{}\n{}", diff, tol, a, b);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_close_accepts_within_tolerance() {
        assert_close(0.1 + 0.2, 0.3, 1e-15);
    }

    #[test]
    #[should_panic(expected = "exceeds")]
    fn test_assert_close_rejects_outside_tolerance() {
        assert_close(1.0, 1.1, 1e-3);
    }

    #[test]
    #[should_panic(expected = "max element difference")]
    fn test_assert_matrix_close_rejects_rotated() {
        assert_matrix_close(&Matrix4::rotation_z(0.01), &Matrix4::identity(), 1e-6);
    }
}
