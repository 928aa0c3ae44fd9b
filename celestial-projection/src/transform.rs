use celestial_core::{Matrix4, Vector3};

/// Rigid transform from a world frame into a projector's local view frame.
///
/// The inverse is computed once on construction so that unprojection of many
/// screen points does not repeat it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelViewTransform {
    matrix: Matrix4,
    inverse: Matrix4,
}

impl ModelViewTransform {
    pub fn new(matrix: Matrix4) -> Self {
        Self {
            matrix,
            inverse: matrix.rigid_inverse(),
        }
    }

    pub fn identity() -> Self {
        Self::new(Matrix4::identity())
    }

    pub fn matrix(&self) -> &Matrix4 {
        &self.matrix
    }

    pub fn inverse(&self) -> &Matrix4 {
        &self.inverse
    }

    /// World to view.
    pub fn forward(&self, v: Vector3) -> Vector3 {
        self.matrix.transform_point(v)
    }

    /// View to world.
    pub fn backward(&self, v: Vector3) -> Vector3 {
        self.inverse.transform_point(v)
    }

    /// Appends `other`, applied before this transform.
    pub fn combine(&self, other: &Matrix4) -> Self {
        Self::new(self.matrix * *other)
    }
}

impl Default for ModelViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Matrix4> for ModelViewTransform {
    fn from(matrix: Matrix4) -> Self {
        Self::new(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backward_undoes_forward() {
        let mv = ModelViewTransform::new(
            Matrix4::rotation_x(0.3) * Matrix4::translation(Vector3::new(1.0, 2.0, 3.0)),
        );
        let p = Vector3::new(-4.0, 0.5, 2.0);
        assert!((mv.backward(mv.forward(p)) - p).magnitude() < 1e-14);
    }

    #[test]
    fn test_combine_order() {
        let mv = ModelViewTransform::new(Matrix4::rotation_z(std::f64::consts::FRAC_PI_2));
        let shifted = mv.combine(&Matrix4::translation(Vector3::x_axis()));
        let out = shifted.forward(Vector3::zeros());
        assert!((out - Vector3::y_axis()).magnitude() < 1e-15);
    }
}
