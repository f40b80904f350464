//! Math utilities and types
//!
//! Provides the fundamental math types for surface placement: vectors,
//! quaternions, matrices, and the rigid [`Pose`] produced by hit-testing.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Rigid 3D transform: position plus orientation
///
/// A pose is what a hit-test result carries: where a viewer ray met a
/// detected surface and how that surface is oriented. Poses are produced
/// fresh each frame and copied wherever they need to outlive the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in world space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
        }
    }
}

impl Pose {
    /// Create an identity pose at the origin
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a pose with only a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a pose from position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Decompose a rigid transformation matrix into a pose
    ///
    /// Any scale present in the matrix is divided out; hit poses are rigid
    /// by contract and the placement core never scales through matrices.
    pub fn from_matrix(matrix: Mat4) -> Self {
        let position = Vec3::new(matrix.m14, matrix.m24, matrix.m34);

        let scale_x = Vec3::new(matrix.m11, matrix.m21, matrix.m31).magnitude();
        let scale_y = Vec3::new(matrix.m12, matrix.m22, matrix.m32).magnitude();
        let scale_z = Vec3::new(matrix.m13, matrix.m23, matrix.m33).magnitude();

        let rotation_matrix = Mat3::new(
            matrix.m11 / scale_x, matrix.m12 / scale_y, matrix.m13 / scale_z,
            matrix.m21 / scale_x, matrix.m22 / scale_y, matrix.m23 / scale_z,
            matrix.m31 / scale_x, matrix.m32 / scale_y, matrix.m33 / scale_z,
        );
        let rotation = Quat::from_matrix(&rotation_matrix);

        Self { position, rotation }
    }

    /// Convert to a transformation matrix (rotation then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position) * self.rotation.to_homogeneous()
    }

    /// Apply this pose to a vector (rotation only, no translation)
    pub fn rotate_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector
    }

    /// Combine this pose with another (self applied first, then other)
    pub fn combine(&self, other: &Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * other.position,
            rotation: self.rotation * other.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_identity_pose() {
        let pose = Pose::identity();

        assert_eq!(pose.position, Vec3::zeros());
        assert_relative_eq!(pose.rotation, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_pose_from_position() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        let pose = Pose::from_position(position);

        assert_eq!(pose.position, position);
        assert_relative_eq!(pose.rotation, Quat::identity(), epsilon = EPSILON);
    }

    #[test]
    fn test_matrix_roundtrip() {
        let original = Pose::from_position_rotation(
            Vec3::new(0.4, -1.2, 2.5),
            Quat::from_axis_angle(&Unit::new_normalize(Vec3::new(1.0, 1.0, 0.5)), 0.7),
        );

        let reconstructed = Pose::from_matrix(original.to_matrix());

        assert_relative_eq!(reconstructed.position, original.position, epsilon = EPSILON);

        // Quaternions may flip sign but still represent the same rotation
        let dot = original.rotation.coords.dot(&reconstructed.rotation.coords);
        assert!(dot.abs() > 0.999, "rotation mismatch: dot product = {}", dot);
    }

    #[test]
    fn test_rotate_vector() {
        // 90 degrees around Y maps +X onto -Z in a right-handed Y-up frame
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0);
        let pose = Pose::from_position_rotation(Vec3::zeros(), rotation);

        let rotated = pose.rotate_vector(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = EPSILON);
    }

    #[test]
    fn test_combine_poses() {
        let parent = Pose::from_position_rotation(
            Vec3::new(1.0, 0.0, 0.0),
            Quat::from_axis_angle(&Vec3::y_axis(), PI / 2.0),
        );
        let child = Pose::from_position(Vec3::new(0.0, 0.0, 1.0));

        let combined = parent.combine(&child);

        // (0,0,1) rotated 90 degrees around Y and translated by (1,0,0)
        assert_relative_eq!(combined.position, Vec3::new(2.0, 0.0, 0.0), epsilon = EPSILON);
    }
}
