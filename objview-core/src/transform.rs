/// Euler rotation angles and the matrices built from them
use nalgebra::{Matrix3, Rotation3, Vector3};

/// Rotation about the three axes, in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// The same angles in radians.
    pub fn to_radians(self) -> Vector3<f32> {
        Vector3::new(self.x.to_radians(), self.y.to_radians(), self.z.to_radians())
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Rotation matrix for a rotation state.
    ///
    /// Rotates about X first, then Y, then Z: `Rz * Ry * Rx`.
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix3<f32> {
        let angles = rotation.to_radians();
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), angles.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), angles.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z);

        (rz * ry * rx).into_inner()
    }
}
