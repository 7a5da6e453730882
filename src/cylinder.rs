use crate::float_types::{Real, DEGENERATE_LENGTH};
use nalgebra::{Matrix4, Point3, Rotation3, Translation3, Vector3};

/// Placement of the authoring-time unit cylinder.
///
/// The unit cylinder has diameter 1 and length 1, its base at the local origin
/// and its axis along local +Z. `rotation` holds Euler angles in degrees as
/// `[pitch (X), yaw (Y), roll (Z)]`, applied in Y-X-Z order:
/// `R = Ry(yaw) * Rx(pitch) * Rz(roll)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderTransform {
    pub position: Point3<Real>,
    pub rotation: Vector3<Real>,
    pub scale: Vector3<Real>,
}

impl CylinderTransform {
    /// Transform that stretches the unit cylinder from `a` to `b` with the given radius.
    ///
    /// A zero-length edge gets identity rotation and a Z scale of
    /// [`DEGENERATE_LENGTH`], so it still produces a (negligible) primitive.
    pub fn spanning(a: &Point3<Real>, b: &Point3<Real>, radius: Real) -> Self {
        let v = b - a;
        let length = v.norm();
        if length == 0.0 {
            return CylinderTransform {
                position: *a,
                rotation: Vector3::zeros(),
                scale: Vector3::new(radius, radius, DEGENERATE_LENGTH),
            };
        }

        let yaw = v.x.atan2(v.z);
        let pitch = -(v.y / length).clamp(-1.0, 1.0).asin();
        CylinderTransform {
            position: *a,
            rotation: Vector3::new(pitch.to_degrees(), yaw.to_degrees(), 0.0),
            scale: Vector3::new(radius, radius, length),
        }
    }

    pub fn rotation_matrix(&self) -> Rotation3<Real> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.rotation.x.to_radians());
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.rotation.y.to_radians());
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.rotation.z.to_radians());
        ry * rx * rz
    }

    /// Homogeneous matrix `T * R * S`.
    pub fn to_homogeneous(&self) -> Matrix4<Real> {
        Translation3::from(self.position.coords).to_homogeneous()
            * self.rotation_matrix().to_homogeneous()
            * Matrix4::new_nonuniform_scaling(&self.scale)
    }

    /// Map a point from cylinder-local space to world space.
    pub fn transform_point(&self, local: &Point3<Real>) -> Point3<Real> {
        self.to_homogeneous().transform_point(local)
    }
}
