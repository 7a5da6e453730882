//! The `.world` scene document.

use crate::color::Color;
use crate::cylinder::CylinderTransform;
use crate::float_types::Real;
use crate::mesh::diagonal;
use crate::value::Value;
use nalgebra::{Point3, Vector3};
use parry3d_f64::bounding_volume::Aabb;

pub const AMBIENT_COMPONENTS: usize = 12;
pub const RESPAWN_YAW: Real = 180.0;
pub const OCEAN_LEVEL: Real = 0.0;
pub const WEATHER: &str = "Day";
pub const VALUE_TYPE: &str = "float";
pub const CYLINDER_NAME: &str = "Cylinder";
pub const DEFAULT_MATERIAL: &str = "metal_4";

/// One placed primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldObject {
    pub name: String,
    pub transform: CylinderTransform,
    pub color: Color,
    pub material: String,
}

impl WorldObject {
    pub fn cylinder(transform: CylinderTransform, color: Color, material: &str) -> Self {
        WorldObject {
            name: CYLINDER_NAME.to_owned(),
            transform,
            color,
            material: material.to_owned(),
        }
    }

    pub fn to_value(&self) -> Value {
        Value::object([
            ("n", Value::from(self.name.as_str())),
            ("p", Value::from(&self.transform.position)),
            ("r", Value::from(&self.transform.rotation)),
            ("s", Value::from(&self.transform.scale)),
            ("c", Value::numbers(self.color.to_array())),
            ("m", Value::from(self.material.as_str())),
        ])
    }
}

/// Where the player appears: behind and above the model, facing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Respawn {
    pub position: Point3<Real>,
    pub yaw: Real,
}

impl Respawn {
    /// Box center, raised by `diag / 4` on Y and pulled back by `2 * diag` on Z.
    pub fn for_box(aabb: &Aabb) -> Self {
        let diag = guarded_diagonal(aabb);
        Respawn {
            position: aabb.center() + Vector3::new(0.0, 0.25 * diag, -2.0 * diag),
            yaw: RESPAWN_YAW,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub respawn: Respawn,
    pub ambient: [Real; AMBIENT_COMPONENTS],
    pub ocean_level: Real,
    pub weather: String,
    pub value_type: String,
    pub objects: Vec<WorldObject>,
}

impl World {
    /// Wrap `objects` in a scene whose respawn point is derived from `aabb`.
    pub fn assemble(objects: Vec<WorldObject>, aabb: &Aabb) -> Self {
        World {
            respawn: Respawn::for_box(aabb),
            ambient: [1.0; AMBIENT_COMPONENTS],
            ocean_level: OCEAN_LEVEL,
            weather: WEATHER.to_owned(),
            value_type: VALUE_TYPE.to_owned(),
            objects,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::object([
            (
                "respawn",
                Value::object([
                    ("p", Value::from(&self.respawn.position)),
                    ("r", Value::from(self.respawn.yaw)),
                ]),
            ),
            ("ambient", Value::numbers(self.ambient)),
            ("oceanlevel", Value::from(self.ocean_level)),
            ("weather", Value::from(self.weather.as_str())),
            ("valuetype", Value::from(self.value_type.as_str())),
            (
                "objects",
                Value::Array(self.objects.iter().map(WorldObject::to_value).collect()),
            ),
        ])
    }
}

/// Box diagonal, or `1.0` when it is zero or not a number.
pub fn guarded_diagonal(aabb: &Aabb) -> Real {
    let diag = diagonal(aabb);
    if diag > 0.0 && diag.is_finite() {
        diag
    } else {
        1.0
    }
}

/// Decimal digits for a scene of the given diagonal: larger scenes get fewer.
pub fn digits_for_diagonal(diag: Real) -> usize {
    match diag {
        d if d >= 10_000.0 => 2,
        d if d >= 1_000.0 => 3,
        d if d >= 100.0 => 4,
        d if d >= 10.0 => 5,
        _ => 6,
    }
}
