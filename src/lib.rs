//! Convert triangulated STL meshes into wireframe `.world` scenes.
//!
//! Every unique mesh edge becomes one cylinder primitive. The pipeline runs
//! strictly forward:
//!
//! 1. [`io::stl::decode`]: bytes to triangles (ASCII or binary)
//! 2. [`vertex::dedup_vertices`]: triangles to a welded vertex pool
//! 3. [`mesh::edges_from_triangles`]: index triples to unique edges
//! 4. [`cylinder::CylinderTransform::spanning`]: edge to cylinder placement
//! 5. [`world::World::assemble`]: cylinders and bounding box to a scene
//! 6. [`serializer::PrecisionSerializer`]: scene to fixed-precision text
//!
//! ```no_run
//! let bytes = std::fs::read("part.stl")?;
//! let conversion = stl2world::convert(&bytes, &stl2world::ConvertOptions::default())?;
//! std::fs::write("part.world", &conversion.text)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

pub mod color;
pub mod cylinder;
pub mod enums;
pub mod float_types;
pub mod io;
pub mod mesh;
pub mod serializer;
pub mod value;
pub mod vertex;
pub mod world;


pub use crate::color::Color;
pub use crate::cylinder::CylinderTransform;
pub use crate::enums::{Detection, NonFinitePolicy, StlEncoding};
pub use crate::io::{ConvertError, Result};
pub use crate::mesh::{Edge, IndexedMesh};
pub use crate::serializer::PrecisionSerializer;
pub use crate::value::Value;
pub use crate::world::{World, WorldObject};

use crate::float_types::{Real, DEFAULT_EPS, DEFAULT_RADIUS};
use log::{debug, info};
use nalgebra::Point3;
use parry3d_f64::bounding_volume::Aabb;
use std::path::Path;

/// Caller-supplied knobs for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    /// Vertex welding cell size, in model units (before `scale`).
    pub eps: Real,
    /// Cylinder radius, in model units (before `scale`).
    pub radius: Real,
    /// Uniform factor applied to every coordinate.
    pub scale: Real,
    pub color: Color,
    pub material: String,
    /// Spaces per nesting level in the output; `0` for one line.
    pub indent: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            eps: DEFAULT_EPS,
            radius: DEFAULT_RADIUS,
            scale: 1.0,
            color: Color::WHITE,
            material: world::DEFAULT_MATERIAL.to_owned(),
            indent: 2,
        }
    }
}

impl ConvertOptions {
    pub fn with_eps(mut self, eps: Real) -> Self {
        self.eps = eps;
        self
    }

    pub fn with_radius(mut self, radius: Real) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_scale(mut self, scale: Real) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Reject options no conversion could honor.
    pub fn validate(&self) -> Result<()> {
        if !(self.eps.is_finite() && self.eps > 0.0) {
            return Err(ConvertError::InvalidConfiguration(format!(
                "eps must be a positive number, got {}",
                self.eps
            )));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(ConvertError::InvalidConfiguration(format!(
                "radius must be a non-negative number, got {}",
                self.radius
            )));
        }
        if !(self.scale.is_finite() && self.scale >= 0.0) {
            return Err(ConvertError::InvalidConfiguration(format!(
                "scale must be a non-negative number, got {}",
                self.scale
            )));
        }
        self.color.validate()
    }
}

/// Everything one conversion produced.
///
/// Besides the serialized text this carries the intermediate geometry, so a
/// preview can draw the same edges without re-running the pipeline.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub encoding: StlEncoding,
    pub triangle_count: usize,
    /// Welded vertex pool, already multiplied by `scale`.
    pub mesh: IndexedMesh,
    pub edges: Vec<Edge>,
    pub bounding_box: Aabb,
    /// Box diagonal after the zero-size guard.
    pub diagonal: Real,
    /// Decimal digits used for every number in `text`.
    pub digits: usize,
    pub world: World,
    pub text: String,
}

/// Run the whole pipeline on an STL buffer.
///
/// Options are validated first; a truncated binary buffer aborts the run.
/// Everything else (broken ASCII facets, zero-length edges, an empty mesh)
/// degrades to a smaller but valid scene.
pub fn convert(data: &[u8], options: &ConvertOptions) -> Result<Conversion> {
    options.validate()?;

    let decoded = io::stl::decode(data)?;
    let mesh = IndexedMesh::from_triangles(&decoded.triangles, options.eps).scaled(options.scale);
    let edges = mesh.edges();

    let radius = options.radius * options.scale;
    let objects: Vec<WorldObject> = edges
        .iter()
        .map(|&(i, j)| {
            let transform = CylinderTransform::spanning(&mesh.vertices[i], &mesh.vertices[j], radius);
            WorldObject::cylinder(transform, options.color, &options.material)
        })
        .collect();

    let bounding_box = mesh.bounding_box();
    let diagonal = world::guarded_diagonal(&bounding_box);
    let digits = world::digits_for_diagonal(diagonal);
    debug!(
        "bounding box {:?} .. {:?}, diagonal {diagonal}",
        bounding_box.mins, bounding_box.maxs
    );

    let world = World::assemble(objects, &bounding_box);
    let text = PrecisionSerializer::new(digits)
        .with_indent(options.indent)
        .to_string(&world.to_value());

    info!(
        "edges: {}, objects: {}, precision: {digits} digits",
        edges.len(),
        world.objects.len()
    );

    Ok(Conversion {
        encoding: decoded.encoding(),
        triangle_count: decoded.triangles.len(),
        mesh,
        edges,
        bounding_box,
        diagonal,
        digits,
        world,
        text,
    })
}

impl Conversion {
    /// Endpoints of every edge, for line-segment previews.
    pub fn segments(&self) -> impl Iterator<Item = (Point3<Real>, Point3<Real>)> + '_ {
        self.edges
            .iter()
            .map(|&(i, j)| (self.mesh.vertices[i], self.mesh.vertices[j]))
    }
}

/// Output file name for an input path: `part.STL` becomes `part.world`.
pub fn world_file_name(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let stem = match name.len().checked_sub(4) {
        Some(cut) if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(".stl") => &name[..cut],
        _ => name.as_str(),
    };
    if stem.is_empty() {
        "wireframe.world".to_owned()
    } else {
        format!("{stem}.world")
    }
}
