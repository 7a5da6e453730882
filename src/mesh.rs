use crate::float_types::Real;
use crate::io::stl::Triangle;
use crate::vertex::dedup_vertices;
use log::debug;
use nalgebra::Point3;
use parry3d_f64::bounding_volume::Aabb;
use std::collections::BTreeSet;

/// An undirected edge, stored as `(min, max)` pool indices.
pub type Edge = (usize, usize);

/// A welded triangle mesh: a vertex pool plus one index triple per triangle.
#[derive(Debug, Clone, Default)]
pub struct IndexedMesh {
    pub vertices: Vec<Point3<Real>>,
    pub triangles: Vec<[usize; 3]>,
}

impl IndexedMesh {
    /// Weld raw triangles on a grid of cell size `eps`.
    pub fn from_triangles(triangles: &[Triangle], eps: Real) -> Self {
        let (pool, triangles) = dedup_vertices(triangles, eps);
        IndexedMesh {
            vertices: pool.into_points(),
            triangles,
        }
    }

    /// Multiply every vertex by `factor`. Connectivity is untouched.
    pub fn scaled(self, factor: Real) -> Self {
        IndexedMesh {
            vertices: self.vertices.into_iter().map(|p| p * factor).collect(),
            triangles: self.triangles,
        }
    }

    /// Unique undirected edges over all triangles, in ascending `(min, max)` order.
    ///
    /// Sides shared by several triangles appear once; a degenerate side such as
    /// `(a, a)` is kept like any other.
    pub fn edges(&self) -> Vec<Edge> {
        edges_from_triangles(&self.triangles)
    }

    /// Min/max corners over every vertex, or an all-zero box if there are none.
    pub fn bounding_box(&self) -> Aabb {
        bounding_box(&self.vertices)
    }
}

/// Unique undirected edges of a list of index triples.
pub fn edges_from_triangles(triangles: &[[usize; 3]]) -> Vec<Edge> {
    let mut set = BTreeSet::new();
    for &[a, b, c] in triangles {
        set.insert(canonical(a, b));
        set.insert(canonical(b, c));
        set.insert(canonical(c, a));
    }
    debug!("extracted {} unique edges from {} triangles", set.len(), triangles.len());
    set.into_iter().collect()
}

fn canonical(a: usize, b: usize) -> Edge {
    (a.min(b), a.max(b))
}

/// Min/max corners of a point set, axis by axis.
///
/// NaN coordinates never widen or shrink the box, wherever they sit in the
/// list. An axis with no usable coordinate (including an empty set) is `0..0`.
pub fn bounding_box(points: &[Point3<Real>]) -> Aabb {
    let mut mins = Point3::from([Real::INFINITY; 3]);
    let mut maxs = Point3::from([Real::NEG_INFINITY; 3]);
    for p in points {
        for axis in 0..3 {
            // `f64::min`/`max` return the other operand when one side is NaN
            mins[axis] = mins[axis].min(p[axis]);
            maxs[axis] = maxs[axis].max(p[axis]);
        }
    }
    for axis in 0..3 {
        if mins[axis] > maxs[axis] {
            mins[axis] = 0.0;
            maxs[axis] = 0.0;
        }
    }
    Aabb::new(mins, maxs)
}

/// Length of the box's extent vector.
pub fn diagonal(aabb: &Aabb) -> Real {
    aabb.extents().norm()
}
