use crate::float_types::Real;
use crate::io::stl::Triangle;
use log::debug;
use nalgebra::Point3;
use std::collections::HashMap;

/// Insertion-ordered set of unique points, welded on a grid of cell size `eps`.
///
/// Two points share an entry iff every coordinate rounds to the same multiple
/// of `eps`. The entry keeps the first point's exact coordinates; later matches
/// never move it.
#[derive(Debug, Clone)]
pub struct VertexPool {
    eps: Real,
    index: HashMap<String, usize>,
    points: Vec<Point3<Real>>,
}

impl VertexPool {
    /// `eps` must be positive and finite; [`crate::ConvertOptions::validate`] checks that.
    pub fn new(eps: Real) -> Self {
        VertexPool {
            eps,
            index: HashMap::new(),
            points: Vec::new(),
        }
    }

    /// Index of the entry matching `p`, inserting `p` if there is none.
    pub fn insert(&mut self, p: Point3<Real>) -> usize {
        let key = self.key(&p);
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.points.len();
        self.index.insert(key, id);
        self.points.push(p);
        id
    }

    /// Grid key of a point: the integer cell index on each axis, printed with
    /// fixed formatting so identical cells always give identical text.
    pub fn key(&self, p: &Point3<Real>) -> String {
        // `+ 0.0` turns -0 into 0 so both sides of the origin share a cell
        let cell = |c: Real| (c / self.eps).round() + 0.0;
        format!("{:.0},{:.0},{:.0}", cell(p.x), cell(p.y), cell(p.z))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point3<Real>] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point3<Real>> {
        self.points
    }
}

/// Weld the corners of `triangles` into a shared pool.
///
/// Returns the pool and one index triple per input triangle, in input order.
/// Each corner is looked up on its own, so degenerate triangles survive as
/// triples with repeated indices.
pub fn dedup_vertices(triangles: &[Triangle], eps: Real) -> (VertexPool, Vec<[usize; 3]>) {
    let mut pool = VertexPool::new(eps);
    let triples: Vec<[usize; 3]> = triangles
        .iter()
        .map(|[a, b, c]| [pool.insert(*a), pool.insert(*b), pool.insert(*c)])
        .collect();

    debug!(
        "welded {} corners into {} vertices (eps = {eps})",
        triangles.len() * 3,
        pool.len()
    );
    (pool, triples)
}
