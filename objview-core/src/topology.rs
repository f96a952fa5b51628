/// Conversion of polygon lists into flat triangle and edge index buffers
use crate::error::{Error, Result};
use crate::geometry::Polygon;

/// Split every polygon into triangles.
///
/// Triangles are copied as-is and quads are split along the `v0-v2`
/// diagonal into `(v0, v1, v2)` and `(v0, v2, v3)`. Any other size fails.
pub fn to_triangles(polygons: &[Polygon]) -> Result<Vec<u32>> {
    let mut indices = Vec::with_capacity(polygons.len() * 6);
    for polygon in polygons {
        match *polygon.indices() {
            [v0, v1, v2] => indices.extend_from_slice(&[v0, v1, v2]),
            [v0, v1, v2, v3] => indices.extend_from_slice(&[v0, v1, v2, v0, v2, v3]),
            _ => {
                return Err(Error::UnsupportedTopology {
                    vertices: polygon.len(),
                })
            }
        }
    }
    Ok(indices)
}

/// One edge per pair of consecutive vertices, closing each polygon's loop.
pub fn to_lines(polygons: &[Polygon]) -> Result<Vec<u32>> {
    let edge_count: usize = polygons.iter().map(Polygon::len).sum();
    let mut indices = Vec::with_capacity(edge_count * 2);
    for polygon in polygons {
        let ring = polygon.indices();
        if ring.len() < 2 {
            return Err(Error::DegeneratePolygon {
                vertices: ring.len(),
            });
        }
        for (i, &start) in ring.iter().enumerate() {
            indices.push(start);
            indices.push(ring[(i + 1) % ring.len()]);
        }
    }
    Ok(indices)
}

/// The three edges of every triangle in a flat triangle index list.
///
/// Edges shared by neighbouring triangles are emitted once per triangle.
pub fn triangles_to_lines(triangles: &[u32]) -> Result<Vec<u32>> {
    if triangles.len() % 3 != 0 {
        return Err(Error::InvalidInputLength {
            len: triangles.len(),
        });
    }
    let mut indices = Vec::with_capacity(triangles.len() * 2);
    for triangle in triangles.chunks_exact(3) {
        let (v0, v1, v2) = (triangle[0], triangle[1], triangle[2]);
        indices.extend_from_slice(&[v0, v1, v1, v2, v2, v0]);
    }
    Ok(indices)
}
