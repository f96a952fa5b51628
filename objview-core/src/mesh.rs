/// The mesh entity and its rigid transforms
use nalgebra::Vector3;

use crate::error::{Error, Result};
use crate::geometry::{Bounds, Polygon, Vertex};
use crate::transform::{RotationState, Transform};

/// Largest extent of a mesh after [`Mesh::normalize`].
pub const TARGET_SIZE: f32 = 12.0;

/// An indexed polygon mesh.
///
/// Besides the live `vertices`, the mesh keeps a base pose: the vertex set as
/// it stood after loading, normalizing or the last translation. Rotations are
/// always derived from the base pose, so each [`Mesh::rotate`] call sets an
/// absolute orientation instead of composing with the previous one.
/// Translations are tracked as a cumulative shift and applied incrementally.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    polygons: Vec<Polygon>,
    base_pose: Vec<Vertex>,
    applied_shift: Vertex,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, polygons: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            polygons: Vec::with_capacity(polygons),
            base_pose: Vec::with_capacity(vertices),
            applied_shift: Vertex::zero(),
        }
    }

    pub fn add_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
        self.base_pose.push(vertex);
    }

    /// Attach a polygon, checking every index against the current vertices.
    pub fn add_polygon(&mut self, polygon: Polygon) -> Result<()> {
        let len = self.vertices.len();
        if let Some(index) = polygon.iter().find(|&i| i as usize >= len) {
            return Err(Error::IndexOutOfRange {
                index: i64::from(index),
                len,
            });
        }
        self.polygons.push(polygon);
        Ok(())
    }

    /// Remove all geometry and reset the cached pose.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.polygons.clear();
        self.base_pose.clear();
        self.applied_shift = Vertex::zero();
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Vertex positions every rotation starts from.
    pub fn base_pose(&self) -> &[Vertex] {
        &self.base_pose
    }

    /// Cumulative translation applied since the last normalize.
    pub fn applied_shift(&self) -> Vertex {
        self.applied_shift
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Result<&Vertex> {
        self.vertices.get(index).ok_or(Error::IndexOutOfRange {
            index: index as i64,
            len: self.vertices.len(),
        })
    }

    pub fn polygon(&self, index: usize) -> Result<&Polygon> {
        self.polygons.get(index).ok_or(Error::IndexOutOfRange {
            index: index as i64,
            len: self.polygons.len(),
        })
    }

    /// Mean of all vertex positions.
    pub fn centroid(&self) -> Result<Vertex> {
        centroid_of(&self.vertices)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_vertices(&self.vertices)
    }

    /// Move the centroid to the origin.
    pub fn center(&mut self) {
        let Ok(center) = self.centroid() else {
            return;
        };
        for vertex in &mut self.vertices {
            *vertex -= center;
        }
        self.base_pose.clone_from(&self.vertices);
    }

    /// Center the bounding box on the origin and scale the largest extent to
    /// [`TARGET_SIZE`].
    pub fn normalize(&mut self) {
        let Some(bounds) = self.bounds() else {
            return;
        };
        let center = bounds.center();
        let max_extent = bounds.max_extent();
        let scale = TARGET_SIZE / max_extent;
        let scale = if max_extent > 0.0 && scale.is_finite() {
            scale
        } else {
            log::warn!("mesh has zero extent, centering without scaling");
            1.0
        };

        for vertex in &mut self.vertices {
            *vertex -= center;
            *vertex *= scale;
        }

        self.base_pose.clone_from(&self.vertices);
        self.applied_shift = Vertex::zero();
        log::debug!(
            "normalized {} vertices: extent {max_extent} scaled by {scale}",
            self.vertices.len()
        );
    }

    /// Rotate the base pose about its centroid by the given angles in degrees.
    ///
    /// The result replaces the live vertices but not the base pose, so
    /// successive calls do not accumulate.
    pub fn rotate(&mut self, angle_x: f32, angle_y: f32, angle_z: f32) {
        self.vertices.clone_from(&self.base_pose);
        let Ok(center) = self.centroid() else {
            return;
        };

        let matrix = Transform::rotation_matrix(&RotationState::new(angle_x, angle_y, angle_z));
        for vertex in &mut self.vertices {
            let local: Vector3<f32> = (*vertex - center).into();
            *vertex = Vertex::from(matrix * local) + center;
        }
    }

    /// Move the mesh so its total shift since normalizing is `(dx, dy, dz)`.
    ///
    /// Only the difference to the previous shift is applied to the live
    /// vertices, which then become the new base pose.
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        let shift = Vertex::new(dx, dy, dz);
        let delta = shift - self.applied_shift;
        for vertex in &mut self.vertices {
            *vertex += delta;
        }
        self.applied_shift = shift;
        self.base_pose.clone_from(&self.vertices);
    }
}

fn centroid_of(vertices: &[Vertex]) -> Result<Vertex> {
    if vertices.is_empty() {
        return Err(Error::EmptyMesh);
    }
    let sum = vertices
        .iter()
        .fold(Vertex::zero(), |acc, &vertex| acc + vertex);
    Ok(sum / vertices.len() as f32)
}
