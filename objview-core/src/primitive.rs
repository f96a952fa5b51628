/// Render-ready vertex and index buffers for the different view modes
use crate::error::Result;
use crate::mesh::Mesh;
use crate::topology;

/// Floats per vertex in a vertex buffer: position `x, y, z` then `u, v`.
pub const VERTEX_STRIDE: usize = 5;

/// How the index buffer is to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Points,
    Lines,
    Triangles,
}

/// What the user asked to see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Wireframe,
    Points,
    Solid,
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wireframe" | "lines" => Ok(Self::Wireframe),
            "points" | "vertices" => Ok(Self::Points),
            "solid" | "triangles" => Ok(Self::Solid),
            other => Err(format!("unknown view mode '{other}'")),
        }
    }
}

/// Produces the vertex and index data for one primitive type.
pub trait GeometrySource {
    fn primitive_type(&self) -> PrimitiveType;

    /// Interleaved vertex data, [`VERTEX_STRIDE`] floats per vertex.
    fn populate_vertices(&self, mesh: &Mesh) -> Vec<f32> {
        let mut data = Vec::with_capacity(mesh.vertex_count() * VERTEX_STRIDE);
        for v in mesh.vertices() {
            // Planar texture coordinates taken from the position.
            data.extend_from_slice(&[v.x, v.y, v.z, v.x, v.y]);
        }
        data
    }

    fn populate_indices(&self, mesh: &Mesh) -> Result<Vec<u32>>;
}

/// Wireframe: one line per polygon edge
#[derive(Debug, Clone, Copy, Default)]
pub struct LineTopology;

impl GeometrySource for LineTopology {
    fn primitive_type(&self) -> PrimitiveType {
        PrimitiveType::Lines
    }

    fn populate_indices(&self, mesh: &Mesh) -> Result<Vec<u32>> {
        topology::to_lines(mesh.polygons())
    }
}

/// Point cloud: vertices only, no index buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct PointTopology;

impl GeometrySource for PointTopology {
    fn primitive_type(&self) -> PrimitiveType {
        PrimitiveType::Points
    }

    fn populate_indices(&self, _mesh: &Mesh) -> Result<Vec<u32>> {
        Ok(Vec::new())
    }
}

/// Filled faces split into triangles
#[derive(Debug, Clone, Copy, Default)]
pub struct TriangleTopology;

impl GeometrySource for TriangleTopology {
    fn primitive_type(&self) -> PrimitiveType {
        PrimitiveType::Triangles
    }

    fn populate_indices(&self, mesh: &Mesh) -> Result<Vec<u32>> {
        topology::to_triangles(mesh.polygons())
    }
}

/// The closed set of geometry sources
#[derive(Debug, Clone, Copy)]
pub enum Topology {
    Lines(LineTopology),
    Points(PointTopology),
    Triangles(TriangleTopology),
}

impl Topology {
    pub fn for_mode(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Wireframe => Self::Lines(LineTopology),
            ViewMode::Points => Self::Points(PointTopology),
            ViewMode::Solid => Self::Triangles(TriangleTopology),
        }
    }

    fn source(&self) -> &dyn GeometrySource {
        match self {
            Self::Lines(source) => source,
            Self::Points(source) => source,
            Self::Triangles(source) => source,
        }
    }

    /// Build vertex and index buffers for `mesh`.
    pub fn build(&self, mesh: &Mesh) -> Result<GeometryBuffers> {
        let source = self.source();
        let index_data = source.populate_indices(mesh)?;
        let vertex_data = source.populate_vertices(mesh);
        let primitive = source.primitive_type();
        let primitive_count = match primitive {
            PrimitiveType::Points => mesh.vertex_count(),
            PrimitiveType::Lines => index_data.len() / 2,
            PrimitiveType::Triangles => index_data.len() / 3,
        };
        log::debug!(
            "built {primitive:?} buffers: {} vertices, {primitive_count} primitives",
            mesh.vertex_count()
        );
        Ok(GeometryBuffers {
            topology: *self,
            vertex_data,
            index_data,
            vertex_count: mesh.vertex_count(),
            primitive_count,
        })
    }
}

impl GeometrySource for Topology {
    fn primitive_type(&self) -> PrimitiveType {
        self.source().primitive_type()
    }

    fn populate_vertices(&self, mesh: &Mesh) -> Vec<f32> {
        self.source().populate_vertices(mesh)
    }

    fn populate_indices(&self, mesh: &Mesh) -> Result<Vec<u32>> {
        self.source().populate_indices(mesh)
    }
}

/// Buffers handed to a renderer
#[derive(Debug, Clone)]
pub struct GeometryBuffers {
    pub topology: Topology,
    pub vertex_data: Vec<f32>,
    pub index_data: Vec<u32>,
    pub vertex_count: usize,
    pub primitive_count: usize,
}

impl GeometryBuffers {
    pub fn primitive_type(&self) -> PrimitiveType {
        self.topology.primitive_type()
    }

    /// Re-read vertex positions after a rotation or translation.
    ///
    /// Topology is unchanged by rigid transforms, so the index data is kept.
    pub fn refresh_vertices(&mut self, mesh: &Mesh) {
        self.vertex_data = self.topology.populate_vertices(mesh);
        self.vertex_count = mesh.vertex_count();
    }
}
