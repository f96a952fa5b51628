/// OBJView Core Library - Mesh model, transforms and index-buffer generation
///
/// This library loads polygon meshes from Wavefront OBJ files, applies the
/// viewer's rigid transforms, and turns faces into triangle, edge and point
/// buffers for a renderer.

pub mod error;
pub mod geometry;
pub mod mesh;
pub mod obj;
pub mod primitive;
pub mod settings;
pub mod topology;
pub mod transform;

// Re-export commonly used types
pub use error::{Error, Result};
pub use geometry::{Bounds, Polygon, Vertex};
pub use mesh::{Mesh, TARGET_SIZE};
pub use obj::load_mesh;
pub use primitive::{GeometryBuffers, GeometrySource, PrimitiveType, Topology, ViewMode};
pub use settings::{Color, ProjectionMode, SettingsStore, ViewerSettings};
pub use topology::{to_lines, to_triangles, triangles_to_lines};
pub use transform::{RotationState, Transform};
