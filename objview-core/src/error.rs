/// Error types for loading, transforming and tessellating meshes
use std::path::PathBuf;
use thiserror::Error;

/// Result type used throughout the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with a mesh.
#[derive(Debug, Error)]
pub enum Error {
    /// The file could not be opened or read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A vertex or face record is malformed.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// An index does not address an element of the collection.
    #[error("index {index} out of range for {len} elements")]
    IndexOutOfRange { index: i64, len: usize },

    /// A polygon cannot be split into triangles.
    #[error("cannot triangulate a polygon with {vertices} vertices")]
    UnsupportedTopology { vertices: usize },

    /// A polygon has too few vertices to form an edge.
    #[error("polygon with {vertices} vertices has no edges")]
    DegeneratePolygon { vertices: usize },

    /// A triangle index list whose length is not a multiple of three.
    #[error("triangle index list length {len} is not a multiple of 3")]
    InvalidInputLength { len: usize },

    /// The operation needs at least one vertex.
    #[error("mesh has no vertices")]
    EmptyMesh,

    /// Settings could not be encoded or decoded.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
