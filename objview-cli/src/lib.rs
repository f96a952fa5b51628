/// Viewer session: one mesh, its settings, and the buffers last handed out
use std::path::Path;

use objview_core::{
    load_mesh, GeometryBuffers, Mesh, Result, Topology, ViewMode, ViewerSettings,
};

/// Front-end state shared by all user actions
pub struct Viewer {
    mesh: Mesh,
    settings: ViewerSettings,
    current_view: Option<GeometryBuffers>,
}

impl Viewer {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            mesh: Mesh::new(),
            settings,
            current_view: None,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Load and normalize a model, replacing the current one.
    ///
    /// A failed load keeps the previous model on screen.
    pub fn load_model(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Err(e) = load_mesh(&mut self.mesh, path) {
            log::warn!("failed to load {}: {e}", path.display());
            return Err(e);
        }
        self.current_view = None;
        log::info!(
            "loaded {}: {} vertices, {} polygons",
            path.display(),
            self.mesh.vertex_count(),
            self.mesh.polygon_count()
        );
        Ok(())
    }

    pub fn rotate(&mut self, x: f32, y: f32, z: f32) {
        self.mesh.rotate(x, y, z);
        self.refresh_view();
    }

    pub fn shift(&mut self, x: f32, y: f32, z: f32) {
        self.mesh.translate(x, y, z);
        self.refresh_view();
    }

    /// Build fresh buffers for `mode` and make them the current view.
    pub fn create_view(&mut self, mode: ViewMode) -> Result<&GeometryBuffers> {
        let buffers = Topology::for_mode(mode).build(&self.mesh)?;
        Ok(self.current_view.insert(buffers))
    }

    /// Buffers for the mode the settings ask for.
    pub fn create_default_view(&mut self) -> Result<&GeometryBuffers> {
        self.create_view(self.settings.view_mode())
    }

    pub fn current_view(&self) -> Option<&GeometryBuffers> {
        self.current_view.as_ref()
    }

    /// Vertices in the current view, or 0 before any view was built.
    pub fn vertex_count(&self) -> usize {
        self.current_view.as_ref().map_or(0, |view| view.vertex_count)
    }

    /// Primitives (edges, points or triangles) in the current view.
    pub fn polygon_count(&self) -> usize {
        self.current_view.as_ref().map_or(0, |view| view.primitive_count)
    }

    fn refresh_view(&mut self) {
        if let Some(view) = &mut self.current_view {
            view.refresh_vertices(&self.mesh);
        }
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use objview_core::{PrimitiveType, TARGET_SIZE};
    use std::io::Write;

    const CUBE: &str = "\
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
f 1 2 3 4
f 5 6 7 8
f 1 2 6 5
f 3 4 8 7
f 1 4 8 5
f 2 3 7 6
";

    fn write_obj(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_counts_before_any_view() {
        let viewer = Viewer::default();
        assert_eq!(viewer.vertex_count(), 0);
        assert_eq!(viewer.polygon_count(), 0);
        assert!(viewer.current_view().is_none());
    }

    #[test]
    fn test_load_and_views() {
        let file = write_obj(CUBE);
        let mut viewer = Viewer::default();
        viewer.load_model(file.path()).unwrap();

        let bounds = viewer.mesh().bounds().unwrap();
        assert!((bounds.max_extent() - TARGET_SIZE).abs() < 1e-5);

        let lines = viewer.create_view(ViewMode::Wireframe).unwrap();
        assert_eq!(lines.primitive_type(), PrimitiveType::Lines);
        assert_eq!(lines.primitive_count, 24);
        assert_eq!(viewer.vertex_count(), 8);
        assert_eq!(viewer.polygon_count(), 24);

        viewer.create_view(ViewMode::Solid).unwrap();
        assert_eq!(viewer.polygon_count(), 12);

        viewer.create_view(ViewMode::Points).unwrap();
        assert_eq!(viewer.polygon_count(), 8);
    }

    #[test]
    fn test_failed_load_keeps_model() {
        let file = write_obj(CUBE);
        let mut viewer = Viewer::default();
        viewer.load_model(file.path()).unwrap();

        assert!(viewer.load_model("/nonexistent/model.obj").is_err());
        assert_eq!(viewer.mesh().vertex_count(), 8);
        assert_eq!(viewer.mesh().polygon_count(), 6);
    }

    #[test]
    fn test_transforms_refresh_current_view() {
        let file = write_obj(CUBE);
        let mut viewer = Viewer::default();
        viewer.load_model(file.path()).unwrap();
        viewer.create_view(ViewMode::Wireframe).unwrap();
        let indices = viewer.current_view().unwrap().index_data.clone();

        viewer.shift(1.0, 0.0, 0.0);
        let view = viewer.current_view().unwrap();
        assert_eq!(view.vertex_data[0], viewer.mesh().vertices()[0].x);
        assert_eq!(view.index_data, indices);

        viewer.rotate(0.0, 90.0, 0.0);
        let view = viewer.current_view().unwrap();
        assert_eq!(view.vertex_data[2], viewer.mesh().vertices()[0].z);
    }

    #[test]
    fn test_default_view_follows_settings() {
        let file = write_obj(CUBE);
        let settings = ViewerSettings {
            show_vertices: true,
            ..ViewerSettings::default()
        };
        let mut viewer = Viewer::new(settings);
        viewer.load_model(file.path()).unwrap();
        let view = viewer.create_default_view().unwrap();
        assert_eq!(view.primitive_type(), PrimitiveType::Points);
    }
}
