/// OBJView - load an OBJ model, transform it and report its render buffers
///
/// Usage: objview <model.obj> [--rotate X,Y,Z] [--translate X,Y,Z]
///                [--mode wireframe|points|solid] [--settings PATH]

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::PathBuf;

use objview_core::{SettingsStore, ViewMode};
use objview_cli::Viewer;

/// Load an OBJ model, transform it and report its render buffers
#[derive(Debug, Parser)]
#[command(name = "objview")]
#[command(about = "Load an OBJ model, transform it and report its render buffers")]
#[command(version)]
struct Options {
    /// Wavefront OBJ file to load
    model: PathBuf,

    /// Rotation in degrees about X, Y and Z, e.g. 90,0,0
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    rotate: Option<[f32; 3]>,

    /// Shift along X, Y and Z after normalizing
    #[arg(long, value_parser = parse_triple, allow_hyphen_values = true)]
    translate: Option<[f32; 3]>,

    /// View to build: wireframe, points or solid (saved to the settings)
    #[arg(long)]
    mode: Option<ViewMode>,

    /// Settings file [default: settings.json next to the executable]
    #[arg(long)]
    settings: Option<PathBuf>,
}

fn parse_triple(value: &str) -> std::result::Result<[f32; 3], String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{value}': {e}"))?;
    match parts.as_slice() {
        &[x, y, z] => Ok([x, y, z]),
        _ => Err(format!("expected three comma-separated values, got '{value}'")),
    }
}

fn default_settings_path() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("settings.json")))
        .unwrap_or_else(|| PathBuf::from("settings.json"))
}

/// Store the requested view mode so the next session starts in it.
fn remember_mode(store: &mut SettingsStore, mode: ViewMode) -> objview_core::Result<bool> {
    let saved = store.update(|settings| settings.show_vertices = mode == ViewMode::Points)?;
    if saved {
        log::info!("saved view mode {mode:?} to {}", store.path().display());
    }
    Ok(saved)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse();

    let settings_path = options.settings.clone().unwrap_or_else(default_settings_path);
    let mut store = SettingsStore::open(&settings_path)
        .with_context(|| format!("failed to read settings from {}", settings_path.display()))?;
    if let Some(mode) = options.mode {
        remember_mode(&mut store, mode)
            .with_context(|| format!("failed to save settings to {}", settings_path.display()))?;
    }

    let mut viewer = Viewer::new(store.settings().clone());
    viewer
        .load_model(&options.model)
        .with_context(|| format!("failed to load {}", options.model.display()))?;

    if let Some([x, y, z]) = options.translate {
        viewer.shift(x, y, z);
    }
    if let Some([x, y, z]) = options.rotate {
        viewer.rotate(x, y, z);
    }

    let mode = options.mode.unwrap_or_else(|| viewer.settings().view_mode());
    let view = viewer.create_view(mode)?;
    let (vertex_floats, index_count, primitive) =
        (view.vertex_data.len(), view.index_data.len(), view.primitive_type());

    let mesh = viewer.mesh();
    println!("model:     {}", options.model.display());
    println!("vertices:  {}", mesh.vertex_count());
    println!("polygons:  {}", mesh.polygon_count());
    if let Some(bounds) = mesh.bounds() {
        println!(
            "bounds:    ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        );
    }
    println!("view:      {mode:?} ({primitive:?})");
    println!("buffers:   {vertex_floats} vertex floats, {index_count} indices");
    println!("primitives: {}", viewer.polygon_count());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(list: &[&str]) -> std::result::Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("objview").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_triple() {
        assert_eq!(parse_triple("1, -2.5,3").unwrap(), [1.0, -2.5, 3.0]);
        assert!(parse_triple("1,2").is_err());
        assert!(parse_triple("1,a,3").is_err());
    }

    #[test]
    fn test_parse_options() {
        let options = parse(&[
            "cube.obj",
            "--rotate",
            "90,0,0",
            "--translate",
            "-1,2,-3",
            "--mode",
            "solid",
            "--settings",
            "/tmp/s.json",
        ])
        .unwrap();
        assert_eq!(options.model, PathBuf::from("cube.obj"));
        assert_eq!(options.rotate, Some([90.0, 0.0, 0.0]));
        assert_eq!(options.translate, Some([-1.0, 2.0, -3.0]));
        assert_eq!(options.mode, Some(ViewMode::Solid));
        assert_eq!(options.settings, Some(PathBuf::from("/tmp/s.json")));
    }

    #[test]
    fn test_parse_options_defaults() {
        let options = parse(&["cube.obj"]).unwrap();
        assert_eq!(options.rotate, None);
        assert_eq!(options.translate, None);
        assert_eq!(options.mode, None);
        assert_eq!(options.settings, None);
    }

    #[test]
    fn test_parse_options_errors() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["a.obj", "b.obj"]).is_err());
        assert!(parse(&["a.obj", "--rotate"]).is_err());
        assert!(parse(&["a.obj", "--rotate", "1,2"]).is_err());
        assert!(parse(&["a.obj", "--zoom", "2"]).is_err());
        assert!(parse(&["a.obj", "--mode", "shaded"]).is_err());
    }

    #[test]
    fn test_remember_mode_saves_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut store = SettingsStore::open(&path).unwrap();

        assert!(!remember_mode(&mut store, ViewMode::Wireframe).unwrap());
        assert!(!path.exists());

        assert!(remember_mode(&mut store, ViewMode::Points).unwrap());
        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.settings().view_mode(), ViewMode::Points);

        assert!(remember_mode(&mut store, ViewMode::Solid).unwrap());
        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.settings().view_mode(), ViewMode::Wireframe);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }
}
