/// Persistent viewer settings (settings.json)
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::primitive::ViewMode;

/// Projection used by the viewer camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// An opaque RGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .filter(|hex| hex.len() == 6 && hex.is_ascii())
            .ok_or_else(|| format!("expected #rrggbb, got '{s}'"))?;
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("bad color '{s}': {e}"))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerSettings {
    #[serde(default = "default_true")]
    pub is_perspective: bool,
    #[serde(default)]
    pub show_vertices: bool,
    #[serde(default = "default_true")]
    pub solid_lines: bool,
    #[serde(default = "default_line_color")]
    pub line_color: Color,
    #[serde(default = "default_vertex_color")]
    pub vertex_color: Color,
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default = "default_point_size")]
    pub point_size: f32,
    #[serde(default = "default_line_width")]
    pub line_width: f32,
}

fn default_true() -> bool {
    true
}

fn default_line_color() -> Color {
    Color::rgb(0x42, 0xa5, 0xf5)
}

fn default_vertex_color() -> Color {
    Color::rgb(0xff, 0x00, 0x00)
}

fn default_background_color() -> Color {
    Color::rgb(0xff, 0xff, 0xff)
}

fn default_point_size() -> f32 {
    10.0
}

fn default_line_width() -> f32 {
    1.0
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            is_perspective: true,
            show_vertices: false,
            solid_lines: true,
            line_color: default_line_color(),
            vertex_color: default_vertex_color(),
            background_color: default_background_color(),
            point_size: default_point_size(),
            line_width: default_line_width(),
        }
    }
}

impl ViewerSettings {
    pub fn projection(&self) -> ProjectionMode {
        if self.is_perspective {
            ProjectionMode::Perspective
        } else {
            ProjectionMode::Orthographic
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        if self.show_vertices {
            ViewMode::Points
        } else {
            ViewMode::Wireframe
        }
    }

    /// Read settings from `path`, falling back to defaults if it is missing.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("no settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(Error::io(path, e)),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| Error::io(path, e))
    }
}

/// Settings bound to a file: loaded once, saved whenever they change
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: ViewerSettings,
}

impl SettingsStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let settings = ViewerSettings::load(&path)?;
        Ok(Self { path, settings })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    /// Apply `change` and persist the result if anything differs.
    ///
    /// Returns whether the settings changed.
    pub fn update(&mut self, change: impl FnOnce(&mut ViewerSettings)) -> Result<bool> {
        let mut updated = self.settings.clone();
        change(&mut updated);
        if updated == self.settings {
            return Ok(false);
        }
        updated.save(&self.path)?;
        self.settings = updated;
        Ok(true)
    }
}
