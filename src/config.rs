// config.rs
//
// Room configuration, read from JSON:
// - Path: --config <path>, else env CUBE_ROOM_CONFIG, else assets/room.json
//   next to the executable, else ./assets/room.json
// - Every field is optional; missing fields keep their defaults
// - --background <path> overrides the background texture

use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "CUBE_ROOM_CONFIG";
const CONFIG_FILE: &str = "room.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// An sRGB colour as three bytes, e.g. `[0, 0, 102]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);

    /// Linear components for the sRGB render target.
    pub fn linear(self) -> [f32; 3] {
        self.0.map(|c| {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WallColors {
    pub left: Rgb,
    pub right: Rgb,
    pub back: Rgb,
    pub top: Rgb,
    pub bottom: Rgb,
    /// Front wall fill when the background texture is unavailable.
    pub untextured_front: Rgb,
}

impl Default for WallColors {
    fn default() -> Self {
        Self {
            left: Rgb([0x00, 0x00, 0x66]),
            right: Rgb([0x66, 0x00, 0x00]),
            back: Rgb::BLACK,
            top: Rgb::BLACK,
            bottom: Rgb::BLACK,
            untextured_front: Rgb::BLACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PanelContent {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Panels {
    pub left: PanelContent,
    pub center: PanelContent,
    pub right: PanelContent,
}

impl Default for Panels {
    fn default() -> Self {
        let panel = |title: &str, body: &str| PanelContent {
            title: title.to_string(),
            body: body.to_string(),
        };
        Self {
            left: panel("About", "Who we are and what we build."),
            center: panel("Welcome", "Drag, swipe or use the arrow keys to look around."),
            right: panel("Contact", "Get in touch."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub title: String,
    pub window_width: u32,
    pub window_height: u32,
    /// Image for the front wall; relative paths resolve against the config file.
    pub background: Option<PathBuf>,
    pub wall_colors: WallColors,
    pub panels: Panels,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            title: "Cube Room".to_string(),
            window_width: 1280,
            window_height: 720,
            background: None,
            wall_colors: WallColors::default(),
            panels: Panels::default(),
        }
    }
}

impl RoomConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let (Some(bg), Some(dir)) = (config.background.as_mut(), path.parent()) {
            if bg.is_relative() {
                *bg = dir.join(&*bg);
            }
        }
        Ok(config)
    }
}

/// Command line and environment overrides.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LaunchArgs {
    pub config: Option<PathBuf>,
    pub background: Option<PathBuf>,
}

impl LaunchArgs {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut out = Self::default();
        let mut it = args.into_iter();
        while let Some(a) = it.next() {
            match a.as_str() {
                "--config" => out.config = it.next().map(PathBuf::from),
                "--background" => out.background = it.next().map(PathBuf::from),
                _ => {}
            }
        }
        out
    }

    pub fn from_env() -> Self {
        let mut args = Self::parse(std::env::args().skip(1));
        if args.config.is_none() {
            if let Ok(v) = std::env::var(CONFIG_ENV) {
                if !v.trim().is_empty() {
                    args.config = Some(PathBuf::from(v));
                }
            }
        }
        args
    }
}

/// Looks for assets/room.json next to the executable, then in the working dir.
fn find_config_file() -> Option<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join("assets").join(CONFIG_FILE);
            if p.exists() {
                return Some(p);
            }
        }
    }

    let p = PathBuf::from("assets").join(CONFIG_FILE);
    if p.exists() {
        return Some(p);
    }

    None
}

/// Resolves the configuration, falling back to defaults on any failure.
pub fn resolve(args: &LaunchArgs) -> RoomConfig {
    let path = args.config.clone().or_else(find_config_file);

    let mut config = match path {
        Some(p) => match RoomConfig::load(&p) {
            Ok(c) => {
                log::info!("loaded config from {}", p.display());
                c
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                RoomConfig::default()
            }
        },
        None => RoomConfig::default(),
    };

    if let Some(bg) = &args.background {
        config.background = Some(bg.clone());
    }
    config
}
