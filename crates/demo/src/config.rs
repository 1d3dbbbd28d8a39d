// File: crates/demo/src/config.rs
// Summary: TOML configuration for the CLI; every section optional, every field defaulted.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use star_core::{ChartMode, HistoryConfig};
use star_export::{GifConfig, VideoConfig};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub history: HistoryConfig,
    pub video: VideoConfig,
    pub gif: GifConfig,
    pub render: RenderConfig,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// `light` or `dark`.
    pub theme: String,
    pub mode: ChartMode,
    pub subtitle: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { theme: "light".into(), mode: ChartMode::Date, subtitle: None }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn sections_override_individual_fields() {
        let cfg = AppConfig::parse(
            r#"
            [history]
            budget = 12

            [video]
            fps = 24
            ffmpeg_bin = "/opt/ffmpeg/bin/ffmpeg"

            [gif]
            duration_secs = 4

            [render]
            theme = "dark"
            mode = "timeline"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.history.budget, 12);
        assert_eq!(cfg.history.page_size, HistoryConfig::default().page_size);
        assert_eq!(cfg.video.fps, 24);
        assert_eq!(cfg.video.duration_secs, 8);
        assert_eq!(cfg.video.ffmpeg_bin, "/opt/ffmpeg/bin/ffmpeg");
        assert_eq!(cfg.gif.total_frames(), 80);
        assert_eq!(cfg.render.mode, ChartMode::Timeline);
        assert_eq!(cfg.render.theme, "dark");
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(AppConfig::parse("[render]\nmode = \"sideways\"").is_err());
    }
}
