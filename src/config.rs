use serde::Deserialize;
use std::path::Path;

/// Raster settings for PNG output.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub background: String,
    pub zoom: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            zoom: 1.0,
        }
    }
}

/// Runtime configuration. The document's own `config` block still wins for
/// per-diagram settings; this covers what lives outside the document.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Skin override; `None` defers to the document, then to `default`.
    pub skin: Option<String>,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    skin: Option<String>,
    background: Option<String>,
    zoom: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = serde_json::from_str(&contents)?;

    if let Some(skin) = parsed.skin {
        config.skin = Some(skin);
    }
    if let Some(background) = parsed.background {
        config.render.background = background;
    }
    if let Some(zoom) = parsed.zoom {
        if zoom > 0.0 {
            config.render.zoom = zoom;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.skin.is_none());
        assert_eq!(config.render.background, "#FFFFFF");
        assert_eq!(config.render.zoom, 1.0);
    }
}
