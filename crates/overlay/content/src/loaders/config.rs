//! Overlay configuration loader.

use std::path::Path;

use overlay_core::OverlayConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for overlay configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`OverlayConfig::default`].
    pub fn load(path: &Path) -> LoadResult<OverlayConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<OverlayConfig> {
        let config: OverlayConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.bus_capacity == 0 {
            anyhow::bail!("bus_capacity must be greater than zero");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_overrides_selected_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
bus_capacity = 8

[tags]
action_completed = "action_done"
"#
        )
        .unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();

        assert_eq!(config.bus_capacity, 8);
        assert_eq!(config.tags.action_completed, "action_done");
        assert_eq!(config.tags.client_info, "init_client_info");
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(ConfigLoader::parse("").unwrap(), OverlayConfig::default());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(ConfigLoader::parse("bus_capacity = 0").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/overlay.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/overlay.toml"));
    }
}
