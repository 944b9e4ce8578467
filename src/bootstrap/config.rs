//! # Configuration Loader / 配置加载器
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Read the TOML configuration file / 读取 TOML 配置文件
//! - ✅ Map it onto the AppConfig DTO / 映射为 AppConfig DTO
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation or default value logic / 禁止验证与默认值逻辑**
//!
//! Effective values are resolved in [`super::wiring::resolve_config`].

use std::path::Path;

use anyhow::Context;
use juke_core::config::AppConfig;

/// Load configuration from a TOML file.
/// 从 TOML 文件加载配置。
///
/// Missing sections and keys become empty values; nothing is validated.
///
/// # Errors / 错误
///
/// Returns an error when the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let file = write_config(
            r#"
            [api]
            base_url = "https://api.juke.fm"
            timeout_secs = 30

            [storage]
            data_dir = "/var/lib/juke"
        "#,
        );

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.base_url, "https://api.juke.fm");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/juke"));
    }

    /// Empty values are facts, not errors.
    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let file = write_config("[api]\n");

        let config = load_config(file.path()).unwrap();

        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let file = write_config("[api\nbase_url = ");

        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/juke.toml")).unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }
}
