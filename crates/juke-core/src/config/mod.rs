//! # Pure Data Module / 纯数据模块
//!
//! Configuration DTO mapped straight from TOML.
//!
//! > **This module contains data only, no policy, no validation.**
//! > **此模块只包含数据结构定义，禁止业务逻辑、验证逻辑、默认值计算。**
//!
//! Effective values (env overrides, default data directory, timeout fallback)
//! are resolved by the binary at wiring time.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend base URL (may be empty - this is a fact, not an error)
    /// 后端地址（可能为空 - 这就是事实，不是错误）
    pub base_url: String,

    /// Request timeout in seconds. Zero means "not configured".
    pub timeout_secs: u64,

    /// Data directory for the session file and logs (path info only, no existence check)
    /// 数据目录（仅路径信息，不检查是否存在）
    pub data_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Missing keys become empty strings or zero; nothing is validated here.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: toml_value
                .get("api")
                .and_then(|a| a.get("base_url"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            timeout_secs: toml_value
                .get("api")
                .and_then(|a| a.get("timeout_secs"))
                .and_then(|v| v.as_integer())
                .unwrap_or(0)
                .max(0) as u64,
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 0,
            data_dir: PathBuf::new(),
        }
    }
}
