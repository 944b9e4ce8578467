use anyhow::{Context, Result};
use std::path::PathBuf;

/// Directory name under the platform data directory.
pub const APP_DIR_NAME: &str = "Juke";

/// Get the Juke application data root directory.
///
/// 获取 Juke 应用数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/Juke
/// - Windows: %APPDATA%\Juke
/// - Linux: $XDG_DATA_HOME/Juke or ~/.local/share/Juke
///
/// The directory is not created here; callers create it when they first write.
/// 此函数不自动创建目录。
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join(APP_DIR_NAME))
}

/// 获取日志目录
pub fn logs_dir(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("logs")
}

/// 根据平台获取基础数据目录
fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // 优先使用 XDG_DATA_HOME，如果不存在则使用 ~/.local/share
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
