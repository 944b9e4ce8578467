//! # Dependency Injection / 依赖注入模块
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Resolve effective settings from file, flags and environment / 解析最终配置
//! - ✅ Create infra implementations (credential store, REST gateways) / 创建 infra 实现
//! - ✅ Group them into [`AppDeps`] / 打包为 AppDeps
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No business logic / 禁止包含任何业务逻辑**
//! - Do not decide what happens when the user is signed out
//! - 不判断"未登录时怎样"
//!
//! > **This is the only place allowed to depend on juke-infra + juke-app simultaneously.**
//! > **这是唯一允许同时依赖 juke-infra 和 juke-app 的地方。**

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use juke_app::AppDeps;
use juke_core::config::AppConfig;
use juke_core::ports::CredentialStorePort;
use juke_infra::fs::app_data_dir;
use juke_infra::{
    ApiClient, FileCredentialStore, HttpAuthGateway, HttpCatalogGateway, HttpPlaybackGateway,
    HttpProfileGateway, HttpWorldGateway, InMemoryCredentialStore,
};

/// Environment variables consulted for the backend URL, in order.
pub const BACKEND_URL_ENV: [&str; 2] = ["JUKE_BACKEND_URL", "BACKEND_URL"];

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("No backend URL configured; set [api].base_url, --backend-url or JUKE_BACKEND_URL")]
    MissingBaseUrl,

    #[error("Data directory resolution failed: {0}")]
    DataDir(String),

    #[error("HTTP client initialization failed: {0}")]
    HttpClientInit(String),

    #[error("Credential store initialization failed: {0}")]
    CredentialStoreInit(String),
}

/// Values given on the command line; they win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend_url: Option<String>,
    pub data_dir: Option<PathBuf>,
}

/// Effective settings after overrides and fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub data_dir: PathBuf,
}

/// Resolve effective settings.
///
/// Precedence for the backend URL: flag, then `JUKE_BACKEND_URL`, then
/// `BACKEND_URL`, then the file. An empty data directory resolves to the
/// platform data directory; a zero timeout becomes 15 seconds.
pub fn resolve_config(
    config: &AppConfig,
    overrides: &ConfigOverrides,
) -> WiringResult<ResolvedConfig> {
    resolve_with_env(config, overrides, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &AppConfig,
    overrides: &ConfigOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> WiringResult<ResolvedConfig> {
    let base_url = overrides
        .backend_url
        .clone()
        .into_iter()
        .chain(BACKEND_URL_ENV.iter().filter_map(|key| env(*key)))
        .chain(std::iter::once(config.base_url.clone()))
        .map(|url| url.trim().to_string())
        .find(|url| !url.is_empty())
        .ok_or(WiringError::MissingBaseUrl)?;

    let timeout = match config.timeout_secs {
        0 => DEFAULT_TIMEOUT,
        secs => Duration::from_secs(secs),
    };

    let data_dir = match overrides.data_dir.clone() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ if !config.data_dir.as_os_str().is_empty() => config.data_dir.clone(),
        _ => app_data_dir().map_err(|e| WiringError::DataDir(e.to_string()))?,
    };

    Ok(ResolvedConfig {
        base_url,
        timeout,
        data_dir,
    })
}

/// Build every port implementation and group them.
///
/// `ephemeral` keeps the session in memory only, leaving the session file untouched.
pub async fn wire_dependencies(
    resolved: &ResolvedConfig,
    ephemeral: bool,
) -> WiringResult<AppDeps> {
    let client = ApiClient::new(&resolved.base_url, resolved.timeout)
        .map_err(|e| WiringError::HttpClientInit(e.to_string()))?;

    let credential_store: Arc<dyn CredentialStorePort> = if ephemeral {
        Arc::new(InMemoryCredentialStore::new())
    } else {
        let store = FileCredentialStore::open_in(&resolved.data_dir)
            .await
            .map_err(|e| WiringError::CredentialStoreInit(e.to_string()))?;
        info!(path = %store.path().display(), "Session file opened");
        Arc::new(store)
    };

    Ok(AppDeps {
        credential_store,
        auth: Arc::new(HttpAuthGateway::new(client.clone())),
        profiles: Arc::new(HttpProfileGateway::new(client.clone())),
        catalog: Arc::new(HttpCatalogGateway::new(client.clone())),
        playback: Arc::new(HttpPlaybackGateway::new(client.clone())),
        world: Arc::new(HttpWorldGateway::new(client)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(base_url: &str, timeout_secs: u64, data_dir: &str) -> AppConfig {
        AppConfig {
            base_url: base_url.to_string(),
            timeout_secs,
            data_dir: PathBuf::from(data_dir),
        }
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_file_values_used_without_overrides() {
        let resolved = resolve_with_env(
            &config("https://api.juke.fm", 30, "/data"),
            &ConfigOverrides::default(),
            env_of(&[]),
        )
        .unwrap();

        assert_eq!(resolved.base_url, "https://api.juke.fm");
        assert_eq!(resolved.timeout, Duration::from_secs(30));
        assert_eq!(resolved.data_dir, PathBuf::from("/data"));
    }

    #[test]
    fn test_backend_url_precedence() {
        let file = config("https://file", 0, "/data");
        let env = [("JUKE_BACKEND_URL", "https://juke-env"), ("BACKEND_URL", "https://env")];

        let flag = ConfigOverrides {
            backend_url: Some("https://flag".into()),
            ..Default::default()
        };
        assert_eq!(
            resolve_with_env(&file, &flag, env_of(&env)).unwrap().base_url,
            "https://flag"
        );
        assert_eq!(
            resolve_with_env(&file, &ConfigOverrides::default(), env_of(&env))
                .unwrap()
                .base_url,
            "https://juke-env"
        );
        assert_eq!(
            resolve_with_env(&file, &ConfigOverrides::default(), env_of(&env[1..]))
                .unwrap()
                .base_url,
            "https://env"
        );
    }

    #[test]
    fn test_missing_base_url_is_an_error() {
        let err = resolve_with_env(
            &config("  ", 0, "/data"),
            &ConfigOverrides::default(),
            env_of(&[("BACKEND_URL", "")]),
        )
        .unwrap_err();

        assert!(matches!(err, WiringError::MissingBaseUrl));
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let resolved = resolve_with_env(
            &config("https://api", 0, "/data"),
            &ConfigOverrides::default(),
            env_of(&[]),
        )
        .unwrap();

        assert_eq!(resolved.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_data_dir_flag_wins() {
        let overrides = ConfigOverrides {
            data_dir: Some(PathBuf::from("/flag")),
            ..Default::default()
        };
        let resolved =
            resolve_with_env(&config("https://api", 0, "/file"), &overrides, env_of(&[])).unwrap();

        assert_eq!(resolved.data_dir, PathBuf::from("/flag"));
    }

    #[tokio::test]
    async fn test_wire_dependencies_opens_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = ResolvedConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout: DEFAULT_TIMEOUT,
            data_dir: dir.path().to_path_buf(),
        };

        let deps = wire_dependencies(&resolved, false).await.unwrap();

        assert_eq!(deps.credential_store.current_credential().await.unwrap(), None);
    }
}
