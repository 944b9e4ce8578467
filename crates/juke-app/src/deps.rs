//! # Application Dependencies / 应用依赖
//!
//! This module defines the dependency grouping for app construction.
//! 此模块定义应用构造的依赖分组。
//!
//! **Note / 注意**: This is NOT a Builder pattern.
//! **这不是 Builder 模式。**
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - Just parameter grouping / 仅用于参数打包

use std::sync::Arc;

use juke_core::ports::*;

use crate::session::SessionController;

/// Application dependency grouping (non-Builder, just parameter grouping)
/// 应用依赖分组（非 Builder，仅参数打包）
///
/// All dependencies are required - no defaults, no optional fields.
/// 所有依赖都是必需的 - 无默认值，无可选字段。
#[derive(Clone)]
pub struct AppDeps {
    // Session dependencies / 会话依赖
    pub credential_store: Arc<dyn CredentialStorePort>,
    pub auth: Arc<dyn AuthGatewayPort>,
    pub profiles: Arc<dyn ProfileGatewayPort>,

    // Music dependencies / 音乐依赖
    pub catalog: Arc<dyn CatalogGatewayPort>,
    pub playback: Arc<dyn PlaybackGatewayPort>,

    // World dependencies / 世界地图依赖
    pub world: Arc<dyn WorldGatewayPort>,
}

impl AppDeps {
    /// Start a [`SessionController`] over this dependency set.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn session_controller(&self) -> SessionController {
        SessionController::new(
            self.credential_store.clone(),
            self.auth.clone(),
            self.profiles.clone(),
        )
    }
}
