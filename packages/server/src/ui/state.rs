//! Shared application state.

use crate::{config::ServerConfig, usecase::UseCases};

/// Shared application state
pub struct AppState {
    /// 全ユースケース
    pub usecases: UseCases,
    pub config: ServerConfig,
}
