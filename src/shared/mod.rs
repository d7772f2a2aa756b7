/// 共有エラー型とエラーハンドリング
pub mod errors;

/// 共有設定管理
pub mod config;

/// 請求書APIとのHTTP通信
pub mod api_client;

// 便利な再エクスポート
pub use api_client::ApiClient;
pub use config::{
    get_environment, initialize_logging_system, load_environment_variables, ApiConfig,
    Environment, EnvironmentConfig,
};
pub use errors::{AppError, AppResult};
