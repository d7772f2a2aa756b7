use crate::shared::errors::{AppError, AppResult};

/// APIサーバーのデフォルトURL（ローカル開発用バックエンド）
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5678";

/// APIリクエストのデフォルトタイムアウト（秒）
pub const DEFAULT_API_TIMEOUT_SECONDS: u64 = 30;

/// アプリケーションの実行環境を表す列挙型
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 開発環境
    Development,
    /// プロダクション環境
    Production,
}

/// 環境設定を管理する構造体
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// 実行環境
    pub environment: String,
    /// デバッグモードの有効/無効
    pub debug_mode: bool,
    /// ログレベル
    pub log_level: String,
}

impl EnvironmentConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::for_environment(get_environment(), std::env::var("LOG_LEVEL").ok())
    }

    /// 実行環境とログレベル指定から設定を組み立てる
    ///
    /// # 引数
    /// * `environment` - 実行環境
    /// * `log_level` - `LOG_LEVEL` の値（未設定なら環境ごとのデフォルト）
    pub fn for_environment(environment: Environment, log_level: Option<String>) -> Self {
        let debug_mode = environment == Environment::Development;
        let log_level = log_level.unwrap_or_else(|| {
            if debug_mode {
                "debug".to_string()
            } else {
                "info".to_string()
            }
        });

        Self {
            environment: format!("{environment:?}").to_lowercase(),
            debug_mode,
            log_level,
        }
    }

    /// プロダクション環境かどうかを判定
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 開発環境かどうかを判定
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// ログレベル文字列を`log::LevelFilter`に変換する（不明な値はInfo）
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "error" => log::LevelFilter::Error,
            "warn" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => log::LevelFilter::Info,
        }
    }
}

/// 現在の実行環境を判定する
///
/// # 判定ロジック
/// 1. 実行時環境変数 ENVIRONMENT を確認
/// 2. デバッグビルドの場合は Development
/// 3. リリースビルドの場合は Production
pub fn get_environment() -> Environment {
    if let Ok(env_var) = std::env::var("ENVIRONMENT") {
        let env = parse_environment(&env_var);
        log::debug!("環境判定: 実行時環境変数を使用 -> {env_var} -> {env:?}");
        return env;
    }

    let env = if cfg!(debug_assertions) {
        Environment::Development
    } else {
        Environment::Production
    };
    log::debug!(
        "環境判定: ビルド設定を使用 -> debug_assertions={} -> {env:?}",
        cfg!(debug_assertions)
    );
    env
}

fn parse_environment(value: &str) -> Environment {
    match value {
        "production" => Environment::Production,
        _ => Environment::Development,
    }
}

/// 環境に応じた.envファイルを読み込む
///
/// ファイルが見つからない場合は、直接設定された環境変数を使う前提で続行する。
pub fn load_environment_variables() {
    let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    let env_file = match environment.as_str() {
        "production" => ".env.production",
        _ => ".env",
    };

    log::info!("環境: {environment}, 読み込み対象: {env_file}");

    match dotenv::from_filename(env_file) {
        Ok(_) => {
            log::info!("{env_file}ファイルを読み込みました");
        }
        Err(_) => {
            if env_file != ".env" && dotenv::dotenv().is_ok() {
                log::warn!("{env_file}が見つからないため、デフォルトの.envファイルを読み込みました");
            } else {
                log::warn!("環境変数ファイルが見つかりません。直接設定された環境変数を使用します。");
            }
        }
    }
}

/// ログシステムを初期化する
///
/// 二重初期化（テストからの複数回呼び出しなど）は無視する。
pub fn initialize_logging_system(env_config: &EnvironmentConfig) {
    let result = env_logger::Builder::from_default_env()
        .filter_level(env_config.level_filter())
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .try_init();

    match result {
        Ok(()) => log::info!(
            "ログシステムを初期化しました: level={}, environment={}",
            env_config.log_level,
            env_config.environment
        ),
        Err(_) => log::debug!("ログシステムは既に初期化済みです"),
    }
}

/// 請求書APIサーバーの設定
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// APIサーバーのベースURL
    pub base_url: String,
    /// APIリクエストのタイムアウト（秒）
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_API_TIMEOUT_SECONDS,
        }
    }
}

impl ApiConfig {
    /// 環境変数からAPI設定を読み込む
    ///
    /// * `BILLED_API_BASE_URL` - ベースURL（省略時はローカル開発用URL）
    /// * `BILLED_API_TIMEOUT_SECONDS` - タイムアウト秒数
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("BILLED_API_BASE_URL").ok(),
            std::env::var("BILLED_API_TIMEOUT_SECONDS").ok(),
        )
    }

    /// 環境変数の生の値から設定を組み立てる
    pub fn from_values(base_url: Option<String>, timeout_seconds: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout_seconds = match timeout_seconds {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!(
                    "BILLED_API_TIMEOUT_SECONDSのパースに失敗しました。デフォルト値{DEFAULT_API_TIMEOUT_SECONDS}秒を使用します"
                );
                DEFAULT_API_TIMEOUT_SECONDS
            }),
            None => DEFAULT_API_TIMEOUT_SECONDS,
        };

        log::info!("API設定: base_url={base_url}, timeout={timeout_seconds}s");

        Self {
            base_url,
            timeout_seconds,
        }
    }

    /// 設定を検証する
    pub fn validate(&self) -> AppResult<()> {
        if self.base_url.is_empty() {
            return Err(AppError::configuration(
                "APIサーバーのベースURLが設定されていません",
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(AppError::configuration(format!(
                "APIサーバーのURLはhttp(s)形式である必要があります: {}",
                self.base_url
            )));
        }

        if self.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "APIタイムアウトは0より大きい値である必要があります",
            ));
        }

        Ok(())
    }

    /// APIサーバーがlocalhostかどうかを判定
    pub fn is_localhost(&self) -> bool {
        self.base_url.contains("localhost") || self.base_url.contains("127.0.0.1")
    }
}
