use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// 入力検証エラー（拡張子不正、必須項目の欠落・不正）
    #[error("ValidationError: {0}")]
    Validation(String),

    /// RecordStore / ReceiptStorage の失敗（"Erreur 404" など）
    #[error("StoreError: {0}")]
    Store(String),

    /// リソースが見つからない場合のエラー
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// 並行処理関連のエラー
    #[error("並行処理エラー: {0}")]
    Concurrency(String),
}

impl AppError {
    /// ユーザーに表示するためのメッセージを取得
    ///
    /// Validation / Store / NotFound はメッセージをそのまま返す。
    /// ストアのエラー（"Erreur 500" など）は画面に加工せず表示される。
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg,
            AppError::Store(msg) => msg,
            AppError::NotFound(msg) => msg,
            AppError::Configuration(_) => "設定エラーが発生しました",
            AppError::Concurrency(_) => "並行処理でエラーが発生しました",
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// バリデーションエラーかどうか
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// ストアエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 画面にそのまま表示されるメッセージ
    pub fn store<S: Into<String>>(message: S) -> Self {
        AppError::Store(message.into())
    }

    /// HTTPステータスからストアエラーを作成する
    ///
    /// # 引数
    /// * `status` - HTTPステータスコード
    ///
    /// # 戻り値
    /// `Store("Erreur <status>")`
    pub fn from_status(status: u16) -> Self {
        AppError::Store(format!("Erreur {status}"))
    }

    /// リソース未発見エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `resource` - 見つからなかったリソース名
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        AppError::NotFound(format!("{}が見つかりません", resource.into()))
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// 並行処理エラーを作成するヘルパー関数
    pub fn concurrency<S: Into<String>>(message: S) -> Self {
        AppError::Concurrency(message.into())
    }
}

/// AppErrorからStringへの変換（UI層での表示用）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message().to_string()
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let validation_error = AppError::validation("missing or invalid receipt");
        assert_eq!(validation_error.user_message(), "missing or invalid receipt");

        let not_found_error = AppError::not_found("請求書");
        assert_eq!(not_found_error.user_message(), "請求書が見つかりません");

        let config_error = AppError::configuration("タイムアウトが0です");
        assert_eq!(config_error.user_message(), "設定エラーが発生しました");
    }

    #[test]
    fn test_store_message_is_verbatim() {
        assert_eq!(AppError::from_status(404).user_message(), "Erreur 404");
        assert_eq!(AppError::from_status(500).user_message(), "Erreur 500");
        assert!(AppError::from_status(404).details().contains("Erreur 404"));
    }

    #[test]
    fn test_string_conversion() {
        let error = AppError::validation("invalid date");
        let error_string: String = error.into();
        assert_eq!(error_string, "invalid date");
    }

    #[test]
    fn test_is_validation() {
        assert!(AppError::validation("invalid pct").is_validation());
        assert!(!AppError::store("Erreur 500").is_validation());
    }
}
