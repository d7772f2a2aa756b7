//! 経費精算アプリ「Billed」のコアライブラリ
//!
//! 従業員が請求書（ノート・ド・フレ）を送信し、送信済みの一覧を確認するための
//! 検証・送信・一覧表示のロジックを提供します。UI層は `BillSubmission` と
//! `BillsScreen` のコマンドを呼び出すだけで、DOMやイベントループには依存しません。

pub mod features;
pub mod shared;

pub use features::bills::{
    project, Bill, BillDraft, BillId, BillStatus, BillsScreen, BillsView, DisplayRow,
};
pub use features::new_bill::{
    BillSubmission, FileSelection, NewBillForm, ReceiptFile, SubmissionMode,
};
pub use features::session::{Session, UserType};
pub use features::store::{Navigator, ReceiptStorage, RecordStore, Screen};
pub use shared::errors::{AppError, AppResult};

use log::info;
use crate::shared::config::{initialize_logging_system, load_environment_variables, EnvironmentConfig};

/// .envファイルの読み込みとログシステムの初期化を行う
///
/// # 戻り値
/// 読み込んだ環境設定
pub fn initialize() -> EnvironmentConfig {
    load_environment_variables();
    let env_config = EnvironmentConfig::from_env();
    initialize_logging_system(&env_config);
    info!(
        "アプリケーション初期化が完了しました: environment={}",
        env_config.environment
    );
    env_config
}
