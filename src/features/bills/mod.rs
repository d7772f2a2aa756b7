//! 請求書一覧機能モジュール
//!
//! このモジュールは請求書一覧に関連する機能を提供します：
//! - 請求書のデータモデル
//! - 日付の新しい順への並べ替えとステータス表示（射影）
//! - 一覧画面の読み込み・エラー表示・遷移

pub mod models;
pub mod projection;
pub mod screen;

// モデル
pub use models::{Bill, BillDraft, BillId, BillStatus, DEFAULT_PCT};

// 射影
pub use projection::{project, Badge, DisplayRow};

// 画面
pub use screen::{render, BillsScreen, BillsView, ListRow};
