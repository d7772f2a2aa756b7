//! 新規請求書機能モジュール
//!
//! - 領収書ファイルの検証（拡張子のみ）
//! - フォーム値の検証
//! - RecordStore への作成・更新と、成功後の画面遷移

pub mod form;
pub mod receipt;
pub mod submission;

pub use form::{NewBillForm, ValidatedFields};
pub use receipt::{content_type_for, validate_file_format, ReceiptFile, ALLOWED_EXTENSIONS};
pub use submission::{BillSubmission, FileSelection, SubmissionMode, SubmitOutcome};
