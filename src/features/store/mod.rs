//! 外部コラボレーター（RecordStore / ReceiptStorage / Navigator）
//!
//! 請求書の永続化と画面遷移はアプリケーションの外側にあり、
//! ここではインターフェースと、インメモリ・HTTPの実装を提供します。

use crate::features::bills::models::{Bill, BillDraft, BillId};
use crate::features::new_bill::receipt::ReceiptFile;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

pub mod http;
pub mod memory;

pub use http::{HttpReceiptStorage, HttpRecordStore};
pub use memory::{InMemoryReceiptStorage, InMemoryRecordStore};

/// 請求書の永続化先
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 請求書を作成し、払い出されたIDを返す
    async fn create(&self, draft: &BillDraft) -> AppResult<BillId>;

    /// 既存の請求書を上書きする
    async fn update(&self, id: &BillId, draft: &BillDraft) -> AppResult<()>;

    /// 請求書一覧を取得する
    async fn get(&self) -> AppResult<Vec<Bill>>;
}

/// 領収書ファイルのアップロード先
#[async_trait]
pub trait ReceiptStorage: Send + Sync {
    /// ファイルをアップロードし、リモートURL（fileUrl）を返す
    async fn upload(&self, file: &ReceiptFile) -> AppResult<String>;
}

/// 遷移先の画面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// 請求書一覧
    Bills,
    /// 新規請求書フォーム
    NewBill,
}

/// 画面遷移
pub trait Navigator: Send + Sync {
    fn go_to(&self, screen: Screen);
}
