// インメモリのRecordStore / ReceiptStorage

use super::{ReceiptStorage, RecordStore};
use crate::features::bills::models::{Bill, BillDraft, BillId, BillStatus};
use crate::features::new_bill::receipt::ReceiptFile;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::{debug, info};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// プロセス内に請求書を保持するRecordStore
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    bills: Mutex<Vec<Bill>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存の請求書（フィクスチャなど）を持つストアを作成
    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            bills: Mutex::new(bills),
        }
    }

    /// サーバー側での承認・却下を再現する
    ///
    /// # 引数
    /// * `id` - 請求書ID
    /// * `status` - 新しいステータス
    pub fn set_status(&self, id: &BillId, status: BillStatus) -> AppResult<()> {
        let mut bills = self.lock()?;
        let bill = bills
            .iter_mut()
            .find(|bill| &bill.id == id)
            .ok_or_else(|| AppError::not_found(format!("請求書 {id}")))?;
        bill.status = status;
        info!("請求書ステータスを変更しました: id={id}, status={status:?}");
        Ok(())
    }

    /// 保持している件数
    pub fn len(&self) -> AppResult<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> AppResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Vec<Bill>>> {
        self.bills
            .lock()
            .map_err(|e| AppError::concurrency(format!("ストアのロック取得失敗: {e}")))
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn create(&self, draft: &BillDraft) -> AppResult<BillId> {
        let id = BillId::new(Uuid::new_v4().to_string());
        self.lock()?.push(Bill::from_draft(id.clone(), draft));
        debug!("インメモリストアに請求書を追加しました: id={id}");
        Ok(id)
    }

    async fn update(&self, id: &BillId, draft: &BillDraft) -> AppResult<()> {
        let mut bills = self.lock()?;
        let slot = bills
            .iter_mut()
            .find(|bill| &bill.id == id)
            .ok_or_else(|| AppError::not_found(format!("請求書 {id}")))?;
        *slot = Bill::from_draft(id.clone(), draft);
        debug!("インメモリストアの請求書を更新しました: id={id}");
        Ok(())
    }

    async fn get(&self) -> AppResult<Vec<Bill>> {
        Ok(self.lock()?.clone())
    }
}

/// アップロードされたファイル名を記録するだけのReceiptStorage
#[derive(Debug, Default)]
pub struct InMemoryReceiptStorage {
    uploads: Mutex<Vec<String>>,
}

impl InMemoryReceiptStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// これまでにアップロードされたファイル名
    pub fn uploaded(&self) -> AppResult<Vec<String>> {
        Ok(self
            .uploads
            .lock()
            .map_err(|e| AppError::concurrency(format!("ストアのロック取得失敗: {e}")))?
            .clone())
    }
}

#[async_trait]
impl ReceiptStorage for InMemoryReceiptStorage {
    async fn upload(&self, file: &ReceiptFile) -> AppResult<String> {
        self.uploads
            .lock()
            .map_err(|e| AppError::concurrency(format!("ストアのロック取得失敗: {e}")))?
            .push(file.name.clone());
        Ok(format!("memory://justificatifs/{}", file.name))
    }
}
