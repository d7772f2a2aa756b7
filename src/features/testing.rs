//! テスト用のコラボレーター
//!
//! 呼び出し順を共有ログに記録するRecordStore / ReceiptStorage / Navigatorと、
//! 請求書フィクスチャを提供します。

use crate::features::bills::models::{Bill, BillDraft, BillId, BillStatus};
use crate::features::new_bill::receipt::ReceiptFile;
use crate::features::store::{
    InMemoryReceiptStorage, InMemoryRecordStore, Navigator, ReceiptStorage, RecordStore, Screen,
};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// 呼び出しの記録
#[derive(Debug, Default)]
pub struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn push(&self, call: impl Into<String>) {
        self.0.lock().expect("ログのロック取得に失敗").push(call.into());
    }

    pub fn calls(&self) -> Vec<String> {
        self.0.lock().expect("ログのロック取得に失敗").clone()
    }

    pub fn count(&self, call: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == call).count()
    }
}

/// 呼び出しを記録し、任意で失敗させるRecordStore
pub struct RecordingStore {
    pub inner: InMemoryRecordStore,
    log: Arc<CallLog>,
    fail_with: Option<String>,
}

impl RecordingStore {
    pub fn new(log: Arc<CallLog>) -> Self {
        Self {
            inner: InMemoryRecordStore::new(),
            log,
            fail_with: None,
        }
    }

    pub fn with_bills(log: Arc<CallLog>, bills: Vec<Bill>) -> Self {
        Self {
            inner: InMemoryRecordStore::with_bills(bills),
            log,
            fail_with: None,
        }
    }

    /// すべての呼び出しを指定メッセージのストアエラーにする
    pub fn failing(log: Arc<CallLog>, message: &str) -> Self {
        Self {
            inner: InMemoryRecordStore::new(),
            log,
            fail_with: Some(message.to_string()),
        }
    }

    fn check(&self) -> AppResult<()> {
        match &self.fail_with {
            Some(message) => Err(AppError::store(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for RecordingStore {
    async fn create(&self, draft: &BillDraft) -> AppResult<BillId> {
        self.log.push("create");
        self.check()?;
        self.inner.create(draft).await
    }

    async fn update(&self, id: &BillId, draft: &BillDraft) -> AppResult<()> {
        self.log.push("update");
        self.check()?;
        self.inner.update(id, draft).await
    }

    async fn get(&self) -> AppResult<Vec<Bill>> {
        self.log.push("get");
        self.check()?;
        self.inner.get().await
    }
}

/// 呼び出しを記録するReceiptStorage
pub struct RecordingReceipts {
    pub inner: InMemoryReceiptStorage,
    log: Arc<CallLog>,
}

impl RecordingReceipts {
    pub fn new(log: Arc<CallLog>) -> Self {
        Self {
            inner: InMemoryReceiptStorage::new(),
            log,
        }
    }
}

#[async_trait]
impl ReceiptStorage for RecordingReceipts {
    async fn upload(&self, file: &ReceiptFile) -> AppResult<String> {
        self.log.push("upload");
        self.inner.upload(file).await
    }
}

/// 遷移を記録するNavigator
pub struct RecordingNavigator {
    log: Arc<CallLog>,
}

impl RecordingNavigator {
    pub fn new(log: Arc<CallLog>) -> Self {
        Self { log }
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, screen: Screen) {
        self.log.push(format!("go_to:{screen:?}"));
    }
}

fn bill(id: &str, date: &str, amount: i64, status: BillStatus) -> Bill {
    Bill {
        id: BillId::new(id),
        email: "a@a".to_string(),
        expense_type: "Hôtel et logement".to_string(),
        name: format!("note {id}"),
        amount,
        date: date.to_string(),
        vat: "80".to_string(),
        pct: 20,
        commentary: "séminaire billed".to_string(),
        file_url: Some(format!("https://files.example/justificatifs/{id}.jpg")),
        file_name: Some(format!("{id}.jpg")),
        status,
    }
}

/// 日付がばらばらに並んだ4件の請求書
pub fn fixture_bills() -> Vec<Bill> {
    vec![
        bill("47qAXb6fIm2zOKkLzMro", "2004-04-04", 400, BillStatus::Pending),
        bill("BeKy5Mo4jkmdfPGYpTxZ", "2001-01-01", 100, BillStatus::Refused),
        bill("UIUZtnPQvnbFnB0ozvJh", "2003-03-03", 300, BillStatus::Accepted),
        bill("qcCK3SzECmaZAGRrHjaC", "2002-02-02", 200, BillStatus::Refused),
    ]
}
