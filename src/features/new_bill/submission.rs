// 新規請求書の送信フロー

use super::form::NewBillForm;
use super::receipt::{validate_file_format, ReceiptFile};
use crate::features::bills::models::{BillDraft, BillId, BillStatus};
use crate::features::session::Session;
use crate::features::store::{Navigator, ReceiptStorage, RecordStore, Screen};
use crate::shared::errors::{AppError, AppResult};
use log::{error, info, warn};
use std::sync::Arc;

/// 作成か既存請求書の編集か（呼び出し元が明示する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionMode {
    Create,
    Edit(BillId),
}

/// ファイル選択の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    Accepted,
    /// 送信ボタンを無効にすべき状態
    Rejected { reason: String },
}

/// 送信に成功した請求書
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub id: BillId,
    pub bill: BillDraft,
}

/// 新規請求書フォームの状態と送信処理
///
/// 下書き（選択済みの領収書）は1回の送信の間だけこの構造体が所有する。
pub struct BillSubmission {
    session: Session,
    mode: SubmissionMode,
    store: Arc<dyn RecordStore>,
    receipts: Arc<dyn ReceiptStorage>,
    navigator: Arc<dyn Navigator>,
    receipt: Option<ReceiptFile>,
    last_error: Option<String>,
}

impl BillSubmission {
    pub fn new(
        session: Session,
        mode: SubmissionMode,
        store: Arc<dyn RecordStore>,
        receipts: Arc<dyn ReceiptStorage>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            mode,
            store,
            receipts,
            navigator,
            receipt: None,
            last_error: None,
        }
    }

    /// 領収書ファイルが選択されたとき
    ///
    /// 拡張子が jpg / jpeg / png 以外なら保持中のファイルを破棄し、
    /// 送信できない状態にする。ストアは呼ばない。
    pub fn on_file_selected(&mut self, file: ReceiptFile) -> FileSelection {
        match validate_file_format(&file.name) {
            Ok(()) => {
                info!(
                    "領収書を受け付けました: file_name={}, mime_type={}, size={} bytes",
                    file.name,
                    file.mime_type,
                    file.content.len()
                );
                self.receipt = Some(file);
                self.last_error = None;
                FileSelection::Accepted
            }
            Err(e) => {
                warn!("領収書を拒否しました: file_name={}, error={e}", file.name);
                self.receipt = None;
                let reason = e.user_message().to_string();
                self.last_error = Some(reason.clone());
                FileSelection::Rejected { reason }
            }
        }
    }

    /// 送信ボタンを有効にできるか
    pub fn can_submit(&self) -> bool {
        self.receipt.is_some()
    }

    /// 選択中の領収書ファイル名
    pub fn selected_file_name(&self) -> Option<&str> {
        self.receipt.as_ref().map(|file| file.name.as_str())
    }

    /// 画面に表示すべき直近のエラー
    pub fn error_message(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// フォームが送信されたとき
    ///
    /// 成功時は RecordStore への保存を1回行い、その後に一覧画面へ遷移する。
    /// 失敗時はエラーを返して遷移しない。自動リトライはしない。
    pub async fn on_submit(&mut self, form: &NewBillForm) -> AppResult<SubmitOutcome> {
        match self.submit(form).await {
            Ok(outcome) => {
                self.receipt = None;
                self.last_error = None;
                self.navigator.go_to(Screen::Bills);
                Ok(outcome)
            }
            Err(e) => {
                if e.is_validation() {
                    warn!("請求書の送信を中止しました: {e}");
                } else {
                    error!("請求書の保存に失敗しました: {}", e.details());
                }
                self.last_error = Some(e.user_message().to_string());
                Err(e)
            }
        }
    }

    async fn submit(&self, form: &NewBillForm) -> AppResult<SubmitOutcome> {
        let receipt = self
            .receipt
            .as_ref()
            .ok_or_else(|| AppError::validation("missing or invalid receipt"))?;
        let fields = form.validate()?;
        self.session.require_employee()?;

        let file_url = self.receipts.upload(receipt).await?;

        let draft = BillDraft {
            email: self.session.email.clone(),
            expense_type: fields.expense_type,
            name: fields.name,
            amount: fields.amount,
            date: fields.date,
            vat: fields.vat,
            pct: fields.pct,
            commentary: fields.commentary,
            file_url,
            file_name: receipt.name.clone(),
            status: BillStatus::Pending,
        };

        let id = match &self.mode {
            SubmissionMode::Create => {
                let id = self.store.create(&draft).await?;
                info!("請求書を作成しました: id={id}, amount={}", draft.amount);
                id
            }
            SubmissionMode::Edit(id) => {
                self.store.update(id, &draft).await?;
                info!("請求書を更新しました: id={id}, amount={}", draft.amount);
                id.clone()
            }
        };

        Ok(SubmitOutcome { id, bill: draft })
    }
}
