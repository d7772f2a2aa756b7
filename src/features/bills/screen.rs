// 請求書一覧画面

use super::projection::{project, DisplayRow};
use crate::features::session::Session;
use crate::features::store::{Navigator, RecordStore, Screen};
use crate::shared::errors::{AppError, AppResult};
use log::{error, info};
use std::fmt;
use std::sync::Arc;

pub const LOADING_TEXT: &str = "Loading...";
pub const ERROR_TITLE: &str = "Erreur";

/// 一覧画面の状態
#[derive(Debug, Clone, PartialEq)]
pub enum BillsView {
    Loading,
    /// 呼び出し元が渡したメッセージをそのまま表示する
    Error(String),
    Loaded(Vec<DisplayRow>),
}

/// 描画される1行
#[derive(Debug, Clone, PartialEq)]
pub enum ListRow {
    Bill(DisplayRow),
    Placeholder(String),
    Error { title: String, message: String },
}

impl fmt::Display for ListRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListRow::Bill(row) => write!(
                f,
                "{} | {} | {} | {} | {}",
                row.bill_type, row.name, row.formatted_date, row.formatted_amount, row.status_label
            ),
            ListRow::Placeholder(text) => f.write_str(text),
            ListRow::Error { title, message } => write!(f, "{title}\n{message}"),
        }
    }
}

/// 画面状態を行に変換する
pub fn render(view: &BillsView) -> Vec<ListRow> {
    match view {
        BillsView::Loading => vec![ListRow::Placeholder(LOADING_TEXT.to_string())],
        BillsView::Error(message) => vec![ListRow::Error {
            title: ERROR_TITLE.to_string(),
            message: message.clone(),
        }],
        BillsView::Loaded(rows) => rows.iter().cloned().map(ListRow::Bill).collect(),
    }
}

/// 請求書一覧画面のコントローラー
pub struct BillsScreen {
    session: Session,
    store: Arc<dyn RecordStore>,
    navigator: Arc<dyn Navigator>,
}

impl BillsScreen {
    pub fn new(
        session: Session,
        store: Arc<dyn RecordStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            store,
            navigator,
        }
    }

    /// ストアから請求書を1回取得して画面状態を返す
    ///
    /// 取得エラーは再試行せず、メッセージをそのまま Error 状態にする。
    pub async fn load(&self) -> BillsView {
        match self.store.get().await {
            Ok(bills) => {
                info!(
                    "請求書一覧を読み込みました: user={}, count={}",
                    self.session.email,
                    bills.len()
                );
                BillsView::Loaded(project(&bills))
            }
            Err(e) => {
                error!("請求書一覧の取得に失敗しました: {}", e.details());
                BillsView::Error(e.user_message().to_string())
            }
        }
    }

    /// 「新しいノート」ボタン
    pub fn on_new_bill_clicked(&self) {
        self.navigator.go_to(Screen::NewBill);
    }

    /// 目のアイコン：領収書のURLを返す
    pub fn receipt_preview<'a>(&self, row: &'a DisplayRow) -> AppResult<&'a str> {
        row.file_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::not_found(format!("請求書 {} の領収書", row.id)))
    }
}
