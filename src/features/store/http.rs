// 請求書APIサーバーに対するRecordStore / ReceiptStorage

use super::{ReceiptStorage, RecordStore};
use crate::features::bills::models::{Bill, BillDraft, BillId};
use crate::features::new_bill::receipt::{content_type_for, ReceiptFile};
use crate::shared::api_client::ApiClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use log::info;
use serde::Deserialize;

const BILLS_ENDPOINT: &str = "/bills";
const RECEIPTS_ENDPOINT: &str = "/bills/receipts";

/// `POST /bills` のレスポンス
#[derive(Debug, Deserialize)]
struct CreatedResponse {
    id: BillId,
}

/// `POST /bills/receipts` のレスポンス
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_url: String,
}

/// HTTP経由のRecordStore
#[derive(Debug, Clone)]
pub struct HttpRecordStore {
    client: ApiClient,
}

impl HttpRecordStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn bill_endpoint(id: &BillId) -> String {
    format!("{BILLS_ENDPOINT}/{}", id.as_str())
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn create(&self, draft: &BillDraft) -> AppResult<BillId> {
        let created: CreatedResponse = self.client.post(BILLS_ENDPOINT, draft).await?;
        info!("請求書を作成しました: id={}", created.id);
        Ok(created.id)
    }

    async fn update(&self, id: &BillId, draft: &BillDraft) -> AppResult<()> {
        self.client.patch(&bill_endpoint(id), draft).await?;
        info!("請求書を更新しました: id={id}");
        Ok(())
    }

    async fn get(&self) -> AppResult<Vec<Bill>> {
        let bills: Vec<Bill> = self.client.get(BILLS_ENDPOINT).await?;
        info!("請求書一覧を取得しました: {}件", bills.len());
        Ok(bills)
    }
}

/// HTTP経由のReceiptStorage（multipartアップロード）
#[derive(Debug, Clone)]
pub struct HttpReceiptStorage {
    client: ApiClient,
}

impl HttpReceiptStorage {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReceiptStorage for HttpReceiptStorage {
    async fn upload(&self, file: &ReceiptFile) -> AppResult<String> {
        let part = reqwest::multipart::Part::bytes(file.content.clone())
            .file_name(file.name.clone())
            .mime_str(content_type_for(&file.name))
            .map_err(|e| AppError::validation(format!("invalid content type: {e}")))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let uploaded: UploadResponse = self.client.post_multipart(RECEIPTS_ENDPOINT, form).await?;
        info!(
            "領収書をアップロードしました: file_name={}, url={}",
            file.name, uploaded.file_url
        );
        Ok(uploaded.file_url)
    }
}
