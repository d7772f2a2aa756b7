use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// 未入力時の既定のパーセンテージ
pub const DEFAULT_PCT: u32 = 20;

/// RecordStoreが払い出す請求書ID（不透明な文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillId(pub String);

impl BillId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 請求書のステータス（サーバー側で accepted / refused に変更される）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    #[default]
    Pending,
    Accepted,
    Refused,
}

/// ストアから読み戻した請求書
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "type", default)]
    pub expense_type: String,
    #[serde(default)]
    pub name: String,
    pub amount: i64,
    pub date: String, // YYYY-MM-DD（破損データの可能性があるため文字列のまま保持）
    #[serde(default, deserialize_with = "string_or_number")]
    pub vat: String,
    #[serde(default = "default_pct")]
    pub pct: u32,
    #[serde(default)]
    pub commentary: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub status: BillStatus,
}

/// 作成・更新時にストアへ送る請求書ドラフト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: String,
    pub name: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
    pub file_url: String,
    pub file_name: String,
    pub status: BillStatus,
}

impl Bill {
    /// ドラフトにIDを付与して請求書にする
    pub fn from_draft(id: BillId, draft: &BillDraft) -> Self {
        Self {
            id,
            email: draft.email.clone(),
            expense_type: draft.expense_type.clone(),
            name: draft.name.clone(),
            amount: draft.amount,
            date: draft.date.format("%Y-%m-%d").to_string(),
            vat: draft.vat.clone(),
            pct: draft.pct,
            commentary: draft.commentary.clone(),
            file_url: Some(draft.file_url.clone()),
            file_name: Some(draft.file_name.clone()),
            status: draft.status,
        }
    }
}

fn default_pct() -> u32 {
    DEFAULT_PCT
}

/// TVAは文字列・数値のどちらで保存されていても文字列として読む
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Option::<RawValue>::deserialize(deserializer)? {
        Some(RawValue::Text(text)) => text,
        Some(RawValue::Number(number)) => number.to_string(),
        None => String::new(),
    })
}
