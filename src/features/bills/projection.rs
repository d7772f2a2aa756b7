// 請求書一覧の表示用射影

use super::models::{Bill, BillId, BillStatus};
use crate::features::new_bill::form::parse_date;
use chrono::NaiveDate;
use log::warn;

/// ステータスバッジの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Neutral,
    Positive,
    Negative,
}

/// 一覧の1行分
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    pub id: BillId,
    pub bill_type: String,
    pub name: String,
    pub date: String,           // 元の値（YYYY-MM-DD、破損時はそのまま）
    pub formatted_date: String, // DD/MM/YYYY
    pub formatted_amount: String,
    pub status_label: &'static str,
    pub badge: Badge,
    pub file_url: Option<String>,
}

pub fn status_label(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Accepté",
        BillStatus::Refused => "Refusé",
    }
}

pub fn badge_for(status: BillStatus) -> Badge {
    match status {
        BillStatus::Pending => Badge::Neutral,
        BillStatus::Accepted => Badge::Positive,
        BillStatus::Refused => Badge::Negative,
    }
}

/// 日付を表示用（DD/MM/YYYY）に整形する
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_amount(amount: i64) -> String {
    format!("{amount} €")
}

/// 請求書一覧を表示順の行に変換する
///
/// 日付の新しい順に並べ、同じ日付は元の順序を保つ。
/// 日付として解釈できない請求書は生の値のまま末尾に回す。
/// 入力は変更しない。
pub fn project(bills: &[Bill]) -> Vec<DisplayRow> {
    let mut keyed: Vec<(Option<NaiveDate>, DisplayRow)> = bills
        .iter()
        .map(|bill| {
            let parsed = parse_date(&bill.date).ok();
            if parsed.is_none() {
                warn!(
                    "請求書の日付が不正なため元の値で表示します: id={}, date={}",
                    bill.id, bill.date
                );
            }
            (parsed, to_row(bill, parsed))
        })
        .collect();

    // sort_by は安定ソート。None は Some より小さいので末尾に来る
    keyed.sort_by(|(a, _), (b, _)| b.cmp(a));
    keyed.into_iter().map(|(_, row)| row).collect()
}

fn to_row(bill: &Bill, parsed: Option<NaiveDate>) -> DisplayRow {
    DisplayRow {
        id: bill.id.clone(),
        bill_type: bill.expense_type.clone(),
        name: bill.name.clone(),
        date: bill.date.clone(),
        formatted_date: parsed.map(format_date).unwrap_or_else(|| bill.date.clone()),
        formatted_amount: format_amount(bill.amount),
        status_label: status_label(bill.status),
        badge: badge_for(bill.status),
        file_url: bill.file_url.clone(),
    }
}
