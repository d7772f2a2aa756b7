// 新規請求書フォームの入力と検証

use crate::features::bills::models::DEFAULT_PCT;
use crate::shared::errors::{AppError, AppResult};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("日付パターンが不正です"));

/// フォームに入力された生の値
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// 検証済みのフォーム値
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFields {
    pub expense_type: String,
    pub name: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub vat: String,
    pub pct: u32,
    pub commentary: String,
}

impl NewBillForm {
    /// フォーム値を検証する
    ///
    /// 任意項目（種別、名称、TVA、コメント）は空のままでよい。
    /// pct は未入力なら20。
    pub fn validate(&self) -> AppResult<ValidatedFields> {
        Ok(ValidatedFields {
            expense_type: self.expense_type.trim().to_string(),
            name: self.name.trim().to_string(),
            amount: parse_amount(&self.amount)?,
            date: parse_date(&self.date)?,
            vat: self.vat.trim().to_string(),
            pct: parse_pct(&self.pct)?,
            commentary: self.commentary.trim().to_string(),
        })
    }
}

/// 金額（整数、0以上、必須）
pub fn parse_amount(raw: &str) -> AppResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(amount) if amount >= 0 => Ok(amount),
        _ => Err(AppError::validation("invalid amount")),
    }
}

/// 日付（YYYY-MM-DD、実在する日付、必須）
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    if !ISO_DATE.is_match(raw) {
        return Err(AppError::validation("invalid date"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| AppError::validation("invalid date"))
}

/// パーセンテージ（0〜100、未入力なら既定値）
pub fn parse_pct(raw: &str) -> AppResult<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(DEFAULT_PCT);
    }
    match raw.parse::<u32>() {
        Ok(pct) if pct <= 100 => Ok(pct),
        _ => Err(AppError::validation("invalid pct")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> NewBillForm {
        NewBillForm {
            expense_type: "Transports".to_string(),
            name: " Vol Paris Londres ".to_string(),
            amount: "348".to_string(),
            date: "2022-04-01".to_string(),
            vat: "70".to_string(),
            pct: "".to_string(),
            commentary: "".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let fields = form().validate().expect("検証に失敗");
        assert_eq!(fields.name, "Vol Paris Londres");
        assert_eq!(fields.amount, 348);
        assert_eq!(fields.date, NaiveDate::from_ymd_opt(2022, 4, 1).expect("日付"));
        assert_eq!(fields.pct, DEFAULT_PCT);
        assert!(fields.commentary.is_empty());
    }

    #[test]
    fn test_optional_fields_do_not_block() {
        let fields = NewBillForm {
            amount: "0".to_string(),
            date: "2001-01-01".to_string(),
            ..NewBillForm::default()
        }
        .validate()
        .expect("任意項目が空でも通るはず");
        assert!(fields.expense_type.is_empty());
        assert!(fields.vat.is_empty());
        assert_eq!(fields.amount, 0);
    }

    #[test]
    fn test_invalid_amount() {
        for raw in ["", "abc", "12.5", "-3"] {
            let error = parse_amount(raw).expect_err("不正な金額");
            assert_eq!(error.user_message(), "invalid amount", "入力: {raw:?}");
        }
        assert_eq!(parse_amount(" 120 ").expect("金額"), 120);
    }

    #[test]
    fn test_invalid_date() {
        for raw in ["", "2004-02-30", "04/04/2004", "2004-4-4", "demain"] {
            let error = parse_date(raw).expect_err("不正な日付");
            assert_eq!(error.user_message(), "invalid date", "入力: {raw:?}");
        }
    }

    #[test]
    fn test_pct() {
        assert_eq!(parse_pct("").expect("pct"), 20);
        assert_eq!(parse_pct("10").expect("pct"), 10);
        assert_eq!(
            parse_pct("vingt").expect_err("不正").user_message(),
            "invalid pct"
        );
        assert!(parse_pct("101").is_err());
    }
}
