// 領収書ファイルの検証

use crate::shared::errors::{AppError, AppResult};

/// 受け付ける拡張子（小文字）
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// ファイル入力から受け取った領収書
///
/// `mime_type` は参考情報で、判定には使わない。
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptFile {
    pub name: String,
    pub mime_type: String,
    pub content: Vec<u8>,
}

impl ReceiptFile {
    pub fn new<N: Into<String>, M: Into<String>>(name: N, mime_type: M, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }
}

/// ファイル名の拡張子（小文字）を取得
pub fn extension_of(file_name: &str) -> Option<String> {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

/// ファイル形式を検証（ファイル名のみで判定し、内容は見ない）
///
/// # 引数
/// * `file_name` - 元のファイル名
///
/// # 戻り値
/// jpg / jpeg / png の場合はOk(())、それ以外はバリデーションエラー
pub fn validate_file_format(file_name: &str) -> AppResult<()> {
    let extension = extension_of(file_name)
        .ok_or_else(|| AppError::validation("unsupported file type: missing extension"))?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::validation(format!(
            "unsupported file type: .{extension} (jpg, jpeg, png only)"
        )));
    }

    Ok(())
}

/// Content-Typeを推定
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
