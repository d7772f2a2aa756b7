//! ログイン中のユーザー情報
//!
//! グローバルなストレージから読むのではなく、画面の構築時に明示的に渡す。

use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// ユーザー種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

/// セッション
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub email: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
}

impl Session {
    /// 従業員セッションを作成
    pub fn employee<S: Into<String>>(email: S) -> Self {
        Self {
            email: email.into(),
            user_type: UserType::Employee,
        }
    }

    pub fn is_employee(&self) -> bool {
        self.user_type == UserType::Employee
    }

    /// 従業員でなければバリデーションエラー
    pub fn require_employee(&self) -> AppResult<()> {
        if self.is_employee() {
            Ok(())
        } else {
            Err(AppError::validation("employee session required"))
        }
    }
}
