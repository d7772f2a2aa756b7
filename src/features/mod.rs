//! 機能別モジュール
//!
//! 各機能モジュールは、その機能に関連するモデル・検証・画面ロジックを含む
//! 自己完結型のユニットです。永続化と画面遷移は `store` のトレイト越しに扱います。

pub mod bills;
pub mod new_bill;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
