//! 請求書APIクライアント
//!
//! バックエンドとのHTTP通信を行う。失敗したリクエストは再送せず、
//! 呼び出し元へ一度だけエラーを返す。

use crate::shared::config::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 環境変数の設定からAPIクライアントを作成
    pub fn from_env() -> AppResult<Self> {
        Self::new(ApiConfig::from_env())
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        config.validate()?;

        let mut builder = Client::builder().timeout(Duration::from_secs(config.timeout_seconds));
        // ローカルのAPIサーバーにはシステムプロキシを経由しない
        if config.is_localhost() {
            debug!("ローカルAPIサーバーを使用します: {}", config.base_url);
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// エンドポイントの完全なURLを組み立てる
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url)
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");
        let request = self.client.get(self.url(endpoint));
        let response = self.send(request, "GET", endpoint).await?;
        Self::parse_json(response).await
    }

    /// POSTリクエストを送信
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("POSTリクエスト送信: endpoint={endpoint}");
        let request = self.client.post(self.url(endpoint)).json(body);
        let response = self.send(request, "POST", endpoint).await?;
        Self::parse_json(response).await
    }

    /// PATCHリクエストを送信（レスポンスボディは読まない）
    pub async fn patch<B>(&self, endpoint: &str, body: &B) -> AppResult<()>
    where
        B: Serialize,
    {
        info!("PATCHリクエスト送信: endpoint={endpoint}");
        let request = self.client.patch(self.url(endpoint)).json(body);
        self.send(request, "PATCH", endpoint).await?;
        Ok(())
    }

    /// multipartフォームをPOSTする
    pub async fn post_multipart<T>(
        &self,
        endpoint: &str,
        form: reqwest::multipart::Form,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        info!("multipart POSTリクエスト送信: endpoint={endpoint}");
        let request = self.client.post(self.url(endpoint)).multipart(form);
        let response = self.send(request, "POST", endpoint).await?;
        Self::parse_json(response).await
    }

    async fn send(
        &self,
        request: RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("{method}リクエスト失敗: endpoint={endpoint}, error={e}");
            AppError::store(format!("Erreur réseau: {e}"))
        })?;

        let status = response.status();
        if status.is_success() {
            info!("{method}リクエスト成功: endpoint={endpoint}");
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());
        warn!(
            "APIサーバーからエラーレスポンス: method={method}, endpoint={endpoint}, status={}, body={body}",
            status.as_u16()
        );
        Err(AppError::from_status(status.as_u16()))
    }

    async fn parse_json<T>(response: Response) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let text = response
            .text()
            .await
            .map_err(|e| AppError::store(format!("Erreur réseau: {e}")))?;
        debug!("レスポンス受信: {} bytes", text.len());
        serde_json::from_str(&text).map_err(|e| {
            warn!("レスポンスの解析に失敗しました: error={e}");
            AppError::store(format!("Erreur de format: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// 1回だけ固定のレスポンスを返すローカルサーバーを起動し、ベースURLを返す
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ポートの確保に失敗");
        let addr = listener.local_addr().expect("アドレス取得に失敗");

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{addr}")
    }

    fn local_client(base_url: String) -> ApiClient {
        ApiClient::new(ApiConfig::from_values(Some(base_url), Some("5".to_string())))
            .expect("クライアント作成に失敗")
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::new(ApiConfig::from_values(
            Some("https://api.billed.example/".to_string()),
            None,
        ))
        .expect("クライアント作成に失敗");
        assert_eq!(client.url("/bills"), "https://api.billed.example/bills");
        assert_eq!(
            client.url("/bills/abc"),
            "https://api.billed.example/bills/abc"
        );
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ApiConfig {
            base_url: String::new(),
            timeout_seconds: 30,
        };
        assert!(matches!(
            ApiClient::new(config),
            Err(AppError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_store_error() {
        // ポート1は通常リッスンされていない
        let client = ApiClient::new(ApiConfig::from_values(
            Some("http://127.0.0.1:1".to_string()),
            Some("2".to_string()),
        ))
        .expect("クライアント作成に失敗");

        let result: AppResult<serde_json::Value> = client.get("/bills").await;
        let error = result.expect_err("接続は失敗するはず");
        assert!(matches!(error, AppError::Store(_)));
        assert!(error.user_message().starts_with("Erreur réseau"));
    }

    #[tokio::test]
    async fn test_error_status_becomes_store_error() {
        let client = local_client(serve_once("404 Not Found", r#"{"message":"absent"}"#).await);

        let result: AppResult<serde_json::Value> = client.get("/bills").await;
        let error = result.expect_err("404は失敗するはず");
        assert!(matches!(error, AppError::Store(_)));
        assert_eq!(error.user_message(), "Erreur 404");

        let client = local_client(serve_once("500 Internal Server Error", "{}").await);
        let error = client
            .patch("/bills/abc", &serde_json::json!({ "amount": 1 }))
            .await
            .expect_err("500は失敗するはず");
        assert_eq!(error.user_message(), "Erreur 500");
    }

    #[tokio::test]
    async fn test_malformed_body_is_store_error() {
        let client = local_client(serve_once("200 OK", "pas du json").await);

        let result: AppResult<Vec<serde_json::Value>> = client.get("/bills").await;
        let error = result.expect_err("解析は失敗するはず");
        assert!(matches!(error, AppError::Store(_)));
        assert!(error.user_message().starts_with("Erreur de format"));
    }

    #[tokio::test]
    async fn test_successful_get_is_parsed() {
        let client = local_client(serve_once("200 OK", r#"[{"id":"a"}]"#).await);

        let bills: Vec<serde_json::Value> = client.get("/bills").await.expect("取得に失敗");
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0]["id"], "a");
    }
}
