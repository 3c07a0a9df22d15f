use std::time::Duration;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// What the third-party generator answers with. `converted_qris` is the
/// payload the frontend renders as a QR code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QrisPayload {
    pub status: String,
    pub nominal: Option<String>,
    pub link_qris: Option<String>,
    pub converted_qris: Option<String>,
}

/// Thin client for the external QRIS generator. It re-encodes the store's
/// static QRIS payload with a transaction amount embedded.
#[derive(Clone)]
pub struct QrisClient {
    http: reqwest::Client,
    api_url: String,
    payload: String,
}

impl QrisClient {
    pub fn new(api_url: String, payload: String) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()?;
        Ok(Self {
            http,
            api_url,
            payload,
        })
    }

    /// Ask the generator for a dynamic QR worth `nominal` rupiah.
    pub async fn generate(&self, nominal: i64) -> AppResult<QrisPayload> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[
                ("qris_data", self.payload.as_str()),
                ("nominal", &nominal.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let payload = response.json::<QrisPayload>().await?;
        if payload.status != "success" {
            tracing::warn!(status = %payload.status, "qris generator rejected request");
            return Err(AppError::ExternalApi(
                "Failed to generate QRIS code".into(),
            ));
        }

        Ok(payload)
    }
}
