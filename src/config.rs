use std::env;

/// QRIS payload issued to the store by its acquirer. Every generated QR
/// re-encodes this payload with the transaction amount embedded.
const DEFAULT_QRIS_PAYLOAD: &str = "00020101021126670016COM.NOBUBANK.WWW01189360050300000879140214149391352933240303UMI51440014ID.CO.QRIS.WWW0215ID20232970101730303UMI5204541153033605802ID5922KCING STORE OK14535356006SERANG61054211162070703A016304DCD2";

const DEFAULT_QRIS_API_URL: &str = "https://cekid-ariepulsa.my.id/api/";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub qris_api_url: String,
    pub qris_payload: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(5000);
        let qris_api_url =
            env::var("QRIS_API_URL").unwrap_or_else(|_| DEFAULT_QRIS_API_URL.to_string());
        let qris_payload =
            env::var("QRIS_PAYLOAD").unwrap_or_else(|_| DEFAULT_QRIS_PAYLOAD.to_string());
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            qris_api_url,
            qris_payload,
        })
    }
}
