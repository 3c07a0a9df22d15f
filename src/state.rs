use axum::extract::FromRef;

use crate::db::{DbPool, OrmConn};
use crate::middleware::auth::JwtKeys;
use crate::qris::QrisClient;

/// Shared handles injected into every handler. Signing keys and the QRIS
/// client are constructed once at startup; nothing below this struct reads
/// the environment.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub jwt: JwtKeys,
    pub qris: QrisClient,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> JwtKeys {
        state.jwt.clone()
    }
}
