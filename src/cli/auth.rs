use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{info, management::TokenManager, spotify, types::PkceToken};

/// Runs the browser authorization flow, then reports what was granted.
///
/// A cached token that is still valid is mentioned but replaced anyway, so
/// `auth` doubles as a way to pick up a changed scope.
pub async fn auth() {
    if let Ok(cached) = TokenManager::load().await {
        if !cached.is_expired() {
            info!("A valid token is already cached, authorizing again.");
        }
    }

    let pending: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
    spotify::auth::auth(pending).await;

    if let Ok(saved) = TokenManager::load().await {
        let scope = &saved.current_token().scope;
        if !scope.is_empty() {
            info!("Granted scope: {}", scope);
        }
    }
}
