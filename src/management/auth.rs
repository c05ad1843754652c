use std::{io, path::PathBuf};

use chrono::Utc;
use thiserror::Error;

use crate::{config, spotify, types::Token, warning};

/// Seconds before the real expiry at which a token is already refreshed.
const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Error)]
pub enum TokenCacheError {
    #[error("cannot access token cache {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("token cache is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// Owns the cached user token and keeps it fresh.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    /// Reads `<data dir>/cache/token.json`.
    pub async fn load() -> Result<Self, TokenCacheError> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|source| TokenCacheError::Io { path, source })?;
        Ok(Self {
            token: serde_json::from_str(&content)?,
        })
    }

    pub async fn persist(&self) -> Result<(), TokenCacheError> {
        let path = Self::token_path();
        let json = serde_json::to_string_pretty(&self.token)?;

        if let Some(dir) = path.parent() {
            if let Err(source) = async_fs::create_dir_all(dir).await {
                return Err(TokenCacheError::Io {
                    path: dir.to_path_buf(),
                    source,
                });
            }
        }
        async_fs::write(&path, json)
            .await
            .map_err(|source| TokenCacheError::Io { path, source })
    }

    /// Returns an access token, refreshing it first when it is about to expire.
    ///
    /// A failed refresh keeps the old token; the next API call then reports
    /// the authorization error.
    pub async fn get_valid_token(&mut self) -> String {
        if self.is_expired() {
            self.refresh().await;
        }
        self.token.access_token.clone()
    }

    async fn refresh(&mut self) {
        let mut fresh = match spotify::auth::refresh_token(&self.token.refresh_token).await {
            Ok(token) => token,
            Err(e) => {
                warning!(
                    "Token refresh failed, requests may be rejected. Run splaycli auth if they are. Err: {}",
                    e
                );
                return;
            }
        };
        // refresh responses may omit the refresh token
        if fresh.refresh_token.is_empty() {
            fresh.refresh_token = std::mem::take(&mut self.token.refresh_token);
        }
        self.token = fresh;
        if let Err(e) = self.persist().await {
            warning!("Refreshed token could not be cached. Err: {}", e);
        }
    }

    pub fn expires_at(&self) -> u64 {
        self.token.obtained_at + self.token.expires_in
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() as u64 + EXPIRY_MARGIN_SECS >= self.expires_at()
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache").join("token.json")
    }
}
