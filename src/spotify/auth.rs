use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    config, error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// Initiates the complete OAuth 2.0 PKCE authentication flow with Spotify.
///
/// This function orchestrates the entire authentication process including:
/// 1. Generating PKCE code verifier and challenge
/// 2. Starting a local callback server
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback
/// 5. Persisting the obtained token for future use
///
/// # Arguments
///
/// * `shared_state` - Shared state holding the PKCE verifier and, once the
///   callback handler finished the exchange, the resulting token
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Token persistence failures terminate the program with an error
/// - Authentication timeouts or failures terminate with an error message
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    // Store verifier in shared state before the callback can be hit
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    let auth_url = authorize_url(&code_challenge);
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(shared_state).await {
        Some(t) => {
            let token_manager = TokenManager::new(t);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Builds the authorization URL the user is sent to.
///
/// Query values are percent-encoded by reqwest's URL builder, so scopes with
/// spaces and redirect URIs with their own query strings survive intact.
pub fn authorize_url(code_challenge: &str) -> String {
    let base = config::spotify_apiauth_url();
    let params = [
        ("client_id", config::spotify_client_id()),
        ("response_type", "code".to_string()),
        ("redirect_uri", config::spotify_redirect_uri()),
        ("code_challenge", code_challenge.to_string()),
        ("code_challenge_method", "S256".to_string()),
        ("scope", config::spotify_scope()),
    ];

    match reqwest::Url::parse_with_params(&base, &params) {
        Ok(url) => url.to_string(),
        Err(_) => base,
    }
}

/// Waits for the OAuth callback to complete and return a token.
///
/// Polls the shared state once per second for at most 60 seconds.
async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|p| p.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Refreshes an expired access token using a refresh token.
///
/// # Returns
///
/// - `Ok(Token)` - New token; `refresh_token` is empty when Spotify did not
///   rotate it
/// - `Err(String)` - Error message describing the failure
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", &config::spotify_client_id()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json: TokenResponse = res.json().await.map_err(|e| e.to_string())?;
    Ok(into_token(json))
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the flow started by [`auth`]: the verifier proves that the
/// client finishing the flow is the one that started it.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
/// * `verifier` - PKCE code verifier generated at the start of the flow
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, reqwest::Error> {
    let client_id = config::spotify_client_id();
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?
        .error_for_status()?;

    let json: TokenResponse = res.json().await?;
    Ok(into_token(json))
}

fn into_token(json: TokenResponse) -> Token {
    Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token.unwrap_or_default(),
        scope: json.scope,
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    }
}
