use splaycli::{
    cli::{SaveError, save_playlist},
    management::{PlaylistDraft, TokenManager},
    types::Token,
};

fn token_manager() -> TokenManager {
    TokenManager::new(Token {
        access_token: "access".to_string(),
        refresh_token: "refresh".to_string(),
        scope: String::new(),
        expires_in: 3600,
        obtained_at: u64::MAX / 2,
    })
}

#[tokio::test]
async fn test_empty_draft_is_rejected_before_any_request() {
    let mut token_mgr = token_manager();
    let draft = PlaylistDraft::new();

    let result = save_playlist(&mut token_mgr, &draft).await;
    assert!(matches!(result, Err(SaveError::NotSaveable)));
}
