mod auth;
mod draft;

pub use auth::{TokenCacheError, TokenManager};
pub use draft::DEFAULT_PLAYLIST_NAME;
pub use draft::PlaylistDraft;
