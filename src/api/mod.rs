//! # API Module
//!
//! HTTP endpoints served by the short-lived listener `splaycli auth` starts
//! while the user authorizes the application in the browser.
//!
//! - [`callback`] - Receives the authorization code from Spotify's
//!   authorization server, exchanges it together with the stored PKCE
//!   verifier and hands the token back to the waiting auth flow.
//! - [`health`] - Reports status and version; useful to check that the
//!   redirect URI actually reaches this listener.
//!
//! The listener binds to `SERVER_ADDRESS` and is torn down when the auth
//! command exits. See [`crate::server`] for the router.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
