use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::Collection;

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Formats a millisecond duration as `m:ss`.
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// A row addressed from the session prompt, e.g. `r3` or `p1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRef {
    pub collection: Collection,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Search(String),
    Results,
    Playlist,
    Play(RowRef),
    Add(usize),
    Remove(usize),
    Name(String),
    Save,
    Clear,
    Help,
    Quit,
}

pub const SESSION_HELP: &str = "\
search <query>   search the catalog
results          show the last search results
playlist         show the playlist draft
play r<N>|p<N>   start/stop the preview of a result or playlist row
add <N>          add result N to the playlist
remove <N>       remove playlist row N
name <text>      rename the playlist
save             save the playlist to Spotify
clear            empty the playlist draft
help             show this help
quit             leave the session";

/// Parses one line typed at the session prompt.
///
/// Positions are 1-based on the prompt and returned 0-based.
pub fn parse_session_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_lowercase().as_str() {
        "search" | "s" => {
            if rest.is_empty() {
                return Err("search needs a query".to_string());
            }
            Ok(SessionCommand::Search(rest.to_string()))
        }
        "results" => Ok(SessionCommand::Results),
        "playlist" | "list" => Ok(SessionCommand::Playlist),
        "play" | "p" => parse_row_ref(rest).map(SessionCommand::Play),
        "add" | "a" => parse_position(rest).map(SessionCommand::Add),
        "remove" | "rm" => parse_position(rest).map(SessionCommand::Remove),
        "name" => {
            if rest.is_empty() {
                return Err("name needs a playlist name".to_string());
            }
            Ok(SessionCommand::Name(rest.to_string()))
        }
        "save" => Ok(SessionCommand::Save),
        "clear" => Ok(SessionCommand::Clear),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
        "" => Err("empty command".to_string()),
        other => Err(format!("unknown command '{}', try 'help'", other)),
    }
}

fn parse_row_ref(s: &str) -> Result<RowRef, String> {
    let s = s.trim().to_lowercase();
    let (collection, position) = if let Some(rest) = s.strip_prefix('r') {
        (Collection::Results, rest)
    } else if let Some(rest) = s.strip_prefix('p') {
        (Collection::Playlist, rest)
    } else {
        return Err(format!("expected r<N> or p<N>, got '{}'", s));
    };

    parse_position(position).map(|index| RowRef { collection, index })
}

fn parse_position(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(format!("'{}' is not a valid position", s.trim())),
        Ok(n) => Ok(n - 1),
    }
}
