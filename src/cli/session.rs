use std::{io::Write, rc::Rc, time::Duration};

use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::{
    app::App,
    config, error, info,
    management::TokenManager,
    playback::{AudioBackend, MutedBackend, RodioBackend, RowEvent},
    success,
    types::Collection,
    utils::{self, SESSION_HELP, SessionCommand},
    warning,
};

use super::{
    playlist::{SaveError, save_playlist},
    search::fetch_tracks,
};

const PLAYBACK_TICK: Duration = Duration::from_millis(200);

/// Runs the interactive playlist builder until `quit` or end of input.
///
/// User commands and playback ticks are handled one at a time on this task,
/// so a preview can never change state in the middle of a command.
pub async fn session() {
    let mut token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run splaycli auth\n Error: {}",
                e
            );
        }
    };

    let backend: Rc<dyn AudioBackend> = match RodioBackend::open_default() {
        Ok(backend) => Rc::new(backend),
        Err(e) => {
            warning!("Previews are disabled. Err: {}", e);
            Rc::new(MutedBackend)
        }
    };

    let mut app = App::new(backend);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(PLAYBACK_TICK);

    info!("Type 'help' for the list of commands.");
    prompt(&app);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        warning!("Cannot read input. Err: {}", e);
                        break;
                    }
                };

                if line.trim().is_empty() {
                    prompt(&app);
                    continue;
                }

                match utils::parse_session_command(&line) {
                    Ok(SessionCommand::Quit) => break,
                    Ok(command) => handle(&mut app, &mut token_mgr, command).await,
                    Err(e) => warning!("{}", e),
                }
                prompt(&app);
            }
            _ = ticker.tick() => {
                let events = app.poll_playback();
                if !events.is_empty() {
                    report(&events);
                    prompt(&app);
                }
            }
        }
    }

    // dropping the app stops whatever preview is still playing
    drop(app);
    info!("Bye.");
}

async fn handle(app: &mut App, token_mgr: &mut TokenManager, command: SessionCommand) {
    match command {
        SessionCommand::Search(query) => {
            let token = token_mgr.get_valid_token().await;
            match fetch_tracks(&token, &query, config::search_limit()).await {
                Ok(tracks) => {
                    app.show_results(tracks);
                    show(app, Collection::Results);
                }
                Err(e) => warning!("Search failed. Err: {}", e),
            }
        }
        SessionCommand::Results => show(app, Collection::Results),
        SessionCommand::Playlist => show(app, Collection::Playlist),
        SessionCommand::Play(target) => {
            if !app.toggle(target.collection, target.index) {
                warning!(
                    "{}{} has no preview to play",
                    target.collection.prefix(),
                    target.index + 1
                );
                return;
            }
            if let Some(row) = app.row(target.collection, target.index) {
                match (row.is_playing(), row.failure()) {
                    (true, _) => info!("Playing preview of {}", row.track().name),
                    (false, Some(reason)) => {
                        warning!("Preview of {} failed: {}", row.track().name, reason)
                    }
                    (false, None) => info!("Paused {}", row.track().name),
                }
            }
        }
        SessionCommand::Add(index) => match app.add(index) {
            Some(track) => success!("Added {} to '{}'", track.name, app.draft().name()),
            None => warning!("There is no result r{}", index + 1),
        },
        SessionCommand::Remove(index) => match app.remove(index) {
            Some(track) => success!("Removed {} from '{}'", track.name, app.draft().name()),
            None => warning!("There is no playlist row p{}", index + 1),
        },
        SessionCommand::Name(name) => {
            app.rename(&name);
            success!("Playlist renamed to '{}'", app.draft().name());
        }
        SessionCommand::Save => {
            let saved = save_playlist(token_mgr, app.draft()).await;
            match saved {
                Ok(_) => app.finish_save(),
                Err(SaveError::TracksNotAdded {
                    playlist_id,
                    source,
                }) => {
                    warning!(
                        "Playlist {} was created but is still empty. Err: {}",
                        playlist_id,
                        source
                    );
                    info!("Run 'save' again to add the tracks to that playlist.");
                    app.attach_remote(&playlist_id);
                }
                Err(e) => warning!("Failed to save playlist. Err: {}", e),
            }
        }
        SessionCommand::Clear => {
            app.clear_draft();
            success!("Playlist draft cleared");
        }
        SessionCommand::Help => println!("{}", SESSION_HELP),
        SessionCommand::Quit => {}
    }
}

fn show(app: &App, collection: Collection) {
    let rows = app.table(collection);
    if rows.is_empty() {
        info!("The {} list is empty", collection);
        return;
    }
    if collection == Collection::Playlist {
        info!("{} ({} tracks)", app.draft().name(), app.draft().len());
    }
    println!("{}", Table::new(rows));
}

fn report(events: &[(String, RowEvent)]) {
    println!();
    for (name, event) in events {
        match event {
            RowEvent::ResourceEnded => info!("Preview of {} finished", name),
            RowEvent::ResourceErrored { reason } => {
                warning!("Preview of {} failed: {}", name, reason)
            }
            RowEvent::ExternallyStopped => info!("Stopped {}", name),
            _ => {}
        }
    }
}

fn prompt(app: &App) {
    print!("[{} · {}] > ", app.draft().name(), app.draft().len());
    let _ = std::io::stdout().flush();
}
