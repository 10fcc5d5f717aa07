// Tournament data loading: a JSON event bundle, or the decks/matches CSV
// exports named in the config.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use topcut_core::{Deck, Match, TournamentSummary};
use tracing::{info, warn};

use crate::config::Config;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Everything known about one tournament, as loaded from disk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventData {
    #[serde(default)]
    pub tournament: TournamentSummary,
    #[serde(default)]
    pub decks: Vec<Deck>,
    #[serde(default)]
    pub matches: Vec<Match>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// JSON bundle
// ---------------------------------------------------------------------------

/// Load a `{ tournament, decks, matches }` bundle.
pub fn load_event_json(path: &Path) -> Result<EventData, DataError> {
    let path_str = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| DataError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    let event = parse_event_json(&text).map_err(|e| DataError::Json {
        path: path_str.clone(),
        source: e,
    })?;
    let event = sanitize(event)?;
    info!(
        "loaded {} decks and {} matches from {}",
        event.decks.len(),
        event.matches.len(),
        path_str
    );
    Ok(event)
}

fn parse_event_json(text: &str) -> Result<EventData, serde_json::Error> {
    serde_json::from_str(text)
}

// ---------------------------------------------------------------------------
// CSV exports
// ---------------------------------------------------------------------------

fn load_decks_from_reader<R: Read>(rdr: R) -> Result<Vec<Deck>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut decks = Vec::new();
    for result in reader.deserialize::<Deck>() {
        match result {
            Ok(deck) => decks.push(deck),
            Err(e) => warn!("skipping malformed deck row: {}", e),
        }
    }
    Ok(decks)
}

fn load_matches_from_reader<R: Read>(rdr: R) -> Result<Vec<Match>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut matches = Vec::new();
    for result in reader.deserialize::<Match>() {
        match result {
            Ok(record) => matches.push(record),
            Err(e) => warn!("skipping malformed match row: {}", e),
        }
    }
    Ok(matches)
}

fn open_csv(path: &Path) -> Result<std::fs::File, DataError> {
    std::fs::File::open(path).map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_decks_csv(path: &Path) -> Result<Vec<Deck>, DataError> {
    load_decks_from_reader(open_csv(path)?).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

pub fn load_matches_csv(path: &Path) -> Result<Vec<Match>, DataError> {
    load_matches_from_reader(open_csv(path)?).map_err(|e| DataError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load the CSV exports named in the config, with the config's event
/// metadata standing in for the tournament record.
pub fn load_event_from_config(config: &Config) -> Result<EventData, DataError> {
    let decks_path = config.resolve(&config.data_paths.decks);
    let matches_path = config.resolve(&config.data_paths.matches);

    let event = EventData {
        tournament: TournamentSummary {
            attendance: config.event.attendance,
            name: config.event.name.clone(),
            date: None,
        },
        decks: load_decks_csv(&decks_path)?,
        matches: load_matches_csv(&matches_path)?,
    };
    let event = sanitize(event)?;
    info!(
        "loaded {} decks from {} and {} matches from {}",
        event.decks.len(),
        decks_path.display(),
        event.matches.len(),
        matches_path.display()
    );
    Ok(event)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Drop records the pipeline can't use and reject exports that are not a
/// single tournament.
fn sanitize(mut event: EventData) -> Result<EventData, DataError> {
    for deck in &mut event.decks {
        if deck.placement == Some(0) {
            warn!(
                "deck {} ({}) has placement 0; treating as unplaced",
                deck.deck_id, deck.melee_player_username
            );
            deck.placement = None;
        }
    }

    event.matches.retain(|m| {
        let keep = !m.p1_username.trim().is_empty();
        if !keep {
            warn!("skipping round {} match with no player 1", m.round);
        }
        keep
    });

    let mut usernames: Vec<&str> = event
        .decks
        .iter()
        .map(|d| d.melee_player_username.as_str())
        .collect();
    usernames.sort_unstable();
    if let Some(pair) = usernames.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(DataError::Validation(format!(
            "player {} is registered with more than one deck",
            pair[0]
        )));
    }

    Ok(event)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
