use super::player::{ConnectionId, Player};
use crate::cards::Card;
use serde::Serialize;
use std::collections::HashMap;

/// Full room snapshot broadcast to every member after a mutation.
/// Board cards carry their ids; clients select by id only.
#[derive(Clone, Debug, Serialize)]
pub struct RoomState {
    pub board: Vec<Card>,
    pub deck_size: usize,
    pub players: Vec<Player>,
    pub scores: HashMap<ConnectionId, u32>,
    pub finished: bool,
    pub stats: Stats,
}

/// Summary statistics carried by game-over reports and hint tooling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_cards_dealt: usize,
    pub sets_found: u32,
    pub possible_sets: usize,
    pub cards_on_board: usize,
    pub cards_in_deck: usize,
    pub players_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Winner {
    pub id: ConnectionId,
    pub name: String,
    pub score: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    RateLimited,
}

/// Events the hosting layer fans out to room members. The Room itself
/// never touches a transport; it returns outcomes and the session layer
/// decides which of these to unicast or broadcast.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    State(RoomState),
    SetFound {
        finder: ConnectionId,
        name: String,
        cards: [Card; 3],
    },
    InvalidSet,
    CardsAdded {
        count: usize,
    },
    PlayerLeft {
        id: ConnectionId,
        name: String,
        remaining: usize,
    },
    GameOver {
        winner: Option<Winner>,
        stats: Stats,
    },
    Hint {
        ids: Vec<u8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl Event {
    /// wire form: one JSON text frame per event
    pub fn json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            log::error!("failed to serialize event: {}", e);
            String::from(r#"{"type":"error","kind":"validation","message":"internal"}"#)
        })
    }
}
