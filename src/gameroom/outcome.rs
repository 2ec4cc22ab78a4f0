use super::event::{Stats, Winner};
use super::player::ConnectionId;
use crate::cards::Card;

/// Discriminated outcome of a set attempt. Rejections and misses are
/// no-ops on shared state; only `Matched` mutates board, deck, and score.
#[derive(Debug, Clone)]
pub enum Attempt {
    /// malformed or stale selection, reported to the requester only
    Rejected { message: String },
    /// three cards on the board that fail the matching rule
    Missed,
    /// a valid set was taken off the board
    Matched(Match),
}

#[derive(Debug, Clone)]
pub struct Match {
    pub finder: ConnectionId,
    pub name: String,
    pub cards: [Card; 3],
    /// cards dealt by no-set top-ups during replenishment
    pub added: usize,
    /// present when this match left the room terminal
    pub over: Option<Ending>,
}

#[derive(Debug, Clone)]
pub struct Ending {
    pub winner: Option<Winner>,
    pub stats: Stats,
}

/// Roster change produced by a successful leave.
#[derive(Debug, Clone)]
pub struct Departure {
    pub id: ConnectionId,
    pub name: String,
    pub remaining: usize,
}
