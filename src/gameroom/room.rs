use super::*;
use crate::cards::*;
use crate::gameplay::*;
use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;

/// Gameplay phase derived from roster and board state.
/// `Finished` latches once no set remains and the deck is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    WaitingForPlayers,
    InProgress,
    Finished,
}

/// Aggregate for one live game: deck remainder, visible board, roster,
/// scores, and an activity timestamp for idle eviction.
///
/// Key responsibilities:
/// - Enforce selection validity and the matching rule
/// - Keep the board playable via the replenishment policy
/// - Detect the terminal state and crown a winner
/// - Report every mutation as a typed outcome for the hosting layer
///
/// The Room never touches a transport. Callers serialize access (one
/// mutex per room) and fan the returned outcomes out to members.
#[derive(Debug)]
pub struct Room {
    deck: Deck,
    board: Vec<Card>,
    players: Vec<Player>,
    scores: HashMap<ConnectionId, u32>,
    universe: usize,
    finished: bool,
    touched: Instant,
}

impl Default for Room {
    fn default() -> Self {
        Self::new()
    }
}

impl Room {
    /// fresh room: generate, shuffle, stabilize the opening board
    pub fn new() -> Self {
        Self::from_deck(Deck::new().shuffled())
    }

    /// deal from a caller-supplied deck; tests drive this with fixed decks
    pub fn from_deck(deck: Deck) -> Self {
        let universe = deck.len();
        let Deal { board, deck } = deal_initial(&deck);
        let finished = !has_set(&board) && deck.is_empty();
        Self {
            deck,
            board,
            players: Vec::new(),
            scores: HashMap::new(),
            universe,
            finished,
            touched: Instant::now(),
        }
    }

    /// Seat a connection. Idempotent per id: re-joining neither duplicates
    /// the roster entry nor resets the score.
    pub fn join(&mut self, id: ConnectionId, name: &str) -> RoomState {
        self.touch();
        if !self.players.iter().any(|p| p.id == id) {
            self.players.push(Player {
                id,
                name: name.to_string(),
            });
            self.scores.entry(id).or_insert(0);
            log::info!("{} seated as connection {}", name, id);
        }
        self.snapshot()
    }

    /// Unseat a connection, dropping its score. Board and deck are
    /// untouched; an emptied roster makes the room eligible for eviction.
    pub fn leave(&mut self, id: ConnectionId) -> Option<Departure> {
        self.touch();
        let pos = self.players.iter().position(|p| p.id == id)?;
        let player = self.players.remove(pos);
        self.scores.remove(&id);
        log::info!("{} left as connection {}", player.name, id);
        Some(Departure {
            id: player.id,
            name: player.name,
            remaining: self.players.len(),
        })
    }

    /// Judge a selection of three distinct board cards. A rejection or a
    /// miss leaves board, deck, and scores exactly as they were.
    pub fn attempt_set(&mut self, id: ConnectionId, picks: [u8; 3]) -> Attempt {
        self.touch();
        if self.finished {
            return Attempt::Rejected {
                message: "game is already over".into(),
            };
        }
        if !self.scores.contains_key(&id) {
            return Attempt::Rejected {
                message: "not seated in this room".into(),
            };
        }
        let cards = match self.resolve(picks) {
            Some(cards) => cards,
            None => {
                return Attempt::Rejected {
                    message: "selection must be 3 distinct cards on the board".into(),
                };
            }
        };
        if !is_set(&cards[0], &cards[1], &cards[2]) {
            return Attempt::Missed;
        }
        // removal is by id: attribute-identical duplicates cannot exist
        self.board.retain(|c| !picks.contains(&c.id()));
        *self.scores.entry(id).or_insert(0) += 1;
        let added = replenish_after_removal(&mut self.board, &mut self.deck);
        self.finished = !has_set(&self.board) && self.deck.is_empty();
        let name = self
            .players
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_default();
        let over = self.finished.then(|| Ending {
            winner: self.winner(),
            stats: self.stats(),
        });
        Attempt::Matched(Match {
            finder: id,
            name,
            cards,
            added,
            over,
        })
    }

    /// One valid triple chosen uniformly at random, ids only. Callers
    /// already hold full card data for everything on the board, so this
    /// reveals nothing about undealt cards.
    pub fn request_hint(&mut self) -> Option<[u8; 3]> {
        use rand::seq::IndexedRandom;
        self.touch();
        find_all_sets(&self.board)
            .choose(&mut rand::rng())
            .map(|set| set.map(u8::from))
    }

    pub fn snapshot(&self) -> RoomState {
        RoomState {
            board: self.board.clone(),
            deck_size: self.deck.len(),
            players: self.players.clone(),
            scores: self.scores.clone(),
            finished: self.finished,
            stats: self.stats(),
        }
    }

    pub fn stats(&self) -> Stats {
        Stats {
            total_cards_dealt: self.universe - self.deck.len(),
            sets_found: self.scores.values().sum(),
            possible_sets: find_all_sets(&self.board).len(),
            cards_on_board: self.board.len(),
            cards_in_deck: self.deck.len(),
            players_count: self.players.len(),
        }
    }
}

impl Room {
    fn resolve(&self, picks: [u8; 3]) -> Option<[Card; 3]> {
        if picks[0] == picks[1] || picks[1] == picks[2] || picks[0] == picks[2] {
            return None;
        }
        let find = |id: u8| self.board.iter().copied().find(|c| c.id() == id);
        Some([find(picks[0])?, find(picks[1])?, find(picks[2])?])
    }

    /// leading scorer, ties resolving to the earliest-seated player.
    /// none when nobody scored.
    fn winner(&self) -> Option<Winner> {
        let mut best: Option<(&Player, u32)> = None;
        for p in &self.players {
            let score = self.scores.get(&p.id).copied().unwrap_or(0);
            if best.is_none_or(|(_, b)| score > b) {
                best = Some((p, score));
            }
        }
        best.filter(|(_, score)| *score > 0).map(|(p, score)| Winner {
            id: p.id,
            name: p.name.clone(),
            score,
        })
    }

    fn touch(&mut self) {
        self.touched = Instant::now();
    }
}

impl Room {
    pub fn phase(&self) -> Phase {
        if self.finished {
            Phase::Finished
        } else if self.players.is_empty() {
            Phase::WaitingForPlayers
        } else {
            Phase::InProgress
        }
    }
    pub fn finished(&self) -> bool {
        self.finished
    }
    pub fn board(&self) -> &[Card] {
        &self.board
    }
    pub fn roster_is_empty(&self) -> bool {
        self.players.is_empty()
    }
    pub fn idle_for(&self) -> Duration {
        self.touched.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANNA: ConnectionId = 1;
    const BORIS: ConnectionId = 2;

    fn room() -> Room {
        let mut room = Room::new();
        room.join(ANNA, "anna");
        room.join(BORIS, "boris");
        room
    }

    fn first_set(room: &Room) -> [u8; 3] {
        find_all_sets(room.board())
            .first()
            .expect("dealt board holds a set")
            .map(u8::from)
    }

    #[test]
    fn join_is_idempotent_per_connection() {
        let mut room = room();
        let state = room.join(ANNA, "anna again");
        assert_eq!(state.players.len(), 2);
        assert_eq!(state.players[0].name, "anna");
        assert_eq!(state.scores[&ANNA], 0);
        // snapshots carry the running statistics
        assert_eq!(state.stats.players_count, 2);
        assert_eq!(state.stats, room.stats());
        assert_eq!(room.phase(), Phase::InProgress);
    }

    #[test]
    fn leave_drops_roster_and_score() {
        let mut room = room();
        let gone = room.leave(ANNA).expect("anna was seated");
        assert_eq!(gone.name, "anna");
        assert_eq!(gone.remaining, 1);
        assert!(room.leave(ANNA).is_none());
        assert!(!room.roster_is_empty());
        assert!(room.leave(BORIS).is_some());
        assert!(room.roster_is_empty());
        assert_eq!(room.phase(), Phase::WaitingForPlayers);
    }

    #[test]
    fn matched_set_scores_and_replenishes() {
        let mut room = room();
        let picks = first_set(&room);
        let before = room.stats();
        let outcome = room.attempt_set(ANNA, picks);
        let Attempt::Matched(m) = outcome else {
            panic!("expected a match");
        };
        assert_eq!(m.finder, ANNA);
        assert_eq!(m.name, "anna");
        assert!(m.over.is_none());
        let after = room.stats();
        assert_eq!(after.sets_found, before.sets_found + 1);
        // three cards left the board, replenishment restored at least 12
        assert!(after.cards_on_board >= crate::BOARD_TARGET);
        // deck shrank by exactly what was drawn
        let drawn = before.cards_in_deck - after.cards_in_deck;
        assert_eq!(after.cards_on_board, before.cards_on_board - 3 + drawn);
        // matched ids are gone
        for id in picks {
            assert!(!room.board().iter().any(|c| c.id() == id));
        }
    }

    #[test]
    fn missed_set_is_a_no_op() {
        let mut room = room();
        // three distinct on-board cards that are not a set; any board of
        // 4 or more cards must hold one, since the third card completing
        // a pair into a set is unique
        let board = room.board();
        let mut miss = None;
        'search: for i in 0..board.len() {
            for j in i + 1..board.len() {
                for k in j + 1..board.len() {
                    if !is_set(&board[i], &board[j], &board[k]) {
                        miss = Some([board[i].id(), board[j].id(), board[k].id()]);
                        break 'search;
                    }
                }
            }
        }
        let miss = miss.expect("some triple misses");
        let before = room.snapshot();
        assert!(matches!(room.attempt_set(BORIS, miss), Attempt::Missed));
        let after = room.snapshot();
        assert_eq!(before.board, after.board);
        assert_eq!(before.deck_size, after.deck_size);
        assert_eq!(before.scores, after.scores);
    }

    #[test]
    fn off_board_or_duplicate_selections_are_rejected() {
        let mut room = room();
        let on = room.board()[0].id();
        let off = (0..crate::DECK_SIZE as u8)
            .find(|id| !room.board().iter().any(|c| c.id() == *id))
            .expect("69 cards are undealt");
        let dup = [on, on, room.board()[1].id()];
        assert!(matches!(room.attempt_set(ANNA, dup), Attempt::Rejected { .. }));
        let stale = [on, room.board()[1].id(), off];
        assert!(matches!(room.attempt_set(ANNA, stale), Attempt::Rejected { .. }));
        let stranger = first_set(&room);
        assert!(matches!(room.attempt_set(99, stranger), Attempt::Rejected { .. }));
    }

    #[test]
    fn hints_come_from_the_board_and_form_a_set() {
        let mut room = room();
        let ids = room.request_hint().expect("dealt board holds a set");
        let cards = ids.map(Card::from);
        assert!(is_set(&cards[0], &cards[1], &cards[2]));
        for id in ids {
            assert!(room.board().iter().any(|c| c.id() == id));
        }
    }

    #[test]
    fn playing_out_the_deck_finishes_the_game() {
        let mut room = room();
        let mut turn = 0;
        let ending = loop {
            let sets = find_all_sets(room.board());
            let Some(set) = sets.first() else {
                // terminal without a final match only if the deal degraded,
                // which a full 81-card deck does not produce in practice
                panic!("board went dead before the deck emptied");
            };
            let finder = if turn % 2 == 0 { ANNA } else { BORIS };
            turn += 1;
            match room.attempt_set(finder, set.map(u8::from)) {
                Attempt::Matched(m) => match m.over {
                    Some(ending) => break ending,
                    None => continue,
                },
                other => panic!("valid set was refused: {:?}", other),
            }
        };
        assert!(room.finished());
        assert_eq!(room.phase(), Phase::Finished);
        assert_eq!(ending.stats.total_cards_dealt, crate::DECK_SIZE);
        assert_eq!(ending.stats.cards_in_deck, 0);
        assert_eq!(ending.stats.possible_sets, 0);
        assert_eq!(ending.stats.sets_found, turn as u32);
        let winner = ending.winner.expect("someone scored");
        // anna moved first so she wins ties on the earliest-seated rule
        let anna = room.snapshot().scores[&ANNA];
        let boris = room.snapshot().scores[&BORIS];
        if anna >= boris {
            assert_eq!(winner.id, ANNA);
        } else {
            assert_eq!(winner.id, BORIS);
        }
        // the game is over: further attempts and hints are refused
        assert!(matches!(
            room.attempt_set(ANNA, [0, 1, 2]),
            Attempt::Rejected { .. }
        ));
    }

    #[test]
    fn short_test_decks_can_start_terminal() {
        // two cards cannot hold a set, so the room opens finished
        let deck = Deck::from(vec![Card::from(0), Card::from(1)]);
        let room = Room::from_deck(deck);
        assert!(room.finished());
        assert_eq!(room.stats().total_cards_dealt, 2);
    }
}
