use super::matcher::has_set;
use crate::cards::{Card, Deck};

/// Result of the initial deal: the stabilized board and the deck remainder.
#[derive(Debug, Clone)]
pub struct Deal {
    pub board: Vec<Card>,
    pub deck: Deck,
}

/// Deal the opening board from a shuffled deck: 12 cards, then expand by
/// 3 (up to 18) while no set is present. When expansion runs out of room
/// or cards, reshuffle the original full deck and restart the 12-card
/// deal from scratch. Each iteration consumes one of the bounded retry
/// attempts; on exhaustion the possibly set-less board stands, which is
/// an accepted degraded state rather than an error.
///
/// Operates on copies, so the caller's deck survives the retry path.
pub fn deal_initial(deck: &Deck) -> Deal {
    let mut working = deck.clone();
    let mut board = working.deal(crate::BOARD_TARGET);
    let mut attempts = 0;
    while !has_set(&board) && attempts < crate::DEAL_RETRIES {
        if working.len() >= 3 && board.len() < crate::BOARD_LIMIT {
            board.extend(working.deal(3));
        } else {
            working = deck.shuffled();
            board = working.deal(crate::BOARD_TARGET);
        }
        attempts += 1;
    }
    if !has_set(&board) {
        log::warn!("initial deal exhausted {} attempts without a set", attempts);
    }
    Deal {
        board,
        deck: working,
    }
}

/// Refill the board after a matched triple is removed: restore it to 12
/// cards when the deck allows, then keep dealing 3 at a time while no set
/// is present, cards remain, and the board is under 18. Returns the count
/// of cards dealt by the no-set top-ups (the refill-to-12 draw is not
/// reported). A return of 0 with a set-less board and an empty deck is
/// the terminal condition, judged by the caller.
pub fn replenish_after_removal(board: &mut Vec<Card>, deck: &mut Deck) -> usize {
    if board.len() < crate::BOARD_TARGET {
        if let Some(drawn) = deck.draw3() {
            board.extend(drawn);
        }
    }
    let mut added = 0;
    while !has_set(board) && board.len() < crate::BOARD_LIMIT {
        match deck.draw3() {
            Some(drawn) => {
                board.extend(drawn);
                added += 3;
            }
            None => break,
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gameplay::find_all_sets;

    fn cards(ids: &[u8]) -> Vec<Card> {
        ids.iter().copied().map(Card::from).collect()
    }

    #[test]
    fn initial_deal_stabilizes_or_exhausts_attempts() {
        let deck = Deck::new().shuffled();
        let deal = deal_initial(&deck);
        assert!(matches!(deal.board.len(), 12 | 15 | 18));
        assert_eq!(deal.board.len() + deal.deck.len(), crate::DECK_SIZE);
        // the caller's deck is untouched by the retry machinery
        assert_eq!(deck.len(), crate::DECK_SIZE);
    }

    #[test]
    fn initial_deal_board_and_deck_share_no_cards() {
        let deal = deal_initial(&Deck::new().shuffled());
        let mut ids = deal.board.iter().map(|c| c.id()).collect::<Vec<_>>();
        ids.extend(deal.deck.clone().map(|c| c.id()));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), crate::DECK_SIZE);
    }

    #[test]
    fn replenish_refills_toward_twelve() {
        let mut board = cards(&(0..9).collect::<Vec<_>>());
        let mut deck = Deck::from(cards(&(9..18).collect::<Vec<_>>()));
        replenish_after_removal(&mut board, &mut deck);
        assert_eq!(board.len(), 12);
        assert_eq!(deck.len(), 6);
    }

    #[test]
    fn refill_draw_is_not_reported_as_a_top_up() {
        // 0,1,3,4 holds no set; the refill itself deals 9,10,11 which is one
        let mut board = cards(&[0, 1, 3, 4]);
        let mut deck = Deck::from(cards(&[9, 10, 11, 2, 12, 13]));
        let added = replenish_after_removal(&mut board, &mut deck);
        assert!(has_set(&board));
        assert_eq!(added, 0);
        assert_eq!(board.len(), 7);
        assert_eq!(deck.len(), 3);
    }

    #[test]
    fn replenish_reports_extra_no_set_draws() {
        // board of 12 without a set forces a reportable 3-card top-up
        let board12 = [0u8, 1, 3, 4, 9, 10, 12, 13, 27, 28, 30, 31];
        assert!(!has_set(&cards(&board12)));
        let mut board = cards(&board12);
        let mut deck = Deck::from(cards(&[2, 77, 78]));
        let added = replenish_after_removal(&mut board, &mut deck);
        assert_eq!(added, 3);
        assert!(has_set(&board));
        assert_eq!(board.len(), 15);
        assert!(deck.is_empty());
    }

    #[test]
    fn replenish_stops_at_empty_deck() {
        let mut board = cards(&[0, 1, 3]);
        let mut deck = Deck::from(vec![]);
        let added = replenish_after_removal(&mut board, &mut deck);
        assert_eq!(added, 0);
        assert_eq!(board.len(), 3);
        assert!(!has_set(&board));
    }

    #[test]
    fn replenish_leaves_terminal_board_untouched() {
        // cards whose attributes only take two of three values can never
        // complete a set, so this 16-card board is provably dead
        let cube = [
            0u8, 1, 3, 4, 9, 10, 12, 13, 27, 28, 30, 31, 36, 37, 39, 40,
        ];
        let mut board = cards(&cube);
        assert!(find_all_sets(&board).is_empty());
        let mut deck = Deck::from(vec![]);
        let added = replenish_after_removal(&mut board, &mut deck);
        assert_eq!(added, 0);
        assert_eq!(board.len(), 16);
    }
}
