use crate::cards::Card;

/// three cards form a set when every attribute is all-same or all-distinct
/// across them. exactly two distinct values on any attribute disqualifies
/// the triple. symmetric under permutation of its arguments.
pub fn is_set(a: &Card, b: &Card, c: &Card) -> bool {
    one_or_three(a.number().into(), b.number().into(), c.number().into())
        && one_or_three(a.shape().into(), b.shape().into(), c.shape().into())
        && one_or_three(a.color().into(), b.color().into(), c.color().into())
        && one_or_three(a.shading().into(), b.shading().into(), c.shading().into())
}

/// whether any 3-combination of the board is a set.
/// false for boards with fewer than 3 cards.
pub fn has_set(board: &[Card]) -> bool {
    triples(board).any(|(a, b, c)| is_set(a, b, c))
}

/// every qualifying triple in ascending index order over i < j < k.
/// boards never exceed 18 cards so the O(n^3) scan stays under 816 triples.
pub fn find_all_sets(board: &[Card]) -> Vec<[Card; 3]> {
    triples(board)
        .filter(|(a, b, c)| is_set(a, b, c))
        .map(|(a, b, c)| [*a, *b, *c])
        .collect()
}

fn one_or_three(x: u8, y: u8, z: u8) -> bool {
    (x == y && y == z) || (x != y && y != z && x != z)
}

fn triples(board: &[Card]) -> impl Iterator<Item = (&Card, &Card, &Card)> {
    (0..board.len()).flat_map(move |i| {
        (i + 1..board.len()).flat_map(move |j| {
            (j + 1..board.len()).map(move |k| (&board[i], &board[j], &board[k]))
        })
    })
}
