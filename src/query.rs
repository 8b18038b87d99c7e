//! Game state adapter: canonical fingerprint and candidate-set query.
//!
//! A game state is fully described by (word length, excluded letters,
//! revealed positions); two states with equal descriptions have identical
//! candidate sets. The fingerprint is the cache key for the character
//! distribution computed from that candidate set.

use crate::algebra::Expr;
use crate::bitset::Bitset;
use crate::game::{Game, MYSTERY};
use crate::index::Term;

/// Field-start sentinel. A Unicode noncharacter, so it cannot collide
/// with corpus text.
pub const FIELD_SEP: char = '\u{FFFE}';
/// Record-end sentinel, likewise a noncharacter.
pub const RECORD_SEP: char = '\u{FFFF}';

/// Canonical state fingerprint:
///
/// ```text
/// FS <length> RS FS <excluded sorted> RS FS [ FS <i> RS FS <c> RS ]* RS
/// ```
///
/// Excluded letters come sorted (the referee hands them over in a sorted
/// set); revealed `(i, c)` pairs in ascending position order.
pub fn fingerprint(game: &impl Game) -> String {
    use std::fmt::Write;

    let mut fp = String::new();
    fp.push(FIELD_SEP);
    let _ = write!(fp, "{}", game.secret_word_length());
    fp.push(RECORD_SEP);

    fp.push(FIELD_SEP);
    for &c in game.incorrectly_guessed_letters() {
        fp.push(c);
    }
    fp.push(RECORD_SEP);

    fp.push(FIELD_SEP);
    for (i, &c) in game.guessed_so_far().iter().enumerate() {
        if c != MYSTERY {
            fp.push(FIELD_SEP);
            let _ = write!(fp, "{}", i);
            fp.push(RECORD_SEP);
            fp.push(FIELD_SEP);
            fp.push(c);
            fp.push(RECORD_SEP);
        }
    }
    fp.push(RECORD_SEP);
    fp
}

/// The candidate-set query for a game state:
///
/// `Length(L) & (& Position(i, c_i) known) & !(| Position(i, x) excluded)`
///
/// The revealed-positions conjunct and the excluded-letters complement are
/// omitted when empty (operator nodes carry at least one child).
pub fn candidate_query(game: &impl Game) -> Expr<Bitset> {
    let length = game.secret_word_length();
    let mut children = vec![Expr::Term(Term::Length(length))];

    let known: Vec<Expr<Bitset>> = game
        .guessed_so_far()
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c != MYSTERY)
        .map(|(i, &c)| Expr::Term(Term::Position(i, c)))
        .collect();
    if !known.is_empty() {
        children.push(Expr::intersect(known));
    }

    let excluded: Vec<Expr<Bitset>> = game
        .incorrectly_guessed_letters()
        .iter()
        .flat_map(|&x| (0..length).map(move |i| Expr::Term(Term::Position(i, x))))
        .collect();
    if !excluded.is_empty() {
        children.push(Expr::complement(Expr::union(excluded)));
    }

    Expr::intersect(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Guess, HangmanGame};

    #[test]
    fn test_fingerprint_fresh_game() {
        let game = HangmanGame::new("cat", 5);
        let expected = format!(
            "{fs}3{rs}{fs}{rs}{fs}{rs}",
            fs = FIELD_SEP,
            rs = RECORD_SEP
        );
        assert_eq!(fingerprint(&game), expected);
    }

    #[test]
    fn test_fingerprint_encodes_state() {
        let mut game = HangmanGame::new("cat", 5);
        game.make_guess(&Guess::Letter('t'));
        game.make_guess(&Guess::Letter('z'));
        let expected = format!(
            "{fs}3{rs}{fs}Z{rs}{fs}{fs}2{rs}{fs}T{rs}{rs}",
            fs = FIELD_SEP,
            rs = RECORD_SEP
        );
        assert_eq!(fingerprint(&game), expected);
    }

    #[test]
    fn test_equal_states_equal_fingerprints() {
        let play = |order: &[char]| {
            let mut game = HangmanGame::new("crown", 9);
            for &c in order {
                game.make_guess(&Guess::Letter(c));
            }
            fingerprint(&game)
        };
        // Same resulting state regardless of guess order.
        assert_eq!(play(&['x', 'o', 'y']), play(&['y', 'x', 'o']));
    }

    #[test]
    fn test_distinct_states_distinct_fingerprints() {
        let mut a = HangmanGame::new("cat", 5);
        let mut b = HangmanGame::new("cat", 5);
        a.make_guess(&Guess::Letter('x'));
        b.make_guess(&Guess::Letter('y'));
        assert_ne!(fingerprint(&a), fingerprint(&b));

        // Same letters guessed against different secrets of one length:
        // the revealed positions differ.
        let mut c = HangmanGame::new("cat", 5);
        let mut d = HangmanGame::new("tac", 5);
        c.make_guess(&Guess::Letter('t'));
        d.make_guess(&Guess::Letter('t'));
        assert_ne!(fingerprint(&c), fingerprint(&d));
    }

    #[test]
    fn test_query_shape_fresh_game() {
        let game = HangmanGame::new("cat", 5);
        let query = candidate_query(&game);
        assert_eq!(query, Expr::Intersect(vec![Expr::Term(Term::Length(3))]));
    }

    #[test]
    fn test_query_shape_full_state() {
        let mut game = HangmanGame::new("cat", 5);
        game.make_guess(&Guess::Letter('t'));
        game.make_guess(&Guess::Letter('z'));
        let query = candidate_query(&game);

        let expected = Expr::intersect(vec![
            Expr::Term(Term::Length(3)),
            Expr::intersect(vec![Expr::Term(Term::Position(2, 'T'))]),
            Expr::complement(Expr::union(vec![
                Expr::Term(Term::Position(0, 'Z')),
                Expr::Term(Term::Position(1, 'Z')),
                Expr::Term(Term::Position(2, 'Z')),
            ])),
        ]);
        assert_eq!(query, expected);
    }
}
