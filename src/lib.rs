//! # Hangman: corpus-search guessing strategy
//!
//! Plays Hangman against a referee by treating the corpus as a document
//! set and each game state as a query over it. The per-move pipeline:
//!
//! game state → fingerprint → cache lookup; on a miss, build query →
//! optimize → evaluate against the bitset index → sample candidates →
//! count per-letter document frequencies → cache → pick a letter (or the
//! word, once a single candidate remains).
//!
//! | Component | Rust module |
//! |-----------|-------------|
//! | fixed-width bitset with destructive set ops | [`bitset`] |
//! | Term → Bitset inverted index, parallel build | [`index`] |
//! | expression AST + optimizer + evaluator | [`algebra`] |
//! | reservoir-style sampling, char document frequency | [`sample`] |
//! | least-used distribution cache | [`cache`] |
//! | referee contract + local referee | [`game`] |
//! | state fingerprint + candidate query | [`query`] |
//! | per-move guess selection | [`strategy`] |
//! | range partitioning + worker pool | [`parallel`] |
//!
//! The index is built once and read-only afterwards; guesses for distinct
//! games can run in parallel with the cache as the only shared mutable
//! state.

pub mod algebra;
pub mod bitset;
pub mod cache;
pub mod config;
pub mod corpus;
pub mod error;
pub mod game;
pub mod index;
pub mod parallel;
pub mod query;
pub mod sample;
pub mod strategy;

pub use config::StrategyConfig;
pub use corpus::Corpus;
pub use error::Error;
pub use game::{Game, GameStatus, Guess, HangmanGame};
pub use index::{Index, Term};
pub use strategy::Strategy;
