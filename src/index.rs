//! Bitset inverted index over the corpus.
//!
//! Two term kinds are indexed: word length, and (position, character).
//! The index is built once, in parallel, and is read-only afterwards, so
//! readers need no synchronization. The query side relies on this
//! build-then-freeze lifecycle for lock-free evaluation.
//!
//! ## Build-time sharing
//!
//! Workers race on term postings (two words of equal length both set bits
//! in the same `Length` bitset), so each posting lives behind its own
//! mutex while the build runs. The outer map lock is held only long
//! enough to get-or-insert a slot; the per-term lock only for one `set`.
//! After the join, the slots are unwrapped into a plain immutable map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::algebra::TermSource;
use crate::bitset::Bitset;
use crate::corpus::Corpus;
use crate::error::Error;
use crate::parallel::peach_indexed;

/// An indexable predicate over words. Structural equality and hashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    /// Words of exactly this character count.
    Length(usize),
    /// Words with this character at this zero-based position.
    Position(usize, char),
}

/// Immutable Term -> Bitset mapping; every bitset has capacity = |corpus|.
pub struct Index {
    capacity: usize,
    postings: HashMap<Term, Bitset>,
}

impl Index {
    /// Index `corpus` across up to `threads` workers.
    pub fn build(corpus: &Corpus, threads: usize) -> Result<Self, Error> {
        let capacity = corpus.len();
        let shared: Mutex<HashMap<Term, Arc<Mutex<Bitset>>>> = Mutex::new(HashMap::new());

        peach_indexed(corpus.words(), threads, |i, word| {
            let mark = |term: Term| {
                let slot = {
                    let mut map = shared.lock().unwrap();
                    map.entry(term)
                        .or_insert_with(|| Arc::new(Mutex::new(Bitset::new(capacity))))
                        .clone()
                };
                slot.lock().unwrap().set(i);
            };

            let mut chars = 0;
            for (j, c) in word.chars().enumerate() {
                mark(Term::Position(j, c));
                chars += 1;
            }
            mark(Term::Length(chars));
        })?;

        let postings = shared
            .into_inner()
            .unwrap()
            .into_iter()
            .map(|(term, slot)| {
                let bits = match Arc::try_unwrap(slot) {
                    Ok(mutex) => mutex.into_inner().unwrap(),
                    // unreachable once all workers have joined
                    Err(arc) => arc.lock().unwrap().clone(),
                };
                (term, bits)
            })
            .collect();

        Ok(Self { capacity, postings })
    }

    /// The posting bitset for `term`, or None when nothing matches it.
    pub fn get(&self, term: &Term) -> Option<&Bitset> {
        self.postings.get(term)
    }

    /// Bitset capacity shared by every posting (= corpus size).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of distinct indexed terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }
}

impl TermSource for Index {
    type Set = Bitset;

    fn resolve(&self, term: &Term) -> Option<&Bitset> {
        self.get(term)
    }

    fn universe(&self) -> Bitset {
        Bitset::all_set(self.capacity)
    }

    fn empty(&self) -> Bitset {
        Bitset::new(self.capacity)
    }
}
