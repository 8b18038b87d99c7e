//! Guess selection: the per-move orchestration layer.
//!
//! Per move: fingerprint the game, look the character distribution up in
//! the cache, on a miss run query -> optimize -> evaluate -> sample ->
//! count, then pick the letter whose document frequency lands closest to
//! `target_char_p` of the sampled population, or the word itself once a
//! single candidate remains.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Mutex;

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

use crate::algebra::evaluate;
use crate::cache::LeastUsedCache;
use crate::config::StrategyConfig;
use crate::corpus::Corpus;
use crate::error::Error;
use crate::game::{Game, Guess};
use crate::index::Index;
use crate::query::{candidate_query, fingerprint};
use crate::sample::{character_occurrences, uniform_sample};

/// Per-state character statistics: how many candidates were sampled, and
/// in how many of them each character appears at least once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharDistribution {
    pub sampled: usize,
    pub occurrences: BTreeMap<char, usize>,
}

/// Shared, read-only guesser. Distinct games may call [`next_guess`]
/// concurrently; the cache and the sampling rng are the only shared
/// mutable state and both sit behind their own locks.
///
/// [`next_guess`]: Strategy::next_guess
pub struct Strategy<'a> {
    corpus: &'a Corpus,
    index: &'a Index,
    cache: LeastUsedCache<String, CharDistribution>,
    sample_size: usize,
    target_char_p: f64,
    rng: Mutex<SmallRng>,
}

impl<'a> Strategy<'a> {
    pub fn new(corpus: &'a Corpus, index: &'a Index, config: &StrategyConfig) -> Result<Self, Error> {
        Self::with_seed(corpus, index, config, rand::rng().next_u64())
    }

    /// Deterministic construction for tests and reproducible batches.
    pub fn with_seed(
        corpus: &'a Corpus,
        index: &'a Index,
        config: &StrategyConfig,
        seed: u64,
    ) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            corpus,
            index,
            cache: LeastUsedCache::new(config.cache_size),
            sample_size: config.sample_size,
            target_char_p: config.target_char_p,
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        })
    }

    /// Produce the next move for `game`.
    pub fn next_guess(&self, game: &impl Game) -> Result<Guess, Error> {
        let key = fingerprint(game);
        let dist = match self.cache.fetch(&key) {
            Some(dist) => dist,
            None => {
                let dist = self.char_distribution(game)?;
                self.cache.store(key, dist.clone());
                dist
            }
        };

        if dist.sampled == 0 {
            // The game state is inconsistent with the corpus; surface a
            // deterministic certain-wrong guess to the referee.
            return Ok(self.fallback_word_guess(game));
        }
        if dist.sampled == 1 {
            return self.single_candidate_guess(game);
        }

        let target = dist.sampled as f64 * self.target_char_p;
        let guessed = game.all_guessed_letters();
        let pick = dist
            .occurrences
            .iter()
            .filter(|(c, _)| !guessed.contains(*c))
            .min_by(|(ca, na), (cb, nb)| {
                let da = (**na as f64 - target).abs();
                let db = (**nb as f64 - target).abs();
                da.partial_cmp(&db)
                    .unwrap_or(Ordering::Equal)
                    // equal distance: take the greater character
                    .then_with(|| cb.cmp(ca))
            });
        match pick {
            Some((&c, _)) => Ok(Guess::Letter(c)),
            None => Ok(self.fallback_word_guess(game)),
        }
    }

    /// Evaluate the candidate query and build the sampled character
    /// distribution for the current state.
    fn char_distribution(&self, game: &impl Game) -> Result<CharDistribution, Error> {
        let query = candidate_query(game);
        let candidates = evaluate(&query, self.index)?;
        let total = candidates.cardinality();

        let mut rng = self.rng.lock().unwrap();
        let words = uniform_sample(
            self.sample_size,
            total,
            candidates.iter().map(|i| self.corpus.word(i)),
            &mut *rng,
        );
        Ok(CharDistribution {
            sampled: words.len(),
            occurrences: character_occurrences(words),
        })
    }

    /// One candidate left: guess it outright. The candidate set is
    /// re-derived here because the cached distribution does not carry it.
    fn single_candidate_guess(&self, game: &impl Game) -> Result<Guess, Error> {
        let candidates = evaluate(&candidate_query(game), self.index)?;
        for i in candidates.iter() {
            let word = self.corpus.word(i);
            if !game.incorrectly_guessed_words().contains(word) {
                return Ok(Guess::Word(word.to_string()));
            }
        }
        Ok(self.fallback_word_guess(game))
    }

    /// Lowest-index corpus word not yet guessed as a word.
    fn fallback_word_guess(&self, game: &impl Game) -> Guess {
        let word = self
            .corpus
            .words()
            .iter()
            .find(|w| !game.incorrectly_guessed_words().contains(w.as_str()))
            .cloned()
            .unwrap_or_default();
        Guess::Word(word)
    }
}
