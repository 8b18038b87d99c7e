//! The corpus: an ordered, immutable word list.
//!
//! Words are addressed by their zero-based position, which doubles as the
//! bit index in every posting bitset. Corpus files are newline-delimited;
//! words are upper-cased on the way in and blank lines are skipped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

#[derive(Clone, Debug, Default)]
pub struct Corpus {
    words: Vec<String>,
}

impl Corpus {
    /// Build from an in-memory word list (tests, fixtures).
    pub fn from_words<I, W>(words: I) -> Self
    where
        I: IntoIterator<Item = W>,
        W: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_uppercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a newline-delimited word file.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_uppercase());
            }
        }
        Ok(Self { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    pub fn word(&self, i: usize) -> &str {
        &self.words[i]
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}
