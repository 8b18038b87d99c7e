//! Candidate sampling and per-character document frequency.

use std::collections::BTreeMap;

use rand::Rng;

/// Selection-sample at most `n` elements from a sequence of declared
/// maximum length `total`, in one linear pass and constant extra space.
///
/// At each step a uniform draw in `[0, remaining)` below the number of
/// slots still needed selects the current element. Order is preserved and
/// no element repeats. When the sequence underruns `total` the sample may
/// come back short; callers treat the returned length as authoritative.
pub fn uniform_sample<I, R>(n: usize, total: usize, items: I, rng: &mut R) -> Vec<I::Item>
where
    I: IntoIterator,
    R: Rng + ?Sized,
{
    let mut needed = n;
    let mut remaining = total;
    let mut out = Vec::with_capacity(n.min(total));
    for item in items {
        if needed == 0 || remaining == 0 {
            break;
        }
        if rng.random_range(0..remaining) < needed {
            out.push(item);
            needed -= 1;
        }
        remaining -= 1;
    }
    out
}

/// Count, for each character, how many of the given words contain it at
/// least once: sum over words of 1[c in set(word)].
///
/// Keyed by a `BTreeMap` so downstream tie-breaking iterates in a fixed
/// order.
pub fn character_occurrences<'a, I>(words: I) -> BTreeMap<char, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts = BTreeMap::new();
    let mut seen: Vec<char> = Vec::new();
    for word in words {
        seen.clear();
        for c in word.chars() {
            if !seen.contains(&c) {
                seen.push(c);
                *counts.entry(c).or_insert(0) += 1;
            }
        }
    }
    counts
}
