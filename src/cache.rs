//! Bounded least-used cache for character distributions.
//!
//! Eviction policy: on inserting a new key at capacity, the entry with the
//! fewest fetch hits goes first; ties fall to the oldest insertion. Every
//! method is a single critical section, which is all the throughput the
//! guess path needs (one fetch and at most one store per move).

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

struct Entry<V> {
    value: V,
    hits: u64,
    inserted_at: u64,
}

struct State<K, V> {
    entries: HashMap<K, Entry<V>>,
    clock: u64,
}

pub struct LeastUsedCache<K, V> {
    capacity: usize,
    state: Mutex<State<K, V>>,
}

impl<K: Eq + Hash + Clone, V: Clone> LeastUsedCache<K, V> {
    /// A cache holding at most `capacity` entries. Capacity 0 builds a
    /// cache on which `store` silently no-ops.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(State {
                entries: HashMap::new(),
                clock: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.state.lock().unwrap().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clone out the value for `key`, bumping its hit count.
    pub fn fetch(&self, key: &K) -> Option<V> {
        let mut state = self.state.lock().unwrap();
        state.entries.get_mut(key).map(|entry| {
            entry.hits += 1;
            entry.value.clone()
        })
    }

    /// Insert or overwrite. Inserting a new key at capacity first evicts
    /// the least-used entry (ties: oldest insertion).
    pub fn store(&self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let mut state = self.state.lock().unwrap();
        if !state.entries.contains_key(&key) && state.entries.len() >= self.capacity {
            let victim = state
                .entries
                .iter()
                .min_by_key(|(_, e)| (e.hits, e.inserted_at))
                .map(|(k, _)| k.clone());
            if let Some(victim) = victim {
                state.entries.remove(&victim);
            }
        }
        state.clock += 1;
        let inserted_at = state.clock;
        state.entries.insert(
            key,
            Entry {
                value,
                hits: 0,
                inserted_at,
            },
        );
    }
}
