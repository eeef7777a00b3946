use std::collections::HashSet;

use indexmap::map::Entry as Slot;
use indexmap::IndexMap;

use crate::ime::Entry;

/// Trimmed, non-empty words in first-occurrence order without duplicates.
pub fn unique_words(entries: &[Entry]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = vec![];
    for e in entries {
        let w = e.word.trim();
        if w.is_empty() || !seen.insert(w) {
            continue;
        }
        out.push(w.to_string());
    }
    out
}

/// One line of a weighted dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weighted {
    pub word: String,
    pub pinyin: Vec<String>,
    pub freq: u32,
}

/// Merge entries by exact word: the highest `freq` wins, on a tie the
/// earliest entry is kept. Output follows first appearance of each word.
///
/// Entries with an empty word are skipped.
pub fn merge_weighted(entries: &[Entry]) -> Vec<Weighted> {
    let mut best: IndexMap<&str, Weighted> = IndexMap::new();

    for e in entries.iter().filter(|e| !e.word.is_empty()) {
        match best.entry(e.word.as_str()) {
            Slot::Occupied(mut slot) => {
                let w = slot.get_mut();
                if e.freq > w.freq {
                    w.pinyin = e.pinyin.clone();
                    w.freq = e.freq;
                }
            }
            Slot::Vacant(slot) => {
                slot.insert(Weighted {
                    word: e.word.clone(),
                    pinyin: e.pinyin.clone(),
                    freq: e.freq,
                });
            }
        }
    }
    best.into_values().collect()
}
