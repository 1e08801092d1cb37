use crate::model::AlertRecord;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Insertion-ordered key -> count mapping.
///
/// Chart labels are drawn in the order distinct keys were first seen, so a
/// plain `HashMap` is not enough.
#[derive(Debug, Clone)]
pub struct FrequencyMap<K> {
    entries: Vec<(K, u64)>,
    index: HashMap<K, usize>,
}

impl<K> Default for FrequencyMap<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> FrequencyMap<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bump the count for `key`, appending it if unseen.
    pub fn record(&mut self, key: K) {
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<u64> {
        self.index.get(key).map(|&pos| self.entries[pos].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.entries.iter().map(|(k, c)| (k, *c))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn counts(&self) -> Vec<u64> {
        self.entries.iter().map(|(_, c)| *c).collect()
    }

    /// Largest single count, used to scale bar widths.
    pub fn max_count(&self) -> u64 {
        self.entries.iter().map(|(_, c)| *c).max().unwrap_or(0)
    }
}

impl<K: Clone + Eq + Hash> FromIterator<K> for FrequencyMap<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut map = Self::new();
        for key in iter {
            map.record(key);
        }
        map
    }
}

#[derive(Serialize)]
struct Entry<'a, K> {
    key: &'a K,
    count: u64,
}

impl<K: Serialize> Serialize for FrequencyMap<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            seq.serialize_element(&Entry { key, count: *count })?;
        }
        seq.end()
    }
}

/// Count records per alert signature. Records without one are skipped.
pub fn signature_counts(records: Option<&[AlertRecord]>) -> FrequencyMap<String> {
    records
        .unwrap_or_default()
        .iter()
        .filter_map(|r| r.signature().map(str::to_owned))
        .collect()
}

/// Count records per severity. `0` is a countable key; only absent
/// severities are skipped.
pub fn severity_counts(records: Option<&[AlertRecord]>) -> FrequencyMap<i64> {
    records
        .unwrap_or_default()
        .iter()
        .filter_map(AlertRecord::severity)
        .collect()
}
