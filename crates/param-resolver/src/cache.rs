//! Plugin parameter cache (§3, §4.6): one discovered parameter list per
//! `(channel, slot)`, indexed four ways so the resolver never has to scan
//! more than once per tier.

use std::collections::HashMap;

use sysex_proto::ParameterEntry;

pub struct ParameterCache {
    entries: Vec<ParameterEntry>,
    exact: HashMap<String, usize>,
    case_insensitive_exact: HashMap<String, Vec<usize>>,
}

impl ParameterCache {
    /// Build a fresh cache from a discovery result. Indices are positional
    /// and not persisted across rebuilds — names are the stable key (§9).
    pub fn build(entries: Vec<ParameterEntry>) -> Self {
        let mut exact = HashMap::new();
        let mut case_insensitive_exact: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            exact.entry(entry.raw_name.clone()).or_insert(i);
            case_insensitive_exact
                .entry(entry.raw_name.to_lowercase())
                .or_default()
                .push(i);
        }
        Self { entries, exact, case_insensitive_exact }
    }

    pub fn entries(&self) -> &[ParameterEntry] {
        &self.entries
    }

    pub fn find_exact(&self, name: &str) -> Option<&ParameterEntry> {
        self.exact.get(name).map(|&i| &self.entries[i])
    }

    pub fn find_case_insensitive_exact(&self, name: &str) -> Vec<&ParameterEntry> {
        self.case_insensitive_exact
            .get(&name.to_lowercase())
            .map(|idxs| idxs.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    pub fn find_prefix(&self, needle: &str) -> Vec<&ParameterEntry> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.raw_name.to_lowercase().starts_with(&needle))
            .collect()
    }

    pub fn find_substring(&self, needle: &str) -> Vec<&ParameterEntry> {
        let needle = needle.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.raw_name.to_lowercase().contains(&needle))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParameterCache {
        ParameterCache::build(vec![
            ParameterEntry { index: 0, raw_name: "Filter 1 Freq".into(), value: 0.5 },
            ParameterEntry { index: 1, raw_name: "Filter 1 Res".into(), value: 0.2 },
            ParameterEntry { index: 2, raw_name: "Filter 2 Freq".into(), value: 0.5 },
        ])
    }

    #[test]
    fn exact_match_is_case_sensitive() {
        let cache = sample();
        assert!(cache.find_exact("Filter 1 Freq").is_some());
        assert!(cache.find_exact("filter 1 freq").is_none());
    }

    #[test]
    fn case_insensitive_exact_matches_regardless_of_case() {
        let cache = sample();
        let hits = cache.find_case_insensitive_exact("filter 1 freq");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].raw_name, "Filter 1 Freq");
    }

    #[test]
    fn prefix_match_can_be_ambiguous() {
        let cache = sample();
        let hits = cache.find_prefix("filter 1");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn substring_match_finds_unique_hit() {
        let cache = sample();
        let hits = cache.find_substring("2 freq");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 2);
    }
}
