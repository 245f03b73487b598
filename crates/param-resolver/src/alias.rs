//! Semantic alias layer (§4.7): a pure, many-to-one table from friendly
//! phrases to a plugin family's actual parameter names. No runtime
//! inference — unknown names pass through unchanged, which is what lets
//! the fuzzy resolver still catch novel phrasings.

use std::collections::HashMap;

#[derive(Default)]
pub struct SemanticAliasMap {
    aliases: HashMap<(String, String), String>,
}

impl SemanticAliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (&'static str, &'static str, &'static str)>) -> Self {
        let mut map = Self::new();
        for (family, human_name, raw_name) in pairs {
            map.insert(family, human_name, raw_name);
        }
        map
    }

    pub fn insert(&mut self, family: &str, human_name: &str, raw_name: &str) {
        self.aliases.insert((family.to_string(), human_name.to_lowercase()), raw_name.to_string());
    }

    /// O(1) lookup. Returns `None` on miss — callers fall through to the
    /// fuzzy resolver with the original query unchanged.
    pub fn resolve(&self, family: &str, human_name: &str) -> Option<&str> {
        self.aliases.get(&(family.to_string(), human_name.to_lowercase())).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_returns_raw_name() {
        let aliases = SemanticAliasMap::from_pairs([("generic_filter", "filter cutoff", "Filter 1 Freq")]);
        assert_eq!(aliases.resolve("generic_filter", "Filter Cutoff"), Some("Filter 1 Freq"));
    }

    #[test]
    fn miss_returns_none() {
        let aliases = SemanticAliasMap::new();
        assert_eq!(aliases.resolve("generic_filter", "resonance"), None);
    }
}
