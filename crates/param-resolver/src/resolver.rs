//! Ties the parameter cache, semantic aliases, and shadow state together
//! into the resolution order from §4.6.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;

use sysex_proto::ParameterEntry;

use crate::alias::SemanticAliasMap;
use crate::cache::ParameterCache;
use crate::error::ResolverError;
use crate::shadow::{ShadowEntry, ShadowState};

const MAX_HINT_NAMES: usize = 20;

pub enum ReadSource {
    Shadow,
    /// The shadow layer had nothing for this parameter; the value came
    /// straight from the host and may be stale (§9).
    LiveMaybeStale,
}

enum Lookup<'a> {
    Found(&'a ParameterEntry),
    Ambiguous(Vec<String>),
    Miss,
}

fn lookup<'a>(
    cache: &'a ParameterCache,
    aliases: &SemanticAliasMap,
    family: &str,
    query: &str,
) -> Lookup<'a> {
    let resolved_owned;
    let resolved_query = match aliases.resolve(family, query) {
        Some(target) => {
            resolved_owned = target.to_string();
            resolved_owned.as_str()
        }
        None => query,
    };

    if let Some(entry) = cache.find_exact(resolved_query) {
        return Lookup::Found(entry);
    }

    let ci_exact = cache.find_case_insensitive_exact(resolved_query);
    match ci_exact.len() {
        0 => {}
        1 => return Lookup::Found(ci_exact[0]),
        _ => return Lookup::Ambiguous(names(&ci_exact)),
    }

    let prefix = cache.find_prefix(resolved_query);
    match prefix.len() {
        0 => {}
        1 => return Lookup::Found(prefix[0]),
        _ => return Lookup::Ambiguous(names(&prefix)),
    }

    let substring = cache.find_substring(resolved_query);
    match substring.len() {
        0 => Lookup::Miss,
        1 => Lookup::Found(substring[0]),
        _ => Lookup::Ambiguous(names(&substring)),
    }
}

fn names(entries: &[&ParameterEntry]) -> Vec<String> {
    entries.iter().take(MAX_HINT_NAMES).map(|e| e.raw_name.clone()).collect()
}

/// Process-wide parameter resolution state: one cache per `(channel, slot)`,
/// a shared shadow layer, and the semantic alias table (§3 lifecycle —
/// created at startup, cleared at shutdown, survives MIDI reconnects).
pub struct Resolver {
    caches: Mutex<HashMap<(u8, u8), ParameterCache>>,
    shadow: ShadowState,
    aliases: SemanticAliasMap,
}

impl Resolver {
    pub fn new(aliases: SemanticAliasMap) -> Self {
        Self { caches: Mutex::new(HashMap::new()), shadow: ShadowState::new(), aliases }
    }

    /// Replace the cache for `(channel, slot)` with a fresh discovery
    /// result, and fold the discovered values into shadow state (never
    /// displacing a `user` entry).
    pub fn discover(&self, channel: u8, slot: u8, entries: Vec<ParameterEntry>) {
        for entry in &entries {
            self.shadow.record_discovered(channel, slot, entry.index, entry.value);
        }
        let cache = ParameterCache::build(entries);
        self.caches.lock().expect("resolver cache poisoned").insert((channel, slot), cache);
    }

    /// Resolve a user-supplied name to a parameter entry, following §4.6's
    /// five-tier order. `discover` is called at most once, to rediscover on
    /// a first miss (or when no cache yet exists for this plugin slot).
    pub async fn resolve_name<F, Fut>(
        &self,
        channel: u8,
        slot: u8,
        family: &str,
        query: &str,
        discover: F,
    ) -> Result<ParameterEntry, ResolverError>
    where
        F: FnOnce(u8, u8) -> Fut,
        Fut: Future<Output = Result<Vec<ParameterEntry>, String>>,
    {
        {
            let caches = self.caches.lock().expect("resolver cache poisoned");
            if let Some(cache) = caches.get(&(channel, slot)) {
                match lookup(cache, &self.aliases, family, query) {
                    Lookup::Found(entry) => return Ok(entry.clone()),
                    Lookup::Ambiguous(candidates) => return Err(ResolverError::Ambiguous(candidates)),
                    Lookup::Miss => {}
                }
            }
        }

        let entries = discover(channel, slot).await.map_err(ResolverError::Discovery)?;
        self.discover(channel, slot, entries);

        let caches = self.caches.lock().expect("resolver cache poisoned");
        let cache = caches.get(&(channel, slot)).expect("just inserted");
        match lookup(cache, &self.aliases, family, query) {
            Lookup::Found(entry) => Ok(entry.clone()),
            Lookup::Ambiguous(candidates) => Err(ResolverError::Ambiguous(candidates)),
            Lookup::Miss => Err(ResolverError::ParameterNotFound {
                name: query.to_string(),
                hint: names(&cache.entries().iter().collect::<Vec<_>>()),
            }),
        }
    }

    /// Record a successful write as `source=user`.
    pub fn record_write(&self, channel: u8, slot: u8, index: u32, value: f64) {
        self.shadow.record_user(channel, slot, index, value);
    }

    /// Prefer shadow state over a live host read; only calls `get_live` when
    /// shadow has nothing for this parameter (§4.6, §9).
    pub async fn read_value<F, Fut>(
        &self,
        channel: u8,
        slot: u8,
        index: u32,
        get_live: F,
    ) -> Result<(f64, ReadSource), ResolverError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<f64, String>>,
    {
        if let Some(ShadowEntry { value, .. }) = self.shadow.get(channel, slot, index) {
            return Ok((value, ReadSource::Shadow));
        }
        let value = get_live().await.map_err(ResolverError::Discovery)?;
        Ok((value, ReadSource::LiveMaybeStale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Vec<ParameterEntry> {
        vec![
            ParameterEntry { index: 0, raw_name: "Filter 1 Freq".into(), value: 0.5 },
            ParameterEntry { index: 1, raw_name: "Filter 1 Res".into(), value: 0.2 },
            ParameterEntry { index: 2, raw_name: "Filter 2 Freq".into(), value: 0.5 },
        ]
    }

    async fn rediscover(_c: u8, _s: u8) -> Result<Vec<ParameterEntry>, String> {
        Ok(params())
    }

    #[tokio::test]
    async fn unknown_query_is_parameter_not_found_after_one_retry() {
        let resolver = Resolver::new(SemanticAliasMap::new());
        let err = resolver.resolve_name(0, 0, "generic", "cutoff", rediscover).await.unwrap_err();
        assert!(matches!(err, ResolverError::ParameterNotFound { .. }));
    }

    #[tokio::test]
    async fn case_insensitive_exact_hit() {
        let resolver = Resolver::new(SemanticAliasMap::new());
        resolver.discover(0, 0, params());
        let entry = resolver
            .resolve_name(0, 0, "generic", "filter 1 freq", rediscover)
            .await
            .unwrap();
        assert_eq!(entry.index, 0);
    }

    #[tokio::test]
    async fn ambiguous_prefix_lists_candidates() {
        let resolver = Resolver::new(SemanticAliasMap::new());
        resolver.discover(0, 0, params());
        let err = resolver.resolve_name(0, 0, "generic", "Filter 1", rediscover).await.unwrap_err();
        match err {
            ResolverError::Ambiguous(candidates) => {
                assert_eq!(candidates.len(), 2);
            }
            other => panic!("expected Ambiguous, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn semantic_alias_short_circuits_fuzzy_match() {
        let aliases = SemanticAliasMap::from_pairs([("generic", "filter cutoff", "Filter 1 Freq")]);
        let resolver = Resolver::new(aliases);
        resolver.discover(0, 0, params());
        let entry = resolver
            .resolve_name(0, 0, "generic", "filter cutoff", rediscover)
            .await
            .unwrap();
        assert_eq!(entry.index, 0);
    }

    #[tokio::test]
    async fn shadow_state_wins_over_live_read() {
        let resolver = Resolver::new(SemanticAliasMap::new());
        resolver.record_write(0, 0, 0, 0.9);
        let (value, source) = resolver
            .read_value(0, 0, 0, || async { Ok::<f64, String>(0.1) })
            .await
            .unwrap();
        assert_eq!(value, 0.9);
        assert!(matches!(source, ReadSource::Shadow));
    }
}
