//! The one worked semantic-alias family shipped by default (§4.7, SPEC_FULL
//! section C): a generic subtractive synth. Deployments with their own
//! plugins register additional families the same way.

use param_resolver::SemanticAliasMap;

pub const GENERIC_SYNTH: &str = "generic_synth";

pub fn default_aliases() -> SemanticAliasMap {
    SemanticAliasMap::from_pairs([
        (GENERIC_SYNTH, "filter cutoff", "Filter 1 Freq"),
        (GENERIC_SYNTH, "cutoff", "Filter 1 Freq"),
        (GENERIC_SYNTH, "resonance", "Filter 1 Res"),
        (GENERIC_SYNTH, "filter 2 cutoff", "Filter 2 Freq"),
        (GENERIC_SYNTH, "attack", "Amp Attack"),
        (GENERIC_SYNTH, "release", "Amp Release"),
        (GENERIC_SYNTH, "volume", "Master Vol"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ships_a_resolvable_cutoff_alias() {
        let aliases = default_aliases();
        assert_eq!(aliases.resolve(GENERIC_SYNTH, "Filter Cutoff"), Some("Filter 1 Freq"));
    }
}
