//! Static tool list for `ServerHandler::list_tools` (§2 "Tool surface", §6
//! RPC surface). Schemas are written by hand since there is no validated
//! input type per tool to derive them from — the handlers themselves are
//! the source of truth for what each field means.

use std::sync::Arc;

use rmcp::model::Tool;
use serde_json::{json, Value};

fn tool(name: &'static str, description: &'static str, schema: Value) -> Tool {
    let schema = schema.as_object().cloned().unwrap_or_default();
    Tool::new(name, description, Arc::new(schema))
}

pub fn all() -> Vec<Tool> {
    vec![
        tool(
            "discover_parameters",
            "List a loaded plugin's current parameter names, indices, and values.",
            json!({
                "type": "object",
                "properties": {
                    "channel": {"type": "integer", "minimum": 0, "maximum": 127},
                    "slot": {"type": "integer", "minimum": 0, "maximum": 127},
                },
                "required": ["channel", "slot"],
            }),
        ),
        tool(
            "set_parameter",
            "Set a plugin parameter by name, resolved via semantic alias then fuzzy match.",
            json!({
                "type": "object",
                "properties": {
                    "channel": {"type": "integer", "minimum": 0, "maximum": 127},
                    "slot": {"type": "integer", "minimum": 0, "maximum": 127},
                    "family": {"type": "string", "description": "plugin family for alias lookup"},
                    "name": {"type": "string"},
                    "value": {"type": "number", "minimum": 0.0, "maximum": 1.0},
                },
                "required": ["channel", "slot", "family", "name", "value"],
            }),
        ),
        tool(
            "get_parameter",
            "Read a plugin parameter by name, preferring shadow state over a live host read.",
            json!({
                "type": "object",
                "properties": {
                    "channel": {"type": "integer", "minimum": 0, "maximum": 127},
                    "slot": {"type": "integer", "minimum": 0, "maximum": 127},
                    "family": {"type": "string"},
                    "name": {"type": "string"},
                },
                "required": ["channel", "slot", "family", "name"],
            }),
        ),
        tool(
            "add_notes",
            "Stage notes for the piano-roll interpreter; returns a manual-trigger hint.",
            json!({
                "type": "object",
                "properties": {
                    "notes": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "midi": {"type": "integer", "minimum": 0, "maximum": 127},
                                "time": {"type": "number", "minimum": 0},
                                "duration": {"type": "number", "exclusiveMinimum": 0},
                                "velocity": {"type": "number", "minimum": 0, "maximum": 1},
                            },
                            "required": ["midi", "time", "duration", "velocity"],
                        },
                    },
                    "pattern": {"type": "integer"},
                    "channel": {"type": "integer"},
                },
                "required": ["notes"],
            }),
        ),
        tool(
            "clear_notes",
            "Stage a clear request for the piano-roll interpreter.",
            json!({
                "type": "object",
                "properties": {
                    "pattern": {"type": "integer"},
                    "channel": {"type": "integer"},
                },
            }),
        ),
        tool(
            "read_piano_roll_state",
            "Read back the state the piano-roll interpreter last wrote, if any.",
            json!({"type": "object", "properties": {}}),
        ),
        tool(
            "humanize_notes",
            "Apply swing, timing drift, velocity shaping, and length articulation to a note array.",
            json!({
                "type": "object",
                "properties": {
                    "notes": {"type": "array"},
                    "preset": {"type": "string", "enum": ["tight", "loose", "jazz", "lo-fi"]},
                    "seed": {"type": "string", "description": "replay a prior run's randomness"},
                    "swing_amount": {"type": "number", "minimum": 50, "maximum": 75},
                    "swing_grid": {"type": "number"},
                    "drift_theta": {"type": "number", "exclusiveMinimum": 0, "maximum": 1},
                    "drift_sigma": {"type": "number", "minimum": 0},
                    "drift_context_aware": {"type": "boolean"},
                    "instrument": {"type": "string", "enum": ["generic", "drums", "piano"]},
                    "velocity_variation_amount": {"type": "number"},
                    "velocity_downbeat_boost": {"type": "number"},
                    "length_amount": {"type": "number"},
                },
                "required": ["notes"],
            }),
        ),
        tool(
            "list_renders",
            "List audio files detected in the render directory this session.",
            json!({"type": "object", "properties": {}}),
        ),
        tool(
            "sample_pitch",
            "Pitch-shift a render or sample file by a number of semitones.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string", "description": "registry filename or path"},
                    "semitones": {"type": "number"},
                },
                "required": ["input", "semitones"],
            }),
        ),
        tool(
            "sample_widen",
            "Stereo-widen a render or sample file via pitch-split, optional micro-delay, merge, normalise.",
            json!({
                "type": "object",
                "properties": {
                    "input": {"type": "string"},
                    "semitones": {"type": "number"},
                    "micro_delay_ms": {"type": "number", "minimum": 0},
                },
                "required": ["input", "semitones"],
            }),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_every_tool_exactly_once() {
        let tools = all();
        assert_eq!(tools.len(), 10);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        for expected in [
            "discover_parameters",
            "set_parameter",
            "get_parameter",
            "add_notes",
            "clear_notes",
            "read_piano_roll_state",
            "humanize_notes",
            "list_renders",
            "sample_pitch",
            "sample_widen",
        ] {
            assert!(names.contains(&expected), "missing tool {expected:?}");
        }

        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len(), "duplicate tool name in {names:?}");
    }
}
