//! Sound-bank category splitter.
//!
//! The sound catalog is one `category -> info` object. Writing it as a single
//! line would produce one huge record, so each category becomes its own line.
//! The composite-instrument category is split further: a header line with the
//! category metadata, then one line per instrument prefix holding only that
//! instrument's `name -> sample count` entries.

use crate::model::{
    AliasCategory, InstrumentHeader, InstrumentSounds, SoundCategory, SoundRecord,
};
use crate::normalize::{json_text, truthy_field};
use serde_json::{Map, Value};
use std::collections::HashMap;

pub const COMPOSITE_CATEGORY: &str = "drumMachines";
pub const ALIAS_CATEGORY: &str = "drumMachineAliases";

/// Sample count recorded for a sound with no explicit count.
const DEFAULT_SAMPLE_COUNT: u64 = 1;

/// Flatten the catalog's categories, preserving their document order.
pub fn split_categories(categories: &Map<String, Value>) -> Vec<SoundRecord> {
    let empty = Map::new();
    let mut records = Vec::new();

    for (cat, info) in categories {
        let info = info.as_object().unwrap_or(&empty);
        match cat.as_str() {
            COMPOSITE_CATEGORY => records.extend(split_instruments(cat, info)),
            ALIAS_CATEGORY => records.push(SoundRecord::Aliases(AliasCategory {
                cat: cat.clone(),
                desc: json_text(info.get("description")),
                alias_map: truthy_field(info, "aliasMap"),
                generated_names: truthy_field(info, "generatedNames"),
            })),
            _ => records.push(SoundRecord::Category(SoundCategory {
                cat: cat.clone(),
                desc: json_text(info.get("description")),
                names: truthy_field(info, "names"),
                aliases: truthy_field(info, "aliases"),
                sample_counts: truthy_field(info, "sampleCounts"),
                note_count: truthy_field(info, "noteCount"),
            })),
        }
    }

    records
}

/// Instrument prefix of a compound sound name: everything before the first `_`.
pub fn instrument_prefix(name: &str) -> &str {
    name.split_once('_').map_or(name, |(prefix, _)| prefix)
}

/// Header record followed by one record per instrument that has sounds.
///
/// Instruments are emitted in declared order; prefixes found in the name
/// list but missing from the declaration are appended in first-seen order,
/// so the per-instrument records always cover every name.
pub fn split_instruments(cat: &str, info: &Map<String, Value>) -> Vec<SoundRecord> {
    let empty = Map::new();
    let sample_counts = info
        .get("sampleCounts")
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let mut machines: Vec<String> = string_list(info.get("machines"));
    let mut grouped: HashMap<String, Map<String, Value>> = HashMap::new();
    for name in string_list(info.get("names")) {
        let prefix = instrument_prefix(&name).to_string();
        if !machines.contains(&prefix) {
            machines.push(prefix.clone());
        }
        let count = sample_counts
            .get(&name)
            .cloned()
            .unwrap_or_else(|| Value::from(DEFAULT_SAMPLE_COUNT));
        grouped.entry(prefix).or_default().insert(name, count);
    }

    let mut records = vec![SoundRecord::InstrumentHeader(InstrumentHeader {
        cat: cat.to_string(),
        desc: json_text(info.get("description")),
        machines: machines.clone(),
        suffixes: info
            .get("suffixes")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new())),
    })];

    for machine in machines {
        let Some(sounds) = grouped.remove(&machine) else {
            continue;
        };
        records.push(SoundRecord::Instrument(InstrumentSounds {
            cat: cat.to_string(),
            machine,
            sounds,
        }));
    }

    records
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_text_before_first_underscore() {
        assert_eq!(instrument_prefix("RolandTR808_bd"), "RolandTR808");
        assert_eq!(instrument_prefix("a_b_c"), "a");
        assert_eq!(instrument_prefix("plain"), "plain");
    }
}
