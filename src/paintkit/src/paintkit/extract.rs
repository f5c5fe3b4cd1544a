//! Paint kit collection extraction from the item data tree

use super::mapper::map_entry_with;
use super::types::{
    Defaults, PaintkitCollection, DEFAULT_PAINTKIT_ID, SENTINEL_DEFAULT_RARITY,
    WORKSHOP_DEFAULT_ID,
};
use crate::access::get_typed;
use crate::language::LanguageResolver;
use crate::{Error, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Top-level key of the paint kit id → rarity id table
pub const RARITY_TABLE_KEY: &str = "paint_kits_rarity";

/// Top-level key of the index → paint kit entry table
pub const PAINTKIT_TABLE_KEY: &str = "paint_kits";

/// Extract every paint kit in `items` with the built-in [`Defaults`].
///
/// Any malformed entry fails the whole extraction.
pub fn extract_paintkits(
    items: &Map<String, Value>,
    language: &dyn LanguageResolver,
) -> Result<PaintkitCollection> {
    Extractor::new(language).extract(items)
}

/// Paint kit extraction bound to a language source
pub struct Extractor<'a> {
    language: &'a dyn LanguageResolver,
    defaults: Defaults,
}

impl<'a> Extractor<'a> {
    pub fn new(language: &'a dyn LanguageResolver) -> Self {
        Self {
            language,
            defaults: Defaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Build the paint kit collection from the `paint_kits` and
    /// `paint_kits_rarity` tables of `items`.
    pub fn extract(&self, items: &Map<String, Value>) -> Result<PaintkitCollection> {
        let rarities: &Map<String, Value> =
            get_typed(items, RARITY_TABLE_KEY).map_err(|source| {
                Error::SourceStructureMissing {
                    table: RARITY_TABLE_KEY,
                    source,
                }
            })?;

        let kits: &Map<String, Value> =
            get_typed(items, PAINTKIT_TABLE_KEY).map_err(|source| {
                Error::SourceStructureMissing {
                    table: PAINTKIT_TABLE_KEY,
                    source,
                }
            })?;

        // Keys like "01" and "1" collide after parsing. Map is already sorted
        // unless serde_json's `preserve_order` gets enabled by another crate in
        // the build, so sort explicitly to keep the surviving entry fixed.
        let mut entries: Vec<(&String, &Value)> = kits.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut collection = PaintkitCollection::new();

        for (key, value) in entries {
            let Value::Object(fields) = value else {
                return Err(Error::UnexpectedLayout { index: key.clone() });
            };

            let index: i64 = key.parse().map_err(|source| Error::MalformedIndex {
                index: key.clone(),
                source,
            })?;

            let mut kit = map_entry_with(fields, self.language, &self.defaults)?;

            if kit.id == WORKSHOP_DEFAULT_ID {
                debug!(index, "skipping workshop placeholder paint kit");
                continue;
            }

            if let Some(rarity) = rarities.get(&kit.id).and_then(Value::as_str) {
                kit.rarity_id = rarity.to_string();
            }

            if kit.id == DEFAULT_PAINTKIT_ID {
                kit.rarity_id = SENTINEL_DEFAULT_RARITY.to_string();
            }

            kit.index = index;
            if let Some(previous) = collection.insert(index, kit) {
                debug!(
                    index,
                    replaced = %previous.id,
                    "paint kit index appears more than once"
                );
            }
        }

        debug!(
            entries = kits.len(),
            rarities = rarities.len(),
            paintkits = collection.len(),
            "extracted paint kits"
        );

        Ok(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::AccessError;
    use crate::language::{LanguageError, LanguageTable};
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::str::FromStr;

    fn tree(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("fixture is not an object"),
        }
    }

    fn language() -> LanguageTable {
        [
            ("PaintKit_Default", "-"),
            ("PaintKit_cu_fade_Tag", "Fade"),
            ("PaintKit_aa_fade", "Aqua fade"),
        ]
        .into_iter()
        .collect()
    }

    fn items() -> Map<String, Value> {
        tree(json!({
            "paint_kits_rarity": {
                "cu_fade": "mythical",
                "aa_fade": "rare",
                "default": "legendary",
                "workshop_default": "ancient",
                "odd": 5
            },
            "paint_kits": {
                "0": { "name": "default", "description_tag": "#PaintKit_Default" },
                "9001": { "name": "workshop_default", "wear_remap_min": "0.0" },
                "38": {
                    "name": "cu_fade",
                    "description_tag": "#PaintKit_cu_fade_Tag",
                    "wear_remap_min": "0.1",
                    "wear_remap_max": "0.9"
                },
                "43": { "name": "aa_fade", "description_string": "#PaintKit_aa_fade" },
                "44": { "name": "sp_plain" },
                "45": { "name": "odd" }
            }
        }))
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_extract_collection() -> anyhow::Result<()> {
        let kits = extract_paintkits(&items(), &language())?;

        let indices: Vec<i64> = kits.keys().copied().collect();
        assert_eq!(indices, vec![0, 38, 43, 44, 45]);

        let fade = &kits[&38];
        assert_eq!(fade.id, "cu_fade");
        assert_eq!(fade.index, 38);
        assert_eq!(fade.name.as_deref(), Some("Fade"));
        assert_eq!(fade.rarity_id, "mythical");
        assert_eq!(fade.min_float, dec("0.1"));
        assert_eq!(fade.max_float, dec("0.9"));

        let aqua = &kits[&43];
        assert_eq!(aqua.description.as_deref(), Some("Aqua fade"));
        assert_eq!(aqua.rarity_id, "rare");
        assert_eq!(aqua.min_float, dec("0.06"));
        assert_eq!(aqua.max_float, dec("0.8"));
        Ok(())
    }

    #[test]
    fn test_extract_rarity_fallbacks() -> anyhow::Result<()> {
        let kits = extract_paintkits(&items(), &language())?;

        // absent from the rarity table
        assert_eq!(kits[&44].rarity_id, "common");
        // present but not a string
        assert_eq!(kits[&45].rarity_id, "common");
        Ok(())
    }

    #[test]
    fn test_extract_skips_workshop_default() -> anyhow::Result<()> {
        let kits = extract_paintkits(&items(), &language())?;

        assert!(!kits.contains_key(&9001));
        assert!(kits.values().all(|k| k.id != "workshop_default"));
        Ok(())
    }

    #[test]
    fn test_extract_default_rarity_overrides_table() -> anyhow::Result<()> {
        let kits = extract_paintkits(&items(), &language())?;
        assert_eq!(kits[&0].rarity_id, "default");

        let without_entry = tree(json!({
            "paint_kits_rarity": {},
            "paint_kits": { "0": { "name": "default" } }
        }));
        let kits = extract_paintkits(&without_entry, &language())?;
        assert_eq!(kits[&0].rarity_id, "default");
        Ok(())
    }

    #[test]
    fn test_extract_with_defaults() -> anyhow::Result<()> {
        let defaults = Defaults {
            rarity: "base".to_string(),
            min_float: dec("0"),
            max_float: dec("1"),
        };
        let language = language();
        let extractor = Extractor::new(&language).with_defaults(defaults);
        let kits = extractor.extract(&items())?;

        assert_eq!(kits[&44].rarity_id, "base");
        assert_eq!(kits[&44].min_float, dec("0"));
        assert_eq!(kits[&38].rarity_id, "mythical");
        assert_eq!(kits[&0].rarity_id, "default");
        Ok(())
    }

    #[test]
    fn test_extract_missing_paint_kits() {
        let items = tree(json!({ "paint_kits_rarity": { "cu_fade": "mythical" } }));

        let err = extract_paintkits(&items, &language()).unwrap_err();
        assert!(matches!(
            err,
            Error::SourceStructureMissing {
                table: "paint_kits",
                source: AccessError::Missing { .. }
            }
        ));
    }

    #[test]
    fn test_extract_missing_rarity_table() {
        let items = tree(json!({ "paint_kits": {} }));

        assert!(matches!(
            extract_paintkits(&items, &language()),
            Err(Error::SourceStructureMissing {
                table: "paint_kits_rarity",
                ..
            })
        ));
    }

    #[test]
    fn test_extract_mistyped_table() {
        let items = tree(json!({ "paint_kits_rarity": {}, "paint_kits": ["0"] }));

        let err = extract_paintkits(&items, &language()).unwrap_err();
        assert!(matches!(
            err,
            Error::SourceStructureMissing {
                table: "paint_kits",
                source: AccessError::TypeMismatch { found: "array", .. }
            }
        ));
    }

    #[test]
    fn test_extract_unexpected_layout() {
        let items = tree(json!({
            "paint_kits_rarity": {},
            "paint_kits": { "0": { "name": "default" }, "7": "cu_fade" }
        }));

        let err = extract_paintkits(&items, &language()).unwrap_err();
        assert!(matches!(err, Error::UnexpectedLayout { ref index } if index == "7"));
        assert!(err.to_string().contains("`7`"));
    }

    #[test]
    fn test_extract_malformed_index() {
        let items = tree(json!({
            "paint_kits_rarity": {},
            "paint_kits": { "0": { "name": "default" }, "seven": { "name": "cu_fade" } }
        }));

        let err = extract_paintkits(&items, &language()).unwrap_err();
        assert!(matches!(err, Error::MalformedIndex { ref index, .. } if index == "seven"));
    }

    #[test]
    fn test_extract_entry_error_propagates() {
        let items = tree(json!({
            "paint_kits_rarity": {},
            "paint_kits": {
                "0": { "name": "default" },
                "1": { "name": "bad", "wear_remap_min": "abc" }
            }
        }));

        assert!(matches!(
            extract_paintkits(&items, &language()),
            Err(Error::MalformedNumeric {
                field: "wear_remap_min",
                ..
            })
        ));
    }

    #[test]
    fn test_extract_missing_name_propagates() {
        let items = tree(json!({
            "paint_kits_rarity": {},
            "paint_kits": { "3": { "description_tag": "#PaintKit_cu_fade_Tag" } }
        }));

        assert!(matches!(
            extract_paintkits(&items, &language()),
            Err(Error::MissingField { field: "name" })
        ));
    }

    #[test]
    fn test_extract_language_error_unwrapped() {
        let items = tree(json!({
            "paint_kits_rarity": {},
            "paint_kits": { "3": { "name": "x", "description_tag": "#Nope" } }
        }));

        let err = extract_paintkits(&items, &language()).unwrap_err();
        assert!(matches!(
            err,
            Error::Language(LanguageError::NotFound { ref key }) if key == "#Nope"
        ));
    }

    #[test]
    fn test_extract_workshop_default_still_validated() {
        let items = tree(json!({
            "paint_kits_rarity": {},
            "paint_kits": { "1": { "name": "workshop_default", "wear_remap_max": "high" } }
        }));

        assert!(extract_paintkits(&items, &language()).is_err());
    }

    #[test]
    fn test_extract_duplicate_index_last_key_wins() -> anyhow::Result<()> {
        let items = tree(json!({
            "paint_kits_rarity": {},
            "paint_kits": {
                "1": { "name": "second" },
                "01": { "name": "first" }
            }
        }));

        let kits = extract_paintkits(&items, &language())?;
        assert_eq!(kits.len(), 1);
        assert_eq!(kits[&1].id, "second");
        assert_eq!(kits[&1].index, 1);
        Ok(())
    }

    #[test]
    fn test_extract_empty_tables() -> anyhow::Result<()> {
        let items = tree(json!({ "paint_kits_rarity": {}, "paint_kits": {} }));
        assert!(extract_paintkits(&items, &language())?.is_empty());
        Ok(())
    }
}
