//! Paint kit type definitions

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// Rarity assigned when the rarity table has nothing for a paint kit
pub const DEFAULT_RARITY: &str = "common";

/// Paint kit id that is always classified with [`SENTINEL_DEFAULT_RARITY`]
pub const DEFAULT_PAINTKIT_ID: &str = "default";

/// Rarity forced onto [`DEFAULT_PAINTKIT_ID`]
pub const SENTINEL_DEFAULT_RARITY: &str = "default";

/// Placeholder entry present in item data that is never a real paint kit
pub const WORKSHOP_DEFAULT_ID: &str = "workshop_default";

/// Paint kits keyed by their table index
pub type PaintkitCollection = BTreeMap<i64, Paintkit>;

/// Values a paint kit starts out with before source fields are applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Defaults {
    pub rarity: String,
    pub min_float: Decimal,
    pub max_float: Decimal,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            rarity: DEFAULT_RARITY.to_string(),
            min_float: Decimal::new(6, 2),
            max_float: Decimal::new(8, 1),
        }
    }
}

/// Appearance template of a skin and the wear range it can roll in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paintkit {
    /// Internal identifier (`name` field in item data)
    pub id: String,
    /// Key of the entry in the `paint_kits` table
    pub index: i64,
    /// Display name resolved from `description_tag`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description resolved from `description_string`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rarity_id: String,
    pub min_float: Decimal,
    pub max_float: Decimal,
}

impl Paintkit {
    /// Start a paint kit for `id` with every other field at its default
    pub fn new(id: impl Into<String>, defaults: &Defaults) -> Self {
        Self {
            id: id.into(),
            index: 0,
            name: None,
            description: None,
            rarity_id: defaults.rarity.clone(),
            min_float: defaults.min_float,
            max_float: defaults.max_float,
        }
    }

    pub fn wear_range(&self) -> RangeInclusive<Decimal> {
        self.min_float..=self.max_float
    }

    /// Whether an item using this paint kit can have wear `value`
    pub fn allows_float(&self, value: Decimal) -> bool {
        self.wear_range().contains(&value)
    }
}
