//! Paint kit records and their extraction from item data
//!
//! Extraction runs in two stages: every `paint_kits` entry is mapped on its
//! own ([`map_entry`]), then the collection extractor assigns indices and
//! rarities from the sibling `paint_kits_rarity` table.

mod extract;
mod mapper;
mod types;

pub use extract::{extract_paintkits, Extractor, PAINTKIT_TABLE_KEY, RARITY_TABLE_KEY};
pub use mapper::{map_entry, map_entry_with};
pub use types::{
    Defaults, Paintkit, PaintkitCollection, DEFAULT_PAINTKIT_ID, DEFAULT_RARITY,
    SENTINEL_DEFAULT_RARITY, WORKSHOP_DEFAULT_ID,
};
