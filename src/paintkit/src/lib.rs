//! # paintkit
//!
//! Paint kit extraction from item data trees.
//!
//! Item data is a loosely-typed nested map. This crate reads its
//! `paint_kits` and `paint_kits_rarity` tables and produces validated
//! [`Paintkit`] records keyed by index, with display strings resolved
//! through a [`LanguageResolver`].
//!
//! ## Example
//!
//! ```
//! use paintkit::{extract_paintkits, LanguageTable};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let items = json!({
//!     "paint_kits_rarity": { "cu_fade": "mythical" },
//!     "paint_kits": {
//!         "38": { "name": "cu_fade", "description_tag": "#PaintKit_cu_fade_Tag" }
//!     }
//! });
//! let language: LanguageTable = [("PaintKit_cu_fade_Tag", "Fade")].into_iter().collect();
//!
//! let items = items.as_object().ok_or("items is not an object")?;
//! let kits = extract_paintkits(items, &language)?;
//!
//! assert_eq!(kits[&38].name.as_deref(), Some("Fade"));
//! assert_eq!(kits[&38].rarity_id, "mythical");
//! # Ok(())
//! # }
//! ```

pub mod access;
pub mod language;
pub mod paintkit;

#[doc(inline)]
pub use access::{get_typed, AccessError, FromValue};
#[doc(inline)]
pub use language::{LanguageError, LanguageResolver, LanguageTable};
#[doc(inline)]
pub use paintkit::{
    extract_paintkits, map_entry, map_entry_with, Defaults, Extractor, Paintkit,
    PaintkitCollection,
};

/// Errors from paint kit extraction
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("paint kit is missing required field `{field}`")]
    MissingField { field: &'static str },

    /// A wear bound that is not a plain decimal, or one outside what
    /// [`rust_decimal::Decimal`] can hold (28 significant digits), such
    /// as `"1e40"`. `source` is `None` when the text itself is malformed.
    #[error("paint kit has non-numeric or out-of-range `{field}` value {value:?}")]
    MalformedNumeric {
        field: &'static str,
        value: String,
        #[source]
        source: Option<rust_decimal::Error>,
    },

    #[error("unable to convert paint kit index `{index}` to an integer")]
    MalformedIndex {
        index: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("unexpected paint kit layout for index `{index}`")]
    UnexpectedLayout { index: String },

    #[error("unable to extract `{table}` from item data")]
    SourceStructureMissing {
        table: &'static str,
        #[source]
        source: AccessError,
    },

    #[error(transparent)]
    Language(#[from] LanguageError),
}

pub type Result<T> = std::result::Result<T, Error>;
