//! Conversion of a single `paint_kits` entry into a [`Paintkit`]

use super::types::{Defaults, Paintkit};
use crate::access::get_typed;
use crate::language::LanguageResolver;
use crate::{Error, Result};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

const FIELD_ID: &str = "name";
const FIELD_NAME_TAG: &str = "description_tag";
const FIELD_DESCRIPTION_TAG: &str = "description_string";
const FIELD_MIN_FLOAT: &str = "wear_remap_min";
const FIELD_MAX_FLOAT: &str = "wear_remap_max";

/// Convert one paint kit entry using the built-in [`Defaults`].
///
/// The returned record has `index` 0 and the default rarity; both are
/// assigned by the collection extractor.
pub fn map_entry(
    fields: &Map<String, Value>,
    language: &dyn LanguageResolver,
) -> Result<Paintkit> {
    map_entry_with(fields, language, &Defaults::default())
}

/// Convert one paint kit entry, starting from `defaults`.
pub fn map_entry_with(
    fields: &Map<String, Value>,
    language: &dyn LanguageResolver,
    defaults: &Defaults,
) -> Result<Paintkit> {
    let id: &str =
        get_typed(fields, FIELD_ID).map_err(|_| Error::MissingField { field: FIELD_ID })?;
    if id.is_empty() {
        return Err(Error::MissingField { field: FIELD_ID });
    }

    let mut kit = Paintkit::new(id, defaults);

    kit.name = resolve_text(fields, FIELD_NAME_TAG, language)?;
    kit.description = resolve_text(fields, FIELD_DESCRIPTION_TAG, language)?;

    if let Some(value) = optional_str(fields, FIELD_MIN_FLOAT) {
        kit.min_float = parse_decimal(FIELD_MIN_FLOAT, value)?;
    }
    if let Some(value) = optional_str(fields, FIELD_MAX_FLOAT) {
        kit.max_float = parse_decimal(FIELD_MAX_FLOAT, value)?;
    }

    Ok(kit)
}

/// A string field, or `None` if absent or holding something else
fn optional_str<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    get_typed(fields, key).ok()
}

/// Resolve a language token field. Empty translations count as absent.
fn resolve_text(
    fields: &Map<String, Value>,
    key: &str,
    language: &dyn LanguageResolver,
) -> Result<Option<String>> {
    let Some(token) = optional_str(fields, key) else {
        return Ok(None);
    };

    let text = language.lookup(token)?;
    Ok((!text.is_empty()).then_some(text))
}

/// Parse a wear bound written as `[+-]digits[.digits][e[+-]digits]`.
///
/// The grammar is checked up front because `Decimal::from_str` also takes
/// `_` digit separators.
fn parse_decimal(field: &'static str, value: &str) -> Result<Decimal> {
    let malformed = |source| Error::MalformedNumeric {
        field,
        value: value.to_string(),
        source,
    };

    if !is_plain_decimal(value) {
        return Err(malformed(None));
    }

    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|e| malformed(Some(e)))
}

fn is_plain_decimal(value: &str) -> bool {
    fn digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }

    fn unsigned(s: &str) -> &str {
        s.strip_prefix(['+', '-']).unwrap_or(s)
    }

    let (mantissa, exponent) = match value.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (value, None),
    };

    let mantissa_ok = match unsigned(mantissa).split_once('.') {
        Some((int, frac)) => {
            (int.is_empty() || digits(int))
                && (frac.is_empty() || digits(frac))
                && !(int.is_empty() && frac.is_empty())
        }
        None => digits(unsigned(mantissa)),
    };

    mantissa_ok && exponent.map_or(true, |e| digits(unsigned(e)))
}
