// src/geo/price.rs

use regex::Regex;
use std::sync::LazyLock;

use crate::geo::model::{RentRange, UnitModel};

/// First run of digits, optionally grouped by thousands separators.
static PRICE_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:,\d+)*").expect("static regex"));

/// Representative studio price for a listing.
///
/// Two tiers: the range minimum, overridden by the label of the first
/// unit model whose details include exactly "studio". The override needs
/// both the model and a number in its label; otherwise the minimum stands
/// (which may itself be absent).
pub fn extract_price(rent: &RentRange, models: Option<&[UnitModel]>) -> Option<u64> {
    let fallback = rent.min.map(u64::from);

    let Some(model) = models.and_then(find_studio_model) else {
        return fallback;
    };

    model
        .rent_label
        .as_deref()
        .and_then(parse_price_label)
        .or(fallback)
}

pub fn find_studio_model(models: &[UnitModel]) -> Option<&UnitModel> {
    models
        .iter()
        .find(|m| m.details.iter().any(|d| is_studio_detail(d)))
}

/// Stricter than the listing-level studio test: the whole detail, trimmed.
pub fn is_studio_detail(detail: &str) -> bool {
    detail.trim().eq_ignore_ascii_case("studio")
}

/// "$1,950/mo" -> 1950. `None` when the label carries no number or the
/// number exceeds `u64::MAX`.
pub fn parse_price_label(label: &str) -> Option<u64> {
    let digits: String = PRICE_DIGITS
        .find(label)?
        .as_str()
        .chars()
        .filter(|c| *c != ',')
        .collect();

    digits.parse().ok()
}

/// "$1,500 - $2,200", or the single bound that exists.
pub fn format_price_range(rent: &RentRange) -> Option<String> {
    match (rent.min, rent.max) {
        (Some(min), Some(max)) if min != max => {
            Some(format!("{} - {}", format_dollars(min), format_dollars(max)))
        }
        (Some(v), _) | (None, Some(v)) => Some(format_dollars(v)),
        (None, None) => None,
    }
}

fn format_dollars(amount: u32) -> String {
    let raw = amount.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3 + 1);
    out.push('$');

    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
