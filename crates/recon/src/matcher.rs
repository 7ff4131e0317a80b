use crate::config::ItemNaming;
use crate::model::Acceptance;

/// Parse a cell as a float. `None` means "not a number", which callers
/// treat as a non-match rather than an error. Accepts Rust float syntax
/// only: no `_` separators, ASCII digits only.
pub fn try_parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Map a response-table item code to its answer-key identifier.
///
/// Takes the text after the first `item_prefix` (up to any repeat of the
/// prefix), cuts it at the first `item_suffix`, upper-cases it and prepends
/// `key_prefix`: `crt_1_1_num` → `CRT_1_1`. Returns `None` when the code
/// does not contain the prefix at all.
pub fn key_item_for(item: &str, naming: &ItemNaming) -> Option<String> {
    let (_, rest) = item.split_once(naming.item_prefix.as_str())?;
    let rest = match rest.find(naming.item_prefix.as_str()) {
        Some(end) => &rest[..end],
        None => rest,
    };
    let stem = match rest.find(naming.item_suffix.as_str()) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(format!("{}{}", naming.key_prefix, stem.to_uppercase()))
}

/// Whether a raw response satisfies the key, by label or by numeric value.
pub fn matches_key(response: &str, acceptance: &Acceptance) -> bool {
    let resp = response.trim();
    if resp.is_empty() {
        return false;
    }

    if acceptance.accepts_label(&resp.to_lowercase()) {
        return true;
    }

    // Literal "nan" is how the upstream writer spells a missing value
    resp != "nan" && try_parse_number(resp).is_some_and(|n| acceptance.accepts_number(n))
}
