/// Derive the list/title name of a track from its symbolic name.
///
/// Underscores become spaces and the first character is upper-cased; the rest
/// is kept as-is, so `"track_one"` becomes `"Track one"`.
pub fn display_name(symbolic: &str) -> String {
    let spaced = symbolic.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => std::iter::once(upper_first(first)).chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-case a single character, keeping it as-is when its upper-case form
/// is more than one character (`ß` stays `ß`, not `SS`).
fn upper_first(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}
