//! Project-specific utilities live here.

/// Case-insensitive equality under full Unicode case folding.
///
/// Folding expands characters such as `ß` to `ss`, which plain lowercasing
/// does not.
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    left == right || caseless::default_caseless_match_str(left, right)
}
