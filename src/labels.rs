//! Label normalisation shared by the duplicate checks.

/// Normalise a label for comparison: trim, case-fold, and collapse internal
/// runs of whitespace to a single space.
pub fn normalize(label: &str) -> String {
    label
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Is this label empty once normalised?
pub fn is_blank(label: &str) -> bool {
    label.trim().is_empty()
}
