use crate::labels;
use crate::model::Candidate;

/// Does the `(primary, secondary)` pair already appear in `existing`,
/// ignoring case and whitespace differences?
pub fn is_exact_duplicate<I, P, S>(primary: &str, secondary: &str, existing: I) -> bool
where
    I: IntoIterator<Item = (P, S)>,
    P: AsRef<str>,
    S: AsRef<str>,
{
    let key = (labels::normalize(primary), labels::normalize(secondary));
    existing.into_iter().any(|(p, s)| {
        labels::normalize(p.as_ref()) == key.0 && labels::normalize(s.as_ref()) == key.1
    })
}

/// The active candidate that the pair would duplicate, if any.
pub fn find_exact_duplicate<'a>(
    primary: &str,
    secondary: &str,
    candidates: &'a [Candidate],
) -> Option<&'a Candidate> {
    candidates
        .iter()
        .filter(|candidate| candidate.active)
        .find(|candidate| is_exact_duplicate(primary, secondary, [candidate.labels()]))
}
