//! Case-insensitive prefix matching for user-typed names.

/// Result of resolving a typed prefix against a set of names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult<T> {
    /// Exactly one name matched.
    Unique(T),
    /// Several names share the prefix; all of them, in listing order.
    Ambiguous(Vec<String>),
    /// Nothing matched.
    NotFound,
}

/// Resolve `input` against `(name, value)` candidates.
///
/// Matching is case-insensitive. An exact match wins immediately, even
/// when it is also a prefix of other names, so "gold" picks Gold over
/// Golden.
pub fn resolve<'a, T, I>(input: &str, candidates: I) -> LookupResult<T>
where
    T: Copy,
    I: IntoIterator<Item = (&'a str, T)>,
{
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return LookupResult::NotFound;
    }

    let mut matches: Vec<(&str, T)> = Vec::new();
    for (name, value) in candidates {
        let lowered = name.to_lowercase();
        if lowered == needle {
            return LookupResult::Unique(value);
        }
        if lowered.starts_with(&needle) {
            matches.push((name, value));
        }
    }

    match matches.as_slice() {
        [] => LookupResult::NotFound,
        [(_, value)] => LookupResult::Unique(*value),
        _ => LookupResult::Ambiguous(
            matches.iter().map(|(name, _)| (*name).to_string()).collect(),
        ),
    }
}
