//! Index-expression parsing
//!
//! A selection expression is a whitespace-separated list of tokens, each
//! either a single index (`7`) or an inclusive hyphenated range (`100-200`,
//! reversed bounds tolerated). The parsed set is sorted and deduplicated.
//!
//! Malformed tokens are skipped, not rejected: selections are typed
//! interactively and a stray character should not void the rest of the
//! expression. Callers that want hard guarantees use [`parse_strict`].

use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use thiserror::Error;
use tracing::debug;

/// Error returned by [`parse_strict`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A token was neither an integer nor a valid range
    #[error("Malformed selection token: '{token}'")]
    MalformedToken { token: String },
}

/// Parse a selection expression into a set of record ids
///
/// Returns the empty set for an empty expression; callers treat an absent
/// expression as "no filter, select everything". Malformed tokens are
/// skipped silently.
pub fn parse(expression: &str) -> BTreeSet<i64> {
    let mut ids = BTreeSet::new();
    for token in expression.split_whitespace() {
        match parse_token(token) {
            Some(range) => ids.extend(range),
            None => debug!(token, "skipping malformed selection token"),
        }
    }
    ids
}

/// Parse a selection expression, rejecting the first malformed token
pub fn parse_strict(expression: &str) -> Result<BTreeSet<i64>, SelectionError> {
    let mut ids = BTreeSet::new();
    for token in expression.split_whitespace() {
        let range = parse_token(token).ok_or_else(|| SelectionError::MalformedToken {
            token: token.to_string(),
        })?;
        ids.extend(range);
    }
    Ok(ids)
}

/// Parse one token into the id range it contributes
///
/// A single index contributes a one-element range. Range bounds may be
/// reversed (`3-1` means `1-3`). Negative values never match: a leading
/// hyphen splits into an empty left side, which fails the integer parse.
fn parse_token(token: &str) -> Option<RangeInclusive<i64>> {
    if let Ok(value) = token.parse::<i64>() {
        return (value >= 0).then(|| value..=value);
    }

    let (low, high) = token.split_once('-')?;
    let low: i64 = low.parse().ok().filter(|v| *v >= 0)?;
    let high: i64 = high.parse().ok().filter(|v| *v >= 0)?;
    Some(low.min(high)..=low.max(high))
}
