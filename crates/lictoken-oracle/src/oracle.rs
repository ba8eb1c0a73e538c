//! The oracle capability.

use async_trait::async_trait;

/// Outcome of asking one oracle about one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The oracle published the token's fingerprint.
    Verified,
    /// The oracle answered, but none of its records matched.
    Unverified,
    /// The oracle could not be reached.
    Unknown,
}

impl Verdict {
    /// Whether this verdict vouches for the token.
    pub fn is_verified(self) -> bool {
        self == Verdict::Verified
    }
}

/// An out-of-band source that can vouch for a token's continued validity.
///
/// Implementations must be thread-safe (Send + Sync) and must not fail:
/// transport problems are reported as [`Verdict::Unknown`].
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Short channel name for logs.
    fn name(&self) -> &str;

    /// Ask whether `fingerprint` is currently published for token `id`.
    async fn check(&self, id: &str, fingerprint: &str) -> Verdict;
}

/// Compare published records against a fingerprint.
///
/// Records are trimmed of surrounding whitespace; the match is exact and
/// case-sensitive.
pub(crate) fn matches_fingerprint<'a, I>(records: I, fingerprint: &str) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    records.into_iter().any(|record| record.trim() == fingerprint)
}
