//! Verdicts and feature channels.

use std::fmt;

/// How the unseen-endpoint verdict is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenStyle {
    /// Byte-compatible with the reference outputs: the unseen case is
    /// written as `unverifed`.
    #[default]
    Reference,
    /// The unseen case is written as `unverified`, like any other
    /// non-trusted verdict.
    Normalized,
}

/// Per-feature outcome for one payment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// Auto-approve.
    Trusted,
    /// Hold for manual review.
    Unverified,
    /// Hold for manual review: an endpoint has no history.
    Unseen,
}

impl Verdict {
    /// Whether the request may be auto-approved.
    pub const fn is_trusted(self) -> bool {
        matches!(self, Verdict::Trusted)
    }

    /// Output token for this verdict.
    pub const fn as_token(self, style: TokenStyle) -> &'static str {
        match (self, style) {
            (Verdict::Trusted, _) => "trusted",
            (Verdict::Unverified, _) => "unverified",
            (Verdict::Unseen, TokenStyle::Reference) => "unverifed",
            (Verdict::Unseen, TokenStyle::Normalized) => "unverified",
        }
    }

    /// `Trusted` if `ok`, otherwise `Unverified`.
    pub const fn from_check(ok: bool) -> Self {
        if ok {
            Verdict::Trusted
        } else {
            Verdict::Unverified
        }
    }
}

/// One of the three independent trust predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Feature {
    /// Payer and payee have transacted before.
    DirectLink,
    /// Direct link, or payer and payee share a neighbor.
    SharedNeighbor,
    /// Payer and payee are connected within the hop bound.
    BoundedPath,
}

impl Feature {
    /// All features, in evaluation order.
    pub const ALL: [Feature; 3] = [Feature::DirectLink, Feature::SharedNeighbor, Feature::BoundedPath];

    /// 1-based feature number used in reports.
    pub const fn number(self) -> usize {
        self.slot() + 1
    }

    /// 0-based position in per-feature arrays.
    pub const fn slot(self) -> usize {
        match self {
            Feature::DirectLink => 0,
            Feature::SharedNeighbor => 1,
            Feature::BoundedPath => 2,
        }
    }

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Feature::DirectLink => "direct link",
            Feature::SharedNeighbor => "shared neighbor",
            Feature::BoundedPath => "bounded path",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feature {} ({})", self.number(), self.name())
    }
}

/// One verdict per feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verdicts(pub [Verdict; 3]);

impl Verdicts {
    /// The same verdict on every channel.
    pub const fn uniform(verdict: Verdict) -> Self {
        Self([verdict; 3])
    }

    /// Verdict for one feature.
    pub const fn get(&self, feature: Feature) -> Verdict {
        self.0[feature.slot()]
    }

    /// `(feature, verdict)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, Verdict)> + '_ {
        Feature::ALL.into_iter().zip(self.0.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_tokens_keep_unseen_spelling() {
        assert_eq!(Verdict::Trusted.as_token(TokenStyle::Reference), "trusted");
        assert_eq!(Verdict::Unverified.as_token(TokenStyle::Reference), "unverified");
        assert_eq!(Verdict::Unseen.as_token(TokenStyle::Reference), "unverifed");
    }

    #[test]
    fn normalized_tokens_merge_unseen() {
        assert_eq!(Verdict::Unseen.as_token(TokenStyle::Normalized), "unverified");
        assert_eq!(Verdict::Trusted.as_token(TokenStyle::Normalized), "trusted");
    }

    #[test]
    fn only_trusted_is_trusted() {
        assert!(Verdict::Trusted.is_trusted());
        assert!(!Verdict::Unverified.is_trusted());
        assert!(!Verdict::Unseen.is_trusted());
    }

    #[test]
    fn feature_numbering() {
        let numbers: Vec<usize> = Feature::ALL.iter().map(|f| f.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(Feature::BoundedPath.to_string(), "feature 3 (bounded path)");
    }

    #[test]
    fn verdicts_index_by_feature() {
        let v = Verdicts([Verdict::Unverified, Verdict::Trusted, Verdict::Trusted]);
        assert_eq!(v.get(Feature::DirectLink), Verdict::Unverified);
        assert_eq!(v.get(Feature::BoundedPath), Verdict::Trusted);
        assert_eq!(v.iter().count(), 3);
        assert_eq!(Verdicts::uniform(Verdict::Unseen).get(Feature::SharedNeighbor), Verdict::Unseen);
    }
}
