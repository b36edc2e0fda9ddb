//! Status classification shared by filtering, counting and drawing.
//!
//! Application statuses are free text ("Aprovado", "Em análise pela SEMAD",
//! "Pendente de documentação", ...). [`StatusBucket::classify`] is the one rule
//! that maps such text to a bucket; the status filter, the counters, the marker
//! colours and the legend all go through it.

use serde::{Deserialize, Serialize};

/// The status categories counted at the top of the screen.
///
/// `Unknown` collects statuses that match no category; it is never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusBucket {
    Approved,
    UnderReview,
    Pending,
    ToStart,
    Unknown,
}

impl StatusBucket {
    /// The four counted buckets, in counter display order.
    pub const COUNTED: [Self; 4] = [Self::Approved, Self::UnderReview, Self::Pending, Self::ToStart];

    /// Classifies free status text.
    ///
    /// Matching is substring based on the lowercased text and checked in a
    /// fixed order, first match wins: `aprov`, `em análise`/`em analise`,
    /// `iniciar`, `pendente`.
    ///
    /// # Examples
    ///
    /// ```
    /// use licensemap::domain::StatusBucket;
    ///
    /// assert_eq!(StatusBucket::classify(Some("Pendente de documentação")), StatusBucket::Pending);
    /// assert_eq!(StatusBucket::classify(Some("Aprovada com ressalvas")), StatusBucket::Approved);
    /// assert_eq!(StatusBucket::classify(None), StatusBucket::Unknown);
    /// ```
    #[must_use]
    pub fn classify(status: Option<&str>) -> Self {
        let Some(status) = status else {
            return Self::Unknown;
        };
        let lower = status.to_lowercase();

        if lower.contains("aprov") {
            Self::Approved
        } else if lower.contains("em análise") || lower.contains("em analise") {
            Self::UnderReview
        } else if lower.contains("iniciar") {
            Self::ToStart
        } else if lower.contains("pendente") {
            Self::Pending
        } else {
            Self::Unknown
        }
    }

    /// Short label used by the status selector and the counters.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Approved => "Aprovado",
            Self::UnderReview => "Em análise",
            Self::Pending => "Pendente",
            Self::ToStart => "A iniciar",
            Self::Unknown => "Outros",
        }
    }

    /// Long label used by the map legend.
    #[must_use]
    pub const fn legend_label(self) -> &'static str {
        match self {
            Self::Pending => "Pendente de documentação",
            other => other.label(),
        }
    }

    /// Stable key used in configuration (`counters = "aprovado,pendente"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Approved => "aprovado",
            Self::UnderReview => "em-analise",
            Self::Pending => "pendente",
            Self::ToStart => "a-iniciar",
            Self::Unknown => "outros",
        }
    }

    /// Parses a configuration key produced by [`StatusBucket::key`].
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::COUNTED
            .into_iter()
            .find(|bucket| bucket.key().eq_ignore_ascii_case(key.trim()))
    }
}

/// The status selector value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// "todos": no status restriction.
    #[default]
    All,
    /// Only records whose status falls in the given bucket.
    Only(StatusBucket),
}

impl StatusFilter {
    /// Selector options in cycling order.
    pub const OPTIONS: [Self; 5] = [
        Self::All,
        Self::Only(StatusBucket::Approved),
        Self::Only(StatusBucket::UnderReview),
        Self::Only(StatusBucket::Pending),
        Self::Only(StatusBucket::ToStart),
    ];

    /// Parses a selector value such as `"todos"` or `"Pendente"`.
    ///
    /// Values that classify to no bucket yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("todos") {
            return Some(Self::All);
        }
        match StatusBucket::classify(Some(value)) {
            StatusBucket::Unknown => None,
            bucket => Some(Self::Only(bucket)),
        }
    }

    /// Whether a record in `bucket` passes this filter.
    #[must_use]
    pub fn accepts(self, bucket: StatusBucket) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => selected == bucket,
        }
    }

    /// Next option in the selector, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = self.position();
        Self::OPTIONS[(idx + 1) % Self::OPTIONS.len()]
    }

    /// Previous option in the selector, wrapping around.
    #[must_use]
    pub fn previous(self) -> Self {
        let idx = self.position();
        Self::OPTIONS[(idx + Self::OPTIONS.len() - 1) % Self::OPTIONS.len()]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "Todos",
            Self::Only(bucket) => bucket.label(),
        }
    }

    fn position(self) -> usize {
        Self::OPTIONS.iter().position(|o| *o == self).unwrap_or(0)
    }
}
