//! Filter evaluation over the loaded features.
//!
//! [`apply`] is a single linear pass: it keeps load order, tests every active
//! criterion, and counts the included records per [`StatusBucket`].

use super::status::{StatusBucket, StatusFilter};
use super::text::normalize;
use crate::store::{FeatureId, FeatureStore};

/// The current state of the three filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Status selector value.
    pub status: StatusFilter,
    /// Raw text of the process search box.
    pub process_query: String,
    /// Raw text of the enterprise search box.
    pub enterprise_query: String,
}

impl FilterCriteria {
    /// Whether any criterion restricts the result.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status != StatusFilter::All
            || !normalize(&self.process_query).is_empty()
            || !normalize(&self.enterprise_query).is_empty()
    }
}

/// Included-record counts per counted bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketCounts {
    pub approved: usize,
    pub under_review: usize,
    pub pending: usize,
    pub to_start: usize,
}

impl BucketCounts {
    /// Adds one record of `bucket`; `Unknown` is not counted.
    pub fn record(&mut self, bucket: StatusBucket) {
        match bucket {
            StatusBucket::Approved => self.approved += 1,
            StatusBucket::UnderReview => self.under_review += 1,
            StatusBucket::Pending => self.pending += 1,
            StatusBucket::ToStart => self.to_start += 1,
            StatusBucket::Unknown => {}
        }
    }

    #[must_use]
    pub const fn get(&self, bucket: StatusBucket) -> usize {
        match bucket {
            StatusBucket::Approved => self.approved,
            StatusBucket::UnderReview => self.under_review,
            StatusBucket::Pending => self.pending,
            StatusBucket::ToStart => self.to_start,
            StatusBucket::Unknown => 0,
        }
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.approved + self.under_review + self.pending + self.to_start
    }
}

/// Result of one filter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Included features, in load order.
    pub included: Vec<FeatureId>,
    pub counts: BucketCounts,
}

/// Evaluates `criteria` against every feature of `store`.
///
/// # Examples
///
/// ```
/// use licensemap::domain::{filter, FilterCriteria, GeoPoint, Record};
/// use licensemap::store::FeatureStore;
///
/// let mut record = Record::at(GeoPoint::new(-16.68, -49.25));
/// record.process = Some("000.123-4/2024".to_string());
/// record.status = Some("Pendente de documentação".to_string());
/// let store = FeatureStore::from_records(vec![record]);
///
/// let criteria = FilterCriteria {
///     status: licensemap::domain::StatusFilter::parse("Pendente").unwrap(),
///     process_query: "123".to_string(),
///     ..FilterCriteria::default()
/// };
/// let outcome = filter::apply(&criteria, &store);
/// assert_eq!(outcome.included.len(), 1);
/// assert_eq!(outcome.counts.pending, 1);
/// ```
#[must_use]
pub fn apply(criteria: &FilterCriteria, store: &FeatureStore) -> FilterOutcome {
    let _span = tracing::debug_span!(
        "filter_apply",
        total_features = store.len(),
        status = ?criteria.status,
        process_query_len = criteria.process_query.len(),
        enterprise_query_len = criteria.enterprise_query.len()
    )
    .entered();

    let process_term = normalize(criteria.process_query.trim());
    let enterprise_term = normalize(criteria.enterprise_query.trim());

    let mut outcome = FilterOutcome::default();

    for (id, feature) in store.iter() {
        if !criteria.status.accepts(feature.bucket) {
            continue;
        }
        if !process_term.is_empty() && !feature.process_key.contains(&process_term) {
            continue;
        }
        if !enterprise_term.is_empty() && !feature.enterprise_key.contains(&enterprise_term) {
            continue;
        }

        outcome.counts.record(feature.bucket);
        outcome.included.push(id);
    }

    tracing::debug!(
        included = outcome.included.len(),
        counted = outcome.counts.total(),
        "filter applied"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{GeoPoint, Record};
    use crate::domain::text::normalize_opt;
    use proptest::prelude::*;

    fn record(process: &str, enterprise: &str, status: &str) -> Record {
        let mut r = Record::at(GeoPoint::new(-16.68, -49.25));
        r.process = Some(process.to_string()).filter(|s| !s.is_empty());
        r.enterprise = Some(enterprise.to_string()).filter(|s| !s.is_empty());
        r.status = Some(status.to_string()).filter(|s| !s.is_empty());
        r
    }

    fn sample_store() -> FeatureStore {
        FeatureStore::from_records(vec![
            record("000.123-4/2024", "Posto Boa Vista", "Pendente de documentação"),
            record("555.001-0/2023", "Construtora Água Limpa", "Aprovado"),
            record("777.888-1/2024", "Mineradora Serra", "Em análise"),
            record("123.999-2/2022", "Cerâmica Goiás", "A iniciar"),
            record("", "", "Arquivado"),
        ])
    }

    #[test]
    fn everything_when_no_criteria() {
        let store = sample_store();
        let outcome = apply(&FilterCriteria::default(), &store);
        assert_eq!(outcome.included, (0..5).map(FeatureId).collect::<Vec<_>>());
        assert_eq!(
            outcome.counts,
            BucketCounts { approved: 1, under_review: 1, pending: 1, to_start: 1 }
        );
    }

    #[test]
    fn pending_with_process_search() {
        let store = sample_store();
        let criteria = FilterCriteria {
            status: StatusFilter::parse("Pendente").unwrap(),
            process_query: "123".to_string(),
            enterprise_query: String::new(),
        };
        let outcome = apply(&criteria, &store);
        assert_eq!(outcome.included, vec![FeatureId(0)]);
        assert_eq!(outcome.counts.pending, 1);
        assert_eq!(outcome.counts.total(), 1);
    }

    #[test]
    fn process_search_ignores_punctuation_in_query() {
        let store = sample_store();
        let criteria = FilterCriteria {
            process_query: " 555.001-0 ".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(apply(&criteria, &store).included, vec![FeatureId(1)]);
    }

    #[test]
    fn enterprise_search_is_case_insensitive_and_keeps_order() {
        let store = sample_store();
        let criteria = FilterCriteria {
            enterprise_query: "A".to_string(),
            ..FilterCriteria::default()
        };
        // the record without an enterprise name never matches a non-empty term
        assert_eq!(
            apply(&criteria, &store).included,
            vec![FeatureId(0), FeatureId(1), FeatureId(2), FeatureId(3)]
        );
    }

    #[test]
    fn nothing_matches() {
        let store = sample_store();
        let criteria = FilterCriteria {
            enterprise_query: "inexistente".to_string(),
            ..FilterCriteria::default()
        };
        let outcome = apply(&criteria, &store);
        assert!(outcome.included.is_empty());
        assert_eq!(outcome.counts, BucketCounts::default());
    }

    #[test]
    fn unknown_statuses_are_included_but_not_counted() {
        let store = sample_store();
        let criteria = FilterCriteria {
            enterprise_query: String::new(),
            process_query: String::new(),
            status: StatusFilter::All,
        };
        let outcome = apply(&criteria, &store);
        assert!(outcome.included.contains(&FeatureId(4)));
        assert!(outcome.counts.total() < outcome.included.len());
    }

    #[test]
    fn criteria_activity() {
        assert!(!FilterCriteria::default().is_active());
        let criteria = FilterCriteria {
            process_query: " -./ ".to_string(),
            ..FilterCriteria::default()
        };
        assert!(!criteria.is_active());
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        (
            "[0-9.\\-/]{0,12}",
            "[A-Za-z ]{0,12}",
            prop_oneof![
                Just("Aprovado"),
                Just("Em análise"),
                Just("Pendente de documentação"),
                Just("A iniciar"),
                Just("Arquivado"),
                Just(""),
            ],
        )
            .prop_map(|(p, e, s)| record(&p, &e, s))
    }

    fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
        (
            prop::sample::select(StatusFilter::OPTIONS.to_vec()),
            "[0-9.\\-]{0,3}",
            "[a-z ]{0,2}",
        )
            .prop_map(|(status, process_query, enterprise_query)| FilterCriteria {
                status,
                process_query,
                enterprise_query,
            })
    }

    proptest! {
        #[test]
        fn included_records_satisfy_every_criterion(
            records in prop::collection::vec(arb_record(), 0..20),
            criteria in arb_criteria(),
        ) {
            let store = FeatureStore::from_records(records.clone());
            let outcome = apply(&criteria, &store);

            prop_assert!(outcome.counts.total() <= outcome.included.len());
            prop_assert!(outcome.included.windows(2).all(|w| w[0] < w[1]));

            let process_term = normalize(&criteria.process_query);
            let enterprise_term = normalize(&criteria.enterprise_query);
            for (idx, r) in records.iter().enumerate() {
                let expected = criteria.status.accepts(r.bucket())
                    && normalize_opt(r.process.as_deref()).contains(&process_term)
                    && normalize_opt(r.enterprise.as_deref()).contains(&enterprise_term);
                prop_assert_eq!(outcome.included.contains(&FeatureId(idx)), expected);
            }
        }
    }
}
