//! Keeps the marker layer, the list panel and the counters in step with the
//! latest filter result.
//!
//! [`synchronize`] always clears before it inserts, so after every call the
//! views show exactly the included set of the last filter pass and nothing
//! left over from earlier passes.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{FilterOutcome, GeoPoint, StatusBucket, ValidityClass};
use crate::store::{FeatureId, FeatureStore, Marker};

/// Shown as the only list item when nothing matches.
pub const NOT_FOUND_MESSAGE: &str = "Nenhum pedido encontrado para o filtro/busca selecionado.";

/// One interactive list entry.
///
/// Selecting it centers the map on `target` at
/// [`FOCUS_ZOOM`](crate::ui::map::FOCUS_ZOOM) and opens the callout for
/// `feature`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub feature: FeatureId,
    pub target: GeoPoint,
    /// Enterprise name or its placeholder.
    pub title: String,
    pub process: String,
    pub status: String,
    pub bucket: StatusBucket,
    /// Validity text or its placeholder.
    pub validity: String,
    /// Styles the validity line.
    pub validity_class: ValidityClass,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Entry(ListEntry),
    Placeholder(String),
}

/// The rendering collaborator driven by [`synchronize`].
pub trait ViewSurface {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: Marker);
    fn clear_list(&mut self);
    fn append_entry(&mut self, entry: ListEntry);
    fn append_placeholder(&mut self, message: &str);
    /// Updates one counter display.
    ///
    /// Returns `false` when the host has no display for `bucket`; the value is
    /// then dropped.
    fn set_counter(&mut self, bucket: StatusBucket, value: usize) -> bool;
}

/// Re-renders markers, list and counters from `outcome`.
///
/// `today` is the reference date for the validity classification.
pub fn synchronize<S>(store: &FeatureStore, outcome: &FilterOutcome, today: NaiveDate, surface: &mut S)
where
    S: ViewSurface + ?Sized,
{
    let _span = tracing::debug_span!("view_synchronize", included = outcome.included.len()).entered();

    surface.clear_markers();
    surface.clear_list();

    for feature in outcome.included.iter().filter_map(|id| store.get(*id)) {
        surface.add_marker(feature.marker);

        let record = &feature.record;
        surface.append_entry(ListEntry {
            feature: feature.marker.feature,
            target: record.position,
            title: record.enterprise_or_default().to_string(),
            process: record.process_or_default().to_string(),
            status: record.status_or_default().to_string(),
            bucket: feature.bucket,
            validity: record.validity_or_default().to_string(),
            validity_class: ValidityClass::classify(record.validity.as_deref(), today),
        });
    }

    if outcome.included.is_empty() {
        surface.append_placeholder(NOT_FOUND_MESSAGE);
    }

    for bucket in StatusBucket::COUNTED {
        if !surface.set_counter(bucket, outcome.counts.get(bucket)) {
            tracing::trace!(counter = bucket.key(), "counter not displayed");
        }
    }
}

/// In-memory [`ViewSurface`] read by the renderer.
#[derive(Debug, Clone, Default)]
pub struct ViewLayers {
    markers: Vec<Marker>,
    list: Vec<ListItem>,
    counters: BTreeMap<StatusBucket, usize>,
}

impl ViewLayers {
    /// Creates layers that display the given counters, all starting at zero.
    #[must_use]
    pub fn new(counters: &[StatusBucket]) -> Self {
        Self {
            markers: Vec::new(),
            list: Vec::new(),
            counters: counters.iter().map(|b| (*b, 0)).collect(),
        }
    }

    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    #[must_use]
    pub fn list(&self) -> &[ListItem] {
        &self.list
    }

    /// The entry at `index`, if that list item is an entry.
    #[must_use]
    pub fn entry(&self, index: usize) -> Option<&ListEntry> {
        match self.list.get(index)? {
            ListItem::Entry(entry) => Some(entry),
            ListItem::Placeholder(_) => None,
        }
    }

    /// List position of the entry for `feature`.
    #[must_use]
    pub fn position_of(&self, feature: FeatureId) -> Option<usize> {
        self.list
            .iter()
            .position(|item| matches!(item, ListItem::Entry(e) if e.feature == feature))
    }

    /// Displayed counters in display order.
    pub fn counters(&self) -> impl Iterator<Item = (StatusBucket, usize)> + '_ {
        self.counters.iter().map(|(b, v)| (*b, *v))
    }

    #[must_use]
    pub fn counter(&self, bucket: StatusBucket) -> Option<usize> {
        self.counters.get(&bucket).copied()
    }
}

impl ViewSurface for ViewLayers {
    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    fn clear_list(&mut self) {
        self.list.clear();
    }

    fn append_entry(&mut self, entry: ListEntry) {
        self.list.push(ListItem::Entry(entry));
    }

    fn append_placeholder(&mut self, message: &str) {
        self.list.push(ListItem::Placeholder(message.to_string()));
    }

    fn set_counter(&mut self, bucket: StatusBucket, value: usize) -> bool {
        match self.counters.get_mut(&bucket) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::{self, FilterCriteria};
    use crate::domain::{Record, StatusFilter, NOT_INFORMED};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn store() -> FeatureStore {
        let mut a = Record::at(GeoPoint::new(-16.68, -49.25));
        a.process = Some("000.123-4/2024".to_string());
        a.enterprise = Some("Posto Boa Vista".to_string());
        a.status = Some("Pendente de documentação".to_string());
        a.validity = Some("01/01/2020".to_string());

        let mut b = Record::at(GeoPoint::new(-16.70, -49.30));
        b.status = Some("Aprovado".to_string());
        b.validity = Some("20/03/2025".to_string());

        let c = Record::at(GeoPoint::new(-16.60, -49.20));

        FeatureStore::from_records(vec![a, b, c])
    }

    fn all_counters() -> ViewLayers {
        ViewLayers::new(&StatusBucket::COUNTED)
    }

    #[test]
    fn everything_without_criteria() {
        let store = store();
        let outcome = filter::apply(&FilterCriteria::default(), &store);
        let mut layers = all_counters();
        synchronize(&store, &outcome, today(), &mut layers);

        assert_eq!(layers.markers().len(), 3);
        assert_eq!(layers.list().len(), 3);
        assert!(layers.list().iter().all(|i| matches!(i, ListItem::Entry(_))));
        assert_eq!(layers.counter(StatusBucket::Pending), Some(1));
        assert_eq!(layers.counter(StatusBucket::Approved), Some(1));
    }

    #[test]
    fn entries_carry_placeholders_and_validity_class() {
        let store = store();
        let outcome = filter::apply(&FilterCriteria::default(), &store);
        let mut layers = all_counters();
        synchronize(&store, &outcome, today(), &mut layers);

        let first = layers.entry(0).unwrap();
        assert_eq!(first.title, "Posto Boa Vista");
        assert_eq!(first.validity_class, ValidityClass::Expired);

        let second = layers.entry(1).unwrap();
        assert_eq!(second.title, NOT_INFORMED);
        assert_eq!(second.validity_class, ValidityClass::NearExpiry);

        let third = layers.entry(2).unwrap();
        assert_eq!(third.validity_class, ValidityClass::NoData);
        assert_eq!(third.target, GeoPoint::new(-16.60, -49.20));
    }

    #[test]
    fn no_match_renders_one_placeholder_and_zero_counters() {
        let store = store();
        let criteria = FilterCriteria {
            enterprise_query: "inexistente".to_string(),
            ..FilterCriteria::default()
        };
        let outcome = filter::apply(&criteria, &store);
        let mut layers = all_counters();
        synchronize(&store, &outcome, today(), &mut layers);

        assert!(layers.markers().is_empty());
        assert_eq!(layers.list(), &[ListItem::Placeholder(NOT_FOUND_MESSAGE.to_string())]);
        assert!(layers.counters().all(|(_, v)| v == 0));
        assert_eq!(layers.counters().count(), 4);
    }

    #[test]
    fn repeated_syncs_do_not_accumulate() {
        let store = store();
        let mut layers = all_counters();

        let everything = filter::apply(&FilterCriteria::default(), &store);
        synchronize(&store, &everything, today(), &mut layers);
        synchronize(&store, &everything, today(), &mut layers);
        assert_eq!(layers.markers().len(), 3);

        let approved = FilterCriteria {
            status: StatusFilter::Only(StatusBucket::Approved),
            ..FilterCriteria::default()
        };
        let outcome = filter::apply(&approved, &store);
        synchronize(&store, &outcome, today(), &mut layers);

        assert_eq!(layers.markers().len(), 1);
        assert_eq!(layers.markers()[0].feature, FeatureId(1));
        assert_eq!(layers.list().len(), 1);
        assert_eq!(layers.counter(StatusBucket::Pending), Some(0));
        assert_eq!(layers.position_of(FeatureId(1)), Some(0));
        assert_eq!(layers.position_of(FeatureId(0)), None);
    }

    #[test]
    fn absent_counters_are_left_alone() {
        let store = store();
        let outcome = filter::apply(&FilterCriteria::default(), &store);
        let mut layers = ViewLayers::new(&[StatusBucket::Approved]);
        synchronize(&store, &outcome, today(), &mut layers);

        assert_eq!(layers.counter(StatusBucket::Approved), Some(1));
        assert_eq!(layers.counter(StatusBucket::Pending), None);
        assert_eq!(layers.counters().count(), 1);
    }
}
