use std::time::Instant;

use crate::engine::debounce::{Debounced, SEARCH_QUIET, SLIDER_QUIET};
use crate::engine::filter::{
    DEFAULT_MAX_DISTANCE_KM, DEFAULT_MIN_PRICE_PER_KM, DEFAULT_WEIGHT_RANGE, FilterCriteria,
    KindFilter, filter_loads,
};
use crate::engine::sort::{SortKey, sort_loads};
use crate::models::load::Load;

pub const PAGE_SIZE: usize = 20;
/// Distance from the end of the list, in pixels, at which scrolling asks for more.
pub const SCROLL_THRESHOLD_PX: f64 = 100.0;

/// Filter then stable-sort. The input is never mutated.
pub fn apply(loads: &[Load], criteria: &FilterCriteria, sort: SortKey) -> Vec<Load> {
    let mut kept: Vec<Load> = filter_loads(loads, criteria).cloned().collect();
    sort_loads(&mut kept, sort);
    kept
}

pub fn page(filtered: &[Load], visible_count: usize) -> &[Load] {
    &filtered[..visible_count.min(filtered.len())]
}

#[derive(Debug)]
struct Derived {
    revision: u64,
    criteria: FilterCriteria,
    sort: SortKey,
    loads: Vec<Load>,
}

/// Load list view state: filter inputs, sort key and the incremental page
/// cursor. The filtered list is rebuilt only when the load list, the
/// effective criteria or the sort key differ from the last build.
#[derive(Debug)]
pub struct LoadBrowser {
    loads: Vec<Load>,
    revision: u64,
    kind: KindFilter,
    weight_range: (f64, f64),
    search: Debounced<String>,
    min_price_per_km: Debounced<f64>,
    max_distance_km: Debounced<f64>,
    sort: SortKey,
    visible_count: usize,
    derived: Option<Derived>,
    rebuilds: u64,
}

impl Default for LoadBrowser {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl LoadBrowser {
    pub fn new(loads: Vec<Load>) -> Self {
        Self {
            loads,
            revision: 0,
            kind: KindFilter::All,
            weight_range: DEFAULT_WEIGHT_RANGE,
            search: Debounced::new(String::new(), SEARCH_QUIET),
            min_price_per_km: Debounced::new(DEFAULT_MIN_PRICE_PER_KM, SLIDER_QUIET),
            max_distance_km: Debounced::new(DEFAULT_MAX_DISTANCE_KM, SLIDER_QUIET),
            sort: SortKey::default(),
            visible_count: PAGE_SIZE,
            derived: None,
            rebuilds: 0,
        }
    }

    pub fn set_loads(&mut self, loads: Vec<Load>) {
        self.loads = loads;
        self.revision += 1;
    }

    pub fn loads(&self) -> &[Load] {
        &self.loads
    }

    pub fn set_kind(&mut self, kind: KindFilter) {
        if self.kind != kind {
            self.kind = kind;
            self.reset_page();
        }
    }

    pub fn set_weight_range(&mut self, min: f64, max: f64) {
        if self.weight_range != (min, max) {
            self.weight_range = (min, max);
            self.reset_page();
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>, now: Instant) {
        self.search.set(text.into(), now);
    }

    pub fn set_min_price_per_km(&mut self, value: f64, now: Instant) {
        self.min_price_per_km.set(value, now);
    }

    pub fn set_max_distance_km(&mut self, value: f64, now: Instant) {
        self.max_distance_km.set(value, now);
    }

    /// Sorting keeps the current page cursor.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Promotes debounced inputs whose quiet window has passed. Returns true
    /// if any effective filter changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let search = self.search.settle(now);
        let price = self.min_price_per_km.settle(now);
        let distance = self.max_distance_km.settle(now);

        let changed = search || price || distance;
        if changed {
            self.reset_page();
        }
        changed
    }

    /// Earliest instant at which [`tick`](Self::tick) can make progress.
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.search.deadline(),
            self.min_price_per_km.deadline(),
            self.max_distance_km.deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn reset_filters(&mut self) {
        let mut changed = self.kind != KindFilter::All || self.weight_range != DEFAULT_WEIGHT_RANGE;
        self.kind = KindFilter::All;
        self.weight_range = DEFAULT_WEIGHT_RANGE;
        changed |= self.search.force(String::new());
        changed |= self.min_price_per_km.force(DEFAULT_MIN_PRICE_PER_KM);
        changed |= self.max_distance_km.force(DEFAULT_MAX_DISTANCE_KM);

        if changed {
            self.reset_page();
        }
    }

    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            kind: self.kind,
            weight_range: self.weight_range,
            min_price_per_km: *self.min_price_per_km.value(),
            max_distance_km: *self.max_distance_km.value(),
            search: self.search.value().clone(),
        }
    }

    pub fn filtered(&mut self) -> &[Load] {
        let criteria = self.criteria();
        let stale = match &self.derived {
            Some(derived) => {
                derived.revision != self.revision
                    || derived.sort != self.sort
                    || derived.criteria != criteria
            }
            None => true,
        };

        if stale {
            let loads = apply(&self.loads, &criteria, self.sort);
            self.rebuilds += 1;
            self.derived = Some(Derived {
                revision: self.revision,
                criteria,
                sort: self.sort,
                loads,
            });
        }

        match &self.derived {
            Some(derived) => &derived.loads,
            None => &[],
        }
    }

    pub fn displayed(&mut self) -> &[Load] {
        let visible_count = self.visible_count;
        page(self.filtered(), visible_count)
    }

    pub fn total(&mut self) -> usize {
        self.filtered().len()
    }

    pub fn is_empty(&mut self) -> bool {
        self.filtered().is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn has_more(&mut self) -> bool {
        self.visible_count < self.total()
    }

    /// Grows the page by [`PAGE_SIZE`], clamped to the filtered length.
    pub fn load_more(&mut self) -> bool {
        let total = self.total();
        if self.visible_count >= total {
            return false;
        }
        self.visible_count = (self.visible_count + PAGE_SIZE).min(total);
        true
    }

    pub fn on_scroll(&mut self, scroll_top: f64, scroll_height: f64, client_height: f64) -> bool {
        if scroll_height - scroll_top <= client_height + SCROLL_THRESHOLD_PX {
            return self.load_more();
        }
        false
    }

    /// Number of times the filtered list has been rebuilt.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    fn reset_page(&mut self) {
        self.visible_count = PAGE_SIZE;
    }
}
