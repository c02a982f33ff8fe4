use crate::models::load::{Load, LoadKind};

pub const DEFAULT_WEIGHT_RANGE: (f64, f64) = (0.0, 30.0);
pub const DEFAULT_MIN_PRICE_PER_KM: f64 = 0.0;
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    #[default]
    All,
    Only(LoadKind),
}

impl KindFilter {
    /// Accepts `todas` (or an empty string) and the wire names of each kind.
    pub fn parse(s: &str) -> Option<KindFilter> {
        match s {
            "" | "todas" => Some(KindFilter::All),
            other => LoadKind::parse(other).map(KindFilter::Only),
        }
    }

    pub fn admits(&self, kind: LoadKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(only) => *only == kind,
        }
    }
}

/// Effective filter inputs, combined with logical AND.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub kind: KindFilter,
    pub weight_range: (f64, f64),
    pub min_price_per_km: f64,
    pub max_distance_km: f64,
    pub search: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            kind: KindFilter::All,
            weight_range: DEFAULT_WEIGHT_RANGE,
            min_price_per_km: DEFAULT_MIN_PRICE_PER_KM,
            max_distance_km: DEFAULT_MAX_DISTANCE_KM,
            search: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn matches(&self, load: &Load) -> bool {
        let (min_weight, max_weight) = self.weight_range;

        self.kind.admits(load.kind)
            && load.weight_tons >= min_weight
            && load.weight_tons <= max_weight
            && load.price_per_km() >= self.min_price_per_km
            && load.distance_km <= self.max_distance_km
            && self.matches_search(load)
    }

    fn matches_search(&self, load: &Load) -> bool {
        if self.search.is_empty() {
            return true;
        }
        load.touches_city(&self.search.to_lowercase())
    }
}

pub fn filter_loads<'a>(
    loads: &'a [Load],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a Load> + 'a {
    loads.iter().filter(move |load| criteria.matches(load))
}
