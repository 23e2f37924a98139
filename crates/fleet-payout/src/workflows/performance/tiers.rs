use serde::{Deserialize, Serialize};

/// Inclusive range; an absent bound is open on that side.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

/// What a matched tier pays out relative to the value it was matched on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum TierPayout {
    Percentage(f64),
    Fixed(f64),
}

impl TierPayout {
    pub fn apply(&self, base: f64) -> f64 {
        match self {
            TierPayout::Percentage(rate) => base * rate / 100.0,
            TierPayout::Fixed(amount) => *amount,
        }
    }
}

/// Ordered tier table resolved by first match.
///
/// Tiers are kept in declaration order and never sorted or checked for overlap; the first
/// tier whose bounds contain the value wins.
#[derive(Debug, Clone, PartialEq)]
pub struct TieredLookup<T> {
    tiers: Vec<(Bounds, T)>,
}

impl<T> Default for TieredLookup<T> {
    fn default() -> Self {
        Self { tiers: Vec::new() }
    }
}

impl<T> TieredLookup<T> {
    pub fn new(tiers: impl IntoIterator<Item = (Bounds, T)>) -> Self {
        Self {
            tiers: tiers.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Position and payload of the first tier containing `value`.
    pub fn first_match(&self, value: f64) -> Option<(usize, &T)> {
        self.tiers
            .iter()
            .enumerate()
            .find(|(_, (bounds, _))| bounds.contains(value))
            .map(|(index, (_, payload))| (index, payload))
    }
}

impl TieredLookup<TierPayout> {
    /// Payout for `value`, or zero when no tier matches.
    pub fn resolve(&self, value: f64) -> f64 {
        self.first_match(value)
            .map(|(_, payout)| payout.apply(value))
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive_and_open_when_absent() {
        let bounded = Bounds::new(Some(10.0), Some(20.0));
        assert!(bounded.contains(10.0));
        assert!(bounded.contains(20.0));
        assert!(!bounded.contains(9.99));
        assert!(!bounded.contains(20.01));

        assert!(Bounds::new(None, Some(5.0)).contains(-1_000.0));
        assert!(Bounds::new(Some(5.0), None).contains(1.0e12));
        assert!(Bounds::default().contains(0.0));
    }

    #[test]
    fn first_declared_match_wins_over_tighter_tiers() {
        let lookup = TieredLookup::new([
            (Bounds::new(Some(0.0), Some(100.0)), TierPayout::Fixed(1.0)),
            (Bounds::new(Some(40.0), Some(60.0)), TierPayout::Fixed(2.0)),
        ]);

        assert_eq!(lookup.first_match(50.0), Some((0, &TierPayout::Fixed(1.0))));
        assert_eq!(lookup.resolve(50.0), 1.0);
    }

    #[test]
    fn unmatched_values_resolve_to_zero() {
        let lookup = TieredLookup::new([(Bounds::new(Some(90.0), None), TierPayout::Fixed(250.0))]);

        assert_eq!(lookup.first_match(88.0), None);
        assert_eq!(lookup.resolve(88.0), 0.0);
    }

    #[test]
    fn empty_table_matches_nothing() {
        let lookup = TieredLookup::<TierPayout>::default();

        assert!(lookup.is_empty());
        assert_eq!(lookup.len(), 0);
        assert_eq!(lookup.resolve(10.0), 0.0);
    }

    #[test]
    fn percentage_payout_scales_the_base() {
        assert_eq!(TierPayout::Percentage(10.0).apply(5600.0), 560.0);
        assert_eq!(TierPayout::Fixed(3500.0).apply(5600.0), 3500.0);
    }
}
