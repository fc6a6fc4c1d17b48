//! # Reward Resolver
//!
//! **Repeated cumulative-weight draws over one trigger's reward list.**
//!
//! One resolution performs `N` independent draws, `N` sampled uniformly from
//! the caller's tries range. Each draw:
//!
//! 1. Sums the rarity weight of every entry. A zero total yields nothing.
//! 2. Rolls `r` in `[0, total)` and walks the entries in table order; the
//!    first entry whose cumulative weight exceeds `r` is selected.
//! 3. Rolls an amount in the entry's inclusive range. An amount `<= 0`
//!    (including every degenerate range) yields nothing.
//!
//! ```text
//! weights:   Common=90            Rare=10
//! entries:   [ x (Common) ........ | y (Rare) .. ]
//!            0                    90           100
//!                       r = 93 ──────────┘ selects y
//! ```
//!
//! Draws are with replacement: the same entry may be selected many times.
//! Nothing here can fail; misconfiguration degrades to fewer grants.

use std::collections::HashMap;

use crate::grant::{GrantSink, GrantSummary, RewardGrant};
use crate::random::RandomSource;
use crate::rarity::{RarityTier, RarityWeightMap};
use crate::table::RewardDefinition;

/// Inclusive bounds on the number of draws for one unwrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TriesRange {
    /// Minimum number of draws.
    pub min: u32,
    /// Maximum number of draws.
    pub max: u32,
}

impl TriesRange {
    /// Creates a new range.
    #[inline]
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// Always exactly `tries` draws.
    #[inline]
    #[must_use]
    pub const fn fixed(tries: u32) -> Self {
        Self::new(tries, tries)
    }

    /// Returns true if `min > max`. A reversed range performs no draws.
    #[inline]
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        self.min > self.max
    }
}

/// Stateless reward resolver.
///
/// Holds no table, no weights and no generator: everything is passed per
/// call, so one resolver can serve any number of threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct RewardResolver;

impl RewardResolver {
    /// Creates a resolver.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Samples the number of draws from `tries`.
    pub fn draw_count<R: RandomSource + ?Sized>(&self, tries: TriesRange, rng: &mut R) -> u32 {
        if tries.is_reversed() {
            return 0;
        }
        if tries.min == tries.max {
            return tries.min;
        }
        let count = rng.range_inclusive(i64::from(tries.min), i64::from(tries.max));
        u32::try_from(count).unwrap_or(tries.min)
    }

    /// Sum of the rarity weights of all entries.
    #[must_use]
    pub fn total_weight(&self, rewards: &[RewardDefinition], weights: &RarityWeightMap) -> u64 {
        rewards
            .iter()
            .map(|entry| u64::from(weights.weight(entry.rarity)))
            .sum()
    }

    /// Selects one entry by rarity weight, or `None` if the total weight is 0.
    pub fn select<'a, R: RandomSource + ?Sized>(
        &self,
        rewards: &'a [RewardDefinition],
        weights: &RarityWeightMap,
        rng: &mut R,
    ) -> Option<&'a RewardDefinition> {
        self.select_index(rewards, weights, rng).map(|index| &rewards[index])
    }

    /// Position of the selected entry within `rewards`.
    fn select_index<R: RandomSource + ?Sized>(
        &self,
        rewards: &[RewardDefinition],
        weights: &RarityWeightMap,
        rng: &mut R,
    ) -> Option<usize> {
        let total_weight = self.total_weight(rewards, weights);
        if total_weight == 0 {
            return None;
        }

        let roll = rng.below(total_weight);
        let mut cumulative = 0u64;

        for (index, entry) in rewards.iter().enumerate() {
            cumulative += u64::from(weights.weight(entry.rarity));
            if roll < cumulative {
                return Some(index);
            }
        }

        None
    }

    /// Rolls the amount for `entry`, or `None` if it comes out `<= 0`.
    pub fn roll_quantity<R: RandomSource + ?Sized>(&self, entry: &RewardDefinition, rng: &mut R) -> Option<u32> {
        let range = entry.quantity;
        if range.min > range.max {
            return None;
        }

        let amount = if range.min == range.max {
            i64::from(range.min)
        } else {
            rng.range_inclusive(i64::from(range.min), i64::from(range.max))
        };

        if amount <= 0 {
            return None;
        }
        u32::try_from(amount).ok()
    }

    /// Performs one draw: selection followed by an amount roll.
    pub fn draw<R: RandomSource + ?Sized>(
        &self,
        rewards: &[RewardDefinition],
        weights: &RarityWeightMap,
        rng: &mut R,
    ) -> Option<RewardGrant> {
        let entry = self.select(rewards, weights, rng)?;
        let quantity = self.roll_quantity(entry, rng)?;

        Some(RewardGrant {
            item_key: entry.item_key.clone(),
            display_name: entry.display_name.clone(),
            variant_id: entry.variant_id,
            quantity,
        })
    }

    /// Resolves one unwrap into its grants, in draw order.
    ///
    /// The result holds at most as many grants as draws were sampled.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        rewards: &[RewardDefinition],
        weights: &RarityWeightMap,
        tries: TriesRange,
        rng: &mut R,
    ) -> Vec<RewardGrant> {
        let mut grants = Vec::new();
        self.resolve_into(rewards, weights, tries, rng, &mut grants);
        grants
    }

    /// Resolves one unwrap, handing each grant to `sink` as it is drawn.
    pub fn resolve_into<R, S>(
        &self,
        rewards: &[RewardDefinition],
        weights: &RarityWeightMap,
        tries: TriesRange,
        rng: &mut R,
        sink: &mut S,
    ) -> GrantSummary
    where
        R: RandomSource + ?Sized,
        S: GrantSink + ?Sized,
    {
        let mut summary = GrantSummary {
            draws: self.draw_count(tries, rng),
            ..GrantSummary::default()
        };

        for _ in 0..summary.draws {
            if let Some(grant) = self.draw(rewards, weights, rng) {
                summary.record(sink.grant(&grant));
            }
        }

        summary
    }

    /// Runs `draws` independent draws and tallies what came out.
    ///
    /// Selections are counted separately from grants, so entries with a
    /// degenerate amount range still show up in the selection histogram.
    pub fn simulate<R: RandomSource + ?Sized>(
        &self,
        rewards: &[RewardDefinition],
        weights: &RarityWeightMap,
        draws: u32,
        rng: &mut R,
    ) -> RewardStatistics {
        let mut stats = RewardStatistics {
            selections: vec![0; rewards.len()],
            ..RewardStatistics::default()
        };

        for _ in 0..draws {
            stats.total_draws += 1;

            let Some(index) = self.select_index(rewards, weights, rng) else {
                continue;
            };
            let entry = &rewards[index];
            stats.selections[index] += 1;
            *stats.rarity_counts.entry(entry.rarity).or_insert(0) += 1;

            if let Some(quantity) = self.roll_quantity(entry, rng) {
                stats.total_grants += 1;
                *stats.item_quantities.entry(entry.item_key.clone()).or_insert(0) += u64::from(quantity);
            }
        }

        stats
    }
}

/// Statistics from reward simulation.
#[derive(Clone, Debug, Default)]
pub struct RewardStatistics {
    /// Total number of draws performed.
    pub total_draws: u64,
    /// Draws that produced a grant.
    pub total_grants: u64,
    /// Selection count per entry, aligned with the simulated reward list.
    pub selections: Vec<u64>,
    /// Selection count per rarity tier.
    pub rarity_counts: HashMap<RarityTier, u64>,
    /// Total granted amount per item key.
    pub item_quantities: HashMap<String, u64>,
}

impl RewardStatistics {
    /// Fraction of draws that selected entry `index`.
    #[must_use]
    pub fn selection_rate(&self, index: usize) -> f64 {
        if self.total_draws == 0 {
            return 0.0;
        }
        let selected = self.selections.get(index).copied().unwrap_or(0);
        selected as f64 / self.total_draws as f64
    }

    /// Returns the grant rate as a percentage.
    #[must_use]
    pub fn grant_rate_percent(&self) -> f64 {
        if self.total_draws == 0 {
            0.0
        } else {
            (self.total_grants as f64 / self.total_draws as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::seeded_rng;
    use crate::table::QuantityRange;

    /// Replays a fixed script of values, clamped into the requested range.
    struct Scripted(std::vec::IntoIter<i64>);

    impl Scripted {
        fn new(values: &[i64]) -> Self {
            Self(values.to_vec().into_iter())
        }
    }

    impl RandomSource for Scripted {
        fn range_inclusive(&mut self, low: i64, high: i64) -> i64 {
            self.0.next().unwrap_or(low).clamp(low, high)
        }

        fn below(&mut self, bound: u64) -> u64 {
            let value = self.0.next().unwrap_or(0);
            u64::try_from(value).unwrap_or(0).min(bound - 1)
        }
    }

    fn entry(item: &str, min: i32, max: i32, rarity: RarityTier) -> RewardDefinition {
        RewardDefinition::new(item, QuantityRange::new(min, max), rarity)
    }

    fn common_rare_weights() -> RarityWeightMap {
        RarityWeightMap::new()
            .with(RarityTier::Common, 90)
            .with(RarityTier::Rare, 10)
    }

    #[test]
    fn test_cumulative_selection_boundaries() {
        let resolver = RewardResolver::new();
        let rewards = [entry("x", 1, 1, RarityTier::Common), entry("y", 1, 1, RarityTier::Rare)];
        let weights = common_rare_weights();

        let pick = |roll: i64| {
            let mut rng = Scripted::new(&[roll]);
            resolver.select(&rewards, &weights, &mut rng).map(|e| e.item_key.clone())
        };

        assert_eq!(pick(0).as_deref(), Some("x"));
        assert_eq!(pick(89).as_deref(), Some("x"));
        assert_eq!(pick(90).as_deref(), Some("y"));
        assert_eq!(pick(99).as_deref(), Some("y"));
    }

    #[test]
    fn test_zero_weight_entries_skipped_in_walk() {
        let resolver = RewardResolver::new();
        let rewards = [
            entry("never", 1, 1, RarityTier::Uncommon),
            entry("x", 1, 1, RarityTier::Common),
            entry("also-never", 1, 1, RarityTier::VeryRare),
            entry("y", 1, 1, RarityTier::Rare),
        ];
        let weights = common_rare_weights();

        for roll in [0, 45, 89, 90, 99] {
            let mut rng = Scripted::new(&[roll]);
            let selected = resolver.select(&rewards, &weights, &mut rng).unwrap();
            assert!(selected.item_key == "x" || selected.item_key == "y");
        }
    }

    #[test]
    fn test_zero_total_weight_selects_nothing() {
        let resolver = RewardResolver::new();
        let rewards = [entry("x", 1, 1, RarityTier::Rare)];
        let weights = RarityWeightMap::new().with(RarityTier::Common, 10);
        let mut rng = seeded_rng(1);

        assert_eq!(resolver.total_weight(&rewards, &weights), 0);
        assert!(resolver.select(&rewards, &weights, &mut rng).is_none());
        assert!(resolver.select(&[], &weights, &mut rng).is_none());
    }

    #[test]
    fn test_exact_draws_with_scripted_source() {
        let resolver = RewardResolver::new();
        let rewards = [entry("x", 1, 3, RarityTier::Common), entry("y", 2, 4, RarityTier::Rare)];
        let weights = common_rare_weights();

        // tries=3, then (selection roll, amount) per draw
        let mut rng = Scripted::new(&[3, 10, 2, 95, 4, 50, 1]);
        let grants = resolver.resolve(&rewards, &weights, TriesRange::new(1, 5), &mut rng);

        let got: Vec<(&str, u32)> = grants.iter().map(|g| (g.item_key.as_str(), g.quantity)).collect();
        assert_eq!(got, [("x", 2), ("y", 4), ("x", 1)]);
    }

    #[test]
    fn test_non_positive_amount_yields_nothing() {
        let resolver = RewardResolver::new();
        let negative_low = entry("x", -3, 2, RarityTier::Common);

        let mut rng = Scripted::new(&[-3, 0, 1]);
        assert_eq!(resolver.roll_quantity(&negative_low, &mut rng), None);
        assert_eq!(resolver.roll_quantity(&negative_low, &mut rng), None);
        assert_eq!(resolver.roll_quantity(&negative_low, &mut rng), Some(1));
    }

    #[test]
    fn test_degenerate_ranges_never_roll() {
        let resolver = RewardResolver::new();
        let mut rng = seeded_rng(3);
        for (min, max) in [(0, 0), (5, 2), (-4, -1)] {
            let degenerate = entry("x", min, max, RarityTier::Common);
            for _ in 0..100 {
                assert_eq!(resolver.roll_quantity(&degenerate, &mut rng), None);
            }
        }
    }

    #[test]
    fn test_draw_count() {
        let resolver = RewardResolver::new();
        let mut rng = seeded_rng(11);

        assert_eq!(resolver.draw_count(TriesRange::fixed(0), &mut rng), 0);
        assert_eq!(resolver.draw_count(TriesRange::fixed(4), &mut rng), 4);
        assert_eq!(resolver.draw_count(TriesRange::new(5, 2), &mut rng), 0);

        for _ in 0..1000 {
            let n = resolver.draw_count(TriesRange::new(2, 6), &mut rng);
            assert!((2..=6).contains(&n));
        }
    }

    #[test]
    fn test_resolve_into_reports_draws() {
        let resolver = RewardResolver::new();
        let rewards = [entry("x", 1, 1, RarityTier::Common), entry("broken", 0, 0, RarityTier::Rare)];
        let weights = common_rare_weights();
        let mut rng = seeded_rng(5);
        let mut sink: Vec<RewardGrant> = Vec::new();

        let summary = resolver.resolve_into(&rewards, &weights, TriesRange::fixed(200), &mut rng, &mut sink);

        assert_eq!(summary.draws, 200);
        assert_eq!(summary.granted as usize, sink.len());
        assert_eq!(summary.placed, summary.granted);
        assert!(summary.empty_draws() > 0, "degenerate entry should eat some draws");
        assert!(sink.iter().all(|g| g.item_key == "x"));
    }

    #[test]
    fn test_simulate_counts_duplicate_keys_separately() {
        let resolver = RewardResolver::new();
        let rewards = [entry("x", 1, 1, RarityTier::Common), entry("x", 0, 0, RarityTier::Rare)];
        let weights = common_rare_weights();
        let mut rng = seeded_rng(9);

        let stats = resolver.simulate(&rewards, &weights, 10_000, &mut rng);

        assert_eq!(stats.total_draws, 10_000);
        assert_eq!(stats.selections.iter().sum::<u64>(), 10_000);
        assert_eq!(stats.total_grants, stats.selections[0]);
        assert_eq!(stats.item_quantities["x"], stats.selections[0]);
        assert!((stats.selection_rate(1) - 0.10).abs() < 0.02);
        assert!(stats.grant_rate_percent() > 85.0);
    }
}
