//! # Reward Table
//!
//! Validated mapping from a trigger item to the ordered rewards it can yield.
//!
//! The table is built once from a [`RewardsConfig`] and is read-only
//! afterwards. Only records that can never be granted (empty item key) are
//! dropped; degenerate amount ranges are kept and become no-ops at draw time.

use std::collections::HashMap;

use crate::config::{RewardRecord, RewardsConfig};
use crate::rarity::RarityTier;

/// Inclusive amount bounds of a reward entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuantityRange {
    /// Inclusive lower bound.
    pub min: i32,
    /// Inclusive upper bound.
    pub max: i32,
}

impl QuantityRange {
    /// Creates a new range.
    #[inline]
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// A range that always rolls `amount`.
    #[inline]
    #[must_use]
    pub const fn exactly(amount: i32) -> Self {
        Self::new(amount, amount)
    }

    /// Returns true if no roll from this range can ever be granted.
    #[inline]
    #[must_use]
    pub const fn is_degenerate(self) -> bool {
        self.max <= 0 || self.min > self.max
    }

    /// Returns true if `amount` lies within the bounds.
    #[inline]
    #[must_use]
    pub fn contains(self, amount: i64) -> bool {
        (i64::from(self.min)..=i64::from(self.max)).contains(&amount)
    }
}

/// A single reward entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardDefinition {
    /// Item type to grant. Never empty.
    pub item_key: String,
    /// Custom name; `None` keeps the item type's default name.
    pub display_name: Option<String>,
    /// Cosmetic variant, 0 for none.
    pub variant_id: u64,
    /// Amount bounds.
    pub quantity: QuantityRange,
    /// Rarity tier used to weight selection.
    pub rarity: RarityTier,
}

impl RewardDefinition {
    /// Creates an entry with no display name and no variant.
    #[must_use]
    pub fn new(item_key: &str, quantity: QuantityRange, rarity: RarityTier) -> Self {
        Self {
            item_key: item_key.to_string(),
            display_name: None,
            variant_id: 0,
            quantity,
            rarity,
        }
    }

    /// Sets the display name. An empty name means "no override".
    #[must_use]
    pub fn with_display_name(mut self, name: &str) -> Self {
        self.display_name = Some(name.to_string()).filter(|n| !n.is_empty());
        self
    }

    /// Sets the cosmetic variant.
    #[must_use]
    pub fn with_variant(mut self, variant_id: u64) -> Self {
        self.variant_id = variant_id;
        self
    }

    /// Converts a configuration record, or `None` if it has no item key.
    #[must_use]
    pub fn from_record(record: &RewardRecord) -> Option<Self> {
        if record.item_short_name.is_empty() {
            return None;
        }

        Some(Self {
            item_key: record.item_short_name.clone(),
            display_name: record.display_name.clone().filter(|n| !n.is_empty()),
            variant_id: record.skin_id,
            quantity: QuantityRange::new(record.minimum_amount, record.maximum_amount),
            rarity: record.rarity,
        })
    }
}

/// Trigger key → ordered reward entries.
#[derive(Clone, Debug, Default)]
pub struct RewardTable {
    entries: HashMap<String, Vec<RewardDefinition>>,
}

impl RewardTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the table from a configuration document.
    #[must_use]
    pub fn from_config(config: &RewardsConfig) -> Self {
        let mut table = Self::new();
        for (trigger, records) in &config.unwrap_rewards {
            let rewards = records
                .iter()
                .filter_map(|record| {
                    let definition = RewardDefinition::from_record(record);
                    if definition.is_none() {
                        tracing::debug!(trigger = %trigger, "dropping reward record without item key");
                    }
                    definition
                })
                .collect();
            table.entries.insert(trigger.clone(), rewards);
        }
        table
    }

    /// Registers the rewards for a trigger, replacing any previous list.
    ///
    /// Entries with an empty item key are dropped.
    pub fn insert(&mut self, trigger_key: &str, mut rewards: Vec<RewardDefinition>) {
        rewards.retain(|reward| !reward.item_key.is_empty());
        self.entries.insert(trigger_key.to_string(), rewards);
    }

    /// Rewards configured for `trigger_key`, in table order.
    ///
    /// `None` means the trigger has no configured rewards.
    #[inline]
    #[must_use]
    pub fn lookup(&self, trigger_key: &str) -> Option<&[RewardDefinition]> {
        self.entries.get(trigger_key).map(Vec::as_slice)
    }

    /// Returns true if `trigger_key` is configured.
    #[inline]
    #[must_use]
    pub fn contains(&self, trigger_key: &str) -> bool {
        self.entries.contains_key(trigger_key)
    }

    /// Number of configured triggers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no trigger is configured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All configured trigger keys, in no particular order.
    pub fn trigger_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(records: Vec<RewardRecord>) -> RewardsConfig {
        let mut config = RewardsConfig::empty();
        config.unwrap_rewards.insert("A".to_string(), records);
        config
    }

    #[test]
    fn test_lookup_unknown_trigger() {
        let table = RewardTable::from_config(&RewardsConfig::default());
        assert!(table.lookup("no.such.item").is_none());
        assert!(!table.contains("no.such.item"));
    }

    #[test]
    fn test_lookup_preserves_order() {
        let table = RewardTable::from_config(&RewardsConfig::default());
        let rewards = table.lookup("easter.goldegg").unwrap();
        let keys: Vec<&str> = rewards.iter().map(|r| r.item_key.as_str()).collect();
        assert_eq!(
            keys,
            ["ammo.rocket.mlrs", "explosives", "explosive.satchel", "metal.facemask", "potato", "t1_smg"]
        );
    }

    #[test]
    fn test_empty_item_keys_dropped() {
        let table = RewardTable::from_config(&config_with(vec![
            RewardRecord::new("", 1, 1, RarityTier::Common),
            RewardRecord::new("x", 1, 1, RarityTier::Common),
        ]));
        let rewards = table.lookup("A").unwrap();
        assert_eq!(rewards.len(), 1);
        assert_eq!(rewards[0].item_key, "x");
    }

    #[test]
    fn test_trigger_with_only_invalid_records_stays_configured() {
        let table = RewardTable::from_config(&config_with(vec![RewardRecord::new("", 1, 1, RarityTier::Common)]));
        assert_eq!(table.lookup("A"), Some(&[][..]));
    }

    #[test]
    fn test_degenerate_ranges_preserved() {
        let table = RewardTable::from_config(&config_with(vec![
            RewardRecord::new("zero", 0, 0, RarityTier::Common),
            RewardRecord::new("reversed", 5, 2, RarityTier::Common),
        ]));
        let rewards = table.lookup("A").unwrap();
        assert_eq!(rewards.len(), 2);
        assert!(rewards.iter().all(|r| r.quantity.is_degenerate()));
    }

    #[test]
    fn test_empty_display_name_normalized() {
        let mut record = RewardRecord::new("x", 1, 1, RarityTier::Rare);
        record.display_name = Some(String::new());
        record.skin_id = 42;

        let definition = RewardDefinition::from_record(&record).unwrap();
        assert_eq!(definition.display_name, None);
        assert_eq!(definition.variant_id, 42);

        let named = RewardDefinition::new("x", QuantityRange::exactly(1), RarityTier::Rare).with_display_name("");
        assert_eq!(named.display_name, None);
    }

    #[test]
    fn test_insert_replaces_and_filters() {
        let mut table = RewardTable::new();
        table.insert("A", vec![RewardDefinition::new("x", QuantityRange::exactly(1), RarityTier::Common)]);
        table.insert(
            "A",
            vec![
                RewardDefinition::new("", QuantityRange::exactly(1), RarityTier::Common),
                RewardDefinition::new("y", QuantityRange::exactly(1), RarityTier::Common),
            ],
        );
        assert_eq!(table.len(), 1);
        let rewards = table.lookup("A").unwrap();
        assert_eq!(rewards.len(), 1);
        assert_eq!(rewards[0].item_key, "y");
        assert_eq!(table.trigger_keys().collect::<Vec<_>>(), ["A"]);
    }

    #[test]
    fn test_quantity_range() {
        assert!(QuantityRange::new(0, 0).is_degenerate());
        assert!(QuantityRange::new(3, 1).is_degenerate());
        assert!(QuantityRange::new(-5, -1).is_degenerate());
        assert!(!QuantityRange::new(-5, 1).is_degenerate());
        assert!(QuantityRange::new(1, 3).contains(3));
        assert!(!QuantityRange::new(1, 3).contains(4));
    }
}
