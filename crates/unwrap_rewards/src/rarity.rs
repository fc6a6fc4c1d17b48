//! # Rarity Tiers
//!
//! The closed set of rarity labels and the weights that turn them into
//! selection probabilities.
//!
//! Tier names are case-sensitive in configuration documents. An unknown name
//! is a deserialization error, never a silent weight of zero.

use serde::{Deserialize, Serialize};

/// Rarity tier of a reward entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RarityTier {
    /// Common rewards.
    Common = 0,
    /// Uncommon rewards.
    Uncommon = 1,
    /// Rare rewards.
    Rare = 2,
    /// Very rare rewards.
    VeryRare = 3,
}

impl RarityTier {
    /// Every tier, in declaration order.
    pub const ALL: [Self; 4] = [Self::Common, Self::Uncommon, Self::Rare, Self::VeryRare];

    /// The configuration name of this tier.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Uncommon => "Uncommon",
            Self::Rare => "Rare",
            Self::VeryRare => "VeryRare",
        }
    }
}

impl std::fmt::Display for RarityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection weight per rarity tier.
///
/// Weights are relative: they need not sum to any fixed total. A tier left
/// out of the configuration document weighs 0 and can never be selected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase", deny_unknown_fields)]
pub struct RarityWeightMap {
    common: u32,
    uncommon: u32,
    rare: u32,
    very_rare: u32,
}

impl RarityWeightMap {
    /// Creates a map where every tier weighs 0.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            common: 0,
            uncommon: 0,
            rare: 0,
            very_rare: 0,
        }
    }

    /// Returns a copy of this map with `tier` set to `weight`.
    #[inline]
    #[must_use]
    pub const fn with(mut self, tier: RarityTier, weight: u32) -> Self {
        match tier {
            RarityTier::Common => self.common = weight,
            RarityTier::Uncommon => self.uncommon = weight,
            RarityTier::Rare => self.rare = weight,
            RarityTier::VeryRare => self.very_rare = weight,
        }
        self
    }

    /// Sets the weight of `tier`.
    pub fn set(&mut self, tier: RarityTier, weight: u32) {
        *self = self.with(tier, weight);
    }

    /// Weight of `tier`.
    #[inline]
    #[must_use]
    pub const fn weight(&self, tier: RarityTier) -> u32 {
        match tier {
            RarityTier::Common => self.common,
            RarityTier::Uncommon => self.uncommon,
            RarityTier::Rare => self.rare,
            RarityTier::VeryRare => self.very_rare,
        }
    }

    /// Returns true if no tier can ever be selected.
    #[must_use]
    pub fn is_all_zero(&self) -> bool {
        RarityTier::ALL.iter().all(|&tier| self.weight(tier) == 0)
    }
}
