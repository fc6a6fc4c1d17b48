//! # Unwrap Rewards Service
//!
//! The entry point the host calls when a player unwraps an item.
//!
//! ```text
//! Host ──> on_item_unwrap(event) ──> snapshot.lookup(trigger)
//!                                          │
//!                        not configured ───┴─── configured
//!                              │                    │
//!                              ▼                    ▼
//!                       None (host runs     RewardResolver draws
//!                       its own unwrap)            │
//!                                                  ▼
//!                                       GrantSink (place / drop / discard)
//!                                                  │
//!                                                  ▼
//!                                         CompletionEffect::play
//! ```
//!
//! ## Thread Safety
//!
//! `UnwrapRewards` is `Send + Sync`. The active table and weights live in one
//! immutable [`RewardSnapshot`] behind an `Arc`. A reload builds a new
//! snapshot and swaps the pointer; an in-flight unwrap keeps the snapshot it
//! started with, so it sees either the old configuration or the new one,
//! never a mix.

use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;

use crate::config::RewardsConfig;
use crate::error::RewardsResult;
use crate::grant::{CompletionEffect, GrantSink, GrantSummary};
use crate::random::RandomSource;
use crate::rarity::RarityWeightMap;
use crate::resolver::{RewardResolver, TriesRange};
use crate::table::{RewardDefinition, RewardTable};

/// Reward table and rarity weights, published together.
#[derive(Clone, Debug, Default)]
pub struct RewardSnapshot {
    table: RewardTable,
    weights: RarityWeightMap,
    version: String,
}

impl RewardSnapshot {
    /// Creates a snapshot from already-built parts.
    #[must_use]
    pub fn new(table: RewardTable, weights: RarityWeightMap) -> Self {
        Self {
            table,
            weights,
            version: String::new(),
        }
    }

    /// Builds the snapshot described by a configuration document.
    #[must_use]
    pub fn from_config(config: &RewardsConfig) -> Self {
        Self {
            table: RewardTable::from_config(config),
            weights: config.rarity_weights,
            version: config.version.clone(),
        }
    }

    /// The reward table.
    #[inline]
    #[must_use]
    pub const fn table(&self) -> &RewardTable {
        &self.table
    }

    /// The rarity weights.
    #[inline]
    #[must_use]
    pub const fn weights(&self) -> &RarityWeightMap {
        &self.weights
    }

    /// Version stamp of the source document; empty if built by hand.
    #[inline]
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rewards configured for `trigger_key`.
    #[inline]
    #[must_use]
    pub fn lookup(&self, trigger_key: &str) -> Option<&[RewardDefinition]> {
        self.table.lookup(trigger_key)
    }
}

/// One unwrap action reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnwrapEvent<'a> {
    /// Short name of the item being unwrapped.
    pub trigger_key: &'a str,
    /// The unwrapped item's configured draw count bounds.
    pub tries: TriesRange,
}

impl<'a> UnwrapEvent<'a> {
    /// Creates an event.
    #[inline]
    #[must_use]
    pub const fn new(trigger_key: &'a str, tries: TriesRange) -> Self {
        Self { trigger_key, tries }
    }
}

/// Reloadable reward service.
#[derive(Debug)]
pub struct UnwrapRewards {
    /// Active snapshot. Swapped whole on reload.
    current: RwLock<Arc<RewardSnapshot>>,
    resolver: RewardResolver,
}

impl UnwrapRewards {
    /// Creates the service from a configuration document.
    #[must_use]
    pub fn new(config: &RewardsConfig) -> Self {
        Self::from_snapshot(RewardSnapshot::from_config(config))
    }

    /// Creates the service from a prepared snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: RewardSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            resolver: RewardResolver::new(),
        }
    }

    /// Loads (or creates) the configuration at `path` and starts the service.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read, parsed, or
    /// written back.
    pub fn open(path: impl AsRef<Path>) -> RewardsResult<Self> {
        let config = RewardsConfig::load_or_create(path)?;
        Ok(Self::new(&config))
    }

    /// The currently published snapshot.
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<RewardSnapshot> {
        Arc::clone(&*self.current.read())
    }

    /// Publishes a new configuration, returning the snapshot it replaced.
    pub fn reload(&self, config: &RewardsConfig) -> Arc<RewardSnapshot> {
        let next = Arc::new(RewardSnapshot::from_config(config));
        tracing::info!(
            version = %next.version(),
            triggers = next.table().len(),
            "reward table reloaded"
        );
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Re-reads the configuration at `path` and publishes it.
    ///
    /// On error the current snapshot stays in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read, parsed, or
    /// written back.
    pub fn reload_from_path(&self, path: impl AsRef<Path>) -> RewardsResult<Arc<RewardSnapshot>> {
        let config = RewardsConfig::load_or_create(path)?;
        Ok(self.reload(&config))
    }

    /// Handles one unwrap.
    ///
    /// Returns `None` if the trigger has no configured rewards; the host
    /// should then run its own unwrap logic and neither `sink` nor `effect`
    /// is touched. Otherwise every grant goes to `sink`, `effect` plays once,
    /// and the host should consume one trigger item.
    pub fn on_item_unwrap<S, E, R>(
        &self,
        event: &UnwrapEvent<'_>,
        sink: &mut S,
        effect: &mut E,
        rng: &mut R,
    ) -> Option<GrantSummary>
    where
        S: GrantSink + ?Sized,
        E: CompletionEffect + ?Sized,
        R: RandomSource + ?Sized,
    {
        let snapshot = self.snapshot();

        let Some(rewards) = snapshot.lookup(event.trigger_key) else {
            tracing::debug!(trigger = event.trigger_key, "no rewards configured for trigger");
            return None;
        };

        let summary = self
            .resolver
            .resolve_into(rewards, snapshot.weights(), event.tries, rng, sink);

        tracing::debug!(
            trigger = event.trigger_key,
            draws = summary.draws,
            granted = summary.granted,
            dropped = summary.dropped,
            discarded = summary.discarded,
            "unwrap resolved"
        );

        effect.play(event.trigger_key);
        Some(summary)
    }
}

impl Default for UnwrapRewards {
    fn default() -> Self {
        Self::new(&RewardsConfig::default())
    }
}
