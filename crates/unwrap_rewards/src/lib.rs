//! # Unwrap Rewards
//!
//! Rarity-weighted reward resolution for unwrapping container items.
//!
//! ## Design Principles
//!
//! 1. **Never fail a live unwrap** - Unknown triggers, zero weights and
//!    degenerate amount ranges all resolve to "no grant", never an error
//! 2. **Immutable snapshots** - Table and weights are published together and
//!    swapped atomically on reload
//! 3. **Injected randomness** - Every draw pulls from a caller-supplied source
//! 4. **Host owns side effects** - Item placement and completion cues sit
//!    behind [`GrantSink`] and [`CompletionEffect`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use unwrap_rewards::{seeded_rng, RewardGrant, TriesRange, UnwrapEvent, UnwrapRewards};
//!
//! // Load (or create) the configuration
//! let rewards = UnwrapRewards::open("config/unwrap_rewards.json")?;
//!
//! // When a player unwraps a golden egg
//! let mut granted: Vec<RewardGrant> = Vec::new();
//! let summary = rewards.on_item_unwrap(
//!     &UnwrapEvent::new("easter.goldegg", TriesRange::new(1, 3)),
//!     &mut granted,
//!     &mut (),
//!     &mut seeded_rng(42),
//! );
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod grant;
pub mod random;
pub mod rarity;
pub mod resolver;
pub mod service;
pub mod table;

pub use config::{ConfigFormat, ConfigVersion, RewardRecord, RewardsConfig, CONFIG_VERSION};
pub use error::{RewardsError, RewardsResult};
pub use grant::{CompletionEffect, GrantOutcome, GrantSink, GrantSummary, RewardGrant};
pub use random::{entropy_rng, seeded_rng, RandomSource, RewardRng};
pub use rarity::{RarityTier, RarityWeightMap};
pub use resolver::{RewardResolver, RewardStatistics, TriesRange};
pub use service::{RewardSnapshot, UnwrapEvent, UnwrapRewards};
pub use table::{QuantityRange, RewardDefinition, RewardTable};
