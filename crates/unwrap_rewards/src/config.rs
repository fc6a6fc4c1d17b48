//! # Reward Configuration
//!
//! The on-disk configuration document: a version stamp, the trigger → reward
//! records mapping, and the rarity weights.
//!
//! Documents are JSON (field names with spaces, as written by earlier
//! releases) or TOML. The format is picked from the file extension.
//!
//! ```text
//! {
//!   "Version": "1.0.0",
//!   "Unwrap Rewards": {
//!     "easter.goldegg": [
//!       { "Item Short Name": "explosives", "Display Name": null, "Skin Id": 0,
//!         "Minimum Amount": 3, "Maximum Amount": 7, "Rarity": "Uncommon" }
//!     ]
//!   },
//!   "Rarity Weights": { "Common": 60, "Uncommon": 25, "Rare": 10, "VeryRare": 5 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{RewardsError, RewardsResult};
use crate::rarity::{RarityTier, RarityWeightMap};

/// Version stamp written into every saved document.
pub const CONFIG_VERSION: &str = "1.0.0";

/// Parsed form of [`CONFIG_VERSION`].
const CURRENT_VERSION: ConfigVersion = ConfigVersion(1, 0, 0);

/// Oldest document layout still understood. Anything older is replaced.
const MIN_COMPATIBLE_VERSION: ConfigVersion = ConfigVersion(1, 0, 0);

/// A `major.minor.patch` version stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConfigVersion(pub u32, pub u32, pub u32);

impl ConfigVersion {
    /// Parses a `major.minor.patch` string.
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::InvalidVersion` if the string does not have
    /// exactly three numeric components.
    pub fn parse(version: &str) -> RewardsResult<Self> {
        let invalid = || RewardsError::InvalidVersion(version.to_string());

        let mut parts = version.trim().split('.');
        let mut next = || -> RewardsResult<u32> {
            parts
                .next()
                .ok_or_else(invalid)?
                .parse::<u32>()
                .map_err(|_| invalid())
        };

        let parsed = Self(next()?, next()?, next()?);
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(parsed)
    }
}

impl std::fmt::Display for ConfigVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

/// One configured reward record as it appears in the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardRecord {
    /// Short name of the item to grant. Empty records are dropped at load.
    #[serde(rename = "Item Short Name", alias = "ItemShortName", default)]
    pub item_short_name: String,
    /// Optional custom name for the granted item.
    #[serde(rename = "Display Name", alias = "DisplayName", default)]
    pub display_name: Option<String>,
    /// Cosmetic variant, 0 for none.
    #[serde(rename = "Skin Id", alias = "SkinId", default)]
    pub skin_id: u64,
    /// Inclusive lower bound of the granted amount.
    #[serde(rename = "Minimum Amount", alias = "MinimumAmount", default)]
    pub minimum_amount: i32,
    /// Inclusive upper bound of the granted amount.
    #[serde(rename = "Maximum Amount", alias = "MaximumAmount", default)]
    pub maximum_amount: i32,
    /// Rarity tier used to weight selection.
    #[serde(rename = "Rarity")]
    pub rarity: RarityTier,
}

impl RewardRecord {
    /// Creates a record with no display name and no skin.
    #[must_use]
    pub fn new(item_short_name: &str, minimum_amount: i32, maximum_amount: i32, rarity: RarityTier) -> Self {
        Self {
            item_short_name: item_short_name.to_string(),
            display_name: None,
            skin_id: 0,
            minimum_amount,
            maximum_amount,
            rarity,
        }
    }
}

/// Supported document encodings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json` documents.
    Json,
    /// `.toml` documents.
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::UnsupportedFormat` for any other extension.
    pub fn from_path(path: &Path) -> RewardsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(RewardsError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// The full configuration document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsConfig {
    /// Version of the document layout.
    #[serde(rename = "Version", default)]
    pub version: String,
    /// Reward records by trigger item short name.
    #[serde(rename = "Unwrap Rewards", alias = "UnwrapRewards", default)]
    pub unwrap_rewards: BTreeMap<String, Vec<RewardRecord>>,
    /// Selection weight per rarity tier.
    #[serde(rename = "Rarity Weights", alias = "RarityWeights", default)]
    pub rarity_weights: RarityWeightMap,
}

impl Default for RewardsConfig {
    /// The built-in table shipped with the plugin: one golden egg trigger.
    fn default() -> Self {
        let rarity_weights = RarityWeightMap::new()
            .with(RarityTier::Common, 60)
            .with(RarityTier::Uncommon, 25)
            .with(RarityTier::Rare, 10)
            .with(RarityTier::VeryRare, 5);

        let golden_egg = vec![
            RewardRecord::new("ammo.rocket.mlrs", 1, 2, RarityTier::Common),
            RewardRecord::new("explosives", 3, 7, RarityTier::Uncommon),
            RewardRecord::new("explosive.satchel", 1, 3, RarityTier::Rare),
            RewardRecord::new("metal.facemask", 1, 1, RarityTier::Rare),
            RewardRecord::new("potato", 10, 20, RarityTier::VeryRare),
            RewardRecord::new("t1_smg", 1, 1, RarityTier::VeryRare),
        ];

        let mut unwrap_rewards = BTreeMap::new();
        unwrap_rewards.insert("easter.goldegg".to_string(), golden_egg);

        Self {
            version: CONFIG_VERSION.to_string(),
            unwrap_rewards,
            rarity_weights,
        }
    }
}

impl RewardsConfig {
    /// Creates an empty document at the current version.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            unwrap_rewards: BTreeMap::new(),
            rarity_weights: RarityWeightMap::new(),
        }
    }

    /// Parses a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::Json` on malformed input or unknown tier names.
    pub fn from_json_str(contents: &str) -> RewardsResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::TomlParse` on malformed input or unknown tier names.
    pub fn from_toml_str(contents: &str) -> RewardsResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes this document as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::Json` if serialization fails.
    pub fn to_json_string(&self) -> RewardsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes this document as TOML.
    ///
    /// # Errors
    ///
    /// Returns `RewardsError::TomlSerialize` if serialization fails.
    pub fn to_toml_string(&self) -> RewardsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Loads a document from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or fails to parse.
    pub fn load(path: impl AsRef<Path>) -> RewardsResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = fs::read_to_string(path).map_err(|source| RewardsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match format {
            ConfigFormat::Json => Self::from_json_str(&contents),
            ConfigFormat::Toml => Self::from_toml_str(&contents),
        }
    }

    /// Saves this document to disk, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unsupported, serialization fails,
    /// or the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> RewardsResult<()> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => self.to_json_string()?,
            ConfigFormat::Toml => self.to_toml_string()?,
        };

        let io_error = |source| RewardsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(path, contents).map_err(io_error)
    }

    /// Loads the document at `path`, or writes the defaults there if absent.
    ///
    /// An existing document is migrated and saved back so the file always
    /// carries the current version stamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or written.
    pub fn load_or_create(path: impl AsRef<Path>) -> RewardsResult<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::warn!(?path, "no reward configuration found, writing defaults");
            Self::default()
        };

        config.migrate();
        config.save(path)?;
        Ok(config)
    }

    /// Brings an older document up to [`CONFIG_VERSION`].
    ///
    /// Documents older than the oldest compatible layout, or with an
    /// unreadable version stamp, are replaced by the defaults. Newer
    /// documents are left untouched.
    ///
    /// Returns true if anything changed.
    pub fn migrate(&mut self) -> bool {
        let stored = match ConfigVersion::parse(&self.version) {
            Ok(version) => version,
            Err(err) => {
                tracing::warn!(%err, "unreadable config version, treating as outdated");
                ConfigVersion(0, 0, 0)
            }
        };

        if stored >= CURRENT_VERSION {
            return false;
        }

        tracing::warn!("config changes detected, updating");

        if stored < MIN_COMPATIBLE_VERSION {
            *self = Self::default();
        }

        tracing::warn!(from = %stored, to = CONFIG_VERSION, "config update complete");
        self.version = CONFIG_VERSION.to_string();
        true
    }
}
