//! Activities
//!
//! Promotional activities a shopper can apply at checkout. Each kind stores
//! its configuration as a record whose fields are optional, so a malformed
//! document still loads; the record is validated into typed tiers or rules
//! before any discount is computed.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod bundle;
pub mod tiered_flat;
pub mod tiered_percentage;
pub mod tiers;

use crate::activities::{
    bundle::BundleActivity, tiered_flat::TieredFlatActivity,
    tiered_percentage::TieredPercentageActivity,
};

/// Activity identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(#[serde(deserialize_with = "crate::ids::string_or_integer")] String);

impl ActivityId {
    /// Create an activity identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ActivityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActivityId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActivityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The kinds of activity the pricing engine knows how to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    /// Multiply the subtotal by the factor of the highest qualifying tier.
    TieredPercentage,

    /// Subtract the amount of the highest qualifying tier.
    TieredFlatAmount,

    /// Buy `by` of an eligible book, get `give` free.
    Bundle,
}

impl ActivityKind {
    /// Every known kind, in code order.
    pub const ALL: [Self; 3] = [Self::TieredPercentage, Self::TieredFlatAmount, Self::Bundle];

    /// Look up a kind by its wire code.
    ///
    /// Returns `None` for `0` and any unrecognised code.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::TieredPercentage),
            2 => Some(Self::TieredFlatAmount),
            3 => Some(Self::Bundle),
            _ => None,
        }
    }

    /// Wire code of this kind.
    pub const fn code(self) -> i32 {
        match self {
            Self::TieredPercentage => 1,
            Self::TieredFlatAmount => 2,
            Self::Bundle => 3,
        }
    }

    /// Stable name used in logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TieredPercentage => "tiered_percentage",
            Self::TieredFlatAmount => "tiered_flat",
            Self::Bundle => "bundle",
        }
    }
}

impl Display for ActivityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A stored activity configuration of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activity {
    /// Tiered percentage configuration
    TieredPercentage(TieredPercentageActivity),

    /// Tiered flat amount configuration
    TieredFlatAmount(TieredFlatActivity),

    /// Bundle configuration
    Bundle(BundleActivity),
}

impl Activity {
    /// Kind of this activity.
    pub const fn kind(&self) -> ActivityKind {
        match self {
            Self::TieredPercentage(_) => ActivityKind::TieredPercentage,
            Self::TieredFlatAmount(_) => ActivityKind::TieredFlatAmount,
            Self::Bundle(_) => ActivityKind::Bundle,
        }
    }

    /// Identifier of this activity.
    pub const fn id(&self) -> &ActivityId {
        match self {
            Self::TieredPercentage(activity) => &activity.id,
            Self::TieredFlatAmount(activity) => &activity.id,
            Self::Bundle(activity) => &activity.id,
        }
    }

    /// Validate the stored configuration without computing a discount.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::TieredPercentage(activity) => activity.tiers().map(drop),
            Self::TieredFlatAmount(activity) => activity.tiers().map(drop),
            Self::Bundle(activity) => activity.rules().map(drop),
        }
    }
}

impl From<TieredPercentageActivity> for Activity {
    fn from(activity: TieredPercentageActivity) -> Self {
        Self::TieredPercentage(activity)
    }
}

impl From<TieredFlatActivity> for Activity {
    fn from(activity: TieredFlatActivity) -> Self {
        Self::TieredFlatAmount(activity)
    }
}

impl From<BundleActivity> for Activity {
    fn from(activity: BundleActivity) -> Self {
        Self::Bundle(activity)
    }
}

/// A stored activity configuration is structurally malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The tier or rule list itself is absent.
    #[error("activity has no {0} list")]
    MissingList(&'static str),

    /// A tier is missing a required field.
    #[error("level {index} is missing `{field}`")]
    MissingLevelField {
        /// Position of the tier in the stored list
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },

    /// A bundle rule is missing a required field.
    #[error("rule {index} is missing `{field}`")]
    MissingRuleField {
        /// Position of the rule in the stored list
        index: usize,
        /// Name of the missing field
        field: &'static str,
    },
}
