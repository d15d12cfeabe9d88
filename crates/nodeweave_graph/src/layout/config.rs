// SPDX-License-Identifier: MIT OR Apache-2.0
//! Layout settings.
//!
//! Settings are stored as RON next to the graphs they apply to. Every field
//! has a default, so a settings file only needs the values it changes.

use super::solver::Stage;
use crate::file::{self, FileError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current layout settings format version
pub const LAYOUT_CONFIG_VERSION: u32 = 1;

/// Relaxation rates applied during one stage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageRates {
    /// Rate for the horizontal spacing constraint
    pub horizontal: f64,
    /// Rate for the vertical socket alignment constraint
    pub vertical: f64,
    /// Rate for overlap separation
    pub overlap: f64,
}

impl StageRates {
    /// Rates used while expanding
    pub const EXPAND: Self = Self {
        horizontal: 0.9,
        vertical: 0.5,
        overlap: 0.9,
    };

    /// Rates used while compacting; vertical movement is left mostly to overlap separation
    pub const COMPACT: Self = Self {
        horizontal: 0.5,
        vertical: 0.05,
        overlap: 0.9,
    };
}

/// Settings for [`LayoutSolver`](super::LayoutSolver)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Format version
    pub version: u32,
    /// Hard cap on iterations across both stages
    pub max_iterations: usize,
    /// Stability threshold on the change of the squared delta sum
    pub epsilon: f64,
    /// Nominal gap between a linked node's right edge and its target's left edge
    pub target_spacing: f64,
    /// Multiplier applied to the target spacing while expanding
    pub expand_factor: f64,
    /// Links whose spacing error reaches `target × factor` are left alone
    pub skip_threshold_factor: f64,
    /// Vertical distance between consecutive sockets of a node
    pub socket_offset: f64,
    /// Overlap margin as a fraction of the target spacing
    pub overlap_margin_ratio: f64,
    /// Stored node height that means "never measured"
    pub default_height: f64,
    /// Height assumed for nodes with no usable height
    pub fallback_height: f64,
    /// Enforce horizontal spacing along links
    pub fix_horizontal: bool,
    /// Align linked sockets vertically
    pub fix_vertical: bool,
    /// Separate overlapping nodes while compacting
    pub fix_overlaps: bool,
    /// Rates for the expand stage
    pub expand: StageRates,
    /// Rates for the compact stage
    pub compact: StageRates,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            version: LAYOUT_CONFIG_VERSION,
            max_iterations: 2000,
            epsilon: 1e-5,
            target_spacing: 50.0,
            expand_factor: 2.0,
            skip_threshold_factor: 2.0,
            socket_offset: 20.0,
            overlap_margin_ratio: 0.5,
            default_height: crate::node::DEFAULT_NODE_HEIGHT,
            fallback_height: 200.0,
            fix_horizontal: true,
            fix_vertical: true,
            fix_overlaps: true,
            expand: StageRates::EXPAND,
            compact: StageRates::COMPACT,
        }
    }
}

impl LayoutConfig {
    /// Rates for a stage
    pub fn rates(&self, stage: Stage) -> StageRates {
        match stage {
            Stage::Expand => self.expand,
            Stage::Compact => self.compact,
        }
    }

    /// Check that the settings describe a usable solver
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::NonPositive("max_iterations"));
        }
        let positive = [
            ("epsilon", self.epsilon),
            ("target_spacing", self.target_spacing),
            ("expand_factor", self.expand_factor),
            ("skip_threshold_factor", self.skip_threshold_factor),
            ("fallback_height", self.fallback_height),
        ];
        for (field, value) in positive {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::NonPositive(field));
            }
        }
        if self.overlap_margin_ratio.is_nan() || self.overlap_margin_ratio < 0.0 {
            return Err(ConfigError::NonPositive("overlap_margin_ratio"));
        }

        let rates = [
            ("expand.horizontal", self.expand.horizontal),
            ("expand.vertical", self.expand.vertical),
            ("expand.overlap", self.expand.overlap),
            ("compact.horizontal", self.compact.horizontal),
            ("compact.vertical", self.compact.vertical),
            ("compact.overlap", self.compact.overlap),
        ];
        for (field, value) in rates {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::RateOutOfRange { field, value });
            }
        }
        Ok(())
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, FileError> {
        let config: LayoutConfig = file::read_document(path)?;

        if config.version > LAYOUT_CONFIG_VERSION {
            return Err(FileError::UnsupportedVersion {
                found: config.version,
                supported: LAYOUT_CONFIG_VERSION,
            });
        }
        config.validate()?;

        tracing::debug!("Loaded layout settings from {:?}", path);
        Ok(config)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), FileError> {
        file::write_document(self, path)
    }

    /// Render the settings as pretty RON
    pub fn to_ron_string(&self) -> Result<String, FileError> {
        file::to_ron_string(self)
    }
}

/// Error for settings that cannot drive the solver
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Value must be strictly positive and finite
    #[error("{0} must be positive")]
    NonPositive(&'static str),

    /// Relaxation rate outside `(0, 1]`
    #[error("{field} must be in (0, 1], got {value}")]
    RateOutOfRange {
        /// Offending field
        field: &'static str,
        /// Offending value
        value: f64,
    },
}
