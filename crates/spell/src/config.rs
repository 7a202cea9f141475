//! Configuration for spell-duration indices.

use climdex_grid::Comparison;

use crate::error::SpellError;

/// Minimum spell length used by the ETCCDI warm and cold spell indices.
pub const DEFAULT_MIN_LENGTH: u32 = 6;

/// Which spell-duration index is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpellKind {
    /// Warm spell duration index: daily maximum above its warm threshold.
    Warm,
    /// Cold spell duration index: daily minimum below its cold threshold.
    Cold,
}

impl SpellKind {
    /// Both kinds, warm first.
    pub const ALL: [SpellKind; 2] = [Self::Warm, Self::Cold];

    /// Short index name used in output labels.
    pub fn index_name(self) -> &'static str {
        match self {
            Self::Warm => "WSDI",
            Self::Cold => "CSDI",
        }
    }

    /// Comparison that makes a day an event.
    pub fn comparison(self) -> Comparison {
        match self {
            Self::Warm => Comparison::Above,
            Self::Cold => Comparison::Below,
        }
    }
}

/// Configuration for a spell-duration index.
///
/// # Example
///
/// ```
/// use climdex_spell::{SpellConfig, SpellKind};
///
/// let config = SpellConfig::new(SpellKind::Cold).with_min_length(6);
/// assert_eq!(config.index_name(), "CSDI");
/// ```
#[derive(Debug, Clone)]
pub struct SpellConfig {
    kind: SpellKind,
    min_length: u32,
}

impl SpellConfig {
    /// Creates a configuration with the default minimum length of 6 days.
    pub fn new(kind: SpellKind) -> Self {
        Self {
            kind,
            min_length: DEFAULT_MIN_LENGTH,
        }
    }

    /// Sets the minimum spell length in days.
    pub fn with_min_length(mut self, min_length: u32) -> Self {
        self.min_length = min_length;
        self
    }

    // --- Accessors ---

    /// Returns the spell kind.
    pub fn kind(&self) -> SpellKind {
        self.kind
    }

    /// Returns the minimum spell length in days.
    pub fn min_length(&self) -> u32 {
        self.min_length
    }

    /// Number of leading days of the next year examined at a year boundary.
    pub fn lookahead_days(&self) -> usize {
        self.min_length as usize
    }

    /// Returns the event comparison of the configured kind.
    pub fn comparison(&self) -> Comparison {
        self.kind.comparison()
    }

    /// Returns the output index name of the configured kind.
    pub fn index_name(&self) -> &'static str {
        self.kind.index_name()
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), SpellError> {
        if self.min_length == 0 {
            return Err(SpellError::InvalidConfig {
                reason: "min_length must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
