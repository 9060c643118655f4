//! Table configuration: defaults, load-factor clamping, capacity normalisation.

use crate::probe::{next_coprime_capacity, PROBE_STEP};
use core::fmt;

/// Initial capacity used when none is given.
pub const DEFAULT_INITIAL_CAPACITY: usize = 500;
/// Load factor used when none is given.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;
/// Capacities below this are raised so that a threshold in
/// `[1, capacity - 1]` exists.
pub(crate) const MIN_CAPACITY: usize = 2;

/// Rejected configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The initial capacity was zero.
    ZeroCapacity,
    /// The load factor was NaN and cannot be clamped.
    LoadFactorNotANumber,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroCapacity => f.write_str("initial capacity must be positive"),
            ConfigError::LoadFactorNotANumber => f.write_str("load factor must not be NaN"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Requested construction parameters for a [`ProbingHashTable`].
///
/// Nothing is checked until [`TableConfig::validate`] runs (which every
/// constructor does).
///
/// [`ProbingHashTable`]: crate::ProbingHashTable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Check the request and derive the parameters the table actually uses.
    ///
    /// - the load factor is clamped into `[0.0, 1.0]`;
    /// - the capacity is raised to at least 2, then to the next value
    ///   coprime with the probe step.
    pub fn validate(&self) -> Result<Validated, ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.load_factor.is_nan() {
            return Err(ConfigError::LoadFactorNotANumber);
        }
        let load_factor = self.load_factor.clamp(0.0, 1.0);
        let capacity = next_coprime_capacity(self.initial_capacity.max(MIN_CAPACITY), PROBE_STEP);
        Ok(Validated {
            capacity,
            load_factor,
        })
    }
}

/// Output of [`TableConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Validated {
    pub capacity: usize,
    pub load_factor: f64,
}

/// Number of live entries at which the table grows.
///
/// `floor(capacity * load_factor)`, bounded to `[1, capacity - 1]` so at
/// least one slot always stays Empty.
pub(crate) fn threshold_for(capacity: usize, load_factor: f64) -> usize {
    debug_assert!(capacity >= MIN_CAPACITY);
    let raw = (capacity as f64 * load_factor).floor() as usize;
    raw.clamp(1, capacity - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: defaults match the documented constants and need no adjustment.
    #[test]
    fn defaults_validate_unchanged() {
        let v = TableConfig::default().validate().unwrap();
        assert_eq!(v.capacity, DEFAULT_INITIAL_CAPACITY);
        assert_eq!(v.load_factor, DEFAULT_LOAD_FACTOR);
        assert_eq!(threshold_for(v.capacity, v.load_factor), 250);
    }

    /// Invariant: out-of-range load factors are clamped, not rejected.
    #[test]
    fn load_factor_is_clamped() {
        let hi = TableConfig::new().with_load_factor(3.5).validate().unwrap();
        assert_eq!(hi.load_factor, 1.0);
        let lo = TableConfig::new().with_load_factor(-0.25).validate().unwrap();
        assert_eq!(lo.load_factor, 0.0);
        let inf = TableConfig::new()
            .with_load_factor(f64::NEG_INFINITY)
            .validate()
            .unwrap();
        assert_eq!(inf.load_factor, 0.0);
    }

    /// Invariant: zero capacity and NaN load factor are rejected.
    #[test]
    fn invalid_inputs_rejected() {
        assert_eq!(
            TableConfig::new().with_capacity(0).validate(),
            Err(ConfigError::ZeroCapacity)
        );
        assert_eq!(
            TableConfig::new().with_load_factor(f64::NAN).validate(),
            Err(ConfigError::LoadFactorNotANumber)
        );
        assert_eq!(
            ConfigError::ZeroCapacity.to_string(),
            "initial capacity must be positive"
        );
    }

    /// Invariant: capacities are raised to the minimum and past multiples of the step.
    #[test]
    fn capacity_normalisation() {
        let cap = |c| TableConfig::new().with_capacity(c).validate().unwrap().capacity;
        assert_eq!(cap(1), 2);
        assert_eq!(cap(4), 4);
        assert_eq!(cap(7), 8);
        assert_eq!(cap(49), 50);
    }

    /// Invariant: the threshold never reaches the capacity and never drops to zero.
    #[test]
    fn threshold_bounds() {
        assert_eq!(threshold_for(4, 0.5), 2);
        assert_eq!(threshold_for(8, 0.5), 4);
        assert_eq!(threshold_for(10, 1.0), 9);
        assert_eq!(threshold_for(10, 0.0), 1);
        assert_eq!(threshold_for(2, 0.5), 1);
        assert_eq!(threshold_for(3, 0.75), 2);
    }
}
