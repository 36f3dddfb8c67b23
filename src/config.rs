use crate::TableError;

/// Construction parameters of a [`Table`](crate::Table)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets allocated up front
    pub initial_capacity: usize,
    /// Ratio of entries to buckets at which the table doubles
    pub load_factor_threshold: f64,
}

impl TableConfig {
    pub const DEFAULT_CAPACITY: usize = 50;
    pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;
    /// Largest bucket array a table may ever allocate
    pub const MAX_BUCKETS: usize = isize::MAX as usize / size_of::<Vec<u8>>();

    pub const fn new() -> Self {
        Self {
            initial_capacity: Self::DEFAULT_CAPACITY,
            load_factor_threshold: Self::DEFAULT_LOAD_FACTOR,
        }
    }

    pub fn with_initial_capacity(mut self, cap: usize) -> Self {
        self.initial_capacity = cap;
        self
    }

    pub fn with_load_factor_threshold(mut self, threshold: f64) -> Self {
        self.load_factor_threshold = threshold;
        self
    }

    /// Checks that the configuration describes a usable table
    ///
    /// # Errors
    ///
    /// - [`TableError::ZeroCapacity`] if `initial_capacity` is 0
    /// - [`TableError::CapacityTooLarge`] if it exceeds [`Self::MAX_BUCKETS`]
    /// - [`TableError::InvalidLoadFactor`] if the threshold is NaN,
    ///   infinite, outside of the open interval `(0, 1)`, or so small that
    ///   a single entry would need more than [`Self::MAX_BUCKETS`] buckets
    pub fn validate(&self) -> Result<(), TableError> {
        match self.initial_capacity {
            0 => return Err(TableError::ZeroCapacity),
            capacity if capacity > Self::MAX_BUCKETS => {
                return Err(TableError::CapacityTooLarge { capacity });
            }
            _ => {}
        }

        let threshold = self.load_factor_threshold;
        if !threshold.is_finite() || threshold <= 0.0 || threshold >= 1.0 {
            return Err(TableError::InvalidLoadFactor { threshold });
        }
        if 1.0 / Self::MAX_BUCKETS as f64 >= threshold {
            return Err(TableError::InvalidLoadFactor { threshold });
        }

        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::TableConfig;
    use crate::TableError;

    #[test]
    fn defaults() {
        let cfg = TableConfig::default();
        assert_eq!(cfg.initial_capacity, 50);
        assert_eq!(cfg.load_factor_threshold, 0.75);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn zero_capacity() {
        let cfg = TableConfig::default().with_initial_capacity(0);
        assert_eq!(cfg.validate(), Err(TableError::ZeroCapacity));
    }

    #[test]
    fn load_factor_out_of_range() {
        for threshold in [0.0, 1.0, -0.5, 1.5, f64::NAN, f64::INFINITY] {
            let cfg = TableConfig::default().with_load_factor_threshold(threshold);
            assert!(
                matches!(cfg.validate(), Err(TableError::InvalidLoadFactor { .. })),
                "threshold {threshold} should be rejected"
            );
        }
    }

    #[test]
    fn capacity_too_large() {
        let cfg = TableConfig::default().with_initial_capacity(TableConfig::MAX_BUCKETS + 1);
        assert_eq!(
            cfg.validate(),
            Err(TableError::CapacityTooLarge {
                capacity: TableConfig::MAX_BUCKETS + 1
            })
        );
    }

    #[test]
    fn threshold_unreachable_within_max_buckets() {
        for threshold in [1e-20, f64::MIN_POSITIVE, 1.0 / TableConfig::MAX_BUCKETS as f64] {
            let cfg = TableConfig::default()
                .with_initial_capacity(1)
                .with_load_factor_threshold(threshold);
            assert_eq!(
                cfg.validate(),
                Err(TableError::InvalidLoadFactor { threshold })
            );
        }
    }

    #[test]
    fn load_factor_in_range() {
        for threshold in [0.01, 0.5, 0.75, 0.99] {
            let cfg = TableConfig::default()
                .with_initial_capacity(1)
                .with_load_factor_threshold(threshold);
            assert_eq!(cfg.validate(), Ok(()));
        }
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            TableError::ZeroCapacity.to_string(),
            "initial capacity must be at least 1, got 0"
        );
        assert_eq!(
            TableError::InvalidLoadFactor { threshold: 1.5 }.to_string(),
            "load factor threshold must be in (0, 1), got: 1.5"
        );
    }
}
