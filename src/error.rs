use thiserror::Error;

/// Errors raised while configuring a [`Table`](crate::Table)
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum TableError {
    /// A table needs at least one bucket to hash into
    #[error("initial capacity must be at least 1, got 0")]
    ZeroCapacity,

    /// More buckets requested than a bucket array can hold
    #[error("initial capacity of {capacity} buckets exceeds the maximum")]
    CapacityTooLarge { capacity: usize },

    /// The load factor threshold has to lie strictly between 0 and 1,
    /// and be reachable without exceeding the maximum bucket count
    #[error("load factor threshold must be in (0, 1), got: {threshold}")]
    InvalidLoadFactor { threshold: f64 },
}
