//! A string-keyed hash table.
//!
//! [`Table`] maps `String` keys to values of any type. Keys are hashed with a
//! polynomial string hash, collisions are resolved by separate chaining, and
//! the bucket array doubles whenever the load factor reaches the configured
//! threshold.
//!
//! ```
//! use strtable::Table;
//!
//! let mut reviews = Table::new();
//! reviews.set("Grimms' Fairy Tales", "Masterpiece.");
//! reviews.set("Pride and Prejudice", "Very enjoyable.");
//!
//! assert_eq!(reviews.get("Grimms' Fairy Tales"), Some(&"Masterpiece."));
//! assert!(!reviews.has("Les Misérables"));
//! assert!(reviews.remove("Pride and Prejudice"));
//! assert_eq!(reviews.size(), 1);
//! ```

mod config;
mod error;
pub mod hash;
#[cfg(feature = "stats")]
mod stats;
pub mod table;

pub use config::TableConfig;
pub use error::TableError;
#[cfg(feature = "stats")]
pub use stats::TableStats;
pub use table::Table;

/// A stored key-value pair
///
/// The original key is kept next to its value so it survives hashing and can
/// be handed back by removal and enumeration.
#[derive(Debug, Clone)]
pub(crate) struct Entry<V> {
    key: String,
    value: V,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: String, value: V) -> Self {
        Self { key, value }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn into_pair(self) -> (String, V) {
        (self.key, self.value)
    }
}
