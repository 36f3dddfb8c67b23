use std::fmt;

use crate::Table;

/// Bucket utilisation of a [`Table`] at one point in time
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    /// Number of stored key-value pairs
    pub occupied: usize,
    /// Number of buckets
    pub capacity: usize,
    /// occupied / capacity
    pub load_factor: f64,
    /// Buckets holding no entries at all
    pub empty_buckets: usize,
    /// Length of the longest chain
    pub longest_chain: usize,
    /// `chain_histogram[n]` is the number of buckets holding exactly `n` entries
    pub chain_histogram: Vec<usize>,
}

impl<V> Table<V> {
    /// Collects chain-length statistics by walking every bucket
    pub fn stats(&self) -> TableStats {
        let longest_chain = self.buckets.iter().map(Vec::len).max().unwrap_or(0);

        let mut chain_histogram = vec![0; longest_chain + 1];
        for bucket in &self.buckets {
            chain_histogram[bucket.len()] += 1;
        }

        TableStats {
            occupied: self.occupied,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            empty_buckets: chain_histogram[0],
            longest_chain,
            chain_histogram,
        }
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Table Statistics ===")?;
        writeln!(
            f,
            "Population: {}/{} ({:.2}% load factor)",
            self.occupied,
            self.capacity,
            self.load_factor * 100.0
        )?;
        writeln!(f, "Empty buckets: {}", self.empty_buckets)?;
        writeln!(f, "Longest chain: {}", self.longest_chain)?;
        for (len, count) in self.chain_histogram.iter().enumerate() {
            writeln!(f, "  chain {len:>3}: {count}")?;
        }
        Ok(())
    }
}
