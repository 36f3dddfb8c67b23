/// Multiplier of the polynomial string hash
pub const PRIME: u128 = 31;

/// Maps `key` onto a bucket index in `0..capacity`
///
/// Every character's scalar value is folded into a running accumulator,
/// `acc = (acc * 31 + c) mod capacity`. The result depends on `capacity`,
/// so an index computed for one bucket count is meaningless for another.
///
/// # Panics
///
/// Panics if `capacity` is 0
pub fn bucket_index(key: &str, capacity: usize) -> usize {
    assert!(capacity > 0, "cannot hash into a table without buckets");

    let cap = capacity as u128;
    let acc = key
        .chars()
        .fold(0u128, |acc, c| (acc * PRIME + c as u128) % cap);

    // acc < capacity, so it fits back into usize
    acc as usize
}
