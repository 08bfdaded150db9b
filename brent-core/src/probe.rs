//! Double-hashing probe arithmetic
//!
//! For a table of capacity `m`:
//! - `primary(k) = k mod m`
//! - `step(k) = 1 + (k mod (m - 2))`
//! - `probe(origin, k, i) = (origin - i * step(k)) mod m`
//!
//! All remainders are Euclidean, so negative keys map into `0..m`.
//! A full scan visits every slot only when `step(k)` and `m` are coprime,
//! which holds for every key when `m` is prime.

use crate::slot::Key;

/// Probe parameters of one table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProbeSequence {
    capacity: usize,
}

impl ProbeSequence {
    /// Caller guarantees `capacity > 2`
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 2);
        ProbeSequence { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Home slot of a key
    #[inline(always)]
    pub fn primary(&self, key: Key) -> usize {
        euclid_mod(key, self.capacity)
    }

    /// Stride of a key, in `1..=capacity - 2`
    #[inline(always)]
    pub fn step(&self, key: Key) -> usize {
        1 + euclid_mod(key, self.capacity - 2)
    }

    /// Slot visited at attempt `i` when walking `key`'s stride from `origin`
    #[inline(always)]
    pub fn probe(&self, origin: usize, key: Key, i: usize) -> usize {
        let m = self.capacity as u128;
        let offset = (i as u128 * self.step(key) as u128) % m;
        ((origin as u128 % m + m - offset) % m) as usize
    }

    /// Slot visited at attempt `i` of a scan for `key`
    #[inline(always)]
    pub fn at(&self, key: Key, i: usize) -> usize {
        self.probe(self.primary(key), key, i)
    }

    /// The `capacity` slots a full scan for `key` visits, in order
    pub fn indices(&self, key: Key) -> impl Iterator<Item = usize> + '_ {
        let origin = self.primary(key);
        (0..self.capacity).map(move |i| self.probe(origin, key, i))
    }
}

#[inline(always)]
fn euclid_mod(key: Key, modulus: usize) -> usize {
    (key as i128).rem_euclid(modulus as i128) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_primary_and_step() {
        let seq = ProbeSequence::new(7);
        assert_eq!(seq.primary(10), 3);
        assert_eq!(seq.primary(17), 3);
        assert_eq!(seq.step(10), 1);
        assert_eq!(seq.step(17), 3);
        assert_eq!(seq.step(4), 5);
    }

    #[test]
    fn test_probe_walks_backwards() {
        let seq = ProbeSequence::new(7);
        // key 17: origin 3, stride 3
        let walk: Vec<usize> = seq.indices(17).collect();
        assert_eq!(walk, vec![3, 0, 4, 1, 5, 2, 6]);
        assert_eq!(seq.at(17, 2), 4);
    }

    #[test]
    fn test_probe_from_foreign_origin() {
        let seq = ProbeSequence::new(7);
        // key 3 has stride 4; one step back from slot 3 wraps to 6
        assert_eq!(seq.probe(3, 3, 1), 6);
        assert_eq!(seq.probe(3, 3, 0), 3);
    }

    #[test]
    fn test_negative_keys() {
        let seq = ProbeSequence::new(7);
        assert_eq!(seq.primary(-1), 6);
        assert_eq!(seq.step(-1), 5);
        assert_eq!(seq.primary(Key::MIN), (Key::MIN as i128).rem_euclid(7) as usize);
    }

    #[test]
    fn test_full_cycle_for_prime_capacity() {
        let seq = ProbeSequence::new(13);
        for key in -50..50 {
            let visited: HashSet<usize> = seq.indices(key).collect();
            assert_eq!(visited.len(), 13, "key {} must visit every slot", key);
        }
    }

    #[test]
    fn test_smallest_capacity() {
        let seq = ProbeSequence::new(3);
        assert_eq!(seq.step(123), 1);
        let visited: Vec<usize> = seq.indices(5).collect();
        assert_eq!(visited, vec![2, 1, 0]);
    }

    #[test]
    fn test_large_attempt_does_not_overflow() {
        let seq = ProbeSequence::new(1021);
        let idx = seq.probe(1020, Key::MAX, usize::MAX);
        assert!(idx < 1021);
    }
}
