//! Content digest of a table
//!
//! Each occupied entry is hashed with BLAKE3 and the entry hashes are XORed,
//! so the digest depends on which key/value pairs are present and not on
//! the slots they landed in. Tables filled by plain double hashing and by
//! Brent's variant compare equal when they hold the same entries.

use blake3::Hasher;

use crate::slot::Key;

/// 32-byte BLAKE3 digest
pub type DigestBytes = [u8; 32];

/// Order-independent digest of a set of entries
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    root: DigestBytes,
    count: usize,
}

impl ContentDigest {
    pub fn empty() -> Self {
        ContentDigest {
            root: [0u8; 32],
            count: 0,
        }
    }

    /// Combine entry hashes (XOR is commutative, order does not matter)
    pub fn from_hashes<I>(hashes: I) -> Self
    where
        I: IntoIterator<Item = DigestBytes>,
    {
        let mut root = [0u8; 32];
        let mut count = 0;

        for hash in hashes {
            for (acc, byte) in root.iter_mut().zip(hash.iter()) {
                *acc ^= byte;
            }
            count += 1;
        }

        ContentDigest { root, count }
    }

    /// Hash one key/value pair
    ///
    /// The key is framed as 8 little-endian bytes ahead of the value bytes.
    pub fn hash_entry<T: AsRef<[u8]>>(key: Key, value: T) -> DigestBytes {
        let mut hasher = Hasher::new();
        hasher.update(&key.to_le_bytes());
        hasher.update(value.as_ref());
        *hasher.finalize().as_bytes()
    }

    pub fn root(&self) -> &DigestBytes {
        &self.root
    }

    /// Number of entries folded in
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for ContentDigest {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_digest() {
        let digest = ContentDigest::empty();
        assert_eq!(digest.count(), 0);
        assert_eq!(digest.root(), &[0u8; 32]);
        assert_eq!(digest, ContentDigest::from_hashes(Vec::new()));
    }

    #[test]
    fn test_single_entry() {
        let hash = ContentDigest::hash_entry(1, b"one");
        let digest = ContentDigest::from_hashes(vec![hash]);
        assert_eq!(digest.count(), 1);
        assert_eq!(digest.root(), &hash);
    }

    #[test]
    fn test_order_independent() {
        let a = ContentDigest::hash_entry(1, b"one");
        let b = ContentDigest::hash_entry(2, b"two");

        let forward = ContentDigest::from_hashes(vec![a, b]);
        let reversed = ContentDigest::from_hashes(vec![b, a]);

        assert_eq!(forward, reversed, "XOR should be order-independent");
    }

    #[test]
    fn test_key_is_part_of_entry() {
        let a = ContentDigest::hash_entry(1, b"same");
        let b = ContentDigest::hash_entry(2, b"same");
        assert_ne!(a, b);
    }
}
