//! Capacity selection
//!
//! Double hashing only reaches every slot when each key's stride is coprime
//! with the capacity. A prime capacity `p` satisfies this for all strides in
//! `1..=p - 2`; choosing `p - 2` prime as well spreads the strides evenly.

/// Capacity of `Table::default()`; 1019 and 1021 are twin primes
pub const DEFAULT_CAPACITY: usize = 1021;

/// Deterministic trial division
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut d: usize = 5;
    while d.checked_mul(d).is_some_and(|sq| sq <= n) {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }
    true
}

/// Smallest `p >= min` with both `p` and `p - 2` prime
///
/// Returns `None` only if the search runs past `usize::MAX`.
pub fn twin_prime_at_least(min: usize) -> Option<usize> {
    let mut p = min.max(5);
    loop {
        if is_prime(p) && is_prime(p - 2) {
            return Some(p);
        }
        p = p.checked_add(1)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let primes: Vec<usize> = (0..40).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
        assert!(is_prime(1021));
        assert!(!is_prime(1023));
    }

    #[test]
    fn test_twin_prime_at_least() {
        assert_eq!(twin_prime_at_least(0), Some(5));
        assert_eq!(twin_prime_at_least(6), Some(7));
        assert_eq!(twin_prime_at_least(8), Some(13));
        assert_eq!(twin_prime_at_least(14), Some(19));
        assert_eq!(twin_prime_at_least(1000), Some(1021));
    }

    #[test]
    fn test_default_capacity_is_twin_prime() {
        assert!(is_prime(DEFAULT_CAPACITY));
        assert!(is_prime(DEFAULT_CAPACITY - 2));
    }
}
