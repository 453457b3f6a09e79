//! Quorum fraction arithmetic.
//!
//! A quorum `num/denom` over `n` members is satisfied by `count` agreeing
//! members when `count * denom >= num * n`, i.e. `count >= ceil(num * n / denom)`.
//! The products are evaluated in `u128` so no realistic validator count can
//! overflow them.

use std::fmt;

use cosmwasm_schema::cw_serde;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QuorumError {
    #[error("Invalid quorum {num}/{denom}: numerator must be between 1 and the denominator")]
    Degenerate { num: u64, denom: u64 },
}

/// Validated quorum fraction, `0 < num <= denom`.
#[cw_serde]
#[derive(Copy, Eq)]
pub struct Quorum {
    pub num: u64,
    pub denom: u64,
}

impl Quorum {
    pub fn new(num: u64, denom: u64) -> Result<Self, QuorumError> {
        if num == 0 || num > denom {
            return Err(QuorumError::Degenerate { num, denom });
        }
        Ok(Self { num, denom })
    }

    /// Re-checks a value that arrived through deserialization.
    pub fn validate(&self) -> Result<(), QuorumError> {
        Self::new(self.num, self.denom).map(|_| ())
    }

    /// Minimum number of agreeing members out of `members`.
    pub fn min_signers(&self, members: u64) -> u64 {
        let product = self.num as u128 * members as u128;
        let denom = self.denom as u128;
        ((product + denom - 1) / denom) as u64
    }

    /// Whether `count` agreeing members satisfy the quorum over `members`.
    ///
    /// An empty membership never reaches quorum.
    pub fn is_reached(&self, count: u64, members: u64) -> bool {
        members > 0
            && self.denom > 0
            && count as u128 * self.denom as u128 >= self.num as u128 * members as u128
    }
}

impl fmt::Display for Quorum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.denom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_fractions() {
        assert_eq!(
            Quorum::new(0, 3),
            Err(QuorumError::Degenerate { num: 0, denom: 3 })
        );
        assert_eq!(
            Quorum::new(4, 3),
            Err(QuorumError::Degenerate { num: 4, denom: 3 })
        );
        assert!(Quorum::new(3, 3).is_ok());
    }

    #[test]
    fn test_min_signers_rounds_up() {
        assert_eq!(Quorum::new(19, 30).unwrap().min_signers(3), 2);
        assert_eq!(Quorum::new(2, 3).unwrap().min_signers(3), 2);
        assert_eq!(Quorum::new(99, 100).unwrap().min_signers(2), 2);
        assert_eq!(Quorum::new(29, 40).unwrap().min_signers(4), 3);
        assert_eq!(Quorum::new(1, 2).unwrap().min_signers(4), 2);
        assert_eq!(Quorum::new(1, 2).unwrap().min_signers(5), 3);
        assert_eq!(Quorum::new(1, 1).unwrap().min_signers(7), 7);
    }

    #[test]
    fn test_threshold_is_exact_boundary() {
        for (num, denom) in [(1u64, 2u64), (2, 3), (19, 30), (29, 40), (99, 100), (7, 7)] {
            let quorum = Quorum::new(num, denom).unwrap();
            for members in 1..=25u64 {
                let min = quorum.min_signers(members);
                assert!(min >= 1 && min <= members);
                assert!(quorum.is_reached(min, members), "{quorum} of {members}");
                assert!(!quorum.is_reached(min - 1, members), "{quorum} of {members}");
            }
        }
    }

    #[test]
    fn test_empty_membership_never_reaches_quorum() {
        let quorum = Quorum::new(1, 2).unwrap();
        assert!(!quorum.is_reached(0, 0));
        assert!(!quorum.is_reached(1, 0));
    }

    #[test]
    fn test_validate_catches_deserialized_garbage() {
        let raw = Quorum { num: 5, denom: 0 };
        assert!(raw.validate().is_err());
        assert!(!raw.is_reached(10, 1));
    }
}
