//! Per-round vote book.
//!
//! Voters cast at most one ballot per round. Ballots are tallied per distinct
//! payload hash, so two voters only agree when they submitted byte-identical
//! payloads. A round is whatever the caller keys it by: a proposal period for
//! governance, a deposit id for attestations.

use cosmwasm_std::{Addr, Order, StdError, StdResult, Storage};
use cw_storage_plus::Map;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum BallotError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{voter} already voted for a different payload in round {round}")]
    ConflictingVote { voter: String, round: u64 },
}

/// Outcome of casting a ballot.
#[derive(Debug, Clone, PartialEq)]
pub enum Ballot {
    /// New ballot stored; `voters` is everyone who backs the same payload.
    Recorded { voters: Vec<Addr> },
    /// The voter had already cast this exact ballot.
    Repeated,
}

pub struct VoteBook<'a> {
    tallies: Map<'a, (u64, Vec<u8>), Vec<Addr>>,
    ballots: Map<'a, (u64, Addr), Vec<u8>>,
}

impl<'a> VoteBook<'a> {
    pub const fn new(tallies_namespace: &'a str, ballots_namespace: &'a str) -> Self {
        Self {
            tallies: Map::new(tallies_namespace),
            ballots: Map::new(ballots_namespace),
        }
    }

    pub fn cast(
        &self,
        storage: &mut dyn Storage,
        round: u64,
        payload: &[u8; 32],
        voter: &Addr,
    ) -> Result<Ballot, BallotError> {
        if let Some(previous) = self.ballots.may_load(storage, (round, voter.clone()))? {
            if previous.as_slice() == payload.as_slice() {
                return Ok(Ballot::Repeated);
            }
            return Err(BallotError::ConflictingVote {
                voter: voter.to_string(),
                round,
            });
        }
        self.ballots
            .save(storage, (round, voter.clone()), &payload.to_vec())?;

        let key = (round, payload.to_vec());
        let mut voters = self.tallies.may_load(storage, key.clone())?.unwrap_or_default();
        voters.push(voter.clone());
        self.tallies.save(storage, key, &voters)?;

        Ok(Ballot::Recorded { voters })
    }

    /// Everyone who voted for `payload` in `round`, in casting order.
    pub fn voters(&self, storage: &dyn Storage, round: u64, payload: &[u8]) -> StdResult<Vec<Addr>> {
        Ok(self
            .tallies
            .may_load(storage, (round, payload.to_vec()))?
            .unwrap_or_default())
    }

    /// The payload hash `voter` backs in `round`, if any.
    pub fn ballot_of(
        &self,
        storage: &dyn Storage,
        round: u64,
        voter: &Addr,
    ) -> StdResult<Option<Vec<u8>>> {
        self.ballots.may_load(storage, (round, voter.clone()))
    }

    /// All tallies of a round, ordered by payload hash.
    pub fn tallies(&self, storage: &dyn Storage, round: u64) -> StdResult<Vec<(Vec<u8>, Vec<Addr>)>> {
        self.tallies
            .prefix(round)
            .range(storage, None, None, Order::Ascending)
            .collect()
    }
}

/// Number of `voters` that still pass `is_member`.
pub fn count_members<F>(voters: &[Addr], is_member: F) -> u64
where
    F: Fn(&Addr) -> bool,
{
    voters.iter().filter(|voter| is_member(voter)).count() as u64
}
