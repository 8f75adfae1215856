use soroban_sdk::{contractclient, Address};

/// Interface of the lock contract that reports voting power.
///
/// `balance_of_at` must be final for any timestamp in the past; the sale
/// only ever reads it at the configured snapshot.
#[allow(dead_code)]
#[contractclient(name = "VotingPowerClient")]
pub trait VotingPowerSource {
    /// Voting power of `account` at `timestamp`.
    fn balance_of_at(account: Address, timestamp: u64) -> i128;
}
