use soroban_sdk::{contracterror, contracttype, Address, Env, Vec};

/// Number of sale tiers.
pub const TIER_COUNT: u32 = 4;

/// Basis-point denominator used for tier and claim percentages.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Storage keys for contract data. Per-account keys carry the reset epoch
/// they were written in, so a reset orphans them without touching each one.
#[contracttype]
pub enum DataKey {
    Admin,                       // Contract administrator
    SaleToken,                   // Token being sold and vested
    PayToken,                    // Token accepted as payment
    VotingPower,                 // Snapshot provider (lock contract)
    Treasury,                    // Receives round-1 payments and proceeds
    LiquidityVault,              // Receives the vault share of round-2 proceeds
    Config,                      // SaleConfig
    Ledger,                      // SaleLedger
    Epoch,                       // u32, bumped by reset_all_data
    Whitelist(u32, Address),     // (epoch, account) -> registered tier
    UserExclusive(u32, Address), // (epoch, account) -> UserExclusive
    UserOpen(u32, Address),      // (epoch, account) -> UserOpen
    UserClaim(u32, Address),     // (epoch, account) -> UserClaim
}

/// Division policy applied to price conversions and checkpoint rewards.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rounding {
    Down, // Truncate toward zero
    Up,   // Round any remainder up
}

/// Everything `set_all_setting` configures before the sale opens.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    /// Minimum snapshot voting power for tiers 1..=4, strictly increasing.
    pub tier_thresholds: Vec<i128>,
    /// Share of the round-1 supply reserved for each tier, in basis points.
    pub tier_percents: Vec<u32>,
    /// Sale tokens offered in the exclusive round.
    pub round1_sale_amount: i128,
    /// Sale tokens offered in the open round.
    pub round2_sale_amount: i128,
    /// Part of the round-2 proceeds, in sale-token terms, routed to the liquidity vault.
    pub liquidity_vault_amount: i128,
    pub sale_token_price: i128,
    pub pay_token_price: i128,
    /// Timestamp at which voting power is read.
    pub snapshot: u64,
    pub whitelist_start: u64,
    pub whitelist_end: u64,
    pub exclusive_start: u64,
    pub exclusive_end: u64,
    pub deposit_start: u64,
    pub deposit_end: u64,
    pub claim_counts: u32,
    pub claim_times: Vec<u64>,
    /// Unlock share of each checkpoint, in basis points.
    pub claim_percents: Vec<u32>,
    pub rounding: Rounding,
}

/// Global counters of one sale instance.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleLedger {
    pub total_whitelists: u32,
    /// Sale tokens bought in round 1.
    pub total_ex_sale_amount: i128,
    /// Pay tokens spent in round 1.
    pub total_ex_purchased_amount: i128,
    /// Pay tokens deposited in round 2.
    pub total_deposit_amount: i128,
    /// Sale tokens of the round-2 accounts settled so far.
    pub total_open_sale_amount: i128,
    /// Pay tokens consumed in round 2, fixed at finalization.
    pub total_open_purchased_amount: i128,
    /// Registered accounts per tier, index 0 is tier 1.
    pub tiers_account: Vec<u32>,
    /// Accounts per tier that bought in round 1.
    pub tiers_ex_account: Vec<u32>,
    pub open_finalized: bool,
    pub deposit_withdrawn: bool,
}

impl SaleLedger {
    pub fn new(env: &Env) -> Self {
        let mut zeroes = Vec::new(env);
        for _ in 0..TIER_COUNT {
            zeroes.push_back(0u32);
        }
        Self {
            total_whitelists: 0,
            total_ex_sale_amount: 0,
            total_ex_purchased_amount: 0,
            total_deposit_amount: 0,
            total_open_sale_amount: 0,
            total_open_purchased_amount: 0,
            tiers_account: zeroes.clone(),
            tiers_ex_account: zeroes,
            open_finalized: false,
            deposit_withdrawn: false,
        }
    }

    /// True when no account has touched the sale yet.
    pub fn is_empty(&self) -> bool {
        self.total_whitelists == 0
            && self.total_ex_purchased_amount == 0
            && self.total_deposit_amount == 0
            && !self.open_finalized
    }
}

/// Round-1 purchase of one account
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserExclusive {
    pub tier: u32,
    pub pay_amount: i128,
    pub sale_amount: i128,
}

/// One deposit call, placed on the cumulative round-2 deposit line
/// `[start, start + amount)`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositSlice {
    pub start: i128,
    pub amount: i128,
}

/// Round-2 deposit of one account. `pay_amount`, `sale_amount` and
/// `refund_amount` are derived from the slices once the deposit window closes.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserOpen {
    pub deposit_amount: i128,
    pub slices: Vec<DepositSlice>,
    pub pay_amount: i128,
    pub sale_amount: i128,
    pub refund_amount: i128,
    pub settled: bool,
    pub refunded: bool,
}

/// Vesting progress of one account
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserClaim {
    pub claim_amount: i128,
    pub claimed_rounds: u32,
    pub total_claim: i128,
}

/// Result of `calcul_claim_amount`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimQuote {
    pub reward: i128,
    pub total_claim: i128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ClaimStatus {
    NotStarted,
    Accruing,
    FullyClaimed,
}

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,      // Contract not initialized
    AlreadyInitialized = 2,  // Contract already setup
    NotAdmin = 3,            // Caller is not the admin
    InvalidConfig = 4,       // Rejected by setting validation
    NotConfigured = 5,       // set_all_setting never called
    SaleInProgress = 6,      // Settings locked once the sale has activity
    NotEligible = 7,         // Voting power below tier 1
    AlreadyRegistered = 8,   // Account already whitelisted
    NotWhitelisted = 9,      // Exclusive sale requires whitelisting
    WindowClosed = 10,       // Outside the whitelist window
    WindowNotOpen = 11,      // Outside the exclusive or deposit window
    CapExceeded = 12,        // Tier or round cap reached
    InvalidAmount = 13,      // Zero or negative amount
    DepositNotClosed = 14,   // Deposit window still running
    NothingToClaim = 15,     // No entitlement or before the first checkpoint
    NothingToRefund = 16,    // No refund or already refunded
    AlreadyWithdrawn = 17,   // Round-2 proceeds already withdrawn
    InvalidRound = 18,       // Checkpoint index out of range
    TransferFailed = 19,     // Token transfer rejected
    ArithmeticOverflow = 20, // Checked arithmetic failed
}
