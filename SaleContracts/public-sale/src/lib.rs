#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env};

mod access;
mod events;
mod exclusive;
mod external;
mod math;
mod open_sale;
mod settings;
mod settlement;
mod tiers;
mod tracking;
mod types;
mod vesting;

use crate::access::AccessManager;
use crate::exclusive::ExclusiveSaleManager;
use crate::open_sale::OpenSaleManager;
use crate::settings::SettingsManager;
use crate::settlement::SettlementManager;
use crate::tiers::TierManager;
use crate::tracking::TrackingManager;
use crate::vesting::VestingManager;

pub use crate::types::{
    ClaimQuote, ClaimStatus, DataKey, Error, Rounding, SaleConfig, SaleLedger, UserClaim,
    UserExclusive, UserOpen,
};

#[contract]
pub struct PublicSaleContract;

#[contractimpl]
impl PublicSaleContract {
    /// Initialize the contract with its admin and the addresses it talks to
    pub fn initialize(
        env: Env,
        admin: Address,
        sale_token: Address,
        pay_token: Address,
        voting_power: Address,
        treasury: Address,
        liquidity_vault: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();
        let storage = env.storage().instance();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::SaleToken, &sale_token);
        storage.set(&DataKey::PayToken, &pay_token);
        storage.set(&DataKey::VotingPower, &voting_power);
        storage.set(&DataKey::Treasury, &treasury);
        storage.set(&DataKey::LiquidityVault, &liquidity_vault);
        TrackingManager::save_ledger(&env, &SaleLedger::new(&env));

        env.events().publish((events::INIT,), (admin,));
        Ok(())
    }

    /// Configure tiers, windows, prices and the claim schedule
    pub fn set_all_setting(env: Env, admin: Address, config: SaleConfig) -> Result<(), Error> {
        SettingsManager::set_all_setting(&env, &admin, config)
    }

    pub fn set_admin(env: Env, admin: Address, new_admin: Address) -> Result<(), Error> {
        AccessManager::set_admin(&env, &admin, &new_admin)
    }

    pub fn is_admin(env: Env, address: Address) -> bool {
        AccessManager::is_admin(&env, &address)
    }

    // Tiers

    pub fn voting_power(env: Env, account: Address) -> Result<i128, Error> {
        TierManager::voting_power(&env, &account)
    }

    pub fn tier_of(env: Env, account: Address) -> Result<u32, Error> {
        TierManager::tier_of(&env, &account)
    }

    /// Register for the exclusive round in the tier the snapshot qualifies for
    pub fn add_whitelist(env: Env, account: Address) -> Result<u32, Error> {
        account.require_auth();
        TierManager::add_whitelist(&env, &account)
    }

    pub fn is_whitelisted(env: Env, account: Address) -> bool {
        TrackingManager::registered_tier(&env, &account).is_some()
    }

    /// Round-1 cap of `account` in sale tokens
    pub fn tier_allocation(env: Env, account: Address) -> Result<i128, Error> {
        TierManager::tier_allocation(&env, &account)
    }

    pub fn tier_pool(env: Env, tier: u32) -> Result<i128, Error> {
        let config = TrackingManager::get_config(&env)?;
        TierManager::tier_pool(&config, tier)
    }

    pub fn tiers_account(env: Env, tier: u32) -> u32 {
        TierManager::tiers_account(&env, tier)
    }

    pub fn tiers_ex_account(env: Env, tier: u32) -> u32 {
        TierManager::tiers_ex_account(&env, tier)
    }

    // Round 1

    /// Buy exclusive-round tokens for `amount` pay tokens
    pub fn exclusive_sale(env: Env, account: Address, amount: i128) -> Result<(), Error> {
        account.require_auth();
        ExclusiveSaleManager::exclusive_sale(&env, &account, amount)
    }

    pub fn pay_to_sale_amount(env: Env, pay_amount: i128) -> Result<i128, Error> {
        let config = TrackingManager::get_config(&env)?;
        math::pay_to_sale(&config, pay_amount)
    }

    pub fn sale_to_pay_amount(env: Env, sale_amount: i128) -> Result<i128, Error> {
        let config = TrackingManager::get_config(&env)?;
        math::sale_to_pay(&config, sale_amount)
    }

    // Round 2

    /// Deposit pay tokens into the open round
    pub fn deposit(env: Env, account: Address, amount: i128) -> Result<(), Error> {
        account.require_auth();
        OpenSaleManager::deposit(&env, &account, amount)
    }

    /// Close the open round; returns the pay tokens it consumed
    pub fn finalize_open_sale(env: Env) -> Result<i128, Error> {
        let ledger = OpenSaleManager::finalize(&env)?;
        Ok(ledger.total_open_purchased_amount)
    }

    pub fn open_allocation(env: Env, account: Address) -> Result<UserOpen, Error> {
        OpenSaleManager::open_allocation(&env, &account)
    }

    // Vesting

    pub fn calcul_claim_amount(env: Env, account: Address, round: u32) -> Result<ClaimQuote, Error> {
        VestingManager::calcul_claim_amount(&env, &account, round)
    }

    pub fn checkpoint_reward(env: Env, account: Address, round: u32) -> Result<i128, Error> {
        VestingManager::checkpoint_reward(&env, &account, round)
    }

    /// Claim every unlocked checkpoint; returns the sale tokens paid
    pub fn claim(env: Env, account: Address) -> Result<i128, Error> {
        account.require_auth();
        VestingManager::claim(&env, &account)
    }

    pub fn claim_status(env: Env, account: Address) -> Result<ClaimStatus, Error> {
        VestingManager::claim_status(&env, &account)
    }

    // Settlement

    /// Pay back the unconsumed part of an open-round deposit
    pub fn refund(env: Env, account: Address) -> Result<i128, Error> {
        account.require_auth();
        SettlementManager::refund(&env, &account)
    }

    /// Move the consumed open-round proceeds to the vault and the treasury
    pub fn deposit_withdraw(env: Env, admin: Address) -> Result<i128, Error> {
        let withdrawn = SettlementManager::deposit_withdraw(&env, &admin)?;
        math::checked_add(withdrawn.vault_amount, withdrawn.treasury_amount)
    }

    pub fn reset_all_data(env: Env, admin: Address) -> Result<(), Error> {
        SettlementManager::reset_all_data(&env, &admin)?;
        Ok(())
    }

    // Views

    pub fn get_config(env: Env) -> Result<SaleConfig, Error> {
        TrackingManager::get_config(&env)
    }

    /// Global counters; round-2 totals are provisional until finalization
    pub fn get_ledger(env: Env) -> Result<SaleLedger, Error> {
        let mut ledger = TrackingManager::load_ledger(&env);
        let (sale, purchased) = OpenSaleManager::open_totals(&env, &ledger)?;
        ledger.total_open_sale_amount = sale;
        ledger.total_open_purchased_amount = purchased;
        Ok(ledger)
    }

    pub fn get_user_exclusive(env: Env, account: Address) -> UserExclusive {
        TrackingManager::user_exclusive(&env, &account)
    }

    pub fn get_user_open(env: Env, account: Address) -> UserOpen {
        TrackingManager::user_open(&env, &account)
    }

    pub fn get_user_claim(env: Env, account: Address) -> UserClaim {
        TrackingManager::user_claim(&env, &account)
    }
}
