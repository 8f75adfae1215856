use crate::access::AccessManager;
use crate::events;
use crate::external::VotingPowerClient;
use crate::math;
use crate::tracking::TrackingManager;
use crate::types::{DataKey, Error, Rounding, SaleConfig, TIER_COUNT};
use soroban_sdk::{log, Address, Env};

pub struct TierManager;

impl TierManager {
    /// Voting power of `account` at the configured snapshot.
    pub fn voting_power(env: &Env, account: &Address) -> Result<i128, Error> {
        let config = TrackingManager::get_config(env)?;
        let provider = AccessManager::address(env, &DataKey::VotingPower)?;
        Ok(VotingPowerClient::new(env, &provider).balance_of_at(account, &config.snapshot))
    }

    /// Highest tier whose threshold `power` reaches.
    pub fn tier_for_power(config: &SaleConfig, power: i128) -> Option<u32> {
        let mut tier = None;
        for (index, threshold) in config.tier_thresholds.iter().enumerate() {
            if power >= threshold {
                tier = Some(index as u32 + 1);
            }
        }
        tier
    }

    pub fn tier_of(env: &Env, account: &Address) -> Result<u32, Error> {
        let config = TrackingManager::get_config(env)?;
        let power = Self::voting_power(env, account)?;
        Self::tier_for_power(&config, power).ok_or(Error::NotEligible)
    }

    /// Whitelist `account` in the tier its snapshot power qualifies for.
    pub fn add_whitelist(env: &Env, account: &Address) -> Result<u32, Error> {
        let config = TrackingManager::get_config(env)?;
        let now = env.ledger().timestamp();
        if now < config.whitelist_start || now >= config.whitelist_end {
            return Err(Error::WindowClosed);
        }
        if TrackingManager::registered_tier(env, account).is_some() {
            return Err(Error::AlreadyRegistered);
        }
        let tier = Self::tier_of(env, account)?;

        let mut ledger = TrackingManager::load_ledger(env);
        let index = tier - 1;
        let count = ledger.tiers_account.get(index).unwrap_or(0);
        ledger.tiers_account.set(index, count + 1);
        ledger.total_whitelists += 1;
        TrackingManager::save_ledger(env, &ledger);

        TrackingManager::set_registered_tier(env, account, tier);

        log!(env, "whitelisted in tier {}, tier size {}", tier, count + 1);
        events::publish_account(env, events::WHITELIST, account, tier);
        Ok(tier)
    }

    /// Round-1 tokens reserved for the whole tier. Truncated so the four pools
    /// never add up past the round-1 supply.
    pub fn tier_pool(config: &SaleConfig, tier: u32) -> Result<i128, Error> {
        if tier == 0 || tier > TIER_COUNT {
            return Err(Error::NotEligible);
        }
        let percent = config
            .tier_percents
            .get(tier - 1)
            .ok_or(Error::InvalidConfig)?;
        math::bps_of(config.round1_sale_amount, percent, Rounding::Down)
    }

    /// Per-account round-1 cap in sale tokens.
    ///
    /// The tier pool is split evenly between the accounts registered in the
    /// tier, so the cap shrinks as the tier fills up. An account that has not
    /// registered yet is quoted the share it would get by joining. The split
    /// is truncated whatever the rounding policy, keeping the caps of a tier
    /// within its pool.
    pub fn tier_allocation(env: &Env, account: &Address) -> Result<i128, Error> {
        let config = TrackingManager::get_config(env)?;
        let registered = TrackingManager::registered_tier(env, account);
        let tier = match registered {
            Some(tier) => tier,
            None => Self::tier_of(env, account)?,
        };

        let ledger = TrackingManager::load_ledger(env);
        let count = ledger.tiers_account.get(tier - 1).unwrap_or(0) as i128;
        let holders = if registered.is_some() { count } else { count + 1 };

        let pool = Self::tier_pool(&config, tier)?;
        math::mul_div(pool, 1, holders.max(1), Rounding::Down)
    }

    pub fn tiers_account(env: &Env, tier: u32) -> u32 {
        if tier == 0 || tier > TIER_COUNT {
            return 0;
        }
        TrackingManager::load_ledger(env)
            .tiers_account
            .get(tier - 1)
            .unwrap_or(0)
    }

    pub fn tiers_ex_account(env: &Env, tier: u32) -> u32 {
        if tier == 0 || tier > TIER_COUNT {
            return 0;
        }
        TrackingManager::load_ledger(env)
            .tiers_ex_account
            .get(tier - 1)
            .unwrap_or(0)
    }
}
