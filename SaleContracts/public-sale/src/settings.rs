use crate::access::AccessManager;
use crate::events;
use crate::tracking::TrackingManager;
use crate::types::{DataKey, Error, SaleConfig, BPS_DENOMINATOR, TIER_COUNT};
use soroban_sdk::{log, Address, Env, Vec};

pub struct SettingsManager;

impl SettingsManager {
    /// Store the full sale configuration.
    ///
    /// Settings can be replaced until the whitelist window opens, or at any
    /// time while the ledger is empty (fresh deployment or after a reset).
    pub fn set_all_setting(env: &Env, admin: &Address, config: SaleConfig) -> Result<(), Error> {
        AccessManager::verify_admin(env, admin)?;
        Self::validate(&config)?;

        if let Ok(current) = TrackingManager::get_config(env) {
            let started = env.ledger().timestamp() >= current.whitelist_start;
            if started && !TrackingManager::load_ledger(env).is_empty() {
                return Err(Error::SaleInProgress);
            }
        }

        env.storage().instance().set(&DataKey::Config, &config);
        if !env.storage().instance().has(&DataKey::Ledger) {
            TrackingManager::save_ledger(env, &TrackingManager::load_ledger(env));
        }

        log!(
            env,
            "sale configured: round1 {}, round2 {}, claims {}",
            config.round1_sale_amount,
            config.round2_sale_amount,
            config.claim_counts
        );
        events::publish_account(
            env,
            events::SETTING,
            admin,
            (config.round1_sale_amount, config.round2_sale_amount),
        );
        Ok(())
    }

    pub fn validate(config: &SaleConfig) -> Result<(), Error> {
        if config.tier_thresholds.len() != TIER_COUNT || config.tier_percents.len() != TIER_COUNT {
            return Err(Error::InvalidConfig);
        }
        let mut previous = 0i128;
        for threshold in config.tier_thresholds.iter() {
            if threshold <= previous {
                return Err(Error::InvalidConfig);
            }
            previous = threshold;
        }
        Self::require_full_bps(&config.tier_percents)?;

        if config.round1_sale_amount <= 0
            || config.round2_sale_amount <= 0
            || config.liquidity_vault_amount < 0
            || config.sale_token_price <= 0
            || config.pay_token_price <= 0
        {
            return Err(Error::InvalidConfig);
        }

        if config.whitelist_start >= config.whitelist_end
            || config.whitelist_end > config.exclusive_start
            || config.exclusive_start >= config.exclusive_end
            || config.exclusive_end > config.deposit_start
            || config.deposit_start >= config.deposit_end
        {
            return Err(Error::InvalidConfig);
        }

        if config.claim_counts == 0
            || config.claim_times.len() != config.claim_counts
            || config.claim_percents.len() != config.claim_counts
        {
            return Err(Error::InvalidConfig);
        }
        let mut previous = config.deposit_end;
        for time in config.claim_times.iter() {
            if time <= previous {
                return Err(Error::InvalidConfig);
            }
            previous = time;
        }
        Self::require_full_bps(&config.claim_percents)
    }

    fn require_full_bps(percents: &Vec<u32>) -> Result<(), Error> {
        let mut total = 0i128;
        for percent in percents.iter() {
            total += percent as i128;
        }
        if total != BPS_DENOMINATOR {
            return Err(Error::InvalidConfig);
        }
        Ok(())
    }
}
