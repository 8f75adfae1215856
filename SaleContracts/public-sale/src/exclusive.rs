use crate::access::AccessManager;
use crate::events::{self, ExclusivePurchased};
use crate::math;
use crate::settlement::SettlementManager;
use crate::tiers::TierManager;
use crate::tracking::TrackingManager;
use crate::types::{DataKey, Error, UserExclusive};
use soroban_sdk::{log, Address, Env};

pub struct ExclusiveSaleManager;

impl ExclusiveSaleManager {
    /// Buy round-1 tokens for `amount` pay tokens.
    ///
    /// Payment goes straight to the treasury; the purchased sale tokens vest
    /// through the claim schedule.
    pub fn exclusive_sale(env: &Env, account: &Address, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let config = TrackingManager::get_config(env)?;
        let now = env.ledger().timestamp();
        if now < config.exclusive_start || now > config.exclusive_end {
            return Err(Error::WindowNotOpen);
        }
        let tier = TrackingManager::registered_tier(env, account).ok_or(Error::NotWhitelisted)?;

        let record = TrackingManager::user_exclusive(env, account);
        let pay_amount = math::checked_add(record.pay_amount, amount)?;
        let sale_amount = math::pay_to_sale(&config, pay_amount)?;
        if sale_amount > TierManager::tier_allocation(env, account)? {
            return Err(Error::CapExceeded);
        }

        let mut ledger = TrackingManager::load_ledger(env);
        let round_pay_cap = math::sale_to_pay(&config, config.round1_sale_amount)?;
        let round_total = math::checked_add(ledger.total_ex_purchased_amount, amount)?;
        let added_sale = math::checked_sub(sale_amount, record.sale_amount)?;
        let round_sold = math::checked_add(ledger.total_ex_sale_amount, added_sale)?;
        if round_total > round_pay_cap || round_sold > config.round1_sale_amount {
            return Err(Error::CapExceeded);
        }

        let pay_token = AccessManager::address(env, &DataKey::PayToken)?;
        let treasury = AccessManager::address(env, &DataKey::Treasury)?;
        SettlementManager::transfer(env, &pay_token, account, &treasury, amount)?;

        if record.pay_amount == 0 {
            let index = tier - 1;
            let buyers = ledger.tiers_ex_account.get(index).unwrap_or(0);
            ledger.tiers_ex_account.set(index, buyers + 1);
        }
        ledger.total_ex_purchased_amount = round_total;
        ledger.total_ex_sale_amount = round_sold;
        TrackingManager::save_ledger(env, &ledger);

        TrackingManager::set_user_exclusive(
            env,
            account,
            &UserExclusive {
                tier,
                pay_amount,
                sale_amount,
            },
        );

        log!(env, "exclusive sale: tier {}, paid {}, bought {}", tier, amount, added_sale);
        events::publish_account(
            env,
            events::EXSALE,
            account,
            ExclusivePurchased {
                tier,
                pay_amount: amount,
                sale_amount: added_sale,
            },
        );
        Ok(())
    }
}
