use crate::access::AccessManager;
use crate::events::{self, OpenSaleFinalized};
use crate::math;
use crate::settlement::SettlementManager;
use crate::tracking::TrackingManager;
use crate::types::{DataKey, DepositSlice, Error, Rounding, SaleConfig, SaleLedger, UserOpen};
use soroban_sdk::{log, Address, Env, Vec};

pub struct OpenSaleManager;

impl OpenSaleManager {
    /// Add `amount` pay tokens to the account's round-2 deposit.
    ///
    /// Each call takes the next segment of the cumulative deposit line, which
    /// is what the pro-rata split is computed on later.
    pub fn deposit(env: &Env, account: &Address, amount: i128) -> Result<(), Error> {
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let config = TrackingManager::get_config(env)?;
        let now = env.ledger().timestamp();
        if now < config.deposit_start || now > config.deposit_end {
            return Err(Error::WindowNotOpen);
        }

        let pay_token = AccessManager::address(env, &DataKey::PayToken)?;
        SettlementManager::transfer(
            env,
            &pay_token,
            account,
            &env.current_contract_address(),
            amount,
        )?;

        let mut ledger = TrackingManager::load_ledger(env);
        let mut record = TrackingManager::user_open(env, account);
        record.slices.push_back(DepositSlice {
            start: ledger.total_deposit_amount,
            amount,
        });
        record.deposit_amount = math::checked_add(record.deposit_amount, amount)?;
        TrackingManager::set_user_open(env, account, &record);

        ledger.total_deposit_amount = math::checked_add(ledger.total_deposit_amount, amount)?;
        TrackingManager::save_ledger(env, &ledger);

        events::publish_account(env, events::DEPOSIT, account, (amount, record.deposit_amount));
        Ok(())
    }

    /// Round-2 pay tokens that the sale supply can absorb. Always truncated so
    /// refunds are never short.
    pub fn pay_cap(config: &SaleConfig) -> Result<i128, Error> {
        math::mul_div(
            config.round2_sale_amount,
            config.sale_token_price,
            config.pay_token_price,
            Rounding::Down,
        )
    }

    /// Pay tokens consumed by the first `point` units of the deposit line.
    fn consumed_through(point: i128, pay_cap: i128, total_deposit: i128) -> Result<i128, Error> {
        if total_deposit <= pay_cap {
            return Ok(point);
        }
        math::mul_div(point, pay_cap, total_deposit, Rounding::Down)
    }

    /// Pay tokens consumed and sale tokens bought for a set of deposit slices.
    ///
    /// Truncating at the slice boundaries instead of per account makes the
    /// consumed amounts of all depositors add up to exactly
    /// `min(total_deposit, pay_cap)`. Purchases are truncated too, so they
    /// never add up past the round-2 supply.
    pub fn allocate(
        config: &SaleConfig,
        slices: &Vec<DepositSlice>,
        total_deposit: i128,
    ) -> Result<(i128, i128), Error> {
        let pay_cap = Self::pay_cap(config)?;
        let mut consumed = 0i128;
        for slice in slices.iter() {
            let end = math::checked_add(slice.start, slice.amount)?;
            let share = math::checked_sub(
                Self::consumed_through(end, pay_cap, total_deposit)?,
                Self::consumed_through(slice.start, pay_cap, total_deposit)?,
            )?;
            consumed = math::checked_add(consumed, share)?;
        }
        let purchased = math::mul_div(
            consumed,
            config.pay_token_price,
            config.sale_token_price,
            Rounding::Down,
        )?;
        Ok((consumed, purchased))
    }

    /// Close the open round once the deposit window has passed. Idempotent,
    /// and independent of the number of depositors: accounts are settled one
    /// by one through `settle`.
    pub fn finalize(env: &Env) -> Result<SaleLedger, Error> {
        let mut ledger = TrackingManager::load_ledger(env);
        if ledger.open_finalized {
            return Ok(ledger);
        }
        let config = TrackingManager::get_config(env)?;
        if env.ledger().timestamp() <= config.deposit_end {
            return Err(Error::DepositNotClosed);
        }

        let consumed = ledger.total_deposit_amount.min(Self::pay_cap(&config)?);
        ledger.total_open_purchased_amount = consumed;
        ledger.open_finalized = true;
        TrackingManager::save_ledger(env, &ledger);

        log!(env, "open sale finalized: deposited {}, consumed {}", ledger.total_deposit_amount, consumed);
        env.events().publish(
            (events::FINALIZE,),
            OpenSaleFinalized {
                deposit_amount: ledger.total_deposit_amount,
                purchased_amount: consumed,
            },
        );
        Ok(ledger)
    }

    /// Fix the account's allocation and add it to the running round-2 total.
    pub fn settle(env: &Env, account: &Address) -> Result<UserOpen, Error> {
        let mut ledger = Self::finalize(env)?;
        let mut record = TrackingManager::user_open(env, account);
        if record.settled || record.deposit_amount == 0 {
            return Ok(record);
        }
        let config = TrackingManager::get_config(env)?;
        let (consumed, purchased) =
            Self::allocate(&config, &record.slices, ledger.total_deposit_amount)?;
        let sold = math::checked_add(ledger.total_open_sale_amount, purchased)?;
        if sold > config.round2_sale_amount {
            return Err(Error::CapExceeded);
        }

        record.pay_amount = consumed;
        record.sale_amount = purchased;
        record.refund_amount = math::checked_sub(record.deposit_amount, consumed)?;
        record.settled = true;
        TrackingManager::set_user_open(env, account, &record);

        ledger.total_open_sale_amount = sold;
        TrackingManager::save_ledger(env, &ledger);
        Ok(record)
    }

    /// Settled record, or what settlement would give right now.
    pub fn open_allocation(env: &Env, account: &Address) -> Result<UserOpen, Error> {
        let mut record = TrackingManager::user_open(env, account);
        if record.settled || record.deposit_amount == 0 {
            return Ok(record);
        }
        let config = TrackingManager::get_config(env)?;
        let ledger = TrackingManager::load_ledger(env);
        let (consumed, purchased) =
            Self::allocate(&config, &record.slices, ledger.total_deposit_amount)?;
        record.pay_amount = consumed;
        record.sale_amount = purchased;
        record.refund_amount = math::checked_sub(record.deposit_amount, consumed)?;
        Ok(record)
    }

    /// Round-2 totals `(sale, purchased)`. Before finalization both are
    /// projected from the deposits; afterwards `sale` counts settled accounts.
    pub fn open_totals(env: &Env, ledger: &SaleLedger) -> Result<(i128, i128), Error> {
        if ledger.open_finalized || ledger.total_deposit_amount == 0 {
            return Ok((
                ledger.total_open_sale_amount,
                ledger.total_open_purchased_amount,
            ));
        }
        let config = TrackingManager::get_config(env)?;
        let purchased = ledger.total_deposit_amount.min(Self::pay_cap(&config)?);
        let sale = math::mul_div(
            purchased,
            config.pay_token_price,
            config.sale_token_price,
            Rounding::Down,
        )?;
        Ok((sale, purchased))
    }
}
