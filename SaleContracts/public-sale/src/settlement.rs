use crate::access::AccessManager;
use crate::events::{self, ProceedsWithdrawn};
use crate::math;
use crate::open_sale::OpenSaleManager;
use crate::tracking::TrackingManager;
use crate::types::{DataKey, Error, SaleLedger};
use soroban_sdk::token::TokenClient;
use soroban_sdk::{log, Address, Env};

pub struct SettlementManager;

impl SettlementManager {
    /// Move `amount` of `token`. A rejected transfer surfaces as
    /// `TransferFailed` so the whole call rolls back.
    pub fn transfer(
        env: &Env,
        token: &Address,
        from: &Address,
        to: &Address,
        amount: i128,
    ) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }
        let client = TokenClient::new(env, token);
        match client.try_transfer(from, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(Error::TransferFailed),
        }
    }

    /// Return the unconsumed part of the account's round-2 deposit.
    pub fn refund(env: &Env, account: &Address) -> Result<i128, Error> {
        OpenSaleManager::settle(env, account)?;
        Self::pay_refund(env, account)
    }

    /// Pay a settled refund once. Callers settle the account first.
    pub fn pay_refund(env: &Env, account: &Address) -> Result<i128, Error> {
        let mut record = TrackingManager::user_open(env, account);
        if !record.settled || record.refunded || record.refund_amount <= 0 {
            return Err(Error::NothingToRefund);
        }

        let pay_token = AccessManager::address(env, &DataKey::PayToken)?;
        Self::transfer(
            env,
            &pay_token,
            &env.current_contract_address(),
            account,
            record.refund_amount,
        )?;

        record.refunded = true;
        TrackingManager::set_user_open(env, account, &record);

        events::publish_account(env, events::REFUND, account, record.refund_amount);
        Ok(record.refund_amount)
    }

    /// Send the consumed round-2 proceeds out of the contract: the vault share
    /// first, the rest to the treasury. Refund balances stay behind.
    pub fn deposit_withdraw(env: &Env, admin: &Address) -> Result<ProceedsWithdrawn, Error> {
        AccessManager::verify_admin(env, admin)?;
        let config = TrackingManager::get_config(env)?;
        if env.ledger().timestamp() <= config.deposit_end {
            return Err(Error::DepositNotClosed);
        }
        if TrackingManager::load_ledger(env).deposit_withdrawn {
            return Err(Error::AlreadyWithdrawn);
        }
        let mut ledger = OpenSaleManager::finalize(env)?;

        let withdrawable = ledger.total_open_purchased_amount;
        let vault_share = math::sale_to_pay(&config, config.liquidity_vault_amount)?;
        let vault_amount = vault_share.min(withdrawable);
        let treasury_amount = math::checked_sub(withdrawable, vault_amount)?;

        let pay_token = AccessManager::address(env, &DataKey::PayToken)?;
        let contract = env.current_contract_address();
        let vault = AccessManager::address(env, &DataKey::LiquidityVault)?;
        let treasury = AccessManager::address(env, &DataKey::Treasury)?;
        Self::transfer(env, &pay_token, &contract, &vault, vault_amount)?;
        Self::transfer(env, &pay_token, &contract, &treasury, treasury_amount)?;

        ledger.deposit_withdrawn = true;
        TrackingManager::save_ledger(env, &ledger);

        let withdrawn = ProceedsWithdrawn {
            vault_amount,
            treasury_amount,
        };
        log!(env, "proceeds withdrawn: vault {}, treasury {}", vault_amount, treasury_amount);
        events::publish_account(env, events::WITHDRAW, admin, withdrawn.clone());
        Ok(withdrawn)
    }

    /// Wipe every counter and per-account record. The configuration and the
    /// stored addresses are kept. Per-account records are dropped by moving
    /// to a new epoch, so the cost does not grow with the number of accounts.
    pub fn reset_all_data(env: &Env, admin: &Address) -> Result<u32, Error> {
        AccessManager::verify_admin(env, admin)?;
        let epoch = TrackingManager::advance_epoch(env);
        TrackingManager::save_ledger(env, &SaleLedger::new(env));

        log!(env, "sale data reset, epoch {}", epoch);
        events::publish_account(env, events::RESET, admin, epoch);
        Ok(epoch)
    }
}
