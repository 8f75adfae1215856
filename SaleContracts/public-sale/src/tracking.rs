use crate::types::{DataKey, Error, SaleConfig, SaleLedger, UserClaim, UserExclusive, UserOpen};
use soroban_sdk::{Address, Env, Vec};

pub struct TrackingManager;

impl TrackingManager {
    pub fn get_config(env: &Env) -> Result<SaleConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotConfigured)
    }

    pub fn load_ledger(env: &Env) -> SaleLedger {
        env.storage()
            .instance()
            .get(&DataKey::Ledger)
            .unwrap_or_else(|| SaleLedger::new(env))
    }

    pub fn save_ledger(env: &Env, ledger: &SaleLedger) {
        env.storage().instance().set(&DataKey::Ledger, ledger);
    }

    /// Reset generation the per-account keys are written under.
    pub fn epoch(env: &Env) -> u32 {
        env.storage().instance().get(&DataKey::Epoch).unwrap_or(0)
    }

    /// Start a new generation; records of earlier ones are no longer read.
    pub fn advance_epoch(env: &Env) -> u32 {
        let epoch = Self::epoch(env) + 1;
        env.storage().instance().set(&DataKey::Epoch, &epoch);
        epoch
    }

    pub fn registered_tier(env: &Env, account: &Address) -> Option<u32> {
        env.storage()
            .persistent()
            .get(&DataKey::Whitelist(Self::epoch(env), account.clone()))
    }

    pub fn set_registered_tier(env: &Env, account: &Address, tier: u32) {
        env.storage()
            .persistent()
            .set(&DataKey::Whitelist(Self::epoch(env), account.clone()), &tier);
    }

    pub fn user_exclusive(env: &Env, account: &Address) -> UserExclusive {
        env.storage()
            .persistent()
            .get(&DataKey::UserExclusive(Self::epoch(env), account.clone()))
            .unwrap_or(UserExclusive {
                tier: 0,
                pay_amount: 0,
                sale_amount: 0,
            })
    }

    pub fn set_user_exclusive(env: &Env, account: &Address, record: &UserExclusive) {
        env.storage()
            .persistent()
            .set(&DataKey::UserExclusive(Self::epoch(env), account.clone()), record);
    }

    pub fn user_open(env: &Env, account: &Address) -> UserOpen {
        env.storage()
            .persistent()
            .get(&DataKey::UserOpen(Self::epoch(env), account.clone()))
            .unwrap_or_else(|| UserOpen {
                deposit_amount: 0,
                slices: Vec::new(env),
                pay_amount: 0,
                sale_amount: 0,
                refund_amount: 0,
                settled: false,
                refunded: false,
            })
    }

    pub fn set_user_open(env: &Env, account: &Address, record: &UserOpen) {
        env.storage()
            .persistent()
            .set(&DataKey::UserOpen(Self::epoch(env), account.clone()), record);
    }

    pub fn user_claim(env: &Env, account: &Address) -> UserClaim {
        env.storage()
            .persistent()
            .get(&DataKey::UserClaim(Self::epoch(env), account.clone()))
            .unwrap_or(UserClaim {
                claim_amount: 0,
                claimed_rounds: 0,
                total_claim: 0,
            })
    }

    pub fn set_user_claim(env: &Env, account: &Address, record: &UserClaim) {
        env.storage()
            .persistent()
            .set(&DataKey::UserClaim(Self::epoch(env), account.clone()), record);
    }
}
