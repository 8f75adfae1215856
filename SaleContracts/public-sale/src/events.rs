use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

pub const INIT: Symbol = symbol_short!("init");
pub const SETTING: Symbol = symbol_short!("setting");
pub const ADMIN: Symbol = symbol_short!("admin");
pub const WHITELIST: Symbol = symbol_short!("whitelist");
pub const EXSALE: Symbol = symbol_short!("exsale");
pub const DEPOSIT: Symbol = symbol_short!("deposit");
pub const FINALIZE: Symbol = symbol_short!("finalize");
pub const CLAIM: Symbol = symbol_short!("claim");
pub const REFUND: Symbol = symbol_short!("refund");
pub const WITHDRAW: Symbol = symbol_short!("withdraw");
pub const RESET: Symbol = symbol_short!("reset");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExclusivePurchased {
    pub tier: u32,
    pub pay_amount: i128,
    pub sale_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OpenSaleFinalized {
    pub deposit_amount: i128,
    pub purchased_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Claimed {
    pub reward: i128,
    pub claim_amount: i128,
    pub claimed_rounds: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProceedsWithdrawn {
    pub vault_amount: i128,
    pub treasury_amount: i128,
}

pub fn publish_account<D>(env: &Env, topic: Symbol, account: &Address, data: D)
where
    D: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
{
    env.events().publish((topic, account.clone()), data);
}
