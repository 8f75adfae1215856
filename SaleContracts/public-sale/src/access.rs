use crate::events;
use crate::types::{DataKey, Error};
use soroban_sdk::{Address, Env};

pub struct AccessManager;

impl AccessManager {
    /// Verify admin
    pub fn verify_admin(env: &Env, admin: &Address) -> Result<(), Error> {
        let contract_admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;

        if admin != &contract_admin {
            return Err(Error::NotAdmin);
        }
        admin.require_auth();

        Ok(())
    }

    pub fn is_admin(env: &Env, address: &Address) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .map(|admin: Address| &admin == address)
            .unwrap_or(false)
    }

    /// Hand the admin role to `new_admin`; both sides must sign.
    pub fn set_admin(env: &Env, current_admin: &Address, new_admin: &Address) -> Result<(), Error> {
        Self::verify_admin(env, current_admin)?;
        new_admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, new_admin);
        events::publish_account(env, events::ADMIN, current_admin, new_admin.clone());
        Ok(())
    }

    /// Fetch one of the addresses stored at initialization.
    pub fn address(env: &Env, key: &DataKey) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(Error::NotInitialized)
    }
}
