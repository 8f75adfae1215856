use crate::access::AccessManager;
use crate::events::{self, Claimed};
use crate::math;
use crate::open_sale::OpenSaleManager;
use crate::settlement::SettlementManager;
use crate::tracking::TrackingManager;
use crate::types::{ClaimQuote, ClaimStatus, DataKey, Error, SaleConfig};
use soroban_sdk::{log, Address, Env};

pub struct VestingManager;

impl VestingManager {
    /// Sale tokens the account bought across both rounds.
    pub fn total_claim(env: &Env, account: &Address) -> Result<i128, Error> {
        let exclusive = TrackingManager::user_exclusive(env, account);
        let open = OpenSaleManager::open_allocation(env, account)?;
        math::checked_add(exclusive.sale_amount, open.sale_amount)
    }

    /// Number of checkpoints whose time has been reached.
    pub fn current_round(config: &SaleConfig, now: u64) -> u32 {
        let mut round = 0;
        for time in config.claim_times.iter() {
            if time > now {
                break;
            }
            round += 1;
        }
        round
    }

    /// Tokens unlocked by checkpoints `1..=round`, never more than
    /// `total_claim`. The last checkpoint unlocks everything.
    fn unlocked_through(config: &SaleConfig, total_claim: i128, round: u32) -> Result<i128, Error> {
        if round >= config.claim_counts {
            return Ok(total_claim);
        }
        let mut unlocked = 0i128;
        for index in 0..round {
            let percent = config.claim_percents.get(index).ok_or(Error::InvalidRound)?;
            unlocked = math::checked_add(unlocked, math::bps_of(total_claim, percent, config.rounding)?)?;
        }
        Ok(unlocked.min(total_claim))
    }

    /// Scheduled reward of checkpoint `round` (1-based). The last checkpoint
    /// takes whatever earlier rounding left so the schedule sums to
    /// `total_claim`.
    pub fn scheduled_reward(config: &SaleConfig, total_claim: i128, round: u32) -> Result<i128, Error> {
        if round == 0 || round > config.claim_counts {
            return Err(Error::InvalidRound);
        }
        let through = Self::unlocked_through(config, total_claim, round)?;
        let before = Self::unlocked_through(config, total_claim, round - 1)?;
        math::checked_sub(through, before)
    }

    /// Sum of the rewards of rounds `from..=to`.
    fn rewards_between(config: &SaleConfig, total_claim: i128, from: u32, to: u32) -> Result<i128, Error> {
        let mut reward = 0i128;
        for round in from..=to {
            reward = math::checked_add(reward, Self::scheduled_reward(config, total_claim, round)?)?;
        }
        Ok(reward)
    }

    /// Quote a claim. `round == 0` is every reached and unpaid checkpoint;
    /// any other round is that checkpoint alone, zero if not reached yet or
    /// already paid.
    pub fn calcul_claim_amount(env: &Env, account: &Address, round: u32) -> Result<ClaimQuote, Error> {
        let config = TrackingManager::get_config(env)?;
        if round > config.claim_counts {
            return Err(Error::InvalidRound);
        }
        let total_claim = Self::total_claim(env, account)?;
        let claimed_rounds = TrackingManager::user_claim(env, account).claimed_rounds;
        let now_round = Self::current_round(&config, env.ledger().timestamp());

        let reward = if round == 0 {
            Self::rewards_between(&config, total_claim, claimed_rounds + 1, now_round)?
        } else if round <= now_round && round > claimed_rounds {
            Self::scheduled_reward(&config, total_claim, round)?
        } else {
            0
        };
        Ok(ClaimQuote { reward, total_claim })
    }

    pub fn checkpoint_reward(env: &Env, account: &Address, round: u32) -> Result<i128, Error> {
        let config = TrackingManager::get_config(env)?;
        let total_claim = Self::total_claim(env, account)?;
        Self::scheduled_reward(&config, total_claim, round)
    }

    /// Pay every reached checkpoint not paid yet, plus the open-sale refund
    /// on the first call.
    pub fn claim(env: &Env, account: &Address) -> Result<i128, Error> {
        let config = TrackingManager::get_config(env)?;
        let now = env.ledger().timestamp();
        let first_time = config.claim_times.get(0).ok_or(Error::NotConfigured)?;
        if now < first_time {
            return Err(Error::NothingToClaim);
        }
        let open = OpenSaleManager::settle(env, account)?;
        let refund_pending = open.refund_amount > 0 && !open.refunded;
        let mut record = TrackingManager::user_claim(env, account);
        record.total_claim = Self::total_claim(env, account)?;
        if record.total_claim == 0 && !refund_pending {
            return Err(Error::NothingToClaim);
        }

        let now_round = Self::current_round(&config, now);
        let reward = if now_round > record.claimed_rounds {
            Self::rewards_between(&config, record.total_claim, record.claimed_rounds + 1, now_round)?
        } else {
            0
        };

        let sale_token = AccessManager::address(env, &DataKey::SaleToken)?;
        SettlementManager::transfer(env, &sale_token, &env.current_contract_address(), account, reward)?;

        record.claim_amount = math::checked_add(record.claim_amount, reward)?;
        record.claimed_rounds = record.claimed_rounds.max(now_round);
        TrackingManager::set_user_claim(env, account, &record);

        if refund_pending {
            SettlementManager::pay_refund(env, account)?;
        }

        log!(env, "claimed {} up to round {}", reward, record.claimed_rounds);
        events::publish_account(
            env,
            events::CLAIM,
            account,
            Claimed {
                reward,
                claim_amount: record.claim_amount,
                claimed_rounds: record.claimed_rounds,
            },
        );
        Ok(reward)
    }

    pub fn claim_status(env: &Env, account: &Address) -> Result<ClaimStatus, Error> {
        let config = TrackingManager::get_config(env)?;
        let record = TrackingManager::user_claim(env, account);
        Ok(if record.claimed_rounds == 0 {
            ClaimStatus::NotStarted
        } else if record.claimed_rounds >= config.claim_counts {
            ClaimStatus::FullyClaimed
        } else {
            ClaimStatus::Accruing
        })
    }
}
