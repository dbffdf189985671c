//! Reward definitions and the redemption ledger. Redeeming deducts the
//! claimer's points and records a pending claim in one pass; cancelling
//! refunds exactly what was taken, even if the reward's cost changed in
//! the meantime.

use tracing::{debug, info};

use crate::Error;
use crate::domain::{
    Member, MemberId, Points, Redemption, RedemptionId, RedemptionStatus, Reward, RewardId,
    new_id, now_utc,
};
use crate::identity::Identity;
use crate::storage::Store;

/// Active rewards one member offers to another, grouped for the shop
/// view.
#[derive(Debug, Clone)]
pub struct RewardGroup {
    pub owner: Member,
    pub rewards: Vec<Reward>,
}

/// Field-wise update for [`RewardLedger::update_reward`]; `None` leaves
/// the field untouched.
#[derive(Debug, Clone, Default)]
pub struct RewardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub point_cost: Option<Points>,
    pub available_to: Option<Vec<MemberId>>,
    pub active: Option<bool>,
}

/// Seed set attached to every new parent. Open to the whole family and
/// soft-disable-able like any other reward.
const DEFAULT_REWARDS: &[(&str, i32, &str)] = &[
    ("$1 allowance", 10, "💵"),
    ("30 min screen time", 15, "📱"),
    ("Stay up 30 min late", 15, "🌙"),
    ("Pick dinner", 20, "🍕"),
    ("Ice cream trip", 20, "🍦"),
    ("Movie night", 25, "🎬"),
];

pub(crate) fn default_rewards_for(owner_id: &MemberId) -> Vec<Reward> {
    DEFAULT_REWARDS
        .iter()
        .map(|(name, cost, icon)| Reward {
            id: RewardId(new_id()),
            owner_id: owner_id.clone(),
            name: name.to_string(),
            description: None,
            icon: icon.to_string(),
            point_cost: Points(*cost),
            available_to: Vec::new(),
            is_default: true,
            active: true,
            created_at: now_utc(),
        })
        .collect()
}

#[derive(Clone, Copy)]
pub struct RewardLedger<'s> {
    store: &'s Store,
}

impl<'s> RewardLedger<'s> {
    pub fn new(store: &'s Store) -> Self {
        RewardLedger { store }
    }

    pub fn add_reward(
        &self,
        owner_id: &MemberId,
        name: &str,
        point_cost: Points,
        icon: &str,
        description: Option<&str>,
        available_to: &[MemberId],
    ) -> Result<Reward, Error> {
        let reward = Reward {
            id: RewardId(new_id()),
            owner_id: owner_id.clone(),
            name: name.to_string(),
            description: description.map(str::to_string),
            icon: icon.to_string(),
            point_cost,
            available_to: available_to.to_vec(),
            is_default: false,
            active: true,
            created_at: now_utc(),
        };
        let mut rewards = self.store.rewards()?;
        rewards.push(reward.clone());
        self.store.set_rewards(&rewards)?;
        info!(reward_id = %reward.id, owner_id = %owner_id, cost = %point_cost, "reward added");
        Ok(reward)
    }

    /// Apply a partial update. Returns the updated reward, or `None`
    /// when the id is unknown.
    pub fn update_reward(
        &self,
        id: &RewardId,
        patch: RewardPatch,
    ) -> Result<Option<Reward>, Error> {
        let mut rewards = self.store.rewards()?;
        let Some(reward) = rewards.iter_mut().find(|r| &r.id == id) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            reward.name = name;
        }
        if let Some(description) = patch.description {
            reward.description = Some(description);
        }
        if let Some(icon) = patch.icon {
            reward.icon = icon;
        }
        if let Some(point_cost) = patch.point_cost {
            reward.point_cost = point_cost;
        }
        if let Some(available_to) = patch.available_to {
            reward.available_to = available_to;
        }
        if let Some(active) = patch.active {
            reward.active = active;
        }
        let updated = reward.clone();
        self.store.set_rewards(&rewards)?;
        Ok(Some(updated))
    }

    /// Permanent delete, independent of the `active` soft-disable flag.
    /// Returns `false` when the id is unknown.
    pub fn delete_reward(&self, id: &RewardId) -> Result<bool, Error> {
        let mut rewards = self.store.rewards()?;
        let before = rewards.len();
        rewards.retain(|r| &r.id != id);
        if rewards.len() == before {
            return Ok(false);
        }
        self.store.set_rewards(&rewards)?;
        info!(reward_id = %id, "reward deleted");
        Ok(true)
    }

    pub fn rewards_owned_by(&self, owner_id: &MemberId) -> Result<Vec<Reward>, Error> {
        let mut rewards = self.store.rewards()?;
        rewards.retain(|r| &r.owner_id == owner_id);
        Ok(rewards)
    }

    /// Every active reward the member may redeem, grouped by owner.
    /// A reward is visible when its `available_to` set is empty (open
    /// to everyone) or names the member. Your own rewards are never
    /// offered back to you.
    pub fn rewards_available_to(&self, member_id: &MemberId) -> Result<Vec<RewardGroup>, Error> {
        let rewards = self.store.rewards()?;
        let members = self.store.members()?;
        let mut groups = Vec::new();
        for owner in members {
            if &owner.id == member_id {
                continue;
            }
            let offered: Vec<Reward> = rewards
                .iter()
                .filter(|r| {
                    r.owner_id == owner.id
                        && r.active
                        && (r.available_to.is_empty() || r.available_to.contains(member_id))
                })
                .cloned()
                .collect();
            if !offered.is_empty() {
                groups.push(RewardGroup {
                    owner,
                    rewards: offered,
                });
            }
        }
        Ok(groups)
    }

    /// Redeem a reward: check the claimer can afford it, deduct the
    /// cost, and record a pending redemption snapshotting that cost,
    /// all in one pass. Returns `None` (no mutation) when the reward is
    /// unknown, inactive, or owned by the claimer, or the balance is
    /// insufficient. Self-redemption is never allowed.
    pub fn redeem_reward(
        &self,
        reward_id: &RewardId,
        claimer_id: &MemberId,
    ) -> Result<Option<Redemption>, Error> {
        let rewards = self.store.rewards()?;
        let Some(reward) = rewards.iter().find(|r| &r.id == reward_id) else {
            return Ok(None);
        };
        if !reward.active {
            debug!(reward_id = %reward_id, "redemption refused, reward inactive");
            return Ok(None);
        }
        if &reward.owner_id == claimer_id {
            debug!(reward_id = %reward_id, "redemption refused, claimer owns the reward");
            return Ok(None);
        }
        // deduct_points owns the balance check; a false here means the
        // claimer is unknown or cannot afford the cost.
        if !Identity::new(self.store).deduct_points(claimer_id, reward.point_cost)? {
            return Ok(None);
        }
        let redemption = Redemption {
            id: RedemptionId(new_id()),
            reward_id: reward.id.clone(),
            reward_owner_id: reward.owner_id.clone(),
            claimer_id: claimer_id.clone(),
            points_spent: reward.point_cost,
            status: RedemptionStatus::Pending,
            created_at: now_utc(),
            fulfilled_at: None,
        };
        let mut redemptions = self.store.redemptions()?;
        redemptions.push(redemption.clone());
        self.store.set_redemptions(&redemptions)?;
        info!(
            redemption_id = %redemption.id,
            reward_id = %reward_id,
            claimer_id = %claimer_id,
            points_spent = %redemption.points_spent,
            "reward redeemed"
        );
        Ok(Some(redemption))
    }

    /// `pending` → `fulfilled`. Points were already spent at redemption
    /// time; nothing moves here.
    pub fn fulfill_redemption(&self, id: &RedemptionId) -> Result<Option<Redemption>, Error> {
        let mut redemptions = self.store.redemptions()?;
        let Some(redemption) = redemptions
            .iter_mut()
            .find(|r| &r.id == id && r.status == RedemptionStatus::Pending)
        else {
            return Ok(None);
        };
        redemption.status = RedemptionStatus::Fulfilled;
        redemption.fulfilled_at = Some(now_utc());
        let updated = redemption.clone();
        self.store.set_redemptions(&redemptions)?;
        info!(redemption_id = %id, "redemption fulfilled");
        Ok(Some(updated))
    }

    /// `pending` → `cancelled`, refunding exactly `points_spent` to the
    /// claimer. The reward's current cost is irrelevant; it may have
    /// changed since redemption.
    pub fn cancel_redemption(&self, id: &RedemptionId) -> Result<Option<Redemption>, Error> {
        let mut redemptions = self.store.redemptions()?;
        let Some(redemption) = redemptions
            .iter_mut()
            .find(|r| &r.id == id && r.status == RedemptionStatus::Pending)
        else {
            return Ok(None);
        };
        redemption.status = RedemptionStatus::Cancelled;
        let updated = redemption.clone();
        self.store.set_redemptions(&redemptions)?;
        Identity::new(self.store).add_points(&updated.claimer_id, updated.points_spent)?;
        info!(
            redemption_id = %id,
            claimer_id = %updated.claimer_id,
            refunded = %updated.points_spent,
            "redemption cancelled and refunded"
        );
        Ok(Some(updated))
    }

    /// Pending redemptions owed by the given owner, newest first.
    pub fn pending_redemptions_for(&self, owner_id: &MemberId) -> Result<Vec<Redemption>, Error> {
        let mut redemptions = self.store.redemptions()?;
        redemptions
            .retain(|r| &r.reward_owner_id == owner_id && r.status == RedemptionStatus::Pending);
        redemptions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(redemptions)
    }
}
