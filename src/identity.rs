//! Family and member records plus the point balance ledger. Every
//! balance change in the crate funnels through [`Identity::add_points`]
//! or [`Identity::deduct_points`], which is what keeps the zero floor
//! and the award/deduction history consistent.

use tracing::{debug, info};

use crate::Error;
use crate::domain::{Family, FamilySettings, Member, MemberId, Points, Role, new_id, now_utc};
use crate::reward::default_rewards_for;
use crate::storage::Store;

#[derive(Clone, Copy)]
pub struct Identity<'s> {
    store: &'s Store,
}

impl<'s> Identity<'s> {
    pub fn new(store: &'s Store) -> Self {
        Identity { store }
    }

    /// Create the singleton family record. Fails with
    /// [`Error::FamilyExists`] if one was already created; callers that
    /// want upsert semantics must check [`Identity::family`] first.
    pub fn create_family(&self, name: &str, pin: &str) -> Result<Family, Error> {
        if self.store.family()?.is_some() {
            return Err(Error::FamilyExists);
        }
        let family = Family {
            id: new_id(),
            name: name.to_string(),
            pin: pin.to_string(),
            settings: FamilySettings::default(),
            created_at: now_utc(),
        };
        self.store.set_family(&family)?;
        info!(family_id = %family.id, "family created");
        Ok(family)
    }

    pub fn family(&self) -> Result<Option<Family>, Error> {
        Ok(self.store.family()?)
    }

    /// Replace the family settings. Returns the updated record, or
    /// `None` when no family exists yet.
    pub fn update_settings(&self, settings: FamilySettings) -> Result<Option<Family>, Error> {
        let Some(mut family) = self.store.family()? else {
            return Ok(None);
        };
        family.settings = settings;
        self.store.set_family(&family)?;
        Ok(Some(family))
    }

    pub fn verify_pin(&self, candidate: &str) -> Result<bool, Error> {
        Ok(self.store.family()?.is_some_and(|f| f.pin == candidate))
    }

    /// Append a member with a zero balance. Parents get the default
    /// reward set seeded in the same operation.
    pub fn add_member(&self, name: &str, avatar: &str, role: Role) -> Result<Member, Error> {
        if self.store.family()?.is_none() {
            return Err(Error::NoFamily);
        }
        let member = Member {
            id: MemberId(new_id()),
            name: name.to_string(),
            avatar: avatar.to_string(),
            role,
            points_balance: Points::zero(),
            created_at: now_utc(),
        };
        let mut members = self.store.members()?;
        members.push(member.clone());
        self.store.set_members(&members)?;

        if role == Role::Parent {
            let mut rewards = self.store.rewards()?;
            rewards.extend(default_rewards_for(&member.id));
            self.store.set_rewards(&rewards)?;
        }
        info!(member_id = %member.id, ?role, "member added");
        Ok(member)
    }

    /// Delete a member and cascade: every quest they issued or received
    /// and every reward they own goes with them, along with redemptions
    /// against those rewards. Returns `false` if the id is unknown.
    pub fn remove_member(&self, id: &MemberId) -> Result<bool, Error> {
        let mut members = self.store.members()?;
        let before = members.len();
        members.retain(|m| &m.id != id);
        if members.len() == before {
            return Ok(false);
        }
        self.store.set_members(&members)?;

        let mut quests = self.store.quests()?;
        quests.retain(|q| &q.recipient_id != id && &q.issuer_id != id);
        self.store.set_quests(&quests)?;

        let mut rewards = self.store.rewards()?;
        rewards.retain(|r| &r.owner_id != id);
        self.store.set_rewards(&rewards)?;

        let mut redemptions = self.store.redemptions()?;
        redemptions.retain(|r| &r.reward_owner_id != id && &r.claimer_id != id);
        self.store.set_redemptions(&redemptions)?;

        info!(member_id = %id, "member removed with cascading deletes");
        Ok(true)
    }

    pub fn members(&self) -> Result<Vec<Member>, Error> {
        Ok(self.store.members()?)
    }

    pub fn member(&self, id: &MemberId) -> Result<Option<Member>, Error> {
        Ok(self.store.members()?.into_iter().find(|m| &m.id == id))
    }

    pub fn parents(&self) -> Result<Vec<Member>, Error> {
        let mut members = self.store.members()?;
        members.retain(|m| m.role == Role::Parent);
        Ok(members)
    }

    pub fn children(&self) -> Result<Vec<Member>, Error> {
        let mut members = self.store.members()?;
        members.retain(|m| m.role == Role::Child);
        Ok(members)
    }

    /// Credit points. Returns the new balance, or `None` when the
    /// member id is unknown.
    pub fn add_points(&self, id: &MemberId, amount: Points) -> Result<Option<Points>, Error> {
        let mut members = self.store.members()?;
        let Some(member) = members.iter_mut().find(|m| &m.id == id) else {
            return Ok(None);
        };
        member.points_balance = Points(member.points_balance.0 + amount.0);
        let balance = member.points_balance;
        self.store.set_members(&members)?;
        debug!(member_id = %id, amount = %amount, balance = %balance, "points added");
        Ok(Some(balance))
    }

    /// Debit points. Returns `false` and changes nothing when the
    /// member is unknown or the balance would go below zero.
    pub fn deduct_points(&self, id: &MemberId, amount: Points) -> Result<bool, Error> {
        let mut members = self.store.members()?;
        let Some(member) = members.iter_mut().find(|m| &m.id == id) else {
            return Ok(false);
        };
        if member.points_balance < amount {
            debug!(
                member_id = %id,
                amount = %amount,
                balance = %member.points_balance,
                "deduction refused, insufficient balance"
            );
            return Ok(false);
        }
        member.points_balance = Points(member.points_balance.0 - amount.0);
        let balance = member.points_balance;
        self.store.set_members(&members)?;
        debug!(member_id = %id, amount = %amount, balance = %balance, "points deducted");
        Ok(true)
    }
}
