//! Quest lifecycle state machine.
//!
//! States: `active`, `pending_review`, `completed`, `abandoned`,
//! `queued`. A member holds at most one quest in `active` or
//! `pending_review` at a time; further quests start `queued` and form a
//! FIFO queue in creation order. Approval is the only transition that
//! promotes a queued quest; see [`QuestEngine::approve_quest`].

use tracing::{debug, info};

use crate::Error;
use crate::catalog;
use crate::domain::{
    ChallengeSource, MemberId, Points, Quest, QuestId, QuestStatus, new_id, now_utc,
};
use crate::identity::Identity;
use crate::storage::Store;

/// A quest joined with its challenge definition, for display. Catalog
/// quests resolve against the built-in packs; custom quests carry their
/// own payload.
#[derive(Debug, Clone)]
pub struct QuestDetails {
    pub quest: Quest,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub instructions: Option<String>,
    /// `None` for custom (inline) challenges.
    pub pack_name: Option<String>,
}

#[derive(Clone, Copy)]
pub struct QuestEngine<'s> {
    store: &'s Store,
}

impl<'s> QuestEngine<'s> {
    pub fn new(store: &'s Store) -> Self {
        QuestEngine { store }
    }

    /// Start a quest from the catalog. The point reward is snapshotted
    /// from the challenge definition at creation. Returns `None` when
    /// the slug pair does not resolve.
    pub fn start_pack_quest(
        &self,
        recipient_id: &MemberId,
        issuer_id: &MemberId,
        pack_slug: &str,
        challenge_slug: &str,
        custom_reward_text: Option<&str>,
    ) -> Result<Option<Quest>, Error> {
        let Some(challenge) = catalog::get_challenge(pack_slug, challenge_slug) else {
            debug!(pack_slug, challenge_slug, "unknown catalog challenge");
            return Ok(None);
        };
        let source = ChallengeSource::Catalog {
            pack_slug: pack_slug.to_string(),
            challenge_slug: challenge_slug.to_string(),
        };
        self.create_quest(
            recipient_id,
            issuer_id,
            source,
            challenge.reward,
            custom_reward_text,
        )
        .map(Some)
    }

    /// Issue a one-off challenge with an inline definition and an
    /// explicit point reward.
    pub fn issue_challenge(
        &self,
        recipient_id: &MemberId,
        issuer_id: &MemberId,
        title: &str,
        description: &str,
        icon: &str,
        reward: Points,
        custom_reward_text: Option<&str>,
    ) -> Result<Quest, Error> {
        let source = ChallengeSource::Custom {
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        };
        self.create_quest(recipient_id, issuer_id, source, reward, custom_reward_text)
    }

    fn create_quest(
        &self,
        recipient_id: &MemberId,
        issuer_id: &MemberId,
        source: ChallengeSource,
        reward: Points,
        custom_reward_text: Option<&str>,
    ) -> Result<Quest, Error> {
        let mut quests = self.store.quests()?;
        let has_open = quests
            .iter()
            .any(|q| &q.recipient_id == recipient_id && q.status.is_open());
        let status = if has_open {
            QuestStatus::Queued
        } else {
            QuestStatus::Active
        };
        let quest = Quest {
            id: QuestId(new_id()),
            recipient_id: recipient_id.clone(),
            issuer_id: issuer_id.clone(),
            source,
            reward,
            custom_reward_text: custom_reward_text.map(str::to_string),
            status,
            started_at: now_utc(),
            submitted_at: None,
            completed_at: None,
            notes: None,
        };
        quests.push(quest.clone());
        self.store.set_quests(&quests)?;
        info!(
            quest_id = %quest.id,
            recipient_id = %recipient_id,
            issuer_id = %issuer_id,
            reward = %reward,
            ?status,
            "quest created"
        );
        Ok(quest)
    }

    /// `active` → `pending_review`. Returns `None` (and changes
    /// nothing) when the id is unknown or the quest is not active.
    pub fn submit_quest(&self, id: &QuestId) -> Result<Option<Quest>, Error> {
        let mut quests = self.store.quests()?;
        let Some(quest) = quests
            .iter_mut()
            .find(|q| &q.id == id && q.status == QuestStatus::Active)
        else {
            return Ok(None);
        };
        quest.status = QuestStatus::PendingReview;
        quest.submitted_at = Some(now_utc());
        let updated = quest.clone();
        self.store.set_quests(&quests)?;
        info!(quest_id = %id, "quest submitted for review");
        Ok(Some(updated))
    }

    /// `pending_review` → `completed`. Awards the snapshotted reward to
    /// the recipient and, as part of the same operation, promotes the
    /// recipient's single oldest queued quest to `active`. This is the
    /// only place queued quests are promoted.
    pub fn approve_quest(&self, id: &QuestId, notes: Option<&str>) -> Result<Option<Quest>, Error> {
        let mut quests = self.store.quests()?;
        let Some(quest) = quests
            .iter_mut()
            .find(|q| &q.id == id && q.status == QuestStatus::PendingReview)
        else {
            return Ok(None);
        };
        quest.status = QuestStatus::Completed;
        quest.completed_at = Some(now_utc());
        if let Some(n) = notes {
            quest.notes = Some(n.to_string());
        }
        let approved = quest.clone();

        // Promote the oldest queued quest for this recipient, if any.
        // Collection order is creation order, so the first match is the
        // head of the FIFO queue.
        let promoted = quests
            .iter_mut()
            .find(|q| q.recipient_id == approved.recipient_id && q.status == QuestStatus::Queued)
            .map(|q| {
                q.status = QuestStatus::Active;
                q.id.clone()
            });
        self.store.set_quests(&quests)?;

        Identity::new(self.store).add_points(&approved.recipient_id, approved.reward)?;
        info!(
            quest_id = %id,
            recipient_id = %approved.recipient_id,
            reward = %approved.reward,
            promoted = ?promoted,
            "quest approved"
        );
        Ok(Some(approved))
    }

    /// `pending_review` → `active`: the verifier sends the quest back
    /// to be reworked. Clears `submitted_at`; no points move.
    pub fn reject_quest(&self, id: &QuestId, notes: Option<&str>) -> Result<Option<Quest>, Error> {
        let reopened = self.reopen(id, notes)?;
        if reopened.is_some() {
            info!(quest_id = %id, "quest rejected back to active");
        }
        Ok(reopened)
    }

    /// `pending_review` → `active`: the recipient walks back their own
    /// submission. Same mutation as [`QuestEngine::reject_quest`],
    /// distinct intent.
    pub fn unsubmit_quest(&self, id: &QuestId) -> Result<Option<Quest>, Error> {
        let reopened = self.reopen(id, None)?;
        if reopened.is_some() {
            info!(quest_id = %id, "quest submission withdrawn");
        }
        Ok(reopened)
    }

    fn reopen(&self, id: &QuestId, notes: Option<&str>) -> Result<Option<Quest>, Error> {
        let mut quests = self.store.quests()?;
        let Some(quest) = quests
            .iter_mut()
            .find(|q| &q.id == id && q.status == QuestStatus::PendingReview)
        else {
            return Ok(None);
        };
        quest.status = QuestStatus::Active;
        quest.submitted_at = None;
        if let Some(n) = notes {
            quest.notes = Some(n.to_string());
        }
        let updated = quest.clone();
        self.store.set_quests(&quests)?;
        Ok(Some(updated))
    }

    /// `active` or `pending_review` → `abandoned` (terminal). No points
    /// move and no queued quest is promoted: the recipient's next quest
    /// only goes active through [`QuestEngine::approve_quest`].
    pub fn abandon_quest(&self, id: &QuestId) -> Result<Option<Quest>, Error> {
        let mut quests = self.store.quests()?;
        let Some(quest) = quests
            .iter_mut()
            .find(|q| &q.id == id && q.status.is_open())
        else {
            return Ok(None);
        };
        quest.status = QuestStatus::Abandoned;
        let updated = quest.clone();
        self.store.set_quests(&quests)?;
        info!(quest_id = %id, "quest abandoned");
        Ok(Some(updated))
    }

    /// The single quest occupying the member's in-flight slot, if any
    /// (`active` or `pending_review`).
    pub fn get_active_quest(&self, member_id: &MemberId) -> Result<Option<Quest>, Error> {
        Ok(self
            .store
            .quests()?
            .into_iter()
            .find(|q| &q.recipient_id == member_id && q.status.is_open()))
    }

    /// Queued quests for a member in FIFO (creation) order.
    pub fn get_queued_quests(&self, member_id: &MemberId) -> Result<Vec<Quest>, Error> {
        let mut quests = self.store.quests()?;
        quests.retain(|q| &q.recipient_id == member_id && q.status == QuestStatus::Queued);
        Ok(quests)
    }

    /// Completed quests for a member, newest first.
    pub fn get_completed_quests(&self, member_id: &MemberId) -> Result<Vec<Quest>, Error> {
        let mut quests = self.store.quests()?;
        quests.retain(|q| &q.recipient_id == member_id && q.status == QuestStatus::Completed);
        quests.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(quests)
    }

    /// Quests awaiting review that the viewer may verify. Submissions
    /// by the viewer themselves are excluded; they unsubmit instead.
    pub fn get_pending_approvals(&self, viewer_id: &MemberId) -> Result<Vec<Quest>, Error> {
        let mut quests = self.store.quests()?;
        quests.retain(|q| q.status == QuestStatus::PendingReview && &q.recipient_id != viewer_id);
        quests.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(quests)
    }

    /// Whether the member ever completed this catalog challenge. Used
    /// for "already done" badges; re-doing a challenge stays allowed.
    pub fn has_completed_challenge(
        &self,
        member_id: &MemberId,
        pack_slug: &str,
        challenge_slug: &str,
    ) -> Result<bool, Error> {
        Ok(self.store.quests()?.iter().any(|q| {
            &q.recipient_id == member_id
                && q.status == QuestStatus::Completed
                && matches!(
                    &q.source,
                    ChallengeSource::Catalog {
                        pack_slug: p,
                        challenge_slug: c,
                    } if p == pack_slug && c == challenge_slug
                )
        }))
    }

    /// Join a quest with its challenge definition. Returns `None` when
    /// the quest is unknown or its catalog slugs no longer resolve.
    pub fn get_quest_with_details(&self, id: &QuestId) -> Result<Option<QuestDetails>, Error> {
        let Some(quest) = self.store.quests()?.into_iter().find(|q| &q.id == id) else {
            return Ok(None);
        };
        let (title, description, icon, instructions, pack_name) = match &quest.source {
            ChallengeSource::Catalog {
                pack_slug,
                challenge_slug,
            } => {
                let Some(pack) = catalog::get_pack(pack_slug) else {
                    return Ok(None);
                };
                let Some(challenge) = catalog::get_challenge(pack_slug, challenge_slug) else {
                    return Ok(None);
                };
                (
                    challenge.title.clone(),
                    challenge.description.clone(),
                    challenge.icon.clone(),
                    challenge.instructions.clone(),
                    Some(pack.name.clone()),
                )
            }
            ChallengeSource::Custom {
                title,
                description,
                icon,
            } => (title.clone(), description.clone(), icon.clone(), None, None),
        };
        Ok(Some(QuestDetails {
            quest,
            title,
            description,
            icon,
            instructions,
            pack_name,
        }))
    }
}
