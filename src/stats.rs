//! Derived per-member views. Nothing here holds state; every call
//! reads the latest committed collections.

use crate::Error;
use crate::domain::{MemberId, Points, Quest, QuestStatus};
use crate::storage::Store;

/// Number of recent completions included in [`MemberStats`].
const RECENT_COMPLETIONS: usize = 5;

#[derive(Debug, Clone)]
pub struct MemberStats {
    pub completed_count: usize,
    pub points_balance: Points,
    /// Sum of snapshotted rewards over all completed quests. Spending
    /// does not reduce this.
    pub lifetime_points_earned: Points,
    /// Most recent completions, newest first.
    pub recent_completions: Vec<Quest>,
}

#[derive(Clone, Copy)]
pub struct Stats<'s> {
    store: &'s Store,
}

impl<'s> Stats<'s> {
    pub fn new(store: &'s Store) -> Self {
        Stats { store }
    }

    /// Aggregate view for one member, or `None` when the id is unknown.
    pub fn member_stats(&self, member_id: &MemberId) -> Result<Option<MemberStats>, Error> {
        let Some(member) = self
            .store
            .members()?
            .into_iter()
            .find(|m| &m.id == member_id)
        else {
            return Ok(None);
        };
        let mut completed: Vec<Quest> = self
            .store
            .quests()?
            .into_iter()
            .filter(|q| &q.recipient_id == member_id && q.status == QuestStatus::Completed)
            .collect();
        completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

        let lifetime_points_earned = Points(completed.iter().map(|q| q.reward.0).sum());
        let completed_count = completed.len();
        completed.truncate(RECENT_COMPLETIONS);

        Ok(Some(MemberStats {
            completed_count,
            points_balance: member.points_balance,
            lifetime_points_earned,
            recent_completions: completed,
        }))
    }
}
