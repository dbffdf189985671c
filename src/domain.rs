use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        MemberId(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub String);

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for QuestId {
    fn from(value: &str) -> Self {
        QuestId(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardId(pub String);

impl fmt::Display for RewardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RewardId {
    fn from(value: &str) -> Self {
        RewardId(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedemptionId(pub String);

impl fmt::Display for RedemptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RedemptionId {
    fn from(value: &str) -> Self {
        RedemptionId(value.to_string())
    }
}

/// Point amount. Balances are kept non-negative by the identity layer.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Points(pub i32);

impl Points {
    pub fn zero() -> Self {
        Points(0)
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilySettings {
    /// How many points a single currency unit is worth.
    pub points_per_currency_unit: i32,
    pub require_pin_for_approval: bool,
    pub require_pin_for_redemption: bool,
}

impl Default for FamilySettings {
    fn default() -> Self {
        FamilySettings {
            points_per_currency_unit: 10,
            require_pin_for_approval: true,
            require_pin_for_redemption: true,
        }
    }
}

/// Singleton record; one family per install.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: String,
    pub name: String,
    pub pin: String,
    pub settings: FamilySettings,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub avatar: String,
    pub role: Role,
    pub points_balance: Points,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Active,
    PendingReview,
    Completed,
    Abandoned,
    Queued,
}

impl QuestStatus {
    /// Active or pending review: the quest occupies the recipient's
    /// single "in flight" slot.
    pub fn is_open(self) -> bool {
        matches!(self, QuestStatus::Active | QuestStatus::PendingReview)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, QuestStatus::Completed | QuestStatus::Abandoned)
    }
}

/// Where a quest's challenge definition comes from: a catalog entry
/// referenced by slug pair, or a one-off payload supplied by the issuer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ChallengeSource {
    #[serde(rename_all = "camelCase")]
    Catalog {
        pack_slug: String,
        challenge_slug: String,
    },
    #[serde(rename_all = "camelCase")]
    Custom {
        title: String,
        description: String,
        icon: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub recipient_id: MemberId,
    pub issuer_id: MemberId,
    #[serde(flatten)]
    pub source: ChallengeSource,
    /// Point reward snapshotted at creation; catalog edits never reach
    /// in-flight quests.
    pub reward: Points,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_reward_text: Option<String>,
    pub status: QuestStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Verifier notes recorded on approve/reject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: RewardId,
    pub owner_id: MemberId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub icon: String,
    pub point_cost: Points,
    /// Empty means available to everyone except the owner.
    #[serde(default)]
    pub available_to: Vec<MemberId>,
    #[serde(default)]
    pub is_default: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedemptionStatus {
    Pending,
    Fulfilled,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redemption {
    pub id: RedemptionId,
    pub reward_id: RewardId,
    /// Denormalized from the reward for owner-side queries.
    pub reward_owner_id: MemberId,
    pub claimer_id: MemberId,
    /// Cost at redemption time; the refund on cancel is exactly this.
    pub points_spent: Points,
    pub status: RedemptionStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfilled_at: Option<DateTime<Utc>>,
}

pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
