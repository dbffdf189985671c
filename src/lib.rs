//! Core of a family chore/reward tracker. Members start and complete
//! quests from challenge packs (or one-off issued challenges), submit
//! them for review, earn points on approval, and spend points on
//! rewards other family members offer.
//!
//! The crate is a synchronous function-call API over an injected
//! [`storage::Backend`]; there is no network layer and no UI here.
//!
//! ```
//! use questcards::{QuestCards, domain::Role};
//!
//! let app = QuestCards::in_memory();
//! app.identity().create_family("Our Family", "1234").unwrap();
//! let mom = app.identity().add_member("Mom", "👩", Role::Parent).unwrap();
//! let kid = app.identity().add_member("Kid", "👦", Role::Child).unwrap();
//!
//! let quest = app
//!     .quests()
//!     .start_pack_quest(&kid.id, &mom.id, "starter-pack", "make-your-bed-7-days", None)
//!     .unwrap()
//!     .unwrap();
//! app.quests().submit_quest(&quest.id).unwrap();
//! app.quests().approve_quest(&quest.id, None).unwrap();
//! assert_eq!(app.identity().member(&kid.id).unwrap().unwrap().points_balance.0, 30);
//! ```

pub mod catalog;
pub mod domain;
pub mod identity;
pub mod quest;
pub mod reward;
pub mod stats;
pub mod storage;

pub use identity::Identity;
pub use quest::{QuestDetails, QuestEngine};
pub use reward::{RewardGroup, RewardLedger, RewardPatch};
pub use stats::{MemberStats, Stats};
pub use storage::{Backend, StorageError, Store};

/// Crate-level error. Recoverable conditions (unknown ids, insufficient
/// balance, invalid transitions) are expressed as `Option`/`bool`
/// results, not errors; this enum covers substrate faults and the two
/// caller bugs the engine refuses to paper over.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// `create_family` was called while a family record already exists.
    #[error("family already exists")]
    FamilyExists,

    /// A member was added before any family was created.
    #[error("no family has been created")]
    NoFamily,
}

/// Facade bundling the component handles over one shared [`Store`].
pub struct QuestCards {
    store: Store,
}

impl QuestCards {
    pub fn new(store: Store) -> Self {
        QuestCards { store }
    }

    pub fn in_memory() -> Self {
        QuestCards::new(Store::in_memory())
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn identity(&self) -> Identity<'_> {
        Identity::new(&self.store)
    }

    pub fn quests(&self) -> QuestEngine<'_> {
        QuestEngine::new(&self.store)
    }

    pub fn rewards(&self) -> RewardLedger<'_> {
        RewardLedger::new(&self.store)
    }

    pub fn stats(&self) -> Stats<'_> {
        Stats::new(&self.store)
    }

    /// Erase all persisted state (support/testing use).
    pub fn reset_all(&self) -> Result<(), Error> {
        Ok(self.store.reset_all()?)
    }
}
