use questcards::domain::{Points, QuestStatus, Role};
use questcards::storage::file::FileBackend;
use questcards::{QuestCards, Store};

fn open(dir: &std::path::Path) -> QuestCards {
    QuestCards::new(Store::new(Box::new(FileBackend::open(dir).unwrap())))
}

#[test]
fn state_survives_reopening_the_file_store() {
    let dir = tempfile::tempdir().unwrap();

    let quest_id = {
        let app = open(dir.path());
        app.identity().create_family("Our Family", "1234").unwrap();
        let mom = app.identity().add_member("Mom", "👩", Role::Parent).unwrap();
        let kid = app.identity().add_member("Kid", "👦", Role::Child).unwrap();
        let quest = app
            .quests()
            .start_pack_quest(&kid.id, &mom.id, "starter-pack", "make-your-bed-7-days", None)
            .unwrap()
            .unwrap();
        app.quests().submit_quest(&quest.id).unwrap();
        quest.id
    };

    // Fresh handle over the same directory sees the committed state.
    let app = open(dir.path());
    assert!(app.identity().verify_pin("1234").unwrap());
    assert_eq!(app.identity().members().unwrap().len(), 2);

    let kid = app.identity().children().unwrap().remove(0);
    let active = app.quests().get_active_quest(&kid.id).unwrap().unwrap();
    assert_eq!(active.id, quest_id);
    assert_eq!(active.status, QuestStatus::PendingReview);

    app.quests().approve_quest(&quest_id, None).unwrap().unwrap();
    let kid = app.identity().member(&kid.id).unwrap().unwrap();
    assert_eq!(kid.points_balance, Points(30));
}

#[test]
fn collections_are_stored_under_their_documented_names() {
    let dir = tempfile::tempdir().unwrap();
    let app = open(dir.path());
    app.identity().create_family("Our Family", "1234").unwrap();
    app.identity().add_member("Mom", "👩", Role::Parent).unwrap();

    assert!(dir.path().join("questcards_family.json").exists());
    assert!(dir.path().join("questcards_members.json").exists());
    assert!(dir.path().join("questcards_rewards.json").exists());

    // Each collection is a plain JSON document.
    let members: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("questcards_members.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(members.as_array().unwrap().len(), 1);
    assert_eq!(members[0]["role"], "parent");
    assert_eq!(members[0]["pointsBalance"], 0);
}

#[test]
fn reset_all_erases_every_collection() {
    let dir = tempfile::tempdir().unwrap();
    let app = open(dir.path());
    app.identity().create_family("Our Family", "1234").unwrap();
    app.identity().add_member("Mom", "👩", Role::Parent).unwrap();

    app.reset_all().unwrap();

    assert!(app.identity().family().unwrap().is_none());
    assert!(app.identity().members().unwrap().is_empty());
    assert!(!dir.path().join("questcards_family.json").exists());

    // A fresh family can be created afterwards.
    app.identity().create_family("Second Run", "0000").unwrap();
}
