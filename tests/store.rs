//! Core poll/vote operations against a real JSON file in a temp directory.

use std::{sync::Arc, time::Duration};

use tempfile::TempDir;
use tokio::task::JoinSet;

use polling_backend::db::json_store::JsonStore;
use polling_backend::models::poll_models::{Poll, PollOption};
use polling_backend::services::{
    poll_service::{self, NewPoll},
    results_service,
    vote_service,
};
use polling_backend::utils::error::{Entity, PollError};

async fn open_store() -> (TempDir, Arc<JsonStore>) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = JsonStore::open(dir.path().join("db.json"), Duration::from_secs(5))
        .await
        .expect("open store");
    (dir, Arc::new(store))
}

async fn create(store: &JsonStore, question: &str, options: &[&str]) -> (Poll, Vec<PollOption>) {
    poll_service::create_poll(store, new_poll(question, options))
        .await
        .expect("create poll")
}

fn new_poll(question: &str, options: &[&str]) -> NewPoll {
    let options: Vec<String> = options.iter().map(|s| s.to_string()).collect();
    NewPoll::parse(Some(question), Some(&options)).expect("valid poll")
}

#[tokio::test]
async fn open_creates_empty_document() {
    let (dir, store) = open_store().await;

    let raw = std::fs::read_to_string(dir.path().join("db.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value, serde_json::json!({ "polls": [], "options": [], "votes": [] }));

    let doc = store.load().await.unwrap();
    assert!(doc.polls.is_empty());
}

#[tokio::test]
async fn malformed_document_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = JsonStore::open(&path, Duration::from_secs(1)).await.err().expect("open should fail");
    assert!(matches!(err, PollError::StorageUnavailable(_)));
}

#[tokio::test]
async fn corruption_after_open_fails_reads() {
    let (dir, store) = open_store().await;
    std::fs::write(dir.path().join("db.json"), "polls: none").unwrap();

    let err = poll_service::list_polls(&store).await.unwrap_err();
    assert!(matches!(err, PollError::StorageUnavailable(_)));
}

#[tokio::test]
async fn create_poll_persists_poll_and_options() {
    let (_dir, store) = open_store().await;

    let (poll, options) = create(&store, "Pick one", &["A", "B", "C"]).await;

    assert!(poll.is_active);
    assert_eq!(options.len(), 3);
    for (offset, option) in options.iter().enumerate() {
        assert_eq!(option.id, poll.id + offset as i64 + 1);
        assert_eq!(option.poll_id, poll.id);
        assert_eq!(option.votes, 0);
    }

    let polls = poll_service::list_polls(&store).await.unwrap();
    assert_eq!(polls.iter().filter(|p| p.id == poll.id).count(), 1);

    let (fetched, fetched_options) = poll_service::get_poll_with_options(&store, poll.id)
        .await
        .unwrap();
    assert_eq!(fetched, poll);
    assert_eq!(fetched_options, options);
}

#[tokio::test]
async fn polls_are_listed_in_creation_order_with_unique_ids() {
    let (_dir, store) = open_store().await;

    let mut created = Vec::new();
    for i in 0..5 {
        let (poll, _) = create(&store, &format!("Q{i}"), &["yes", "no"]).await;
        created.push(poll.id);
    }

    let listed: Vec<i64> = poll_service::list_polls(&store)
        .await
        .unwrap()
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(listed, created);

    let doc = store.load().await.unwrap();
    let poll_ids = doc.polls.iter().map(|p| p.id);
    let mut ids: Vec<i64> = poll_ids.chain(doc.options.iter().map(|o| o.id)).collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[tokio::test]
async fn reads_do_not_change_the_document() {
    let (_dir, store) = open_store().await;
    let (poll, _) = create(&store, "Q", &["A", "B"]).await;

    let before = store.load().await.unwrap();
    for _ in 0..3 {
        poll_service::list_polls(&store).await.unwrap();
        poll_service::get_poll_with_options(&store, poll.id).await.unwrap();
        results_service::compute_results(&store, poll.id).await.unwrap();
    }
    assert_eq!(store.load().await.unwrap(), before);
}

#[tokio::test]
async fn unknown_poll_is_not_found() {
    let (_dir, store) = open_store().await;

    let err = poll_service::get_poll_with_options(&store, 42).await.unwrap_err();
    assert!(matches!(err, PollError::NotFound(Entity::Poll)));

    let err = poll_service::delete_poll(&store, 42).await.unwrap_err();
    assert!(matches!(err, PollError::NotFound(Entity::Poll)));

    let err = results_service::compute_results(&store, 42).await.unwrap_err();
    assert!(matches!(err, PollError::NotFound(Entity::Poll)));
}

#[tokio::test]
async fn two_votes_add_two_to_counter_and_log() {
    let (_dir, store) = open_store().await;
    let (poll, options) = create(&store, "Q", &["A", "B"]).await;
    let option_id = options[0].id;

    vote_service::cast_vote(&store, poll.id, option_id).await.unwrap();
    vote_service::cast_vote(&store, poll.id, option_id).await.unwrap();

    let doc = store.load().await.unwrap();
    let option = doc.options.iter().find(|o| o.id == option_id).unwrap();
    assert_eq!(option.votes, 2);
    assert_eq!(doc.votes_for(option_id), 2);
    assert!(doc.votes.iter().all(|v| v.poll_id == poll.id));
}

#[tokio::test]
async fn vote_for_option_of_another_poll_is_rejected() {
    let (_dir, store) = open_store().await;
    let (first, _) = create(&store, "First", &["A", "B"]).await;
    let (_, other_options) = create(&store, "Second", &["C", "D"]).await;

    let before = store.load().await.unwrap();
    let err = vote_service::cast_vote(&store, first.id, other_options[0].id).await.unwrap_err();

    assert!(matches!(err, PollError::NotFound(Entity::Option)));
    assert_eq!(store.load().await.unwrap(), before);
}

#[tokio::test]
async fn vote_checks_poll_before_option() {
    let (_dir, store) = open_store().await;
    let (_, options) = create(&store, "Q", &["A", "B"]).await;

    let err = vote_service::cast_vote(&store, 1, options[0].id).await.unwrap_err();
    assert!(matches!(err, PollError::NotFound(Entity::Poll)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_votes_are_not_lost() {
    const VOTES: usize = 50;

    let (_dir, store) = open_store().await;
    let (poll, options) = create(&store, "Q", &["A", "B"]).await;
    let (poll_id, option_id) = (poll.id, options[1].id);

    let mut tasks = JoinSet::new();
    for _ in 0..VOTES {
        let store = Arc::clone(&store);
        tasks.spawn(async move { vote_service::cast_vote(&store, poll_id, option_id).await });
    }

    let mut vote_ids = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        vote_ids.push(joined.unwrap().unwrap().id);
    }

    let doc = store.load().await.unwrap();
    let option = doc.options.iter().find(|o| o.id == option_id).unwrap();
    assert_eq!(option.votes, VOTES as u64);
    assert_eq!(doc.votes_for(option_id), VOTES);

    vote_ids.sort_unstable();
    vote_ids.dedup();
    assert_eq!(vote_ids.len(), VOTES);
}

#[tokio::test]
async fn delete_cascades_to_options_and_votes() {
    let (_dir, store) = open_store().await;
    let (doomed, doomed_options) = create(&store, "Doomed", &["A", "B"]).await;
    let (kept, kept_options) = create(&store, "Kept", &["C", "D"]).await;

    vote_service::cast_vote(&store, doomed.id, doomed_options[0].id).await.unwrap();
    vote_service::cast_vote(&store, kept.id, kept_options[1].id).await.unwrap();

    poll_service::delete_poll(&store, doomed.id).await.unwrap();

    let err = poll_service::get_poll_with_options(&store, doomed.id).await.unwrap_err();
    assert!(matches!(err, PollError::NotFound(Entity::Poll)));

    let doc = store.load().await.unwrap();
    assert!(doc.options.iter().all(|o| o.poll_id != doomed.id));
    assert!(doc.votes.iter().all(|v| v.poll_id != doomed.id));
    assert_eq!(doc.options.len(), 2);
    assert_eq!(doc.votes.len(), 1);
}

#[tokio::test]
async fn ids_are_not_reused_after_delete_or_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.json");

    let store = JsonStore::open(&path, Duration::from_secs(5)).await.unwrap();
    let (old, old_options) = create(&store, "Old", &["A", "B"]).await;
    poll_service::delete_poll(&store, old.id).await.unwrap();
    let (kept, _) = create(&store, "Kept", &["A", "B"]).await;
    assert!(kept.id > old_options[1].id);
    drop(store);

    let reopened = JsonStore::open(&path, Duration::from_secs(5)).await.unwrap();
    let (newer, _) = create(&reopened, "Newer", &["A", "B"]).await;
    assert!(newer.id > kept.id + 2);
}

#[tokio::test]
async fn failed_save_leaves_document_unchanged() {
    let (dir, store) = open_store().await;
    let (poll, options) = create(&store, "Q", &["A", "B"]).await;
    let before = store.load().await.unwrap();

    // A directory where the temp file should go makes every save fail.
    let blocker = dir.path().join("db.json.tmp");
    std::fs::create_dir(&blocker).unwrap();

    let err = poll_service::create_poll(&store, new_poll("Lost", &["C", "D"]))
        .await
        .unwrap_err();
    assert!(matches!(err, PollError::StorageUnavailable(_)));

    let err = vote_service::cast_vote(&store, poll.id, options[0].id).await.unwrap_err();
    assert!(matches!(err, PollError::StorageUnavailable(_)));

    let err = poll_service::delete_poll(&store, poll.id).await.unwrap_err();
    assert!(matches!(err, PollError::StorageUnavailable(_)));

    assert_eq!(store.load().await.unwrap(), before);

    // Retrying once the medium recovers applies the vote exactly once.
    std::fs::remove_dir(&blocker).unwrap();
    vote_service::cast_vote(&store, poll.id, options[0].id).await.unwrap();
    let doc = store.load().await.unwrap();
    assert_eq!(doc.votes.len(), 1);
    assert_eq!(doc.options[0].votes, 1);
}

#[tokio::test]
async fn pick_one_scenario() {
    let (_dir, store) = open_store().await;
    let (poll, options) = create(&store, "Pick one", &["A", "B"]).await;
    let (a, b) = (options[0].id, options[1].id);

    vote_service::cast_vote(&store, poll.id, a).await.unwrap();
    vote_service::cast_vote(&store, poll.id, a).await.unwrap();
    vote_service::cast_vote(&store, poll.id, b).await.unwrap();

    let results = results_service::compute_results(&store, poll.id).await.unwrap();
    assert_eq!(results.total_votes, 3);
    assert_eq!(results.leading_option_id, Some(a));

    assert_eq!(results.options[0].option.id, a);
    assert_eq!(results.options[0].option.votes, 2);
    assert_eq!(results.options[0].percentage, 67);
    assert_eq!(results.options[1].option.id, b);
    assert_eq!(results.options[1].option.votes, 1);
    assert_eq!(results.options[1].percentage, 33);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn lock_wait_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(
        JsonStore::open(dir.path().join("db.json"), Duration::from_millis(50))
            .await
            .unwrap(),
    );

    let holder = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            store
                .transaction(|_, _| {
                    std::thread::sleep(Duration::from_millis(500));
                    Ok(())
                })
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let err = store.load().await.unwrap_err();
    assert!(matches!(err, PollError::StorageUnavailable(_)));

    holder.await.unwrap().unwrap();
    assert!(store.load().await.is_ok());
}
