//! Integration tests for the persistent chat-id lists.

use mealcam::storage::UserStore;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn authorizing_twice_keeps_a_single_entry() {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = UserStore::load(dir.path().join("authorized_users.json")).expect("load");

    assert!(store.add(123_456_789).await.expect("first authorize"));
    // Second authorize reports "already there" and must not duplicate.
    assert!(!store.add(123_456_789).await.expect("second authorize"));

    assert_eq!(store.snapshot().await, vec![123_456_789]);
}

#[tokio::test]
async fn unsubscribing_a_non_subscriber_changes_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("subscribed_users.json");
    let store = UserStore::load(&path).expect("load");

    store.add(1).await.expect("subscribe");
    assert!(!store.remove(2).await.expect("unsubscribe stranger"));
    assert_eq!(store.snapshot().await, vec![1]);
}

#[tokio::test]
async fn lists_survive_a_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("subscribed_users.json");

    {
        let store = UserStore::load(&path).expect("load");
        store.add(42).await.expect("add");
        store.add(-1_001_234).await.expect("add group chat");
    }

    let reopened = UserStore::load(&path).expect("reload");
    assert_eq!(reopened.snapshot().await, vec![-1_001_234, 42]);
    assert!(reopened.contains(42).await);
}

#[test]
fn corrupt_list_file_fails_loudly() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("authorized_users.json");
    std::fs::write(&path, "not json at all").expect("write corrupt file");

    assert!(UserStore::load(&path).is_err());
}
