use crate::integration::support::harness;
use deskfs::shell::GENERIC_ERROR;
use deskfs::tree::node::KindFilter;

#[tokio::test]
async fn directory_walk_and_non_empty_guard() {
    let h = harness();
    let mut session = h.signed_up("alice").await;

    assert_eq!(h.run(&mut session, "mkdir docs").await, vec!["Directory created: docs"]);
    assert!(h.run(&mut session, "cd docs").await.is_empty());
    assert_eq!(session.location(), "/alice/docs");
    assert_eq!(h.run(&mut session, "touch note.txt").await, vec!["File created: note.txt"]);

    let tree = h.service.tree("alice").await.unwrap();
    assert!(tree.find_node("/alice/docs", "note.txt", KindFilter::File).is_some());

    h.run(&mut session, "cd ..").await;
    assert_eq!(session.location(), "/alice");
    assert_eq!(
        h.run(&mut session, "rmdir docs").await,
        vec!["Error: Directory is not empty"]
    );
    let after = h.service.tree("alice").await.unwrap();
    assert_eq!(after.len(), tree.len());
}

#[tokio::test]
async fn duplicate_touch_reports_collision() {
    let h = harness();
    let mut session = h.signed_up("alice").await;

    h.run(&mut session, "touch a.txt").await;
    assert_eq!(
        h.run(&mut session, "touch a.txt").await,
        vec!["Error: A file with the name 'a.txt' already exists in this location"]
    );
}

#[tokio::test]
async fn move_carries_size_to_new_parent() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run_all(
        &mut session,
        &["mkdir x", "cd x", "touch f", "write f hello", "cd ..", "mkdir y"],
    )
    .await;

    let before = h.service.tree("alice").await.unwrap();
    assert_eq!(before.lookup_path("/alice/x").unwrap().size, 5);
    assert_eq!(before.lookup_path("/alice/y").unwrap().size, 0);

    assert_eq!(h.run(&mut session, "mv x y").await, vec!["Item moved successfully"]);

    let after = h.service.tree("alice").await.unwrap();
    assert!(after.lookup_path("/alice/x").is_none());
    assert_eq!(after.lookup_path("/alice/y/x").unwrap().size, 5);
    assert_eq!(after.lookup_path("/alice/y").unwrap().size, 5);
    assert!(after.lookup_path("/alice/y/x/f").is_some());
    assert_eq!(after.total_size(), before.total_size());
    assert!(after.verify_sizes().is_empty());
}

#[tokio::test]
async fn move_of_empty_directory_keeps_sizes() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run_all(&mut session, &["mkdir x", "mkdir y", "mv x y"]).await;

    let tree = h.service.tree("alice").await.unwrap();
    assert_eq!(tree.location_of(tree.lookup_path("/alice/y/x").unwrap().id).as_deref(), Some("/alice/y"));
    assert_eq!(tree.lookup_path("/alice/y").unwrap().size, 0);
}

#[tokio::test]
async fn rename_onto_existing_name_fails() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run_all(&mut session, &["touch a.txt", "write a.txt keep me", "touch b.txt"])
        .await;

    let out = h.run(&mut session, "rename a.txt b.txt").await;
    assert_eq!(out.len(), 1);
    assert!(out[0].starts_with("Error: "), "{:?}", out);

    assert_eq!(
        h.run(&mut session, "open a.txt").await,
        vec!["Content of a.txt:", "keep me"]
    );
}

#[tokio::test]
async fn home_and_root_cannot_be_left() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    assert_eq!(
        h.run(&mut session, "cd ..").await,
        vec!["Error: Cannot go back from home directory without signing out"]
    );
    assert_eq!(session.location(), "/alice");
    h.run_all(&mut session, &["mkdir docs", "cd docs"]).await;
    assert_eq!(
        h.run(&mut session, "cd ../..").await,
        vec!["Error: Cannot go back beyond root directory"]
    );
    assert_eq!(session.location(), "/alice/docs");
    assert_eq!(
        h.run(&mut session, "cd /bob").await,
        vec!["Error: Cannot operate outside of user's directory"]
    );
}

#[tokio::test]
async fn rmdir_with_nested_content_leaves_tree_unchanged() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run_all(&mut session, &["mkdir d", "cd d", "mkdir inner", "cd inner", "touch deep", "cd ..", "cd .."])
        .await;

    let before = h.service.tree("alice").await.unwrap().to_records();
    assert_eq!(
        h.run(&mut session, "rmdir d").await,
        vec!["Error: Directory is not empty"]
    );
    let after = h.service.tree("alice").await.unwrap().to_records();
    assert_eq!(before, after);
}

#[tokio::test]
async fn open_round_trips_content_and_urls() {
    let h = harness();
    let mut session = h.signed_up("alice").await;

    h.run(&mut session, "touch f").await;
    assert_eq!(h.run(&mut session, "open f").await, vec!["Content of f:"]);

    assert_eq!(
        h.run(&mut session, "seturl g http://x").await,
        vec!["File URL created successfully"]
    );
    assert_eq!(
        h.run(&mut session, "open g").await,
        vec!["URL of g: fileurl://http://x"]
    );
    assert_eq!(
        h.run(&mut session, "touch g").await,
        vec!["Error: A file with the name 'g' already exists in this location"]
    );
    assert_eq!(
        h.run(&mut session, "seturl g https://example.com").await,
        vec!["File URL updated successfully"]
    );
}

#[tokio::test]
async fn seturl_never_replaces_a_file() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run(&mut session, "touch f").await;
    let out = h.run(&mut session, "seturl f http://x").await;
    assert!(out[0].starts_with("Error: A file with the name 'f'"), "{:?}", out);
}

#[tokio::test]
async fn store_fault_renders_generic_error_and_session_survives() {
    let h = harness();
    let mut session = h.signed_up("alice").await;

    h.store.set_unavailable(true);
    assert_eq!(h.run(&mut session, "mkdir docs").await, vec![GENERIC_ERROR]);
    assert_eq!(h.run(&mut session, "ls").await, vec![GENERIC_ERROR]);

    h.store.set_unavailable(false);
    assert_eq!(h.run(&mut session, "mkdir docs").await, vec!["Directory created: docs"]);
    assert_eq!(session.location(), "/alice");
}

#[tokio::test]
async fn users_cannot_see_each_other() {
    let h = harness();
    let mut alice = h.signed_up("alice").await;
    let mut bob = h.signed_up("bob").await;

    h.run(&mut alice, "mkdir private").await;
    assert_eq!(
        h.run(&mut bob, "ls").await,
        vec!["No items found in the directory"]
    );
    h.run(&mut bob, "touch x").await;
    assert_eq!(
        h.run(&mut bob, "mv x /alice").await,
        vec!["Error: Cannot operate outside of user's directory"]
    );
}

#[tokio::test]
async fn account_lifecycle() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    assert_eq!(
        h.run(&mut session, "signup bob password1").await,
        vec!["Error: You are already signed in!", "Sign out to create a new account"]
    );
    assert_eq!(
        h.run(&mut session, "search alice").await,
        vec!["Username: alice", "Name: alice"]
    );
    assert_eq!(
        h.run(&mut session, "userdel alice password1").await,
        vec!["Account deleted successfully"]
    );
    assert_eq!(session.username(), None);
    assert_eq!(
        h.run(&mut session, "signin alice password1").await,
        vec!["Error: Login failed: user not found"]
    );
}
