use crate::integration::support::harness;
use deskfs::session::PORTFOLIO_LOCATION;

#[tokio::test]
async fn add_skill_save_and_view_again() {
    let h = harness();
    let mut session = h.signed_up("alice").await;

    assert_eq!(
        h.run(&mut session, "portfolio").await,
        vec!["Entering portfolio environment. Type 'help' for available commands."]
    );
    assert_eq!(session.location(), PORTFOLIO_LOCATION);

    assert!(h.run(&mut session, "add skills").await.is_empty());
    assert_eq!(session.wizard_prompt(), Some("Enter skill name:"));
    assert_eq!(
        h.run(&mut session, "").await,
        vec!["Error: This field is required. Please enter a value."]
    );
    assert_eq!(
        h.run(&mut session, "Rust").await,
        vec!["Enter skill name: Rust"]
    );
    let out = h.run(&mut session, "Expert").await;
    assert_eq!(out[1], "Skill \"Rust\" added successfully");
    assert_eq!(session.wizard_prompt(), None);

    assert_eq!(
        h.run(&mut session, "save").await,
        vec!["Portfolio updated successfully"]
    );
    assert_eq!(
        h.run(&mut session, "exit").await,
        vec!["You have exited the portfolio environment"]
    );
    assert_eq!(session.location(), "/alice");

    let saved = h.service.portfolio("alice").await.unwrap();
    assert_eq!(saved.skills.len(), 1);
    assert_eq!(saved.skills[0].level.as_deref(), Some("Expert"));
}

#[tokio::test]
async fn exit_discards_unsaved_edits() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run(&mut session, "portfolio").await;
    h.run(&mut session, "edit title Staff Engineer").await;
    h.run(&mut session, "exit").await;

    let saved = h.service.portfolio("alice").await.unwrap();
    assert_eq!(saved.title, "");
}

#[tokio::test]
async fn portfolio_mode_does_not_touch_the_tree() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run(&mut session, "portfolio").await;

    assert_eq!(
        h.run(&mut session, "mkdir docs").await,
        vec!["Error: Unknown portfolio command: mkdir"]
    );
    assert!(h.service.tree("alice").await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_wizard_input_is_reported() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run(&mut session, "portfolio").await;
    h.run(&mut session, "add social").await;
    h.run(&mut session, "GitHub").await;

    let out = h.run(&mut session, "not a url").await;
    assert_eq!(out.len(), 2);
    assert!(out[1].starts_with("Error: Invalid inputs. "), "{:?}", out);
    assert_eq!(session.wizard_prompt(), None);
}

#[tokio::test]
async fn portfolio_requires_sign_in() {
    let h = harness();
    let mut session = deskfs::session::Session::new();
    assert_eq!(
        h.run(&mut session, "portfolio").await,
        vec!["Error: Please sign in to view your portfolio"]
    );
}

#[tokio::test]
async fn signout_works_inside_portfolio_mode() {
    let h = harness();
    let mut session = h.signed_up("alice").await;
    h.run(&mut session, "portfolio").await;
    h.run(&mut session, "edit title Staff Engineer").await;

    assert_eq!(
        h.run(&mut session, "signout").await,
        vec!["Signed out successfully"]
    );
    assert_eq!(session.username(), None);
    assert!(!session.in_portfolio());
    assert_eq!(h.run(&mut session, "pwd").await, vec!["/"]);

    let saved = h.service.portfolio("alice").await.unwrap();
    assert_ne!(saved.title, "Staff Engineer");
}
