use deskfs::identity::StoreAuthenticator;
use deskfs::service::DeskService;
use deskfs::session::Session;
use deskfs::shell::Shell;
use deskfs::store::{SledUserStore, UserStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn shell_at(path: &Path) -> (Shell, Arc<DeskService>) {
    let store: Arc<dyn UserStore> = Arc::new(SledUserStore::open(path).unwrap());
    let service = Arc::new(DeskService::new(store));
    let auth = Arc::new(StoreAuthenticator::new(Arc::clone(&service)));
    (Shell::new(Arc::clone(&service), auth), service)
}

#[tokio::test]
async fn tree_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("store");

    let records = {
        let (shell, service) = shell_at(&path);
        let mut session = Session::new();
        for line in [
            "signup alice password1",
            "mkdir docs",
            "cd docs",
            "touch readme",
            "write readme Hello There",
            "seturl site https://example.com",
        ] {
            let out = shell.execute(&mut session, line).await;
            assert!(out.iter().all(|l| !l.starts_with("Error:")), "{:?}", out);
        }
        service.tree("alice").await.unwrap().to_records()
    };

    let (shell, service) = shell_at(&path);
    assert_eq!(service.tree("alice").await.unwrap().to_records(), records);

    let mut session = Session::new();
    assert_eq!(
        shell.execute(&mut session, "signin alice password1").await,
        vec!["Login successful. Welcome back, alice!"]
    );
    shell.execute(&mut session, "cd docs").await;
    assert_eq!(
        shell.execute(&mut session, "open readme").await,
        vec!["Content of readme:", "Hello There"]
    );
}

#[tokio::test]
async fn stored_record_uses_flat_camel_case_shape() {
    let temp = TempDir::new().unwrap();
    let (shell, service) = shell_at(&temp.path().join("store"));
    let mut session = Session::new();
    shell.execute(&mut session, "signup alice password1").await;
    shell.execute(&mut session, "mkdir docs").await;

    let record = service.store().load_user("alice").await.unwrap().unwrap();
    let value = serde_json::to_value(&record).unwrap();
    let dir = &value["data"]["directories"][0];
    assert_eq!(dir["name"], "docs");
    assert_eq!(dir["location"], "/alice");
    assert_eq!(dir["size"], 0);
    assert!(dir.get("lastModified").is_some());
    assert!(value.get("passwordHash").is_some());
}

#[tokio::test]
async fn failed_command_saves_nothing() {
    let temp = TempDir::new().unwrap();
    let (shell, service) = shell_at(&temp.path().join("store"));
    let mut session = Session::new();
    shell.execute(&mut session, "signup alice password1").await;
    shell.execute(&mut session, "mkdir docs").await;
    let before = service.store().load_user("alice").await.unwrap().unwrap();

    let out = shell.execute(&mut session, "mv docs docs/inner").await;
    assert!(out[0].starts_with("Error:"));

    let after = service.store().load_user("alice").await.unwrap().unwrap();
    assert_eq!(before, after);
}
