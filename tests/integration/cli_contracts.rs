use deskfs::config::DeskConfig;
use deskfs::store::{DirectoryRecord, FileRecord, MemoryUserStore, UserRecord, UserStore};
use deskfs::tooling::cli::{CliContext, Commands};
use std::sync::Arc;

fn context_with(store: Arc<MemoryUserStore>) -> CliContext {
    CliContext::with_store(DeskConfig::default(), store as Arc<dyn UserStore>).unwrap()
}

/// A record whose `docs` directory claims the wrong size
fn skewed_record() -> UserRecord {
    let at = chrono::Utc::now();
    let mut record = UserRecord::new("alice", String::new());
    record.data.directories.push(DirectoryRecord {
        name: "docs".to_string(),
        location: "/alice".to_string(),
        size: 99,
        last_modified: at,
    });
    record.data.files.push(FileRecord {
        name: "a".to_string(),
        location: "/alice/docs".to_string(),
        content: "abc".to_string(),
        size: 3,
        last_modified: at,
    });
    record
}

#[test]
fn validate_json_reports_and_repairs_mismatches() {
    let store = Arc::new(MemoryUserStore::new());
    let ctx = context_with(Arc::clone(&store));
    tokio::runtime::Runtime::new()
        .unwrap()
        .block_on(store.save_user(&skewed_record()))
        .unwrap();

    let validate = |repair| Commands::Validate {
        user: "alice".to_string(),
        repair,
        format: "json".to_string(),
    };

    let parsed: serde_json::Value =
        serde_json::from_str(&ctx.execute(&validate(false)).unwrap()).unwrap();
    assert_eq!(parsed["valid"], false);
    assert_eq!(parsed["mismatches"][0]["path"], "/alice/docs");
    assert_eq!(parsed["mismatches"][0]["recorded"], 99);
    assert_eq!(parsed["mismatches"][0]["expected"], 3);

    let parsed: serde_json::Value =
        serde_json::from_str(&ctx.execute(&validate(true)).unwrap()).unwrap();
    assert_eq!(parsed["repaired"], 1);

    let parsed: serde_json::Value =
        serde_json::from_str(&ctx.execute(&validate(false)).unwrap()).unwrap();
    assert_eq!(parsed["valid"], true);
}

#[test]
fn tree_json_is_the_flat_record() {
    let store = Arc::new(MemoryUserStore::new());
    let ctx = context_with(store);
    ctx.execute(&Commands::Exec {
        user: None,
        lines: vec!["signup alice password1".to_string(), "touch notes".to_string()],
    })
    .unwrap();

    let output = ctx
        .execute(&Commands::Tree {
            user: "alice".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(parsed["directories"].as_array().unwrap().is_empty());
    assert_eq!(parsed["files"][0]["name"], "notes");
    assert_eq!(parsed["files"][0]["location"], "/alice");
    assert!(parsed["urls"].as_array().is_some());
}

#[test]
fn exec_as_existing_user_skips_sign_in() {
    let store = Arc::new(MemoryUserStore::new());
    let ctx = context_with(store);
    ctx.execute(&Commands::Exec {
        user: None,
        lines: vec!["signup alice password1".to_string()],
    })
    .unwrap();

    let output = ctx
        .execute(&Commands::Exec {
            user: Some("alice".to_string()),
            lines: vec!["pwd".to_string(), "ls".to_string()],
        })
        .unwrap();
    assert_eq!(output, "/alice\nNo items found in the directory");
}
