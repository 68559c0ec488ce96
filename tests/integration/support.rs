use deskfs::identity::StoreAuthenticator;
use deskfs::service::DeskService;
use deskfs::session::Session;
use deskfs::shell::Shell;
use deskfs::store::{MemoryUserStore, UserStore};
use std::sync::Arc;

pub const PASSWORD: &str = "password1";

/// Shell over an in-memory store, with the store kept for fault injection
pub struct Harness {
    pub store: Arc<MemoryUserStore>,
    pub service: Arc<DeskService>,
    pub shell: Shell,
}

pub fn harness() -> Harness {
    let store = Arc::new(MemoryUserStore::new());
    harness_with(Arc::clone(&store) as Arc<dyn UserStore>, store)
}

fn harness_with(store: Arc<dyn UserStore>, memory: Arc<MemoryUserStore>) -> Harness {
    let service = Arc::new(DeskService::new(store));
    let auth = Arc::new(StoreAuthenticator::new(Arc::clone(&service)));
    let shell = Shell::new(Arc::clone(&service), auth);
    Harness {
        store: memory,
        service,
        shell,
    }
}

impl Harness {
    pub async fn run(&self, session: &mut Session, line: &str) -> Vec<String> {
        self.shell.execute(session, line).await
    }

    /// New account, signed in at home
    pub async fn signed_up(&self, username: &str) -> Session {
        let mut session = Session::new();
        let out = self
            .run(&mut session, &format!("signup {} {}", username, PASSWORD))
            .await;
        assert_eq!(out, vec![format!("Signup successful. Welcome, {}!", username)]);
        session
    }

    pub async fn run_all(&self, session: &mut Session, lines: &[&str]) {
        for line in lines {
            let out = self.run(session, line).await;
            assert!(
                out.iter().all(|l| !l.starts_with("Error:")),
                "{} failed: {:?}",
                line,
                out
            );
        }
    }
}
