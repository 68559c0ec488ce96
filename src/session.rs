//! Session and navigation state
//!
//! ```text
//! Anonymous --signin/signup--> Browsing(/{user})
//! Browsing(loc) --cd--> Browsing(loc')        loc' stays under /{user}
//! Browsing(loc) --portfolio--> Portfolio
//! Portfolio --exit--> Browsing(/{user})
//! any --signout--> Anonymous
//! ```

use crate::portfolio::wizard::InputMode;
use crate::portfolio::Portfolio;
use crate::tree::path;

/// Location reported while in the portfolio sub-mode
pub const PORTFOLIO_LOCATION: &str = "portfolio";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Browsing {
        username: String,
        location: String,
    },
    Portfolio {
        username: String,
        draft: Portfolio,
        input: Option<InputMode>,
    },
}

/// One caller's session; owned by the front end and passed to the shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Anonymous,
        }
    }

    /// Session already signed in as `username`, at home
    pub fn signed_in(username: &str) -> Self {
        let mut session = Self::new();
        session.sign_in(username);
        session
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn username(&self) -> Option<&str> {
        match &self.state {
            SessionState::Anonymous => None,
            SessionState::Browsing { username, .. } | SessionState::Portfolio { username, .. } => {
                Some(username.as_str())
            }
        }
    }

    /// Current location: `/` when anonymous, `portfolio` in the sub-mode
    pub fn location(&self) -> &str {
        match &self.state {
            SessionState::Anonymous => path::ROOT,
            SessionState::Browsing { location, .. } => location.as_str(),
            SessionState::Portfolio { .. } => PORTFOLIO_LOCATION,
        }
    }

    pub fn in_portfolio(&self) -> bool {
        matches!(self.state, SessionState::Portfolio { .. })
    }

    pub fn sign_in(&mut self, username: &str) {
        self.state = SessionState::Browsing {
            username: username.to_string(),
            location: path::home_of(username),
        };
    }

    pub fn sign_out(&mut self) {
        self.state = SessionState::Anonymous;
    }

    /// Move to `location` if browsing and the target stays under home.
    pub fn set_location(&mut self, target: String) -> bool {
        match &mut self.state {
            SessionState::Browsing { username, location }
                if path::is_within(&target, &path::home_of(username)) =>
            {
                *location = target;
                true
            }
            _ => false,
        }
    }

    pub fn enter_portfolio(&mut self, draft: Portfolio) {
        if let Some(username) = self.username().map(str::to_string) {
            self.state = SessionState::Portfolio {
                username,
                draft,
                input: None,
            };
        }
    }

    /// Leave the sub-mode for home; unsaved draft changes are dropped.
    pub fn exit_portfolio(&mut self) {
        if let SessionState::Portfolio { username, .. } = &self.state {
            let username = username.clone();
            self.sign_in(&username);
        }
    }

    /// Prompt of an active `add` wizard
    pub fn wizard_prompt(&self) -> Option<&'static str> {
        match &self.state {
            SessionState::Portfolio {
                input: Some(mode), ..
            } => Some(mode.prompt()),
            _ => None,
        }
    }

    /// Draft and wizard slot while in the sub-mode
    pub fn portfolio_mut(&mut self) -> Option<(&mut Portfolio, &mut Option<InputMode>)> {
        match &mut self.state {
            SessionState::Portfolio { draft, input, .. } => Some((draft, input)),
            _ => None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
