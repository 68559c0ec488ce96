//! Interactive terminal front end
//!
//! Reads lines with `dialoguer`, hands them to the [`Shell`] and renders the
//! output: errors in red, links underlined, control sentinels intercepted.
//! `edit <file>` opens `$EDITOR` and saves through the content operation.

use crate::error::ApiError;
use crate::ops::Opened;
use crate::session::Session;
use crate::shell::{render_error, Shell, ABOUT_SENTINEL, CLEAR_SENTINEL, LINK_PREFIX};
use dialoguer::{Editor, Input};
use owo_colors::OwoColorize;
use tokio::runtime::Runtime;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

const ABOUT: &[&str] = &[
    "About OS Terminal",
    "",
    "A terminal interface over a simulated, per-user file system.",
    "Sign up or sign in to get a home directory at /<username>, then",
    "organize directories, text files and url bookmarks inside it.",
    "",
    "  - Unix-like commands: ls, cd, mkdir, touch, rm, rmdir, mv, rename",
    "  - Files hold text (write, edit); bookmarks hold a url (seturl)",
    "  - Directory sizes always equal the sum of their contents",
    "  - 'portfolio' opens an editor for your public profile",
    "",
    "Type 'help' for the full command list and 'quit' to leave.",
];

pub struct Terminal<'a> {
    shell: &'a Shell,
    runtime: &'a Runtime,
    welcome: &'a str,
}

impl<'a> Terminal<'a> {
    pub fn new(shell: &'a Shell, runtime: &'a Runtime, welcome: &'a str) -> Self {
        Self {
            shell,
            runtime,
            welcome,
        }
    }

    pub fn run(&self, session: &mut Session) -> Result<(), ApiError> {
        println!("{}", self.welcome);
        loop {
            let line: String = Input::new()
                .with_prompt(prompt(session))
                .allow_empty(true)
                .interact_text()
                .map_err(|e| ApiError::ConfigError(format!("Failed to read input: {}", e)))?;

            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("quit") && !session.in_portfolio() {
                break;
            }

            let output = match edit_target(session, trimmed) {
                Some(name) => self.edit_file(session, &name),
                None => self.runtime.block_on(self.shell.execute(session, &line)),
            };
            for out in output {
                match out.as_str() {
                    CLEAR_SENTINEL => print!("{}", CLEAR_SCREEN),
                    ABOUT_SENTINEL => ABOUT.iter().for_each(|l| println!("{}", l)),
                    _ => println!("{}", render_line(&out)),
                }
            }
        }
        Ok(())
    }

    fn edit_file(&self, session: &Session, name: &str) -> Vec<String> {
        let (Some(user), location) = (session.username(), session.location()) else {
            return vec!["Error: Please sign in to edit file".to_string()];
        };
        let service = self.shell.service();
        let content = match self.runtime.block_on(service.open(user, location, name)) {
            Ok(Opened::File { content, .. }) => content,
            Ok(Opened::Url { .. }) => return vec![format!("Error: File not found: {}", name)],
            Err(e) => return render_error(e),
        };

        match Editor::new().edit(&content) {
            Ok(Some(edited)) => {
                let edited = edited.trim_end_matches('\n');
                match self
                    .runtime
                    .block_on(service.set_content(user, location, name, edited))
                {
                    Ok(()) => vec!["File content updated successfully".to_string()],
                    Err(e) => render_error(e),
                }
            }
            Ok(None) => vec!["Edit cancelled".to_string()],
            Err(e) => vec![format!("Error: Failed to open editor: {}", e)],
        }
    }
}

/// `user@location $`, or the wizard's question while one is active
fn prompt(session: &Session) -> String {
    if let Some(question) = session.wizard_prompt() {
        return question.to_string();
    }
    format!(
        "{}@{} $",
        session.username().unwrap_or("guest"),
        session.location()
    )
}

/// File name of an `edit <file>` line outside the portfolio sub-mode
fn edit_target(session: &Session, line: &str) -> Option<String> {
    if session.in_portfolio() {
        return None;
    }
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(verb), Some(name)) if verb.eq_ignore_ascii_case("edit") => Some(name.to_lowercase()),
        _ => None,
    }
}

/// Style one output line for the terminal
pub fn render_line(line: &str) -> String {
    if line.starts_with("Error:") {
        return format!("{}", line.red());
    }
    if let Some(at) = line.find(LINK_PREFIX) {
        let (before, link) = line.split_at(at);
        let url = &link[LINK_PREFIX.len()..];
        return format!("{}{}", before, url.underline());
    }
    line.to_string()
}
