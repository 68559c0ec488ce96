//! Command dispatcher
//!
//! Takes one raw line plus the caller's [`Session`] and returns display
//! lines. Expected failures come back as `Error: ...` lines; faults from the
//! store are logged and collapsed into a single generic error line, leaving
//! the session usable.
//!
//! Output conventions consumed by front ends:
//! - a line starting with `Error:` is an error
//! - a line containing [`LINK_PREFIX`] is a link (strip the prefix to render)
//! - [`CLEAR_SENTINEL`] and [`ABOUT_SENTINEL`] are control signals

pub mod command;
pub mod format;

use crate::error::{ApiError, FsError};
use crate::identity::Authenticator;
use crate::ops::{Opened, UrlOutcome};
use crate::portfolio::commands::{self as portfolio_commands, PortfolioCommand, SAVE_HINT};
use crate::portfolio::wizard::Answer;
use crate::service::DeskService;
use crate::session::Session;
use crate::tree::node::NodeKind;
use command::{parse_command, Command};
use std::sync::Arc;

pub const CLEAR_SENTINEL: &str = "cmd:clear";
pub const ABOUT_SENTINEL: &str = "cmd:about";
pub const LINK_PREFIX: &str = "fileurl://";
pub const GENERIC_ERROR: &str = "Error: an error occurred";

pub struct Shell {
    service: Arc<DeskService>,
    auth: Arc<dyn Authenticator>,
}

fn required(value: Option<String>, message: &'static str) -> Result<String, FsError> {
    value.ok_or(FsError::MissingArgument(message))
}

/// Output lines for a failed command
pub fn render_error(err: ApiError) -> Vec<String> {
    match err {
        ApiError::Fs(e) => vec![format!("Error: {}", e)],
        other => {
            tracing::error!(error = %other, "command failed");
            vec![GENERIC_ERROR.to_string()]
        }
    }
}

impl Shell {
    pub fn new(service: Arc<DeskService>, auth: Arc<dyn Authenticator>) -> Self {
        Self { service, auth }
    }

    pub fn service(&self) -> &Arc<DeskService> {
        &self.service
    }

    /// Run one line against `session`.
    pub async fn execute(&self, session: &mut Session, line: &str) -> Vec<String> {
        let result = if session.in_portfolio() {
            self.execute_portfolio(session, line).await
        } else {
            match parse_command(line) {
                Some(command) => {
                    tracing::debug!(verb = command.verb(), location = session.location(), "dispatch");
                    self.dispatch(session, command).await
                }
                None => Ok(Vec::new()),
            }
        };
        result.unwrap_or_else(render_error)
    }

    async fn dispatch(&self, session: &mut Session, command: Command) -> Result<Vec<String>, ApiError> {
        let location = session.location().to_string();
        let current_user = session.username().map(str::to_string);
        let user = |action: &'static str| {
            current_user
                .clone()
                .ok_or(FsError::Unauthenticated { action })
        };

        let lines = match command {
            Command::Ls => {
                let user = user("list items")?;
                let entries = self.service.list_directory(&user, &location).await?;
                format::listing(&entries)
            }
            Command::Pwd => vec![location],
            Command::Cd(target) => {
                let user = user("change directory")?;
                let target = required(target, "No directory specified")?;
                let next = self
                    .service
                    .change_directory(&user, &location, &target)
                    .await?;
                if !session.set_location(next.clone()) {
                    return Err(FsError::OutOfScope { path: next }.into());
                }
                Vec::new()
            }
            Command::Mkdir(name) => {
                let user = user("create directory")?;
                let name = required(name, "No directory name specified")?;
                self.service
                    .create(&user, &location, &name, NodeKind::Directory)
                    .await?;
                vec![format!("Directory created: {}", name)]
            }
            Command::Touch(name) => {
                let user = user("create file")?;
                let name = required(name, "No file name specified")?;
                self.service
                    .create(&user, &location, &name, NodeKind::File)
                    .await?;
                vec![format!("File created: {}", name)]
            }
            Command::Rm(name) => {
                let user = user("remove file")?;
                let name = required(name, "No file specified")?;
                self.service
                    .remove(&user, &location, &name, NodeKind::File)
                    .await?;
                vec![format!("File removed: {}", name)]
            }
            Command::Rmdir(name) => {
                let user = user("remove directory")?;
                let name = required(name, "No directory specified")?;
                self.service
                    .remove(&user, &location, &name, NodeKind::Directory)
                    .await?;
                vec![format!("Directory removed: {}", name)]
            }
            Command::Open(name) => {
                let user = user("open file")?;
                let name = required(name, "No file specified")?;
                match self.service.open(&user, &location, &name).await? {
                    Opened::File { name, content } => {
                        let mut lines = vec![format!("Content of {}:", name)];
                        lines.extend(content.lines().map(str::to_string));
                        lines
                    }
                    Opened::Url { name, url } => {
                        vec![format!("URL of {}: {}{}", name, LINK_PREFIX, url)]
                    }
                }
            }
            Command::Write { name, content } => {
                let user = user("edit file")?;
                let name = required(name, "No file specified")?;
                self.service
                    .set_content(&user, &location, &name, &content)
                    .await?;
                vec!["File content updated successfully".to_string()]
            }
            Command::SetUrl { name, url } => {
                let user = user("set url")?;
                let name = required(name, "No file specified")?;
                let url = required(url, "No URL specified")?;
                match self.service.set_url(&user, &location, &name, &url).await? {
                    UrlOutcome::Created => vec!["File URL created successfully".to_string()],
                    UrlOutcome::Updated => vec!["File URL updated successfully".to_string()],
                }
            }
            Command::Mv {
                source,
                destination,
            } => {
                let user = user("move file/directory")?;
                let (Some(source), Some(destination)) = (source, destination) else {
                    return Err(FsError::MissingArgument("Source and destination must be specified").into());
                };
                if source == destination {
                    return Err(FsError::InvalidPath(
                        "Destination path cannot be the source path".to_string(),
                    )
                    .into());
                }
                let moved_to = self
                    .service
                    .move_node(&user, &location, &source, &destination)
                    .await?;
                tracing::debug!(source = %source, destination = %moved_to, "moved");
                vec!["Item moved successfully".to_string()]
            }
            Command::Rename { old_name, new_name } => {
                let user = user("rename file/directory")?;
                let (Some(old_name), Some(new_name)) = (old_name, new_name) else {
                    return Err(FsError::MissingArgument("Old name and new name must be specified").into());
                };
                if old_name == new_name {
                    return Err(FsError::SameName.into());
                }
                self.service
                    .rename(&user, &location, &old_name, &new_name)
                    .await?;
                vec!["Item renamed successfully".to_string()]
            }
            Command::Clear => vec![CLEAR_SENTINEL.to_string()],
            Command::About => vec![ABOUT_SENTINEL.to_string()],
            Command::Help => format::help(),
            Command::Portfolio => {
                let user = user("view your portfolio")?;
                let draft = self.service.portfolio(&user).await?;
                session.enter_portfolio(draft);
                vec!["Entering portfolio environment. Type 'help' for available commands.".to_string()]
            }
            Command::SignUp { username, password } => {
                if current_user.is_some() {
                    return Ok(vec![
                        format!("Error: {}", FsError::AlreadySignedIn),
                        "Sign out to create a new account".to_string(),
                    ]);
                }
                let (Some(username), Some(password)) = (username, password) else {
                    return Err(FsError::MissingArgument("Username and password are required").into());
                };
                match self.auth.sign_up(&username, &password).await {
                    Ok(()) => {}
                    Err(ApiError::Fs(e)) => return Ok(vec![format!("Error: Signup failed: {}", e)]),
                    Err(e) => return Err(e),
                }
                session.sign_in(&username);
                vec![format!("Signup successful. Welcome, {}!", username)]
            }
            Command::SignIn { username, password } => {
                if current_user.is_some() {
                    return Ok(vec![
                        format!("Error: {}", FsError::AlreadySignedIn),
                        "Sign out to sign in with a different account".to_string(),
                    ]);
                }
                let (Some(username), Some(password)) = (username, password) else {
                    return Err(FsError::AuthFailed("username and password are required".to_string()).into());
                };
                self.auth.sign_in(&username, &password).await?;
                session.sign_in(&username);
                tracing::info!(username = %username, "signed in");
                vec![format!("Login successful. Welcome back, {}!", username)]
            }
            Command::SignOut => {
                if current_user.is_none() {
                    return Err(FsError::NotSignedIn.into());
                }
                session.sign_out();
                vec!["Signed out successfully".to_string()]
            }
            Command::UserDel { username, password } => {
                let Some(current) = current_user.clone() else {
                    return Err(FsError::NotSignedIn.into());
                };
                let (Some(username), Some(password)) = (username, password) else {
                    return Err(FsError::MissingArgument("Username and password are required").into());
                };
                if username != current {
                    return Err(FsError::Rejected("You can only delete your own account".to_string()).into());
                }
                self.auth.delete_account(&username, &password).await?;
                session.sign_out();
                vec!["Account deleted successfully".to_string()]
            }
            Command::Search(username) => {
                let username = required(username, "No username specified")?;
                let record = self.service.load_record(&username).await?;
                let mut lines = vec![
                    format!("Username: {}", record.username),
                    format!("Name: {}", record.portfolio.name),
                ];
                if !record.portfolio.title.is_empty() {
                    lines.push(format!("Title: {}", record.portfolio.title));
                }
                lines
            }
            Command::Unknown(verb) => return Err(FsError::UnknownCommand(verb).into()),
        };
        Ok(lines)
    }

    async fn execute_portfolio(&self, session: &mut Session, line: &str) -> Result<Vec<String>, ApiError> {
        let Some(username) = session.username().map(str::to_string) else {
            return Ok(Vec::new());
        };

        if let Some((draft, input)) = session.portfolio_mut() {
            if let Some(mode) = input.as_mut() {
                return Ok(match mode.answer(line) {
                    Answer::Required => {
                        vec!["Error: This field is required. Please enter a value.".to_string()]
                    }
                    Answer::Next { echo } => vec![echo],
                    Answer::Done { echo, item } => {
                        *input = None;
                        match item {
                            Ok(item) => vec![echo, item.add_to(draft), SAVE_HINT.to_string()],
                            Err(reason) => vec![echo, format!("Error: Invalid inputs. {}", reason)],
                        }
                    }
                });
            }
        }

        let Some(command) = PortfolioCommand::parse(line) else {
            return Ok(Vec::new());
        };
        tracing::debug!(command = ?command, "portfolio dispatch");

        match command {
            PortfolioCommand::SignOut => {
                session.sign_out();
                tracing::info!(username = %username, "signed out from portfolio");
                return Ok(vec!["Signed out successfully".to_string()]);
            }
            PortfolioCommand::Exit => {
                session.exit_portfolio();
                return Ok(vec!["You have exited the portfolio environment".to_string()]);
            }
            PortfolioCommand::Clear => return Ok(vec![CLEAR_SENTINEL.to_string()]),
            PortfolioCommand::About => return Ok(vec![ABOUT_SENTINEL.to_string()]),
            PortfolioCommand::Help => return Ok(portfolio_commands::help()),
            PortfolioCommand::Unknown(verb) => {
                return Err(FsError::UnknownPortfolioCommand(verb).into())
            }
            _ => {}
        }

        let Some((draft, input)) = session.portfolio_mut() else {
            return Ok(Vec::new());
        };
        let lines = match command {
            PortfolioCommand::View(section) => portfolio_commands::view(draft, section.as_deref())?,
            PortfolioCommand::Edit { field, value } => portfolio_commands::edit(draft, &field, &value)?,
            PortfolioCommand::Add(section) => {
                *input = Some(portfolio_commands::start_add(&section)?);
                Vec::new()
            }
            PortfolioCommand::Remove {
                section,
                identifier,
            } => portfolio_commands::remove(draft, &section, &identifier)?,
            PortfolioCommand::Save => {
                let draft = draft.clone();
                self.service.save_portfolio(&username, &draft).await?;
                vec!["Portfolio updated successfully".to_string()]
            }
            _ => Vec::new(),
        };
        Ok(lines)
    }
}
