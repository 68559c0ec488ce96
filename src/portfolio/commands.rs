//! Portfolio sub-mode command set

use super::wizard::InputMode;
use super::{Portfolio, Section};
use crate::error::FsError;
use crate::shell::LINK_PREFIX;

pub const SAVE_HINT: &str = "Enter command 'save' to save changes";

/// A parsed portfolio-mode line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioCommand {
    View(Option<String>),
    Edit { field: String, value: String },
    Add(String),
    Remove { section: String, identifier: String },
    Save,
    Exit,
    SignOut,
    Clear,
    About,
    Help,
    Unknown(String),
}

impl PortfolioCommand {
    /// Parse one line; `None` for a blank line.
    ///
    /// The verb and the first argument are lower-cased, the rest keeps its
    /// case (values and identifiers are free text).
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next()?.to_lowercase();
        let first = words.next().map(str::to_lowercase).unwrap_or_default();
        let rest = words.collect::<Vec<_>>().join(" ");

        let command = match verb.as_str() {
            "view" => PortfolioCommand::View((!first.is_empty()).then_some(first)),
            "edit" => PortfolioCommand::Edit {
                field: first,
                value: rest,
            },
            "add" => PortfolioCommand::Add(first),
            "remove" => PortfolioCommand::Remove {
                section: first,
                identifier: rest,
            },
            "save" => PortfolioCommand::Save,
            "exit" => PortfolioCommand::Exit,
            "signout" => PortfolioCommand::SignOut,
            "clear" | "cls" => PortfolioCommand::Clear,
            "about" => PortfolioCommand::About,
            "help" => PortfolioCommand::Help,
            _ => PortfolioCommand::Unknown(line.split_whitespace().next().unwrap_or_default().to_string()),
        };
        Some(command)
    }
}

fn section_named(word: &str) -> Result<Section, FsError> {
    Section::parse(word).ok_or_else(|| FsError::Rejected(format!("Unknown section: {}", word)))
}

fn link(url: Option<&str>) -> String {
    url.map(|u| format!("{}{}", LINK_PREFIX, u))
        .unwrap_or_else(|| "Not set".to_string())
}

/// `view [section]`
pub fn view(portfolio: &Portfolio, section: Option<&str>) -> Result<Vec<String>, FsError> {
    let Some(word) = section else {
        return Ok(vec![
            format!("Name:   {}", portfolio.name),
            format!("Title:  {}", portfolio.title),
            format!("Bio:    {}", portfolio.bio),
            format!("Email:  {}", portfolio.email.as_deref().unwrap_or("Not set")),
            format!("Avatar: {}", portfolio.avatar.as_deref().unwrap_or("Not set")),
            "Use 'view <section>' to see details. Example: 'view projects'".to_string(),
        ]);
    };
    let section = section_named(word)?;

    let body: Vec<String> = match section {
        Section::Skill => portfolio
            .skills
            .iter()
            .map(|s| format!("- {}:       {}", s.name, s.level.as_deref().unwrap_or("")))
            .collect(),
        Section::Project => portfolio
            .projects
            .iter()
            .enumerate()
            .flat_map(|(i, p)| {
                vec![
                    format!("Project {}:", i + 1),
                    format!("- Title:            {}", p.title),
                    format!("- Description:      {}", p.description),
                    format!("- Technologies:     {}", p.technologies.join(", ")),
                    format!("- Link:             {}", link(p.link.as_deref())),
                    format!("- Image:            {}", link(p.image.as_deref())),
                ]
            })
            .collect(),
        Section::Experience => portfolio
            .experiences
            .iter()
            .flat_map(|e| {
                vec![
                    format!("{} at {}:", e.role, e.company),
                    format!("- Description:      {}", e.description),
                    format!("- Start Date:       {}", e.start_date),
                    format!(
                        "- End Date:         {}",
                        e.end_date.map(|d| d.to_string()).unwrap_or_else(|| "Present".to_string())
                    ),
                ]
            })
            .collect(),
        Section::Social => portfolio
            .social_links
            .iter()
            .map(|l| format!("- {}:      {}{}", l.platform, LINK_PREFIX, l.url))
            .collect(),
        Section::Hobby => portfolio
            .hobbies
            .iter()
            .map(|h| format!("- {}:       {}", h.name, h.description.as_deref().unwrap_or("")))
            .collect(),
        Section::Education => portfolio
            .education
            .iter()
            .flat_map(|e| {
                vec![
                    format!("{} in {} at {}:", e.degree, e.field_of_study, e.institution),
                    format!("- Start Date:       {}", e.start_date),
                    format!(
                        "- End Date:         {}",
                        e.end_date.map(|d| d.to_string()).unwrap_or_else(|| "Present".to_string())
                    ),
                    format!(
                        "- Description:      {}",
                        e.description.as_deref().unwrap_or("Not provided")
                    ),
                ]
            })
            .collect(),
    };

    if body.is_empty() {
        return Ok(vec![format!("{} section is empty", section.title())]);
    }
    let mut lines = vec![format!("{}:", section.title())];
    lines.extend(body);
    Ok(lines)
}

/// `edit <field> <value>`
pub fn edit(portfolio: &mut Portfolio, field: &str, value: &str) -> Result<Vec<String>, FsError> {
    if field.is_empty() {
        return Err(FsError::Rejected("Field is required".to_string()));
    }
    if !matches!(field, "name" | "title" | "bio" | "email" | "avatar") {
        return Err(FsError::Rejected(format!("Field '{}' not found", field)));
    }
    if value.is_empty() {
        return Err(FsError::Rejected(format!("The value for '{}' is required", field)));
    }
    match field {
        "name" => portfolio.name = value.to_string(),
        "title" => portfolio.title = value.to_string(),
        "bio" => portfolio.bio = value.to_string(),
        "email" => {
            if !value.contains('@') {
                return Err(FsError::Rejected(format!("Invalid email: {}", value)));
            }
            portfolio.email = Some(value.to_string());
        }
        _ => portfolio.avatar = Some(value.to_string()),
    }
    Ok(vec![format!("Updated {} to: {}", field, value), SAVE_HINT.to_string()])
}

/// `add <section>`: the wizard that will collect the item
pub fn start_add(section: &str) -> Result<InputMode, FsError> {
    if section.is_empty() {
        return Err(FsError::Rejected(
            "Section is required. Usage: add <section>".to_string(),
        ));
    }
    section_named(section).map(InputMode::start)
}

/// `remove <section> <identifier>`: drops every item whose key matches.
pub fn remove(portfolio: &mut Portfolio, section: &str, identifier: &str) -> Result<Vec<String>, FsError> {
    let section = section_named(section)?;
    let removed = match section {
        Section::Skill => retain_count(&mut portfolio.skills, |s| s.name != identifier),
        Section::Project => retain_count(&mut portfolio.projects, |p| p.title != identifier),
        Section::Experience => retain_count(&mut portfolio.experiences, |e| e.role != identifier),
        Section::Social => retain_count(&mut portfolio.social_links, |l| l.platform != identifier),
        Section::Hobby => retain_count(&mut portfolio.hobbies, |h| h.name != identifier),
        Section::Education => retain_count(&mut portfolio.education, |e| e.institution != identifier),
    };
    if removed == 0 {
        return Err(FsError::Rejected(format!(
            "Identifier not found in {}: {}",
            section.title().to_lowercase(),
            identifier
        )));
    }
    Ok(vec![
        format!("Removed {}: {}", section, identifier),
        SAVE_HINT.to_string(),
    ])
}

fn retain_count<T>(items: &mut Vec<T>, keep: impl FnMut(&T) -> bool) -> usize {
    let before = items.len();
    items.retain(keep);
    before - items.len()
}

pub fn help() -> Vec<String> {
    let commands = [
        ("view [section]", "View portfolio or specific section"),
        ("edit <field> <value>", "Edit basic portfolio fields"),
        ("add <section>", "Add item to a section"),
        ("remove <section> <identifier>", "Remove item from a section"),
        ("save", "Save changes to the portfolio"),
        ("exit", "Exit the portfolio environment"),
        ("signout", "Sign out and discard unsaved changes"),
        ("clear/cls", "Clear the terminal screen"),
        ("about", "For more details about portfolio"),
        ("help", "Display this help message"),
    ];
    crate::shell::format::command_table(&commands)
}
