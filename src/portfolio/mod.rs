//! Portfolio profile document
//!
//! A structured profile stored next to the file tree in the user record. The
//! portfolio sub-mode of the shell edits a draft copy and writes it back on
//! `save`; it never touches the tree.

pub mod commands;
pub mod wizard;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub start_date: NaiveDate,
    /// `None` while the position is current
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hobby {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub field_of_study: String,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The whole profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Portfolio {
    pub name: String,
    pub title: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub social_links: Vec<SocialLink>,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub experiences: Vec<Experience>,
    pub hobbies: Vec<Hobby>,
    pub education: Vec<Education>,
}

impl Portfolio {
    /// Fresh profile named after its owner
    pub fn for_user(username: &str) -> Self {
        Self {
            name: username.to_string(),
            ..Self::default()
        }
    }
}

/// List sections of a portfolio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Skill,
    Project,
    Experience,
    Social,
    Hobby,
    Education,
}

impl Section {
    /// Accepts the singular and plural spellings (`skill`, `skills`, ...).
    pub fn parse(word: &str) -> Option<Self> {
        match word {
            "skill" | "skills" => Some(Section::Skill),
            "project" | "projects" => Some(Section::Project),
            "experience" | "experiences" => Some(Section::Experience),
            "social" | "socials" => Some(Section::Social),
            "hobby" | "hobbies" => Some(Section::Hobby),
            "education" => Some(Section::Education),
            _ => None,
        }
    }

    /// Heading used when listing the section
    pub fn title(self) -> &'static str {
        match self {
            Section::Skill => "Skills",
            Section::Project => "Projects",
            Section::Experience => "Experiences",
            Section::Social => "Social Links",
            Section::Hobby => "Hobbies",
            Section::Education => "Education",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Section::Skill => "skill",
            Section::Project => "project",
            Section::Experience => "experience",
            Section::Social => "social link",
            Section::Hobby => "hobby",
            Section::Education => "education",
        };
        f.write_str(word)
    }
}

/// A completed wizard entry, ready to append to its section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Skill(Skill),
    Project(Project),
    Experience(Experience),
    Social(SocialLink),
    Hobby(Hobby),
    Education(Education),
}

impl Item {
    /// Append to the matching section; returns the confirmation line.
    pub fn add_to(self, portfolio: &mut Portfolio) -> String {
        match self {
            Item::Skill(skill) => {
                let line = format!("Skill \"{}\" added successfully", skill.name);
                portfolio.skills.push(skill);
                line
            }
            Item::Project(project) => {
                let line = format!("Project \"{}\" added successfully", project.title);
                portfolio.projects.push(project);
                line
            }
            Item::Experience(exp) => {
                let line = format!(
                    "Experience \"{} at {}\" added successfully",
                    exp.role, exp.company
                );
                portfolio.experiences.push(exp);
                line
            }
            Item::Social(link) => {
                let line = format!("Social link for {} added successfully", link.platform);
                portfolio.social_links.push(link);
                line
            }
            Item::Hobby(hobby) => {
                let line = format!("Hobby \"{}\" added successfully", hobby.name);
                portfolio.hobbies.push(hobby);
                line
            }
            Item::Education(edu) => {
                let line = format!("Education at \"{}\" added successfully", edu.institution);
                portfolio.education.push(edu);
                line
            }
        }
    }
}
