//! Step-by-step input for `add <section>`
//!
//! Each line typed while a wizard is active answers the current prompt. The
//! collected answers are validated into an [`Item`] after the last step.

use super::{Education, Experience, Hobby, Item, Project, Section, Skill, SocialLink};
use chrono::NaiveDate;
use std::collections::HashMap;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub field: &'static str,
    pub prompt: &'static str,
    pub optional: bool,
}

const fn required(field: &'static str, prompt: &'static str) -> Step {
    Step {
        field,
        prompt,
        optional: false,
    }
}

const fn optional(field: &'static str, prompt: &'static str) -> Step {
    Step {
        field,
        prompt,
        optional: true,
    }
}

const SKILL_STEPS: &[Step] = &[
    required("name", "Enter skill name:"),
    optional(
        "level",
        "Enter skill level (Beginner, Intermediate etc) (optional):",
    ),
];

const PROJECT_STEPS: &[Step] = &[
    required("title", "Enter project title:"),
    required("description", "Enter project description:"),
    required("technologies", "Enter technologies (comma-separated):"),
    optional("link", "Enter project link (optional):"),
    optional("image", "Enter project image link (optional):"),
];

const EXPERIENCE_STEPS: &[Step] = &[
    required("role", "Enter role:"),
    required("company", "Enter company:"),
    required("description", "Enter description:"),
    required("startDate", "Enter start date (YYYY-MM-DD):"),
    optional("endDate", "Enter end date (YYYY-MM-DD or 'present'):"),
];

const SOCIAL_STEPS: &[Step] = &[
    required("platform", "Enter social platform:"),
    required("url", "Enter social link URL:"),
];

const HOBBY_STEPS: &[Step] = &[
    required("name", "Enter hobby name:"),
    optional("description", "Enter hobby description (optional):"),
];

const EDUCATION_STEPS: &[Step] = &[
    required("institution", "Enter institution name:"),
    required("degree", "Enter degree:"),
    required("fieldOfStudy", "Enter field of study:"),
    required("startDate", "Enter start date (YYYY-MM-DD):"),
    optional("endDate", "Enter end date (YYYY-MM-DD or 'present'):"),
    optional("description", "Enter description (optional):"),
];

fn steps_for(section: Section) -> &'static [Step] {
    match section {
        Section::Skill => SKILL_STEPS,
        Section::Project => PROJECT_STEPS,
        Section::Experience => EXPERIENCE_STEPS,
        Section::Social => SOCIAL_STEPS,
        Section::Hobby => HOBBY_STEPS,
        Section::Education => EDUCATION_STEPS,
    }
}

/// Outcome of answering one prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Required field left empty; the same prompt stays active
    Required,
    /// Accepted; `echo` repeats the prompt with the answer
    Next { echo: String },
    /// Last step accepted; the item or the validation failure
    Done {
        echo: String,
        item: Result<Item, String>,
    },
}

/// An in-progress `add` wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputMode {
    section: Section,
    current: usize,
    data: HashMap<&'static str, String>,
}

impl InputMode {
    pub fn start(section: Section) -> Self {
        Self {
            section,
            current: 0,
            data: HashMap::new(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Prompt of the step awaiting an answer
    pub fn prompt(&self) -> &'static str {
        steps_for(self.section)
            .get(self.current)
            .map(|s| s.prompt)
            .unwrap_or_default()
    }

    pub fn answer(&mut self, input: &str) -> Answer {
        let steps = steps_for(self.section);
        let Some(step) = steps.get(self.current) else {
            return Answer::Required;
        };
        let value = input.trim();
        if value.is_empty() && !step.optional {
            return Answer::Required;
        }
        self.data.insert(step.field, value.to_string());
        let echo = format!("{} {}", step.prompt, value);

        self.current += 1;
        if self.current < steps.len() {
            return Answer::Next { echo };
        }
        Answer::Done {
            echo,
            item: self.build(),
        }
    }

    fn text(&self, field: &str) -> String {
        self.data.get(field).cloned().unwrap_or_default()
    }

    fn optional_text(&self, field: &str) -> Option<String> {
        self.data.get(field).filter(|v| !v.is_empty()).cloned()
    }

    fn build(&self) -> Result<Item, String> {
        let item = match self.section {
            Section::Skill => Item::Skill(Skill {
                name: self.text("name"),
                level: self.optional_text("level"),
            }),
            Section::Project => {
                let link = self.optional_text("link");
                if let Some(link) = &link {
                    check_url("link", link)?;
                }
                Item::Project(Project {
                    title: self.text("title"),
                    description: self.text("description"),
                    technologies: self
                        .text("technologies")
                        .split(',')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect(),
                    link,
                    image: self.optional_text("image"),
                })
            }
            Section::Experience => Item::Experience(Experience {
                role: self.text("role"),
                company: self.text("company"),
                description: self.text("description"),
                start_date: parse_date("startDate", &self.text("startDate"))?,
                end_date: parse_end_date(self.optional_text("endDate"))?,
            }),
            Section::Social => {
                let url = self.text("url");
                check_url("url", &url)?;
                Item::Social(SocialLink {
                    platform: self.text("platform"),
                    url,
                    icon: None,
                })
            }
            Section::Hobby => Item::Hobby(Hobby {
                name: self.text("name"),
                description: self.optional_text("description"),
            }),
            Section::Education => Item::Education(Education {
                institution: self.text("institution"),
                degree: self.text("degree"),
                field_of_study: self.text("fieldOfStudy"),
                start_date: parse_date("startDate", &self.text("startDate"))?,
                end_date: parse_end_date(self.optional_text("endDate"))?,
                description: self.optional_text("description"),
            }),
        };
        Ok(item)
    }
}

fn check_url(field: &str, value: &str) -> Result<(), String> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|_| format!("{}: Invalid url", field))
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| format!("{}: Invalid date", field))
}

fn parse_end_date(value: Option<String>) -> Result<Option<NaiveDate>, String> {
    match value.as_deref() {
        None => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("present") => Ok(None),
        Some(v) => parse_date("endDate", v).map(Some),
    }
}
