//! Profile data used to fill the assistant's canned answers.

use serde::{Deserialize, Serialize};

/// The person the site presents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Full name.
    pub name: String,
    /// Job title.
    pub role: String,
    /// Short biography.
    pub about: String,
    /// Skill names in display order.
    pub skills: Vec<String>,
    /// Showcased projects.
    pub projects: Vec<Project>,
    /// Work history, most recent first.
    pub experience: Vec<Experience>,
    /// Contact address.
    pub email: String,
}

impl Profile {
    /// First word of the name, used in conversational answers.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// A showcased project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project title.
    pub title: String,
    /// Kind of project.
    pub category: String,
    /// One-line description.
    pub description: String,
}

/// One position in the work history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    /// Position held.
    pub role: String,
    /// Employer.
    pub company: String,
    /// Free-form date range.
    pub period: String,
}
