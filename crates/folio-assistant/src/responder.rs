#![forbid(unsafe_code)]

//! Rule-based responder.
//!
//! A [`Responder`] is an ordered list of [`ResponseRule`]s plus a fallback.
//! Input is lowercased once, rules are tried top to bottom, and the first
//! rule whose [`Predicate`] holds supplies the answer. When nothing matches
//! the fallback is returned, so [`Responder::respond`] is total.
//!
//! Rule tables are data. [`RuleTable`] holds keyword lists and response
//! templates that can be loaded from JSON and compiled against a
//! [`Profile`]; placeholders are filled in once at compile time.
//!
//! # Placeholders
//!
//! | Placeholder | Expands to |
//! |-------------|------------|
//! | `{name}` | full name |
//! | `{first_name}` | first word of the name |
//! | `{role}` | job title |
//! | `{about}` | biography |
//! | `{skills}` | skill names joined with `, ` |
//! | `{projects}` | project titles joined with `, ` |
//! | `{experience}` | `role at company (period)` joined with `. ` |
//! | `{email}` | contact address |
//!
//! Unknown placeholders are left as written.

use std::fmt;
use std::path::Path;

use folio_content::Profile;
use serde::{Deserialize, Serialize};

/// Answer used when a table's own fallback renders to nothing.
pub const DEFAULT_FALLBACK: &str =
    "I'm not sure about that. Try the Contact page or the social links for anything else.";

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// Test applied to lowercased input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Holds when the input contains any keyword as a substring.
    ContainsAny(Vec<String>),
}

impl Predicate {
    /// `ContainsAny` over `keywords`, lowercased. Blank keywords are dropped.
    #[must_use]
    pub fn contains_any<S: AsRef<str>>(keywords: &[S]) -> Self {
        Self::ContainsAny(
            keywords
                .iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    /// Evaluate against input that is already lowercased.
    #[must_use]
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Self::ContainsAny(keywords) => keywords.iter().any(|k| lowered.contains(k.as_str())),
        }
    }

    fn is_vacuous(&self) -> bool {
        match self {
            Self::ContainsAny(keywords) => keywords.is_empty(),
        }
    }
}

// ---------------------------------------------------------------------------
// ResponseRule / Responder
// ---------------------------------------------------------------------------

/// A (predicate, canned response) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRule {
    name: String,
    predicate: Predicate,
    response: String,
}

impl ResponseRule {
    /// Create a rule. Validation happens in [`Responder::new`].
    pub fn new(name: impl Into<String>, predicate: Predicate, response: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predicate,
            response: response.into(),
        }
    }

    /// Rule name, for diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The rule's predicate.
    #[must_use]
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// The canned response.
    #[must_use]
    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Errors from building a responder.
#[derive(Debug)]
pub enum ResponderError {
    /// A rule has no keywords and could never match.
    NoKeywords(String),
    /// A rule's response is blank.
    EmptyResponse(String),
    /// The fallback is blank.
    EmptyFallback,
    /// The rule file could not be read.
    Io(std::io::Error),
    /// The rule file is not a valid rule table.
    Parse(serde_json::Error),
}

impl fmt::Display for ResponderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponderError::NoKeywords(rule) => write!(f, "rule `{rule}` has no keywords"),
            ResponderError::EmptyResponse(rule) => write!(f, "rule `{rule}` has an empty response"),
            ResponderError::EmptyFallback => f.write_str("fallback response is empty"),
            ResponderError::Io(e) => write!(f, "I/O error: {e}"),
            ResponderError::Parse(e) => write!(f, "invalid rule table: {e}"),
        }
    }
}

impl std::error::Error for ResponderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResponderError::Io(e) => Some(e),
            ResponderError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ResponderError {
    fn from(e: std::io::Error) -> Self {
        ResponderError::Io(e)
    }
}

impl From<serde_json::Error> for ResponderError {
    fn from(e: serde_json::Error) -> Self {
        ResponderError::Parse(e)
    }
}

/// Ordered rule table with a fallback.
///
/// # Invariants
///
/// 1. Every rule has at least one keyword and a non-blank response.
/// 2. The fallback is non-blank, so every answer is non-empty.
#[derive(Debug, Clone)]
pub struct Responder {
    rules: Vec<ResponseRule>,
    fallback: String,
}

impl Responder {
    /// Build a responder, checking the invariants.
    pub fn new(rules: Vec<ResponseRule>, fallback: impl Into<String>) -> Result<Self, ResponderError> {
        let fallback = fallback.into();
        if fallback.trim().is_empty() {
            return Err(ResponderError::EmptyFallback);
        }
        for rule in &rules {
            if rule.predicate.is_vacuous() {
                return Err(ResponderError::NoKeywords(rule.name.clone()));
            }
            if rule.response.trim().is_empty() {
                return Err(ResponderError::EmptyResponse(rule.name.clone()));
            }
        }
        Ok(Self { rules, fallback })
    }

    /// The built-in rule table rendered for `profile`.
    #[must_use]
    pub fn for_profile(profile: &Profile) -> Self {
        RuleTable::builtin().compile(profile).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "built-in rule table rejected, using fallback only");
            Self {
                rules: Vec::new(),
                fallback: DEFAULT_FALLBACK.to_string(),
            }
        })
    }

    /// Answer `input`.
    #[must_use]
    pub fn respond(&self, input: &str) -> &str {
        self.matched_rule(input)
            .map_or(self.fallback.as_str(), ResponseRule::response)
    }

    /// The rule that answers `input`, or `None` when the fallback would.
    #[must_use]
    pub fn matched_rule(&self, input: &str) -> Option<&ResponseRule> {
        let lowered = input.to_lowercase();
        let rule = self.rules.iter().find(|r| r.predicate.matches(&lowered));
        tracing::trace!(
            rule = rule.map(ResponseRule::name),
            input_len = input.len(),
            "responder matched"
        );
        rule
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    /// The fallback answer.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

// ---------------------------------------------------------------------------
// RuleTable
// ---------------------------------------------------------------------------

/// A rule before compilation: keywords plus a response template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Rule name.
    pub name: String,
    /// Substring keywords; any one matching selects the rule.
    pub keywords: Vec<String>,
    /// Response template.
    pub template: String,
}

impl RuleSpec {
    fn new(name: &str, keywords: &[&str], template: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            template: template.to_string(),
        }
    }
}

/// Serializable rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    /// Rules in priority order.
    pub rules: Vec<RuleSpec>,
    /// Fallback template.
    pub fallback: String,
}

impl RuleTable {
    /// The default table.
    ///
    /// Experience is checked before projects so that "work experience"
    /// questions are answered with the work history.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            rules: vec![
                RuleSpec::new(
                    "skills",
                    &["skill", "tech", "stack"],
                    "{first_name} is proficient in {skills}.",
                ),
                RuleSpec::new(
                    "experience",
                    &["experience", "job", "career"],
                    "{first_name} has experience as {experience}.",
                ),
                RuleSpec::new(
                    "projects",
                    &["project", "work", "portfolio"],
                    "Some of {first_name}'s key projects include {projects}. \
                     You can view the full list in the Projects section!",
                ),
                RuleSpec::new(
                    "contact",
                    &["contact", "email", "hire", "reach"],
                    "You can reach out to {first_name} via the Contact page or email {email}.",
                ),
                RuleSpec::new("about", &["who", "about"], "{about}"),
                RuleSpec::new(
                    "greeting",
                    &["hello", "hi", "hey"],
                    "Hello! How can I help you learn more about {first_name} today?",
                ),
            ],
            fallback: "I'm not sure about that, but {first_name} would love to chat! \
                       Check out the contact page or social links."
                .to_string(),
        }
    }

    /// Parse a table from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, ResponderError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ResponderError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Render templates against `profile` and build a [`Responder`].
    ///
    /// Rules whose response renders blank (for example `{about}` with an
    /// empty biography) are skipped rather than rejected.
    pub fn compile(&self, profile: &Profile) -> Result<Responder, ResponderError> {
        let mut rules = Vec::with_capacity(self.rules.len());
        for spec in &self.rules {
            let predicate = Predicate::contains_any(&spec.keywords);
            if predicate.is_vacuous() {
                return Err(ResponderError::NoKeywords(spec.name.clone()));
            }
            let response = render(&spec.template, profile);
            if response.trim().is_empty() {
                tracing::debug!(rule = %spec.name, "rule skipped: response renders empty");
                continue;
            }
            rules.push(ResponseRule::new(spec.name.clone(), predicate, response));
        }
        Responder::new(rules, render(&self.fallback, profile))
    }
}

/// Expand placeholders in `template` from `profile`.
fn render(template: &str, profile: &Profile) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let key = &after[..close];
        match expand(key, profile) {
            Some(value) => out.push_str(&value),
            None => {
                out.push('{');
                out.push_str(key);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

fn expand(key: &str, profile: &Profile) -> Option<String> {
    let value = match key {
        "name" => profile.name.clone(),
        "first_name" => profile.first_name().to_string(),
        "role" => profile.role.clone(),
        "about" => profile.about.clone(),
        "email" => profile.email.clone(),
        "skills" => profile.skills.join(", "),
        "projects" => profile
            .projects
            .iter()
            .map(|p| p.title.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        "experience" => profile
            .experience
            .iter()
            .map(|e| format!("{} at {} ({})", e.role, e.company, e.period))
            .collect::<Vec<_>>()
            .join(". "),
        _ => return None,
    };
    Some(value)
}
