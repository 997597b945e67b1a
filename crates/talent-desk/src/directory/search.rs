use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use super::domain::{Admin, Candidate, Company, Record};

/// Free-text search over the fields a list view exposes.
pub trait Searchable: Record {
    /// `needle` is already lowercased and non-empty.
    fn matches_term(&self, needle: &str) -> bool;
}

/// Query string accepted by every list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl ListQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            q: Some(term.into()),
            status: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn matches<T: Searchable>(&self, record: &T) -> bool {
        let status_ok = match self.status.as_deref().map(str::trim) {
            Some(status) if !status.is_empty() => record.status_key().eq_ignore_ascii_case(status),
            _ => true,
        };
        if !status_ok {
            return false;
        }

        match self.q.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => record.matches_term(&term.to_lowercase()),
            _ => true,
        }
    }

    pub fn apply<T: Searchable>(&self, records: Vec<T>) -> Vec<T> {
        records
            .into_iter()
            .filter(|record| self.matches(record))
            .collect()
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn contains_opt(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|value| contains(value, needle))
}

impl Searchable for Admin {
    // Admins are searchable on every populated attribute. Timestamps render
    // the way browsers print them (`2025-03-14T09:30:00.000Z`).
    fn matches_term(&self, needle: &str) -> bool {
        let created_at = self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let found = [
            Some(self.id.as_str()),
            Some(self.full_name.as_str()),
            Some(self.email.as_str()),
            Some(self.role.as_str()),
            self.whatsapp_number.as_deref(),
            Some(self.employee_id.as_str()),
            Some(self.designation.as_str()),
            self.office_address.as_deref(),
            self.profile_image_url.as_deref(),
            Some(self.status.key()),
            Some(created_at.as_str()),
        ]
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
        .any(|value| contains(value, needle));
        found
    }
}

impl Searchable for Candidate {
    fn matches_term(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains(&self.email, needle)
            || contains_opt(self.location.as_deref(), needle)
            || self.skills.iter().any(|skill| contains(skill, needle))
    }
}

impl Searchable for Company {
    fn matches_term(&self, needle: &str) -> bool {
        contains(&self.name, needle)
            || contains(&self.industry, needle)
            || contains_opt(self.website.as_deref(), needle)
            || contains_opt(self.phone.as_deref(), needle)
    }
}
