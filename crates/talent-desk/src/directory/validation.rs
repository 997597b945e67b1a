use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::domain::{AdminDraft, CandidateDraft, CompanyDraft};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-]+$").expect("valid phone regex"));

/// Field-level messages collected while checking a submitted form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the first message for a field; later messages are ignored.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.fields.keys().copied().collect();
        write!(f, "validation failed for {}", names.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Submit-time checks for a form payload.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;

    /// Trim user input and collapse blank optional fields before validation.
    fn normalized(self) -> Self
    where
        Self: Sized,
    {
        self
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub(crate) fn require(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    message: &str,
) {
    if value.trim().is_empty() {
        errors.add(field, message);
    }
}

pub(crate) fn require_email(errors: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.add(field, "Email is required");
    } else if !is_valid_email(value) {
        errors.add(field, "Email is invalid");
    }
}

fn optional_email(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
        if !is_valid_email(value) {
            errors.add(field, "Email is invalid");
        }
    }
}

fn optional_phone(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    message: &str,
) {
    if let Some(value) = value.filter(|value| !value.trim().is_empty()) {
        if !is_valid_phone(value) {
            errors.add(field, message);
        }
    }
}

fn trimmed(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.len() == value.len() {
        value
    } else {
        trimmed.to_string()
    }
}

fn trimmed_optional(value: Option<String>) -> Option<String> {
    value.map(trimmed).filter(|value| !value.is_empty())
}

impl Validate for AdminDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "full_name", &self.full_name, "Full name is required");
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "role", &self.role, "Role is required");
        optional_phone(
            &mut errors,
            "whatsapp_number",
            self.whatsapp_number.as_deref(),
            "Invalid WhatsApp number",
        );
        require(
            &mut errors,
            "employee_id",
            &self.employee_id,
            "Employee ID is required",
        );
        require(
            &mut errors,
            "designation",
            &self.designation,
            "Designation is required",
        );
        errors.into_result()
    }

    fn normalized(self) -> Self {
        Self {
            full_name: trimmed(self.full_name),
            email: trimmed(self.email),
            role: trimmed(self.role),
            whatsapp_number: trimmed_optional(self.whatsapp_number),
            employee_id: trimmed(self.employee_id),
            designation: trimmed(self.designation),
            office_address: trimmed_optional(self.office_address),
            profile_image_url: trimmed_optional(self.profile_image_url),
            status: self.status,
        }
    }
}

impl Validate for CandidateDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require_email(&mut errors, "email", &self.email);
        require(&mut errors, "phone", &self.phone, "Phone is required");

        let mut seen: Vec<&str> = Vec::with_capacity(self.skills.len());
        for skill in &self.skills {
            let skill = skill.trim();
            if skill.is_empty() {
                errors.add("skills", "Skill cannot be empty");
            } else if seen.contains(&skill) {
                errors.add("skills", "Skill already exists");
            } else {
                seen.push(skill);
            }
        }

        errors.into_result()
    }

    fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            email: trimmed(self.email),
            phone: trimmed(self.phone),
            location: trimmed_optional(self.location),
            status: self.status,
            skills: self.skills.into_iter().map(trimmed).collect(),
        }
    }
}

impl Validate for CompanyDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        require(&mut errors, "name", &self.name, "Company name is required");
        optional_email(&mut errors, "email", self.email.as_deref());
        optional_phone(
            &mut errors,
            "phone",
            self.phone.as_deref(),
            "Invalid phone number",
        );
        errors.into_result()
    }

    fn normalized(self) -> Self {
        Self {
            name: trimmed(self.name),
            industry: trimmed(self.industry),
            founded: trimmed_optional(self.founded),
            website: trimmed_optional(self.website),
            email: trimmed_optional(self.email),
            phone: trimmed_optional(self.phone),
            address: trimmed_optional(self.address),
            size: self.size,
            status: self.status,
        }
    }
}
