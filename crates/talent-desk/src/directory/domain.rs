use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::validation::Validate;

/// Identifier wrapper for directory records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The three collections managed by the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Admin,
    Candidate,
    Company,
}

impl RecordKind {
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Self::Admin => "adm",
            Self::Candidate => "cand",
            Self::Company => "comp",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Candidate => "Candidate",
            Self::Company => "Company",
        }
    }
}

/// Active/inactive flag shared by admins and companies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    #[default]
    Active,
    Inactive,
}

impl ActivityStatus {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

/// Hiring pipeline position of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    #[default]
    New,
    Screening,
    Interview,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 5] = [
        Self::New,
        Self::Screening,
        Self::Interview,
        Self::Hired,
        Self::Rejected,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Screening => "screening",
            Self::Interview => "interview",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Screening => "Screening",
            Self::Interview => "Interview",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }

    /// Rejected candidates drop out of the active pipeline.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Headcount bracket offered by the company form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-49")]
    Micro,
    #[serde(rename = "50-99")]
    Small,
    #[default]
    #[serde(rename = "100-499")]
    Medium,
    #[serde(rename = "500-999")]
    Large,
    #[serde(rename = "1000+")]
    Enterprise,
}

impl CompanySize {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Micro => "1-49 employees",
            Self::Small => "50-99 employees",
            Self::Medium => "100-499 employees",
            Self::Large => "500-999 employees",
            Self::Enterprise => "1000+ employees",
        }
    }
}

/// Behavior shared by every record stored in the directory.
///
/// A record is created from a validated draft, replaced wholesale by a later
/// draft, and can be projected back into a draft so partial patches can be
/// merged and re-validated before they land.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Validate + DeserializeOwned + Send;
    type Patch: DeserializeOwned + Send;

    const KIND: RecordKind;

    fn id(&self) -> &RecordId;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    fn display_name(&self) -> &str;
    fn status_key(&self) -> &'static str;

    fn build(id: RecordId, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;
    fn apply(&mut self, draft: Self::Draft, updated_at: DateTime<Utc>);
    fn patched(&self, patch: Self::Patch) -> Self::Draft;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Admin {
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub whatsapp_number: Option<String>,
    pub employee_id: String,
    pub designation: String,
    pub office_address: Option<String>,
    pub profile_image_url: Option<String>,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Submitted admin form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdminDraft {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default)]
    pub employee_id: String,
    #[serde(default)]
    pub designation: String,
    #[serde(default)]
    pub office_address: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub status: ActivityStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdminPatch {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub whatsapp_number: Option<String>,
    pub employee_id: Option<String>,
    pub designation: Option<String>,
    pub office_address: Option<String>,
    pub profile_image_url: Option<String>,
    pub status: Option<ActivityStatus>,
}

impl Record for Admin {
    type Draft = AdminDraft;
    type Patch = AdminPatch;

    const KIND: RecordKind = RecordKind::Admin;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn display_name(&self) -> &str {
        &self.full_name
    }

    fn status_key(&self) -> &'static str {
        self.status.key()
    }

    fn build(id: RecordId, created_at: DateTime<Utc>, draft: AdminDraft) -> Self {
        Self {
            id,
            full_name: draft.full_name,
            email: draft.email,
            role: draft.role,
            whatsapp_number: draft.whatsapp_number,
            employee_id: draft.employee_id,
            designation: draft.designation,
            office_address: draft.office_address,
            profile_image_url: draft.profile_image_url,
            status: draft.status,
            created_at,
            updated_at: None,
        }
    }

    fn apply(&mut self, draft: AdminDraft, updated_at: DateTime<Utc>) {
        let id = self.id.clone();
        let created_at = self.created_at;
        *self = Self::build(id, created_at, draft);
        self.updated_at = Some(updated_at);
    }

    fn patched(&self, patch: AdminPatch) -> AdminDraft {
        AdminDraft {
            full_name: patch.full_name.unwrap_or_else(|| self.full_name.clone()),
            email: patch.email.unwrap_or_else(|| self.email.clone()),
            role: patch.role.unwrap_or_else(|| self.role.clone()),
            whatsapp_number: patch.whatsapp_number.or_else(|| self.whatsapp_number.clone()),
            employee_id: patch.employee_id.unwrap_or_else(|| self.employee_id.clone()),
            designation: patch.designation.unwrap_or_else(|| self.designation.clone()),
            office_address: patch.office_address.or_else(|| self.office_address.clone()),
            profile_image_url: patch
                .profile_image_url
                .or_else(|| self.profile_image_url.clone()),
            status: patch.status.unwrap_or(self.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: Option<String>,
    pub status: CandidateStatus,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Submitted candidate form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidateDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: CandidateStatus,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidatePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub status: Option<CandidateStatus>,
    pub skills: Option<Vec<String>>,
}

impl Record for Candidate {
    type Draft = CandidateDraft;
    type Patch = CandidatePatch;

    const KIND: RecordKind = RecordKind::Candidate;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn status_key(&self) -> &'static str {
        self.status.key()
    }

    fn build(id: RecordId, created_at: DateTime<Utc>, draft: CandidateDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            location: draft.location,
            status: draft.status,
            skills: draft.skills,
            created_at,
            updated_at: None,
        }
    }

    fn apply(&mut self, draft: CandidateDraft, updated_at: DateTime<Utc>) {
        let id = self.id.clone();
        let created_at = self.created_at;
        *self = Self::build(id, created_at, draft);
        self.updated_at = Some(updated_at);
    }

    fn patched(&self, patch: CandidatePatch) -> CandidateDraft {
        CandidateDraft {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            email: patch.email.unwrap_or_else(|| self.email.clone()),
            phone: patch.phone.unwrap_or_else(|| self.phone.clone()),
            location: patch.location.or_else(|| self.location.clone()),
            status: patch.status.unwrap_or(self.status),
            skills: patch.skills.unwrap_or_else(|| self.skills.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: RecordId,
    pub name: String,
    pub industry: String,
    pub founded: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub size: CompanySize,
    pub status: ActivityStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Submitted company form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub founded: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub size: CompanySize,
    #[serde(default)]
    pub status: ActivityStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompanyPatch {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub founded: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub size: Option<CompanySize>,
    pub status: Option<ActivityStatus>,
}

impl Record for Company {
    type Draft = CompanyDraft;
    type Patch = CompanyPatch;

    const KIND: RecordKind = RecordKind::Company;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn status_key(&self) -> &'static str {
        self.status.key()
    }

    fn build(id: RecordId, created_at: DateTime<Utc>, draft: CompanyDraft) -> Self {
        Self {
            id,
            name: draft.name,
            industry: draft.industry,
            founded: draft.founded,
            website: draft.website,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            size: draft.size,
            status: draft.status,
            created_at,
            updated_at: None,
        }
    }

    fn apply(&mut self, draft: CompanyDraft, updated_at: DateTime<Utc>) {
        let id = self.id.clone();
        let created_at = self.created_at;
        *self = Self::build(id, created_at, draft);
        self.updated_at = Some(updated_at);
    }

    fn patched(&self, patch: CompanyPatch) -> CompanyDraft {
        CompanyDraft {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            industry: patch.industry.unwrap_or_else(|| self.industry.clone()),
            founded: patch.founded.or_else(|| self.founded.clone()),
            website: patch.website.or_else(|| self.website.clone()),
            email: patch.email.or_else(|| self.email.clone()),
            phone: patch.phone.or_else(|| self.phone.clone()),
            address: patch.address.or_else(|| self.address.clone()),
            size: patch.size.unwrap_or(self.size),
            status: patch.status.unwrap_or(self.status),
        }
    }
}
