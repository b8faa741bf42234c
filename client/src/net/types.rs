//! Wire DTOs for the licensing REST API.
//!
//! DESIGN
//! ======
//! Every endpoint response is parsed into one of these types at the gateway
//! boundary, so pages never see untyped JSON. Field names follow the server's
//! snake_case payloads; enum variants follow its SCREAMING_CASE codes.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Privilege level of a back-office user, ordered lowest to highest.
///
/// The derived `Ord` follows declaration order, so `Clerk < Officer <
/// Manager < Admin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Clerk,
    Officer,
    Manager,
    Admin,
}

impl Role {
    /// Whether a user holding `self` may access something gated on `required`.
    ///
    /// Admin passes every check regardless of rank.
    pub fn satisfies(self, required: Role) -> bool {
        self == Role::Admin || self >= required
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Clerk => "Clerk",
            Role::Officer => "Officer",
            Role::Manager => "Manager",
            Role::Admin => "Admin",
        }
    }
}

/// The signed-in user as returned by login and `/api/v1/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    /// Shown in the navigation bar. Older persisted profiles may lack it.
    #[serde(rename = "name", default)]
    pub display_name: String,
    pub role: Role,
}

impl UserProfile {
    /// Display name, falling back to the email address when unset.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() { &self.email } else { &self.display_name }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

#[derive(Clone, Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// One page of a paginated list endpoint.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Paged<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for Paged<T> {
    fn default() -> Self {
        Self { data: Vec::new(), total: 0 }
    }
}

/// A citizen record held by the registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Citizen {
    pub id: String,
    pub id_number: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub phone_number: String,
    #[serde(default)]
    pub email: Option<String>,
    pub nationality: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Citizen {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Create/update payload for a citizen. `None` fields are omitted so the
/// same type serves partial updates.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct CitizenForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
}

/// Driving-licence category codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LicenseCategory {
    A,
    B,
    C,
    EB,
    EC,
}

impl LicenseCategory {
    pub const ALL: [LicenseCategory; 5] =
        [LicenseCategory::A, LicenseCategory::B, LicenseCategory::C, LicenseCategory::EB, LicenseCategory::EC];

    pub fn code(self) -> &'static str {
        match self {
            LicenseCategory::A => "A",
            LicenseCategory::B => "B",
            LicenseCategory::C => "C",
            LicenseCategory::EB => "EB",
            LicenseCategory::EC => "EC",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LicenseCategory::A => "A - Motorcycle",
            LicenseCategory::B => "B - Light vehicle (car)",
            LicenseCategory::C => "C - Heavy vehicle (truck)",
            LicenseCategory::EB => "EB - Light articulated vehicle",
            LicenseCategory::EC => "EC - Heavy articulated vehicle",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }
}

/// An issued licence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    pub license_number: String,
    pub citizen_id: String,
    pub category: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub issue_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationType {
    New,
    Renewal,
    Replacement,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 3] =
        [ApplicationType::New, ApplicationType::Renewal, ApplicationType::Replacement];

    pub fn code(self) -> &'static str {
        match self {
            ApplicationType::New => "NEW",
            ApplicationType::Renewal => "RENEWAL",
            ApplicationType::Replacement => "REPLACEMENT",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ApplicationType::New => "New License",
            ApplicationType::Renewal => "License Renewal",
            ApplicationType::Replacement => "License Replacement",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Submitted,
    UnderReview,
    DocumentsRequested,
    Approved,
    Rejected,
    Cancelled,
}

impl ApplicationStatus {
    /// Whether a reviewer can still act on the application.
    pub fn is_open(self) -> bool {
        matches!(
            self,
            ApplicationStatus::Submitted | ApplicationStatus::UnderReview | ApplicationStatus::DocumentsRequested
        )
    }
}

/// A licence application as stored by the server.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LicenseApplication {
    pub id: String,
    pub citizen_id: String,
    pub category: String,
    pub application_type: ApplicationType,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub supporting_documents: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// A file picked in the browser, already read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Create/update payload for an application.
///
/// Documents never serialize into JSON; a form with documents is sent as
/// multipart instead.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ApplicationForm {
    pub citizen_id: String,
    pub category: LicenseCategory,
    pub application_type: ApplicationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip)]
    pub supporting_documents: Vec<Attachment>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ApproveRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RejectRequest<'a> {
    pub reason: &'a str,
}

#[derive(Clone, Debug, Serialize)]
pub struct DocumentRequest<'a> {
    #[serde(rename = "documentList")]
    pub document_list: &'a [String],
}
