use std::fmt;

use crate::model::ids::UserId;

/// Platform role as granted by the auth service.
///
/// Role names from the API are matched case-insensitively. The platform has
/// historically used `ESTUDIANTE` for students; `STUDENT` is accepted too.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Instructor,
    Student,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let normalized = name.trim().to_uppercase();
        match normalized.as_str() {
            "ADMIN" | "ROLE_ADMIN" => Self::Admin,
            "INSTRUCTOR" | "ROLE_INSTRUCTOR" => Self::Instructor,
            "ESTUDIANTE" | "STUDENT" | "ROLE_ESTUDIANTE" | "ROLE_STUDENT" => Self::Student,
            _ => Self::Other(normalized),
        }
    }

    /// Parse a comma separated list such as `"admin, instructor"`.
    #[must_use]
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(Self::parse)
            .collect()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Instructor => "INSTRUCTOR",
            Self::Student => "ESTUDIANTE",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Authenticated user as seen by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    pub roles: Vec<Role>,
}

impl User {
    #[must_use]
    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    #[must_use]
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }
}
