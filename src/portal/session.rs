use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Admin,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub role: Role,
    pub display_name: Option<String>,
}

/// The authenticated user and profile, handed to views explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: Option<User>,
    pub profile: Option<Profile>,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User, profile: Option<Profile>) -> Self {
        Self {
            user: Some(user),
            profile,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref()?;
        self.profile.as_ref().map(|p| p.role)
    }

    /// Name to greet the user with: a non-blank profile display name,
    /// falling back to the account email. `None` when nobody is signed in.
    pub fn display_name(&self) -> Option<&str> {
        let user = self.user.as_ref()?;
        self.profile
            .as_ref()
            .and_then(|p| p.display_name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or(Some(user.email.as_str()))
    }
}
