use crate::domain::model::Access;
use crate::portal::session::{AuthSession, Role};
use std::fmt;

pub const ACCESS_DENIED: &str = "Access Denied";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardPage {
    Student,
    Teacher,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenialReason {
    NotSignedIn,
    MissingProfile,
    WrongRole,
}

/// What a dashboard page shows for a given session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    AccessDenied(DenialReason),
    StudentDashboard { greeting: String },
    TeacherDashboard { greeting: String },
}

impl DashboardPage {
    pub fn required_role(&self) -> Role {
        match self {
            Self::Student => Role::Student,
            Self::Teacher => Role::Teacher,
        }
    }

    pub fn route_path(&self) -> &'static str {
        match self {
            Self::Student => "/dashboard/student",
            Self::Teacher => "/dashboard/teacher",
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Self::Student => Access::Student,
            Self::Teacher => Access::Teacher,
        }
    }

    pub fn render(&self, session: &AuthSession) -> DashboardView {
        let Some(name) = session.display_name() else {
            return DashboardView::AccessDenied(DenialReason::NotSignedIn);
        };
        let Some(role) = session.role() else {
            return DashboardView::AccessDenied(DenialReason::MissingProfile);
        };
        if role != self.required_role() {
            return DashboardView::AccessDenied(DenialReason::WrongRole);
        }

        let greeting = format!("Welcome, {}", name);
        match self {
            Self::Student => DashboardView::StudentDashboard { greeting },
            Self::Teacher => DashboardView::TeacherDashboard { greeting },
        }
    }
}

impl DashboardView {
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::AccessDenied(_))
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessDenied(reason) => {
                let detail = match reason {
                    DenialReason::NotSignedIn => "Please sign in to view this page.",
                    DenialReason::MissingProfile => "Your profile is not set up yet.",
                    DenialReason::WrongRole => "You do not have permission to view this page.",
                };
                write!(f, "{}\n{}", ACCESS_DENIED, detail)
            }
            Self::StudentDashboard { greeting } => write!(f, "{}\n[StudentDashboard]", greeting),
            Self::TeacherDashboard { greeting } => write!(f, "{}\n[TeacherDashboard]", greeting),
        }
    }
}
