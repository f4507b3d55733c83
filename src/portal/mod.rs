//! View-models for the role-gated portal pages.
//!
//! Rendering framework concerns live elsewhere; these types only decide
//! *what* a page shows for a given [`session::AuthSession`], and publish the
//! route table the sitemap's built-in source reads.

pub mod dashboard;
pub mod discussion;
pub mod routes;
pub mod session;

pub use dashboard::{DashboardPage, DashboardView};
pub use discussion::DiscussionBoard;
pub use session::{AuthSession, Profile, Role, User};
