// One file per area of the platform; each adds methods to `PortalClient`.

pub mod articles;
pub mod assessments;
pub mod auth;
pub mod catalog;
pub mod courses;
pub mod forum;

pub use auth::{CodePurpose, ProfileUpdate, Registration};
pub use forum::NewDiscussion;
