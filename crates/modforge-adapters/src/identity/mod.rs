//! Identity defaults (author name, GitHub username).

mod git;

pub use git::{GITHUB_API_URL, GitIdentity};
