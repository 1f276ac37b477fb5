pub mod answers;
pub mod common;
pub mod manifest;
pub mod output;
pub mod template;

pub use crate::domain::DomainError;
pub use answers::AnswerRecord;
pub use manifest::Manifest;
pub use output::OutputFileSet;
