use crate::domain::{
    entities::{AnswerRecord, OutputFileSet},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across services.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_answers(answers: &AnswerRecord) -> Result<(), DomainError> {
        answers.validate()
    }

    pub fn validate_output(output: &OutputFileSet) -> Result<(), DomainError> {
        output.validate()
    }
}
