//! Answers, templates, manifests and the tables that tie them together.
//!
//! Everything here is synchronous and free of I/O; template sources and
//! version ranges reach the domain through the application ports. The
//! tables in [`rules`] decide which files and packages a module gets.

pub mod entities;
pub mod error;
pub mod license;
pub mod rules;
pub mod value_objects;

mod validation;

pub use entities::{
    answers::{AnswerRecord, AnswerRecordBuilder, CompiledOptions, DEFAULT_DESCRIPTION, Dialect},
    manifest::{DependencySection, Manifest},
    output::{FileContent, OutputFileSet},
    template::{RenderContext, TemplateName},
};

pub use error::{DomainError, ErrorCategory};

pub use rules::DependencyPlan;

pub use value_objects::{GithubUsername, Language, ModuleName, Runtime};

pub use entities::common::RelativePath;
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Answer Record Tests
    // ========================================================================

    fn record(language: Language) -> AnswerRecord {
        AnswerRecord::builder()
            .name("my-lib")
            .unwrap()
            .author("Mona Lisa")
            .language(language)
            .username("octocat")
            .build()
            .unwrap()
    }

    #[test]
    fn validator_accepts_built_records() {
        for language in Language::ALL {
            assert!(DomainValidator::validate_answers(&record(language)).is_ok());
        }
    }

    #[test]
    fn dialect_and_language_agree() {
        for language in Language::ALL {
            let answers = record(language);
            assert_eq!(answers.dialect().language(), language);
            assert_eq!(answers.dialect().is_compiled(), language.is_compiled());
        }
    }

    // ========================================================================
    // Rules + Render Context
    // ========================================================================

    #[test]
    fn every_rule_template_renders_with_standard_context() {
        // Built-in templates only use keys the context always provides, so
        // rendering a body that mentions all of them must succeed.
        let answers = record(Language::Compiled);
        let ctx = RenderContext::for_answers(&answers, 2026);
        let body = "{{NAME}} {{NAME_CAMEL}} {{DESCRIPTION}} {{AUTHOR}} {{YEAR}} \
                    {{TRAVIS_BADGE}} {{BABEL_PRESETS}} {{GITIGNORE_BUILD}} {{NPMIGNORE_SOURCE}}";
        for rule in rules::select_files(&answers) {
            let name = rule.template.resolve(answers.dialect());
            assert!(ctx.render(name, body).is_ok(), "{name}");
        }
    }

    #[test]
    fn babel_presets_render_as_json_array() {
        let answers = record(Language::Compiled);
        let ctx = RenderContext::for_answers(&answers, 2026);
        let out = ctx
            .render(TemplateName::Babelrc, r#"{"presets": {{BABEL_PRESETS}}}"#)
            .unwrap();
        assert_eq!(out, r#"{"presets": ["es2015"]}"#);
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn errors_have_suggestions() {
        let err = DomainError::UnknownLanguage("coffee".into());
        assert!(!err.suggestions().is_empty());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }
}
