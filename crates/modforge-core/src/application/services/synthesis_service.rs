//! Project Synthesizer - `AnswerRecord -> OutputFileSet`.
//!
//! Pure with respect to the filesystem: templates come from a
//! [`TemplateStore`] and the result is an in-memory file set. Nothing is
//! written here, so a failing template leaves the destination untouched.

use chrono::Datelike;
use tracing::{debug, instrument};

use crate::{
    application::ports::TemplateStore,
    domain::{
        AnswerRecord, DomainError, DomainValidator as validator, FileContent, Manifest,
        OutputFileSet, RenderContext, TemplateName, license,
        rules::{
            self, JSON_FORMATTED_PATHS, JSON_INDENT, LICENSE_PATH, OutputKind, RenderMode,
        },
    },
    error::ModforgeResult,
};

pub struct ProjectSynthesizer {
    store: Box<dyn TemplateStore>,
    year: i32,
}

impl ProjectSynthesizer {
    /// Synthesizer stamping the current year into the license.
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self {
            store,
            year: chrono::Local::now().year(),
        }
    }

    /// Fix the year used for `{{YEAR}}` and the license.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Produce every file for `answers`.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` from the store
    /// - `TemplateFieldMissing` when a template needs an absent value
    /// - `InvalidTemplateJson` when a JSON output does not parse
    #[instrument(skip_all, fields(module = %answers.name(), language = %answers.language()))]
    pub fn synthesize(&self, answers: &AnswerRecord) -> ModforgeResult<OutputFileSet> {
        validator::validate_answers(answers)?;

        let ctx = RenderContext::for_answers(answers, self.year);
        let json_ctx = ctx.json_escaped();
        let mut output = OutputFileSet::new();

        for rule in rules::select_files(answers) {
            let template = rule.template.resolve(answers.dialect());
            let source = self.store.get(template)?;

            let content = match (rule.kind, rule.mode) {
                (OutputKind::Manifest, _) => FileContent::Manifest(populate_manifest(
                    answers, template, &source, &json_ctx,
                )?),
                (OutputKind::Text, RenderMode::Template) => {
                    FileContent::Text(ctx.render(template, &source)?)
                }
                (OutputKind::Text, RenderMode::Copy) => FileContent::Text(source),
            };

            debug!(path = rule.destination, template = %template, "file selected");
            output.insert(rule.destination, content)?;
        }

        output.insert(
            LICENSE_PATH,
            FileContent::Text(license::mit(answers.author(), self.year)),
        )?;
        output.reformat_json(JSON_FORMATTED_PATHS, JSON_INDENT)?;

        validator::validate_output(&output)?;
        debug!(files = output.len(), "file set synthesized");
        Ok(output)
    }
}

/// Render the manifest template with JSON-escaped values and set the
/// repository link.
fn populate_manifest(
    answers: &AnswerRecord,
    template: TemplateName,
    source: &str,
    json_ctx: &RenderContext,
) -> Result<Manifest, DomainError> {
    let rendered = json_ctx.render(template, source)?;
    let mut manifest =
        Manifest::parse(&rendered).map_err(|e| DomainError::InvalidTemplateJson {
            template: template.file_name().to_string(),
            reason: e.to_string(),
        })?;

    if let Some(url) = answers.repository_url() {
        manifest.set_repository(url);
    }

    Ok(manifest)
}
