//! File selection and dependency registry.
//!
//! Every output file is described exactly once by a [`FileRule`] in
//! [`FILE_RULES`]. Selecting files for an answer record is a filter over the
//! table; nothing else decides which files exist.
//!
//! # Adding a New File
//!
//! 1. Add a [`TemplateName`] variant (and its template file)
//! 2. Add one [`FileRule`] entry to [`FILE_RULES`]
//! 3. If it is JSON that must be reformatted, list it in [`JSON_FORMATTED_PATHS`]

use crate::domain::entities::answers::{AnswerRecord, Dialect};
use crate::domain::entities::manifest::DependencySection;
use crate::domain::entities::template::TemplateName;
use crate::domain::value_objects::Runtime;

// ── Paths ────────────────────────────────────────────────────────────────────

pub const MANIFEST_PATH: &str = "package.json";
pub const LICENSE_PATH: &str = "LICENSE";

/// Outputs re-serialized as pretty JSON after rendering.
pub const JSON_FORMATTED_PATHS: &[&str] = &[".babelrc", ".eslintrc.json"];

/// Indentation width of reformatted JSON outputs.
pub const JSON_INDENT: usize = 4;

/// Indentation width of `package.json`, matching what npm writes.
pub const MANIFEST_INDENT: usize = 2;

// ── Rule table ───────────────────────────────────────────────────────────────

/// When a rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    Compiled,
    Plain,
    TravisCi,
}

impl Condition {
    pub fn holds_for(self, answers: &AnswerRecord) -> bool {
        match self {
            Self::Always => true,
            Self::Compiled => answers.dialect().is_compiled(),
            Self::Plain => !answers.dialect().is_compiled(),
            Self::TravisCi => answers.use_travis_ci(),
        }
    }
}

/// Which template feeds a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateChoice {
    Fixed(TemplateName),
    ByDialect {
        plain: TemplateName,
        compiled: TemplateName,
    },
}

impl TemplateChoice {
    pub fn resolve(self, dialect: Dialect) -> TemplateName {
        match self {
            Self::Fixed(name) => name,
            Self::ByDialect { plain, compiled } => {
                if dialect.is_compiled() {
                    compiled
                } else {
                    plain
                }
            }
        }
    }
}

/// `Template` substitutes placeholders, `Copy` writes the source verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Template,
    Copy,
}

/// Shape of the produced file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Text,
    Manifest,
}

#[derive(Debug, Clone, Copy)]
pub struct FileRule {
    pub destination: &'static str,
    pub condition: Condition,
    pub template: TemplateChoice,
    pub mode: RenderMode,
    pub kind: OutputKind,
}

const fn text(
    destination: &'static str,
    condition: Condition,
    template: TemplateChoice,
    mode: RenderMode,
) -> FileRule {
    FileRule {
        destination,
        condition,
        template,
        mode,
        kind: OutputKind::Text,
    }
}

/// Single source of truth for template-backed outputs.
///
/// `LICENSE` is not listed: it is synthesized from the author and year.
pub static FILE_RULES: &[FileRule] = &[
    FileRule {
        destination: MANIFEST_PATH,
        condition: Condition::Always,
        template: TemplateChoice::ByDialect {
            plain: TemplateName::Package,
            compiled: TemplateName::PackageCompiled,
        },
        mode: RenderMode::Template,
        kind: OutputKind::Manifest,
    },
    text(
        ".eslintrc.json",
        Condition::Always,
        TemplateChoice::ByDialect {
            plain: TemplateName::Eslintrc,
            compiled: TemplateName::EslintrcCompiled,
        },
        RenderMode::Template,
    ),
    text(
        ".gitignore",
        Condition::Always,
        TemplateChoice::Fixed(TemplateName::Gitignore),
        RenderMode::Template,
    ),
    text(
        ".npmignore",
        Condition::Always,
        TemplateChoice::Fixed(TemplateName::Npmignore),
        RenderMode::Template,
    ),
    text(
        "README.md",
        Condition::Always,
        TemplateChoice::Fixed(TemplateName::Readme),
        RenderMode::Template,
    ),
    text(
        "test/test.js",
        Condition::Always,
        TemplateChoice::Fixed(TemplateName::TestJs),
        RenderMode::Copy,
    ),
    text(
        ".babelrc",
        Condition::Compiled,
        TemplateChoice::Fixed(TemplateName::Babelrc),
        RenderMode::Template,
    ),
    text(
        "src/index.js",
        Condition::Compiled,
        TemplateChoice::Fixed(TemplateName::IndexJs),
        RenderMode::Copy,
    ),
    text(
        "lib/index.js",
        Condition::Plain,
        TemplateChoice::Fixed(TemplateName::IndexJs),
        RenderMode::Copy,
    ),
    text(
        "test/.eslintrc.json",
        Condition::Plain,
        TemplateChoice::Fixed(TemplateName::TestEslintrc),
        RenderMode::Template,
    ),
    text(
        ".travis.yml",
        Condition::TravisCi,
        TemplateChoice::Fixed(TemplateName::TravisYml),
        RenderMode::Copy,
    ),
];

/// Rules that apply to `answers`, in table order.
pub fn select_files(answers: &AnswerRecord) -> Vec<&'static FileRule> {
    FILE_RULES
        .iter()
        .filter(|rule| rule.condition.holds_for(answers))
        .collect()
}

// ── Dependencies ─────────────────────────────────────────────────────────────

pub const TEST_RUNNER: &str = "ava";
pub const WATCHER: &str = "onchange";
pub const LINTER: &str = "eslint";
pub const BABEL_RUNTIME: &str = "babel-runtime";
pub const BABEL_TOOLCHAIN: &[&str] = &[
    "babel-cli",
    "babel-register",
    "babel-eslint",
    "eslint",
    "babel-plugin-transform-runtime",
];
pub const PRESET_MODERN: &str = "babel-preset-es2015";
pub const PRESET_NODE4: &str = "babel-preset-es2015-node4";
pub const PRESET_EXPERIMENTAL: &str = "babel-preset-stage-0";

/// Package names to resolve for one answer record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DependencyPlan {
    pub dependencies: Vec<&'static str>,
    pub dev_dependencies: Vec<&'static str>,
}

impl DependencyPlan {
    pub fn for_answers(answers: &AnswerRecord) -> Self {
        let mut plan = Self {
            dependencies: Vec::new(),
            dev_dependencies: vec![TEST_RUNNER, WATCHER],
        };

        match answers.dialect() {
            Dialect::Plain => plan.dev_dependencies.push(LINTER),
            Dialect::Compiled { runtime, options } => {
                plan.dependencies.push(BABEL_RUNTIME);
                plan.dev_dependencies.extend_from_slice(BABEL_TOOLCHAIN);
                plan.dev_dependencies.push(match runtime {
                    Runtime::Node4 => PRESET_NODE4,
                    Runtime::Modern => PRESET_MODERN,
                });
                if options.experimental {
                    plan.dev_dependencies.push(PRESET_EXPERIMENTAL);
                }
            }
        }

        plan
    }

    pub fn names(&self, section: DependencySection) -> &[&'static str] {
        match section {
            DependencySection::Dependencies => &self.dependencies,
            DependencySection::DevDependencies => &self.dev_dependencies,
        }
    }
}

/// Preset names written to `.babelrc`; empty for plain JavaScript.
pub fn babel_presets(answers: &AnswerRecord) -> Vec<&'static str> {
    match answers.dialect() {
        Dialect::Plain => Vec::new(),
        Dialect::Compiled { runtime, options } => {
            let mut presets = vec![match runtime {
                Runtime::Node4 => "es2015-node4",
                Runtime::Modern => "es2015",
            }];
            if options.experimental {
                presets.push("stage-0");
            }
            presets
        }
    }
}
