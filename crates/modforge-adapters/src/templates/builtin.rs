//! Templates embedded in the binary.

use modforge_core::{
    application::ports::TemplateStore, domain::TemplateName, error::ModforgeResult,
};

/// Store serving the templates that ship with modforge.
///
/// Always complete: every [`TemplateName`] has an embedded source.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl BuiltinTemplates {
    pub fn new() -> Self {
        Self
    }

    pub const fn source(name: TemplateName) -> &'static str {
        match name {
            TemplateName::Package => include_str!("../../templates/_package.json"),
            TemplateName::PackageCompiled => include_str!("../../templates/_package.babel.json"),
            TemplateName::Eslintrc => include_str!("../../templates/_.eslintrc.json"),
            TemplateName::EslintrcCompiled => {
                include_str!("../../templates/_.eslintrc.babel.json")
            }
            TemplateName::TestEslintrc => include_str!("../../templates/_test.eslintrc.json"),
            TemplateName::Babelrc => include_str!("../../templates/_.babelrc"),
            TemplateName::Gitignore => include_str!("../../templates/_.gitignore"),
            TemplateName::Npmignore => include_str!("../../templates/_.npmignore"),
            TemplateName::Readme => include_str!("../../templates/_README.md"),
            TemplateName::TravisYml => include_str!("../../templates/.travis.yml"),
            TemplateName::IndexJs => include_str!("../../templates/index.js"),
            TemplateName::TestJs => include_str!("../../templates/test.js"),
        }
    }
}

impl TemplateStore for BuiltinTemplates {
    fn get(&self, name: TemplateName) -> ModforgeResult<String> {
        Ok(Self::source(name).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_is_embedded() {
        for name in TemplateName::ALL {
            assert!(!BuiltinTemplates::source(name).is_empty(), "{name}");
        }
    }
}
