//! Dependency Service - resolve version ranges and merge them into a manifest.
//!
//! The two lists of a [`DependencyPlan`] are resolved concurrently and so
//! are the names within each list. The join is all-or-nothing: the first
//! failed lookup fails the whole resolution and nothing is merged.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use tracing::{debug, instrument};

use crate::{
    application::ports::VersionResolver,
    domain::{DependencyPlan, DependencySection, Manifest},
    error::{ModforgeError, ModforgeResult},
};

/// Resolved ranges for both manifest sections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedDependencies {
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
}

impl ResolvedDependencies {
    pub fn section(&self, section: DependencySection) -> &BTreeMap<String, String> {
        match section {
            DependencySection::Dependencies => &self.dependencies,
            DependencySection::DevDependencies => &self.dev_dependencies,
        }
    }

    /// Merge into `manifest`, dev dependencies first.
    ///
    /// Both sections exist afterwards even when nothing was resolved for
    /// them.
    pub fn apply_to(&self, manifest: &mut Manifest) {
        for section in [
            DependencySection::DevDependencies,
            DependencySection::Dependencies,
        ] {
            manifest.merge_dependencies(section, self.section(section));
        }
    }

    pub fn len(&self) -> usize {
        self.dependencies.len() + self.dev_dependencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct DependencyService {
    resolver: Box<dyn VersionResolver>,
}

impl DependencyService {
    pub fn new(resolver: Box<dyn VersionResolver>) -> Self {
        Self { resolver }
    }

    /// Resolve every package named by `plan`.
    #[instrument(
        skip_all,
        fields(
            dependencies = plan.dependencies.len(),
            dev_dependencies = plan.dev_dependencies.len()
        )
    )]
    pub async fn resolve(&self, plan: &DependencyPlan) -> ModforgeResult<ResolvedDependencies> {
        let (dependencies, dev_dependencies) = tokio::try_join!(
            self.resolve_list(&plan.dependencies),
            self.resolve_list(&plan.dev_dependencies),
        )?;

        debug!(
            resolved = dependencies.len() + dev_dependencies.len(),
            "dependency versions resolved"
        );

        Ok(ResolvedDependencies {
            dependencies,
            dev_dependencies,
        })
    }

    async fn resolve_list(&self, names: &[&str]) -> ModforgeResult<BTreeMap<String, String>> {
        let lookups = names.iter().map(|&name| async move {
            let range = self.resolver.resolve(name).await?;
            debug!(package = name, range = %range, "resolved");
            Ok::<_, ModforgeError>((name.to_string(), range))
        });

        Ok(try_join_all(lookups).await?.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ApplicationError, ports::MockVersionResolver};
    use crate::domain::{AnswerRecord, Language};

    fn plan(language: Language, experimental: bool) -> DependencyPlan {
        let answers = AnswerRecord::builder()
            .name("my-lib")
            .unwrap()
            .language(language)
            .experimental(experimental)
            .username("octocat")
            .build()
            .unwrap();
        DependencyPlan::for_answers(&answers)
    }

    fn caret_resolver() -> MockVersionResolver {
        let mut resolver = MockVersionResolver::new();
        resolver
            .expect_resolve()
            .returning(|package: &str| Ok(format!("^1.0.0-{package}")));
        resolver
    }

    #[tokio::test]
    async fn resolves_both_lists() {
        let service = DependencyService::new(Box::new(caret_resolver()));
        let resolved = service
            .resolve(&plan(Language::Compiled, true))
            .await
            .unwrap();

        assert_eq!(
            resolved.dependencies.get("babel-runtime").map(String::as_str),
            Some("^1.0.0-babel-runtime")
        );
        assert!(resolved.dev_dependencies.contains_key("babel-preset-stage-0"));
        assert!(resolved.dev_dependencies.contains_key("ava"));
        assert_eq!(resolved.len(), 10);
    }

    #[tokio::test]
    async fn every_name_is_looked_up_once() {
        let mut resolver = MockVersionResolver::new();
        resolver
            .expect_resolve()
            .times(3)
            .returning(|_: &str| Ok("^1.0.0".to_string()));

        let service = DependencyService::new(Box::new(resolver));
        let resolved = service
            .resolve(&plan(Language::Plain, false))
            .await
            .unwrap();
        assert!(resolved.dependencies.is_empty());
        assert_eq!(resolved.dev_dependencies.len(), 3);
    }

    #[tokio::test]
    async fn one_failure_fails_the_join() {
        let mut resolver = MockVersionResolver::new();
        resolver.expect_resolve().returning(|package: &str| {
            if package == "onchange" {
                Err(ApplicationError::DependencyResolution {
                    package: package.to_string(),
                    reason: "registry unreachable".into(),
                }
                .into())
            } else {
                Ok("^1.0.0".to_string())
            }
        });

        let service = DependencyService::new(Box::new(resolver));
        let err = service
            .resolve(&plan(Language::Plain, false))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModforgeError::Application(ApplicationError::DependencyResolution { ref package, .. })
                if package == "onchange"
        ));
    }

    #[tokio::test]
    async fn apply_creates_both_sections_sorted() {
        let service = DependencyService::new(Box::new(caret_resolver()));
        let resolved = service
            .resolve(&plan(Language::Plain, false))
            .await
            .unwrap();

        let mut manifest = Manifest::parse(r#"{"name": "my-lib"}"#).unwrap();
        resolved.apply_to(&mut manifest);

        assert!(manifest.dependencies(DependencySection::Dependencies).is_empty());
        assert!(manifest.get("dependencies").is_some());
        let dev: Vec<_> = manifest
            .dependencies(DependencySection::DevDependencies)
            .into_keys()
            .collect();
        assert_eq!(dev, vec!["ava", "eslint", "onchange"]);
    }

    #[tokio::test]
    async fn applying_twice_is_byte_identical() {
        let service = DependencyService::new(Box::new(caret_resolver()));
        let resolved = service
            .resolve(&plan(Language::Compiled, false))
            .await
            .unwrap();

        let mut manifest =
            Manifest::parse(r#"{"name": "my-lib", "devDependencies": {"zod": "^3.0.0"}}"#).unwrap();
        resolved.apply_to(&mut manifest);
        let first = manifest.to_json_pretty(2).unwrap();
        resolved.apply_to(&mut manifest);
        let second = manifest.to_json_pretty(2).unwrap();
        assert_eq!(first, second);
    }
}
