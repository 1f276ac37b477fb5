//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Synthesize the file set (nothing touches disk yet)
//! 2. Write every file, the template manifest included
//! 3. Resolve dependency versions
//! 4. Read the manifest back, merge, and write it again
//!
//! A failed lookup in step 3 leaves the files of step 2 on disk and the
//! manifest unmerged.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::Filesystem,
        services::{DependencyService, ProjectSynthesizer, ResolvedDependencies},
    },
    domain::{
        AnswerRecord, DependencyPlan, FileContent, Manifest, OutputFileSet,
        rules::{MANIFEST_INDENT, MANIFEST_PATH},
    },
    error::ModforgeResult,
};

/// Outcome of a scaffold run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaffoldReport {
    pub destination: PathBuf,
    /// Paths relative to `destination`, in write order.
    pub written: Vec<PathBuf>,
    pub dependencies: ResolvedDependencies,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    synthesizer: ProjectSynthesizer,
    dependencies: DependencyService,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(
        synthesizer: ProjectSynthesizer,
        dependencies: DependencyService,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            synthesizer,
            dependencies,
            filesystem,
        }
    }

    /// The file set a run would write, without writing it.
    pub fn preview(&self, answers: &AnswerRecord) -> ModforgeResult<OutputFileSet> {
        self.synthesizer.synthesize(answers)
    }

    /// Scaffold `answers` into `destination`.
    #[instrument(
        skip_all,
        fields(module = %answers.name(), destination = %destination.display())
    )]
    pub async fn scaffold(
        &self,
        answers: &AnswerRecord,
        destination: &Path,
    ) -> ModforgeResult<ScaffoldReport> {
        info!("Scaffolding {} module {}", answers.language(), answers.name());

        let mut output = self.synthesizer.synthesize(answers)?;
        let manifest_path = destination.join(MANIFEST_PATH);

        if let Some(previous) = self.read_previous_manifest(&manifest_path)? {
            if let Some(manifest) = output.manifest_mut() {
                manifest.carry_dependencies_from(&previous);
            }
        }

        let written = self.write_output(destination, &output)?;
        info!(files = written.len(), "Project files written");

        let plan = DependencyPlan::for_answers(answers);
        let resolved = self.dependencies.resolve(&plan).await?;

        self.merge_manifest(&manifest_path, &resolved)?;
        info!(packages = resolved.len(), "Dependencies merged into manifest");

        Ok(ScaffoldReport {
            destination: destination.to_path_buf(),
            written,
            dependencies: resolved,
        })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// A manifest already at the destination, if it parses.
    fn read_previous_manifest(&self, path: &Path) -> ModforgeResult<Option<Manifest>> {
        let Some(text) = self.filesystem.read_file(path)? else {
            return Ok(None);
        };

        match Manifest::parse(&text) {
            Ok(manifest) => {
                debug!(path = %path.display(), "Existing manifest found");
                Ok(Some(manifest))
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "Ignoring unreadable existing manifest");
                Ok(None)
            }
        }
    }

    fn write_output(
        &self,
        destination: &Path,
        output: &OutputFileSet,
    ) -> ModforgeResult<Vec<PathBuf>> {
        self.filesystem.create_dir_all(destination)?;

        let mut written = Vec::with_capacity(output.len());
        for (relative, content) in output.iter() {
            let path = destination.join(relative);

            if let Some(parent) = relative.parent() {
                self.filesystem.create_dir_all(&destination.join(parent))?;
            }

            let text = match content {
                FileContent::Text(text) => text.clone(),
                FileContent::Manifest(manifest) => manifest.to_json_pretty(MANIFEST_INDENT)?,
            };
            self.filesystem.write_file(&path, &text)?;
            debug!(path = %relative, "wrote");
            written.push(relative.as_path().to_path_buf());
        }

        Ok(written)
    }

    /// Read-modify-write of the manifest on disk.
    fn merge_manifest(&self, path: &Path, resolved: &ResolvedDependencies) -> ModforgeResult<()> {
        let unreadable = |reason: String| ApplicationError::ManifestUnreadable {
            path: path.to_path_buf(),
            reason,
        };

        let text = self
            .filesystem
            .read_file(path)?
            .ok_or_else(|| unreadable("missing after write".into()))?;
        let mut manifest = Manifest::parse(&text).map_err(|e| unreadable(e.to_string()))?;

        resolved.apply_to(&mut manifest);
        self.filesystem
            .write_file(path, &manifest.to_json_pretty(MANIFEST_INDENT)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    use super::*;
    use crate::application::ports::MockVersionResolver;
    use crate::application::services::synthesis_service::tests::FakeStore;
    use crate::domain::{DependencySection, Language};
    use crate::error::ModforgeError;

    /// Minimal in-memory filesystem shared with the test through an `Arc`.
    #[derive(Clone, Default)]
    struct SharedFs(Arc<RwLock<HashMap<PathBuf, String>>>);

    impl SharedFs {
        fn read(&self, path: &str) -> Option<String> {
            self.0.read().unwrap().get(Path::new(path)).cloned()
        }
    }

    impl Filesystem for SharedFs {
        fn create_dir_all(&self, _path: &Path) -> ModforgeResult<()> {
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> ModforgeResult<()> {
            self.0
                .write()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn read_file(&self, path: &Path) -> ModforgeResult<Option<String>> {
            Ok(self.0.read().unwrap().get(path).cloned())
        }
    }

    fn answers() -> AnswerRecord {
        AnswerRecord::builder()
            .name("my-lib")
            .unwrap()
            .language(Language::Plain)
            .username("octocat")
            .build()
            .unwrap()
    }

    fn resolver_ok() -> MockVersionResolver {
        let mut resolver = MockVersionResolver::new();
        resolver
            .expect_resolve()
            .returning(|_: &str| Ok("^1.0.0".to_string()));
        resolver
    }

    fn service(fs: &SharedFs, resolver: MockVersionResolver) -> ScaffoldService {
        ScaffoldService::new(
            ProjectSynthesizer::new(Box::new(FakeStore::new())).with_year(2026),
            DependencyService::new(Box::new(resolver)),
            Box::new(fs.clone()),
        )
    }

    fn manifest_at(fs: &SharedFs, path: &str) -> Manifest {
        Manifest::parse(&fs.read(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn end_to_end_plain_module() {
        let fs = SharedFs::default();
        let report = service(&fs, resolver_ok())
            .scaffold(&answers(), Path::new("out"))
            .await
            .unwrap();

        for path in [
            "out/.travis.yml",
            "out/lib/index.js",
            "out/test/test.js",
            "out/.eslintrc.json",
            "out/test/.eslintrc.json",
        ] {
            assert!(fs.read(path).is_some(), "missing {path}");
        }

        let manifest = manifest_at(&fs, "out/package.json");
        assert!(manifest.repository().unwrap().contains("octocat"));
        assert_eq!(
            manifest.dependencies(DependencySection::DevDependencies).len(),
            3
        );
        assert_eq!(report.dependencies.dev_dependencies.len(), 3);
        assert!(report.written.contains(&PathBuf::from("LICENSE")));
    }

    #[tokio::test]
    async fn failed_lookup_leaves_template_manifest() {
        let fs = SharedFs::default();
        let mut resolver = MockVersionResolver::new();
        resolver.expect_resolve().returning(|package: &str| {
            Err(ApplicationError::DependencyResolution {
                package: package.to_string(),
                reason: "offline".into(),
            }
            .into())
        });

        let err = service(&fs, resolver)
            .scaffold(&answers(), Path::new("out"))
            .await
            .unwrap_err();
        assert!(matches!(err, ModforgeError::Application(_)));

        assert!(fs.read("out/lib/index.js").is_some());
        let manifest = manifest_at(&fs, "out/package.json");
        assert!(
            manifest
                .dependencies(DependencySection::DevDependencies)
                .is_empty()
        );
    }

    #[tokio::test]
    async fn previous_dependencies_survive_a_rerun() {
        let fs = SharedFs::default();
        fs.write_file(
            Path::new("out/package.json"),
            r#"{"name": "my-lib", "dependencies": {"lodash": "^4.17.0"}}"#,
        )
        .unwrap();

        service(&fs, resolver_ok())
            .scaffold(&answers(), Path::new("out"))
            .await
            .unwrap();

        let manifest = manifest_at(&fs, "out/package.json");
        assert_eq!(
            manifest
                .dependencies(DependencySection::Dependencies)
                .get("lodash")
                .map(String::as_str),
            Some("^4.17.0")
        );
    }

    #[tokio::test]
    async fn rerun_produces_identical_manifest() {
        let fs = SharedFs::default();
        let svc = service(&fs, resolver_ok());

        svc.scaffold(&answers(), Path::new("out")).await.unwrap();
        let first = fs.read("out/package.json").unwrap();
        svc.scaffold(&answers(), Path::new("out")).await.unwrap();
        let second = fs.read("out/package.json").unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn template_error_writes_nothing() {
        let fs = SharedFs::default();
        let svc = ScaffoldService::new(
            ProjectSynthesizer::new(Box::new(
                FakeStore::new().with(crate::domain::TemplateName::Readme, "{{NOPE}}"),
            )),
            DependencyService::new(Box::new(MockVersionResolver::new())),
            Box::new(fs.clone()),
        );

        assert!(svc.scaffold(&answers(), Path::new("out")).await.is_err());
        assert!(fs.0.read().unwrap().is_empty());
    }

    #[test]
    fn preview_does_not_write() {
        let fs = SharedFs::default();
        let output = service(&fs, MockVersionResolver::new())
            .preview(&answers())
            .unwrap();
        assert!(output.contains("package.json"));
        assert!(fs.0.read().unwrap().is_empty());
    }
}
