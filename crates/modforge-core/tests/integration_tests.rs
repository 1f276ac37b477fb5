//! Integration tests for modforge-core through its public API.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use modforge_core::{
    application::ApplicationError,
    domain::{DependencySection, rules::MANIFEST_PATH},
    prelude::*,
};

struct StaticStore;

impl TemplateStore for StaticStore {
    fn get(&self, name: TemplateName) -> ModforgeResult<String> {
        let body = match name {
            TemplateName::Package | TemplateName::PackageCompiled => {
                r#"{"name": "{{NAME}}", "version": "0.0.0", "description": "{{DESCRIPTION}}"}"#
            }
            TemplateName::Eslintrc
            | TemplateName::EslintrcCompiled
            | TemplateName::TestEslintrc => r#"{"root": true}"#,
            TemplateName::Babelrc => r#"{"presets": {{BABEL_PRESETS}}}"#,
            _ => "{{NAME}}\n",
        };
        Ok(body.to_string())
    }
}

/// Resolver recording every lookup.
#[derive(Clone, Default)]
struct RecordingResolver {
    seen: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl VersionResolver for RecordingResolver {
    async fn resolve(&self, package: &str) -> ModforgeResult<String> {
        self.seen
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?
            .push(package.to_string());
        Ok("^2.0.0".to_string())
    }
}

#[derive(Clone, Default)]
struct MapFs(Arc<Mutex<HashMap<PathBuf, String>>>);

impl Filesystem for MapFs {
    fn create_dir_all(&self, _path: &Path) -> ModforgeResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ModforgeResult<()> {
        self.0
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ModforgeResult<Option<String>> {
        Ok(self.0.lock().unwrap().get(path).cloned())
    }
}

fn compiled_answers(experimental: bool) -> AnswerRecord {
    AnswerRecord::builder()
        .name("Shiny Thing")
        .unwrap()
        .description("Does shiny things")
        .author("Mona Lisa")
        .language(Language::Compiled)
        .experimental(experimental)
        .use_travis_ci(false)
        .add_repo(false)
        .build()
        .unwrap()
}

#[test]
fn synthesis_of_compiled_module() {
    let synthesizer = ProjectSynthesizer::new(Box::new(StaticStore)).with_year(2030);
    let output = synthesizer.synthesize(&compiled_answers(true)).unwrap();

    assert!(output.contains("src/index.js"));
    assert!(output.contains(".babelrc"));
    assert!(!output.contains("lib/index.js"));
    assert!(!output.contains(".travis.yml"));

    let babelrc: serde_json::Value =
        serde_json::from_str(output.text(".babelrc").unwrap()).unwrap();
    assert_eq!(babelrc["presets"], serde_json::json!(["es2015", "stage-0"]));

    let manifest = output.manifest().unwrap();
    assert_eq!(manifest.name(), Some("shiny-thing"));
    assert_eq!(manifest.repository(), None);
}

#[tokio::test]
async fn scaffold_merges_resolved_versions() {
    let fs = MapFs::default();
    let resolver = RecordingResolver::default();
    let service = ScaffoldService::new(
        ProjectSynthesizer::new(Box::new(StaticStore)),
        DependencyService::new(Box::new(resolver.clone())),
        Box::new(fs.clone()),
    );

    let report = service
        .scaffold(&compiled_answers(false), Path::new("/work/shiny"))
        .await
        .unwrap();

    let seen = resolver.seen.lock().unwrap().clone();
    assert!(seen.contains(&"babel-runtime".to_string()));
    assert!(seen.contains(&"babel-preset-es2015".to_string()));
    assert!(!seen.contains(&"babel-preset-stage-0".to_string()));

    let text = fs
        .read_file(&Path::new("/work/shiny").join(MANIFEST_PATH))
        .unwrap()
        .unwrap();
    let manifest = Manifest::parse(&text).unwrap();
    assert_eq!(
        manifest.dependencies(DependencySection::Dependencies),
        report.dependencies.dependencies
    );
    assert!(text.starts_with("{\n  \"name\": \"shiny-thing\""));
}
