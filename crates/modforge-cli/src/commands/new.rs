//! `modforge new`: pick adapters for this run, collect the answers, scaffold,
//! then optionally `npm install`.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use modforge_adapters::{GitIdentity, LocalFilesystem, NpmRegistry, PinnedVersions, open_store};
use modforge_core::{
    application::{
        DependencyService, IdentityService, ProjectSynthesizer, ScaffoldReport, ScaffoldService,
        ports::VersionResolver,
    },
    domain::AnswerRecord,
    error::ModforgeError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    collector,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// `--dry-run` stops after synthesis and lists the paths. Nothing is
/// written and no registry lookup is made.
#[instrument(skip_all, fields(destination = %args.dir.display()))]
pub async fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let destination = args.dir.as_path();
    if destination.exists() && !destination.is_dir() {
        return Err(CliError::NotADirectory {
            path: destination.to_path_buf(),
        });
    }

    let identity = IdentityService::new(Box::new(GitIdentity::new().map_err(http_setup)?));
    let collected = collector::collect(&args, &config, &identity, destination).await?;
    let answers = collected.answers;
    debug!(%answers, "answers collected");

    let templates = args.templates.as_deref().or(config.templates.dir.as_deref());
    let synthesizer = ProjectSynthesizer::new(open_store(templates)?);

    let offline = is_offline(&args, &config);
    let resolver: Box<dyn VersionResolver> = if offline {
        Box::new(PinnedVersions::new())
    } else {
        let url = args.registry.as_deref().unwrap_or(&config.registry.url);
        Box::new(NpmRegistry::with_base_url(url).map_err(http_setup)?)
    };
    let service = ScaffoldService::new(
        synthesizer,
        DependencyService::new(resolver),
        Box::new(LocalFilesystem::new()),
    );

    if args.dry_run {
        let files = service.preview(&answers)?;
        output.info(&format!(
            "Dry run: would write {} files to {}",
            files.len(),
            destination.display()
        ))?;
        for path in files.paths() {
            output.print(&format!("  {path}"))?;
        }
        return Ok(());
    }

    if collected.prompted_username {
        remember_username(&global, &config, &answers, &output)?;
    }

    output.header(&format!(
        "Creating {} ({}) in {}",
        answers.name(),
        answers.language().label(),
        destination.display()
    ))?;
    info!(module = %answers.name(), offline, "Scaffold started");

    let spinner = output.spinner("Writing files and resolving dependency versions...");
    let result = service.scaffold(&answers, destination).await;
    spinner.finish_and_clear();
    let report = result?;

    info!(files = report.written.len(), "Scaffold completed");
    print_report(&report, &output)?;

    if !args.skip_install {
        npm_install(destination, &output).await?;
    }

    if !output.is_quiet() {
        output.print("")?;
        output.print("Next steps:")?;
        if destination != Path::new(".") {
            output.print(&format!("  cd {}", destination.display()))?;
        }
        if args.skip_install {
            output.print("  npm install")?;
        }
        output.print("  npm test")?;
    }

    Ok(())
}

fn is_offline(args: &NewArgs, config: &AppConfig) -> bool {
    args.offline || config.registry.offline
}

fn http_setup(err: modforge_adapters::RegistryError) -> CliError {
    ModforgeError::Configuration {
        message: format!("HTTP client setup failed: {err}"),
    }
    .into()
}

/// Store a prompted username as the next run's default.
///
/// Failing to store is reported, never fatal.
fn remember_username(
    global: &GlobalArgs,
    config: &AppConfig,
    answers: &AnswerRecord,
    output: &OutputManager,
) -> CliResult<()> {
    let Some(username) = answers.username() else {
        return Ok(());
    };
    if config.defaults.username.as_deref() == Some(username.as_str()) {
        return Ok(());
    }

    let path = global.config.clone().unwrap_or_else(AppConfig::config_path);
    match AppConfig::remember_username(&path, username.as_str()) {
        Ok(()) => debug!(path = %path.display(), "username remembered"),
        Err(e) => {
            warn!(error = %e, "could not store username");
            output.warning(&format!("Could not remember username: {e}"))?;
        }
    }
    Ok(())
}

fn print_report(report: &ScaffoldReport, output: &OutputManager) -> CliResult<()> {
    output.success(&format!(
        "Wrote {} files to {}",
        report.written.len(),
        report.destination.display()
    ))?;
    for path in &report.written {
        output.print(&format!("  {}", path.display()))?;
    }

    let deps = &report.dependencies;
    output.success(&format!(
        "Recorded {} dependencies and {} dev dependencies in package.json",
        deps.dependencies.len(),
        deps.dev_dependencies.len()
    ))?;
    Ok(())
}

/// Run `npm install` in `destination`; failure is a warning.
async fn npm_install(destination: &Path, output: &OutputManager) -> CliResult<()> {
    output.info("Running npm install...")?;
    let status = tokio::process::Command::new("npm")
        .arg("install")
        .current_dir(destination)
        .status()
        .await;

    match status {
        Ok(status) if status.success() => output.success("Dependencies installed")?,
        Ok(status) => {
            warn!(%status, "npm install failed");
            output.warning(&format!("npm install exited with {status}"))?;
        }
        Err(e) => {
            warn!(error = %e, "npm install could not start");
            output.warning(&format!("Could not run npm install: {e}"))?;
        }
    }
    Ok(())
}
