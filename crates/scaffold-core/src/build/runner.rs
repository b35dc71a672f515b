//! Project build: skeleton, module init, templates, dependencies, vendoring

use super::command::{CommandRunner, SystemCommandRunner};
use crate::error::{Result, ScaffoldError};
use crate::project::{BuildProgress, Configuration};
use crate::toolchain::Toolchain;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

/// Outcome of a successful build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Files written by the template hook, relative to the project
    pub files: Vec<String>,
    /// Dependencies whose fetch failed; the build carried on without them
    pub failed_dependencies: Vec<String>,
    pub vendored: bool,
}

/// Runs the build phases for one project directory
///
/// Phases run in a fixed order and publish their progress through
/// [`Configuration::progress`]. Skeleton creation, module init, the template
/// hook and vendoring are fatal on failure. Dependency fetches are not: a
/// failed fetch is noted in the status text and the report, then the next one
/// runs.
pub struct BuildRunner<T: Toolchain> {
    toolchain: T,
    commands: Arc<dyn CommandRunner>,
    project_dir: PathBuf,
}

impl<T: Toolchain> BuildRunner<T> {
    pub fn new(toolchain: T, commands: Arc<dyn CommandRunner>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            toolchain,
            commands,
            project_dir: project_dir.into(),
        }
    }

    /// Runner using the real toolchain binaries
    pub fn system(toolchain: T, project_dir: impl Into<PathBuf>) -> Self {
        Self::new(toolchain, Arc::new(SystemCommandRunner), project_dir)
    }

    pub fn run(&self, config: &Configuration) -> Result<BuildReport> {
        let progress = config.progress.as_ref();
        progress.begin(config.dependencies.len(), config.do_vendor);
        tracing::info!(
            dir = %self.project_dir.display(),
            dependencies = config.dependencies.len(),
            vendor = config.do_vendor,
            "build started"
        );

        let result = self.run_phases(config, progress);
        match &result {
            Ok(report) => {
                progress.append_status("Finished!");
                progress.finish();
                tracing::info!(
                    files = report.files.len(),
                    failed = report.failed_dependencies.len(),
                    "build finished"
                );
            }
            Err(e) => tracing::error!(error = %e, "build failed"),
        }
        result
    }

    fn run_phases(&self, config: &Configuration, progress: &BuildProgress) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        progress.set_status("Creating folders...\n\n");
        for dir in self.toolchain.skeleton_dirs() {
            let path = self.project_dir.join(dir);
            fs::create_dir_all(&path).map_err(|source| {
                progress.append_status(&format!("Failed to create {}: {}", path.display(), source));
                ScaffoldError::CreateDir { path, source }
            })?;
        }

        progress.set_status("Initializing mod...\n\n");
        let init = self.toolchain.init_module(&config.name);
        if let Err(e) = self.commands.run(&init, &self.project_dir) {
            progress.set_status(format!("Failed to run command: {}\nError: {}", init, e));
            return Err(e);
        }

        if let Some(hook) = &config.template_hook {
            progress.append_status(&format!("{}...\n\n", hook.describe(config)));
            match hook.apply(config, &self.project_dir) {
                Ok(files) => report.files = files,
                Err(e) => {
                    progress.append_status(&format!("Error: {}", e));
                    return Err(e);
                }
            }
        }

        if !config.dependencies.is_empty() {
            progress.append_status("Installing dependencies...\n\n");
        }
        for dependency in &config.dependencies {
            let before = progress.status();
            progress.set_status(format!("{}Getting dependency: {}\n", before, dependency));

            let fetch = self.toolchain.fetch_dependency(dependency);
            if let Err(e) = self.commands.run(&fetch, &self.project_dir) {
                tracing::warn!(dependency = %dependency, error = %e, "dependency fetch failed");
                progress.set_status(format!(
                    "{}Failed to get dependency: {} => Check if it exists\n",
                    before, dependency
                ));
                report.failed_dependencies.push(dependency.clone());
            }
            progress.dependency_processed();
        }
        if !config.dependencies.is_empty() {
            progress.append_status("Finished installing dependencies!\n\n");
        }

        if config.do_vendor {
            progress.append_status("Vendoring...\n\n");
            let vendor = self.toolchain.vendor();
            if let Err(e) = self.commands.run(&vendor, &self.project_dir) {
                progress.append_status(&format!("Failed to run command: {}\nError: {}", vendor, e));
                return Err(e);
            }
            progress.vendoring_done();
            report.vendored = true;
        }

        Ok(report)
    }

    /// Run on a blocking task; the handle polls progress and awaits the result
    pub fn spawn(self, config: Configuration) -> BuildHandle {
        let progress = Arc::clone(&config.progress);
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            let result = self.run(&config);
            let _ = tx.send(result);
        });
        BuildHandle {
            progress,
            completion: rx,
        }
    }
}

/// A build running in the background
pub struct BuildHandle {
    progress: Arc<BuildProgress>,
    completion: oneshot::Receiver<Result<BuildReport>>,
}

impl BuildHandle {
    pub fn progress(&self) -> &BuildProgress {
        &self.progress
    }

    /// The build result once available
    ///
    /// Returns `Some` exactly once; polling again afterwards reports the task
    /// as gone.
    pub fn try_finished(&mut self) -> Option<Result<BuildReport>> {
        match self.completion.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => Some(Err(ScaffoldError::BuildAborted(
                "the build task exited without a result".to_string(),
            ))),
        }
    }

    pub async fn wait(self) -> Result<BuildReport> {
        match self.completion.await {
            Ok(result) => result,
            Err(e) => Err(ScaffoldError::BuildAborted(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::command::fake::RecordingRunner;
    use crate::build::command::Invocation;
    use crate::project::{TemplateHook, WebLibrary};
    use crate::templates::Catalog;
    use crate::toolchain::GoToolchain;
    use std::path::Path;
    use std::sync::Mutex;

    /// Hook that writes one file and logs its call into the runner's log
    struct LoggingHook {
        log: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl TemplateHook for LoggingHook {
        fn describe(&self, _config: &Configuration) -> String {
            "Writing templates".to_string()
        }

        fn apply(&self, _config: &Configuration, project_dir: &Path) -> Result<Vec<String>> {
            self.log.lock().unwrap().push("hook".to_string());
            if self.fail {
                return Err(ScaffoldError::BuildAborted("template hook failed".to_string()));
            }
            std::fs::write(project_dir.join("README.md"), "demo\n").unwrap();
            Ok(vec!["README.md".to_string()])
        }
    }

    fn config_with(deps: &[&str]) -> Configuration {
        let mut config = Configuration::new("demo");
        for dep in deps {
            config.add_dependency(dep);
        }
        config
    }

    fn runner(commands: &RecordingRunner, dir: &Path) -> BuildRunner<GoToolchain> {
        BuildRunner::new(GoToolchain, Arc::new(commands.clone()), dir)
    }

    #[test]
    fn test_phases_run_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new();
        let mut config = config_with(&["github.com/spf13/cobra"]);
        config.do_vendor = true;
        config.template_hook = Some(Arc::new(LoggingHook {
            log: Arc::clone(&commands.log),
            fail: false,
        }));

        let report = runner(&commands, dir.path()).run(&config).unwrap();

        assert_eq!(
            commands.calls(),
            vec![
                "go mod init demo",
                "hook",
                "go get github.com/spf13/cobra",
                "go mod vendor",
            ]
        );
        assert_eq!(report.files, vec!["README.md"]);
        assert!(report.vendored);
        for skeleton in GoToolchain.skeleton_dirs() {
            assert!(dir.path().join(skeleton).is_dir(), "{} missing", skeleton);
        }
        assert!(config.progress.is_finished());
        assert!(config.progress.vendoring_finished());
        assert_eq!(config.progress.fraction(), 1.0);
    }

    #[test]
    fn test_no_libraries_two_dependencies() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new();
        let config = config_with(&["github.com/a/one", "github.com/b/two"]);

        let report = runner(&commands, dir.path()).run(&config).unwrap();

        assert_eq!(
            commands.calls(),
            vec![
                "go mod init demo",
                "go get github.com/a/one",
                "go get github.com/b/two",
            ]
        );
        assert!(report.files.is_empty());
        assert_eq!(config.progress.processed_dependencies(), 2);
        assert_eq!(config.progress.fraction(), 1.0);
        assert!(config.progress.status().ends_with("Finished!"));
    }

    #[test]
    fn test_dependency_failures_are_advisory() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new().failing("go get github.com/nope/missing");
        let config = config_with(&["github.com/a/one", "github.com/nope/missing"]);

        let report = runner(&commands, dir.path()).run(&config).unwrap();

        assert_eq!(report.failed_dependencies, vec!["github.com/nope/missing"]);
        assert_eq!(config.progress.processed_dependencies(), 2);
        let status = config.progress.status();
        assert!(status.contains("Getting dependency: github.com/a/one"));
        assert!(status.contains("Failed to get dependency: github.com/nope/missing"));
        assert!(config.progress.is_finished());
    }

    #[test]
    fn test_module_init_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new().failing("go mod init demo");
        let config = config_with(&["github.com/a/one"]);

        let err = runner(&commands, dir.path()).run(&config).unwrap_err();

        assert!(matches!(err, ScaffoldError::CommandFailed { .. }));
        assert_eq!(commands.calls(), vec!["go mod init demo"]);
        assert!(config
            .progress
            .status()
            .starts_with("Failed to run command: go mod init demo"));
        assert!(!config.progress.is_finished());
        assert_eq!(config.progress.processed_dependencies(), 0);
    }

    #[test]
    fn test_hook_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new();
        let mut config = config_with(&["github.com/a/one"]);
        config.template_hook = Some(Arc::new(LoggingHook {
            log: Arc::clone(&commands.log),
            fail: true,
        }));

        assert!(runner(&commands, dir.path()).run(&config).is_err());
        assert_eq!(commands.calls(), vec!["go mod init demo", "hook"]);
        assert!(!config.progress.is_finished());
    }

    #[test]
    fn test_vendor_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new().failing("go mod vendor");
        let mut config = config_with(&[]);
        config.do_vendor = true;

        let err = runner(&commands, dir.path()).run(&config).unwrap_err();

        assert!(err.to_string().contains("go mod vendor"));
        assert!(!config.progress.vendoring_finished());
        assert!(config.progress.fraction() < 1.0);
    }

    #[test]
    fn test_skeleton_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("cmd"), "not a directory").unwrap();
        let commands = RecordingRunner::new();

        let err = runner(&commands, dir.path())
            .run(&config_with(&[]))
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::CreateDir { .. }));
        assert!(commands.calls().is_empty());
    }

    #[test]
    fn test_embedded_templates_render_during_build() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new();
        let catalog = Catalog::embedded().unwrap();
        let mut config = config_with(&[]);
        config.web_library = WebLibrary::Gin;
        config.template_hook = catalog.hook_for(&config);

        let report = runner(&commands, dir.path()).run(&config).unwrap();

        assert!(report.files.contains(&"pkg/httphelpers/response.go".to_string()));
        assert!(dir.path().join("pkg/taskutils/shutdown.go").is_file());
        assert!(config.progress.status().contains("Writing templates (gin-lean)"));
    }

    /// Samples the progress counter every time a command runs
    struct SamplingRunner {
        progress: Arc<BuildProgress>,
        samples: Mutex<Vec<usize>>,
    }

    impl CommandRunner for SamplingRunner {
        fn run(&self, _invocation: &Invocation, _dir: &Path) -> Result<()> {
            self.samples
                .lock()
                .unwrap()
                .push(self.progress.processed_dependencies());
            Ok(())
        }
    }

    #[test]
    fn test_processed_dependencies_never_decrease() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with(&["a", "b", "c", "d"]);
        let sampler = Arc::new(SamplingRunner {
            progress: Arc::clone(&config.progress),
            samples: Mutex::new(Vec::new()),
        });
        let runner = BuildRunner::new(GoToolchain, sampler.clone(), dir.path());

        runner.run(&config).unwrap();

        let samples = sampler.samples.lock().unwrap().clone();
        assert_eq!(samples, vec![0, 0, 1, 2, 3]);
        assert!(samples.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn test_spawned_build_signals_completion() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new();
        let config = config_with(&["github.com/a/one"]);
        let progress = Arc::clone(&config.progress);

        let handle = runner(&commands, dir.path()).spawn(config);
        let report = handle.wait().await.unwrap();

        assert!(report.failed_dependencies.is_empty());
        assert!(progress.is_finished());
        assert_eq!(progress.fraction(), 1.0);
    }

    #[tokio::test]
    async fn test_try_finished_reports_once() {
        let dir = tempfile::tempdir().unwrap();
        let commands = RecordingRunner::new().failing("go mod init demo");
        let mut handle = runner(&commands, dir.path()).spawn(config_with(&[]));

        let result = loop {
            if let Some(result) = handle.try_finished() {
                break result;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        };
        assert!(matches!(result, Err(ScaffoldError::CommandFailed { .. })));
        assert!(!handle.progress().is_finished());
        assert!(matches!(
            handle.try_finished(),
            Some(Err(ScaffoldError::BuildAborted(_)))
        ));
    }
}
