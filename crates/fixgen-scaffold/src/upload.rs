//! Build-and-publish step run after each project is written.

use crate::ScaffoldResult;
use fixgen_core::{FixtureError, ProjectSpec};
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Publishes a scaffolded project
pub trait Uploader {
    /// Build and upload the project found in `project_dir`
    fn upload(&self, project_dir: &Path, spec: &ProjectSpec) -> ScaffoldResult<()>;

    /// Short description for log output
    fn describe(&self) -> String;
}

/// Runs `<python> setup.py sdist upload -r <repository>` inside the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandUploader {
    pub python: String,
    pub repository: String,
}

/// Skips publishing entirely
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUploader;

impl CommandUploader {
    /// Create an uploader for the given interpreter and index name
    pub fn new(python: impl Into<String>, repository: impl Into<String>) -> Self {
        Self {
            python: python.into(),
            repository: repository.into(),
        }
    }

    /// Arguments passed to the interpreter
    pub fn args(&self) -> Vec<&str> {
        vec!["setup.py", "sdist", "upload", "-r", self.repository.as_str()]
    }

    /// The command for one project; only the child's working directory is set
    pub fn command(&self, project_dir: &Path) -> Command {
        let mut command = Command::new(&self.python);
        command.args(self.args()).current_dir(project_dir);
        command
    }
}

impl Default for CommandUploader {
    fn default() -> Self {
        Self::new("python", "local")
    }
}

impl Uploader for CommandUploader {
    fn upload(&self, project_dir: &Path, spec: &ProjectSpec) -> ScaffoldResult<()> {
        info!("Uploading {} {} to '{}'", spec.name, spec.version, self.repository);
        debug!("Running {} in {}", self.describe(), project_dir.display());

        let status = self.command(project_dir).status().map_err(|e| FixtureError::UploadFailed {
            project: spec.folder.clone(),
            reason: format!("could not run '{}'", self.python),
            source: Some(e),
        })?;

        if !status.success() {
            return Err(FixtureError::UploadFailed {
                project: spec.folder.clone(),
                reason: format!("'{}' exited with {}", self.describe(), status),
                source: None,
            });
        }

        Ok(())
    }

    fn describe(&self) -> String {
        format!("{} {}", self.python, self.args().join(" "))
    }
}

impl Uploader for NoopUploader {
    fn upload(&self, _project_dir: &Path, spec: &ProjectSpec) -> ScaffoldResult<()> {
        debug!("Skipping upload of {}", spec.folder);
        Ok(())
    }

    fn describe(&self) -> String {
        "no upload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> ProjectSpec {
        ProjectSpec::new("foo_v1", "foo", "1.0", &[])
    }

    #[test]
    fn test_default_command() {
        let uploader = CommandUploader::default();
        assert_eq!(uploader.describe(), "python setup.py sdist upload -r local");

        let command = uploader.command(Path::new("/tmp/foo_v1"));
        assert_eq!(command.get_program(), "python");
        assert_eq!(command.get_current_dir(), Some(Path::new("/tmp/foo_v1")));
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["setup.py", "sdist", "upload", "-r", "local"]);
    }

    #[test]
    fn test_missing_interpreter_is_upload_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let uploader = CommandUploader::new("fixgen-no-such-python", "local");

        let err = uploader.upload(temp_dir.path(), &spec()).unwrap_err();
        assert!(matches!(err, FixtureError::UploadFailed { project, .. } if project == "foo_v1"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_upload_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let uploader = CommandUploader::new("false", "local");

        let err = uploader.upload(temp_dir.path(), &spec()).unwrap_err();
        assert!(err.to_string().contains("foo_v1"));
        assert!(!err.is_recoverable());
    }

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        let temp_dir = tempfile::tempdir().unwrap();
        let uploader = CommandUploader::new("true", "local");
        assert!(uploader.upload(temp_dir.path(), &spec()).is_ok());
    }

    #[test]
    fn test_noop_uploader() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(NoopUploader.upload(temp_dir.path(), &spec()).is_ok());
        assert_eq!(NoopUploader.describe(), "no upload");
    }
}
