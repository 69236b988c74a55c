//! Running the external `git` binary
//!
//! All repository state comes from `git` itself. [`GitRunner`] is the seam
//! between the collector and the process: [`SystemGit`] spawns real
//! processes, tests substitute scripted output.

use crate::errors::{OverviewError, OverviewResult};
use derive_new::new;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Locale forced on every invocation so that `ahead`, `behind` and `gone`
/// are printed untranslated.
const FIXED_LOCALE: &str = "C";

/// Captured result of one finished `git` process.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct GitOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait GitRunner {
    /// Run `git <args>` inside `directory` and wait for it to finish.
    ///
    /// Only a failure to spawn is an error; a non-zero exit is reported
    /// through [`GitOutput::code`].
    fn run(&self, directory: &Path, args: &[&str]) -> OverviewResult<GitOutput>;

    /// Top-level directory of the work tree containing `path`.
    fn resolve_root(&self, path: &Path) -> OverviewResult<PathBuf> {
        if !path.is_dir() {
            return Err(OverviewError::RepositoryNotFound(path.to_path_buf()));
        }

        let output = self.run(path, &["rev-parse", "--show-toplevel"])?;
        let toplevel = output.stdout.trim();
        if !output.success() || toplevel.is_empty() {
            return Err(OverviewError::RepositoryNotFound(path.to_path_buf()));
        }

        Ok(PathBuf::from(toplevel))
    }
}

#[derive(Debug, Clone, new)]
pub struct SystemGit {
    program: String,
}

impl Default for SystemGit {
    fn default() -> Self {
        SystemGit::new("git".to_string())
    }
}

impl SystemGit {
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, directory: &Path, args: &[&str]) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .current_dir(directory)
            .env("LANG", FIXED_LOCALE)
            .env("LC_ALL", FIXED_LOCALE)
            .env("GIT_TERMINAL_PROMPT", "0");
        command
    }
}

impl GitRunner for SystemGit {
    fn run(&self, directory: &Path, args: &[&str]) -> OverviewResult<GitOutput> {
        tracing::trace!(directory = %directory.display(), ?args, "running git");

        let output = self
            .command(directory, args)
            .output()
            .map_err(|e| OverviewError::ExternalTool {
                command: describe(&self.program, args),
                code: None,
                stderr: e.to_string(),
            })?;

        Ok(GitOutput::new(
            output.status.code(),
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ))
    }
}

/// Human-readable command line used in error messages.
pub fn describe(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn system_git_forces_fixed_locale() {
        let git = SystemGit::default();
        let command = git.command(Path::new("/tmp"), &["branch", "-vv"]);
        let envs = command.get_envs().collect::<Vec<_>>();

        assert!(envs.contains(&(OsStr::new("LANG"), Some(OsStr::new("C")))));
        assert!(envs.contains(&(OsStr::new("LC_ALL"), Some(OsStr::new("C")))));
        assert_eq!(command.get_program(), "git");
        assert_eq!(
            command.get_args().collect::<Vec<_>>(),
            vec![OsStr::new("branch"), OsStr::new("-vv")]
        );
    }

    #[test]
    fn missing_directory_is_not_a_repository() {
        let git = SystemGit::default();
        let result = git.resolve_root(Path::new("/definitely/not/a/dir"));

        assert!(matches!(result, Err(OverviewError::RepositoryNotFound(_))));
    }

    #[test]
    fn unknown_program_is_an_external_tool_error() {
        let git = SystemGit::new("no-such-git-binary-here".to_string());
        let result = git.run(Path::new("."), &["status"]);

        match result {
            Err(OverviewError::ExternalTool { command, code, .. }) => {
                assert_eq!(command, "no-such-git-binary-here status");
                assert_eq!(code, None);
            }
            other => panic!("expected external tool error, got {other:?}"),
        }
    }

    #[test]
    fn describe_joins_program_and_args() {
        assert_eq!(describe("git", &["branch", "-vv"]), "git branch -vv");
    }
}
