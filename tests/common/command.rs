use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Runs the binary with `HOME` pointing into `dir`, so neither the user's
/// configuration nor their git settings leak into the test.
pub fn run_overview_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("branch-overview").expect("Failed to find binary");
    cmd.current_dir(dir);
    cmd.env("HOME", dir);
    cmd.env("XDG_CONFIG_HOME", dir.join(".config"));
    cmd.env("GIT_CONFIG_NOSYSTEM", "1");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd.env("HOME", dir);
    cmd.env("GIT_CONFIG_NOSYSTEM", "1");
    cmd.envs(vec![
        ("GIT_AUTHOR_NAME", "fake_user"),
        ("GIT_AUTHOR_EMAIL", "fake_email@email.com"),
        ("GIT_COMMITTER_NAME", "fake_user"),
        ("GIT_COMMITTER_EMAIL", "fake_email@email.com"),
        ("GIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"),
        ("GIT_COMMITTER_DATE", "2023-01-01 12:00:00 +0000"),
    ]);
    cmd.args(["-c", "commit.gpgsign=false", "-c", "advice.detachedHead=false"]);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Writes a configuration file with one `[[category]]` per entry and returns
/// its path.
pub fn write_config(dir: &Path, outline: &Path, categories: &[(&str, Vec<PathBuf>)]) -> PathBuf {
    let mut content = format!(
        "[outline]\npath = {:?}\n\n[git]\nstatus_command = [\"git\", \"rev-parse\", \"--show-toplevel\"]\n",
        outline.display().to_string()
    );

    for (name, repositories) in categories {
        let repositories = repositories
            .iter()
            .map(|path| format!("{:?}", path.display().to_string()))
            .collect::<Vec<_>>()
            .join(", ");
        content.push_str(&format!(
            "\n[[category]]\nname = {name:?}\nrepositories = [{repositories}]\n"
        ));
    }

    let path = dir.join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    path
}
