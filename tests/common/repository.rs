use crate::common::command::run_git_command;
use std::path::{Path, PathBuf};

/// A non-bare repository with one empty commit on `main`.
pub fn init_repository(base: &Path, name: &str) -> PathBuf {
    let path = base.join(name);
    std::fs::create_dir_all(&path).expect("Failed to create repository dir");

    run_git_command(&path, &["init", "-q"]).assert().success();
    run_git_command(&path, &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();
    commit(&path, "Initial commit");

    path.canonicalize().expect("Failed to canonicalize repository")
}

/// A bare `<name>.git` remote and a clone `<name>` whose `main` tracks
/// `origin/main`, both at the same commit.
pub fn init_remote_and_clone(base: &Path, name: &str) -> (PathBuf, PathBuf) {
    let remote = base.join(format!("{name}.git"));
    let clone = base.join(name);

    run_git_command(base, &["init", "-q", "--bare", &remote.display().to_string()])
        .assert()
        .success();
    run_git_command(&remote, &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();
    run_git_command(
        base,
        &[
            "clone",
            "-q",
            &remote.display().to_string(),
            &clone.display().to_string(),
        ],
    )
    .assert()
    .success();
    run_git_command(&clone, &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();
    commit(&clone, "Initial commit");
    run_git_command(&clone, &["push", "-q", "-u", "origin", "main"])
        .assert()
        .success();

    (
        remote.canonicalize().expect("Failed to canonicalize remote"),
        clone.canonicalize().expect("Failed to canonicalize clone"),
    )
}

pub fn commit(dir: &Path, message: &str) {
    run_git_command(dir, &["commit", "-q", "--allow-empty", "-m", message])
        .assert()
        .success();
}

pub fn create_branch(dir: &Path, name: &str) {
    run_git_command(dir, &["branch", name]).assert().success();
}

pub fn head_commit(dir: &Path) -> String {
    let output = run_git_command(dir, &["rev-parse", "--short", "HEAD"])
        .output()
        .expect("Failed to run git rev-parse");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn random_branch_name() -> String {
    use fake::Fake;
    use fake::faker::lorem::en::Word;

    format!("topic-{}", Word().fake::<String>().to_lowercase())
}
