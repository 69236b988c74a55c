use crate::common::command::{run_overview_command, workspace_dir, write_config};
use crate::common::repository::{init_remote_and_clone, init_repository};
use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;
use std::path::Path;

mod common;

/// 1-based number of the last line equal to `text`.
fn last_line_of(outline: &Path, text: &str) -> Result<usize, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(outline)?;
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| *line == text)
        .map(|(index, _)| index + 1)
        .last()
        .ok_or_else(|| format!("{text:?} not found in {content}").into())
}

#[rstest]
fn runs_status_in_repository_owning_the_line(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = workspace_dir.path().canonicalize()?;
    let (_, api) = init_remote_and_clone(&base, "api");
    let web = init_repository(&base, "web");
    let outline = base.join("overview.org");
    let config = write_config(&base, &outline, &[("Work", vec![api, web.clone()])]);
    let config = config.display().to_string();

    run_overview_command(&base, &["sync", "--config", &config])
        .assert()
        .success();

    // web is listed last; its branch heading inherits Gitdir from the repository heading.
    let line = last_line_of(&outline, "*** main")?;
    run_overview_command(
        &base,
        &["status", "--config", &config, "--line", &line.to_string()],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains(web.display().to_string()))
    .stdout(predicate::str::contains("Repository:").not());

    Ok(())
}

#[rstest]
fn prompts_when_line_has_no_repository(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let base = workspace_dir.path().canonicalize()?;
    let web = init_repository(&base, "web");
    let outline = base.join("overview.org");
    let config = write_config(&base, &outline, &[("Work", vec![web.clone()])]);
    let config = config.display().to_string();

    run_overview_command(&base, &["sync", "--config", &config])
        .assert()
        .success();

    run_overview_command(&base, &["status", "--config", &config, "--line", "1"])
        .write_stdin(format!("{}\n", web.display()))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Repository: "))
        .stdout(predicate::str::contains(web.display().to_string()));

    Ok(())
}

#[rstest]
fn empty_answer_fails(workspace_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let base = workspace_dir.path().canonicalize()?;
    let outline = base.join("overview.org");
    let config = write_config(&base, &outline, &[]);

    run_overview_command(&base, &["status", "--config", &config.display().to_string()])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no repository given"));

    Ok(())
}
