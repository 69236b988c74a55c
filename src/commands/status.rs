use crate::areas::git::{GitRunner, describe};
use crate::areas::overview::Overview;
use crate::artifacts::config::settings::expand_home;
use crate::artifacts::outline::document::Document;
use crate::artifacts::sync::GITDIR_PROPERTY;
use anyhow::{Context, bail};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

impl Overview {
    /// Runs the configured status command in the repository the outline
    /// places at `line`, asking on `input` when the line does not belong to
    /// any repository.
    pub fn status(
        &self,
        outline: Option<&Path>,
        line: Option<usize>,
        input: &mut dyn BufRead,
    ) -> anyhow::Result<PathBuf> {
        let gitdir = match line {
            Some(line) => self.repository_at_line(outline, line)?,
            None => None,
        };

        let path = match gitdir {
            Some(gitdir) => gitdir,
            None => self.prompt_repository(input)?,
        };

        let root = self
            .git()
            .resolve_root(&expand_home(&path))
            .with_context(|| format!("{path} is not inside a git repository"))?;

        let Some((program, args)) = self.config().git.status_command.split_first() else {
            bail!("the configured status command is empty");
        };

        tracing::debug!(root = %root.display(), %program, ?args, "running status command");

        let status = Command::new(program)
            .args(args)
            .current_dir(&root)
            .status()
            .with_context(|| format!("failed to run {}", self.status_command_line()))?;

        if !status.success() {
            bail!(
                "{} exited with {}",
                self.status_command_line(),
                status
                    .code()
                    .map_or_else(|| "a signal".to_string(), |code| code.to_string())
            );
        }

        Ok(root)
    }

    fn repository_at_line(
        &self,
        outline: Option<&Path>,
        line: usize,
    ) -> anyhow::Result<Option<String>> {
        let file = self.outline_file(outline);
        let document = file
            .load(&self.config().outline.title)
            .with_context(|| format!("failed to read outline {}", file.path().display()))?;

        let node = document.node_at_line(line);
        let gitdir = document
            .find_inherited(node, GITDIR_PROPERTY)
            .and_then(|owner| document.property(owner, GITDIR_PROPERTY))
            .map(str::to_string);

        tracing::debug!(line, ?gitdir, "looked up repository in outline");
        Ok(gitdir)
    }

    fn prompt_repository(&self, input: &mut dyn BufRead) -> anyhow::Result<String> {
        {
            let mut writer = self.writer();
            write!(writer, "Repository: ")?;
            writer.flush()?;
        }

        let mut answer = String::new();
        input.read_line(&mut answer)?;

        let answer = answer.trim();
        if answer.is_empty() {
            bail!("no repository given");
        }

        Ok(answer.to_string())
    }

    fn status_command_line(&self) -> String {
        let command = &self.config().git.status_command;
        match command.split_first() {
            Some((program, args)) => describe(
                program,
                &args.iter().map(String::as_str).collect::<Vec<_>>(),
            ),
            None => String::new(),
        }
    }
}
