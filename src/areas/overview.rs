use crate::areas::git::SystemGit;
use crate::areas::outline_file::OutlineFile;
use crate::artifacts::config::settings::Config;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Everything a command needs: the loaded configuration, the `git` used to
/// query repositories and the writer receiving command output.
pub struct Overview {
    config: Config,
    writer: RefCell<Box<dyn std::io::Write>>,
    git: SystemGit,
}

impl Overview {
    pub fn new(config: Config, writer: Box<dyn std::io::Write>) -> Self {
        let git = SystemGit::new(config.git.program.clone());

        Overview {
            config,
            writer: RefCell::new(writer),
            git,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn git(&self) -> &SystemGit {
        &self.git
    }

    /// The outline at `path`, or the configured one.
    pub fn outline_file(&self, path: Option<&Path>) -> OutlineFile {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => self.config.outline_path(),
        };

        OutlineFile::new(path.into_boxed_path())
    }
}
