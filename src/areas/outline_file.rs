//! The outline on disk
//!
//! The outline file is shared with whatever editor the user keeps open on
//! it, so reads take a shared lock and writes an exclusive one for the
//! duration of the file operation.

use crate::artifacts::outline::org;
use crate::artifacts::outline::outline::Outline;
use crate::errors::OverviewResult;
use derive_new::new;
use file_guard::Lock;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::Path;

#[derive(Debug, new)]
pub struct OutlineFile {
    path: Box<Path>,
}

impl OutlineFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the outline, or starts a new one titled `title` when the file
    /// does not exist yet.
    pub fn load(&self, title: &str) -> OverviewResult<Outline> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "starting a new outline");
            return Ok(Outline::with_title(title));
        }

        let mut file = std::fs::File::open(&self.path)?;
        let mut lock = file_guard::lock(&mut file, Lock::Shared, 0, 1)?;
        let mut content = String::new();
        lock.deref_mut().read_to_string(&mut content)?;

        org::parse(&content)
    }

    pub fn store(&self, outline: &Outline) -> OverviewResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        let mut lock = file_guard::lock(&mut file, Lock::Exclusive, 0, 1)?;
        lock.deref_mut().set_len(0)?;
        lock.deref_mut().write_all(org::render(outline).as_bytes())?;
        lock.deref_mut().flush()?;

        Ok(())
    }
}
