// src/fs/mock.rs

//! In-memory [`FileSystem`] used by the event-contract tests: records every
//! mutation so dry-run behaviour can be asserted, and injects failures on
//! chosen paths.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};

use super::FileSystem;

#[derive(Debug, Clone)]
pub struct MockFile {
    pub contents: Vec<u8>,
    pub executable: bool,
}

#[derive(Debug, Default)]
struct MockState {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, MockFile>,
    fail_writes: BTreeSet<PathBuf>,
    fail_dirs: BTreeSet<PathBuf>,
    mutations: usize,
}

/// Clones share state, so tests keep one handle while the executor owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let fs = Self::default();
        fs.state.lock().unwrap().dirs.insert(PathBuf::from("/"));
        fs
    }

    /// Make every `write` to `path` fail.
    pub fn fail_writes_to(&self, path: impl AsRef<Path>) {
        self.state
            .lock()
            .unwrap()
            .fail_writes
            .insert(path.as_ref().to_path_buf());
    }

    /// Make every `create_dir_all` of `path` fail.
    pub fn fail_create_dir(&self, path: impl AsRef<Path>) {
        self.state
            .lock()
            .unwrap()
            .fail_dirs
            .insert(path.as_ref().to_path_buf());
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<MockFile> {
        self.state.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn dirs(&self) -> Vec<PathBuf> {
        self.state.lock().unwrap().dirs.iter().cloned().collect()
    }

    /// Number of mutating calls (`create_dir_all`, `write`, `set_executable`)
    /// seen so far. Zero after a dry run.
    pub fn mutations(&self) -> usize {
        self.state.lock().unwrap().mutations
    }
}

impl FileSystem for MockFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.mutations += 1;

        if state.fail_dirs.contains(path) {
            bail!("mkdir failure injected for {:?}", path);
        }

        for ancestor in path.ancestors() {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.mutations += 1;

        if state.fail_writes.contains(path) {
            bail!("write failure injected for {:?}", path);
        }

        let parent = path.parent().unwrap_or_else(|| Path::new("/"));
        if !state.dirs.contains(parent) {
            bail!("no such directory: {:?}", parent);
        }

        state.files.insert(
            path.to_path_buf(),
            MockFile {
                contents: contents.to_vec(),
                executable: false,
            },
        );
        Ok(())
    }

    fn is_executable(&self, path: &Path) -> bool {
        self.state
            .lock()
            .unwrap()
            .files
            .get(path)
            .map(|file| file.executable)
            .unwrap_or(false)
    }

    fn set_executable(&self, path: &Path) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.mutations += 1;

        let file = state
            .files
            .get_mut(path)
            .ok_or_else(|| anyhow!("file not found: {:?}", path))?;
        file.executable = true;
        Ok(())
    }
}
