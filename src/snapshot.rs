//! Per-rule snapshots of the tree.
//!
//! After every rule invocation with edits the printed program is written to
//! `<dir>/<pass:02>-<rule>.js`, with `/` in the rule name replaced by `_`:
//! `01-expressions_binary-fold.js`.

use std::io;
use std::path::{Path, PathBuf};

use untangle_ast::{Program, print_program};

use crate::{PassObserver, TraceEntry};

pub struct SnapshotWriter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl SnapshotWriter {
    /// Create `dir` if needed.
    pub fn create(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            written: Vec::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn file_name(entry: &TraceEntry) -> String {
        format!("{:02}-{}.js", entry.pass, entry.rule.replace('/', "_"))
    }
}

impl PassObserver for SnapshotWriter {
    fn rule_applied(&mut self, entry: &TraceEntry, program: &Program) {
        let path = self.dir.join(Self::file_name(entry));
        match std::fs::write(&path, print_program(program)) {
            Ok(()) => self.written.push(path),
            // A missing snapshot is not worth stopping the run for.
            Err(err) => tracing::warn!(path = %path.display(), %err, "failed to write snapshot"),
        }
    }
}
