//! Per-session record of facts already reported.
//!
//! The whole set is read at the start of a pass and written back in full at
//! the end. There is no lock: two overlapping passes on one session may both
//! report the same fact.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use recap_core::{fingerprint, FactSet, Reportable};

use crate::error::StoreError;
use crate::write_atomic;

/// State file name for a session inside the state directory.
fn reported_path(state_dir: &Path, session_id: &str) -> PathBuf {
    state_dir.join(format!(".recap-reported-{session_id}"))
}

#[derive(Debug, Clone)]
pub struct DedupStore {
    path: PathBuf,
    fingerprints: BTreeSet<String>,
    loaded: usize,
}

impl DedupStore {
    /// Read the fingerprint set for `session_id`.
    ///
    /// A missing file is an empty set. An unreadable file is logged and also
    /// treated as empty: re-reporting beats staying silent.
    pub fn load(state_dir: &Path, session_id: &str) -> Self {
        let path = reported_path(state_dir, session_id);
        let fingerprints: BTreeSet<String> = match fs::read_to_string(&path) {
            Ok(content) => content
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "dedup state unreadable, starting empty");
                BTreeSet::new()
            }
        };
        let loaded = fingerprints.len();
        Self {
            path,
            fingerprints,
            loaded,
        }
    }

    /// Location of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// Number of fingerprints read from disk by `load`.
    pub fn loaded_len(&self) -> usize {
        self.loaded
    }

    /// Keep only items whose fingerprint is not yet recorded, and record
    /// every fingerprint seen.
    pub fn retain_new<T: Reportable>(&mut self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .filter(|item| self.fingerprints.insert(fingerprint(T::KIND, item.primary_text())))
            .collect()
    }

    /// Reduce a pass's facts to the ones never reported before.
    ///
    /// Tasks, requests, plans, and reasoning are filtered per kind. File
    /// edits and shell commands pass through untouched; they are only
    /// deduplicated within a pass.
    pub fn filter_new(&mut self, facts: FactSet) -> FactSet {
        FactSet {
            tasks: self.retain_new(facts.tasks),
            plans: self.retain_new(facts.plans),
            reasoning: self.retain_new(facts.reasoning),
            requests: self.retain_new(facts.requests),
            file_edits: facts.file_edits,
            commands: facts.commands,
        }
    }

    /// Replace the state file with the full set, one fingerprint per line.
    pub fn persist(&self) -> Result<(), StoreError> {
        let mut data = String::with_capacity(self.fingerprints.len() * 65);
        for fp in &self.fingerprints {
            data.push_str(fp);
            data.push('\n');
        }
        write_atomic(&self.path, data.as_bytes()).map_err(|source| StoreError::Persist {
            path: self.path.clone(),
            source,
        })
    }
}
