use std::collections::VecDeque;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use recap_core::Event;
use serde::de::IgnoredAny;
use thiserror::Error;

use crate::record::decode_event;

/// The event log could not be read at all. Fatal for the invocation.
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("cannot open transcript {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot read transcript {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Counters for one tail read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadStats {
    /// Non-empty lines in the whole file.
    pub lines: usize,
    /// Lines that are not valid JSON. Never counted toward the window.
    pub malformed: usize,
    /// JSON records kept in the window.
    pub records: usize,
    /// Window records that did not decode into an event.
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptTail {
    pub events: Vec<Event>,
    pub stats: ReadStats,
}

/// Read the last `window` records of a JSONL transcript.
///
/// Each line is parsed on its own. Lines that are not JSON are skipped and
/// do not occupy a window slot, so a corrupt line never shifts which records
/// are examined. Records without a usable `message` occupy a slot but yield
/// no event.
pub fn read_tail(path: &Path, window: usize) -> Result<TranscriptTail, ReadError> {
    let file = std::fs::File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut stats = ReadStats::default();
    // Raw lines of the window; only these are ever built into values.
    let mut ring: VecDeque<Vec<u8>> = VecDeque::with_capacity(window.min(1024));

    for line in BufReader::new(file).split(b'\n') {
        let line = line.map_err(|source| ReadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        stats.lines += 1;

        if serde_json::from_slice::<IgnoredAny>(&line).is_err() {
            stats.malformed += 1;
            continue;
        }

        if window == 0 {
            continue;
        }
        if ring.len() == window {
            ring.pop_front();
        }
        ring.push_back(line);
    }

    stats.records = ring.len();
    let mut events = Vec::with_capacity(ring.len());
    for line in ring {
        let event = serde_json::from_slice::<serde_json::Value>(&line)
            .ok()
            .and_then(decode_event);
        match event {
            Some(event) => events.push(event),
            None => stats.skipped += 1,
        }
    }

    tracing::debug!(
        path = %path.display(),
        lines = stats.lines,
        malformed = stats.malformed,
        records = stats.records,
        skipped = stats.skipped,
        "read transcript tail"
    );

    Ok(TranscriptTail { events, stats })
}
