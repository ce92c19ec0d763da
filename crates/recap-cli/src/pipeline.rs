use std::path::PathBuf;

use recap_digest::{compose, Summary};
use recap_store::{session_id, DedupStore};
use recap_transcript::{extract_facts, read_tail};

/// Inputs of one pass.
#[derive(Debug, Clone)]
pub struct PassOptions {
    pub log_path: PathBuf,
    pub state_dir: PathBuf,
    pub window: usize,
}

/// Read the tail, extract facts, drop already-reported ones, persist the
/// updated dedup set, and compose the summary.
///
/// The dedup set is written before anything is emitted: if it cannot be
/// saved the pass fails and prints nothing.
pub fn run_pass(options: &PassOptions) -> anyhow::Result<Summary> {
    let tail = read_tail(&options.log_path, options.window)?;
    let facts = extract_facts(&tail.events);

    let session = session_id(&options.log_path);
    let mut store = DedupStore::load(&options.state_dir, &session);
    let extracted = facts.counts();
    let new_facts = store.filter_new(facts);

    tracing::debug!(
        session = %session,
        state = %store.path().display(),
        events = tail.events.len(),
        malformed = tail.stats.malformed,
        skipped = tail.stats.skipped,
        extracted = %extracted,
        new = %new_facts.counts(),
        store_before = store.loaded_len(),
        store_after = store.len(),
        "pass complete"
    );

    store.persist()?;
    Ok(compose(&new_facts))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_digest::SectionKind;
    use serde_json::json;
    use std::io::Write;
    use std::path::Path;

    struct Fixture {
        _tmp: tempfile::TempDir,
        options: PassOptions,
    }

    fn fixture(records: &[String]) -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let log_path = tmp.path().join("b7c1-session.jsonl");
        write_log(&log_path, records);
        let options = PassOptions {
            log_path,
            state_dir: tmp.path().join("state"),
            window: 100,
        };
        Fixture { _tmp: tmp, options }
    }

    fn write_log(path: &Path, records: &[String]) {
        let mut f = std::fs::File::create(path).unwrap();
        for r in records {
            writeln!(f, "{r}").unwrap();
        }
    }

    fn user(text: &str) -> String {
        json!({"type": "user", "message": {"role": "user", "content": text}}).to_string()
    }

    fn assistant(blocks: serde_json::Value) -> String {
        json!({"type": "assistant", "message": {"role": "assistant", "content": blocks}})
            .to_string()
    }

    fn todo_write(items: &[(&str, &str)]) -> String {
        let todos: Vec<_> = items
            .iter()
            .map(|(c, s)| json!({"content": c, "status": s, "activeForm": c}))
            .collect();
        assistant(json!([{"type": "tool_use", "id": "tu", "name": "TodoWrite", "input": {"todos": todos}}]))
    }

    fn edit(path: &str) -> String {
        assistant(json!([{"type": "tool_use", "name": "Edit", "input": {"file_path": path, "old_string": "a", "new_string": "b"}}]))
    }

    fn lines(summary: &Summary, kind: SectionKind) -> Vec<String> {
        summary
            .section(kind)
            .map(|s| s.lines.clone())
            .unwrap_or_default()
    }

    #[test]
    fn second_run_on_unchanged_log_is_silent() {
        let fx = fixture(&[todo_write(&[("Publish the release", "completed")])]);

        let first = run_pass(&fx.options).unwrap();
        assert_eq!(
            lines(&first, SectionKind::CommandSummary),
            ["Publish the release"]
        );
        assert_eq!(lines(&first, SectionKind::Todos), ["✅ Publish the release"]);

        let second = run_pass(&fx.options).unwrap();
        assert!(second.is_empty());
        assert_eq!(second.render(), "");
    }

    #[test]
    fn pending_then_completed_merges_to_one_completed_task() {
        let fx = fixture(&[
            todo_write(&[("Migrate the schema", "pending")]),
            todo_write(&[("Migrate the schema", "completed")]),
        ]);
        let summary = run_pass(&fx.options).unwrap();
        assert_eq!(lines(&summary, SectionKind::Todos), ["✅ Migrate the schema"]);
    }

    #[test]
    fn completed_task_wins_over_file_edits() {
        let fx = fixture(&[
            edit("/repo/src/a.rs"),
            edit("/repo/src/b.rs"),
            todo_write(&[("Add retry to uploader", "completed")]),
        ]);
        let summary = run_pass(&fx.options).unwrap();
        assert_eq!(
            lines(&summary, SectionKind::CommandSummary),
            ["Add retry to uploader"]
        );
    }

    #[test]
    fn file_edits_are_reported_again_on_rerun() {
        let fx = fixture(&[edit("/repo/src/main.rs")]);
        let first = run_pass(&fx.options).unwrap();
        let second = run_pass(&fx.options).unwrap();
        assert_eq!(
            lines(&first, SectionKind::CommandSummary),
            ["main.rs modified"]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_line_does_not_change_output() {
        let records = vec![
            user("Please refactor the config loader into a module"),
            edit("/repo/src/config.rs"),
            assistant(json!([{"type": "thinking", "thinking": "The loader mixes env parsing with file IO, so splitting them keeps each testable."}])),
        ];
        let mut with_bad = records.clone();
        with_bad.insert(1, "{\"type\": \"assistant\", \"message\": {".to_string());

        let clean = fixture(&records);
        let dirty = fixture(&with_bad);
        let a = run_pass(&clean.options).unwrap();
        let b = run_pass(&dirty.options).unwrap();
        assert!(!a.is_empty());
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn acknowledgement_only_log_is_silent() {
        let fx = fixture(&[user("ok")]);
        let summary = run_pass(&fx.options).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn truncation_bounds_hold() {
        let long_request = format!("Please {}", "explain ".repeat(60));
        let long_plan = format!("## Plan\n{}", "- do the thing\n".repeat(100));
        let long_thought = format!("The cache key must include the window size. {}", "x".repeat(500));
        let fx = fixture(&[
            user(&long_request),
            assistant(json!([
                {"type": "thinking", "thinking": long_thought},
                {"type": "tool_use", "name": "ExitPlanMode", "input": {"plan": long_plan}}
            ])),
        ]);
        let summary = run_pass(&fx.options).unwrap();

        let plan = lines(&summary, SectionKind::Plan).join("\n");
        assert!(plan.chars().count() <= 500);
        let thinking = lines(&summary, SectionKind::Thinking);
        assert_eq!(thinking, ["• The cache key must include the window size"]);
        let command = lines(&summary, SectionKind::CommandSummary);
        assert!(command[0].chars().count() <= 50);
    }

    #[test]
    fn missing_log_is_an_error_and_writes_no_state() {
        let tmp = tempfile::tempdir().unwrap();
        let options = PassOptions {
            log_path: tmp.path().join("absent.jsonl"),
            state_dir: tmp.path().join("state"),
            window: 100,
        };
        let err = run_pass(&options).unwrap_err();
        assert!(err.to_string().contains("absent.jsonl"));
        assert!(!options.state_dir.exists());
    }

    #[test]
    fn unwritable_state_dir_fails_the_pass() {
        let fx = fixture(&[todo_write(&[("Write docs", "completed")])]);
        let blocker = fx.options.log_path.with_file_name("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let options = PassOptions {
            state_dir: blocker,
            ..fx.options.clone()
        };
        assert!(run_pass(&options).is_err());
    }

    #[test]
    fn state_file_is_named_after_session() {
        let fx = fixture(&[todo_write(&[("Write docs", "completed")])]);
        run_pass(&fx.options).unwrap();
        let state = fx.options.state_dir.join(".recap-reported-b7c1-session");
        let content = std::fs::read_to_string(state).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn window_limits_examined_records() {
        let mut records = vec![todo_write(&[("Old task outside the window", "completed")])];
        records.extend((0..5).map(|_| user("ok")));
        let fx = fixture(&records);
        let options = PassOptions {
            window: 5,
            ..fx.options.clone()
        };
        assert!(run_pass(&options).unwrap().is_empty());
    }

    #[test]
    fn new_task_in_later_pass_is_reported_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let log_path = tmp.path().join("s.jsonl");
        let options = PassOptions {
            log_path: log_path.clone(),
            state_dir: tmp.path().join("state"),
            window: 100,
        };

        write_log(&log_path, &[todo_write(&[("First", "completed")])]);
        run_pass(&options).unwrap();

        write_log(
            &log_path,
            &[todo_write(&[("First", "completed"), ("Second", "completed")])],
        );
        let summary = run_pass(&options).unwrap();
        assert_eq!(lines(&summary, SectionKind::Todos), ["✅ Second"]);
        assert_eq!(lines(&summary, SectionKind::CommandSummary), ["Second"]);
    }
}
