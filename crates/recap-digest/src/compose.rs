//! Summary composition: turns a pass's new facts into at most four blocks.

use recap_core::text::{basename, char_len, truncate_chars, truncate_ellipsis, ELLIPSIS};
use recap_core::{FactSet, TaskStatus};

use crate::clean::clean_reasoning;
use crate::render::{SectionKind, Summary};
use crate::rules::{classify_request, classify_shell};

/// Command summary used when no rule in the chain applies.
pub const FALLBACK_SUMMARY: &str = "Work in progress";
/// Maximum task or file lines in the TODOS block.
pub const MAX_LIST_LINES: usize = 10;
/// Plans are cut to this many chars.
pub const MAX_PLAN_CHARS: usize = 500;
/// A cleaned reasoning excerpt must be longer than this to be shown.
pub const MIN_THINKING_CHARS: usize = 20;

const SINGLE_TASK_CHARS: usize = 50;
const FIRST_TASK_CHARS: usize = 30;
const SHORT_DESCRIPTION_CHARS: usize = 50;
const REQUEST_SUMMARY_CHARS: usize = 50;

type SummaryRule = fn(&FactSet) -> Option<String>;

/// Priority chain for the one-line command summary; first hit wins.
const COMMAND_SUMMARY_CHAIN: &[SummaryRule] = &[
    from_completed_tasks,
    from_file_edits,
    from_shell_commands,
    from_user_request,
];

/// Compose the summary for the new facts of one pass.
///
/// Returns an empty summary when there are no new facts at all.
pub fn compose(facts: &FactSet) -> Summary {
    let mut summary = Summary::default();
    if facts.is_empty() {
        return summary;
    }

    summary.push(SectionKind::CommandSummary, vec![command_summary(facts)]);
    summary.push(SectionKind::Todos, todo_lines(facts));
    summary.push(SectionKind::Thinking, thinking_lines(facts));
    summary.push(SectionKind::Plan, plan_lines(facts));

    tracing::debug!(sections = summary.sections().len(), "composed summary");
    summary
}

/// The single command-summary line.
pub fn command_summary(facts: &FactSet) -> String {
    COMMAND_SUMMARY_CHAIN
        .iter()
        .find_map(|rule| rule(facts))
        .unwrap_or_else(|| FALLBACK_SUMMARY.to_string())
}

fn from_completed_tasks(facts: &FactSet) -> Option<String> {
    let completed: Vec<&str> = facts
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .map(|t| t.text.as_str())
        .collect();
    match completed.as_slice() {
        [] => None,
        [only] => Some(truncate_ellipsis(only, SINGLE_TASK_CHARS)),
        [first, ..] => Some(format!(
            "{} tasks completed: {}{ELLIPSIS}",
            completed.len(),
            truncate_chars(first, FIRST_TASK_CHARS)
        )),
    }
}

fn from_file_edits(facts: &FactSet) -> Option<String> {
    let names: Vec<&str> = facts.file_edits.iter().map(|f| basename(&f.path)).collect();
    match names.len() {
        0 => None,
        1..=3 => Some(format!("{} modified", names.join(", "))),
        n => Some(format!("{n} files modified")),
    }
}

fn from_shell_commands(facts: &FactSet) -> Option<String> {
    let commands = &facts.commands;
    let last = commands.last()?;
    if let Some(phrase) = classify_shell(commands) {
        return Some(phrase.to_string());
    }
    match last.description.as_deref() {
        Some(desc) if char_len(desc) < SHORT_DESCRIPTION_CHARS => Some(desc.to_string()),
        _ if commands.len() == 1 => Some("1 command run".to_string()),
        _ => Some(format!("{} commands run", commands.len())),
    }
}

fn from_user_request(facts: &FactSet) -> Option<String> {
    let request = facts.requests.last()?;
    Some(match classify_request(&request.text) {
        Some(phrase) => phrase.to_string(),
        None => truncate_chars(&request.text, REQUEST_SUMMARY_CHARS).to_string(),
    })
}

/// Task checklist (the most recent tasks); falls back to edited files, then
/// to a work item derived from the latest request.
fn todo_lines(facts: &FactSet) -> Vec<String> {
    if !facts.tasks.is_empty() {
        let skip = facts.tasks.len().saturating_sub(MAX_LIST_LINES);
        return facts
            .tasks
            .iter()
            .skip(skip)
            .map(|t| format!("{} {}", t.status.glyph(), t.text))
            .collect();
    }

    if !facts.file_edits.is_empty() {
        let mut lines: Vec<String> = facts
            .file_edits
            .iter()
            .take(MAX_LIST_LINES)
            .map(|f| format!("📝 {}", basename(&f.path)))
            .collect();
        let rest = facts.file_edits.len().saturating_sub(MAX_LIST_LINES);
        if rest > 0 {
            lines.push(format!("{ELLIPSIS} and {rest} more files"));
        }
        return lines;
    }

    facts
        .requests
        .last()
        .and_then(|r| classify_request(&r.text))
        .map(|item| vec![format!("{} {item}", TaskStatus::Completed.glyph())])
        .unwrap_or_default()
}

fn thinking_lines(facts: &FactSet) -> Vec<String> {
    let Some(latest) = facts.reasoning.last() else {
        return Vec::new();
    };
    let cleaned = clean_reasoning(&latest.text);
    if char_len(&cleaned) > MIN_THINKING_CHARS {
        vec![format!("• {cleaned}")]
    } else {
        Vec::new()
    }
}

fn plan_lines(facts: &FactSet) -> Vec<String> {
    let Some(latest) = facts.plans.last() else {
        return Vec::new();
    };
    truncate_chars(latest.text.trim(), MAX_PLAN_CHARS)
        .lines()
        .map(str::to_string)
        .collect()
}
