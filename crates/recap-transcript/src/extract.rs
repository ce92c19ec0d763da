use std::collections::{HashMap, HashSet};

use recap_core::text::{char_len, truncate_chars};
use recap_core::{
    Block, Content, Event, FactSet, FileEdit, Plan, Reasoning, Role, ShellCommand, TaskItem,
    TaskStatus, UserRequest,
};

/// A user message must be longer than this to count as a request.
pub const MIN_REQUEST_CHARS: usize = 20;
/// Stored user requests are cut to this many chars.
pub const MAX_REQUEST_CHARS: usize = 100;
/// Plans shorter than this are ignored.
pub const MIN_PLAN_CHARS: usize = 20;
/// A reasoning body must be longer than this (after trimming).
pub const MIN_REASONING_CHARS: usize = 50;
/// Stored reasoning excerpts are cut to this many chars.
pub const MAX_REASONING_CHARS: usize = 200;
/// Shell commands at or above this length are dropped as noise.
pub const MAX_COMMAND_CHARS: usize = 200;

const ACKNOWLEDGEMENTS: &[&str] = &[
    "ok", "okay", "yes", "y", "thanks", "thank you", "네", "확인", "응", "좋아",
];

/// Whether `text` is a bare acknowledgement ("ok", "yes", "네", ...).
pub fn is_acknowledgement(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    ACKNOWLEDGEMENTS.iter().any(|a| *a == lower)
}

/// One pass over the window: classify every event into facts.
pub fn extract_facts(events: &[Event]) -> FactSet {
    let mut extractor = Extractor::default();
    for event in events {
        extractor.visit(event);
    }
    extractor.finish()
}

#[derive(Default)]
struct Extractor {
    facts: FactSet,
    /// task text -> index in `facts.tasks`
    task_index: HashMap<String, usize>,
    seen_requests: HashSet<String>,
    seen_plans: HashSet<String>,
    seen_reasoning: HashSet<String>,
    seen_files: HashSet<String>,
    seen_commands: HashSet<String>,
}

impl Extractor {
    fn visit(&mut self, event: &Event) {
        match (event.role, &event.content) {
            (Role::User, Content::Text(text)) => self.user_text(text),
            (Role::Assistant, Content::Blocks(blocks)) => {
                for block in blocks {
                    self.assistant_block(block);
                }
            }
            _ => {}
        }
    }

    /// The length gate applies to the raw message; surrounding whitespace is
    /// trimmed only from the stored text.
    fn user_text(&mut self, text: &str) {
        if char_len(text) <= MIN_REQUEST_CHARS || is_acknowledgement(text) {
            return;
        }
        let stored = truncate_chars(text, MAX_REQUEST_CHARS).trim().to_string();
        if stored.is_empty() {
            return;
        }
        if self.seen_requests.insert(stored.clone()) {
            self.facts.requests.push(UserRequest { text: stored });
        }
    }

    fn assistant_block(&mut self, block: &Block) {
        match block {
            Block::ToolInvocation {
                tool_name,
                parameters,
            } => match tool_name.as_str() {
                "TodoWrite" => self.todo_write(parameters),
                "ExitPlanMode" => self.plan(block.param_str("plan").unwrap_or("")),
                "Edit" | "Write" => self.file_edit(block.param_str("file_path").unwrap_or("")),
                "Bash" => self.shell(
                    block.param_str("command").unwrap_or(""),
                    block.param_str("description"),
                ),
                _ => {}
            },
            Block::Reasoning { body } => self.reasoning(body),
            Block::Other => {}
        }
    }

    /// Merge a checklist snapshot: first position wins, last status wins.
    fn todo_write(&mut self, parameters: &serde_json::Map<String, serde_json::Value>) {
        let Some(todos) = parameters.get("todos").and_then(|t| t.as_array()) else {
            return;
        };
        for todo in todos {
            let text = todo.get("content").and_then(|c| c.as_str()).unwrap_or("");
            if text.is_empty() {
                continue;
            }
            let status = todo
                .get("status")
                .and_then(|s| s.as_str())
                .map(TaskStatus::parse_lossy)
                .unwrap_or_default();
            match self.task_index.get(text) {
                Some(&idx) => self.facts.tasks[idx].status = status,
                None => {
                    self.task_index
                        .insert(text.to_string(), self.facts.tasks.len());
                    self.facts.tasks.push(TaskItem {
                        text: text.to_string(),
                        status,
                    });
                }
            }
        }
    }

    fn plan(&mut self, plan: &str) {
        let plan = plan.trim();
        if char_len(plan) < MIN_PLAN_CHARS || is_acknowledgement(plan) {
            return;
        }
        if self.seen_plans.insert(plan.to_string()) {
            self.facts.plans.push(Plan {
                text: plan.to_string(),
            });
        }
    }

    fn file_edit(&mut self, path: &str) {
        let path = path.trim();
        if path.is_empty() {
            return;
        }
        if self.seen_files.insert(path.to_string()) {
            self.facts.file_edits.push(FileEdit {
                path: path.to_string(),
            });
        }
    }

    fn shell(&mut self, command: &str, description: Option<&str>) {
        let command = command.trim();
        if command.is_empty() || char_len(command) >= MAX_COMMAND_CHARS {
            return;
        }
        if self.seen_commands.insert(command.to_string()) {
            self.facts.commands.push(ShellCommand {
                command: command.to_string(),
                description: description
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
            });
        }
    }

    fn reasoning(&mut self, body: &str) {
        let body = body.trim();
        if char_len(body) <= MIN_REASONING_CHARS {
            return;
        }
        let stored = truncate_chars(body, MAX_REASONING_CHARS).to_string();
        if self.seen_reasoning.insert(stored.clone()) {
            self.facts.reasoning.push(Reasoning { text: stored });
        }
    }

    fn finish(self) -> FactSet {
        tracing::debug!(facts = %self.facts.counts(), "extracted facts");
        self.facts
    }
}
