use serde::{Deserialize, Serialize};

// ── Events (decoded transcript records) ──

/// Speaker of a transcript record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
    #[default]
    #[serde(other)]
    Other,
}

/// One decoded transcript record. Never written back to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub role: Role,
    pub content: Content,
}

/// Message content: either a plain string or an ordered list of blocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Text(String),
    Blocks(Vec<Block>),
}

/// A unit inside an assistant message.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    ToolInvocation {
        tool_name: String,
        parameters: serde_json::Map<String, serde_json::Value>,
    },
    Reasoning {
        body: String,
    },
    /// Text, images, tool results, anything the extractor does not read.
    Other,
}

impl Block {
    /// String parameter of a tool invocation; `None` for other blocks or
    /// when the key is absent or not a string.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        match self {
            Block::ToolInvocation { parameters, .. } => {
                parameters.get(key).and_then(|v| v.as_str())
            }
            _ => None,
        }
    }
}

// ── Facts ──

/// Checklist status carried by a `TodoWrite` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Parse a status string; anything unrecognized is `Pending`.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "completed" => TaskStatus::Completed,
            "in_progress" => TaskStatus::InProgress,
            _ => TaskStatus::Pending,
        }
    }

    /// Glyph shown in front of a task line.
    pub fn glyph(self) -> &'static str {
        match self {
            TaskStatus::Completed => "✅",
            TaskStatus::InProgress => "🔄",
            TaskStatus::Pending => "⏳",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::InProgress => write!(f, "in_progress"),
            TaskStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub text: String,
    pub status: TaskStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reasoning {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEdit {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellCommand {
    pub command: String,
    pub description: Option<String>,
}

/// Fact kinds that are tracked across invocations. The tag is mixed into the
/// fingerprint so equal text under two kinds stays two entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FactKind {
    Task,
    Request,
    Plan,
    Reasoning,
}

impl FactKind {
    pub fn tag(self) -> &'static str {
        match self {
            FactKind::Task => "task",
            FactKind::Request => "request",
            FactKind::Plan => "plan",
            FactKind::Reasoning => "reasoning",
        }
    }
}

/// A fact whose primary text identifies it across invocations.
pub trait Reportable {
    const KIND: FactKind;

    fn primary_text(&self) -> &str;
}

impl Reportable for TaskItem {
    const KIND: FactKind = FactKind::Task;

    fn primary_text(&self) -> &str {
        &self.text
    }
}

impl Reportable for UserRequest {
    const KIND: FactKind = FactKind::Request;

    fn primary_text(&self) -> &str {
        &self.text
    }
}

impl Reportable for Plan {
    const KIND: FactKind = FactKind::Plan;

    fn primary_text(&self) -> &str {
        &self.text
    }
}

impl Reportable for Reasoning {
    const KIND: FactKind = FactKind::Reasoning;

    fn primary_text(&self) -> &str {
        &self.text
    }
}

/// All facts extracted from one pass, each list in event order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactSet {
    pub tasks: Vec<TaskItem>,
    pub plans: Vec<Plan>,
    pub reasoning: Vec<Reasoning>,
    pub requests: Vec<UserRequest>,
    pub file_edits: Vec<FileEdit>,
    pub commands: Vec<ShellCommand>,
}

impl FactSet {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
            && self.plans.is_empty()
            && self.reasoning.is_empty()
            && self.requests.is_empty()
            && self.file_edits.is_empty()
            && self.commands.is_empty()
    }

    pub fn counts(&self) -> FactCounts {
        FactCounts {
            tasks: self.tasks.len(),
            plans: self.plans.len(),
            reasoning: self.reasoning.len(),
            requests: self.requests.len(),
            file_edits: self.file_edits.len(),
            commands: self.commands.len(),
        }
    }
}

/// Per-kind sizes of a `FactSet`, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactCounts {
    pub tasks: usize,
    pub plans: usize,
    pub reasoning: usize,
    pub requests: usize,
    pub file_edits: usize,
    pub commands: usize,
}

impl std::fmt::Display for FactCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "tasks={} plans={} reasoning={} requests={} files={} commands={}",
            self.tasks, self.plans, self.reasoning, self.requests, self.file_edits, self.commands
        )
    }
}
