//! Marker-delimited output blocks consumed by the notifier.
//!
//! Each block is `NAME_START`, its lines, `NAME_END`. The notifier parses
//! them positionally, so empty blocks are never rendered.

use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    CommandSummary,
    Todos,
    Thinking,
    Plan,
}

impl SectionKind {
    /// Marker stem; rendered as `<NAME>_START` / `<NAME>_END`.
    pub fn marker(self) -> &'static str {
        match self {
            SectionKind::CommandSummary => "COMMAND_SUMMARY",
            SectionKind::Todos => "TODOS",
            SectionKind::Thinking => "THINKING",
            SectionKind::Plan => "PLAN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<String>,
}

/// Composed output of one pass, sections in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    sections: Vec<Section>,
}

impl Summary {
    /// Append a section; sections without lines are dropped.
    pub fn push(&mut self, kind: SectionKind, lines: Vec<String>) {
        if lines.is_empty() {
            return;
        }
        self.sections.push(Section { kind, lines });
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Render all sections; empty string when there is nothing to say.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            let marker = section.kind.marker();
            let _ = writeln!(out, "{marker}_START");
            for line in &section.lines {
                let _ = writeln!(out, "{line}");
            }
            let _ = writeln!(out, "{marker}_END");
        }
        out
    }
}
