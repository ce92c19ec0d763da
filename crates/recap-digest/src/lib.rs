mod clean;
mod compose;
mod render;
mod rules;

pub use clean::clean_reasoning;
pub use compose::{
    compose, command_summary, FALLBACK_SUMMARY, MAX_LIST_LINES, MAX_PLAN_CHARS,
    MIN_THINKING_CHARS,
};
pub use render::{Section, SectionKind, Summary};
pub use rules::{classify_request, classify_shell};
