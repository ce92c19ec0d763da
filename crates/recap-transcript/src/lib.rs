mod extract;
mod reader;
mod record;

pub use extract::{
    extract_facts, is_acknowledgement, MAX_COMMAND_CHARS, MAX_REASONING_CHARS,
    MAX_REQUEST_CHARS, MIN_PLAN_CHARS, MIN_REASONING_CHARS, MIN_REQUEST_CHARS,
};
pub use reader::{read_tail, ReadError, ReadStats, TranscriptTail};
pub use record::decode_event;
