use recap_core::{Block, Content, Event, Role};
use serde::Deserialize;
use serde_json::Value;

/// Transcript line shape. Only `message` is read; `type`, `uuid`,
/// timestamps and the rest are ignored.
#[derive(Deserialize)]
struct RawRecord {
    message: Option<RawMessage>,
}

#[derive(Deserialize)]
struct RawMessage {
    #[serde(default)]
    role: Role,
    #[serde(default)]
    content: Value,
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum RawBlock {
    #[serde(rename = "tool_use")]
    ToolUse {
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: Value,
    },
    #[serde(rename = "thinking")]
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    #[serde(other)]
    Other,
}

/// Decode one parsed transcript record into an [`Event`].
///
/// Returns `None` when the record has no `message` object or its content is
/// neither a string nor a block array. Individual blocks that do not decode
/// become [`Block::Other`] instead of failing the record.
///
/// Expected format per line:
/// ```json
/// {"type":"assistant","message":{"role":"assistant","content":[{"type":"tool_use","name":"Bash","input":{"command":"ls"}}]}}
/// ```
pub fn decode_event(record: Value) -> Option<Event> {
    let raw: RawRecord = serde_json::from_value(record).ok()?;
    let message = raw.message?;
    let content = match message.content {
        Value::String(s) => Content::Text(s),
        Value::Array(items) => Content::Blocks(items.into_iter().map(decode_block).collect()),
        _ => return None,
    };
    Some(Event {
        role: message.role,
        content,
    })
}

fn decode_block(value: Value) -> Block {
    match serde_json::from_value::<RawBlock>(value) {
        Ok(RawBlock::ToolUse { name, input }) => Block::ToolInvocation {
            tool_name: name,
            parameters: match input {
                Value::Object(map) => map,
                _ => serde_json::Map::new(),
            },
        },
        Ok(RawBlock::Thinking { thinking }) => Block::Reasoning { body: thinking },
        Ok(RawBlock::Other) | Err(_) => Block::Other,
    }
}
