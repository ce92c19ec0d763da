/// Affirmations, connectives and self-talk that carry no content. Longer
/// phrases come before their prefixes.
const FILLER_PHRASES: &[&str] = &[
    "좋습니다.",
    "완벽합니다.",
    "해야 합니다",
    "하겠습니다",
    "사용자가",
    "그리고",
    "하지만",
    "이제",
    "제가",
    "Perfect.",
    "Perfect!",
    "Great.",
    "Great!",
    "Good.",
    "Okay,",
    "Okay.",
    "Alright,",
    "Now,",
    "Let me ",
    "I need to ",
    "I'll ",
    "...",
    "…",
    "!",
];

const SENTENCE_TERMINATORS: &[char] = &['.', '?', '。', '\n'];

/// Reduce a reasoning excerpt to its first meaningful sentence.
///
/// Strips filler phrases, cuts at the first sentence terminator, and
/// collapses whitespace. The result may be empty.
pub fn clean_reasoning(text: &str) -> String {
    let mut cleaned = text.to_string();
    for phrase in FILLER_PHRASES {
        cleaned = cleaned.replace(phrase, "");
    }
    let trimmed = cleaned.trim();
    let first = match trimmed.find(SENTENCE_TERMINATORS) {
        Some(idx) => &trimmed[..idx],
        None => trimmed,
    };
    first.split_whitespace().collect::<Vec<_>>().join(" ")
}
