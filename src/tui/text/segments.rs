//! Message segmentation: split assistant replies into text and fenced code blocks.

use std::sync::LazyLock;

use regex::Regex;

/// Fenced code block: ```lang\n...``` with the tag only counting when it sits
/// directly against the opening fence. Non-greedy body, so unterminated fences
/// never match and fall through as ordinary text.
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(\w+)?\n?(.*?)```").expect("fence pattern compiles"));

/// One contiguous, classified portion of a parsed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    Text(&'a str),
    Code {
        /// Provisional language tag from the fence; empty when the fence had none.
        language: &'a str,
        content: &'a str,
    },
}

impl<'a> Segment<'a> {
    pub(crate) fn content(&self) -> &'a str {
        match self {
            Segment::Text(content) => content,
            Segment::Code { content, .. } => content,
        }
    }
}

/// Parse message content into an ordered list of text and code segments.
///
/// Gap text and block bodies are trimmed and dropped when empty. When nothing
/// survives (no fence in the input, or only empty blocks), the entire raw
/// input comes back as a single untrimmed `Text` segment; the multi-segment
/// path trims, the fallback path does not.
pub(crate) fn parse_message_segments(content: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in FENCE_RE.captures_iter(content) {
        let fence = caps.get(0).expect("whole match always present");
        if fence.start() > last {
            let before = content[last..fence.start()].trim();
            if !before.is_empty() {
                segments.push(Segment::Text(before));
            }
        }

        let language = caps.get(1).map_or("", |tag| tag.as_str());
        let body = caps.get(2).map_or("", |body| body.as_str()).trim();
        if !body.is_empty() {
            segments.push(Segment::Code {
                language,
                content: body,
            });
        }

        last = fence.end();
    }

    if last < content.len() {
        let after = content[last..].trim();
        if !after.is_empty() {
            segments.push(Segment::Text(after));
        }
    }

    if segments.is_empty() {
        segments.push(Segment::Text(content));
    }

    segments
}
