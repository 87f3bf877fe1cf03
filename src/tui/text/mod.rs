//! Text utilities: message segmentation, language detection, markdown, wrapping.

mod classify;
mod markdown;
mod segments;
mod wrap;

pub(crate) use classify::{FALLBACK_LABEL, detect_language, resolve_language};
pub(crate) use markdown::style_prose_line;
pub(crate) use segments::{Segment, parse_message_segments};
pub(crate) use wrap::wrap_message;

#[cfg(test)]
mod tests;
