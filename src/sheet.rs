//! # Parsed Sheet Type
//!
//! Output of the sheet parser. The caller persists the four metadata strings
//! plus the two text bodies as independent flat fields; there is no
//! round-trip requirement back to the original raw paste.
//!
//! ## Field Semantics
//! - `title`, `artist`, `key`, `tempo`: metadata stripped from the paste.
//!   Empty string means "not provided" (never an absent/null distinction).
//! - `chords`: the full text with every chord, whether originally bare,
//!   stacked above a lyric line, or bracketed inline, normalized to `[Chord]`
//!   bracket notation. One line per original visual line, blank lines
//!   preserved.
//! - `lyrics`: the same text with all bracket tokens stripped and whitespace
//!   runs collapsed to single spaces.
//!
//! The two bodies keep line-by-line correspondence so a renderer can walk
//! them in parallel.

use serde::{Deserialize, Serialize};

/// Structured result of parsing a freeform pasted sheet.
///
/// Constructed once per paste/import action and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSheet {
    pub title: String,
    pub artist: String,
    pub key: String,
    pub tempo: String,
    /// Chord-annotated body, every chord in inline `[Chord]` notation.
    pub chords: String,
    /// Chord-free body, bracket tokens removed and whitespace collapsed.
    pub lyrics: String,
}
