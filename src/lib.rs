//! # chordsheet
//!
//! A parser and transposer for chords-over-lyrics song sheets.
//!
//! Two cooperating components, both pure functions over plain text:
//!
//! - [`parse`] takes a freeform pasted sheet (chords stacked over lyrics,
//!   inline bracketed chords, or plain lyrics) and produces a
//!   [`ParsedSheet`]: title/artist/key/tempo metadata plus a chord-annotated
//!   body normalized to inline `[Chord]` notation and a chord-free lyric
//!   body, aligned line by line.
//! - [`transpose`] shifts a single chord symbol by semitones, preserving
//!   suffix qualifiers and slash basses; [`transpose_sheet`] applies it
//!   across a stored chord body.
//!
//! Both are total: `parse` never fails for any input, and `transpose`
//! returns non-chord tokens unchanged.
//!
//! ```rust
//! use chordsheet::{parse, transpose_sheet};
//!
//! let sheet = parse("Title: Test Song\n[C]Hello [G]world");
//! assert_eq!(sheet.title, "Test Song");
//! assert_eq!(sheet.lyrics, "Hello world");
//!
//! let up_two = transpose_sheet(&sheet.chords, 2, false);
//! assert_eq!(up_two, "[D]Hello [A]world");
//! ```

pub mod chord;
pub mod error;
pub mod parser;
pub mod sheet;
pub mod transpose;

pub use chord::{is_chord_token, Accidental, Chord, NoteLetter, Root};
pub use error::ChordError;
pub use parser::parse;
pub use sheet::ParsedSheet;
pub use transpose::{transpose, transpose_sheet};
