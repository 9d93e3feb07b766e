//! # Error Types
//!
//! This module defines the error type for chord symbol parsing.
//!
//! The sheet parser itself is total and never fails; only [`crate::Chord`]'s
//! `FromStr` implementation produces errors, and the transposer maps them to
//! pass-through (a token that is not a chord is returned unchanged).
//!
//! ## Usage
//! ```rust
//! use chordsheet::{Chord, ChordError};
//!
//! match "hello".parse::<Chord>() {
//!     Ok(chord) => println!("root: {}", chord.root),
//!     Err(ChordError::NotAChord(token)) => println!("'{}' is plain text", token),
//!     Err(e) => println!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    /// The token was empty (or only parentheses).
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordError;
    /// let err = ChordError::Empty;
    /// assert_eq!(err.to_string(), "empty chord symbol");
    /// ```
    #[error("empty chord symbol")]
    Empty,

    /// The token does not match the chord grammar.
    ///
    /// Anything that fails the grammar is plain text as far as the rest of
    /// the crate is concerned; it is never partially parsed or transposed.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::ChordError;
    /// let err = ChordError::NotAChord("hello".to_string());
    /// assert_eq!(err.to_string(), "not a chord symbol: 'hello'");
    /// ```
    #[error("not a chord symbol: '{0}'")]
    NotAChord(String),
}
