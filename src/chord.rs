//! # Chord Symbol Grammar
//!
//! This module defines the chord symbol types and the grammar that decides
//! whether a token is a chord at all.
//!
//! ## Grammar
//! A token matches if, after stripping one layer of surrounding parentheses,
//! it satisfies:
//!
//! ```text
//! ^[A-G](#|b)?(m|min|maj|dim|aug|sus|add)?([0-9]{1,2})?((#|b)[0-9])?(/[A-G](#|b)?)?$
//! ```
//!
//! i.e. a letter root A-G, optional accidental, optional quality word,
//! optional one-or-two-digit extension, optional altered extension, optional
//! slash bass (letter plus accidental only, no further suffixes). The regex
//! is anchored so matching stays linear-time; the transposer is called once
//! per token on every render and must stay cheap.
//!
//! A token that fails the grammar is plain text. It is never partially
//! parsed, and the transposer returns it unchanged.
//!
//! ## Chord-shaped words
//! A handful of short English words ("Go", "Do", "An", ...) look enough like
//! chord symbols that a lyric line could be misread as a chord line. Those
//! words live in an explicit denylist consulted by [`is_chord_token`], which
//! is the check used for line classification and for bare-token
//! transposition. Bracketed tokens (`[Am]`) are author-marked as chords and
//! skip the denylist.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ChordError;

/// Anchored chord symbol grammar. Named groups split the symbol into the
/// transposable root/bass and the opaque suffix carried through verbatim.
static CHORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<root>[A-G][#b]?)(?P<suffix>(?:min|maj|dim|aug|sus|add|m)?(?:[0-9]{1,2})?(?:[#b][0-9])?)(?:/(?P<bass>[A-G][#b]?))?$",
    )
    .expect("chord grammar regex is valid")
});

/// Short common words that also satisfy the chord grammar (or come close
/// enough that paste sources produce them capitalized). Compared
/// case-insensitively. A denylisted token is never accepted as a bare chord.
const CHORD_WORD_DENYLIST: &[&str] = &[
    "a", "am", "an", "as", "at", "be", "do", "go", "in", "is", "it", "on", "or", "so", "add",
];

/// Note letter A-G.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteLetter {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
        }
    }

    /// Semitone offset from C.
    fn semitone(self) -> i32 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }
}

/// Accidental on a root or bass note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

/// A spelled pitch: letter plus accidental, e.g. `F#` or `Bb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Root {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl Root {
    /// Pitch class 0-11 (`C`=0 ... `B`=11, `#` +1, `b` -1, mod 12).
    ///
    /// # Example
    /// ```
    /// use chordsheet::Chord;
    ///
    /// let chord: Chord = "Cb".parse().unwrap();
    /// assert_eq!(chord.root.pitch_class(), 11); // wraps below C
    /// ```
    pub fn pitch_class(self) -> i32 {
        let acc = match self.accidental {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
        };
        (self.letter.semitone() + acc).rem_euclid(12)
    }

    /// Parse a spelled pitch exactly as captured by the grammar (letter plus
    /// optional `#`/`b`).
    fn parse(s: &str) -> Option<Root> {
        let mut chars = s.chars();
        let letter = NoteLetter::from_char(chars.next()?)?;
        let accidental = match chars.next() {
            None => Accidental::Natural,
            Some('#') => Accidental::Sharp,
            Some('b') => Accidental::Flat,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Root { letter, accidental })
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter.as_char())?;
        match self.accidental {
            Accidental::Sharp => write!(f, "#"),
            Accidental::Flat => write!(f, "b"),
            Accidental::Natural => Ok(()),
        }
    }
}

/// A parsed chord symbol.
///
/// The root and bass are independently transposable pitches; the suffix
/// (quality, extension, alteration) is opaque text carried through unchanged.
///
/// # Example
/// ```
/// use chordsheet::Chord;
///
/// let chord: Chord = "C#m7/G".parse().unwrap();
/// assert_eq!(chord.root.to_string(), "C#");
/// assert_eq!(chord.suffix, "m7");
/// assert_eq!(chord.bass.unwrap().to_string(), "G");
/// assert_eq!(chord.to_string(), "C#m7/G");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chord {
    pub root: Root,
    pub suffix: String,
    pub bass: Option<Root>,
}

impl FromStr for Chord {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = strip_parens(s);
        if token.is_empty() {
            return Err(ChordError::Empty);
        }
        let caps = CHORD_RE
            .captures(token)
            .ok_or_else(|| ChordError::NotAChord(s.to_string()))?;
        let root = Root::parse(&caps["root"]).ok_or_else(|| ChordError::NotAChord(s.to_string()))?;
        let bass = match caps.name("bass") {
            Some(m) => Some(Root::parse(m.as_str()).ok_or_else(|| ChordError::NotAChord(s.to_string()))?),
            None => None,
        };
        Ok(Chord {
            root,
            suffix: caps["suffix"].to_string(),
            bass,
        })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.suffix)?;
        if let Some(bass) = self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

/// Strip one layer of surrounding parentheses, e.g. `(C#m)` -> `C#m`.
pub(crate) fn strip_parens(token: &str) -> &str {
    token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .unwrap_or(token)
}

/// True if the token is on the chord-shaped-word denylist.
pub fn is_denylisted(token: &str) -> bool {
    CHORD_WORD_DENYLIST
        .iter()
        .any(|word| token.eq_ignore_ascii_case(word))
}

/// Grammar check plus denylist: should this bare token be treated as a chord?
///
/// This is the gate used for line classification and for transposing bare
/// (unbracketed) tokens. Bracketed tokens are checked against the grammar
/// alone, since the author already marked them as chords.
pub fn is_chord_token(token: &str) -> bool {
    !is_denylisted(token) && token.parse::<Chord>().is_ok()
}
