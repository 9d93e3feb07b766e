//! # Chord Transposer
//!
//! Shifts chord symbols by semitones while preserving suffix qualifiers,
//! slash basses, and the caller's sharp/flat spelling preference.
//!
//! Respelling uses a fixed 12-entry lookup per preference, not key-signature
//! derivation: chord sheets follow a single spelling convention per render
//! session, chosen once via the `prefer_flats` flag, rather than strict
//! enharmonic rules.
//!
//! A token that fails the chord grammar passes through unchanged, so a
//! renderer can call [`transpose`] blindly on every token without
//! pre-filtering.

use crate::chord::{is_chord_token, strip_parens, Chord};
use crate::parser::{is_chord_line, map_tokens, BRACKET_RE};

/// Pitch class spellings when sharps are preferred.
const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Pitch class spellings when flats are preferred.
const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

fn spell(pitch_class: i32, prefer_flats: bool) -> &'static str {
    let idx = pitch_class.rem_euclid(12) as usize;
    if prefer_flats {
        FLAT_NAMES[idx]
    } else {
        SHARP_NAMES[idx]
    }
}

/// Transpose a single chord symbol by `offset` semitones.
///
/// The offset may be any integer; it is reduced modulo 12 before lookup, so
/// negative offsets wrap (offset -1 from C yields B). Root and bass
/// transpose independently; the suffix is carried through verbatim.
/// Surrounding parentheses are preserved. Non-chord input is returned
/// unchanged.
///
/// # Example
/// ```
/// use chordsheet::transpose;
///
/// assert_eq!(transpose("C", 2, false), "D");
/// assert_eq!(transpose("G/B", 2, false), "A/C#");
/// assert_eq!(transpose("F#m7", 1, true), "Gm7");
/// assert_eq!(transpose("hello", 5, false), "hello");
/// ```
pub fn transpose(symbol: &str, offset: i32, prefer_flats: bool) -> String {
    let inner = strip_parens(symbol);
    let wrapped = inner.len() != symbol.len();
    let chord: Chord = match inner.parse() {
        Ok(chord) => chord,
        Err(_) => return symbol.to_string(),
    };

    let offset = offset.rem_euclid(12);
    let mut out = String::new();
    out.push_str(spell(chord.root.pitch_class() + offset, prefer_flats));
    out.push_str(&chord.suffix);
    if let Some(bass) = chord.bass {
        out.push('/');
        out.push_str(spell(bass.pitch_class() + offset, prefer_flats));
    }

    if wrapped {
        format!("({})", out)
    } else {
        out
    }
}

/// Transpose a stored chord-annotated body line by line.
///
/// Lines carrying `[Chord]` brackets get each bracketed token transposed in
/// place; bracket-free lines that classify as chord-only get each bare token
/// transposed (grammar plus denylist gated); everything else passes through
/// verbatim with its spacing intact.
pub fn transpose_sheet(chords: &str, offset: i32, prefer_flats: bool) -> String {
    let mut out: Vec<String> = chords
        .lines()
        .map(|line| transpose_line(line, offset, prefer_flats))
        .collect();
    if chords.ends_with('\n') {
        out.push(String::new());
    }
    out.join("\n")
}

fn transpose_line(line: &str, offset: i32, prefer_flats: bool) -> String {
    if BRACKET_RE.is_match(line) {
        // Bracketed tokens are author-marked chords; non-chord brackets like
        // [Chorus] fail the grammar and pass through inside transpose().
        return BRACKET_RE
            .replace_all(line, |caps: &regex::Captures| {
                format!("[{}]", transpose(&caps[1], offset, prefer_flats))
            })
            .into_owned();
    }
    if is_chord_line(line) {
        return map_tokens(line, |token| {
            if is_chord_token(token) {
                transpose(token, offset, prefer_flats)
            } else {
                token.to_string()
            }
        });
    }
    line.to_string()
}
