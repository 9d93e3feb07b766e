//! # Sheet Parser
//!
//! Turns a freeform pasted sheet (chords stacked over lyrics, inline
//! bracketed chords, or plain lyrics) into a [`ParsedSheet`].
//!
//! ## Line Classification
//! Pasted sheets have no formal grammar, so each physical line is classified
//! by an ordered list of predicates, first match wins, with one line of
//! lookahead:
//!
//! 1. **Blank** - preserved verbatim in both bodies to keep stanza breaks.
//! 2. **Metadata** - `Title: ...`, `Artist: ...` etc.; stripped into fields
//!    and emitted into neither body.
//! 3. **Implicit title** - the very first contentful line, when it carries no
//!    chord markup and no explicit `Title:` was seen. Fires at most once.
//! 4. **Chord-only** - more than 49% of the whitespace tokens pass the chord
//!    grammar. Merged with the following lyric line when one exists,
//!    otherwise emitted standalone with every token bracket-wrapped.
//! 5. **Bracket-annotated** - contains at least one inline `[Chord]` token.
//! 6. **Plain lyric** - everything else, duplicated verbatim into both
//!    bodies (section headers written as plain text land here too).
//!
//! The parser is total: any line the heuristics cannot place falls through
//! to the plain-lyric path, so `parse` never fails, for any input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chord::{is_chord_token, Chord};
use crate::sheet::ParsedSheet;

/// `key: value` metadata lines. `Artist`/`Author` both map to the artist
/// field, `Tempo`/`BPM` both map to tempo. `CCLI` is recognized so license
/// numbers never leak into the lyrics, but it is not stored.
static METADATA_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Title|Artist|Author|Key|Tempo|BPM|CCLI)\s*[:|-]\s*(.*)$")
        .expect("metadata regex is valid")
});

/// Section headers like `Verse 1` or `Chorus:`. Excluded from chord-line
/// classification even when a header word could read as chord-like.
static SECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Intro|Verse|Chorus|Bridge|Pre-Chorus|Outro|Interlude|Ending)[\s\d]*:?$")
        .expect("section header regex is valid")
});

/// Inline bracket tokens, `[...]` with no nested brackets.
pub(crate) static BRACKET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\[\]]+)\]").expect("bracket token regex is valid"));

/// Parse a freeform pasted sheet into structured fields.
///
/// Never fails: unparseable or ambiguous lines fall through to the
/// plain-lyric path, so the function is total over all string inputs,
/// including empty strings, pure whitespace, and unbalanced brackets.
///
/// # Example
/// ```
/// use chordsheet::parse;
///
/// let sheet = parse("Title: Test Song\nArtist: John Doe\n[C]Hello [G]world");
/// assert_eq!(sheet.title, "Test Song");
/// assert_eq!(sheet.artist, "John Doe");
/// assert_eq!(sheet.chords, "[C]Hello [G]world");
/// assert_eq!(sheet.lyrics, "Hello world");
/// ```
pub fn parse(raw: &str) -> ParsedSheet {
    let lines: Vec<&str> = raw.lines().collect();
    let mut sheet = ParsedSheet::default();
    let mut chord_body: Vec<String> = Vec::new();
    let mut lyric_body: Vec<String> = Vec::new();
    let mut title_seen = false;
    let mut emitted_content = false;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        let trimmed = line.trim();
        i += 1;

        if trimmed.is_empty() {
            chord_body.push(line.to_string());
            lyric_body.push(line.to_string());
            continue;
        }

        if let Some(caps) = METADATA_RE.captures(trimmed) {
            let value = caps[2].trim().to_string();
            match caps[1].to_ascii_lowercase().as_str() {
                "title" => {
                    sheet.title = value;
                    title_seen = true;
                }
                "artist" | "author" => sheet.artist = value,
                "key" => sheet.key = value,
                "tempo" | "bpm" => sheet.tempo = value,
                _ => {} // ccli
            }
            continue;
        }

        // First contentful line with no chord markup and no colon reads as
        // the title. Fires at most once, at the very start.
        if !title_seen
            && !emitted_content
            && !is_chord_line(trimmed)
            && !has_bracket_chord(trimmed)
            && !trimmed.contains(':')
        {
            sheet.title = trimmed.to_string();
            title_seen = true;
            continue;
        }

        emitted_content = true;

        if is_chord_line(trimmed) {
            let next = lines.get(i).copied();
            match next {
                // Chords directly above a metadata line stay standalone and
                // the metadata line gets its own pass.
                Some(n) if METADATA_RE.is_match(n.trim()) => {
                    chord_body.push(bracket_wrap_tokens(line));
                    lyric_body.push(String::new());
                }
                // Chords stacked above a lyric line: interleave them.
                Some(n) if !n.trim().is_empty() && !is_chord_line(n.trim()) => {
                    chord_body.push(merge_chord_lyric(line, n));
                    lyric_body.push(n.to_string());
                    i += 1;
                }
                // Next line absent, blank, or also chords.
                _ => {
                    chord_body.push(bracket_wrap_tokens(line));
                    lyric_body.push(String::new());
                }
            }
            continue;
        }

        if has_bracket_chord(trimmed) {
            chord_body.push(line.to_string());
            lyric_body.push(strip_brackets(line));
            continue;
        }

        // Plain lyric or section header: duplicated so the two bodies keep
        // line-by-line correspondence.
        chord_body.push(line.to_string());
        lyric_body.push(line.to_string());
    }

    // A "title" past 100 characters is almost certainly a misclassified
    // lyric line or paste artifact; blank beats garbage.
    if sheet.title.chars().count() > 100 {
        sheet.title = String::new();
    }

    sheet.chords = chord_body.join("\n");
    sheet.lyrics = lyric_body.join("\n");
    sheet
}

/// More than 49% of the whitespace tokens pass the chord grammar (and the
/// line is not a section header).
pub(crate) fn is_chord_line(line: &str) -> bool {
    if SECTION_RE.is_match(line.trim()) {
        return false;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return false;
    }
    let chordish = tokens.iter().filter(|t| is_chord_token(t)).count();
    chordish * 100 > tokens.len() * 49
}

/// At least one inline bracket token whose contents parse as a chord.
/// `[Chorus]`-style headers fail the chord grammar and stay plain text.
fn has_bracket_chord(line: &str) -> bool {
    BRACKET_RE
        .captures_iter(line)
        .any(|caps| caps[1].parse::<Chord>().is_ok())
}

/// Remove every bracket token and collapse the remaining whitespace runs to
/// single spaces.
fn strip_brackets(line: &str) -> String {
    let stripped = BRACKET_RE.replace_all(line, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply `f` to every whitespace-delimited token, preserving the original
/// whitespace runs between them.
pub(crate) fn map_tokens(line: &str, f: impl Fn(&str) -> String) -> String {
    let mut out = String::new();
    let mut token = String::new();
    for ch in line.chars() {
        if ch.is_whitespace() {
            if !token.is_empty() {
                out.push_str(&f(&token));
                token.clear();
            }
            out.push(ch);
        } else {
            token.push(ch);
        }
    }
    if !token.is_empty() {
        out.push_str(&f(&token));
    }
    out
}

/// Wrap every token of a standalone chord line in brackets, keeping spacing.
fn bracket_wrap_tokens(line: &str) -> String {
    map_tokens(line, |token| format!("[{}]", token))
}

/// Interleave a chord line with the lyric line below it.
///
/// Each chord token is recorded with its starting character column, then the
/// lyric line is walked, copying characters up to each column (padding with
/// spaces when the lyric line is shorter) and inserting `[chord]` there.
/// Chords are zero-width annotations at a column; no lyric character is
/// consumed by the insertion. Columns are counted in chars, which matches
/// the monospaced rendering downstream.
fn merge_chord_lyric(chord_line: &str, lyric_line: &str) -> String {
    let mut tokens: Vec<(usize, String)> = Vec::new();
    let mut start: Option<usize> = None;
    let mut current = String::new();
    for (col, ch) in chord_line.chars().enumerate() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push((s, std::mem::take(&mut current)));
            }
        } else {
            if start.is_none() {
                start = Some(col);
            }
            current.push(ch);
        }
    }
    if let Some(s) = start {
        tokens.push((s, current));
    }

    let lyric: Vec<char> = lyric_line.chars().collect();
    let mut out = String::new();
    let mut pos = 0;
    for (col, token) in tokens {
        while pos < col {
            out.push(lyric.get(pos).copied().unwrap_or(' '));
            pos += 1;
        }
        out.push('[');
        out.push_str(&token);
        out.push(']');
    }
    while pos < lyric.len() {
        out.push(lyric[pos]);
        pos += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_whitespace_input() {
        let sheet = parse("");
        assert_eq!(sheet, ParsedSheet::default());

        let sheet = parse("   \n\t\n  ");
        assert_eq!(sheet.title, "");
        assert_eq!(sheet.chords, "   \n\t\n  ");
        assert_eq!(sheet.lyrics, "   \n\t\n  ");
    }

    #[test]
    fn test_explicit_metadata() {
        let sheet = parse("Title: Test Song\nArtist: John Doe\n[C]Hello [G]world");
        assert_eq!(sheet.title, "Test Song");
        assert_eq!(sheet.artist, "John Doe");
        assert_eq!(sheet.chords, "[C]Hello [G]world");
        assert_eq!(sheet.lyrics, "Hello world");
    }

    #[test]
    fn test_metadata_aliases_and_separators() {
        let sheet = parse("Author - Jane\nBPM | 72\nkey: G\ntempo: 120");
        assert_eq!(sheet.artist, "Jane");
        assert_eq!(sheet.key, "G");
        // later Tempo overwrites the BPM alias
        assert_eq!(sheet.tempo, "120");
        assert_eq!(sheet.chords, "");
        assert_eq!(sheet.lyrics, "");
    }

    #[test]
    fn test_ccli_consumed_but_not_stored() {
        let sheet = parse("CCLI: 1234567\nHello world");
        assert!(!sheet.lyrics.contains("1234567"));
        assert!(!sheet.chords.contains("1234567"));
    }

    #[test]
    fn test_empty_metadata_value() {
        let sheet = parse("Title:\nHello");
        assert_eq!(sheet.title, "");
        // explicit empty title blocks the implicit-title heuristic
        assert_eq!(sheet.lyrics, "Hello");
    }

    #[test]
    fn test_implicit_title() {
        let sheet = parse("Amazing Grace\nAmazing grace how sweet the sound");
        assert_eq!(sheet.title, "Amazing Grace");
        assert_eq!(sheet.lyrics, "Amazing grace how sweet the sound");
    }

    #[test]
    fn test_implicit_title_skips_leading_blank_lines() {
        let sheet = parse("\n\nAmazing Grace\nAmazing grace how sweet the sound");
        assert_eq!(sheet.title, "Amazing Grace");
    }

    #[test]
    fn test_implicit_title_fires_only_once() {
        let sheet = parse("First line\nSecond line");
        assert_eq!(sheet.title, "First line");
        assert_eq!(sheet.lyrics, "Second line");
    }

    #[test]
    fn test_no_implicit_title_from_chord_line() {
        // G, C, G at columns 0, 8, 11
        let sheet = parse("G       C  G\nAmazing grace");
        assert_eq!(sheet.title, "");
        assert_eq!(sheet.chords, "[G]Amazing [C]gra[G]ce");
    }

    #[test]
    fn test_no_implicit_title_from_bracket_line() {
        let sheet = parse("[C]Hello [G]world");
        assert_eq!(sheet.title, "");
        assert_eq!(sheet.lyrics, "Hello world");
    }

    #[test]
    fn test_long_title_discarded() {
        let long_line = "a".repeat(120);
        let sheet = parse(&format!("{}\nmore text", long_line));
        assert_eq!(sheet.title, "");
    }

    #[test]
    fn test_chord_over_lyric_merge() {
        // C at column 0, G at column 6
        let sheet = parse("Title: T\nC     G\nHello friend");
        assert_eq!(sheet.chords, "[C]Hello [G]friend");
        assert_eq!(sheet.lyrics, "Hello friend");
    }

    #[test]
    fn test_merge_pads_short_lyric_line() {
        // G at column 8, past the end of "Hi"
        let sheet = parse("Title: T\nC       G\nHi");
        assert_eq!(sheet.chords, "[C]Hi      [G]");
        assert_eq!(sheet.lyrics, "Hi");
    }

    #[test]
    fn test_merge_strip_roundtrip() {
        let sheet = parse("Title: T\nG          C         G\nAmazing grace how sweet the sound");
        // removing the inserted brackets recovers the lyric line exactly
        let stripped = BRACKET_RE.replace_all(sheet.chords.lines().last().unwrap(), "");
        assert_eq!(stripped, "Amazing grace how sweet the sound");
        assert!(sheet.chords.contains("[G]Amazing"));
        assert!(sheet.chords.contains("[C]"));
    }

    #[test]
    fn test_chord_line_standalone_before_blank() {
        let sheet = parse("Title: T\nG C D\n\nHello");
        let chord_lines: Vec<&str> = sheet.chords.lines().collect();
        assert_eq!(chord_lines, vec!["[G] [C] [D]", "", "Hello"]);
        let lyric_lines: Vec<&str> = sheet.lyrics.lines().collect();
        assert_eq!(lyric_lines, vec!["", "", "Hello"]);
    }

    #[test]
    fn test_chord_line_standalone_at_end() {
        let sheet = parse("Title: T\nG C D");
        assert_eq!(sheet.chords, "[G] [C] [D]");
    }

    #[test]
    fn test_two_chord_lines_do_not_merge() {
        // D, E at columns 0, 6
        let sheet = parse("Title: T\nG C\nD     E\nHello there friend");
        let chord_lines: Vec<&str> = sheet.chords.lines().collect();
        assert_eq!(chord_lines[0], "[G] [C]");
        assert_eq!(chord_lines[1], "[D]Hello [E]there friend");
    }

    #[test]
    fn test_chord_line_before_metadata_not_merged() {
        let sheet = parse("Title: T\nG C\nKey: G");
        assert_eq!(sheet.key, "G");
        assert_eq!(sheet.chords.lines().last().unwrap(), "[G] [C]");
    }

    #[test]
    fn test_section_header_not_chord_line() {
        assert!(!is_chord_line("Chorus"));
        assert!(!is_chord_line("Verse 1"));
        assert!(!is_chord_line("Pre-Chorus:"));
        assert!(!is_chord_line("Bridge 2"));
    }

    #[test]
    fn test_section_header_duplicated_verbatim() {
        let sheet = parse("Title: T\nVerse 1\nHello");
        assert!(sheet.chords.contains("Verse 1"));
        assert!(sheet.lyrics.contains("Verse 1"));
    }

    #[test]
    fn test_plain_text_bracket_header_duplicated() {
        let sheet = parse("Title: T\n[Chorus]\nHello");
        // "Chorus" fails the chord grammar, so the line is plain text
        assert!(sheet.chords.contains("[Chorus]"));
        assert!(sheet.lyrics.contains("[Chorus]"));
    }

    #[test]
    fn test_denylist_protects_lyric_lines() {
        // "Go" and "A" read loosely like chords but must stay lyrics
        let sheet = parse("Title: T\nGo to the store\nA day to remember");
        assert!(sheet.chords.contains("Go to the store"));
        assert!(sheet.lyrics.contains("Go to the store"));
        assert!(sheet.lyrics.contains("A day to remember"));
    }

    #[test]
    fn test_blank_lines_preserved() {
        let sheet = parse("Title: T\nHello\n\nWorld");
        assert_eq!(sheet.chords, "Hello\n\nWorld");
        assert_eq!(sheet.lyrics, "Hello\n\nWorld");
    }

    #[test]
    fn test_unbalanced_brackets_fall_through() {
        let sheet = parse("Title: T\n[C Hello world");
        assert!(sheet.chords.contains("[C Hello world"));
        assert!(sheet.lyrics.contains("[C Hello world"));
    }

    #[test]
    fn test_mixed_sheet_end_to_end() {
        let raw = "Title: Great Is Thy Faithfulness\n\
                   Key: D\n\
                   \n\
                   Verse 1\n\
                   D        G   A\n\
                   Great is thy faithfulness\n\
                   [D]Morning by [A]morning";
        let sheet = parse(raw);
        assert_eq!(sheet.title, "Great Is Thy Faithfulness");
        assert_eq!(sheet.key, "D");
        let chord_lines: Vec<&str> = sheet.chords.lines().collect();
        assert_eq!(chord_lines[0], "");
        assert_eq!(chord_lines[1], "Verse 1");
        assert_eq!(chord_lines[2], "[D]Great is [G]thy [A]faithfulness");
        assert_eq!(chord_lines[3], "[D]Morning by [A]morning");
        let lyric_lines: Vec<&str> = sheet.lyrics.lines().collect();
        assert_eq!(lyric_lines[2], "Great is thy faithfulness");
        assert_eq!(lyric_lines[3], "Morning by morning");
    }
}
