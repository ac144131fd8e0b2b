//! Citation pill recovery.
//!
//! Providers render a source label next to a "+N" badge. Once flattened to
//! text the pill shows up either split over two lines ("Reddit" / "+6") or
//! inline ("Reddit +6"). A single line may hold several inline pills, but
//! the last badge must end the line and every earlier one must be followed by
//! a joiner, so prose such as "rated it +5 stars" is never a pill.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Citation;

lazy_static! {
    /// A whole line that is only a badge.
    static ref BADGE_LINE: Regex = Regex::new(r"^\+(\d+)$").unwrap();

    /// An inline badge. The `\b` keeps "+6a" from matching.
    static ref INLINE_BADGE: Regex = Regex::new(r"\+(\d+)\b").unwrap();

    /// Joiners that may sit between two inline pills.
    static ref LEADING_JOINER: Regex =
        Regex::new(r"^(?:(?:and\s+|[&,;·|/])\s*)+").unwrap();

    /// What may follow a badge that is not the last on its line.
    static ref NEXT_PILL: Regex = Regex::new(r"^\s*(?:and\s|[&,;·|/])").unwrap();
}

/// Recover `(source, count)` pairs from `text`, in order of appearance.
pub fn parse_citations(text: &str) -> Vec<Citation> {
    split_citations(text).1
}

/// Like [`parse_citations`], also returning the lines that were not citations.
pub fn split_citations(text: &str) -> (String, Vec<Citation>) {
    let lines: Vec<&str> = text.lines().collect();
    let mut citations = Vec::new();
    let mut passthrough = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();
        if line.is_empty() {
            passthrough.push(lines[i]);
            i += 1;
            continue;
        }

        // Split shape: "Source" then "+N" on the next non-empty line.
        if let Some((badge_index, count)) = next_badge(&lines, i + 1) {
            if !BADGE_LINE.is_match(line) {
                if let Some(count) = count {
                    citations.push(Citation::new(line, count));
                }
                i = badge_index + 1;
                continue;
            }
        }

        // Inline shape: "Source +N", possibly several per line.
        let inline = inline_citations(line);
        if inline.is_empty() {
            passthrough.push(lines[i]);
        } else {
            citations.extend(inline);
        }
        i += 1;
    }

    (passthrough.join("\n"), citations)
}

/// Index and parsed count of the next non-empty line after `from`, if that
/// line is a bare badge. A badge whose count overflows yields `None` count.
fn next_badge(lines: &[&str], from: usize) -> Option<(usize, Option<u32>)> {
    let (index, line) = lines
        .iter()
        .enumerate()
        .skip(from)
        .find(|(_, l)| !l.trim().is_empty())?;

    let caps = BADGE_LINE.captures(line.trim())?;
    Some((index, caps[1].parse().ok()))
}

/// Inline pills on `line`. Empty unless the whole line is a joiner-separated
/// run of pills ending in a badge.
fn inline_citations(line: &str) -> Vec<Citation> {
    let mut citations = Vec::new();
    let mut segment_start = 0;

    for caps in INLINE_BADGE.captures_iter(line) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let rest = &line[whole.end()..];
        if !rest.trim().is_empty() && !NEXT_PILL.is_match(rest) {
            return Vec::new();
        }
        let source = clean_source(&line[segment_start..whole.start()]);
        segment_start = whole.end();

        let Ok(count) = caps[1].parse::<u32>() else {
            continue;
        };
        if source.is_empty() {
            continue;
        }
        citations.push(Citation::new(source, count));
    }

    if !line[segment_start..].trim().is_empty() {
        return Vec::new();
    }
    citations
}

fn clean_source(segment: &str) -> String {
    let trimmed = segment.trim();
    LEADING_JOINER.replace(trimmed, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_single() {
        assert_eq!(parse_citations("Reddit +6"), vec![Citation::new("Reddit", 6)]);
    }

    #[test]
    fn split_across_lines() {
        assert_eq!(parse_citations("Reddit\n+6"), vec![Citation::new("Reddit", 6)]);
    }

    #[test]
    fn split_skips_blank_lines_between() {
        assert_eq!(
            parse_citations("Stack Overflow\n\n  +12  \nmore text"),
            vec![Citation::new("Stack Overflow", 12)]
        );
    }

    #[test]
    fn several_inline_on_one_line() {
        assert_eq!(
            parse_citations("Reddit +6 and Wikipedia +2"),
            vec![Citation::new("Reddit", 6), Citation::new("Wikipedia", 2)]
        );
    }

    #[test]
    fn joiner_stripping_leaves_words_alone() {
        assert_eq!(
            parse_citations("Android Developers +3"),
            vec![Citation::new("Android Developers", 3)]
        );
    }

    #[test]
    fn no_citations() {
        assert!(parse_citations("no citations").is_empty());
        assert!(parse_citations("").is_empty());
    }

    #[test]
    fn repeated_sources_are_kept() {
        assert_eq!(
            parse_citations("Reddit +6\nReddit +2\nReddit +6"),
            vec![
                Citation::new("Reddit", 6),
                Citation::new("Reddit", 2),
                Citation::new("Reddit", 6),
            ]
        );
    }

    #[test]
    fn malformed_candidates_are_dropped_individually() {
        let text = "+5\nGitHub +99999999999\nMDN +3\nC++ is fun\nversion +4a";
        assert_eq!(parse_citations(text), vec![Citation::new("MDN", 3)]);
    }

    #[test]
    fn plus_numbers_inside_prose_are_not_pills() {
        assert!(parse_citations("I rated it +5 stars overall").is_empty());
        assert!(parse_citations("Increment the counter with x +1 each loop").is_empty());
        assert!(parse_citations("Saw +3 warnings, then Reddit +6").is_empty());
    }

    #[test]
    fn plus_numbers_inside_code_are_not_pills() {
        let (rest, citations) = split_citations("let y = x +1;\nfor i in 0..n { total +2 * i }");
        assert!(citations.is_empty());
        assert_eq!(rest, "let y = x +1;\nfor i in 0..n { total +2 * i }");
    }

    #[test]
    fn joiner_variants_between_pills() {
        assert_eq!(
            parse_citations("MDN +1, Rust Blog +4 · Reddit +2"),
            vec![
                Citation::new("MDN", 1),
                Citation::new("Rust Blog", 4),
                Citation::new("Reddit", 2),
            ]
        );
    }

    #[test]
    fn split_passes_unmatched_lines_through() {
        let (rest, citations) = split_citations("Here is the answer.\nReddit\n+6\nThanks!");
        assert_eq!(citations, vec![Citation::new("Reddit", 6)]);
        assert_eq!(rest, "Here is the answer.\nThanks!");
    }
}
