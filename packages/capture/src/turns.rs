//! Turn assembly and the canonical transcript format.
//!
//! ```text
//! ---
//! platform: ChatGPT
//! url: https://chatgpt.com/share/...
//! ---
//!
//! **Human:**
//! ...
//!
//! ___
//!
//! **Assistant:**
//! ...
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CaptureError, Result};
use crate::platform::Platform;
use crate::types::{Confidence, RawBlock, Role, Transcript, Turn};

/// Opens and closes the metadata header.
pub const HEADER_SENTINEL: &str = "---";

/// Marker line starting every human turn.
pub const HUMAN_MARKER: &str = "**Human:**";

/// Marker line starting every assistant turn.
pub const ASSISTANT_MARKER: &str = "**Assistant:**";

/// Line separating consecutive turns.
pub const TURN_DELIMITER: &str = "___";

impl Role {
    pub fn marker(&self) -> &'static str {
        match self {
            Role::Human => HUMAN_MARKER,
            Role::Assistant => ASSISTANT_MARKER,
        }
    }

    fn from_marker(line: &str) -> Option<Self> {
        match line.trim() {
            HUMAN_MARKER => Some(Role::Human),
            ASSISTANT_MARKER => Some(Role::Assistant),
            _ => None,
        }
    }
}

/// Label blocks as turns, one turn per block.
///
/// When every block carries an explicit role and a position in the combined
/// role-tagged list, blocks are stably sorted by that position and keep their
/// roles. Otherwise roles alternate by index, starting with the human.
pub fn assemble_turns(blocks: Vec<RawBlock>, platform: Platform) -> Transcript {
    let role_tagged = !blocks.is_empty() && blocks.iter().all(RawBlock::is_tagged);

    let turns: Vec<Turn> = if role_tagged {
        let mut blocks = blocks;
        blocks.sort_by_key(|b| b.position);
        blocks
            .into_iter()
            .enumerate()
            .map(|(i, b)| Turn {
                role: b.role.unwrap_or_else(|| Role::by_position(i)),
                text: b.text,
                platform,
            })
            .collect()
    } else {
        blocks
            .into_iter()
            .enumerate()
            .map(|(i, b)| Turn {
                role: Role::by_position(i),
                text: b.text,
                platform,
            })
            .collect()
    };

    let confidence = if role_tagged {
        Confidence::Authoritative
    } else {
        Confidence::Heuristic
    };
    debug!(
        platform = %platform,
        turns = turns.len(),
        confidence = ?confidence,
        "Assembled turns"
    );

    Transcript {
        platform,
        turns,
        confidence,
    }
}

impl Transcript {
    /// Flatten to the canonical transcript string.
    pub fn serialize(&self, source_url: &str) -> String {
        let mut out = String::new();
        out.push_str(HEADER_SENTINEL);
        out.push('\n');
        out.push_str(&format!("platform: {}\n", self.platform.display_name()));
        out.push_str(&format!("url: {}\n", source_url.trim()));
        out.push_str(HEADER_SENTINEL);
        out.push_str("\n\n");

        let body = self
            .turns
            .iter()
            .map(|turn| format!("{}\n{}", turn.role.marker(), turn.text))
            .collect::<Vec<_>>()
            .join(&format!("\n\n{TURN_DELIMITER}\n\n"));
        out.push_str(&body);
        out.push('\n');
        out
    }
}

/// A transcript string read back into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTranscript {
    pub platform: Platform,
    pub url: Option<String>,
    pub turns: Vec<(Role, String)>,
}

/// Read a string produced by [`Transcript::serialize`].
pub fn parse_transcript(text: &str) -> Result<ParsedTranscript> {
    let mut lines = text.lines();

    if lines.next().map(str::trim) != Some(HEADER_SENTINEL) {
        return Err(CaptureError::MalformedTranscript {
            reason: "missing header".to_string(),
        });
    }

    let mut platform = Platform::Unknown;
    let mut url = None;
    let mut header_closed = false;
    for line in lines.by_ref() {
        let line = line.trim();
        if line == HEADER_SENTINEL {
            header_closed = true;
            break;
        }
        if let Some(value) = line.strip_prefix("platform:") {
            platform = Platform::from_display_name(value);
        } else if let Some(value) = line.strip_prefix("url:") {
            url = Some(value.trim().to_string()).filter(|u| !u.is_empty());
        }
    }
    if !header_closed {
        return Err(CaptureError::MalformedTranscript {
            reason: "unterminated header".to_string(),
        });
    }

    let mut turns = Vec::new();
    let mut current: Option<(Role, Vec<&str>)> = None;
    for line in lines {
        if let Some(role) = Role::from_marker(line) {
            if let Some((prev, body)) = current.take() {
                turns.push((prev, join_body(&body)));
            }
            current = Some((role, Vec::new()));
        } else if line.trim() == TURN_DELIMITER {
            continue;
        } else if let Some((_, body)) = current.as_mut() {
            body.push(line);
        }
    }
    if let Some((role, body)) = current {
        turns.push((role, join_body(&body)));
    }

    Ok(ParsedTranscript {
        platform,
        url,
        turns,
    })
}

fn join_body(lines: &[&str]) -> String {
    lines.join("\n").trim().to_string()
}

/// Whether `text` carries the transcript role markers.
pub fn has_role_markers(text: &str) -> bool {
    text.lines()
        .any(|line| matches!(line.trim(), HUMAN_MARKER | ASSISTANT_MARKER))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untagged(texts: &[&str]) -> Vec<RawBlock> {
        texts.iter().map(|t| RawBlock::new(*t)).collect()
    }

    #[test]
    fn alternates_roles_by_position() {
        let transcript = assemble_turns(untagged(&["q1", "a1", "q2", "a2", "q3"]), Platform::Claude);

        let roles: Vec<_> = transcript.turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![Role::Human, Role::Assistant, Role::Human, Role::Assistant, Role::Human]
        );
        assert_eq!(transcript.confidence, Confidence::Heuristic);
    }

    #[test]
    fn tagged_blocks_are_sorted_by_shared_position() {
        // Queried per role: all human blocks first, then assistant blocks.
        let blocks = vec![
            RawBlock::tagged("first question", Role::Human, 0),
            RawBlock::tagged("second question", Role::Human, 3),
            RawBlock::tagged("first answer", Role::Assistant, 1),
            RawBlock::tagged("follow-up answer", Role::Assistant, 2),
        ];
        let transcript = assemble_turns(blocks, Platform::ChatGpt);

        let turns: Vec<_> = transcript
            .turns
            .iter()
            .map(|t| (t.role, t.text.as_str()))
            .collect();
        assert_eq!(
            turns,
            vec![
                (Role::Human, "first question"),
                (Role::Assistant, "first answer"),
                (Role::Assistant, "follow-up answer"),
                (Role::Human, "second question"),
            ]
        );
        assert_eq!(transcript.confidence, Confidence::Authoritative);
    }

    #[test]
    fn mixed_tagging_falls_back_to_alternation() {
        let blocks = vec![
            RawBlock::tagged("tagged", Role::Assistant, 5),
            RawBlock::new("untagged"),
        ];
        let transcript = assemble_turns(blocks, Platform::ChatGpt);

        assert_eq!(transcript.turns[0].role, Role::Human);
        assert_eq!(transcript.turns[0].text, "tagged");
        assert_eq!(transcript.confidence, Confidence::Heuristic);
    }

    #[test]
    fn serializes_header_markers_and_delimiters() {
        let transcript = assemble_turns(untagged(&["Hello there", "Hi! How can I help?"]), Platform::ChatGpt);
        let text = transcript.serialize("https://chatgpt.com/share/abc");

        assert_eq!(
            text,
            "---\nplatform: ChatGPT\nurl: https://chatgpt.com/share/abc\n---\n\n\
             **Human:**\nHello there\n\n___\n\n**Assistant:**\nHi! How can I help?\n"
        );
    }

    #[test]
    fn parses_serialized_transcript() {
        let transcript = assemble_turns(
            untagged(&["How do I sort a Vec?", "Use `sort` or `sort_by_key`.\n\nFor floats use `total_cmp`."]),
            Platform::Grok,
        );
        let parsed = parse_transcript(&transcript.serialize("https://grok.com/share/x1")).unwrap();

        assert_eq!(parsed.platform, Platform::Grok);
        assert_eq!(parsed.url.as_deref(), Some("https://grok.com/share/x1"));
        assert_eq!(parsed.turns.len(), 2);
        assert_eq!(parsed.turns[1].0, Role::Assistant);
        assert!(parsed.turns[1].1.ends_with("`total_cmp`."));
    }

    #[test]
    fn rejects_missing_header() {
        assert!(parse_transcript("**Human:**\nhi").is_err());
        assert!(parse_transcript("---\nplatform: Claude\n").is_err());
    }

    #[test]
    fn detects_role_markers() {
        assert!(has_role_markers("intro\n**Assistant:**\nanswer"));
        assert!(!has_role_markers("Just a normal post about Human: rights"));
    }
}
