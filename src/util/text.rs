// src/util/text.rs
use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref BLOCK_PREFIX_REGEX: Regex =
        Regex::new(r"^\s*(?:#{1,6}\s+|>\s*|[-*+]\s+(?:\[[ xX]\]\s+)?|\d+[.)]\s+)")
            .expect("Failed to compile block prefix regex");
    static ref INLINE_MARK_REGEX: Regex =
        Regex::new(r"(\*\*|__|~~|`|\*|_)").expect("Failed to compile inline mark regex");
    static ref LINK_REGEX: Regex =
        Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("Failed to compile link regex");
    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]+>").expect("Failed to compile tag regex");
}

/// Plain-text excerpt of markdown content for list views.
///
/// This function:
/// 1. Takes the first line with visible text, skipping code fences and rules
/// 2. Strips block markers (headings, quotes, list bullets), inline emphasis,
///    link targets and HTML tags
/// 3. Decodes HTML entities
/// 4. Truncates to `max_chars` characters, marking the cut with `…`
///
/// # Examples
///
/// ```
/// use notekeep::util::text::excerpt;
///
/// assert_eq!(excerpt("## Agenda\n- item", 60), "Agenda");
/// assert_eq!(excerpt("a [link](http://x) here", 60), "a link here");
/// ```
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    let line = markdown
        .lines()
        .map(str::trim)
        .filter(|l| !l.starts_with("```") && !is_rule(l))
        .map(clean_line)
        .find(|l| !l.is_empty())
        .unwrap_or_default();

    truncate(&line, max_chars)
}

fn clean_line(line: &str) -> String {
    let line = BLOCK_PREFIX_REGEX.replace(line, "");
    let line = LINK_REGEX.replace_all(&line, "$1");
    let line = TAG_REGEX.replace_all(&line, "");
    let line = INLINE_MARK_REGEX.replace_all(&line, "");
    decode_html_entities(&line).trim().to_string()
}

// `---`, `***`, `___`, optionally spaced
fn is_rule(line: &str) -> bool {
    let marks: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    marks.len() >= 3 && ['-', '*', '_'].iter().any(|m| marks.iter().all(|c| c == m))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("What is a Tree?", "What is a Tree?")]
    #[case("# Heading\nbody", "Heading")]
    #[case("\n\n  \n> quoted **bold** text", "quoted bold text")]
    #[case("- [ ] open task", "open task")]
    #[case("1. first", "first")]
    #[case("```rust\nfn main() {}\n```", "fn main() {}")]
    #[case("---\nafter rule", "after rule")]
    #[case("Trees &amp; Graphs", "Trees & Graphs")]
    #[case("<div><em>html</em> text</div>", "html text")]
    #[case("![img](a.png)caption", "imgcaption")]
    #[case("", "")]
    fn test_excerpt(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(excerpt(input, 60), expected);
    }

    #[test]
    fn given_long_line_when_excerpting_then_truncates_with_ellipsis() {
        let result = excerpt("abcdefghij", 5);

        assert_eq!(result, "abcd…");
        assert_eq!(result.chars().count(), 5);
    }

    #[test]
    fn given_multibyte_text_when_truncating_then_cuts_on_char_boundary() {
        assert_eq!(excerpt("äöüäöü", 4), "äöü…");
    }
}
