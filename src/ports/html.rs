// src/ports/html.rs
use chrono::DateTime;
use html_escape::encode_text;
use tracing::instrument;

use crate::domain::{Note, Timestamp};
use crate::ports::markdown::markdown_to_html;

/// Full HTML page for the markdown preview of one note.
#[derive(Debug, Default)]
pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "debug", skip(self, note), fields(note_id = %note.id))]
    pub fn render(&self, note: &Note) -> String {
        let title = encode_text(&note.title);
        let body = markdown_to_html(&note.content);
        let tags = if note.tags.is_empty() {
            "No tags".to_string()
        } else {
            note.tags
                .iter()
                .map(|t| format!(r#"<span class="tag">{}</span>"#, encode_text(t)))
                .collect::<Vec<_>>()
                .join("")
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <style>
        body {{
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            line-height: 1.6;
            max-width: 800px;
            margin: 2rem auto;
            padding: 0 1rem;
            background-color: #f5f5f5;
        }}
        .note {{
            background: white;
            border-radius: 8px;
            padding: 2rem;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }}
        pre {{
            white-space: pre-wrap;
            word-wrap: break-word;
            background-color: #f8f9fa;
            padding: 1rem;
            border-radius: 4px;
            overflow-x: auto;
        }}
        code {{
            background-color: #f0f0f0;
            padding: 2px 4px;
            border-radius: 3px;
            font-family: monospace;
        }}
        .note-info {{
            margin-top: 1rem;
            padding-top: 1rem;
            border-top: 1px solid #eee;
            font-size: 0.9em;
            color: #666;
        }}
        .tag {{
            display: inline-block;
            background: #e9ecef;
            padding: 2px 8px;
            border-radius: 4px;
            margin-right: 4px;
            font-size: 0.8em;
        }}
    </style>
</head>
<body>
    <div class="note">
        <h1>{title}</h1>
        <div class="note-body">{body}</div>
        <div class="note-info">
            <div>Note ID: {note_id}</div>
            <div>Updated: {updated}</div>
            <div class="tags">Tags: {tags}</div>
        </div>
    </div>
</body>
</html>"#,
            title = title,
            body = body,
            note_id = encode_text(&note.id),
            updated = format_timestamp(note.updated_at),
            tags = tags,
        )
    }
}

/// `YYYY-MM-DD HH:MM` in UTC, or the raw number if out of range.
pub fn format_timestamp(ts: Timestamp) -> String {
    DateTime::from_timestamp_millis(ts)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| ts.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn note(title: &str, content: &str, tags: &[&str]) -> Note {
        Note {
            id: "n1".to_string(),
            title: title.to_string(),
            content: content.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            folder_id: None,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn given_markdown_note_when_rendering_then_body_is_html() {
        let html = HtmlPresenter::new().render(&note("Title", "# Heading\n\ntext", &[]));

        assert!(html.contains("<h1>Heading</h1>"));
        assert!(html.contains("No tags"));
    }

    #[test]
    fn given_markup_in_title_when_rendering_then_escaped() {
        let html = HtmlPresenter::new().render(&note("<b>x</b>", "", &["a&b"]));

        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains(r#"<span class="tag">a&amp;b</span>"#));
    }

    #[rstest]
    #[case(0, "1970-01-01 00:00")]
    #[case(1_700_000_000_000, "2023-11-14 22:13")]
    fn test_format_timestamp(#[case] ts: Timestamp, #[case] expected: &str) {
        assert_eq!(format_timestamp(ts), expected);
    }
}
