//! Plain-text page renderer.

use docnav_core::{BlockRenderer, anchor_slug};

/// Renders a page into a text buffer, markdown-flavoured.
#[derive(Default)]
pub(crate) struct TextRenderer {
    out: String,
}

impl TextRenderer {
    pub(crate) fn finish(self) -> String {
        self.out
    }

    fn blank_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn fenced(&mut self, info: &str, source: &str) {
        self.blank_line();
        self.out.push_str(&format!("```{info}\n{source}\n```\n"));
    }
}

impl BlockRenderer for TextRenderer {
    fn page_title(&mut self, title: &str) {
        self.out.push_str(&format!("# {title}\n"));
    }

    fn header(&mut self, text: &str) {
        self.blank_line();
        self.out
            .push_str(&format!("## {text}  (#{})\n", anchor_slug(text)));
    }

    fn text(&mut self, text: &str) {
        self.blank_line();
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn code(&mut self, language: Option<&str>, source: &str) {
        self.fenced(language.unwrap_or("text"), source);
    }

    fn mermaid(&mut self, source: &str) {
        self.fenced("mermaid", source);
    }

    fn list(&mut self, items: &[String]) {
        self.blank_line();
        for item in items {
            self.out.push_str(&format!("- {item}\n"));
        }
    }

    fn malformed(&mut self, kind: &str, _raw: &serde_json::Value) {
        tracing::warn!(kind, "skipping malformed block");
        self.blank_line();
        self.out
            .push_str(&format!("[skipped block: unsupported '{kind}' content]\n"));
    }
}
