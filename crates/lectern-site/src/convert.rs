//! Markdown-to-page conversion.

use lectern_highlight::{default_highlighter, highlight_blocks, Highlighter};
use lectern_pipeline::catalog::{ContentCatalog, Page, PageOut, PagePub, PageSource};
use lectern_pipeline::playbook::MarkdownConfig;
use lectern_pipeline::services::DocumentConverter;
use pulldown_cmark::{html, Options, Parser};

use crate::paths::{output_path, public_url, root_path_for};

/// Converts classified markdown documents into page objects with embeddable
/// HTML bodies. Fenced code blocks with a declared language get the one-shot
/// highlighting pass when the resolved configuration enables it.
pub struct MarkdownConverter {
    highlighter: Highlighter,
}

impl MarkdownConverter {
    pub fn new() -> Self {
        Self {
            highlighter: default_highlighter(),
        }
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentConverter for MarkdownConverter {
    fn convert(
        &self,
        content: &ContentCatalog,
        config: &MarkdownConfig,
    ) -> anyhow::Result<Vec<Page>> {
        let mut pages = Vec::new();

        for doc in content.pages() {
            let markdown = substitute_attributes(&doc.contents, config);
            let body = mark_code_blocks(&render_markdown(&markdown));
            let body = if config.highlight {
                highlight_blocks(&body, &self.highlighter)
            } else {
                body
            };

            let title = doc
                .frontmatter
                .title
                .clone()
                .or_else(|| first_heading(&markdown))
                .unwrap_or_else(|| doc.stem.clone());

            let out_path = output_path(&doc.component, &doc.stem);
            pages.push(Page {
                title,
                media_type: "text/html".to_string(),
                src: PageSource {
                    stem: doc.stem.clone(),
                    origin: Some(doc.component.clone()),
                },
                out: PageOut {
                    path: out_path.clone(),
                },
                publish: PagePub {
                    url: public_url(&out_path),
                    root_path: root_path_for(&out_path),
                },
                contents: Some(body),
            });
        }

        Ok(pages)
    }
}

fn render_markdown(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Tag fenced blocks that declare a language so the highlight pass can find
/// them.
fn mark_code_blocks(html: &str) -> String {
    html.replace(
        "<pre><code class=\"language-",
        "<pre class=\"highlight\"><code class=\"language-",
    )
}

/// Replace `{name}` references with resolved attribute values.
fn substitute_attributes(markdown: &str, config: &MarkdownConfig) -> String {
    let mut substituted = markdown.to_string();
    for (name, value) in &config.attributes {
        substituted = substituted.replace(&format!("{{{name}}}"), value);
    }
    substituted
}

fn first_heading(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# ").map(|t| t.trim().to_string()))
}
