//! HTML rendering for the web form.

use crate::models::ExportFormat;

const DEFAULT_QUERY: &str = "Large Language Models";
const DEFAULT_MAX_RESULTS: usize = 5;

/// Everything one rendering of the page shows
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub query: String,
    pub max_results: usize,
    /// Report or search message shown in the results box
    pub results: Option<String>,
    /// Whether the export controls are visible
    pub show_export: bool,
    pub format: ExportFormat,
    /// File name of the last export, served under `/files/`
    pub download: Option<String>,
    /// Export status line
    pub notice: Option<String>,
}

impl Default for PageView {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            max_results: DEFAULT_MAX_RESULTS,
            results: None,
            show_export: false,
            format: ExportFormat::Pdf,
            download: None,
            notice: None,
        }
    }
}

impl PageView {
    pub fn render(&self) -> String {
        let mut html = String::with_capacity(4096);
        html.push_str(HEAD);

        html.push_str(&format!(
            r#"<form method="post" action="/search">
<label>Search keywords <input type="text" name="query" value="{}"></label>
<label>Number of papers <input type="number" name="max_results" min="{}" max="{}" value="{}"></label>
<button type="submit">🔍 Search</button>
</form>
"#,
            escape_html(&self.query),
            super::MIN_RESULTS,
            super::MAX_RESULTS,
            self.max_results,
        ));

        if let Some(results) = &self.results {
            html.push_str(&format!(
                "<h2>📄 Results</h2>\n<pre class=\"results\">{}</pre>\n",
                escape_html(results)
            ));
        }

        if self.show_export {
            html.push_str("<form method=\"post\" action=\"/export\">\n<label>Export format <select name=\"format\">\n");
            for format in ExportFormat::ALL {
                let selected = if format == self.format { " selected" } else { "" };
                html.push_str(&format!(
                    "<option value=\"{0}\"{1}>{0}</option>\n",
                    format.name(),
                    selected
                ));
            }
            html.push_str("</select></label>\n<button type=\"submit\">📤 Export</button>\n</form>\n");
        }

        if let Some(notice) = &self.notice {
            html.push_str(&format!("<p class=\"notice\">{}</p>\n", escape_html(notice)));
        }

        if let Some(file) = &self.download {
            html.push_str(&format!(
                "<p class=\"download\">📁 <a href=\"/files/{0}\" download>{0}</a></p>\n",
                escape_html(file)
            ));
        }

        html.push_str(TAIL);
        html
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>ScholarSift</title>
<style>
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
form { display: flex; gap: 1rem; align-items: end; flex-wrap: wrap; margin-bottom: 1rem; }
pre.results { white-space: pre-wrap; background: #f6f8fa; padding: 1rem; border-radius: 6px; }
</style>
</head>
<body>
<h1>🧠 ScholarSift literature assistant</h1>
<p>Search arXiv by keyword and export the results as Text, Word, PDF or Excel.</p>
"#;

const TAIL: &str = "</body>\n</html>\n";
