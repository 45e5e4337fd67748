//! Static HTML page: sidebar with the product-line multi-select state and the
//! chart grid.

use std::fmt::Write as _;

use crate::dashboard::panels::Section;
use crate::dashboard::PanelOutput;
use crate::filter::ProductLineSelection;

pub const PAGE_TITLE: &str = "Supermarket Sales Dashboard";

const STYLE: &str = "\
body{margin:0;font-family:sans-serif;display:flex;color:#282828}\
aside{width:240px;min-height:100vh;padding:16px;background:#f0f2f6;box-sizing:border-box}\
main{flex:1;padding:16px 32px}\
.grid{display:grid;grid-template-columns:1fr 1fr;gap:24px}\
figure{margin:0}\
figure img{width:100%;height:auto}\
figcaption{font-size:0.9em;line-height:1.4;margin-top:8px}\
.info{padding:12px 16px;background:#e8f0fe;border-radius:6px}\
ul{list-style:none;padding:0}";

/// What the main area shows
#[derive(Debug, Clone, Copy)]
pub enum PageBody<'a> {
    /// The prompt shown instead of charts
    Message(&'a str),
    /// Rendered panels with their captions
    Panels(&'a [PanelOutput]),
}

/// Escape text for use in HTML content and attribute values
#[must_use]
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

/// Build the whole page
#[must_use]
pub fn render_page(catalog: &[String], selection: &ProductLineSelection, body: PageBody<'_>) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{PAGE_TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n"
    );

    html.push_str("<aside>\n<h2>Dashboard filters</h2>\n<h3>Product lines</h3>\n<ul>\n");
    for line in catalog {
        let mark = if selection.contains(line) { "&#9745;" } else { "&#9744;" };
        let _ = writeln!(html, "<li>{mark} {}</li>", escape_html(line));
    }
    html.push_str("</ul>\n</aside>\n<main>\n");
    let _ = writeln!(html, "<h1>{PAGE_TITLE}</h1>");

    match body {
        PageBody::Message(message) => {
            let _ = writeln!(html, "<p class=\"info\">{}</p>", escape_html(message));
        }
        PageBody::Panels(panels) => {
            for section in Section::ALL {
                let _ = writeln!(html, "<h2>{}</h2>\n<div class=\"grid\">", section.title());
                let placed = section
                    .panels()
                    .into_iter()
                    .filter_map(|slot| panels.iter().find(|p| p.panel == slot));
                for panel in placed {
                    let _ = writeln!(
                        html,
                        "<figure id=\"panel-{}\">\n<img src=\"{}\" alt=\"{}\">\n<figcaption>{}</figcaption>\n</figure>",
                        panel.number,
                        escape_html(&panel.file_name),
                        escape_html(&panel.title),
                        escape_html(&panel.caption),
                    );
                }
                html.push_str("</div>\n");
            }
        }
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}
