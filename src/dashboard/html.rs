use std::fmt::Write;

use super::view::{
    ExtensionsView, Grid, PageView, SystemInfoView, EXTENSIONS_HEADING, NO_EXTENSIONS,
    REFRESH_LABEL, SYSTEM_INFO_HEADING,
};

/// Path the refresh form posts to
pub const REFRESH_PATH: &str = "/refresh";

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:72rem;padding:0 1rem}\
.error{background:#fdecea;color:#611a15;padding:.75rem 1rem;border-radius:.25rem}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ddd;padding:.35rem .6rem;text-align:left}\
th{background:#f5f5f5}";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub fn render_page(page: &PageView) -> String {
    let mut html = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>{title}</h1>\n<p>{subtitle}</p>\n",
        title = escape(&page.title),
        subtitle = escape(&page.subtitle),
    );

    if let Some(alert) = &page.alert {
        push_error(&mut html, alert);
    }

    if let Some(sections) = &page.sections {
        render_system_info(&mut html, &sections.system_info);
        render_extensions(&mut html, &sections.extensions);
    }

    let _ = write!(
        html,
        "<form method=\"post\" action=\"{REFRESH_PATH}\">\
         <button type=\"submit\">{}</button></form>\n</body>\n</html>\n",
        escape(REFRESH_LABEL),
    );

    html
}

fn push_error(html: &mut String, message: &str) {
    let _ = writeln!(html, "<div class=\"error\">{}</div>", escape(message));
}

fn render_system_info(html: &mut String, view: &SystemInfoView) {
    let _ = writeln!(html, "<h2>{}</h2>", SYSTEM_INFO_HEADING);

    if let Some(error) = &view.error {
        push_error(html, error);
    }

    for field in &view.fields {
        let _ = writeln!(
            html,
            "<p><strong>{}</strong>: {}</p>",
            escape(&field.label),
            escape(&field.value)
        );
    }
}

fn render_extensions(html: &mut String, view: &ExtensionsView) {
    let _ = writeln!(html, "<h2>{}</h2>", EXTENSIONS_HEADING);

    if let Some(error) = &view.error {
        push_error(html, error);
    }

    match &view.grid {
        Some(grid) => render_grid(html, grid),
        None => {
            let _ = writeln!(html, "<p>{}</p>", NO_EXTENSIONS);
        }
    }
}

fn render_grid(html: &mut String, grid: &Grid) {
    html.push_str("<table>\n<thead><tr>");
    for column in &grid.columns {
        let _ = write!(html, "<th>{}</th>", escape(column));
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for row in &grid.rows {
        html.push_str("<tr>");
        for cell in row {
            let _ = write!(html, "<td>{}</td>", escape(cell));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
}
