use std::fmt::Write as _;

use quantdash_core::{Cell, Frame};

use super::escape_html;

/// Render a frame as an HTML table, or a short placeholder when it has no rows.
#[must_use]
pub fn render_frame(frame: &Frame) -> String {
    if frame.is_empty() {
        return r#"<p class="empty">No data available.</p>"#.to_string();
    }
    let mut out = String::from(r#"<div class="frame"><table><thead><tr>"#);
    for col in &frame.columns {
        let _ = write!(out, "<th>{}</th>", escape_html(col));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &frame.rows {
        out.push_str("<tr>");
        for cell in row {
            let class = match cell {
                Cell::Number(_) | Cell::Integer(_) => r#" class="num""#,
                Cell::Missing => r#" class="na""#,
                _ => "",
            };
            let _ = write!(out, "<td{class}>{}</td>", escape_html(&cell.to_string()));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table></div>");
    out
}
