//! HTML rendering of a [`DashboardReport`](crate::report::DashboardReport).
//!
//! Everything is rendered server-side into a single self-contained page:
//! tables for provider frames, inline SVG for line charts, and `<details>`
//! blocks for collapsible sections.

pub mod chart;
mod page;
pub mod table;

pub use chart::{LineChart, Series};
pub use page::{render_error_page, render_page};
pub use table::render_frame;

/// Escape text for use in HTML element content and quoted attribute values.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
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
