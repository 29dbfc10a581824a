//! Inline SVG line charts over a date axis.

use std::fmt::Write as _;

use chrono::NaiveDate;

use super::escape_html;

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 32.0;

/// One named line. `values[i]` belongs to the chart's `dates[i]`; `None` leaves a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label.
    pub name: String,
    /// CSS color of the stroke.
    pub color: &'static str,
    /// Values aligned with the chart dates.
    pub values: Vec<Option<f64>>,
}

/// A line chart with a shared date axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineChart {
    dates: Vec<NaiveDate>,
    series: Vec<Series>,
}

struct Scale {
    first: NaiveDate,
    span_days: f64,
    lo: f64,
    hi: f64,
}

impl Scale {
    #[allow(clippy::cast_precision_loss)]
    fn x(&self, date: NaiveDate) -> f64 {
        let plot = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        if self.span_days <= 0.0 {
            return MARGIN_LEFT + plot / 2.0;
        }
        let offset = (date - self.first).num_days() as f64;
        MARGIN_LEFT + offset / self.span_days * plot
    }

    fn y(&self, value: f64) -> f64 {
        let plot = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + (self.hi - value) / (self.hi - self.lo) * plot
    }
}

impl LineChart {
    /// A chart over `dates` (ascending).
    #[must_use]
    pub const fn new(dates: Vec<NaiveDate>) -> Self {
        Self {
            dates,
            series: Vec::new(),
        }
    }

    /// Add a line.
    #[must_use]
    pub fn series(
        mut self,
        name: impl Into<String>,
        color: &'static str,
        values: Vec<Option<f64>>,
    ) -> Self {
        self.series.push(Series {
            name: name.into(),
            color,
            values,
        });
        self
    }

    fn points(&self, s: &Series) -> impl Iterator<Item = (NaiveDate, Option<f64>)> {
        self.dates
            .iter()
            .copied()
            .zip(s.values.iter().map(|v| v.filter(|x| x.is_finite())))
    }

    fn scale(&self) -> Option<Scale> {
        let (first, last) = (*self.dates.first()?, *self.dates.last()?);
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for s in &self.series {
            for (_, v) in self.points(s) {
                if let Some(v) = v {
                    lo = lo.min(v);
                    hi = hi.max(v);
                }
            }
        }
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        let pad = if hi > lo {
            (hi - lo) * 0.05
        } else {
            (hi.abs() * 0.05).max(1.0)
        };
        #[allow(clippy::cast_precision_loss)]
        let span_days = (last - first).num_days() as f64;
        Some(Scale {
            first,
            span_days,
            lo: lo - pad,
            hi: hi + pad,
        })
    }

    /// Render as an inline `<svg>` followed by a legend, or a placeholder
    /// when no series has a single value.
    #[must_use]
    pub fn to_svg(&self) -> String {
        let Some(scale) = self.scale() else {
            return r#"<p class="empty">No data available.</p>"#.to_string();
        };
        let mut out = format!(
            r#"<figure class="chart"><svg viewBox="0 0 {WIDTH} {HEIGHT}" preserveAspectRatio="none" role="img">"#
        );
        self.axes(&mut out, &scale);
        for s in &self.series {
            for segment in self.segments(s, &scale) {
                if let [(x, y)] = segment.as_slice() {
                    let _ = write!(
                        out,
                        r#"<circle cx="{x:.1}" cy="{y:.1}" r="2.5" fill="{}"/>"#,
                        s.color
                    );
                } else {
                    let pts: Vec<String> =
                        segment.iter().map(|(x, y)| format!("{x:.1},{y:.1}")).collect();
                    let _ = write!(
                        out,
                        r#"<polyline fill="none" stroke="{}" stroke-width="1.6" points="{}"/>"#,
                        s.color,
                        pts.join(" ")
                    );
                }
            }
        }
        out.push_str(r#"</svg><figcaption class="legend">"#);
        for s in &self.series {
            let _ = write!(
                out,
                r#"<span><i style="background:{}"></i>{}</span>"#,
                s.color,
                escape_html(&s.name)
            );
        }
        out.push_str("</figcaption></figure>");
        out
    }

    /// Runs of consecutive present values in plot coordinates.
    fn segments(&self, s: &Series, scale: &Scale) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (date, v) in self.points(s) {
            match v {
                Some(v) => current.push((scale.x(date), scale.y(v))),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    fn axes(&self, out: &mut String, scale: &Scale) {
        let bottom = HEIGHT - MARGIN_BOTTOM;
        let right = WIDTH - MARGIN_RIGHT;
        let _ = write!(
            out,
            r##"<g class="axis" stroke="#d9dad7"><line x1="{MARGIN_LEFT}" y1="{bottom}" x2="{right}" y2="{bottom}"/><line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{bottom}"/></g>"##
        );
        let mid = (scale.lo + scale.hi) / 2.0;
        for v in [scale.hi, mid, scale.lo] {
            let y = scale.y(v);
            let _ = write!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="end" class="tick">{v:.2}</text>"#,
                MARGIN_LEFT - 6.0,
                y + 4.0
            );
        }
        if let (Some(first), Some(last)) = (self.dates.first(), self.dates.last()) {
            let y = bottom + 20.0;
            let _ = write!(
                out,
                r#"<text x="{MARGIN_LEFT}" y="{y}" class="tick">{first}</text>"#
            );
            if last != first {
                let _ = write!(
                    out,
                    r#"<text x="{right}" y="{y}" text-anchor="end" class="tick">{last}</text>"#
                );
            }
        }
    }
}
