//! Multi-series sparkline normalization: N independently-sampled price
//! histories scaled onto one shared vertical axis, plus the SVG rendition.
//!
//! Horizontal spacing is per-series-relative (each series spreads its own
//! samples across the full plot width), vertical position is globally
//! comparable (one min/max over every qualifying series). That keeps series
//! with different sample counts visually comparable on one chart.

use crate::types::PricePoint;

/// Line colors assigned to series without an explicit override, cycled by
/// the series' input position.
pub const PALETTE: [&str; 6] = [
    "#3b82f6", // blue
    "#ef4444", // red
    "#10b981", // green
    "#f59e0b", // amber
    "#8b5cf6", // violet
    "#ec4899", // pink
];

/// One named input series.
#[derive(Clone, Debug)]
pub struct SparkSeries {
    pub label: String,
    /// Time-ordered samples.
    pub points: Vec<PricePoint>,
    /// Explicit line color; `None` picks from [`PALETTE`].
    pub color: Option<String>,
}

impl SparkSeries {
    pub fn new(label: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self { label: label.into(), points, color: None }
    }

    /// A series needs at least two samples to draw a line.
    fn qualifies(&self) -> bool {
        self.points.len() >= 2
    }
}

/// Frame geometry. Defaults match the card chart: 300x120 with a 10px
/// inset.
#[derive(Clone, Copy, Debug)]
pub struct SparkOptions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for SparkOptions {
    fn default() -> Self {
        Self { width: 300.0, height: 120.0, padding: 10.0 }
    }
}

/// A qualifying series scaled into frame coordinates.
#[derive(Clone, Debug)]
pub struct SparkLine {
    pub label: String,
    pub color: String,
    /// Scaled `(x, y)` coordinates, one per sample.
    pub points: Vec<(f64, f64)>,
    /// Marker position for the last sample, on the right edge of the plot.
    pub endpoint: (f64, f64),
    /// Last sampled price in [0, 1].
    pub last_price: f64,
    /// Percent change from the first to the last sample.
    pub change_pct: f64,
}

impl SparkLine {
    /// Non-negative change gets positive styling.
    pub fn is_positive(&self) -> bool {
        self.change_pct >= 0.0
    }

    /// SVG path data for the polyline (`M x,y L x,y ...`).
    pub fn path_data(&self) -> String {
        let joined = self
            .points
            .iter()
            .map(|(x, y)| format!("{x},{y}"))
            .collect::<Vec<_>>()
            .join(" L ");
        format!("M {joined}")
    }
}

/// A fully laid out chart frame.
#[derive(Clone, Debug)]
pub struct SparkFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    /// Global price scale shared by every line.
    pub min_price: f64,
    pub max_price: f64,
    pub lines: Vec<SparkLine>,
}

/// Scale the qualifying series of `series` into one frame.
///
/// Series with fewer than two points contribute no line (and keep their
/// input position for palette purposes). Returns `None` when nothing
/// qualifies: the caller renders nothing at all, not an empty frame. A flat
/// combined range maps every point to the vertical midline.
pub fn layout(series: &[SparkSeries], opts: SparkOptions) -> Option<SparkFrame> {
    let mut min_price = f64::INFINITY;
    let mut max_price = f64::NEG_INFINITY;
    let mut any = false;
    for s in series.iter().filter(|s| s.qualifies()) {
        any = true;
        for point in &s.points {
            min_price = min_price.min(point.p);
            max_price = max_price.max(point.p);
        }
    }
    if !any {
        return None;
    }

    let range = max_price - min_price;
    let plot_w = opts.width - 2.0 * opts.padding;
    let plot_h = opts.height - 2.0 * opts.padding;
    let y_of = |p: f64| {
        if range == 0.0 {
            opts.height / 2.0
        } else {
            opts.padding + plot_h - (p - min_price) / range * plot_h
        }
    };

    let mut lines = Vec::new();
    for (index, s) in series.iter().enumerate() {
        if !s.qualifies() {
            continue;
        }
        let len = s.points.len();
        let points: Vec<(f64, f64)> = s
            .points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                let x = opts.padding + (i as f64 / (len - 1) as f64) * plot_w;
                (x, y_of(point.p))
            })
            .collect();
        let first = s.points[0].p;
        let last = s.points[len - 1].p;
        let color = s
            .color
            .clone()
            .unwrap_or_else(|| PALETTE[index % PALETTE.len()].to_string());
        lines.push(SparkLine {
            label: s.label.clone(),
            color,
            points,
            endpoint: (opts.padding + plot_w, y_of(last)),
            last_price: last,
            change_pct: (last - first) / first * 100.0,
        });
    }

    Some(SparkFrame {
        width: opts.width,
        height: opts.height,
        padding: opts.padding,
        min_price,
        max_price,
        lines,
    })
}

impl SparkFrame {
    /// Render the frame as a standalone SVG document: a faint midline, one
    /// round-capped path per line and a radius-3 marker on each endpoint.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mid = h / 2.0;
        let mut svg = format!(
            r#"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"#
        );
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <rect x="0" y="0" width="{w}" height="{h}" fill="transparent"/>"#
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"  <line x1="{}" y1="{mid}" x2="{}" y2="{mid}" stroke="currentColor" stroke-width="0.5" opacity="0.1"/>"#,
            self.padding,
            w - self.padding,
        ));
        svg.push('\n');
        for line in &self.lines {
            svg.push_str(&format!(
                r#"  <path d="{}" fill="none" stroke="{}" stroke-width="2.5" stroke-linecap="round" stroke-linejoin="round"/>"#,
                line.path_data(),
                line.color,
            ));
            svg.push('\n');
            let (cx, cy) = line.endpoint;
            svg.push_str(&format!(
                r#"  <circle cx="{cx}" cy="{cy}" r="3" fill="{}"/>"#,
                line.color,
            ));
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(prices: &[f64]) -> Vec<PricePoint> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint { t: i as i64 * 3600, p })
            .collect()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn y_scale_is_shared_while_x_spacing_is_per_series() {
        let series = vec![
            SparkSeries::new("corto", pts(&[0.2, 0.8])),
            SparkSeries::new("largo", pts(&[0.8, 0.5, 0.2, 0.5])),
        ];
        let frame = layout(&series, SparkOptions::default()).unwrap();
        assert_eq!(frame.min_price, 0.2);
        assert_eq!(frame.max_price, 0.8);

        let short = &frame.lines[0];
        let long = &frame.lines[1];

        // Shared extremes: 0.2 sits on the bottom inset, 0.8 on the top,
        // in both series.
        assert!(approx(short.points[0].1, 110.0));
        assert!(approx(long.points[2].1, 110.0));
        assert!(approx(short.points[1].1, 10.0));
        assert!(approx(long.points[0].1, 10.0));

        // Each series spreads its own sample count across the full width.
        let short_x: Vec<f64> = short.points.iter().map(|p| p.0).collect();
        let long_x: Vec<f64> = long.points.iter().map(|p| p.0).collect();
        assert!(approx(short_x[0], 10.0) && approx(short_x[1], 290.0));
        assert!(approx(long_x[1], 10.0 + 280.0 / 3.0));
        assert!(approx(long_x[3], 290.0));
    }

    #[test]
    fn short_series_are_skipped_without_affecting_siblings() {
        let series = vec![
            SparkSeries::new("solo-un-punto", pts(&[0.5])),
            SparkSeries::new("completa", pts(&[0.3, 0.4, 0.6])),
        ];
        let frame = layout(&series, SparkOptions::default()).unwrap();
        assert_eq!(frame.lines.len(), 1);
        assert_eq!(frame.lines[0].label, "completa");
        // The skipped series still occupies palette slot 0.
        assert_eq!(frame.lines[0].color, PALETTE[1]);
        // The global scale ignores the skipped series' value.
        assert_eq!(frame.min_price, 0.3);
    }

    #[test]
    fn nothing_qualifying_lays_out_nothing() {
        let series = vec![
            SparkSeries::new("a", pts(&[0.5])),
            SparkSeries::new("b", pts(&[])),
        ];
        assert!(layout(&series, SparkOptions::default()).is_none());
        assert!(layout(&[], SparkOptions::default()).is_none());
    }

    #[test]
    fn flat_range_maps_to_midline() {
        let series = vec![SparkSeries::new("plana", pts(&[0.5, 0.5, 0.5]))];
        let frame = layout(&series, SparkOptions::default()).unwrap();
        for &(_, y) in &frame.lines[0].points {
            assert_eq!(y, 60.0);
        }
        assert_eq!(frame.lines[0].endpoint.1, 60.0);
    }

    #[test]
    fn change_pct_from_020_to_035_is_positive_75() {
        let series = vec![SparkSeries::new("sube", pts(&[0.20, 0.35]))];
        let frame = layout(&series, SparkOptions::default()).unwrap();
        let line = &frame.lines[0];
        assert!(approx(line.change_pct, 75.0));
        assert!(line.is_positive());
        assert_eq!(line.last_price, 0.35);
    }

    #[test]
    fn palette_cycles_and_overrides_are_honored() {
        let mut series: Vec<SparkSeries> = (0..7)
            .map(|i| SparkSeries::new(format!("s{i}"), pts(&[0.1, 0.9])))
            .collect();
        series[3].color = Some("#000000".to_string());
        let frame = layout(&series, SparkOptions::default()).unwrap();
        assert_eq!(frame.lines[0].color, PALETTE[0]);
        assert_eq!(frame.lines[3].color, "#000000");
        assert_eq!(frame.lines[6].color, PALETTE[0]);
    }

    #[test]
    fn svg_document_has_midline_paths_and_markers() {
        let series = vec![SparkSeries::new("plana", pts(&[0.5, 0.5]))];
        let frame = layout(&series, SparkOptions::default()).unwrap();
        let svg = frame.to_svg();
        assert!(svg.starts_with(r#"<svg width="300" height="120" viewBox="0 0 300 120""#));
        assert!(svg.contains(r#"y1="60""#));
        assert!(svg.contains(r#"d="M 10,60 L 290,60""#));
        assert!(svg.contains(r#"stroke-width="2.5""#));
        assert!(svg.contains(r##"<circle cx="290" cy="60" r="3" fill="#3b82f6"/>"##));
        assert!(svg.ends_with("</svg>\n"));
    }
}
