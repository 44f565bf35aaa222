//! Histogram rendering
//!
//! Buckets lifetimes into fixed-width bins and renders one histogram per
//! buffer into a single SVG image. Bin edges are shared across ALL buffers
//! (multiples of the bin width from 0 to the maximum observed lifetime
//! inclusive) so the subplots stay visually comparable.

use anyhow::{ensure, Result};
use mem_log_decoder::ReportRow;
use std::fmt::Write;

/// Default bin width in nanoseconds
pub const DEFAULT_BIN_WIDTH: u64 = 10;

/// Default output image path
pub const DEFAULT_OUTPUT: &str = "histograms_buffer.svg";

const SUBPLOT_WIDTH: u64 = 1000;
const SUBPLOT_HEIGHT: u64 = 400;
const MARGIN_LEFT: u64 = 80;
const MARGIN_RIGHT: u64 = 40;
const MARGIN_TOP: u64 = 60;
const MARGIN_BOTTOM: u64 = 70;

/// Binned lifetime counts for one buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferHistogram {
    /// The `Buffer` grouping value
    pub buffer: String,
    /// One count per shared bin; bin k covers lifetimes in [k*w, (k+1)*w)
    pub counts: Vec<u64>,
}

/// Bucket rows into per-buffer histograms over shared bin edges
///
/// Buffers appear in first-occurrence order. Every histogram has the same
/// number of bins, spanning 0 to the maximum lifetime over the whole table.
pub fn build_histograms(rows: &[ReportRow], bin_width: u64) -> Result<Vec<BufferHistogram>> {
    ensure!(bin_width > 0, "bin width must be positive");

    let Some(max_lifetime) = rows.iter().map(|r| r.lifetime).max() else {
        return Ok(Vec::new());
    };
    let num_bins = (max_lifetime / bin_width + 1) as usize;

    let mut histograms: Vec<BufferHistogram> = Vec::new();
    for row in rows {
        let index = match histograms.iter().position(|h| h.buffer == row.location) {
            Some(index) => index,
            None => {
                histograms.push(BufferHistogram {
                    buffer: row.location.clone(),
                    counts: vec![0; num_bins],
                });
                histograms.len() - 1
            }
        };
        histograms[index].counts[(row.lifetime / bin_width) as usize] += 1;
    }

    log::debug!(
        "Built {} histograms over {} shared bins",
        histograms.len(),
        num_bins
    );
    Ok(histograms)
}

/// Render the histograms as one SVG image, subplots stacked vertically
///
/// Output is a pure function of the input: rendering the same table twice
/// produces identical bytes.
pub fn render_svg(histograms: &[BufferHistogram], bin_width: u64) -> String {
    let total_height = SUBPLOT_HEIGHT * histograms.len().max(1) as u64;

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" font-family="sans-serif">"#,
        SUBPLOT_WIDTH, total_height
    );
    let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);

    for (index, histogram) in histograms.iter().enumerate() {
        render_subplot(
            &mut svg,
            histogram,
            index as u64 * SUBPLOT_HEIGHT,
            bin_width,
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_subplot(svg: &mut String, histogram: &BufferHistogram, y_offset: u64, bin_width: u64) {
    let plot_width = (SUBPLOT_WIDTH - MARGIN_LEFT - MARGIN_RIGHT) as f64;
    let plot_height = (SUBPLOT_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) as f64;
    let origin_x = MARGIN_LEFT as f64;
    let origin_y = (y_offset + MARGIN_TOP) as f64 + plot_height;

    let num_bins = histogram.counts.len().max(1);
    let max_count = histogram.counts.iter().copied().max().unwrap_or(0).max(1);
    let bar_width = plot_width / num_bins as f64;

    // Subplot title
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{}" text-anchor="middle" font-size="16">Lifetime Histogram for Buffer {}</text>"#,
        SUBPLOT_WIDTH / 2,
        y_offset + MARGIN_TOP - 25,
        histogram.buffer
    );

    // Axes
    let _ = writeln!(
        svg,
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
        origin_x,
        origin_y - plot_height,
        origin_x,
        origin_y
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="black"/>"#,
        origin_x,
        origin_y,
        origin_x + plot_width,
        origin_y
    );

    // Bars
    for (bin, &count) in histogram.counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        let bar_height = plot_height * count as f64 / max_count as f64;
        let _ = writeln!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="steelblue" fill-opacity="0.7" stroke="black"/>"#,
            origin_x + bin as f64 * bar_width,
            origin_y - bar_height,
            bar_width,
            bar_height
        );
    }

    // X tick labels on bin edges, thinned when there are many bins
    let edge_step = (num_bins / 10).max(1);
    for edge in (0..=num_bins).step_by(edge_step) {
        let _ = writeln!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11">{}</text>"#,
            origin_x + edge as f64 * bar_width,
            origin_y + 18.0,
            edge as u64 * bin_width
        );
    }

    // Y tick labels: zero and the peak frequency
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11">0</text>"#,
        origin_x - 8.0,
        origin_y + 4.0
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11">{}</text>"#,
        origin_x - 8.0,
        origin_y - plot_height + 4.0,
        max_count
    );

    // Axis labels
    let _ = writeln!(
        svg,
        r#"<text x="{}" y="{:.1}" text-anchor="middle" font-size="13">Lifetime (Grouped by {}ns)</text>"#,
        SUBPLOT_WIDTH / 2,
        origin_y + 45.0,
        bin_width
    );
    let _ = writeln!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13" transform="rotate(-90 {:.1} {:.1})">Frequency</text>"#,
        origin_x - 50.0,
        origin_y - plot_height / 2.0,
        origin_x - 50.0,
        origin_y - plot_height / 2.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(location: &str, address: u64, lifetime: u64) -> ReportRow {
        ReportRow {
            location: location.to_string(),
            address,
            lifetime,
        }
    }

    #[test]
    fn test_bins_shared_across_buffers() {
        // Max lifetime 42 -> bins [0,10), [10,20), [20,30), [30,40), [40,50)
        // for BOTH buffers, even though b.ram never exceeds 5.
        let rows = vec![
            row("a.ram", 0, 42),
            row("a.ram", 1, 15),
            row("b.ram", 0, 5),
        ];

        let histograms = build_histograms(&rows, 10).unwrap();
        assert_eq!(histograms.len(), 2);
        assert_eq!(histograms[0].buffer, "a.ram");
        assert_eq!(histograms[0].counts, vec![0, 1, 0, 0, 1]);
        assert_eq!(histograms[1].buffer, "b.ram");
        assert_eq!(histograms[1].counts, vec![1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_bin_boundary_opens_next_bin() {
        // A lifetime equal to a bin edge lands in the bin that edge opens
        let rows = vec![row("a.ram", 0, 10), row("a.ram", 0, 9)];

        let histograms = build_histograms(&rows, 10).unwrap();
        assert_eq!(histograms[0].counts, vec![1, 1]);
    }

    #[test]
    fn test_max_lifetime_is_covered() {
        let rows = vec![row("a.ram", 0, 100)];

        let histograms = build_histograms(&rows, 10).unwrap();
        assert_eq!(histograms[0].counts.len(), 11);
        assert_eq!(*histograms[0].counts.last().unwrap(), 1);
    }

    #[test]
    fn test_empty_rows_yield_no_histograms() {
        assert!(build_histograms(&[], 10).unwrap().is_empty());
    }

    #[test]
    fn test_zero_bin_width_rejected() {
        assert!(build_histograms(&[row("a.ram", 0, 1)], 0).is_err());
    }

    #[test]
    fn test_svg_structure() {
        let rows = vec![row("a.ram", 0, 12), row("b.ram", 0, 3)];
        let histograms = build_histograms(&rows, 10).unwrap();

        let svg = render_svg(&histograms, 10);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("Lifetime Histogram for Buffer").count(), 2);
        assert!(svg.contains("Lifetime Histogram for Buffer a.ram"));
        assert!(svg.contains("Lifetime (Grouped by 10ns)"));
        assert!(svg.contains("Frequency"));
    }

    #[test]
    fn test_svg_is_deterministic() {
        let rows = vec![row("a.ram", 0, 12), row("a.ram", 1, 7)];
        let histograms = build_histograms(&rows, 10).unwrap();

        assert_eq!(render_svg(&histograms, 10), render_svg(&histograms, 10));
    }
}
