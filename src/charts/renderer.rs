//! Static Chart Renderer
//! Writes the six report charts as PNG files with plotters.
//!
//! Files:
//! 1. histograms.png - duration distributions with density curves
//! 2. boxplots.png - duration outliers per type
//! 3. barplots.png - top countries and ratings
//! 4. correlation_matrix.png - Pearson heatmap of the numeric columns
//! 5. scatterplots.png - release year vs year added / movie duration
//! 6. contingency_heatmap.png - type vs rating counts

use crate::charts::prepare::{ChartInputs, Contingency, CORRELATION_COLUMNS};
use crate::charts::style::{
    blues, coolwarm, magma, text_on, viridis, ANNOTATION_SIZE, FONT, LABEL_SIZE, LIGHT_BLUE,
    LIGHT_CORAL, OUTLINE, SALMON, SCATTER_GREEN, SKY_BLUE, TITLE_SIZE, TYPE_PALETTE,
};
use crate::stats::descriptive::{kde_curve, min_max, BoxStats, Histogram};
use crate::stats::frequency::Frequencies;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::{DataFrame, PolarsError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

type DrawResult = Result<(), Box<dyn std::error::Error>>;
type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const MOVIE_BINS: usize = 30;
const TV_BINS: usize = 10;
const KDE_POINTS: usize = 200;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to render {chart}: {message}")]
    Render { chart: &'static str, message: String },
}

/// A chart file and the function drawing it.
struct ChartSpec {
    file_name: &'static str,
    size: (u32, u32),
    draw: fn(&Area<'_>, &ChartInputs) -> DrawResult,
}

const CHARTS: [ChartSpec; 6] = [
    ChartSpec {
        file_name: "histograms.png",
        size: (1400, 500),
        draw: ChartRenderer::draw_histograms,
    },
    ChartSpec {
        file_name: "boxplots.png",
        size: (1200, 500),
        draw: ChartRenderer::draw_boxplots,
    },
    ChartSpec {
        file_name: "barplots.png",
        size: (1400, 600),
        draw: ChartRenderer::draw_barplots,
    },
    ChartSpec {
        file_name: "correlation_matrix.png",
        size: (800, 600),
        draw: ChartRenderer::draw_correlation_matrix,
    },
    ChartSpec {
        file_name: "scatterplots.png",
        size: (1400, 500),
        draw: ChartRenderer::draw_scatterplots,
    },
    ChartSpec {
        file_name: "contingency_heatmap.png",
        size: (1000, 600),
        draw: ChartRenderer::draw_contingency_heatmap,
    },
];

pub struct ChartRenderer;

impl ChartRenderer {
    /// File names written by [`ChartRenderer::render_all`], in order.
    pub fn file_names() -> impl Iterator<Item = &'static str> {
        CHARTS.iter().map(|chart| chart.file_name)
    }

    /// Render every chart into `output_dir`, creating it if needed.
    pub fn render_all(df: &DataFrame, output_dir: &Path) -> Result<Vec<PathBuf>, ChartError> {
        fs::create_dir_all(output_dir).map_err(|source| ChartError::OutputDir {
            path: output_dir.to_path_buf(),
            source,
        })?;

        let inputs = ChartInputs::from_frame(df)?;

        let mut written = Vec::with_capacity(CHARTS.len());
        for chart in &CHARTS {
            let path = output_dir.join(chart.file_name);
            Self::render_file(chart, &path, &inputs).map_err(|e| ChartError::Render {
                chart: chart.file_name,
                message: e.to_string(),
            })?;
            info!(path = %path.display(), "Chart saved");
            written.push(path);
        }

        Ok(written)
    }

    fn render_file(chart: &ChartSpec, path: &Path, inputs: &ChartInputs) -> DrawResult {
        let root = BitMapBackend::new(path, chart.size).into_drawing_area();
        root.fill(&WHITE)?;
        (chart.draw)(&root, inputs)?;
        root.present()?;
        Ok(())
    }

    /// Split a canvas into equal left and right panels.
    fn side_by_side<'a>(root: &Area<'a>) -> (Area<'a>, Area<'a>) {
        let (width, _) = root.dim_in_pixel();
        root.split_horizontally(width / 2)
    }

    // ---------------------------------------------------------------------
    // Histograms
    // ---------------------------------------------------------------------

    fn draw_histograms(root: &Area<'_>, inputs: &ChartInputs) -> DrawResult {
        let (left, right) = Self::side_by_side(root);
        Self::draw_histogram(
            &left,
            &inputs.movie_durations,
            MOVIE_BINS,
            SKY_BLUE,
            "Movie durations",
            "Minutes",
        )?;
        Self::draw_histogram(
            &right,
            &inputs.tv_seasons,
            TV_BINS,
            SALMON,
            "TV show seasons",
            "Number of seasons",
        )
    }

    fn draw_histogram(
        area: &Area<'_>,
        values: &[f64],
        bins: usize,
        color: RGBColor,
        title: &str,
        x_desc: &str,
    ) -> DrawResult {
        let hist = Histogram::from_values(values, bins);
        let (x_range, y_max) = match &hist {
            Some(h) => (h.start..h.end(), (h.max_count() as f64 * 1.1).max(1.0)),
            None => (0.0..1.0, 1.0),
        };

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_range, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc("Count")
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        let Some(hist) = hist else {
            return Ok(());
        };

        chart.draw_series(hist.bars().map(|(left, right, count)| {
            Rectangle::new([(left, 0.0), (right, count as f64)], color.mix(0.8).filled())
        }))?;
        chart.draw_series(hist.bars().map(|(left, right, count)| {
            Rectangle::new([(left, 0.0), (right, count as f64)], WHITE.stroke_width(1))
        }))?;

        let scale = values.len() as f64 * hist.bin_width;
        let curve = kde_curve(values, KDE_POINTS, scale);
        if !curve.is_empty() {
            chart.draw_series(LineSeries::new(curve, color.stroke_width(3)))?;
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Box plots
    // ---------------------------------------------------------------------

    fn draw_boxplots(root: &Area<'_>, inputs: &ChartInputs) -> DrawResult {
        let (left, right) = Self::side_by_side(root);
        Self::draw_boxplot(&left, &inputs.movie_durations, LIGHT_BLUE, "Movies: outliers")?;
        Self::draw_boxplot(&right, &inputs.tv_seasons, LIGHT_CORAL, "TV shows: outliers")
    }

    fn draw_boxplot(area: &Area<'_>, values: &[f64], fill: RGBColor, title: &str) -> DrawResult {
        let (y_min, y_max) = padded_range(values);

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(20)
            .y_label_area_size(55)
            .build_cartesian_2d(-1f64..1f64, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|_| String::new())
            .y_desc("duration_num")
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        let Some(stats) = BoxStats::from_values(values) else {
            return Ok(());
        };

        let half = 0.35;
        let cap = 0.15;
        let line = OUTLINE.stroke_width(2);

        chart.draw_series(std::iter::once(Rectangle::new(
            [(-half, stats.q1), (half, stats.q3)],
            fill.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(-half, stats.q1), (half, stats.q3)],
            line,
        )))?;
        chart.draw_series(
            [
                vec![(-half, stats.median), (half, stats.median)],
                vec![(0.0, stats.q3), (0.0, stats.whisker_high)],
                vec![(0.0, stats.q1), (0.0, stats.whisker_low)],
                vec![(-cap, stats.whisker_high), (cap, stats.whisker_high)],
                vec![(-cap, stats.whisker_low), (cap, stats.whisker_low)],
            ]
            .into_iter()
            .map(|points| PathElement::new(points, line)),
        )?;
        chart.draw_series(
            stats
                .outliers
                .iter()
                .map(|&v| Circle::new((0.0, v), 4, OUTLINE.stroke_width(1))),
        )?;

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Bar charts
    // ---------------------------------------------------------------------

    fn draw_barplots(root: &Area<'_>, inputs: &ChartInputs) -> DrawResult {
        let (left, right) = Self::side_by_side(root);
        Self::draw_bars(&left, &inputs.top_countries, viridis, "Top 10 countries", "Titles")?;
        Self::draw_bars(&right, &inputs.ratings, magma, "Ratings", "Count")
    }

    /// Horizontal bars, most frequent on top.
    fn draw_bars(
        area: &Area<'_>,
        counts: &Frequencies,
        palette: fn(usize, usize) -> RGBColor,
        title: &str,
        x_desc: &str,
    ) -> DrawResult {
        let n = counts.len() as i32;
        let x_max = counts.first().map_or(1.0, |(_, c)| *c as f64 * 1.1).max(1.0);
        // Row 0 is drawn at the top
        let slot = |i: usize| n - 1 - i as i32;
        let label_of = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(y) if *y < n => counts
                .get(slot(*y as usize) as usize)
                .map(|(name, _)| name.clone())
                .unwrap_or_default(),
            _ => String::new(),
        };

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(140)
            .build_cartesian_2d(0f64..x_max, (0..n.max(1)).into_segmented())?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(counts.len().max(1))
            .y_label_formatter(&label_of)
            .x_desc(x_desc)
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
            let y = slot(i);
            let color = palette(i, counts.len());
            let mut bar = Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(y)),
                    (*count as f64, SegmentValue::Exact(y + 1)),
                ],
                color.filled(),
            );
            bar.set_margin(3, 3, 0, 0);
            bar
        }))?;

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Heatmaps
    // ---------------------------------------------------------------------

    fn draw_correlation_matrix(root: &Area<'_>, inputs: &ChartInputs) -> DrawResult {
        let labels: Vec<String> = CORRELATION_COLUMNS.iter().map(|s| s.to_string()).collect();
        let cells: Vec<Vec<(RGBColor, String)>> = inputs
            .correlation
            .iter()
            .map(|row| {
                row.iter()
                    .map(|value| match value {
                        Some(r) => (coolwarm(*r), format!("{:.2}", r)),
                        None => (WHITE, "n/a".to_string()),
                    })
                    .collect()
            })
            .collect();

        Self::draw_heatmap(root, "Correlations", &labels, &labels, &cells)
    }

    fn draw_contingency_heatmap(root: &Area<'_>, inputs: &ChartInputs) -> DrawResult {
        let Contingency {
            rows,
            columns,
            counts,
        } = &inputs.contingency;
        let max = inputs.contingency.max_count().max(1) as f64;

        let cells: Vec<Vec<(RGBColor, String)>> = counts
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&count| (blues(count as f64 / max), count.to_string()))
                    .collect()
            })
            .collect();

        Self::draw_heatmap(root, "Type vs rating", rows, columns, &cells)
    }

    /// Annotated grid; `cells[row][column]` holds fill and text.
    fn draw_heatmap(
        area: &Area<'_>,
        title: &str,
        row_labels: &[String],
        column_labels: &[String],
        cells: &[Vec<(RGBColor, String)>],
    ) -> DrawResult {
        let n_rows = row_labels.len() as i32;
        let n_cols = column_labels.len() as i32;
        // Row 0 is drawn at the top
        let flip = |r: i32| n_rows - 1 - r;

        let column_label = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(c) => column_labels.get(*c as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        };
        let row_label = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(r) => row_labels
                .get(flip(*r) as usize)
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        };

        let mut chart = ChartBuilder::on(area)
            .caption(title, (FONT, TITLE_SIZE))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(110)
            .build_cartesian_2d(
                (0..n_cols.max(1)).into_segmented(),
                (0..n_rows.max(1)).into_segmented(),
            )?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(column_labels.len().max(1))
            .y_labels(row_labels.len().max(1))
            .x_label_formatter(&column_label)
            .y_label_formatter(&row_label)
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        let centered = Pos::new(HPos::Center, VPos::Center);

        for (r, row) in cells.iter().enumerate() {
            let y = flip(r as i32);
            for (c, (fill, text)) in row.iter().enumerate() {
                let x = c as i32;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [
                        (SegmentValue::Exact(x), SegmentValue::Exact(y)),
                        (SegmentValue::Exact(x + 1), SegmentValue::Exact(y + 1)),
                    ],
                    fill.filled(),
                )))?;

                let style = (FONT, ANNOTATION_SIZE)
                    .into_font()
                    .color(&text_on(*fill))
                    .pos(centered);
                chart.draw_series(std::iter::once(Text::new(
                    text.clone(),
                    (SegmentValue::CenterOf(x), SegmentValue::CenterOf(y)),
                    style,
                )))?;
            }
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Scatter plots
    // ---------------------------------------------------------------------

    fn draw_scatterplots(root: &Area<'_>, inputs: &ChartInputs) -> DrawResult {
        let (left, right) = Self::side_by_side(root);

        let all_points: Vec<(f64, f64)> = inputs
            .release_vs_added
            .iter()
            .flat_map(|(_, points)| points.iter().copied())
            .collect();
        let (x_range, y_range) = point_ranges(&all_points);

        let mut chart = ChartBuilder::on(&left)
            .caption("Release year vs year added", (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("release_year")
            .y_desc("year_added")
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        for (i, (kind, points)) in inputs.release_vs_added.iter().enumerate() {
            let color = TYPE_PALETTE[i % TYPE_PALETTE.len()];
            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&p| Circle::new(p, 3, color.mix(0.6).filled())),
                )?
                .label(kind.as_str())
                .legend(move |(x, y)| Circle::new((x + 8, y), 4, color.filled()));
        }

        if !inputs.release_vs_added.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .label_font((FONT, LABEL_SIZE))
                .draw()?;
        }

        let (x_range, y_range) = point_ranges(&inputs.movie_release_vs_duration);
        let mut chart = ChartBuilder::on(&right)
            .caption("Movies: release year vs duration", (FONT, TITLE_SIZE))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)?;

        chart
            .configure_mesh()
            .x_desc("release_year")
            .y_desc("duration_num")
            .label_style((FONT, LABEL_SIZE))
            .draw()?;

        chart.draw_series(
            inputs
                .movie_release_vs_duration
                .iter()
                .map(|&p| Circle::new(p, 3, SCATTER_GREEN.mix(0.6).filled())),
        )?;

        Ok(())
    }
}

/// Value range with 5% padding on both ends, never degenerate.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let (min, max) = min_max(values);
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn point_ranges(points: &[(f64, f64)]) -> (std::ops::Range<f64>, std::ops::Range<f64>) {
    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (x0, x1) = padded_range(&xs);
    let (y0, y1) = padded_range(&ys);
    (x0..x1, y0..y1)
}
