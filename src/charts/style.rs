//! Colors, color maps and fonts shared by the static charts.

use plotters::style::RGBColor;

pub const FONT: &str = "sans-serif";
pub const TITLE_SIZE: u32 = 24;
pub const LABEL_SIZE: u32 = 15;
pub const ANNOTATION_SIZE: u32 = 16;

pub const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
pub const SALMON: RGBColor = RGBColor(250, 128, 114);
pub const LIGHT_BLUE: RGBColor = RGBColor(173, 216, 230);
pub const LIGHT_CORAL: RGBColor = RGBColor(240, 128, 128);
pub const SCATTER_GREEN: RGBColor = RGBColor(0, 128, 0);
pub const OUTLINE: RGBColor = RGBColor(60, 60, 60);

/// One color per `type` value in the scatter plot.
pub const TYPE_PALETTE: [RGBColor; 4] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
];

// viridis and magma endpoints for the two bar charts
const VIRIDIS: [RGBColor; 3] = [
    RGBColor(68, 1, 84),
    RGBColor(33, 145, 140),
    RGBColor(253, 231, 37),
];
const MAGMA: [RGBColor; 3] = [
    RGBColor(0, 0, 4),
    RGBColor(183, 55, 121),
    RGBColor(252, 253, 191),
];

const COOL: RGBColor = RGBColor(59, 76, 192);
const NEUTRAL: RGBColor = RGBColor(221, 221, 221);
const WARM: RGBColor = RGBColor(180, 4, 38);

const BLUES_LOW: RGBColor = RGBColor(247, 251, 255);
const BLUES_HIGH: RGBColor = RGBColor(8, 48, 107);

fn lerp(a: RGBColor, b: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn gradient(stops: &[RGBColor; 3], t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    if t <= 0.5 {
        lerp(stops[0], stops[1], t * 2.0)
    } else {
        lerp(stops[1], stops[2], (t - 0.5) * 2.0)
    }
}

/// Diverging map for correlations in [-1, 1].
pub fn coolwarm(value: f64) -> RGBColor {
    gradient(&[COOL, NEUTRAL, WARM], (value + 1.0) / 2.0)
}

/// Sequential map for counts, `t` in [0, 1].
pub fn blues(t: f64) -> RGBColor {
    lerp(BLUES_LOW, BLUES_HIGH, t)
}

/// Bar color `index` of `count`, spread over the palette.
pub fn palette_color(stops: &[RGBColor; 3], index: usize, count: usize) -> RGBColor {
    let t = if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    };
    // Stay off the near-white end so light bars remain visible
    gradient(stops, t * 0.85)
}

pub fn viridis(index: usize, count: usize) -> RGBColor {
    palette_color(&VIRIDIS, index, count)
}

pub fn magma(index: usize, count: usize) -> RGBColor {
    palette_color(&MAGMA, index, count)
}

/// Black or white, whichever reads better on `background`.
pub fn text_on(background: RGBColor) -> RGBColor {
    let luma = 0.299 * background.0 as f64 + 0.587 * background.1 as f64 + 0.114 * background.2 as f64;
    if luma > 140.0 {
        RGBColor(0, 0, 0)
    } else {
        RGBColor(255, 255, 255)
    }
}
