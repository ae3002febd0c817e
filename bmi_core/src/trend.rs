//! Geometry for the BMI trend chart.
//!
//! Rendering is left to the front-end; this module only decides where the
//! points go so the layout can be tested without a display.

/// Vertical padding added above and below the data range.
const Y_PADDING: f64 = 1.0;

/// Historical BMI values numbered from 1 in entry order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrendSeries {
    values: Vec<f64>,
}

/// Pixel-space rectangle the series is projected into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Inset a `width` x `height` canvas by `margin` on every side.
    pub fn inset(width: f64, height: f64, margin: f64) -> Self {
        Self::with_margins(width, height, margin, margin, margin, margin)
    }

    /// Inset a canvas by separate left, top, right and bottom margins.
    pub fn with_margins(
        width: f64,
        height: f64,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    ) -> Self {
        Self {
            left,
            top,
            width: (width - left - right).max(0.0),
            height: (height - top - bottom).max(0.0),
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

impl TrendSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether at least one value can be drawn (NaN and infinities cannot).
    pub fn is_plottable(&self) -> bool {
        self.values.iter().any(|v| v.is_finite())
    }

    /// `(entry number, bmi)` pairs, entry numbers starting at 1
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &bmi)| (i + 1, bmi))
    }

    /// Padded range of the finite values, `None` when there is nothing to plot.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.values.iter().copied().filter(|v| v.is_finite());
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Some((min - Y_PADDING, max + Y_PADDING))
    }

    /// Screen x of an entry number (1-based). A lone entry sits in the middle.
    pub fn x_position(&self, area: &PlotArea, entry: usize) -> Option<f64> {
        if entry == 0 || entry > self.values.len() {
            return None;
        }
        let steps = self.values.len() - 1;
        if steps == 0 {
            return Some(area.left + area.width / 2.0);
        }
        Some(area.left + area.width * (entry - 1) as f64 / steps as f64)
    }

    /// Screen y of a BMI value. Screen y grows downward.
    pub fn y_position(&self, area: &PlotArea, bmi: f64) -> Option<f64> {
        let (y_min, y_max) = self.y_bounds()?;
        Some(area.bottom() - area.height * (bmi - y_min) / (y_max - y_min))
    }

    /// Map every finite point into `area`. Entry numbering is kept, so a
    /// skipped value leaves a gap on the x axis.
    pub fn project(&self, area: &PlotArea) -> Vec<(f64, f64)> {
        self.points()
            .filter(|(_, bmi)| bmi.is_finite())
            .filter_map(|(entry, bmi)| {
                Some((self.x_position(area, entry)?, self.y_position(area, bmi)?))
            })
            .collect()
    }

    /// Entry numbers worth labelling on the x axis, at most `max_labels` of them.
    pub fn x_ticks(&self, max_labels: usize) -> Vec<usize> {
        let len = self.values.len();
        if len == 0 || max_labels == 0 {
            return Vec::new();
        }
        let step = len.div_ceil(max_labels);
        (1..=len).step_by(step).collect()
    }

    /// Evenly spaced y-axis tick values covering the padded range.
    pub fn y_ticks(&self, count: usize) -> Vec<f64> {
        let Some((y_min, y_max)) = self.y_bounds() else {
            return Vec::new();
        };
        if count < 2 {
            return vec![y_min];
        }
        let step = (y_max - y_min) / (count - 1) as f64;
        (0..count).map(|i| y_min + step * i as f64).collect()
    }
}
