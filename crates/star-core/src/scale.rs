// File: crates/star-core/src/scale.rs
// Summary: Chart-space -> pixel transform for the plot rectangle.

use crate::geometry::{PointF, RectF};
use crate::mapper::{map_record, normalized_x, ChartMode, ChartPoint, SeriesBounds};
use crate::types::StarRecord;

/// Maps chart-space points into a plot rectangle. Both the on-screen chart and
/// the exported frames go through this, so they agree pixel for pixel.
#[derive(Clone, Copy, Debug)]
pub struct PlotScale {
    pub plot: RectF,
    pub mode: ChartMode,
    pub bounds: SeriesBounds,
}

impl PlotScale {
    pub fn new(plot: RectF, mode: ChartMode, bounds: SeriesBounds) -> Self {
        Self { plot, mode, bounds }
    }

    #[inline]
    pub fn to_px(&self, p: ChartPoint) -> PointF {
        let nx = normalized_x(p.x, self.mode, &self.bounds) as f32;
        PointF::new(self.plot.left + nx * self.plot.width(), self.plot.top + p.y as f32 * self.plot.height())
    }

    #[inline]
    pub fn record_px(&self, record: &StarRecord) -> PointF {
        self.to_px(map_record(record, self.mode, &self.bounds))
    }

    /// Pixel row for a count value (used for y tick labels).
    pub fn count_px(&self, count: f64) -> f32 {
        let y = if self.bounds.max_count == 0 { 1.0 } else { 1.0 - count / self.bounds.max_count as f64 };
        self.plot.top + y as f32 * self.plot.height()
    }
}
