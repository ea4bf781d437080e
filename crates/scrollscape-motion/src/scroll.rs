/// Raw and smoothed page scroll plus the active section.
///
/// Invariants:
/// - `raw` and `smoothed` stay within `[0, total]`
/// - `section` stays within `[0, section_count - 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    raw: f32,
    smoothed: f32,
    section: usize,
    total: f32,
    section_count: usize,
}

impl ScrollState {
    pub fn new(total: f32, section_count: usize) -> Self {
        Self {
            raw: 0.0,
            smoothed: 0.0,
            section: 0,
            total: sanitize_total(total),
            section_count,
        }
    }

    #[inline]
    pub fn raw(&self) -> f32 {
        self.raw
    }

    #[inline]
    pub fn smoothed(&self) -> f32 {
        self.smoothed
    }

    #[inline]
    pub fn section(&self) -> usize {
        self.section
    }

    #[inline]
    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// Total scrollable distance.
    #[inline]
    pub fn total(&self) -> f32 {
        self.total
    }

    /// Replaces the scrollable distance and re-clamps both offsets.
    ///
    /// The active section is left alone; it is only recomputed on scroll.
    pub fn set_total(&mut self, total: f32) {
        self.total = sanitize_total(total);
        self.raw = self.raw.clamp(0.0, self.total);
        self.smoothed = self.smoothed.clamp(0.0, self.total);
    }

    /// Records a new raw offset.
    ///
    /// Returns the newly active section when the rounded offset lands in a
    /// different section than the stored one. NaN offsets are ignored.
    pub fn scroll_to(&mut self, offset: f32, viewport_height: f32) -> Option<usize> {
        if offset.is_nan() {
            return None;
        }

        self.raw = offset.clamp(0.0, self.total);

        let candidate = self.section_at(viewport_height);
        if candidate == self.section {
            return None;
        }

        self.section = candidate;
        Some(candidate)
    }

    /// Moves the smoothed offset toward the raw one by `factor` of the gap.
    pub fn smooth(&mut self, factor: f32) -> f32 {
        self.smoothed += (self.raw - self.smoothed) * factor;
        self.smoothed
    }

    /// Smoothed offset over the scrollable distance, approximately `[0, 1]`.
    ///
    /// A page with nothing to scroll reports 0.
    #[inline]
    pub fn normalized(&self) -> f32 {
        if self.total <= 0.0 { 0.0 } else { self.smoothed / self.total }
    }

    fn section_at(&self, viewport_height: f32) -> usize {
        let height = if viewport_height.is_finite() { viewport_height.max(1.0) } else { 1.0 };
        let last = self.section_count.saturating_sub(1);
        ((self.raw / height).round() as usize).min(last)
    }
}

fn sanitize_total(total: f32) -> f32 {
    if total.is_finite() { total.max(0.0) } else { 0.0 }
}
