/// Scroll range of one axis.
///
/// `value` is kept within `[lower, upper - page_size]`. When the page is
/// larger than the range the upper bound falls below `lower`; clamping then
/// applies the upper bound first and the lower bound last, so the value pins
/// to `lower` instead of going negative.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Adjustment {
    value: f64,
    lower: f64,
    upper: f64,
    page_size: f64,
}

impl Adjustment {
    pub fn new(lower: f64, upper: f64, page_size: f64) -> Self {
        Self { value: lower, lower, upper, page_size }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    pub fn lower(&self) -> f64 {
        self.lower
    }

    #[inline]
    pub fn upper(&self) -> f64 {
        self.upper
    }

    #[inline]
    pub fn page_size(&self) -> f64 {
        self.page_size
    }

    /// Largest value the range admits (may be below `lower`).
    #[inline]
    pub fn max_value(&self) -> f64 {
        self.upper - self.page_size
    }

    /// `true` when the content is larger than the visible page.
    #[inline]
    pub fn is_scrollable(&self) -> bool {
        self.upper - self.lower > self.page_size
    }

    /// Clamps `v` into the valid range.
    pub fn clamp(&self, v: f64) -> f64 {
        v.min(self.max_value()).max(self.lower)
    }

    /// Sets the value, clamped. Returns `true` if it changed.
    pub fn set_value(&mut self, v: f64) -> bool {
        let v = self.clamp(v);
        let changed = v != self.value;
        self.value = v;
        changed
    }

    /// Replaces bounds and page size, re-clamping the current value.
    pub fn configure(&mut self, lower: f64, upper: f64, page_size: f64) {
        self.lower = lower;
        self.upper = upper;
        self.page_size = page_size;
        self.value = self.clamp(self.value);
    }
}
