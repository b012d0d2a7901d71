#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

/// A point in screen space (CSS pixels), or a scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn delta_from(self, other: Point) -> Point {
        Point { x: self.x - other.x, y: self.y - other.y }
    }
}

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive, i.e. the element has been laid out.
    #[must_use]
    pub fn is_laid_out(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[must_use]
    pub fn scaled(self, scale: f64) -> Size {
        Size { width: self.width * scale, height: self.height * scale }
    }
}

/// Viewport and document sizes sampled together for a single fit computation.
///
/// Never cached: a paper-size switch changes the document independently of the
/// window, so each computation samples fresh.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub viewport: Size,
    pub document: Size,
}

impl Dimensions {
    #[must_use]
    pub fn new(viewport: Size, document: Size) -> Self {
        Self { viewport, document }
    }

    /// Whether a fit can be computed without producing a degenerate scale.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.viewport.is_laid_out() && self.document.is_laid_out()
    }
}
