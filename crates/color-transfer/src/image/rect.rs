//! Axis-aligned pixel rectangles.

/// A rectangle in pixel coordinates, `x` along columns and `y` along rows.
///
/// The end coordinates are exclusive: the rectangle covers columns
/// `x1..x2` and rows `y1..y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Rect {
    /// Create a rectangle from its corners.
    #[inline]
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a rectangle from its top-left corner and a size.
    ///
    /// # Example
    ///
    /// ```
    /// use color_transfer::Rect;
    ///
    /// let rect = Rect::from_origin_size(10, 20, 50, 50);
    /// assert_eq!(rect, Rect::new(10, 20, 60, 70));
    /// ```
    #[inline]
    pub fn from_origin_size(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.x2.saturating_sub(self.x1)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y2.saturating_sub(self.y1)
    }

    /// True when the rectangle covers no pixel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Clip the rectangle to an image of the given size.
    ///
    /// The result may be empty when the rectangle lies entirely outside.
    pub fn clip(&self, width: usize, height: usize) -> Self {
        Self {
            x1: self.x1.min(width),
            y1: self.y1.min(height),
            x2: self.x2.min(width),
            y2: self.y2.min(height),
        }
    }

    /// True when `(row, col)` lies inside the rectangle.
    #[inline]
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.y1 && row < self.y2 && col >= self.x1 && col < self.x2
    }
}
