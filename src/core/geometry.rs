//=========================================================================
// Geometry
//=========================================================================
//
// Small value types shared by the video contract and its clients.
//
// Coordinates are screen-space pixels, origin top-left, y growing down.
//
//=========================================================================

//=== Color ===============================================================

/// RGBA color with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Returns the same color with its alpha replaced.
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

//=== Position2D ==========================================================

/// A point (or offset) in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position2D {
    pub x: f32,
    pub y: f32,
}

impl Position2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to `other`.
    pub fn distance2(&self, other: &Position2D) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

//=== Rect2D ==============================================================

/// Axis-aligned rectangle given by its edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2D {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Rect2D {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Builds a rectangle from its top-left corner and size.
    pub fn from_origin(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, left + width, top, top + height)
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Position2D) -> bool {
        point.x >= self.left
            && point.x <= self.right
            && point.y >= self.top
            && point.y <= self.bottom
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

//=== Interpolation =======================================================

/// Linear interpolation from `from` toward `to` by factor `t`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

//=========================================================================
// Unit Tests
//=========================================================================
