use serde::{Deserialize, Serialize};

use crate::consts::MIN_SELECTION_SIZE;

/// Integer pixel position. Used for both display and original image space;
/// the owning API states which space a value lives in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width/height pair in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Floating-point 2D offset (pan, deltas).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned integer rectangle in display space.
///
/// `contains` uses half-open bounds, matching integer pixel grids:
/// a 10x10 rect at (0, 0) covers pixels 0..=9 on each axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `size` centred on `center`.
    pub fn centered(center: Point, size: i32) -> Self {
        let half = size / 2;
        Self::new(center.x - half, center.y - half, size, size)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }
}

/// Rectangle in original image pixel coordinates.
///
/// Fields are signed because a rect being dragged may temporarily sit outside
/// the image; [`ImageRect::clamp_to_image`] restores the committed invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl ImageRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Bounding box of two corner points, in any drag direction.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (b.x - a.x).abs(),
            height: (b.y - a.y).abs(),
        }
    }

    /// Fold negative width/height back into the origin so both are non-negative.
    pub fn normalized(self) -> Self {
        let mut r = self;
        if r.width < 0 {
            r.x += r.width;
            r.width = -r.width;
        }
        if r.height < 0 {
            r.y += r.height;
            r.height = -r.height;
        }
        r
    }

    /// Clamp into `[0, W) x [0, H)` with each dimension at least one pixel.
    pub fn clamp_to_image(self, image: Size) -> Self {
        let img_w = image.width as i32;
        let img_h = image.height as i32;

        let x = self.x.min(img_w - 1).max(0);
        let y = self.y.min(img_h - 1).max(0);
        let w = self.width.min(img_w - x).max(1);
        let h = self.height.min(img_h - y).max(1);

        Self::new(x, y, w, h)
    }

    /// Large enough in both dimensions to be submitted for OCR.
    pub fn is_valid(&self) -> bool {
        self.width >= MIN_SELECTION_SIZE && self.height >= MIN_SELECTION_SIZE
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }
}

impl std::fmt::Display for ImageRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}

impl std::str::FromStr for ImageRect {
    type Err = String;

    /// Parses `x,y,width,height`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(format!("expected x,y,width,height but got '{s}'"));
        }
        let mut values = [0i32; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|e| format!("invalid number '{part}': {e}"))?;
        }
        let [x, y, width, height] = values;
        if width <= 0 || height <= 0 {
            return Err("width and height must be positive".into());
        }
        Ok(Self::new(x, y, width, height))
    }
}

/// Even-odd ray casting test of `p` against a closed polygon.
///
/// A horizontal ray to +inf is tested against each edge. The y-range test is
/// half-open (`y > min && y <= max`), so horizontal edges never count.
pub fn point_in_polygon(p: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let (x, y) = (p.x as f64, p.y as f64);
    let mut inside = false;
    let mut p1 = polygon[0];

    for i in 1..=n {
        let p2 = polygon[i % n];
        let (x1, y1) = (p1.x as f64, p1.y as f64);
        let (x2, y2) = (p2.x as f64, p2.y as f64);

        if y > y1.min(y2) && y <= y1.max(y2) && x <= x1.max(x2) && y1 != y2 {
            let x_inters = (y - y1) * (x2 - x1) / (y2 - y1) + x1;
            if x1 == x2 || x <= x_inters {
                inside = !inside;
            }
        }
        p1 = p2;
    }

    inside
}
