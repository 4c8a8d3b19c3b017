/// A 2D keypoint position in the estimator's image space (usually pixels).
///
/// Upstream estimators report a joint they could not locate as `(0, 0)`,
/// so the origin doubles as the "missing" marker.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Point2D = Point2D { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_missing(&self) -> bool {
        *self == Self::ORIGIN || !self.is_finite()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
