use super::Point;

/// An infinite line through two points, with cached slope/intercept for
/// the common case, and an explicit `vertical` flag for the degenerate
/// one (`p1.x == p2.x`, where slope is undefined).
#[derive(Debug, Clone, Copy)]
pub struct Line {
  pub p1: Point,
  pub p2: Point,
  slope: Option<f64>,
  intercept: f64,
  pub vertical: bool,
}

impl Line {
  pub fn new(p1: Point, p2: Point) -> Line {
    if p1.x == p2.x {
      Line {
        p1,
        p2,
        slope: None,
        intercept: 0.0,
        vertical: true,
      }
    } else {
      let slope = (p2.y - p1.y) / (p2.x - p1.x);
      let intercept = p1.y - slope * p1.x;
      Line {
        p1,
        p2,
        slope: Some(slope),
        intercept,
        vertical: false,
      }
    }
  }

  pub fn slope(&self) -> Option<f64> {
    self.slope
  }

  /// The point on the line at the given `x`. `None` for vertical lines.
  pub fn at_x(&self, x: f64) -> Option<Point> {
    let slope = self.slope?;
    Some(Point::new(x, slope * x + self.intercept))
  }

  pub fn midpoint(&self) -> Point {
    self.p1.midpoint(&self.p2)
  }

  fn sqr_distance(&self, p: &Point) -> f64 {
    let numerator = (self.p2.x - self.p1.x) * (self.p1.y - p.y) - (self.p1.x - p.x) * (self.p2.y - self.p1.y);
    let numerator = numerator * numerator;
    let denominator = (self.p2.x - self.p1.x).powi(2) + (self.p2.y - self.p1.y).powi(2);
    numerator / denominator
  }

  /// Perpendicular distance from `p` to the (infinite) line.
  pub fn distance(&self, p: &Point) -> f64 {
    self.sqr_distance(p).sqrt()
  }

  /// Intersection point of two lines, or `None` if parallel
  /// (including coincident).
  pub fn intersection(&self, that: &Line) -> Option<Point> {
    match (self.slope, that.slope) {
      (Some(s1), Some(s2)) if s1 == s2 => None,
      (None, None) => None,
      (None, Some(_)) => that.at_x(self.p1.x),
      (Some(_), None) => self.at_x(that.p1.x),
      (Some(s1), Some(s2)) => {
        let x = (self.intercept - that.intercept) / (s2 - s1);
        self.at_x(x)
      }
    }
  }
}
