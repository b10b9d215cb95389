use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// A 2D real vector used for positions, velocities and steering cues.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[must_use]
    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    /// Rescales the vector to `length`, keeping its direction.
    ///
    /// A zero vector has no direction and is returned unchanged.
    #[must_use]
    pub fn with_length(self, length: f64) -> Self {
        let norm = self.length();
        if norm > 0.0 {
            self * (length / norm)
        } else {
            self
        }
    }

    /// Shortens the vector to at most `max` while keeping its direction.
    #[must_use]
    pub fn clamp_length(self, max: f64) -> Self {
        let norm = self.length();
        if norm > max {
            self * (max / norm)
        } else {
            self
        }
    }

    /// Heading angle in radians, in `(-PI, PI]`.
    #[must_use]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Component-wise mean of a set of vectors, `None` when the set is empty.
    pub fn mean<I>(vectors: I) -> Option<Vec2>
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut sum = Vec2::ZERO;
        let mut count = 0usize;
        for v in vectors {
            sum += v;
            count += 1;
        }
        (count > 0).then(|| sum / count as f64)
    }
}

impl From<[f64; 2]> for Vec2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_length_preserves_direction() {
        let v = Vec2::new(3.0, 4.0).with_length(10.0);
        assert!((v.x - 6.0).abs() < 1e-12);
        assert!((v.y - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_with_length_zero_vector_stays_zero() {
        assert_eq!(Vec2::ZERO.with_length(5.0), Vec2::ZERO);
    }

    #[test]
    fn test_clamp_length_only_shortens() {
        let short = Vec2::new(1.0, 1.0);
        assert_eq!(short.clamp_length(10.0), short);
        let long = Vec2::new(30.0, 40.0).clamp_length(5.0);
        assert!((long.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_empty_is_none() {
        assert!(Vec2::mean(Vec::new()).is_none());
        let m = Vec2::mean([Vec2::new(0.0, 0.0), Vec2::new(2.0, 4.0)]).unwrap();
        assert_eq!(m, Vec2::new(1.0, 2.0));
    }
}
