// Copyright 2021 Tristam MacDonald
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A 3 dimensional point or direction.
///
/// Equality is exact, component-wise floating point comparison. Surface
/// vertices are only merged when their coordinates coincide bit for bit, so no
/// tolerance is applied here.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

pub fn vec3(x: f64, y: f64, z: f64) -> Vec3 {
    Vec3::new(x, y, z)
}

macro_rules! impl_arithmetic_op {
    ($name:ident, $op_name:ident, $op_small_name:ident, $op:tt { $($field:ident ),+ }) => {
        impl std::ops::$op_name for $name {
            type Output = $name;
            fn $op_small_name(self, other: $name) -> $name {
                $name::new($(self.$field $op other.$field),*)
            }
        }
    };
}

macro_rules! impl_scalar_op {
    ($name:ident, $op_name:ident, $op_small_name:ident, $op:tt { $($field:ident ),+ }) => {
        impl std::ops::$op_name<f64> for $name {
            type Output = $name;
            fn $op_small_name(self, other: f64) -> $name {
                $name::new($(self.$field $op other),*)
            }
        }
    };
}

impl_arithmetic_op!(Vec3, Add, add, + { x, y, z });
impl_arithmetic_op!(Vec3, Sub, sub, - { x, y, z });
impl_arithmetic_op!(Vec3, Mul, mul, * { x, y, z });
impl_scalar_op!(Vec3, Mul, mul, * { x, y, z });
impl_scalar_op!(Vec3, Div, div, / { x, y, z });

impl Vec3 {
    /// Create a vector
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a vector with all coordinates set to zero
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Sum all of the components in this vector
    pub fn component_sum(&self) -> f64 {
        self.x + self.y + self.z
    }

    /// Euclidean length of this vector
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance between this point and another
    pub fn distance(&self, other: Self) -> f64 {
        (other - *self).magnitude()
    }

    /// Calculate the dot product of this vector and another
    pub fn dot(&self, other: Self) -> f64 {
        (*self * other).component_sum()
    }

    /// Compute the cross product of this vector and another
    pub fn cross(&self, rhs: Self) -> Self {
        Self {
            x: self.y * rhs.z - self.z * rhs.y,
            y: self.z * rhs.x - self.x * rhs.z,
            z: self.x * rhs.y - self.y * rhs.x,
        }
    }

    /// The cross product of this vector and another, divided by the length of
    /// *this* vector rather than by the length of the product.
    ///
    /// The result is only a unit vector when `other` is a unit vector
    /// perpendicular to `self`. Face orientation probes the field at an offset
    /// measured with this vector, so the scaling must stay as it is.
    pub fn normal(&self, other: Self) -> Self {
        self.cross(other) / self.magnitude()
    }

    /// Unit length copy of this vector, or `None` for a zero vector
    pub fn normalised(&self) -> Option<Self> {
        let l = self.magnitude();
        if l.abs() < std::f64::EPSILON {
            None
        } else {
            Some(*self / l)
        }
    }

    /// Create a vector by taking the min value of each component in this vector
    /// and another
    pub fn min(&self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Create a vector by taking the max value of each component in this vector
    /// and another
    pub fn max(&self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// Create a new vector by applying the provided function to each component
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }
}

impl std::ops::Index<usize> for Vec3 {
    type Output = f64;
    fn index(&self, index: usize) -> &f64 {
        [&self.x, &self.y, &self.z][index]
    }
}

impl std::ops::IndexMut<usize> for Vec3 {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        [&mut self.x, &mut self.y, &mut self.z][index]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude_and_distance() {
        assert_eq!(vec3(2.0, 3.0, 6.0).magnitude(), 7.0);
        assert_eq!(vec3(1.0, 1.0, 1.0).distance(vec3(3.0, 4.0, 7.0)), 7.0);
        assert_eq!(Vec3::zero().magnitude(), 0.0);
    }

    #[test]
    fn test_arithmetic() {
        let a = vec3(1.0, 2.0, 3.0);
        let b = vec3(-1.0, 0.5, 2.0);

        assert_eq!(a + b, vec3(0.0, 2.5, 5.0));
        assert_eq!(a - b, vec3(2.0, 1.5, 1.0));
        assert_eq!(a * b, vec3(-1.0, 1.0, 6.0));
        assert_eq!(a * 2.0, vec3(2.0, 4.0, 6.0));
        assert_eq!(a / 2.0, vec3(0.5, 1.0, 1.5));
        assert_eq!(a.dot(b), 6.0);
        assert_eq!(a[0], 1.0);
        assert_eq!(a[2], 3.0);
    }

    #[test]
    fn test_cross() {
        let x = vec3(1.0, 0.0, 0.0);
        let y = vec3(0.0, 1.0, 0.0);

        assert_eq!(x.cross(y), vec3(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), vec3(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_normal_divides_by_own_length() {
        let a = vec3(2.0, 0.0, 0.0);
        let b = vec3(0.0, 3.0, 0.0);

        // |a x b| = 6, but the result is divided by |a| = 2.
        assert_eq!(a.normal(b), vec3(0.0, 0.0, 3.0));

        let n = vec3(1.0, 0.0, 0.0).normal(vec3(0.0, 1.0, 0.0));
        assert_relative_eq!(n.magnitude(), 1.0);
    }

    #[test]
    fn test_equality_is_exact() {
        let a = vec3(0.1 + 0.2, 0.0, 0.0);
        assert_ne!(a, vec3(0.3, 0.0, 0.0));
        assert_eq!(vec3(-0.0, 0.0, 0.0), Vec3::zero());
    }

    #[test]
    fn test_normalised() {
        assert!(Vec3::zero().normalised().is_none());
        let n = vec3(0.0, 3.0, 4.0).normalised().unwrap();
        assert_relative_eq!(n.y, 0.6);
        assert_relative_eq!(n.z, 0.8);
    }
}
