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
use crate::{math::Vec3, source::ScalarSource};

/// Largest energy magnitude a blob may emit.
pub const MAX_ENERGY: f64 = 10.0;

/// A point energy emitter (a metaball).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Blob {
    position: Vec3,
    energy: f64,
    radius: f64,
}

impl Blob {
    /// Create a new blob.
    ///
    /// Out of range inputs are normalised rather than rejected: energies beyond
    /// ±10 are clamped to ±10, and negative radii become zero.
    pub fn new(position: Vec3, energy: f64, radius: f64) -> Self {
        let energy = if (-MAX_ENERGY..=MAX_ENERGY).contains(&energy) {
            energy
        } else if energy > 0.0 {
            MAX_ENERGY
        } else if energy < 0.0 {
            -MAX_ENERGY
        } else {
            0.0
        };
        let radius = if radius > 0.0 { radius } else { 0.0 };

        Self {
            position,
            energy,
            radius,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The corner of this blob's bounding cube nearest negative infinity.
    pub fn min_corner(&self) -> Vec3 {
        self.position.map(|c| c - self.radius)
    }

    /// The corner of this blob's bounding cube nearest positive infinity.
    pub fn max_corner(&self) -> Vec3 {
        self.position.map(|c| c + self.radius)
    }
}

impl ScalarSource for Blob {
    /// Quadratic falloff: the full energy at the centre, fading to zero at
    /// the radius, and nothing at or beyond it.
    fn sample_scalar(&self, p: Vec3) -> f64 {
        let d = p.distance(self.position);
        if d < self.radius {
            self.energy * (1.0 - d / self.radius).powi(2)
        } else {
            0.0
        }
    }
}
