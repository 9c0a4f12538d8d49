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
use crate::{implicit::Blob, math::Vec3, source::ScalarSource};

/// The combined energy field of a set of blobs. Contributions are summed, so
/// overlapping blobs merge smoothly and negative blobs carve into their
/// neighbours.
#[derive(Clone, Debug, Default)]
pub struct Field {
    blobs: Vec<Blob>,
}

impl Field {
    pub fn new(blobs: Vec<Blob>) -> Self {
        Self { blobs }
    }

    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// The axis-aligned box enclosing every blob out to its radius. The box
    /// always contains the origin, even when no blob comes near it.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.blobs
            .iter()
            .fold((Vec3::zero(), Vec3::zero()), |(min, max), blob| {
                (min.min(blob.min_corner()), max.max(blob.max_corner()))
            })
    }
}

impl ScalarSource for Field {
    fn sample_scalar(&self, p: Vec3) -> f64 {
        self.blobs
            .iter()
            .fold(0.0, |energy, blob| energy + blob.sample_scalar(p))
    }
}
