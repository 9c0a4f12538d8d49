// Copyright 2018 Tristam MacDonald
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

use crate::math::Vec3;

/// A source capable of sampling a scalar energy field at arbitrary points.
///
/// Unlike a signed distance field, larger values lie deeper inside the
/// surface; the isosurface sits wherever the energy equals the chosen
/// threshold.
pub trait ScalarSource {
    /// Samples the energy field at the given point.
    fn sample_scalar(&self, p: Vec3) -> f64;
}

impl<S: ScalarSource + ?Sized> ScalarSource for &S {
    fn sample_scalar(&self, p: Vec3) -> f64 {
        (**self).sample_scalar(p)
    }
}
