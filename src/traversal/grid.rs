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
use crate::{
    error::{Error, Result},
    implicit::Field,
    math::Vec3,
    source::ScalarSource,
};
use tracing::debug;

const AXES: [char; 3] = ['x', 'y', 'z'];

/// Most vertices a grid may hold, about half a gigabyte of samples.
pub const MAX_GRID_VERTICES: usize = 1 << 24;

/// A sample point of the grid, together with the field energy at that point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridVertex {
    pub position: Vec3,
    pub energy: f64,
}

/// A regular lattice of sample points covering every blob in a field.
///
/// Vertices are stored in a flat array, x-major then y then z.
#[derive(Clone, Debug)]
pub struct Grid {
    origin: Vec3,
    cell_size: f64,
    dimensions: [usize; 3],
    vertices: Vec<GridVertex>,
}

impl Grid {
    /// Lay out a grid over the bounds of `field`, with vertices spaced
    /// `cell_size` apart. All energies start at zero; call
    /// [sample](#method.sample) to evaluate the field.
    ///
    /// Each axis holds `ceil(extent / cell_size)` vertices starting at the
    /// minimum corner of the field's bounds.
    pub fn enclosing(field: &Field, cell_size: f64) -> Result<Self> {
        if !(cell_size > 0.0 && cell_size.is_finite()) {
            return Err(Error::InvalidGridSize(cell_size));
        }

        let (min, max) = field.bounds();
        let mut counts = [0.0; 3];
        for axis in 0..3 {
            counts[axis] = ((max[axis] - min[axis]) / cell_size).ceil();
            if !(counts[axis] >= 1.0) {
                return Err(Error::DegenerateGrid { axis: AXES[axis] });
            }
        }

        let too_large = || Error::GridTooLarge {
            dimensions: counts,
            limit: MAX_GRID_VERTICES,
        };
        if counts.iter().any(|&c| c > MAX_GRID_VERTICES as f64) {
            return Err(too_large());
        }
        let dimensions = counts.map(|c| c as usize);
        let [nx, ny, nz] = dimensions;
        let total = nx
            .checked_mul(ny)
            .and_then(|n| n.checked_mul(nz))
            .filter(|&n| n <= MAX_GRID_VERTICES)
            .ok_or_else(too_large)?;

        let mut vertices = Vec::with_capacity(total);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    vertices.push(GridVertex {
                        position: Vec3::new(
                            min.x + i as f64 * cell_size,
                            min.y + j as f64 * cell_size,
                            min.z + k as f64 * cell_size,
                        ),
                        energy: 0.0,
                    });
                }
            }
        }

        debug!(?dimensions, cell_size, "laid out grid");

        Ok(Self {
            origin: min,
            cell_size,
            dimensions,
            vertices,
        })
    }

    /// Lay out a grid over `field` and evaluate the field at every vertex.
    pub fn sampled(field: &Field, cell_size: f64) -> Result<Self> {
        let mut grid = Self::enclosing(field, cell_size)?;
        grid.sample(field);
        Ok(grid)
    }

    /// Evaluate `source` at every grid vertex, storing the energies.
    pub fn sample<S: ScalarSource>(&mut self, source: &S) {
        for vertex in &mut self.vertices {
            vertex.energy = source.sample_scalar(vertex.position);
        }
    }

    /// The position of the first grid vertex.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// The number of vertices along each axis.
    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    pub fn vertices(&self) -> &[GridVertex] {
        &self.vertices
    }

    /// The vertex at lattice coordinate (i, j, k), if it lies in the grid.
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<&GridVertex> {
        let [nx, ny, nz] = self.dimensions;
        if i < nx && j < ny && k < nz {
            Some(&self.vertices[self.index(i, j, k)])
        } else {
            None
        }
    }

    pub(crate) fn index(&self, i: usize, j: usize, k: usize) -> usize {
        let [_, ny, nz] = self.dimensions;
        (i * ny + j) * nz + k
    }
}
