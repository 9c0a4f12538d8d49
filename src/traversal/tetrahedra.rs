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
use crate::traversal::{Grid, GridVertex};
use serde::Deserialize;

/// Offsets of the 8 cube corners from the cube's minimum corner. The front
/// face (z = 0) is wound bottom-left, bottom-right, top-right, top-left, and
/// the back face (z = 1) repeats the same order.
pub const CUBE_CORNERS: [[usize; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Splits a cube into 5 tetrahedra: four corner tetrahedra around a central
/// one spanning corners 1, 3, 4 and 6.
pub const TETRAHEDRA: [[usize; 4]; 5] = [
    [0, 1, 3, 4],
    [1, 4, 5, 6],
    [1, 3, 4, 6],
    [1, 2, 3, 6],
    [3, 4, 6, 7],
];

/// Reflects cube corners across the plane x = 0.5.
const MIRROR_X: [usize; 8] = [1, 0, 3, 2, 5, 4, 7, 6];

/// How cubes are divided into tetrahedra.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Decomposition {
    /// Every cube uses the same 5 tetrahedra. Neighbouring cubes split their
    /// shared face along different diagonals, so the extracted surface may
    /// crack along cube boundaries.
    #[default]
    Fixed,
    /// Cubes alternate between the fixed pattern and its mirror image in a
    /// checkerboard, so shared faces always agree and surfaces close up.
    Alternating,
}

/// The 8 corners of one grid cell.
#[derive(Copy, Clone, Debug)]
pub struct Cube<'a> {
    /// Lattice coordinate of corner 0.
    pub index: [usize; 3],
    pub corners: [&'a GridVertex; 8],
}

/// 4 grid vertices bounding a tetrahedral cell.
#[derive(Copy, Clone, Debug)]
pub struct Tetrahedron<'a>(pub [&'a GridVertex; 4]);

impl<'a> Cube<'a> {
    /// Divide this cube into its 5 tetrahedra.
    pub fn tetrahedra(&self, decomposition: Decomposition) -> [Tetrahedron<'a>; 5] {
        let [i, j, k] = self.index;
        let mirrored = decomposition == Decomposition::Alternating && (i + j + k) % 2 == 1;

        let corner = |c: usize| {
            if mirrored {
                self.corners[MIRROR_X[c]]
            } else {
                self.corners[c]
            }
        };

        TETRAHEDRA.map(|t| Tetrahedron([corner(t[0]), corner(t[1]), corner(t[2]), corner(t[3])]))
    }
}

impl<'a> Tetrahedron<'a> {
    pub fn vertices(&self) -> &[&'a GridVertex; 4] {
        &self.0
    }
}

impl Grid {
    /// Iterate over every cell of the grid, x-major then y then z. A grid of
    /// `(nx, ny, nz)` vertices holds `(nx-1)(ny-1)(nz-1)` cubes.
    pub fn cubes(&self) -> impl Iterator<Item = Cube<'_>> + '_ {
        let [nx, ny, nz] = self.dimensions();
        let cells = |n: usize| 0..n.saturating_sub(1);

        cells(nx).flat_map(move |i| {
            cells(ny).flat_map(move |j| {
                cells(nz).map(move |k| {
                    let vertices = self.vertices();
                    let corners = CUBE_CORNERS
                        .map(|[di, dj, dk]| &vertices[self.index(i + di, j + dj, k + dk)]);

                    Cube {
                        index: [i, j, k],
                        corners,
                    }
                })
            })
        })
    }

    /// Iterate over every tetrahedron of every cube, five per cube.
    pub fn tetrahedra(
        &self,
        decomposition: Decomposition,
    ) -> impl Iterator<Item = Tetrahedron<'_>> + '_ {
        self.cubes()
            .flat_map(move |cube| cube.tetrahedra(decomposition))
    }
}
