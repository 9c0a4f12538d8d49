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

use crate::{
    description::MetaballsDescription,
    error::Result,
    mesh::{Face, Mesh},
    obj::write_atomic,
    source::ScalarSource,
    traversal::{Decomposition, Grid, GridVertex, Tetrahedron},
    vertex_pool::{Vertex, VertexPool},
};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Distance, in multiples of the face normal, at which the field is probed to
/// decide which way a face should point.
const PROBE_DISTANCE: f64 = 2.0;

/// Extracts meshes from energy fields using the marching tetrahedra algorithm.
///
/// Every grid cube is split into tetrahedra, and wherever a tetrahedron
/// straddles the threshold the crossing points along its edges are joined into
/// one or two triangles.
pub struct MarchingTetrahedra {
    threshold: f64,
    decomposition: Decomposition,
}

impl MarchingTetrahedra {
    /// Create a new MarchingTetrahedra extracting the surface where the field
    /// energy equals `threshold`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            decomposition: Decomposition::default(),
        }
    }

    /// Choose how grid cubes are divided into tetrahedra.
    pub fn with_decomposition(mut self, decomposition: Decomposition) -> Self {
        self.decomposition = decomposition;
        self
    }

    /// Extracts a mesh from a sampled [Grid].
    ///
    /// The grid must already hold the energies of `source`, which is probed
    /// again at arbitrary points to orient each face so that it points away
    /// from the high energy side of the surface.
    pub fn extract<S>(&self, grid: &Grid, source: &S) -> Mesh
    where
        S: ScalarSource,
    {
        let mut pool = VertexPool::new();
        let mut faces = vec![];

        for tetrahedron in grid.tetrahedra(self.decomposition) {
            self.extract_tetrahedron(&tetrahedron, source, &mut pool, &mut faces);
        }

        debug!(
            vertices = pool.len(),
            faces = faces.len(),
            threshold = self.threshold,
            cell_size = grid.cell_size(),
            origin = ?grid.origin(),
            decomposition = ?self.decomposition,
            "extracted isosurface"
        );

        Mesh::new(pool.into_vertices(), faces)
    }

    /// Extract the faces of a single tetrahedron, appending them to `faces`.
    ///
    /// Crossing points are deduplicated through `pool`, which must be shared
    /// by every tetrahedron of the same mesh.
    pub fn extract_tetrahedron<S>(
        &self,
        tetrahedron: &Tetrahedron,
        source: &S,
        pool: &mut VertexPool,
        faces: &mut Vec<Face>,
    ) where
        S: ScalarSource,
    {
        let vertices = tetrahedron.vertices();
        if vertices.iter().all(|v| v.energy > self.threshold)
            || vertices.iter().all(|v| v.energy < self.threshold)
        {
            return;
        }

        // 3 points for a 1/3 split, 4 for a 2/2 split. Vertices sitting exactly
        // on the threshold belong to neither side, and can leave too few
        // points to form a triangle.
        let points = self.crossing_points(vertices, pool);
        if points.len() < 3 {
            return;
        }

        faces.push(self.orient(Face::new(points[0], points[1], points[2]), source));
        if points.len() > 3 {
            faces.push(self.orient(Face::new(points[1], points[2], points[3]), source));
        }
    }

    /// Interpolate the surface crossing on every edge running from a vertex
    /// below the threshold to one beyond it. Points come out ordered by below
    /// vertex, then by beyond vertex.
    fn crossing_points(&self, vertices: &[&GridVertex; 4], pool: &mut VertexPool) -> Vec<Vertex> {
        let below = vertices.iter().filter(|v| v.energy < self.threshold);
        let beyond: Vec<_> = vertices
            .iter()
            .filter(|v| v.energy > self.threshold)
            .collect();

        let mut points = Vec::with_capacity(4);
        for a in below {
            for b in &beyond {
                // a is strictly below and b strictly beyond, so the
                // denominator is never zero.
                let ratio = (self.threshold - a.energy) / (b.energy - a.energy);
                let position = a.position + (b.position - a.position) * ratio;
                points.push(pool.insert(position));
            }
        }
        points
    }

    /// Point the face away from the high energy side: if the field just off
    /// the face along its normal is not below the threshold, flip the face.
    ///
    /// This is a purely local test, and can misjudge faces whose probe lands
    /// inside another part of the surface.
    pub fn orient<S>(&self, face: Face, source: &S) -> Face
    where
        S: ScalarSource,
    {
        let probe = face.vertices()[0].position + face.normal() * PROBE_DISTANCE;
        if source.sample_scalar(probe) < self.threshold {
            face
        } else {
            face.flipped()
        }
    }
}

/// Polygonize a metaball description: validate it, sample its field over a
/// grid, and extract the isosurface.
pub fn polygonize(description: &MetaballsDescription) -> Result<Mesh> {
    description.validate()?;

    let field = description.field();
    let grid = Grid::sampled(&field, description.grid_size)?;

    Ok(MarchingTetrahedra::new(description.threshold)
        .with_decomposition(description.decomposition)
        .extract(&grid, &field))
}

/// Polygonize the description stored at `path`, writing the mesh next to it
/// with the extension replaced by `.obj`.
///
/// `decomposition` overrides the one in the description. Nothing is written
/// unless the whole mesh was generated. Returns the output path and the mesh.
pub fn polygonize_file(
    path: &Path,
    decomposition: Option<Decomposition>,
) -> Result<(PathBuf, Mesh)> {
    let mut description = MetaballsDescription::load(path)?;
    if let Some(decomposition) = decomposition {
        description.decomposition = decomposition;
    }

    let mesh = polygonize(&description)?;
    let output = path.with_extension("obj");
    write_atomic(&output, &mesh.to_obj())?;
    Ok((output, mesh))
}
