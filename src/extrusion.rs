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
    obj::ObjDocument,
};
use std::collections::HashMap;
use tracing::debug;

/// Directed edges of every face, in face order, that no other face shares.
///
/// Edges are matched regardless of direction, so an edge is on the boundary
/// only if it occurs exactly once across the whole surface.
pub fn boundary_edges(faces: &[[usize; 3]]) -> Vec<(usize, usize)> {
    let directed: Vec<(usize, usize)> = faces
        .iter()
        .flat_map(|&[a, b, c]| [(a, b), (b, c), (c, a)])
        .collect();

    let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
    for &(a, b) in &directed {
        *counts.entry((a.min(b), a.max(b))).or_insert(0) += 1;
    }

    directed
        .into_iter()
        .filter(|&(a, b)| counts[&(a.min(b), a.max(b))] == 1)
        .collect()
}

/// Extrude a triangulated surface `distance` units along its normal, turning
/// it into a solid.
///
/// The direction is the unit normal of the first face, so the surface is
/// assumed to be planar. The input faces are reversed to form the back of
/// the solid, an offset copy forms the front, and each boundary edge is
/// bridged by a pair of side faces.
pub fn extrude(doc: &ObjDocument, distance: f64) -> Result<ObjDocument> {
    let &[a, b, c] = doc.faces.first().ok_or(Error::NoFaces)?;
    let corner = |i| doc.vertex(i).ok_or(Error::DegenerateFace);
    let (a, b, c) = (corner(a)?, corner(b)?, corner(c)?);
    let normal = (b - a)
        .cross(c - a)
        .normalised()
        .ok_or(Error::DegenerateFace)?;
    let offset = normal * distance;

    let n = doc.vertices.len();
    let boundary = boundary_edges(&doc.faces);

    let mut vertices = doc.vertices.clone();
    vertices.extend(doc.vertices.iter().map(|&v| v + offset));

    let mut faces = Vec::with_capacity(doc.faces.len() * 2 + boundary.len() * 2);
    faces.extend(doc.faces.iter().map(|&[a, b, c]| [c, b, a]));
    faces.extend(doc.faces.iter().map(|&[a, b, c]| [a + n, b + n, c + n]));
    for &(e0, e1) in &boundary {
        faces.push([e0, e1, e1 + n]);
        faces.push([e1 + n, e0 + n, e0]);
    }

    debug!(
        vertices = vertices.len(),
        faces = faces.len(),
        boundary_edges = boundary.len(),
        "extruded surface"
    );

    Ok(ObjDocument {
        info: doc.info.clone(),
        vertices,
        faces,
        lines: doc.lines.clone(),
    })
}
