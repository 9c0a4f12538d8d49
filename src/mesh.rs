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
    math::Vec3,
    vertex_pool::{Vertex, VertexId},
};
use std::{collections::HashMap, fmt};

/// A triangular face. The winding order (v1, v2, v3) determines which way the
/// face points.
#[derive(Copy, Clone, Debug)]
pub struct Face([Vertex; 3]);

/// An edge within a mesh. Edges are bidirectional (i.e. Edge(u,v) and Edge(v,u)
/// represent the same edge)
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Edge(VertexId, VertexId);

impl Face {
    pub fn new(v1: Vertex, v2: Vertex, v3: Vertex) -> Self {
        Face([v1, v2, v3])
    }

    pub fn vertices(&self) -> &[Vertex; 3] {
        &self.0
    }

    pub fn ids(&self) -> [VertexId; 3] {
        [self.0[0].id, self.0[1].id, self.0[2].id]
    }

    /// The face normal, `(v2 - v1).normal(v3 - v1)`.
    ///
    /// See [Vec3::normal](../math/struct.Vec3.html#method.normal) for why this
    /// is generally not a unit vector.
    pub fn normal(&self) -> Vec3 {
        let [v1, v2, v3] = self.0;
        (v2.position - v1.position).normal(v3.position - v1.position)
    }

    /// The same face with the opposite winding: v1 and v3 swap places.
    pub fn flipped(&self) -> Self {
        let [v1, v2, v3] = self.0;
        Face([v3, v2, v1])
    }

    /// The three edges of the face, in winding order.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.ids();
        [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)]
    }
}

impl PartialEq for Face {
    /// Faces are equal when they use the same vertices and point the same way,
    /// i.e. one winding is a rotation of the other.
    fn eq(&self, other: &Self) -> bool {
        (0..3).any(|r| (0..3).all(|i| self.0[i] == other.0[(i + r) % 3]))
    }
}

impl Edge {
    /// Construct a new edge from the two vertices it connects.
    /// The edge direction will be normalised during construction.
    pub fn new(a: VertexId, b: VertexId) -> Edge {
        if a > b {
            Edge(b, a)
        } else {
            Edge(a, b)
        }
    }
}

/// An extracted surface: deduplicated vertices in id order, and the faces
/// built on them.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// The number of faces bordering each edge of the mesh. In an ideal world,
    /// meshes would be manifold, and exactly 2 faces would share a single
    /// edge. However extraction over a non-conforming decomposition leaves
    /// cracks, where only a single face borders an edge.
    pub fn edge_valence(&self) -> HashMap<Edge, usize> {
        let mut valence: HashMap<Edge, usize> = HashMap::new();
        for face in &self.faces {
            for &edge in face.edges().iter() {
                *valence.entry(edge).or_insert(0) += 1;
            }
        }
        valence
    }

    /// Edges bordered by a single face, in ascending order.
    pub fn boundary_edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .edge_valence()
            .into_iter()
            .filter(|&(_, valence)| valence == 1)
            .map(|(edge, _)| edge)
            .collect();
        edges.sort();
        edges
    }

    /// True if the mesh is a closed surface: it has faces, and every edge is
    /// shared by exactly 2 of them.
    pub fn is_closed_manifold(&self) -> bool {
        !self.faces.is_empty() && self.edge_valence().values().all(|&n| n == 2)
    }

    /// Render the mesh as OBJ text: a comment header, every vertex at full
    /// precision, a blank line, then every face by vertex id.
    pub fn to_obj(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Metaballs generated by objgen")?;
        writeln!(f)?;
        for v in &self.vertices {
            let p = v.position;
            writeln!(f, "v {} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(f)?;
        for face in &self.faces {
            let [a, b, c] = face.ids();
            writeln!(f, "f {} {} {}", a, b, c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{math::vec3, vertex_pool::VertexPool};

    fn tetrahedron_surface() -> Mesh {
        let mut pool = VertexPool::new();
        let a = pool.insert(vec3(0.0, 0.0, 0.0));
        let b = pool.insert(vec3(1.0, 0.0, 0.0));
        let c = pool.insert(vec3(0.0, 1.0, 0.0));
        let d = pool.insert(vec3(0.0, 0.0, 1.0));

        let faces = vec![
            Face::new(a, c, b),
            Face::new(a, b, d),
            Face::new(a, d, c),
            Face::new(b, c, d),
        ];
        Mesh::new(pool.into_vertices(), faces)
    }

    #[test]
    fn test_face_normal_and_flip() {
        let mesh = tetrahedron_surface();
        let face = mesh.faces()[0];

        assert_eq!(face.normal(), vec3(0.0, 0.0, -1.0));

        let n = face.flipped().normal();
        assert!(n.x == 0.0 && n.y == 0.0 && n.z > 0.0);
        assert_eq!(
            face.flipped().ids(),
            [face.ids()[2], face.ids()[1], face.ids()[0]]
        );
    }

    #[test]
    fn test_face_equality() {
        let mesh = tetrahedron_surface();
        let [a, c, b] = *mesh.faces()[0].vertices();

        // Rotating the winding keeps the direction the face points in.
        assert_eq!(Face::new(a, c, b), Face::new(c, b, a));
        // Reversing it does not.
        assert_ne!(Face::new(a, c, b), Face::new(a, b, c));
        assert_ne!(mesh.faces()[0], mesh.faces()[1]);
    }

    #[test]
    fn test_closed_surface() {
        let mesh = tetrahedron_surface();

        assert!(mesh.is_closed_manifold());
        assert!(mesh.boundary_edges().is_empty());
        assert_eq!(mesh.edge_valence().len(), 6);
    }

    #[test]
    fn test_open_surface() {
        let mut mesh = tetrahedron_surface();
        mesh.faces.pop();

        assert!(!mesh.is_closed_manifold());
        assert_eq!(mesh.boundary_edges().len(), 3);
        assert!(!Mesh::default().is_closed_manifold());
    }

    #[test]
    fn test_edge_is_undirected() {
        let mesh = tetrahedron_surface();
        let [a, b, _] = mesh.faces()[1].ids();

        assert_eq!(Edge::new(a, b), Edge::new(b, a));
        assert_eq!(mesh.edge_valence()[&Edge::new(b, a)], 2);
    }

    #[test]
    fn test_to_obj() {
        let mut pool = VertexPool::new();
        let a = pool.insert(vec3(0.0, 0.0, 0.0));
        let b = pool.insert(vec3(1.5, 0.0, 0.0));
        let c = pool.insert(vec3(0.0, 0.1, -2.0));
        let mesh = Mesh::new(pool.into_vertices(), vec![Face::new(a, b, c)]);

        assert_eq!(
            mesh.to_obj(),
            "# Metaballs generated by objgen\n\n\
             v 0 0 0\n\
             v 1.5 0 0\n\
             v 0 0.1 -2\n\
             \n\
             f 1 2 3\n"
        );
    }
}
