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
use crate::math::Vec3;
use std::{collections::HashMap, fmt};

/// The 1-based identifier of a mesh vertex, as written to OBJ `f` lines.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct VertexId(usize);

impl VertexId {
    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A surface vertex: a point where the isosurface crosses a grid edge.
///
/// Two vertices are equal when their positions are exactly equal, regardless
/// of id.
#[derive(Copy, Clone, Debug)]
pub struct Vertex {
    pub id: VertexId,
    pub position: Vec3,
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

/// Exact bit pattern of a position. Negative zero is folded into positive
/// zero first, so keys agree exactly when the coordinates compare equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
struct PointKey([u64; 3]);

impl From<Vec3> for PointKey {
    fn from(p: Vec3) -> Self {
        let bits = |c: f64| (c + 0.0).to_bits();
        PointKey([bits(p.x), bits(p.y), bits(p.z)])
    }
}

/// Deduplicates surface vertices during extraction.
///
/// Inserting a position that is already pooled hands back the existing vertex,
/// so faces from neighbouring tetrahedra end up sharing vertices. New
/// positions receive the next id, counting up from 1. A pool lives for a
/// single polygonization run.
pub struct VertexPool {
    vertices: Vec<Vertex>,
    indices: HashMap<PointKey, usize>,
}

impl VertexPool {
    pub fn new() -> Self {
        Self {
            vertices: vec![],
            indices: HashMap::new(),
        }
    }

    /// Look up `position`, adding it to the pool if it isn't there yet.
    pub fn insert(&mut self, position: Vec3) -> Vertex {
        let key = PointKey::from(position);
        if let Some(&index) = self.indices.get(&key) {
            return self.vertices[index];
        }

        let vertex = Vertex {
            id: VertexId(self.vertices.len() + 1),
            position,
        };
        self.indices.insert(key, self.vertices.len());
        self.vertices.push(vertex);
        vertex
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Pooled vertices in id order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}

impl Default for VertexPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;

    #[test]
    fn test_ids_count_up_from_one() {
        let mut pool = VertexPool::new();

        let a = pool.insert(vec3(0.0, 0.0, 0.0));
        let b = pool.insert(vec3(1.0, 0.0, 0.0));
        let c = pool.insert(vec3(0.0, 1.0, 0.0));

        assert_eq!(a.id.get(), 1);
        assert_eq!(b.id.get(), 2);
        assert_eq!(c.id.get(), 3);
        assert_eq!(pool.len(), 3);
        assert_eq!(
            pool.vertices().iter().map(|v| v.id.get()).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_duplicates_are_shared() {
        let mut pool = VertexPool::new();

        let a = pool.insert(vec3(0.25, 0.5, 0.75));
        pool.insert(vec3(1.0, 1.0, 1.0));
        let again = pool.insert(vec3(0.25, 0.5, 0.75));

        assert_eq!(again.id, a.id);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.insert(vec3(1.0, 1.0, 1.0)).id.get(), 2);
    }

    #[test]
    fn test_no_tolerance() {
        let mut pool = VertexPool::new();

        let a = pool.insert(vec3(0.1 + 0.2, 0.0, 0.0));
        let b = pool.insert(vec3(0.3, 0.0, 0.0));

        assert_ne!(a.id, b.id);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_signed_zero_matches() {
        let mut pool = VertexPool::new();

        let a = pool.insert(vec3(0.0, 1.0, 0.0));
        let b = pool.insert(vec3(-0.0, 1.0, -0.0));

        assert_eq!(a.id, b.id);
    }
}
