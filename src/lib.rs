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

//! Generators for Wavefront OBJ meshes: metaball polygonization by marching
//! tetrahedra, plus extrusion and lathe transforms of existing OBJ files.

/// Common math types
pub mod math;

/// Traits for defining isosurface data sources
pub mod source;

/// Metaballs and the energy fields they combine into.
pub mod implicit;

/// Sampling grids and their division into cubes and tetrahedra.
pub mod traversal;

/// JSON metaball descriptions.
pub mod description;

/// Reading and writing OBJ files.
pub mod obj;

/// Turning planar surfaces into solids.
pub mod extrusion;

/// Surfaces of revolution.
pub mod lathe;

mod error;
mod marching_tetrahedra;
mod mesh;
mod vertex_pool;

pub use self::{error::*, marching_tetrahedra::*, mesh::*, vertex_pool::*};
