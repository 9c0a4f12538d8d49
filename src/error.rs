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
use std::{io, path::PathBuf};
use thiserror::Error;

/// Result type for mesh generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while reading inputs, generating meshes and
/// writing them out.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed description: {0}")]
    Description(#[from] serde_json::Error),

    #[error("grid_size must be a positive number, got {0}")]
    InvalidGridSize(f64),

    #[error("threshold must be a finite number, got {0}")]
    InvalidThreshold(f64),

    #[error("description defines no blobs")]
    NoBlobs,

    #[error("grid bounds collapse to zero cells along the {axis} axis")]
    DegenerateGrid { axis: char },

    #[error("a grid of {dimensions:?} vertices exceeds the limit of {limit}")]
    GridTooLarge { dimensions: [f64; 3], limit: usize },

    #[error("line {line}: {message}")]
    MalformedObj { line: usize, message: String },

    #[error("line {line}: vertex {index} does not exist, the file defines {count}")]
    VertexOutOfRange {
        line: usize,
        index: usize,
        count: usize,
    },

    #[error("mesh has no faces to extrude")]
    NoFaces,

    #[error("first face is degenerate, so the extrusion direction is undefined")]
    DegenerateFace,

    #[error("lathe needs at least one step")]
    NoSteps,
}

impl Error {
    pub(crate) fn malformed_obj(line: usize, message: impl Into<String>) -> Self {
        Self::MalformedObj {
            line,
            message: message.into(),
        }
    }
}
