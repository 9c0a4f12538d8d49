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

//! Polygonize JSON metaball descriptions into OBJ meshes.

use anyhow::{Context, Result};
use clap::Parser;
use objgen::{polygonize_file, traversal::Decomposition};
use std::path::PathBuf;
use tracing::{debug, info};

/// Polygonize metaball descriptions into OBJ meshes
///
/// Each input is written next to itself with its extension replaced by .obj
#[derive(Parser)]
#[command(name = "metaballs", version)]
struct Cli {
    /// How grid cubes are divided into tetrahedra, overriding the description
    #[arg(long, value_enum)]
    decomposition: Option<Decomposition>,

    /// JSON metaball descriptions
    #[arg(name = "FILES", required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    for path in &cli.files {
        info!("polygonizing {}", path.display());

        let (output, mesh) = polygonize_file(path, cli.decomposition)
            .with_context(|| format!("failed to polygonize {}", path.display()))?;
        debug!(
            boundary_edges = mesh.boundary_edges().len(),
            closed = mesh.is_closed_manifold(),
            "{}",
            path.display()
        );
        info!(
            "wrote {} ({} vertices, {} faces)",
            output.display(),
            mesh.vertices().len(),
            mesh.faces().len()
        );
    }

    info!("polygonized {} file(s)", cli.files.len());
    Ok(())
}
