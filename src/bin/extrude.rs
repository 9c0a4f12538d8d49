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

//! Extrude triangulated OBJ surfaces into solids.

use anyhow::{Context, Result};
use clap::Parser;
use objgen::{
    extrusion::extrude,
    obj::{self, ObjDocument},
};
use std::path::PathBuf;
use tracing::info;

/// Extrude triangulated OBJ surfaces along their normal
///
/// Each input is written next to itself as <name>_extruded.<ext>. Input files
/// must define triangulated faces.
#[derive(Parser)]
#[command(name = "extrude", version)]
struct Cli {
    /// Distance to extrude along the normal of the first face
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    distance: f64,

    /// OBJ files to extrude
    #[arg(name = "FILES", required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    for path in &cli.files {
        info!("extruding {} by {}", path.display(), cli.distance);

        let doc = ObjDocument::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let extruded = extrude(&doc, cli.distance)
            .with_context(|| format!("failed to extrude {}", path.display()))?;

        let output = obj::suffixed_path(path, "_extruded");
        obj::write_atomic(&output, &extruded.to_obj_string())?;
        info!("wrote {}", output.display());
    }

    info!("extruded {} file(s)", cli.files.len());
    Ok(())
}
