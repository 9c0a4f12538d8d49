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

//! Sweep OBJ polyline profiles into surfaces of revolution.

use anyhow::{Context, Result};
use clap::Parser;
use objgen::{
    lathe::{lathe, Axis},
    obj::{self, ObjDocument},
};
use std::path::PathBuf;
use tracing::info;

/// Sweep OBJ polyline profiles around an axis
///
/// Each input is written next to itself as <name>_lathe.<ext>
#[derive(Parser)]
#[command(name = "lathe", version)]
struct Cli {
    /// Number of rotated copies of the profile
    #[arg(short, long)]
    steps: usize,

    /// Total sweep angle, in degrees
    #[arg(short, long, allow_negative_numbers = true)]
    angle: f64,

    /// Rotation preset
    #[arg(short, long, value_enum, ignore_case = true, default_value_t = Axis::Z)]
    rotation: Axis,

    /// OBJ files holding polyline profiles
    #[arg(name = "FILES", required = true)]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    for path in &cli.files {
        info!(
            "lathing {}: {} steps through {} degrees",
            path.display(),
            cli.steps,
            cli.angle
        );

        let doc = ObjDocument::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        let lathed = lathe(&doc, cli.steps, cli.angle, cli.rotation)
            .with_context(|| format!("failed to lathe {}", path.display()))?;

        let output = obj::suffixed_path(path, "_lathe");
        obj::write_atomic(&output, &lathed.to_obj_string())?;
        info!("wrote {}", output.display());
    }

    info!("lathed {} file(s)", cli.files.len());
    Ok(())
}
