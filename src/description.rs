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
    implicit::{Blob, Field},
    math::Vec3,
    traversal::Decomposition,
};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::debug;

/// One blob as written in a description file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BlobDescription {
    pub position: [f64; 3],
    pub energy: f64,
    pub radius: f64,
}

/// A JSON metaball description:
///
/// ```json
/// {
///     "grid_size": 0.5,
///     "threshold": 2.5,
///     "blobs": [
///         { "position": [0, 0, 0], "energy": 5, "radius": 2 }
///     ]
/// }
/// ```
///
/// An optional `"decomposition"` of `"fixed"` or `"alternating"` selects how
/// grid cubes are split into tetrahedra.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MetaballsDescription {
    pub grid_size: f64,
    pub threshold: f64,
    pub blobs: Vec<BlobDescription>,
    #[serde(default)]
    pub decomposition: Decomposition,
}

impl MetaballsDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a description file. The description is not validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check the description can be polygonized: the grid size must be a
    /// positive number, the threshold finite, and there must be at least one
    /// blob.
    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size > 0.0 && self.grid_size.is_finite()) {
            return Err(Error::InvalidGridSize(self.grid_size));
        }
        if !self.threshold.is_finite() {
            return Err(Error::InvalidThreshold(self.threshold));
        }
        if self.blobs.is_empty() {
            return Err(Error::NoBlobs);
        }
        Ok(())
    }

    /// Build the energy field described, clamping each blob into range.
    pub fn field(&self) -> Field {
        let blobs = self
            .blobs
            .iter()
            .enumerate()
            .map(|(index, b)| {
                let blob = Blob::new(Vec3::from(b.position), b.energy, b.radius);
                if blob.energy() != b.energy || blob.radius() != b.radius {
                    debug!(
                        index,
                        energy = b.energy,
                        radius = b.radius,
                        clamped_energy = blob.energy(),
                        clamped_radius = blob.radius(),
                        "clamped blob"
                    );
                }
                blob
            })
            .collect();
        Field::new(blobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScalarSource;

    const SPHERE: &str = r#"{
        "grid_size": 0.5,
        "threshold": 2.5,
        "blobs": [
            { "position": [0, 0, 0], "energy": 5, "radius": 2 },
            { "position": [1.5, -1, 0.25], "energy": -20, "radius": -1 }
        ]
    }"#;

    #[test]
    fn test_parse() {
        let description = MetaballsDescription::from_json(SPHERE).unwrap();

        assert_eq!(description.grid_size, 0.5);
        assert_eq!(description.threshold, 2.5);
        assert_eq!(description.blobs.len(), 2);
        assert_eq!(description.blobs[1].position, [1.5, -1.0, 0.25]);
        assert_eq!(description.decomposition, Decomposition::Fixed);
        assert!(description.validate().is_ok());
    }

    #[test]
    fn test_decomposition_field() {
        let json = r#"{
            "grid_size": 1, "threshold": 1, "decomposition": "alternating",
            "blobs": [{ "position": [0, 0, 0], "energy": 1, "radius": 1 }]
        }"#;
        let description = MetaballsDescription::from_json(json).unwrap();

        assert_eq!(description.decomposition, Decomposition::Alternating);

        let bad = json.replace("alternating", "diagonal");
        assert!(MetaballsDescription::from_json(&bad).is_err());
    }

    #[test]
    fn test_field_clamps_blobs() {
        let field = MetaballsDescription::from_json(SPHERE).unwrap().field();

        assert_eq!(field.blobs()[0].energy(), 5.0);
        assert_eq!(field.blobs()[1].energy(), -10.0);
        assert_eq!(field.blobs()[1].radius(), 0.0);
        assert_eq!(field.sample_scalar(Vec3::zero()), 5.0);
    }

    #[test]
    fn test_rejects_missing_fields() {
        let json = r#"{ "grid_size": 0.5, "blobs": [] }"#;
        match MetaballsDescription::from_json(json) {
            Err(Error::Description(_)) => {}
            other => panic!("expected a description error, got {:?}", other),
        }

        assert!(MetaballsDescription::from_json("not json").is_err());
    }

    #[test]
    fn test_validation() {
        let mut description = MetaballsDescription::from_json(SPHERE).unwrap();

        description.grid_size = 0.0;
        assert!(matches!(
            description.validate(),
            Err(Error::InvalidGridSize(_))
        ));

        description.grid_size = 0.5;
        description.threshold = f64::NAN;
        assert!(matches!(
            description.validate(),
            Err(Error::InvalidThreshold(_))
        ));

        description.threshold = 2.5;
        description.blobs.clear();
        assert!(matches!(description.validate(), Err(Error::NoBlobs)));
    }

    #[test]
    fn test_load_reports_path() {
        let path = std::env::temp_dir().join("objgen-missing-description.json");
        match MetaballsDescription::load(&path) {
            Err(Error::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected a read error, got {:?}", other),
        }
    }
}
