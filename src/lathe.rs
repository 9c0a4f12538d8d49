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
    math::Vec3,
    obj::ObjDocument,
};
use tracing::debug;

/// Rotation presets for [lathe].
///
/// The labels follow the tool's established command line: `x` spins about the
/// x axis, but `y` spins about the z axis and `z` about the y axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl Axis {
    /// The rotation matrix for `degrees` under this preset.
    pub fn rotation(self, degrees: f64) -> [[f64; 3]; 3] {
        let a = degrees.to_radians();
        let (sin, cos) = (-a).sin_cos();
        match self {
            Axis::X => [[1.0, 0.0, 0.0], [0.0, cos, -sin], [0.0, sin, cos]],
            Axis::Y => [[a.cos(), -a.sin(), 0.0], [a.sin(), a.cos(), 0.0], [0.0, 0.0, 1.0]],
            Axis::Z => [[cos, 0.0, sin], [0.0, 1.0, 0.0], [-sin, 0.0, cos]],
        }
    }

    pub fn rotate(self, v: Vec3, degrees: f64) -> Vec3 {
        let m = self.rotation(degrees);
        let mut result = Vec3::zero();
        for i in 0..3 {
            for j in 0..3 {
                result[i] += m[i][j] * v[j];
            }
        }
        result
    }
}

/// Sweep a polyline profile around an axis, building a surface of revolution.
///
/// The profile's vertices are rotated `angle / steps` degrees at a time,
/// producing `steps` further copies. Each segment of the polyline is joined to
/// its rotated copy by a pair of triangles. The segments themselves are not
/// part of the output.
pub fn lathe(doc: &ObjDocument, steps: usize, angle: f64, axis: Axis) -> Result<ObjDocument> {
    if steps == 0 {
        return Err(Error::NoSteps);
    }
    let angle_per_step = angle / steps as f64;

    let n = doc.vertices.len();
    let mut vertices = doc.vertices.clone();
    let mut segments = doc.lines.clone();
    let mut faces = doc.faces.clone();
    let segment_count = segments.len();

    for s in 0..steps {
        for i in n * s..n * (s + 1) {
            let rotated = axis.rotate(vertices[i], -angle_per_step);
            vertices.push(rotated);
        }

        for i in segment_count * s..segment_count * (s + 1) {
            let [a, b] = segments[i];
            segments.push([a + n, b + n]);
            faces.push([a + n, b, a]);
            faces.push([a + n, b + n, b]);
        }
    }

    debug!(
        steps,
        angle_per_step,
        ?axis,
        vertices = vertices.len(),
        faces = faces.len(),
        "lathed profile"
    );

    Ok(ObjDocument {
        info: doc.info.clone(),
        vertices,
        faces,
        lines: vec![],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;
    use approx::assert_relative_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-12);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-12);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-12);
    }

    fn profile() -> ObjDocument {
        ObjDocument::parse("# profile\nv 1 0 0\nv 1 1 0\nv 0.5 2 0\nl 1 2\nl 2 3\n").unwrap()
    }

    #[test]
    fn test_rotation_presets() {
        // Each preset turns by +90 degrees when asked for -90, as the lathe does.
        assert_vec_eq(Axis::X.rotate(vec3(0.0, 1.0, 0.0), -90.0), vec3(0.0, 0.0, 1.0));
        assert_vec_eq(Axis::Y.rotate(vec3(1.0, 0.0, 0.0), -90.0), vec3(0.0, -1.0, 0.0));
        assert_vec_eq(Axis::Z.rotate(vec3(1.0, 0.0, 0.0), -90.0), vec3(0.0, 0.0, -1.0));

        // Points on the spin axis stay put.
        assert_vec_eq(Axis::X.rotate(vec3(2.0, 0.0, 0.0), 33.0), vec3(2.0, 0.0, 0.0));
        assert_vec_eq(Axis::Y.rotate(vec3(0.0, 0.0, 2.0), 33.0), vec3(0.0, 0.0, 2.0));
        assert_vec_eq(Axis::Z.rotate(vec3(0.0, 2.0, 0.0), 33.0), vec3(0.0, 2.0, 0.0));
    }

    #[test]
    fn test_rotation_preserves_length() {
        let v = vec3(0.3, -1.2, 2.5);
        for &axis in [Axis::X, Axis::Y, Axis::Z].iter() {
            assert_relative_eq!(axis.rotate(v, 47.0).magnitude(), v.magnitude(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_lathe_rings_and_faces() {
        let doc = lathe(&profile(), 4, 360.0, Axis::Z).unwrap();

        assert_eq!(doc.info, vec!["# profile"]);
        assert_eq!(doc.vertices.len(), 15);
        assert!(doc.lines.is_empty());
        assert_eq!(doc.faces.len(), 16);

        // The first step joins ring 0 to ring 1.
        assert_eq!(&doc.faces[..4], &[[4, 2, 1], [4, 5, 2], [5, 3, 2], [5, 6, 3]]);
        // The last joins ring 3 to ring 4.
        assert_eq!(&doc.faces[14..], &[[14, 12, 11], [14, 15, 12]]);

        // A quarter turn about y per step.
        assert_vec_eq(doc.vertices[3], vec3(0.0, 0.0, -1.0));
        assert_vec_eq(doc.vertices[6], vec3(-1.0, 0.0, 0.0));
        // A full turn comes back to the start.
        assert_vec_eq(doc.vertices[12], vec3(1.0, 0.0, 0.0));
        assert_vec_eq(doc.vertices[14], vec3(0.5, 2.0, 0.0));
    }

    #[test]
    fn test_existing_faces_are_kept() {
        let doc = ObjDocument::parse("v 0 0 1\nv 0 1 1\nv 1 1 1\nf 1 2 3\nl 1 2\n").unwrap();
        let lathed = lathe(&doc, 1, 90.0, Axis::X).unwrap();

        assert_eq!(lathed.faces, vec![[1, 2, 3], [4, 2, 1], [4, 5, 2]]);
    }

    #[test]
    fn test_requires_steps() {
        assert!(matches!(
            lathe(&profile(), 0, 360.0, Axis::Z),
            Err(Error::NoSteps)
        ));
    }
}
