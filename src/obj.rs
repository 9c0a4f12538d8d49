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
    math::{round6, Vec3},
};
use std::{
    ffi::OsString,
    fmt, fs,
    path::{Path, PathBuf},
};
use tracing::warn;

/// The subset of a Wavefront OBJ file the transform tools understand.
///
/// Vertices, triangular faces and line segments are parsed; every other line
/// (comments, normals, groups, materials...) is carried through untouched as
/// an info line. Indices are kept 1-based, as written in the file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjDocument {
    pub info: Vec<String>,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[usize; 3]>,
    pub lines: Vec<[usize; 2]>,
}

impl ObjDocument {
    /// Parse OBJ text. Face and line indices must refer to vertices defined
    /// somewhere in the file.
    pub fn parse(text: &str) -> Result<Self> {
        let mut doc = Self::default();
        let mut face_lines = vec![];
        let mut segment_lines = vec![];

        for (number, line) in text.lines().enumerate() {
            let number = number + 1;
            let mut tokens = line.split_whitespace();

            match tokens.next() {
                Some("v") => {
                    let mut coords = [0.0; 3];
                    for c in coords.iter_mut() {
                        *c = parse_token(tokens.next(), number, "vertex coordinate")?;
                    }
                    doc.vertices.push(Vec3::from(coords));
                }
                Some("f") => {
                    let indices = tokens
                        .map(|t| {
                            // v, v/vt, v//vn and v/vt/vn all start with the vertex
                            let index = t.split('/').next();
                            parse_token(index, number, "face index")
                        })
                        .collect::<Result<Vec<usize>>>()?;
                    if indices.len() != 3 {
                        return Err(Error::malformed_obj(
                            number,
                            format!("faces must be triangles, found {} vertices", indices.len()),
                        ));
                    }
                    doc.faces.push([indices[0], indices[1], indices[2]]);
                    face_lines.push(number);
                }
                Some("l") => {
                    let a = parse_token(tokens.next(), number, "line index")?;
                    let b = parse_token(tokens.next(), number, "line index")?;
                    doc.lines.push([a, b]);
                    segment_lines.push(number);
                }
                _ => doc.info.push(line.to_string()),
            }
        }

        let count = doc.vertices.len();
        let indices = doc
            .faces
            .iter()
            .zip(&face_lines)
            .flat_map(|(face, &line)| face.iter().map(move |&i| (i, line)))
            .chain(
                doc.lines
                    .iter()
                    .zip(&segment_lines)
                    .flat_map(|(segment, &line)| segment.iter().map(move |&i| (i, line))),
            );
        for (index, line) in indices {
            if index == 0 || index > count {
                return Err(Error::VertexOutOfRange { line, index, count });
            }
        }

        Ok(doc)
    }

    /// Read and parse an OBJ file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// The vertex with the given 1-based index.
    pub fn vertex(&self, index: usize) -> Option<Vec3> {
        index
            .checked_sub(1)
            .and_then(|i| self.vertices.get(i))
            .copied()
    }

    /// Render the document: info lines, then vertices rounded to 6 decimal
    /// places, then faces, then line segments.
    pub fn to_obj_string(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ObjDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.info {
            writeln!(f, "{}", line)?;
        }
        for v in &self.vertices {
            writeln!(f, "v {} {} {}", round6(v.x), round6(v.y), round6(v.z))?;
        }
        for [a, b, c] in &self.faces {
            writeln!(f, "f {} {} {}", a, b, c)?;
        }
        for [a, b] in &self.lines {
            writeln!(f, "l {} {}", a, b)?;
        }
        Ok(())
    }
}

fn parse_token<T: std::str::FromStr>(token: Option<&str>, line: usize, what: &str) -> Result<T> {
    let token = token.ok_or_else(|| Error::malformed_obj(line, format!("missing {}", what)))?;
    token
        .parse()
        .map_err(|_| Error::malformed_obj(line, format!("invalid {} '{}'", what, token)))
}

/// `dir/name.ext` with `suffix` appended to the file stem: `dir/name_suffix.ext`.
pub fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_stem().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// Write `contents` to `path` without ever leaving a partial file behind: the
/// data goes to a temporary sibling first, which is then renamed into place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut temp_name = OsString::from(".");
    temp_name.push(path.file_name().unwrap_or_default());
    temp_name.push(".tmp");
    let temp = path.with_file_name(temp_name);

    fs::write(&temp, contents)
        .and_then(|()| fs::rename(&temp, path))
        .map_err(|source| {
            if temp.exists() {
                if let Err(e) = fs::remove_file(&temp) {
                    warn!("failed to remove {}: {}", temp.display(), e);
                }
            }
            write_error(source)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec3;

    const SQUARE: &str = "\
# a unit square
o square
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1/1/1 2/2/1 3/3/1
f 1//1 3//1 4//1
l 1 2
";

    #[test]
    fn test_parse() {
        let doc = ObjDocument::parse(SQUARE).unwrap();

        assert_eq!(doc.info, vec!["# a unit square", "o square", "vn 0 0 1"]);
        assert_eq!(doc.vertices.len(), 4);
        assert_eq!(doc.vertex(3), Some(vec3(1.0, 1.0, 0.0)));
        assert_eq!(doc.vertex(0), None);
        assert_eq!(doc.faces, vec![[1, 2, 3], [1, 3, 4]]);
        assert_eq!(doc.lines, vec![[1, 2]]);
    }

    #[test]
    fn test_rejects_non_triangles() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        match ObjDocument::parse(text) {
            Err(Error::MalformedObj { line: 5, .. }) => {}
            other => panic!("expected a malformed face, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_numbers() {
        match ObjDocument::parse("v 0 zero 0\n") {
            Err(Error::MalformedObj { line: 1, message }) => assert!(message.contains("zero")),
            other => panic!("expected a malformed vertex, got {:?}", other),
        }
        assert!(ObjDocument::parse("v 0 0\n").is_err());
        assert!(ObjDocument::parse("v 0 0 0\nl 1\n").is_err());
    }

    #[test]
    fn test_rejects_out_of_range_indices() {
        let text = "v 0 0 0\nv 1 0 0\nf 1 2 3\nv 0 1 0\nl 3 4\n";
        match ObjDocument::parse(text) {
            Err(Error::VertexOutOfRange {
                line: 5,
                index: 4,
                count: 3,
            }) => {}
            other => panic!("expected an out of range index, got {:?}", other),
        }

        assert!(matches!(
            ObjDocument::parse("v 0 0 0\nl 0 1\n"),
            Err(Error::VertexOutOfRange { index: 0, .. })
        ));
    }

    #[test]
    fn test_to_obj_string_rounds() {
        let doc = ObjDocument {
            info: vec!["# header".to_string()],
            vertices: vec![vec3(0.123_456_789, -2.0, 1e-9), vec3(1.5, 0.0, 0.0)],
            faces: vec![[1, 2, 1]],
            lines: vec![[2, 1]],
        };

        assert_eq!(
            doc.to_obj_string(),
            "# header\nv 0.123457 -2 0\nv 1.5 0 0\nf 1 2 1\nl 2 1\n"
        );
    }

    #[test]
    fn test_suffixed_path() {
        assert_eq!(
            suffixed_path(Path::new("models/cube.obj"), "_extruded"),
            PathBuf::from("models/cube_extruded.obj")
        );
        assert_eq!(
            suffixed_path(Path::new("profile"), "_lathe"),
            PathBuf::from("profile_lathe")
        );
    }

    #[test]
    fn test_write_atomic() {
        let dir = std::env::temp_dir().join(format!("objgen-obj-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("out.obj");

        write_atomic(&path, "v 0 0 0\n").unwrap();
        write_atomic(&path, "v 1 1 1\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "v 1 1 1\n");
        assert!(!dir.join(".out.obj.tmp").exists());

        let missing = dir.join("no-such-dir").join("out.obj");
        assert!(matches!(
            write_atomic(&missing, ""),
            Err(Error::Write { .. })
        ));

        fs::remove_dir_all(&dir).unwrap();
    }
}
