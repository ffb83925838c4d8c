//! Reader for the plain-text `.geom` mesh format.
//!
//! The header line holds three integers `v f e` (vertex, face and edge
//! counts; the edge count is redundant and ignored). It is followed by `v`
//! lines of `x y z` coordinates and `f` lines of `3 a b c`, a literal face
//! vertex count of 3 and three 0-based vertex indices. Tokens may in fact be
//! separated by any whitespace; the reader does not care about line breaks.

use std::fs;
use std::path::Path;
use std::str::SplitAsciiWhitespace;

use crate::geom::{MeshError, Point3, Triangle, TriangleMesh, VertexIdx};

#[derive(Debug, thiserror::Error)]
pub enum GeomFileError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("unexpected end of file, expected {0}")]
    UnexpectedEof(&'static str),
    #[error("invalid {what}: `{token}`")]
    InvalidToken { what: &'static str, token: String },
    #[error("face {0} has {1} vertices, only triangles are supported")]
    NotATriangle(usize, u64),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

struct Tokens<'a>(SplitAsciiWhitespace<'a>);

impl<'a> Tokens<'a> {
    fn take(&mut self, what: &'static str) -> Result<&'a str, GeomFileError> {
        self.0.next().ok_or(GeomFileError::UnexpectedEof(what))
    }

    fn count(&mut self, what: &'static str) -> Result<u64, GeomFileError> {
        let token = self.take(what)?;
        token
            .parse()
            .map_err(|_| GeomFileError::InvalidToken { what, token: token.to_string() })
    }

    fn coordinate(&mut self) -> Result<f64, GeomFileError> {
        let token = self.take("coordinate")?;
        token
            .parse()
            .map_err(|_| GeomFileError::InvalidToken { what: "coordinate", token: token.to_string() })
    }

    fn index(&mut self) -> Result<VertexIdx, GeomFileError> {
        let token = self.take("vertex index")?;
        token
            .parse()
            .map_err(|_| GeomFileError::InvalidToken { what: "vertex index", token: token.to_string() })
    }
}

/// Parse a `.geom` document into its point and triangle lists.
pub fn parse_geom(src: &str) -> Result<(Vec<Point3>, Vec<Triangle>), GeomFileError> {
    let mut tokens = Tokens(src.split_ascii_whitespace());

    let v = tokens.count("vertex count")?;
    let f = tokens.count("face count")?;
    let _e = tokens.count("edge count")?;

    let mut points = Vec::with_capacity(usize::try_from(v).unwrap_or(0));
    for _ in 0..v {
        let x = tokens.coordinate()?;
        let y = tokens.coordinate()?;
        let z = tokens.coordinate()?;
        points.push(Point3::new(x, y, z));
    }

    let mut triangles = Vec::with_capacity(usize::try_from(f).unwrap_or(0));
    for i in 0..f {
        let sides = tokens.count("face vertex count")?;
        if sides != 3 {
            return Err(GeomFileError::NotATriangle(i as usize, sides));
        }
        let a = tokens.index()?;
        let b = tokens.index()?;
        let c = tokens.index()?;
        triangles.push(Triangle::new(a, b, c));
    }

    Ok((points, triangles))
}

/// Load and validate a mesh from a `.geom` file.
pub fn load_mesh(path: &Path) -> Result<TriangleMesh, GeomFileError> {
    let src = fs::read_to_string(path)?;
    let (points, triangles) = parse_geom(&src)?;
    Ok(TriangleMesh::new(points, triangles)?)
}
