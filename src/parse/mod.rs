mod geom_text;

pub use geom_text::{GeomFileError, load_mesh, parse_geom};
