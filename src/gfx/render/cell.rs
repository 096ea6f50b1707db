use std::fmt;

/// Identifier of a loaded cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub String);

impl CellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Exterior cells are keyed by their grid position
    pub fn exterior(x: i32, y: i32) -> Self {
        Self(format!("#{x} {y}"))
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reference to an object placed in a cell
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub cell: CellId,
    pub name: String,
}

impl ObjectRef {
    pub fn new(cell: CellId, name: impl Into<String>) -> Self {
        Self {
            cell,
            name: name.into(),
        }
    }
}

/// Lighting record of a cell; colours are packed `0x00BBGGRR`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmbientLight {
    pub ambient: u32,
    pub sunlight: u32,
    pub fog: u32,
    pub fog_density: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub id: CellId,
    pub ambient: AmbientLight,
}

impl Cell {
    pub fn new(id: CellId, ambient: AmbientLight) -> Self {
        Self { id, ambient }
    }
}
