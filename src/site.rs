use nalgebra::Vector3;

/// One atom in a periodic structure: a chemical species symbol and a
/// Cartesian position in Angstroms.
///
/// Sites are identified everywhere by their index in the owning
/// structure's site list; there is no separate id type.
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub symbol: String,
    pub position: Vector3<f64>,
}

impl Site {
    pub fn new(symbol: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            symbol: symbol.into(),
            position: Vector3::from(position),
        }
    }
}
