use thiserror::Error;

#[derive(Error, Debug)]
pub enum OctError {
    #[error("found {found} {species} surrounding site {site}. This number should be 6!")]
    CoordinationCount {
        site: usize,
        species: String,
        found: usize,
    },
    #[error("molecule anchored at site {site} has {found} atoms, but the other molecules have {expected}")]
    MoleculeMismatch {
        site: usize,
        found: usize,
        expected: usize,
    },
    #[error("no B-X-B angles were found, the mean tilting angle is undefined")]
    NoAngles,
    #[error("out of bounds site index {index} (structure has {size} sites)")]
    OutOfBounds { index: usize, size: usize },
    #[error("no atomic weight known for element `{0}`")]
    UnknownElement(String),
    #[error("rotation axis cannot be the zero vector")]
    ZeroAxis,
    #[error("invalid lattice: {0}")]
    InvalidLattice(String),
}
