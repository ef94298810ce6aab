use crate::geometry::PeriodicGeometry;
use std::collections::BTreeSet;

/// How the anions coordinating a B cation are identified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Every matching site within the distance cutoff. Fast, and fine
    /// for well-behaved cells.
    NeighborRadius,
    /// Bond-valence weighted nearest neighbors: candidates within the
    /// cutoff are weighted by exp((r_min - r) / B) relative to the
    /// shortest bond, and only strong bonds are kept. Slower, but more
    /// robust against distorted or compressed cells where a non-bonded
    /// anion sneaks inside the radius.
    BondValence,
}

/// Softness parameter of the Brown-Altermatt bond-valence expression.
const BOND_VALENCE_B: f64 = 0.37;

/// Weight below which a candidate bond is considered broken, relative
/// to the strongest bond of the shell.
const MIN_RELATIVE_WEIGHT: f64 = 0.5;

/// Indices of the `x_species` sites coordinating site `b_index`.
///
/// Pure function of its arguments. The caller is responsible for
/// checking the octahedral six-fold expectation; the resolver reports
/// whatever the chosen algorithm finds.
pub fn resolve_coordination<G: PeriodicGeometry>(
    structure: &G,
    b_index: usize,
    x_species: &str,
    cutoff: f64,
    algorithm: Algorithm,
) -> BTreeSet<usize> {
    let candidates: Vec<_> = structure
        .neighbors_within(b_index, cutoff)
        .into_iter()
        .filter(|neighbor| structure.species(neighbor.index) == x_species)
        .collect();

    match algorithm {
        Algorithm::NeighborRadius => candidates
            .into_iter()
            .map(|neighbor| neighbor.index)
            .collect(),
        Algorithm::BondValence => {
            // candidates are sorted by distance, so the first one sets
            // the reference bond length
            let Some(shortest) = candidates.first().map(|n| n.distance) else {
                return BTreeSet::new();
            };
            candidates
                .into_iter()
                .filter(|neighbor| {
                    ((shortest - neighbor.distance) / BOND_VALENCE_B).exp() >= MIN_RELATIVE_WEIGHT
                })
                .map(|neighbor| neighbor.index)
                .collect()
        }
    }
}
