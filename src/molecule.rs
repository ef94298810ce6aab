use crate::error::OctError;
use crate::geometry::PeriodicGeometry;
use log::debug;

/// Default radius for collecting the atoms bonded to a molecule's
/// anchor, in Angstroms.
pub const DEFAULT_MOLECULE_CUTOFF: f64 = 3.5;

/// Group the molecular A cations of a structure into rigid units.
///
/// Every site matching `marker_species` (for formamidinium, the central
/// carbon) anchors one group: the anchor index followed by the indices
/// of all sites within `cutoff` of it. All molecules in the structure
/// are expected to have the same composition, so groups of unequal
/// length fail the call.
pub fn locate_molecules<G: PeriodicGeometry>(
    structure: &G,
    marker_species: &str,
    cutoff: f64,
) -> Result<Vec<Vec<usize>>, OctError> {
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for anchor in structure.indices_of(marker_species) {
        let neighbors = structure.neighbors_within(anchor, cutoff);
        debug!(
            "molecule at site {anchor}: {:?}",
            neighbors
                .iter()
                .map(|n| structure.species(n.index))
                .collect::<Vec<_>>()
        );
        let mut group = vec![anchor];
        group.extend(neighbors.into_iter().map(|neighbor| neighbor.index));
        groups.push(group);
    }

    if let Some(expected) = groups.first().map(Vec::len) {
        for group in &groups {
            if group.len() != expected {
                return Err(OctError::MoleculeMismatch {
                    site: group[0],
                    found: group.len(),
                    expected,
                });
            }
        }
    }
    Ok(groups)
}
