use crate::coordination::{resolve_coordination, Algorithm};
use crate::error::OctError;
use crate::geometry::PeriodicGeometry;
use log::{debug, warn};

/// Default B-B adjacency cutoff between neighboring octahedra centers,
/// in Angstroms.
pub const DEFAULT_B_CATION_CUTOFF: f64 = 6.6;

/// Default B-X bonding cutoff within one octahedron, in Angstroms.
pub const DEFAULT_B_X_CUTOFF: f64 = 3.8;

/// What to do when a pair of adjacent B cations shares no X anion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BridgePolicy {
    /// Abandon all remaining partners of the current B cation, matching
    /// the historic behavior of this analysis. Partners that do share
    /// an anion with it are skipped too, so means computed this way can
    /// miss angles.
    LegacyBreak,
    /// Skip only the offending pair and keep scanning.
    #[default]
    ContinueScan,
}

/// Parameters of the tilting-angle analysis.
#[derive(Debug, Clone)]
pub struct TiltingParams {
    pub b_species: String,
    pub x_species: String,
    /// Maximum distance between two B cations considered adjacent.
    pub b_cutoff: f64,
    /// Maximum length of a B-X bond.
    pub bx_cutoff: f64,
    pub algorithm: Algorithm,
    pub bridge_policy: BridgePolicy,
}

impl TiltingParams {
    pub fn new(b_species: impl Into<String>, x_species: impl Into<String>) -> Self {
        TiltingParams {
            b_species: b_species.into(),
            x_species: x_species.into(),
            b_cutoff: DEFAULT_B_CATION_CUTOFF,
            bx_cutoff: DEFAULT_B_X_CUTOFF,
            algorithm: Algorithm::NeighborRadius,
            bridge_policy: BridgePolicy::default(),
        }
    }
}

impl Default for TiltingParams {
    fn default() -> Self {
        TiltingParams::new("Pb", "I")
    }
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

/// All B-X-B tilting angles of the structure, in degrees, rounded to 3
/// decimals.
///
/// Every unordered pair of B cations closer than `b_cutoff` is visited
/// once, in site order. Both members must be six-fold coordinated by
/// `x_species`; each anion the two coordination shells share contributes
/// one angle, measured through the nearest periodic images.
pub fn tilting_angles<G: PeriodicGeometry>(
    structure: &G,
    params: &TiltingParams,
) -> Result<Vec<f64>, OctError> {
    let b_sites = structure.indices_of(&params.b_species);
    let mut angles = Vec::new();

    for (i, &b1) in b_sites.iter().enumerate() {
        'partners: for &b2 in &b_sites[i + 1..] {
            if structure.distance(b1, b2) >= params.b_cutoff {
                continue;
            }

            let coordination_1 = resolve_coordination(
                structure,
                b1,
                &params.x_species,
                params.bx_cutoff,
                params.algorithm,
            );
            let coordination_2 = resolve_coordination(
                structure,
                b2,
                &params.x_species,
                params.bx_cutoff,
                params.algorithm,
            );
            for (b_site, coordination) in [(b1, &coordination_1), (b2, &coordination_2)] {
                if coordination.len() != 6 {
                    return Err(OctError::CoordinationCount {
                        site: b_site,
                        species: params.x_species.clone(),
                        found: coordination.len(),
                    });
                }
            }

            let bridges: Vec<usize> = coordination_1
                .intersection(&coordination_2)
                .copied()
                .collect();
            if bridges.is_empty() {
                warn!(
                    "no common {} between {} sites {b1} and {b2}",
                    params.x_species, params.b_species
                );
                match params.bridge_policy {
                    BridgePolicy::LegacyBreak => break 'partners,
                    BridgePolicy::ContinueScan => continue,
                }
            }

            for x_site in bridges {
                angles.push(round3(structure.angle(b1, x_site, b2)));
            }
        }
    }

    debug!("tilting angles: {angles:?}");
    Ok(angles)
}

/// Arithmetic mean of all B-X-B tilting angles, in degrees, rounded to
/// 3 decimals. 180.000 means perfectly untilted corner-sharing.
///
/// Fails with [`OctError::NoAngles`] when no adjacent pair produced an
/// angle, rather than returning a NaN mean.
pub fn mean_tilting_angle<G: PeriodicGeometry>(
    structure: &G,
    params: &TiltingParams,
) -> Result<f64, OctError> {
    let angles = tilting_angles(structure, params)?;
    if angles.is_empty() {
        return Err(OctError::NoAngles);
    }
    let mean = angles.iter().sum::<f64>() / angles.len() as f64;
    Ok(round3(mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Lattice;
    use crate::site::Site;
    use crate::structure::Structure;
    use assert_approx_eq::assert_approx_eq;
    use nalgebra::Vector3;

    /// n x n x n supercell of an ideal cubic CsPbI3 perovskite with
    /// lattice parameter `a`. All octahedra are corner-sharing with
    /// Pb-I-Pb = 180 degrees everywhere.
    fn cubic_perovskite(n: usize, a: f64) -> Structure {
        let length = a * n as f64;
        let mut structure = Structure::new(Lattice::cubic(length).unwrap());
        for i in 0..n {
            for j in 0..n {
                for k in 0..n {
                    let origin = [i as f64 * a, j as f64 * a, k as f64 * a];
                    let at = |fx: f64, fy: f64, fz: f64| {
                        [origin[0] + fx * a, origin[1] + fy * a, origin[2] + fz * a]
                    };
                    structure.add_site(Site::new("Cs", at(0.0, 0.0, 0.0)));
                    structure.add_site(Site::new("Pb", at(0.5, 0.5, 0.5)));
                    structure.add_site(Site::new("I", at(0.5, 0.5, 0.0)));
                    structure.add_site(Site::new("I", at(0.5, 0.0, 0.5)));
                    structure.add_site(Site::new("I", at(0.0, 0.5, 0.5)));
                }
            }
        }
        structure
    }

    /// Two octahedra sharing one corner anion, bent to a known angle at
    /// the bridge. Each Pb gets five terminal anions of its own, placed
    /// along its local octahedron axes so nothing but the bridge is
    /// shared. Site order: bridge, then Pb and its anions, twice.
    fn corner_sharing_pair(bridge_angle_degrees: f64) -> Structure {
        let mut structure = Structure::new(Lattice::cubic(40.0).unwrap());
        let bridge = Vector3::new(20.0, 20.0, 20.0);
        let bond = 3.0;
        let theta = bridge_angle_degrees.to_radians();

        structure.add_site(Site::new("I", bridge.into()));
        // unit rays from the bridge towards each Pb; the angle between
        // them is the requested bridge angle
        let rays = [
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(-theta.cos(), theta.sin(), 0.0),
        ];
        for ray in rays {
            let pb = bridge + ray * bond;
            structure.add_site(Site::new("Pb", pb.into()));
            let perp = Vector3::new(-ray.y, ray.x, 0.0);
            for direction in [ray, perp, -perp, Vector3::z(), -Vector3::z()] {
                structure.add_site(Site::new("I", (pb + direction * bond).into()));
            }
        }
        structure
    }

    #[test]
    fn collinear_bridge_is_180() {
        let structure = corner_sharing_pair(180.0);
        let params = TiltingParams {
            b_cutoff: 6.5,
            ..TiltingParams::default()
        };
        assert_approx_eq!(mean_tilting_angle(&structure, &params).unwrap(), 180.0);
    }

    #[test]
    fn tilted_bridge_recovers_known_angle() {
        let structure = corner_sharing_pair(165.0);
        let params = TiltingParams {
            b_cutoff: 6.5,
            ..TiltingParams::default()
        };
        assert_approx_eq!(mean_tilting_angle(&structure, &params).unwrap(), 165.0, 1e-9);
    }

    #[test]
    fn perfect_cubic_cell_averages_180_with_zero_variance() {
        let structure = cubic_perovskite(2, 6.0);
        let params = TiltingParams::default();

        let angles = tilting_angles(&structure, &params).unwrap();
        assert!(!angles.is_empty());
        for &angle in &angles {
            assert_approx_eq!(angle, 180.0);
        }
        assert_approx_eq!(mean_tilting_angle(&structure, &params).unwrap(), 180.0);
    }

    #[test]
    fn bond_valence_algorithm_matches_on_ideal_cell() {
        let structure = cubic_perovskite(2, 6.0);
        let params = TiltingParams {
            algorithm: Algorithm::BondValence,
            ..TiltingParams::default()
        };
        assert_approx_eq!(mean_tilting_angle(&structure, &params).unwrap(), 180.0);
    }

    #[test]
    fn five_fold_coordination_is_fatal() {
        let mut structure = corner_sharing_pair(180.0);
        // turn one terminal anion of the second octahedron (site 7)
        // into a spectator species, leaving that Pb five-coordinated
        let doomed = structure.size() - 1;
        structure[doomed].symbol = "Cs".to_string();

        let params = TiltingParams {
            b_cutoff: 6.5,
            ..TiltingParams::default()
        };
        match mean_tilting_angle(&structure, &params) {
            Err(OctError::CoordinationCount { site: 7, found: 5, .. }) => {}
            other => panic!("expected coordination failure, got {other:?}"),
        }
    }

    #[test]
    fn no_adjacent_pairs_is_no_angles() {
        // two isolated octahedra far beyond the adjacency cutoff
        let mut structure = Structure::new(Lattice::cubic(60.0).unwrap());
        for center in [[10.0, 10.0, 10.0], [40.0, 40.0, 40.0]] {
            structure.add_site(Site::new("Pb", center));
            for axis in 0..3 {
                for sign in [-3.0, 3.0] {
                    let mut position = center;
                    position[axis] += sign;
                    structure.add_site(Site::new("I", position));
                }
            }
        }
        assert!(matches!(
            mean_tilting_angle(&structure, &TiltingParams::default()),
            Err(OctError::NoAngles)
        ));
    }

    #[test]
    fn legacy_break_abandons_later_partners() {
        // Pb1's first partner in site order shares no anion with it;
        // the properly bridged partner comes after. LegacyBreak never
        // reaches the bridged pair, ContinueScan does.
        let mut structure = Structure::new(Lattice::cubic(30.0).unwrap());
        let bond = 3.0;

        // Pb1 with five terminal anions, +x left open for the bridge
        let pb1 = Vector3::new(10.0, 10.0, 10.0);
        structure.add_site(Site::new("Pb", pb1.into()));
        for direction in [
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
        ] {
            structure.add_site(Site::new("I", (pb1 + direction * bond).into()));
        }

        // Pb2: adjacent to Pb1 but with a tight shell of its own,
        // sharing nothing
        let pb2 = Vector3::new(10.0, 10.0, 16.0);
        structure.add_site(Site::new("Pb", pb2.into()));
        for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
            structure.add_site(Site::new("I", (pb2 + axis * 2.0).into()));
            structure.add_site(Site::new("I", (pb2 - axis * 2.0).into()));
        }

        // Pb3: shares a bridge anion with Pb1, collinear along x
        let pb3 = Vector3::new(16.0, 10.0, 10.0);
        structure.add_site(Site::new("Pb", pb3.into()));
        structure.add_site(Site::new("I", [13.0, 10.0, 10.0]));
        for direction in [
            Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
        ] {
            structure.add_site(Site::new("I", (pb3 + direction * bond).into()));
        }

        let strict = TiltingParams {
            b_cutoff: 6.5,
            bridge_policy: BridgePolicy::ContinueScan,
            ..TiltingParams::default()
        };
        let legacy = TiltingParams {
            bridge_policy: BridgePolicy::LegacyBreak,
            ..strict.clone()
        };

        let scanned = tilting_angles(&structure, &strict).unwrap();
        assert_eq!(scanned.len(), 1);
        assert_approx_eq!(scanned[0], 180.0);

        let abandoned = tilting_angles(&structure, &legacy).unwrap();
        assert!(abandoned.is_empty());
        assert!(matches!(
            mean_tilting_angle(&structure, &legacy),
            Err(OctError::NoAngles)
        ));
    }

    #[test]
    fn analysis_is_deterministic() {
        let structure = cubic_perovskite(2, 6.3);
        let params = TiltingParams::default();
        let first = tilting_angles(&structure, &params).unwrap();
        let second = tilting_angles(&structure, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rounding_to_three_decimals() {
        assert_approx_eq!(round3(179.9996), 180.0);
        assert_approx_eq!(round3(165.12345), 165.123);
    }
}
