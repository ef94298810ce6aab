use crate::error::OctError;
use crate::structure::Structure;
use nalgebra::Vector3;
use rand::Rng;

/// Default maximum magnitude of the random rotation, in degrees.
pub const DEFAULT_MAX_ANGLE: i32 = 180;

/// Default rotation axis. For formamidinium this is roughly the vector
/// between the two nitrogens.
pub const DEFAULT_ROTATION_AXIS: Vector3<f64> = Vector3::new(0.0, 1.0, 0.0);

/// Magnitude of the symmetry-breaking perturbation applied before
/// rotating. Without it, exactly symmetric structures end up with
/// corrupted hydrogen positions on the rotated molecules.
const SYMMETRY_BREAK_DISTANCE: f64 = 1e-6;

/// Rotate each molecular group by an independent random angle about
/// `axis` through the group's mass-weighted center of mass.
///
/// The input structure is left untouched; a perturbed, rotated copy is
/// returned. Angles are drawn as whole degrees in
/// `[-max_angle_degrees, max_angle_degrees)`. Rotated positions are not
/// wrapped back into the unit cell.
///
/// # Panics
///
/// Panics if `max_angle_degrees` is not positive (the angle range would
/// be empty).
pub fn rotate_molecules<R: Rng>(
    structure: &Structure,
    groups: &[Vec<usize>],
    max_angle_degrees: i32,
    axis: &Vector3<f64>,
    rng: &mut R,
) -> Result<Structure, OctError> {
    let mut rotated = structure.clone();
    // perturb before rotating; the order matters
    rotated.perturb(rng, SYMMETRY_BREAK_DISTANCE);

    for group in groups {
        let angle = f64::from(rng.gen_range(-max_angle_degrees..max_angle_degrees));
        let center_of_mass = rotated.center_of_mass(group)?;
        rotated.rotate_sites(group, angle.to_radians(), axis, &center_of_mass)?;
    }
    Ok(rotated)
}
