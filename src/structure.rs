use crate::element::atomic_weight;
use crate::error::OctError;
use crate::geometry::{Neighbor, PeriodicGeometry};
use crate::lattice::Lattice;
use crate::site::Site;
use nalgebra::{Rotation3, Unit, Vector3};
use rand::Rng;
use std::ops::{Index, IndexMut};

/// A periodic crystal structure: a lattice and an ordered list of sites.
///
/// The site order is stable; no operation on this type inserts, removes
/// or reorders sites, so a site index taken from one snapshot remains
/// valid for any structure derived from it by perturbation or rotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub lattice: Lattice,
    sites: Vec<Site>,
}

impl Structure {
    pub fn new(lattice: Lattice) -> Self {
        Structure {
            lattice,
            sites: Vec::new(),
        }
    }

    pub fn with_sites(lattice: Lattice, sites: Vec<Site>) -> Self {
        Structure { lattice, sites }
    }

    pub fn add_site(&mut self, site: Site) {
        self.sites.push(site);
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    fn check_indices(&self, indices: &[usize]) -> Result<(), OctError> {
        for &index in indices {
            if index >= self.sites.len() {
                return Err(OctError::OutOfBounds {
                    index,
                    size: self.sites.len(),
                });
            }
        }
        Ok(())
    }

    /// Mass-weighted center of the given sites, in Cartesian coordinates.
    pub fn center_of_mass(&self, indices: &[usize]) -> Result<Vector3<f64>, OctError> {
        debug_assert!(!indices.is_empty());
        self.check_indices(indices)?;

        let mut center = Vector3::zeros();
        let mut total_weight = 0.0;
        for &index in indices {
            let site = &self.sites[index];
            let weight = atomic_weight(&site.symbol)?;
            center += site.position * weight;
            total_weight += weight;
        }
        Ok(center / total_weight)
    }

    /// Displace every site by `distance` in an independent random
    /// direction.
    pub fn perturb<R: Rng>(&mut self, rng: &mut R, distance: f64) {
        for site in &mut self.sites {
            site.position += random_unit_vector(rng) * distance;
        }
    }

    /// Rotate the given sites by `theta` radians about `axis` through
    /// `anchor`. Positions are not wrapped back into the unit cell.
    pub fn rotate_sites(
        &mut self,
        indices: &[usize],
        theta: f64,
        axis: &Vector3<f64>,
        anchor: &Vector3<f64>,
    ) -> Result<(), OctError> {
        self.check_indices(indices)?;
        if axis.norm() < 1e-12 {
            return Err(OctError::ZeroAxis);
        }

        let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(*axis), theta);
        for &index in indices {
            let site = &mut self.sites[index];
            site.position = anchor + rotation * (site.position - anchor);
        }
        Ok(())
    }
}

/// Uniformly random direction, by rejection sampling inside the unit
/// ball.
fn random_unit_vector<R: Rng>(rng: &mut R) -> Vector3<f64> {
    loop {
        let v = Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let norm = v.norm();
        if norm > 1e-6 && norm <= 1.0 {
            return v / norm;
        }
    }
}

impl PeriodicGeometry for Structure {
    fn size(&self) -> usize {
        self.sites.len()
    }

    fn species(&self, index: usize) -> &str {
        &self.sites[index].symbol
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        let delta = self.sites[j].position - self.sites[i].position;
        self.lattice.minimum_image(&delta).norm()
    }

    fn angle(&self, i: usize, j: usize, k: usize) -> f64 {
        let v1 = self
            .lattice
            .minimum_image(&(self.sites[i].position - self.sites[j].position));
        let v2 = self
            .lattice
            .minimum_image(&(self.sites[k].position - self.sites[j].position));
        let cos = (v1.dot(&v2) / (v1.norm() * v2.norm())).clamp(-1.0, 1.0);
        cos.acos().to_degrees()
    }

    fn neighbors_within(&self, index: usize, radius: f64) -> Vec<Neighbor> {
        let [na, nb, nc] = self.lattice.image_shells(radius);
        let origin = self.sites[index].position;

        let mut found = Vec::new();
        for (j, site) in self.sites.iter().enumerate() {
            if j == index {
                continue;
            }
            let mut nearest = f64::INFINITY;
            for sa in -na..=na {
                for sb in -nb..=nb {
                    for sc in -nc..=nc {
                        let shift = self
                            .lattice
                            .cartesian(&Vector3::new(f64::from(sa), f64::from(sb), f64::from(sc)));
                        let distance = (site.position + shift - origin).norm();
                        if distance < nearest {
                            nearest = distance;
                        }
                    }
                }
            }
            if nearest < radius {
                found.push(Neighbor {
                    index: j,
                    distance: nearest,
                });
            }
        }
        found.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        found
    }
}

impl Index<usize> for Structure {
    type Output = Site;

    fn index(&self, index: usize) -> &Self::Output {
        &self.sites[index]
    }
}

impl IndexMut<usize> for Structure {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.sites[index]
    }
}
