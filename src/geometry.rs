/// A neighbor found by a radius search, with its nearest-image distance.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

/// Periodic geometry primitives the analysis algorithms need from a
/// structure representation.
///
/// Keeping the algorithms behind this trait means they never touch a
/// concrete coordinate layout; anything that can answer minimum-image
/// distance/angle queries and run a radius search can be analyzed.
pub trait PeriodicGeometry {
    /// Number of sites.
    fn size(&self) -> usize;

    /// Chemical species symbol of site `index`.
    fn species(&self, index: usize) -> &str;

    /// Minimum-image distance between sites `i` and `j`.
    fn distance(&self, i: usize, j: usize) -> f64;

    /// Angle i-j-k in degrees, vertex at `j`, with both rays taken to
    /// the nearest periodic image of the outer sites.
    fn angle(&self, i: usize, j: usize, k: usize) -> f64;

    /// All sites with any periodic image within `radius` of site
    /// `index`, sorted by nearest-image distance. `index` itself is
    /// never part of the result.
    fn neighbors_within(&self, index: usize, radius: f64) -> Vec<Neighbor>;

    /// Indices of all sites matching `species`, in site order.
    fn indices_of(&self, species: &str) -> Vec<usize> {
        (0..self.size())
            .filter(|&index| self.species(index) == species)
            .collect()
    }
}
