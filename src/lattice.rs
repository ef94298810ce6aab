use crate::error::OctError;
use core::f64;
use nalgebra::{Matrix3, Vector3};

type Vec3D = [f64; 3];

/// Periodic lattice of a crystal structure.
///
/// Rows of `matrix` are the three lattice vectors, in the same layout a
/// `Lattice="ax ay az bx by bz cx cy cz"` header would use. The inverse
/// is kept alongside so Cartesian/fractional conversion never has to
/// re-invert in the inner loops.
#[derive(Debug, Clone)]
pub struct Lattice {
    matrix: Matrix3<f64>,
    inv_transpose: Matrix3<f64>,
}

impl PartialEq for Lattice {
    fn eq(&self, other: &Self) -> bool {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .all(|(a, b)| (a - b).abs() < f64::EPSILON)
    }
}

impl Lattice {
    const EPSILON: f64 = 1e-5;

    fn deg2rad(x: f64) -> f64 {
        x * f64::consts::PI / 180.0
    }

    fn cos_degree(theta: f64) -> f64 {
        Self::deg2rad(theta).cos()
    }

    fn sin_degree(theta: f64) -> f64 {
        Self::deg2rad(theta).sin()
    }

    pub fn new(matrix: Matrix3<f64>) -> Result<Self, OctError> {
        // Columns of matrix^T are the lattice vectors, so cartesian
        // coordinates are matrix^T * fractional.
        let inv_transpose = matrix.transpose().try_inverse().ok_or_else(|| {
            OctError::InvalidLattice("lattice vectors must be linearly independent".to_string())
        })?;
        Ok(Lattice {
            matrix,
            inv_transpose,
        })
    }

    pub fn cubic(a: f64) -> Result<Self, OctError> {
        Self::check_lengths(&[a, a, a])?;
        Self::new(Matrix3::identity() * a)
    }

    fn check_lengths(lengths: &Vec3D) -> Result<(), OctError> {
        if lengths.iter().any(|&x| x <= 0.0) {
            return Err(OctError::InvalidLattice(
                "lengths must be positive".to_string(),
            ));
        };

        Ok(())
    }

    fn check_angles(angles: &Vec3D) -> Result<(), OctError> {
        if angles.iter().any(|&x| x < 0.0) {
            return Err(OctError::InvalidLattice(
                "angles cannot be negative".to_string(),
            ));
        };

        if angles.iter().any(|&x| x.abs() < Self::EPSILON) {
            return Err(OctError::InvalidLattice(
                "angles cannot be (roughly) zero".to_string(),
            ));
        }

        if angles.iter().any(|&x| x >= 180.0) {
            return Err(OctError::InvalidLattice(
                "angles cannot be larger than or equal to 180 degrees".to_string(),
            ));
        }

        Ok(())
    }

    pub fn from_lengths_angles(lengths: Vec3D, angles: Vec3D) -> Result<Self, OctError> {
        Self::check_lengths(&lengths)?;
        Self::check_angles(&angles)?;

        let mut angles = angles;
        if angles.iter().all(|&x| (x - 90.0).abs() < 1e-3) {
            angles.iter_mut().for_each(|x| *x = 90.0);
        }
        let mut matrix: Matrix3<f64> = Matrix3::zeros();
        matrix[(0, 0)] = lengths[0];

        matrix[(1, 0)] = Self::cos_degree(angles[2]) * lengths[1];
        matrix[(1, 1)] = Self::sin_degree(angles[2]) * lengths[1];

        matrix[(2, 0)] = Self::cos_degree(angles[1]);
        matrix[(2, 1)] = (Self::cos_degree(angles[0])
            - Self::cos_degree(angles[1]) * Self::cos_degree(angles[2]))
            / Self::sin_degree(angles[2]);
        matrix[(2, 2)] = (1.0
            - matrix[(2, 0)] * matrix[(2, 0)]
            - matrix[(2, 1)] * matrix[(2, 1)])
            .sqrt();
        matrix[(2, 0)] *= lengths[2];
        matrix[(2, 1)] *= lengths[2];
        matrix[(2, 2)] *= lengths[2];

        Self::new(matrix)
    }

    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    pub fn volume(&self) -> f64 {
        self.matrix.determinant().abs()
    }

    /// Cartesian -> fractional coordinates.
    pub fn fractional(&self, cartesian: &Vector3<f64>) -> Vector3<f64> {
        self.inv_transpose * cartesian
    }

    /// Fractional -> Cartesian coordinates.
    pub fn cartesian(&self, fractional: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.transpose() * fractional
    }

    /// Map a Cartesian displacement onto its nearest periodic image.
    pub fn minimum_image(&self, delta: &Vector3<f64>) -> Vector3<f64> {
        let frac = self.fractional(delta);
        let wrapped = frac.map(|x| x - x.round());
        self.cartesian(&wrapped)
    }

    /// How many image shells along each lattice vector are needed so a
    /// sphere of `radius` around any point in the cell is covered.
    ///
    /// The perpendicular width along vector `i` is V / |a_j x a_k|.
    pub fn image_shells(&self, radius: f64) -> [i32; 3] {
        let a = self.matrix.row(0).transpose();
        let b = self.matrix.row(1).transpose();
        let c = self.matrix.row(2).transpose();
        let volume = self.volume();

        let widths = [
            volume / b.cross(&c).norm(),
            volume / c.cross(&a).norm(),
            volume / a.cross(&b).norm(),
        ];
        let mut shells = [0i32; 3];
        for (shell, width) in shells.iter_mut().zip(widths) {
            *shell = (radius / width).ceil().max(1.0) as i32;
        }
        shells
    }
}
