use crate::error::OctError;
use phf::phf_map;

/// Standard atomic weights (IUPAC 2021), in atomic mass units.
///
/// Covers the elements that show up in halide and oxide perovskites and
/// their molecular A cations; unlisted symbols are reported as an error
/// rather than silently weighted as zero.
static ATOMIC_WEIGHTS: phf::Map<&'static str, f64> = phf_map! {
    "H" => 1.008,
    "He" => 4.0026,
    "Li" => 6.94,
    "Be" => 9.0122,
    "B" => 10.81,
    "C" => 12.011,
    "N" => 14.007,
    "O" => 15.999,
    "F" => 18.998,
    "Ne" => 20.180,
    "Na" => 22.990,
    "Mg" => 24.305,
    "Al" => 26.982,
    "Si" => 28.085,
    "P" => 30.974,
    "S" => 32.06,
    "Cl" => 35.45,
    "Ar" => 39.95,
    "K" => 39.098,
    "Ca" => 40.078,
    "Ti" => 47.867,
    "V" => 50.942,
    "Cr" => 51.996,
    "Mn" => 54.938,
    "Fe" => 55.845,
    "Co" => 58.933,
    "Ni" => 58.693,
    "Cu" => 63.546,
    "Zn" => 65.38,
    "Ga" => 69.723,
    "Ge" => 72.630,
    "As" => 74.922,
    "Se" => 78.971,
    "Br" => 79.904,
    "Kr" => 83.798,
    "Rb" => 85.468,
    "Sr" => 87.62,
    "Y" => 88.906,
    "Zr" => 91.224,
    "Nb" => 92.906,
    "Mo" => 95.95,
    "Ag" => 107.87,
    "Cd" => 112.41,
    "In" => 114.82,
    "Sn" => 118.71,
    "Sb" => 121.76,
    "Te" => 127.60,
    "I" => 126.90,
    "Xe" => 131.29,
    "Cs" => 132.91,
    "Ba" => 137.33,
    "La" => 138.91,
    "Ta" => 180.95,
    "W" => 183.84,
    "Pt" => 195.08,
    "Au" => 196.97,
    "Hg" => 200.59,
    "Tl" => 204.38,
    "Pb" => 207.2,
    "Bi" => 208.98,
};

pub fn atomic_weight(symbol: &str) -> Result<f64, OctError> {
    ATOMIC_WEIGHTS
        .get(symbol)
        .copied()
        .ok_or_else(|| OctError::UnknownElement(symbol.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn known_elements() {
        assert_approx_eq!(atomic_weight("Pb").unwrap(), 207.2);
        assert_approx_eq!(atomic_weight("I").unwrap(), 126.90);
        assert_approx_eq!(atomic_weight("H").unwrap(), 1.008);
    }

    #[test]
    fn unknown_element() {
        let err = atomic_weight("Xx").unwrap_err();
        assert!(err.to_string().contains("Xx"));
    }
}
