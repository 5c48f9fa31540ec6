use serde::Serialize;

#[derive(Copy, Clone, Serialize, Debug, PartialEq, PartialOrd)]
#[serde(rename_all = "lowercase")]
/// Symmetric tolerance on the difference between two precursor mass differences
pub enum Tolerance {
    Da(f64),
    Ppm(f64),
}

impl Tolerance {
    /// Parse a tolerance mode: `absolute` (or `Da`) and `relative-ppm` (or
    /// `ppm`). Returns `None` for anything else
    pub fn from_mode(tol_mass: f64, tol_mode: &str) -> Option<Self> {
        match tol_mode {
            "absolute" | "Da" => Some(Tolerance::Da(tol_mass)),
            "relative-ppm" | "ppm" => Some(Tolerance::Ppm(tol_mass)),
            _ => None,
        }
    }

    pub fn value(&self) -> f64 {
        match self {
            Tolerance::Da(tol) | Tolerance::Ppm(tol) => *tol,
        }
    }

    /// Is a match with mass difference `mass_diff`, observed at
    /// `exp_mass_to_charge`, within tolerance of `center`?
    ///
    /// Relative tolerances are scaled by the m/z of the candidate match, not
    /// of the center
    pub fn contains(&self, center: f64, mass_diff: f64, exp_mass_to_charge: f64) -> bool {
        let delta = (mass_diff - center).abs();
        match self {
            Tolerance::Da(tol) => delta <= *tol,
            Tolerance::Ppm(tol) => delta / exp_mass_to_charge * 1_000_000.0 <= *tol,
        }
    }
}

#[derive(Copy, Clone, Serialize, Debug, PartialEq)]
#[serde(rename_all = "lowercase")]
/// Selection window used to collect matches around a seed
pub enum Window {
    Within(Tolerance),
    /// No usable tolerance was configured: every remaining match is selected,
    /// so all matches collapse into a single group
    Unbounded,
}

impl Window {
    /// A missing tolerance, or a missing/unrecognized mode, yields
    /// [`Window::Unbounded`]
    pub fn new(tol_mass: Option<f64>, tol_mode: Option<&str>) -> Self {
        match (tol_mass, tol_mode) {
            (Some(tol_mass), Some(tol_mode)) => Tolerance::from_mode(tol_mass, tol_mode)
                .map(Window::Within)
                .unwrap_or(Window::Unbounded),
            _ => Window::Unbounded,
        }
    }

    pub fn contains(&self, center: f64, mass_diff: f64, exp_mass_to_charge: f64) -> bool {
        match self {
            Window::Within(tol) => tol.contains(center, mass_diff, exp_mass_to_charge),
            Window::Unbounded => true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Tolerance, Window};

    #[test]
    fn parse_modes() {
        assert_eq!(
            Window::new(Some(1.0), Some("absolute")),
            Window::Within(Tolerance::Da(1.0))
        );
        assert_eq!(
            Window::new(Some(1.0), Some("Da")),
            Window::Within(Tolerance::Da(1.0))
        );
        assert_eq!(
            Window::new(Some(10.0), Some("relative-ppm")),
            Window::Within(Tolerance::Ppm(10.0))
        );
        assert_eq!(
            Window::new(Some(10.0), Some("ppm")),
            Window::Within(Tolerance::Ppm(10.0))
        );
        assert_eq!(Window::new(None, Some("ppm")), Window::Unbounded);
        assert_eq!(Window::new(Some(10.0), None), Window::Unbounded);
        assert_eq!(Window::new(Some(10.0), Some("mmu")), Window::Unbounded);
        assert_eq!(Window::new(Some(1.0), Some("da")), Window::Unbounded);
        assert_eq!(Window::new(Some(1.0), Some("PPM")), Window::Unbounded);
    }

    #[test]
    fn tolerances() {
        let da = Tolerance::Da(1.0);
        assert!(da.contains(0.0, 1.0, 500.0));
        assert!(da.contains(0.0, -1.0, 500.0));
        assert!(!da.contains(0.0, 1.5, 500.0));

        // 10 ppm at m/z 1000 is 0.01 Da
        let ppm = Tolerance::Ppm(10.0);
        assert!(ppm.contains(15.99, 15.995, 1000.0));
        assert!(!ppm.contains(15.99, 16.02, 1000.0));
        // 0.01 Da at m/z 500 is 20 ppm
        assert!(!ppm.contains(15.99, 16.0, 500.0));
    }

    #[test]
    fn zero_tolerance_is_exact() {
        let da = Tolerance::Da(0.0);
        assert!(da.contains(0.984, 0.984, 500.0));
        assert!(!da.contains(0.984, 0.984_000_1, 500.0));
    }

    #[test]
    fn unbounded() {
        assert!(Window::Unbounded.contains(0.0, 1e6, 1.0));
        assert!(Window::Unbounded.contains(0.0, f64::MAX, 0.0));
    }
}
