use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
/// A single peptide-spectrum match, as reported by an open-modification search
pub struct Psm {
    pub sequence: String,
    pub charge: i32,
    pub exp_mass_to_charge: f64,
    pub calc_mass_to_charge: f64,
    /// Higher scores indicate more confident matches
    pub score: f64,
    mass_diff: f64,
}

impl Psm {
    pub fn new(
        sequence: impl Into<String>,
        charge: i32,
        exp_mass_to_charge: f64,
        calc_mass_to_charge: f64,
        score: f64,
    ) -> Self {
        Psm {
            sequence: sequence.into(),
            charge,
            exp_mass_to_charge,
            calc_mass_to_charge,
            score,
            mass_diff: (exp_mass_to_charge - calc_mass_to_charge) * charge as f64,
        }
    }

    /// Precursor mass difference (Da) between the observed and the
    /// theoretical precursor: `(exp_mz - calc_mz) * charge`
    pub fn mass_diff(&self) -> f64 {
        self.mass_diff
    }
}

#[cfg(test)]
mod test {
    use super::Psm;

    #[test]
    fn mass_diff_scales_with_charge() {
        let psm = Psm::new("PEPTIDEK", 2, 500.5, 500.0, 10.0);
        assert_eq!(psm.mass_diff(), 1.0);

        let psm = Psm::new("PEPTIDEK", 3, 400.0, 405.0, 10.0);
        assert_eq!(psm.mass_diff(), -15.0);
    }
}
