//! Greedy grouping of PSMs by precursor mass difference
//!
//! Matches are visited from the highest to the lowest score. The best
//! remaining match seeds a new group, and every remaining match whose mass
//! difference falls within the [`Window`] of the seed's mass difference joins
//! that group. Groups are never merged or refined afterwards.

use crate::mass::{Tolerance, Window};
use crate::psm::Psm;
use crate::stats::{mean, median};
use crate::Error;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MassGroup {
    /// Index of the seed match in the input table
    pub seed: usize,
    /// Indices of all members in the input table, seed first, then in
    /// descending score order
    pub members: Vec<usize>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct GroupStats {
    pub mass_diff_median: f64,
    pub mass_diff_mean: f64,
    pub num_matches: usize,
    /// Center of the selection window
    pub seed_mass_diff: f64,
}

impl MassGroup {
    pub fn mass_diffs(&self, psms: &[Psm]) -> Vec<f64> {
        self.members.iter().map(|&ix| psms[ix].mass_diff()).collect()
    }

    pub fn stats(&self, psms: &[Psm]) -> GroupStats {
        let mass_diffs = self.mass_diffs(psms);
        GroupStats {
            mass_diff_median: median(&mass_diffs),
            mass_diff_mean: mean(&mass_diffs),
            num_matches: mass_diffs.len(),
            seed_mass_diff: psms[self.seed].mass_diff(),
        }
    }
}

fn validate(psms: &[Psm], window: &Window) -> Result<(), Error> {
    if let Window::Within(tol) = window {
        let value = tol.value();
        if value.is_nan() || value < 0.0 {
            return Err(Error::Tolerance(value));
        }
    }

    let ppm = matches!(window, Window::Within(Tolerance::Ppm(_)));
    for (row, psm) in psms.iter().enumerate() {
        let positive_mz = psm.exp_mass_to_charge.is_finite() && psm.exp_mass_to_charge > 0.0;
        let reason = if !psm.score.is_finite() {
            "score is not finite"
        } else if !psm.mass_diff().is_finite() {
            "mass_diff is not finite"
        } else if ppm && !positive_mz {
            "exp_mass_to_charge must be positive for ppm tolerances"
        } else {
            continue;
        };
        return Err(Error::Schema { row, reason });
    }
    Ok(())
}

/// Partition `psms` into mass groups, in order of discovery (descending seed
/// score).
///
/// Matches are ranked with a stable sort on score, so ties are broken by
/// position in `psms`: the earlier row is seeded (or selected) first. The
/// seed is always a member of its own group, so every iteration consumes at
/// least one match.
pub fn partition(psms: &[Psm], window: Window) -> Result<Vec<MassGroup>, Error> {
    validate(psms, &window)?;

    let mut order = (0..psms.len()).collect::<Vec<_>>();
    // Scores are finite here; `-0.0` and `0.0` compare equal
    order.sort_by(|&a, &b| {
        psms[b]
            .score
            .partial_cmp(&psms[a].score)
            .unwrap_or(Ordering::Equal)
    });

    let mut assigned = vec![false; psms.len()];
    let mut groups = Vec::new();

    for (rank, &seed) in order.iter().enumerate() {
        if assigned[seed] {
            continue;
        }
        assigned[seed] = true;
        let center = psms[seed].mass_diff();
        let mut members = vec![seed];

        // Everything ranked above the seed has already been assigned
        for &ix in &order[rank + 1..] {
            if !assigned[ix]
                && window.contains(center, psms[ix].mass_diff(), psms[ix].exp_mass_to_charge)
            {
                assigned[ix] = true;
                members.push(ix);
            }
        }
        groups.push(MassGroup { seed, members });
    }

    Ok(groups)
}

/// Group `psms` by mass difference and summarize each group, in order of
/// discovery.
///
/// Every match must carry a finite score and mass difference: a NaN or
/// infinite value fails with [`Error::Schema`] rather than being ranked
/// last, and mzTab `null` scores are rejected when the file is read
pub fn mass_groups(psms: &[Psm], window: Window) -> Result<Vec<GroupStats>, Error> {
    Ok(partition(psms, window)?
        .iter()
        .map(|group| group.stats(psms))
        .collect())
}
