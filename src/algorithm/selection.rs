use crate::algorithm::bitset::DomainBitset;
use crate::io::configuration::OBSERVATION_NOISE;

/// Outcome of scanning the wave for the next cell to collapse
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellSelection {
    /// This cell has no admissible symbol left
    Contradiction(usize),
    /// Every cell holds exactly one symbol
    AllDecided,
    /// Undecided cell with the lowest jittered entropy
    Cell(usize),
}

/// Find the undecided cell with minimum entropy
///
/// Cells are scanned in index order and the first empty cell ends the scan.
/// A jitter of `OBSERVATION_NOISE * rng()` is drawn only for cells whose raw
/// entropy does not exceed the running minimum, so equal-entropy cells are
/// picked close to uniformly and the number of draws stays reproducible.
pub fn select_min_entropy_cell<R>(
    domains: &DomainBitset,
    entropies: &[f64],
    rng: &mut R,
) -> CellSelection
where
    R: FnMut() -> f64,
{
    let mut min = f64::INFINITY;
    let mut argmin = None;

    for (cell, &entropy) in entropies.iter().enumerate().take(domains.num_cells()) {
        let choices = domains.count(cell);
        if choices == 0 {
            return CellSelection::Contradiction(cell);
        }
        if choices > 1 && entropy <= min {
            let noisy = OBSERVATION_NOISE.mul_add(rng(), entropy);
            if noisy < min {
                min = noisy;
                argmin = Some(cell);
            }
        }
    }

    argmin.map_or(CellSelection::AllDecided, CellSelection::Cell)
}
