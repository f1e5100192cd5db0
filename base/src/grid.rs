//! Randomized box assignment: the one place determinism is broken on
//! purpose.  All randomness flows through the injected source.

use log::debug;
use rand::seq::SliceRandom;
use rand::RngCore;

use crate::errors::{HandleError, HandleResult};
use crate::essential::{
    GridState, Participant, DEFAULT_TEAM_LEFT, DEFAULT_TEAM_TOP, GRID_BOXES, GRID_DIGITS,
};

/// Generate a fresh grid for a fully sold board.
///
/// The box pool and the two header digit sequences are shuffled
/// independently, so box ownership says nothing about which digits land
/// where.
pub fn generate(
    active: &[Participant],
    team_top: &str,
    team_left: &str,
    rng: &mut dyn RngCore,
) -> HandleResult<GridState> {
    let mut assignments = build_pool(active)?;
    assignments.shuffle(rng);

    let top_numbers = shuffled_digits(rng);
    let side_numbers = shuffled_digits(rng);
    debug!("generated grid: top={:?} side={:?}", top_numbers, side_numbers);

    Ok(GridState {
        top_numbers,
        side_numbers,
        assignments,
        team_top: team_or_default(team_top, DEFAULT_TEAM_TOP),
        team_left: team_or_default(team_left, DEFAULT_TEAM_LEFT),
    })
}

/// Expand the roster into one token per box, in ledger order.  The order
/// is deterministic before the shuffle.
fn build_pool(active: &[Participant]) -> HandleResult<Vec<String>> {
    let total: u32 = active.iter().map(|p| p.count).sum();
    if total != GRID_BOXES {
        return Err(HandleError::InvalidBoxCount { total });
    }
    let mut pool = Vec::with_capacity(GRID_BOXES as usize);
    for p in active {
        for _ in 0..p.count {
            pool.push(p.name.clone());
        }
    }
    Ok(pool)
}

/// A fresh permutation of the digits 0-9.
fn shuffled_digits(rng: &mut dyn RngCore) -> Vec<u8> {
    let mut digits: Vec<u8> = (0..GRID_DIGITS as u8).collect();
    digits.shuffle(rng);
    digits
}

fn team_or_default(name: &str, fallback: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        fallback.to_string()
    } else {
        name.to_string()
    }
}
