//! Pot, vig and payout arithmetic.
//!
//! Everything here is pure: the ledger and the raw pricing inputs go in,
//! a [`PoolBreakdown`] comes out.  Amounts stay unrounded; rounding to
//! cents belongs to the renderer.

use crate::essential::{
    parse_amount, Participant, PayoutSplit, GRID_BOXES, QUARTER_LABELS, VIG_PERCENT_MAX,
};

/// One line of the payout summary.
#[derive(Debug, PartialEq, Clone)]
pub struct PayoutLine {
    pub label: &'static str,
    pub percent: f64,
    pub amount: f64,
}

/// Everything derived from the ledger and the pricing configuration.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct PoolBreakdown {
    pub total_boxes: u32,
    pub total_pot: f64,
    pub vig_amount: f64,
    pub payout_pool: f64,
    pub payout_lines: Vec<PayoutLine>,
}

impl PoolBreakdown {
    pub fn compute(
        active: &[Participant],
        box_price: &str,
        use_vig: bool,
        vig_percent: &str,
        split: &PayoutSplit,
    ) -> Self {
        let total_boxes: u32 = active.iter().map(|p| p.count).sum();
        let box_price = parse_amount(box_price).max(0.0);
        let total_pot = box_price * total_boxes as f64;

        // The vig percent is clamped here, at compute time; the stored
        // value stays raw.
        let vig_amount = if use_vig {
            parse_amount(vig_percent).clamp(0.0, VIG_PERCENT_MAX) / 100.0 * total_pot
        } else {
            0.0
        };

        let payout_pool = (total_pot - vig_amount).max(0.0);
        let payout_lines = payout_lines(split, payout_pool);

        Self {
            total_boxes,
            total_pot,
            vig_amount,
            payout_pool,
            payout_lines,
        }
    }

    /// Generation is possible only with a fully sold grid and a
    /// non-empty payout pool.
    pub fn can_generate(&self) -> bool {
        self.total_boxes == GRID_BOXES && self.payout_pool > 0.0
    }

    /// The user-facing reason generation is disabled, if any.
    pub fn generate_hint(&self) -> Option<&'static str> {
        if self.total_boxes != GRID_BOXES {
            Some("Assign exactly 100 boxes to enable generation.")
        } else if self.payout_pool == 0.0 {
            Some("Set a box price above $0.00 to create a payout pool.")
        } else {
            None
        }
    }
}

/// Per-quarter payout amounts, in split order.  Zero-percent quarters
/// are left out of the summary.
pub fn payout_lines(split: &PayoutSplit, payout_pool: f64) -> Vec<PayoutLine> {
    split
        .quarters
        .iter()
        .zip(QUARTER_LABELS)
        .filter(|(percent, _)| **percent > 0.0)
        .map(|(percent, label)| PayoutLine {
            label,
            percent: *percent,
            amount: percent / 100.0 * payout_pool,
        })
        .collect()
}
