//! Tests for the pool/payout arithmetic and the generation gate.


use helper::{full_roster, participants};
use sbbox_base::essential::PayoutSplit;
use sbbox_base::pool::PoolBreakdown;

#[test]
fn test_totals_with_vig() {
    let active = full_roster();
    let b = PoolBreakdown::compute(&active, "10", true, "10", &PayoutSplit::default());
    assert_eq!(b.total_boxes, 100);
    assert_eq!(b.total_pot, 1000.0);
    assert_eq!(b.vig_amount, 100.0);
    assert_eq!(b.payout_pool, 900.0);
}

#[test]
fn test_totals_without_vig() {
    let active = full_roster();
    // The vig percent is ignored entirely while the vig is off.
    let b = PoolBreakdown::compute(&active, "10", false, "25", &PayoutSplit::default());
    assert_eq!(b.vig_amount, 0.0);
    assert_eq!(b.payout_pool, 1000.0);
}

#[test]
fn test_vig_percent_clamped_at_compute_time() {
    let active = full_roster();
    let b = PoolBreakdown::compute(&active, "10", true, "80", &PayoutSplit::default());
    assert_eq!(b.vig_amount, 500.0);
    assert_eq!(b.payout_pool, 500.0);

    let b = PoolBreakdown::compute(&active, "10", true, "-5", &PayoutSplit::default());
    assert_eq!(b.vig_amount, 0.0);
    assert_eq!(b.payout_pool, 1000.0);
}

#[test]
fn test_negative_or_malformed_price_reads_as_zero() {
    let active = full_roster();
    let b = PoolBreakdown::compute(&active, "-3", false, "0", &PayoutSplit::default());
    assert_eq!(b.total_pot, 0.0);
    assert_eq!(b.payout_pool, 0.0);

    let b = PoolBreakdown::compute(&active, "abc", false, "0", &PayoutSplit::default());
    assert_eq!(b.total_pot, 0.0);
}

#[test]
fn test_quarter_payout_lines() {
    let active = full_roster();
    let b = PoolBreakdown::compute(&active, "10", true, "10", &PayoutSplit::default());
    assert_eq!(b.payout_lines.len(), 4);
    let labels: Vec<&str> = b.payout_lines.iter().map(|l| l.label).collect();
    assert_eq!(labels, vec!["Q1", "Q2", "Q3", "Final"]);
    for line in &b.payout_lines {
        assert_eq!(line.percent, 25.0);
        assert_eq!(line.amount, 225.0);
    }
}

#[test]
fn test_zero_percent_quarters_are_skipped() {
    let active = full_roster();
    let split = PayoutSplit::new(0.0, 0.0, 0.0, 100.0);
    let b = PoolBreakdown::compute(&active, "10", false, "0", &split);
    assert_eq!(b.payout_lines.len(), 1);
    assert_eq!(b.payout_lines[0].label, "Final");
    assert_eq!(b.payout_lines[0].amount, 1000.0);
}

#[test]
fn test_uneven_split_keeps_order() {
    let active = full_roster();
    let split = PayoutSplit::new(10.0, 20.0, 10.0, 60.0);
    let b = PoolBreakdown::compute(&active, "10", false, "0", &split);
    let amounts: Vec<f64> = b.payout_lines.iter().map(|l| l.amount).collect();
    assert_eq!(amounts, vec![100.0, 200.0, 100.0, 600.0]);
}

#[test]
fn test_generation_gate() {
    let active = full_roster();
    let b = PoolBreakdown::compute(&active, "10", false, "0", &PayoutSplit::default());
    assert!(b.can_generate());
    assert_eq!(b.generate_hint(), None);

    // 90 boxes: blocked regardless of price
    let short = participants(&[("Alice", 45), ("Bob", 45)]);
    let b = PoolBreakdown::compute(&short, "10", false, "0", &PayoutSplit::default());
    assert!(!b.can_generate());
    assert_eq!(
        b.generate_hint(),
        Some("Assign exactly 100 boxes to enable generation.")
    );

    // 100 boxes but a free board: still blocked
    let b = PoolBreakdown::compute(&active, "0", false, "0", &PayoutSplit::default());
    assert!(!b.can_generate());
    assert_eq!(
        b.generate_hint(),
        Some("Set a box price above $0.00 to create a payout pool.")
    );

    // The 50% vig cap means a priced board always keeps some pool
    let b = PoolBreakdown::compute(&active, "10", true, "99", &PayoutSplit::default());
    assert!(b.can_generate());
    assert_eq!(b.payout_pool, 500.0);
}

#[test]
fn test_more_than_100_boxes_blocks_generation() {
    let over = participants(&[("Alice", 60), ("Bob", 60)]);
    let b = PoolBreakdown::compute(&over, "10", false, "0", &PayoutSplit::default());
    assert_eq!(b.total_boxes, 120);
    assert!(!b.can_generate());
}

#[test]
fn test_builtin_presets_are_valid() {
    for preset in PayoutSplit::presets() {
        let sum: f64 = preset.quarters.iter().sum();
        assert_eq!(sum, 100.0);
        assert!(preset.quarters.iter().all(|q| *q >= 0.0));
    }
}

#[test]
fn test_custom_split_validation() {
    let ok = ["30", "30", "20", "20"].map(String::from);
    assert!(PayoutSplit::from_custom_inputs(&ok).is_ok());

    let short = ["30", "30", "30", "9"].map(String::from);
    assert!(PayoutSplit::from_custom_inputs(&short).is_err());

    // Negatives are rejected even when the sum lands on 100.
    let negative = ["-10", "50", "30", "30"].map(String::from);
    assert!(PayoutSplit::from_custom_inputs(&negative).is_err());

    // Malformed quarters parse as zero, which breaks the sum.
    let malformed = ["abc", "30", "30", "40"].map(String::from);
    assert!(PayoutSplit::from_custom_inputs(&malformed).is_err());
}

#[test]
fn test_split_token_round_trip() {
    let split = PayoutSplit::new(30.0, 30.0, 20.0, 20.0);
    assert_eq!(split.token(), "30,30,20,20");
    assert_eq!(PayoutSplit::from_token("30,30,20,20"), Some(split));
    assert_eq!(PayoutSplit::from_token(""), None);
    assert_eq!(PayoutSplit::from_token("25,25,25"), None);
    assert_eq!(PayoutSplit::from_token("25,25,25,-25"), None);
}
