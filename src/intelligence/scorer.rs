use crate::models::{MarketMovement, PriceSnapshot, ScoreResult, TimeRange};

/// Fill price assumed when converting contract volume to USD.
pub const ASSUMED_FILL_PRICE: f64 = 0.5;

/// Below this USD volume the multiplier is zero.
pub const MIN_USD_VOLUME: f64 = 1_000.0;

/// At or above this USD volume the multiplier saturates at one.
pub const FULL_USD_VOLUME: f64 = 10_000.0;

pub const MAX_SCORE: f64 = 10.0;

// ---------------------------------------------------------------------------
// Snapshot selection
// ---------------------------------------------------------------------------

/// Pick the snapshot closest to the window boundary from the nearest
/// candidates on each side. Ties go to the earlier snapshot.
pub fn pick_start_snapshot<'a>(
    before: Option<&'a PriceSnapshot>,
    after: Option<&'a PriceSnapshot>,
    boundary_ms: i64,
) -> Option<&'a PriceSnapshot> {
    match (before, after) {
        (Some(b), Some(a)) => {
            let before_gap = (boundary_ms - b.timestamp_ms).abs();
            let after_gap = (a.timestamp_ms - boundary_ms).abs();
            if after_gap < before_gap {
                Some(a)
            } else {
                Some(b)
            }
        }
        (Some(b), None) => Some(b),
        (None, Some(a)) => Some(a),
        (None, None) => None,
    }
}

/// Sum of `volume_since_prev` for snapshots inside `range`.
pub fn window_volume(snapshots: &[PriceSnapshot], range: TimeRange) -> f64 {
    snapshots
        .iter()
        .filter(|s| range.contains(s.timestamp_ms))
        .map(|s| s.volume_since_prev)
        .sum()
}

/// Build the movement for one instrument. Without an end snapshot the
/// instrument is skipped; without a start snapshot it reports zero change.
pub fn instrument_movement(
    instrument_id: &str,
    question: &str,
    start: Option<&PriceSnapshot>,
    end: Option<&PriceSnapshot>,
    volume: f64,
) -> Option<MarketMovement> {
    let end = end?;
    let curr = end.price01;
    let prev = start.map(|s| s.price01).unwrap_or(curr);
    if !prev.is_finite() || !curr.is_finite() {
        return None;
    }

    Some(MarketMovement {
        instrument_id: instrument_id.to_string(),
        question: question.to_string(),
        prev_price: prev,
        curr_price: curr,
        change: (curr - prev) * 100.0,
        volume,
    })
}

// ---------------------------------------------------------------------------
// Dominant mover
// ---------------------------------------------------------------------------

/// Instrument with the largest absolute change, first in enumeration order on
/// ties. When nothing moved, the instrument with the highest nonzero volume.
pub fn select_dominant(movements: &[MarketMovement]) -> Option<&MarketMovement> {
    let mut top: Option<&MarketMovement> = None;
    for m in movements {
        if m.change.abs() > top.map_or(0.0, |t| t.change.abs()) {
            top = Some(m);
        }
    }
    if top.is_some() {
        return top;
    }

    let mut busiest: Option<&MarketMovement> = None;
    for m in movements {
        if m.volume > busiest.map_or(0.0, |b| b.volume) {
            busiest = Some(m);
        }
    }
    busiest
}

// ---------------------------------------------------------------------------
// Score curves
// ---------------------------------------------------------------------------

/// Square-root ramp from the USD floor to the saturation point, in [0, 1].
pub fn volume_multiplier(usd_volume: f64) -> f64 {
    if !usd_volume.is_finite() || usd_volume < MIN_USD_VOLUME {
        return 0.0;
    }
    ((usd_volume - MIN_USD_VOLUME) / (FULL_USD_VOLUME - MIN_USD_VOLUME))
        .sqrt()
        .min(1.0)
}

/// Piecewise-linear curve over absolute percentage-point change, in [0, 10].
/// Continuous and non-decreasing.
pub fn base_score(abs_change_pp: f64) -> f64 {
    let c = abs_change_pp.abs();
    if !c.is_finite() {
        return 0.0;
    }
    if c < 1.0 {
        c
    } else if c < 5.0 {
        1.0 + (c - 1.0) * 0.875
    } else if c < 10.0 {
        4.5 + (c - 5.0) * 0.5
    } else if c < 20.0 {
        7.0 + (c - 10.0) * 0.3
    } else {
        MAX_SCORE
    }
}

/// Combine both signals, round to one decimal and clamp to [0, 10].
pub fn seismo_score(base: f64, multiplier: f64) -> f64 {
    let raw = (base * multiplier * 10.0).round() / 10.0;
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, MAX_SCORE)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Turn per-instrument movements (in enumeration order) into a score.
pub fn score_movements(
    event_id: &str,
    window_minutes: i64,
    mut movements: Vec<MarketMovement>,
    now_ms: i64,
) -> ScoreResult {
    let total_volume: f64 = movements.iter().map(|m| m.volume).sum();
    let active_instruments = movements.iter().filter(|m| m.volume > 0.0).count() as i32;

    let dominant = select_dominant(&movements).cloned();

    // Stable sort keeps enumeration order among equal magnitudes.
    movements.sort_by(|a, b| b.change.abs().total_cmp(&a.change.abs()));

    let top_change = dominant.as_ref().map_or(0.0, |d| d.change);
    let top_volume = dominant.as_ref().map_or(0.0, |d| d.volume);
    let multiplier = volume_multiplier(top_volume * ASSUMED_FILL_PRICE);
    let base = base_score(top_change.abs());

    ScoreResult {
        event_id: event_id.to_string(),
        window_minutes,
        seismo_score: seismo_score(base, multiplier),
        top_instrument_id: dominant.as_ref().map(|d| d.instrument_id.clone()),
        top_question: dominant.as_ref().map(|d| d.question.clone()),
        top_prev_price: dominant.as_ref().map(|d| d.prev_price),
        top_curr_price: dominant.as_ref().map(|d| d.curr_price),
        top_change,
        top_volume,
        base_score: base,
        volume_multiplier: multiplier,
        movements,
        total_volume,
        active_instruments,
        computed_at_ms: now_ms,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(ts: i64, price: f64, volume: f64) -> PriceSnapshot {
        PriceSnapshot::new("inst", "evt", ts, price, volume)
    }

    fn movement(id: &str, prev: f64, curr: f64, volume: f64) -> MarketMovement {
        instrument_movement(
            id,
            &format!("{id}?"),
            Some(&snap(0, prev, 0.0)),
            Some(&snap(1, curr, 0.0)),
            volume,
        )
        .unwrap()
    }

    #[test]
    fn test_pick_start_prefers_closer_candidate() {
        let before = snap(1_000, 0.4, 0.0);
        let after = snap(1_900, 0.5, 0.0);
        let picked = pick_start_snapshot(Some(&before), Some(&after), 1_800)
            .unwrap();
        assert_eq!(picked.timestamp_ms, 1_900);
    }

    #[test]
    fn test_pick_start_tie_goes_to_before() {
        let before = snap(1_000, 0.4, 0.0);
        let after = snap(3_000, 0.5, 0.0);
        let picked = pick_start_snapshot(Some(&before), Some(&after), 2_000)
            .unwrap();
        assert_eq!(picked.timestamp_ms, 1_000);
    }

    #[test]
    fn test_pick_start_single_side() {
        let after = snap(3_000, 0.5, 0.0);
        let picked = pick_start_snapshot(None, Some(&after), 2_000).unwrap();
        assert_eq!(picked.timestamp_ms, 3_000);
        assert!(pick_start_snapshot(None, None, 2_000).is_none());
    }

    #[test]
    fn test_window_volume_is_inclusive() {
        let snaps = vec![
            snap(999, 0.5, 5.0),
            snap(1_000, 0.5, 1.0),
            snap(1_500, 0.5, 2.0),
            snap(2_000, 0.5, 3.0),
        ];
        assert_eq!(window_volume(&snaps, TimeRange::new(1_000, 2_000)), 6.0);
    }

    #[test]
    fn test_missing_start_means_zero_change() {
        let end = snap(2_000, 0.7, 0.0);
        let m = instrument_movement("a", "q", None, Some(&end), 10.0).unwrap();
        assert_eq!(m.prev_price, 0.7);
        assert_eq!(m.change, 0.0);
        assert!(instrument_movement("a", "q", None, None, 10.0).is_none());
    }

    #[test]
    fn test_base_score_breakpoints() {
        assert_eq!(base_score(0.5), 0.5);
        assert_eq!(base_score(1.0), 1.0);
        assert!((base_score(3.0) - 2.75).abs() < 1e-12);
        assert_eq!(base_score(5.0), 4.5);
        assert_eq!(base_score(10.0), 7.0);
        assert!((base_score(12.0) - 7.6).abs() < 1e-12);
        assert_eq!(base_score(20.0), 10.0);
        assert_eq!(base_score(85.0), 10.0);
    }

    #[test]
    fn test_base_score_is_monotonic() {
        let mut prev = base_score(0.0);
        for i in 1..=3000 {
            let c = i as f64 * 0.01;
            let b = base_score(c);
            assert!(b >= prev, "base_score({c}) = {b} dropped below {prev}");
            prev = b;
        }
    }

    #[test]
    fn test_volume_multiplier_ramp() {
        assert_eq!(volume_multiplier(0.0), 0.0);
        assert_eq!(volume_multiplier(999.99), 0.0);
        assert_eq!(volume_multiplier(1_000.0), 0.0);
        assert!((volume_multiplier(3_250.0) - 0.5).abs() < 1e-12);
        assert_eq!(volume_multiplier(10_000.0), 1.0);
        assert_eq!(volume_multiplier(1_000_000.0), 1.0);
    }

    #[test]
    fn test_seismo_score_rounds_and_clamps() {
        assert_eq!(seismo_score(7.64, 1.0), 7.6);
        assert_eq!(seismo_score(7.65, 1.0), 7.7);
        assert_eq!(seismo_score(10.0, 1.0), 10.0);
        assert_eq!(seismo_score(0.0, 1.0), 0.0);
        assert_eq!(seismo_score(f64::NAN, 1.0), 0.0);
    }

    #[test]
    fn test_dominant_mover_dominates_score() {
        // +12pp on $50,000 notional vs +1pp on $100 notional
        let movements = vec![
            movement("small", 0.30, 0.31, 200.0),
            movement("big", 0.40, 0.52, 100_000.0),
        ];
        let result = score_movements("evt", 60, movements, 0);

        assert_eq!(result.top_instrument_id.as_deref(), Some("big"));
        assert!((result.base_score - 7.6).abs() < 1e-9);
        assert_eq!(result.volume_multiplier, 1.0);
        assert_eq!(result.seismo_score, 7.6);
        assert_eq!(result.movements[0].instrument_id, "big");
        assert_eq!(result.active_instruments, 2);
        assert_eq!(result.total_volume, 100_200.0);
    }

    #[test]
    fn test_thin_volume_scores_zero() {
        // 1,998 contracts * 0.5 = $999 notional
        let movements = vec![movement("a", 0.10, 0.60, 1_998.0)];
        let result = score_movements("evt", 60, movements, 0);
        assert_eq!(result.base_score, 10.0);
        assert_eq!(result.seismo_score, 0.0);
    }

    #[test]
    fn test_flat_prices_fall_back_to_highest_volume() {
        let movements = vec![
            movement("quiet", 0.5, 0.5, 10.0),
            movement("busy", 0.2, 0.2, 90_000.0),
        ];
        let result = score_movements("evt", 5, movements, 0);
        assert_eq!(result.top_instrument_id.as_deref(), Some("busy"));
        assert_eq!(result.top_volume, 90_000.0);
        // zero change keeps the score at zero regardless of volume
        assert_eq!(result.seismo_score, 0.0);
    }

    #[test]
    fn test_no_movements_has_no_dominant() {
        let result = score_movements("evt", 5, Vec::new(), 0);
        assert!(result.top_instrument_id.is_none());
        assert_eq!(result.seismo_score, 0.0);
        assert_eq!(result.active_instruments, 0);
    }

    #[test]
    fn test_sort_is_stable_on_equal_magnitude() {
        let movements = vec![
            movement("first", 0.25, 0.50, 0.0),
            movement("second", 0.75, 0.50, 0.0),
            movement("third", 0.50, 1.00, 0.0),
        ];
        let result = score_movements("evt", 5, movements, 0);
        let order: Vec<&str> = result
            .movements
            .iter()
            .map(|m| m.instrument_id.as_str())
            .collect();
        assert_eq!(order, vec!["third", "first", "second"]);
        assert_eq!(result.top_instrument_id.as_deref(), Some("third"));
    }

    #[test]
    fn test_score_bounds_over_grid() {
        for prev in [0.0, 0.1, 0.5, 0.9, 1.0] {
            for curr in [0.0, 0.25, 0.5, 0.99, 1.0] {
                for volume in [0.0, 1_500.0, 5_000.0, 30_000.0, 1e9] {
                    let movements = vec![movement("m", prev, curr, volume)];
                    let result = score_movements("evt", 60, movements, 0);
                    let s = result.seismo_score;
                    assert!((0.0..=10.0).contains(&s));
                    assert!(((s * 10.0).round() - s * 10.0).abs() < 1e-9);
                }
            }
        }
    }
}
