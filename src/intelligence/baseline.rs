use chrono::{DateTime, Utc};

use crate::errors::ScoringError;
use crate::models::{Baseline, PriceSnapshot};

/// Fewer snapshots than this and no baseline is produced.
pub const MIN_BASELINE_SNAPSHOTS: usize = 10;

pub const DEFAULT_LOOKBACK_DAYS: i64 = 14;

/// Floor for the return standard deviation so divisions stay finite.
pub const STD_RETURN_FLOOR: f64 = 1e-6;

/// Rolling volatility reference for one instrument.
///
/// `snapshots` must be ordered by timestamp. Returns are computed between
/// consecutive snapshots; pairs whose earlier price is zero are skipped.
pub fn compute_baseline(
    instrument_id: &str,
    snapshots: &[PriceSnapshot],
    lookback_days: i64,
    computed_at: DateTime<Utc>,
) -> Result<Baseline, ScoringError> {
    if snapshots.len() < MIN_BASELINE_SNAPSHOTS {
        return Err(ScoringError::InsufficientSnapshots {
            instrument_id: instrument_id.to_string(),
            found: snapshots.len(),
            required: MIN_BASELINE_SNAPSHOTS,
        });
    }

    let returns: Vec<f64> = snapshots
        .windows(2)
        .filter(|pair| pair[0].price01 != 0.0)
        .map(|pair| (pair[1].price01 - pair[0].price01) / pair[0].price01)
        .filter(|r| r.is_finite())
        .collect();

    if returns.is_empty() {
        return Err(ScoringError::NoValidReturns {
            instrument_id: instrument_id.to_string(),
        });
    }

    let n = returns.len() as f64;
    let mean = returns.iter().sum::<f64>() / n;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let std_return = variance.sqrt().max(STD_RETURN_FLOOR);

    let avg_volume =
        snapshots.iter().map(|s| s.volume_since_prev).sum::<f64>() / snapshots.len() as f64;

    Ok(Baseline {
        instrument_id: instrument_id.to_string(),
        mean_return: mean,
        std_return,
        avg_volume,
        sample_count: snapshots.len() as i32,
        lookback_days: lookback_days as i32,
        computed_at,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn history(prices: &[f64]) -> Vec<PriceSnapshot> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PriceSnapshot::new("inst", "evt", i as i64 * 60_000, p, 10.0 + i as f64))
            .collect()
    }

    #[test]
    fn test_insufficient_snapshots() {
        let err = compute_baseline("inst", &history(&[0.5; 9]), 14, Utc::now()).unwrap_err();
        assert!(matches!(
            err,
            ScoringError::InsufficientSnapshots { found: 9, required: 10, .. }
        ));
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_all_zero_prices_have_no_valid_returns() {
        let err = compute_baseline("inst", &history(&[0.0; 12]), 14, Utc::now()).unwrap_err();
        assert!(matches!(err, ScoringError::NoValidReturns { .. }));
    }

    #[test]
    fn test_flat_series_floors_std() {
        let b = compute_baseline("inst", &history(&[0.4; 10]), 14, Utc::now()).unwrap();
        assert_eq!(b.mean_return, 0.0);
        assert_eq!(b.std_return, STD_RETURN_FLOOR);
        assert_eq!(b.sample_count, 10);
        // volumes 10..=19
        assert!((b.avg_volume - 14.5).abs() < 1e-12);
    }

    #[test]
    fn test_population_statistics() {
        // returns: +100%, -50%, repeated
        let prices = [0.2, 0.4, 0.2, 0.4, 0.2, 0.4, 0.2, 0.4, 0.2, 0.4, 0.2];
        let b = compute_baseline("inst", &history(&prices), 7, Utc::now()).unwrap();
        // 5 x 1.0 and 5 x -0.5
        assert!((b.mean_return - 0.25).abs() < 1e-12);
        assert!((b.std_return - 0.75).abs() < 1e-12);
        assert_eq!(b.lookback_days, 7);
    }

    #[test]
    fn test_zero_price_pairs_are_skipped() {
        let prices = [0.0, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5];
        let b = compute_baseline("inst", &history(&prices), 14, Utc::now()).unwrap();
        assert_eq!(b.mean_return, 0.0);
    }
}
