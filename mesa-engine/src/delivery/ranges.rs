//! Distance tier maintenance
//!
//! Tiers stay contiguous: the first starts at 0 and each tier's
//! `min_distance` equals the previous tier's `max_distance`. Every edit
//! re-stitches its neighbour so the convention holds after the call.

use shared::models::DistanceRange;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RangeError {
    #[error("Range {index}: max distance {max:.2} must be greater than min distance {min:.2}")]
    InvertedRange { index: usize, min: f64, max: f64 },

    #[error("Range {index}: starts at {min:.2}, expected {expected:.2}")]
    NotContiguous { index: usize, min: f64, expected: f64 },

    #[error("Range {index}: cost must be a finite, non-negative amount")]
    InvalidCost { index: usize },

    #[error("No range at index {0}")]
    IndexOutOfBounds(usize),
}

fn check_cost(index: usize, cost: f64) -> Result<(), RangeError> {
    if !cost.is_finite() || cost < 0.0 {
        return Err(RangeError::InvalidCost { index });
    }
    Ok(())
}

/// Append a tier starting where the last one ends (0 for the first)
pub fn append_range(
    ranges: &mut Vec<DistanceRange>,
    max_distance: f64,
    cost: f64,
    is_free: bool,
) -> Result<(), RangeError> {
    let index = ranges.len();
    let min = ranges.last().map(|r| r.max_distance).unwrap_or(0.0);
    if !max_distance.is_finite() || max_distance <= min {
        return Err(RangeError::InvertedRange {
            index,
            min,
            max: max_distance,
        });
    }
    check_cost(index, cost)?;

    ranges.push(DistanceRange {
        min_distance: min,
        max_distance,
        cost: if is_free { 0.0 } else { cost },
        is_free,
    });
    Ok(())
}

/// Change a tier's upper bound and price; the next tier's min follows
pub fn update_range(
    ranges: &mut [DistanceRange],
    index: usize,
    max_distance: f64,
    cost: f64,
    is_free: bool,
) -> Result<(), RangeError> {
    let min = ranges
        .get(index)
        .map(|r| r.min_distance)
        .ok_or(RangeError::IndexOutOfBounds(index))?;

    if !max_distance.is_finite() || max_distance <= min {
        return Err(RangeError::InvertedRange {
            index,
            min,
            max: max_distance,
        });
    }
    if let Some(next) = ranges.get(index + 1)
        && max_distance >= next.max_distance
    {
        return Err(RangeError::InvertedRange {
            index: index + 1,
            min: max_distance,
            max: next.max_distance,
        });
    }
    check_cost(index, cost)?;

    let range = &mut ranges[index];
    range.max_distance = max_distance;
    range.cost = if is_free { 0.0 } else { cost };
    range.is_free = is_free;

    if let Some(next) = ranges.get_mut(index + 1) {
        next.min_distance = max_distance;
    }
    Ok(())
}

/// Remove a tier; the following tier takes over its start
pub fn remove_range(ranges: &mut Vec<DistanceRange>, index: usize) -> Result<DistanceRange, RangeError> {
    if index >= ranges.len() {
        return Err(RangeError::IndexOutOfBounds(index));
    }
    let removed = ranges.remove(index);
    if let Some(next) = ranges.get_mut(index) {
        next.min_distance = removed.min_distance;
    }
    Ok(removed)
}

/// Check the contiguity convention, reporting the first offending tier
pub fn validate_ranges(ranges: &[DistanceRange]) -> Result<(), RangeError> {
    let mut expected = 0.0;
    for (index, range) in ranges.iter().enumerate() {
        if range.min_distance != expected {
            return Err(RangeError::NotContiguous {
                index,
                min: range.min_distance,
                expected,
            });
        }
        if range.max_distance <= range.min_distance {
            return Err(RangeError::InvertedRange {
                index,
                min: range.min_distance,
                max: range.max_distance,
            });
        }
        check_cost(index, range.cost)?;
        expected = range.max_distance;
    }
    Ok(())
}
