//! Delimiter inference for CSV sources.
//!
//! Candidates are restricted to comma and semicolon. Each candidate is
//! scored by how uniform the field counts of a quote-aware sample parse
//! come out; when neither candidate produces a usable parse, or both score
//! the same, the raw occurrence counts in the sample decide.

use std::io::Cursor;

/// Number of leading bytes inspected when sniffing.
pub const SNIFF_SAMPLE_BYTES: usize = 2048;

/// Delimiters considered during inference.
const CANDIDATES: [u8; 2] = [b',', b';'];

/// Scores closer than this are treated as a tie.
const SCORE_EPSILON: f64 = 1e-9;

/// Infer the delimiter from a sample of raw CSV bytes.
///
/// Deterministic and side-effect free: the same sample always yields the
/// same delimiter. Comma wins exact ties, including the empty sample.
pub fn sniff_delimiter(sample: &[u8]) -> u8 {
    let sample = &sample[..sample.len().min(SNIFF_SAMPLE_BYTES)];

    let scores: Vec<(u8, Option<f64>)> = CANDIDATES
        .iter()
        .map(|&delim| (delim, uniformity_score(sample, delim)))
        .collect();

    match (scores[0].1, scores[1].1) {
        (Some(comma), Some(semi)) if (comma - semi).abs() > SCORE_EPSILON => {
            if comma > semi { b',' } else { b';' }
        }
        (Some(_), None) => b',',
        (None, Some(_)) => b';',
        // Tie or no usable parse at all
        _ => frequency_fallback(sample),
    }
}

/// Score a candidate delimiter by the uniformity of the field counts it
/// produces, following the consistency measure 1 / (1 + 2 * sigma) over
/// the per-row field counts.
///
/// Returns `None` when the candidate yields no rows or never actually
/// splits a row (modal field count below 2), since such a parse carries no
/// evidence about the dialect.
fn uniformity_score(sample: &[u8], delimiter: u8) -> Option<f64> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(sample));

    let mut field_counts: Vec<usize> = Vec::new();
    let mut record = csv::StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => field_counts.push(record.len()),
            Ok(false) => break,
            // The trailing sample row is often truncated mid-record; stop
            // scoring at the first parse error instead of failing.
            Err(_) => break,
        }
    }

    if field_counts.is_empty() {
        return None;
    }

    // Drop a truncated final row so it cannot skew the dispersion.
    if field_counts.len() > 2 {
        field_counts.pop();
    }

    let modal = modal_count(&field_counts);
    if modal < 2 {
        return None;
    }

    let sigma = standard_deviation(&field_counts);
    Some(1.0 / 2.0f64.mul_add(sigma, 1.0))
}

/// Most common field count, preferring the higher count on frequency ties.
fn modal_count(field_counts: &[usize]) -> usize {
    let mut counts: foldhash::HashMap<usize, usize> = foldhash::HashMap::default();
    for &fc in field_counts {
        *counts.entry(fc).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by(|(fc_a, n_a), (fc_b, n_b)| n_a.cmp(n_b).then_with(|| fc_a.cmp(fc_b)))
        .map_or(0, |(fc, _)| fc)
}

fn standard_deviation(values: &[usize]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    let variance = values
        .iter()
        .map(|&v| {
            let diff = v as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}

/// Pick the candidate that occurs more often in the raw sample bytes.
/// Comma wins ties so the result stays deterministic.
fn frequency_fallback(sample: &[u8]) -> u8 {
    let commas = bytecount::count(sample, b',');
    let semis = bytecount::count(sample, b';');
    if semis > commas { b';' } else { b',' }
}
