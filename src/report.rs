//! On-demand frame-metrics report, serialized to JSON.

use serde::{Deserialize, Serialize};

use crate::stats::FrameStats;
use crate::visual::VisualQuality;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl Default for MetricSummary {
    fn default() -> Self {
        Self {
            count: 0,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            p50: 0.0,
            p95: 0.0,
            p99: 0.0,
        }
    }
}

/// Summarize a set of samples. Percentiles use nearest-rank on a sorted
/// copy, which is exact enough for frame timing.
pub fn summarize(samples: &[f64]) -> MetricSummary {
    if samples.is_empty() {
        return MetricSummary::default();
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let sum: f64 = sorted.iter().sum();

    MetricSummary {
        count: sorted.len(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        mean: sum / sorted.len() as f64,
        p50: percentile_nearest_rank(&sorted, 0.50),
        p95: percentile_nearest_rank(&sorted, 0.95),
        p99: percentile_nearest_rank(&sorted, 0.99),
    }
}

fn percentile_nearest_rank(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let p = p.clamp(0.0, 1.0);
    let rank = ((p * sorted.len() as f64).ceil() as usize).saturating_sub(1);
    sorted[rank.min(sorted.len() - 1)]
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub quality: String,
    pub star_count: usize,
    pub outline_segments: usize,
    pub shadow_trails: usize,
    pub frame_ms: MetricSummary,
}

impl FrameReport {
    pub fn from_stats(stats: &FrameStats, quality: VisualQuality) -> Self {
        let samples: Vec<f64> = stats.frame_ms.iter().map(|v| v as f64).collect();
        Self {
            quality: quality.label().to_string(),
            star_count: stats.star_count,
            outline_segments: stats.outline_segments,
            shadow_trails: stats.shadow_trails,
            frame_ms: summarize(&samples),
        }
    }
}

/// Write the report next to the executable. Failure is logged by the
/// caller, never fatal.
pub fn write_report(report: &FrameReport, path: &str) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| format!("serialize report: {e}"))?;
    std::fs::write(path, json).map_err(|e| format!("write {path}: {e}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_of_empty_is_default() {
        let s = summarize(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.mean, 0.0);
    }

    #[test]
    fn percentile_summary_is_reasonable() {
        let samples: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let s = summarize(&samples);
        assert_eq!(s.count, 100);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 100.0);
        assert!((s.mean - 50.5).abs() < 1e-9);
        assert_eq!(s.p50, 50.0);
        assert_eq!(s.p95, 95.0);
        assert_eq!(s.p99, 99.0);
    }

    #[test]
    fn single_sample_summary() {
        let s = summarize(&[16.7]);
        assert_eq!(s.p50, 16.7);
        assert_eq!(s.p99, 16.7);
        assert_eq!(s.min, s.max);
    }

    #[test]
    fn report_serializes_to_json() {
        let stats = FrameStats::new(8);
        let report = FrameReport::from_stats(&stats, VisualQuality::Medium);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"quality\":\"Medium\""));
    }
}
