//! Threshold rule evaluation.

use crate::aggregate::{GlobalMetrics, HealthClass, RegionSummary};
use crate::alerts::types::{Alert, Scope, Severity};
use crate::config::{StabilityConfig, ThresholdConfig};

/// Evaluates aggregated metrics against static thresholds.
///
/// Stateless: every call recomputes the full alert list from its inputs.
/// De-duplication and rate limiting across ticks are an external concern.
pub struct AlertEngine {
    latency_warning_ms: f64,
    stability_target: f64,
    stability_tolerance: f64,
}

impl AlertEngine {
    pub fn new(thresholds: &ThresholdConfig, stability: &StabilityConfig) -> Self {
        Self {
            latency_warning_ms: thresholds.latency_warning_ms,
            stability_target: stability.target,
            stability_tolerance: stability.tolerance,
        }
    }

    /// Evaluate all rules. Rules are independent and non-exclusive: one
    /// region can produce both a sync Warning and a latency Warning.
    pub fn evaluate(&self, regional: &[RegionSummary], global: &GlobalMetrics) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for summary in regional {
            if summary.health == HealthClass::Degraded {
                alerts.push(Alert::new(
                    Severity::Warning,
                    Scope::Region(summary.region.clone()),
                    format!(
                        "Region {} sync below threshold: {:.2}%",
                        summary.region, summary.sync_percentage
                    ),
                ));
            }

            if summary.avg_latency > self.latency_warning_ms {
                alerts.push(Alert::new(
                    Severity::Warning,
                    Scope::Region(summary.region.clone()),
                    format!(
                        "High latency detected in {}: {:.2}ms",
                        summary.region, summary.avg_latency
                    ),
                ));
            }
        }

        let deviation = (global.aggregate_stability - self.stability_target).abs();
        if deviation > self.stability_tolerance {
            alerts.push(Alert::new(
                Severity::Critical,
                Scope::Global,
                format!(
                    "Stability deviation detected: {:.6}",
                    global.aggregate_stability
                ),
            ));
        }

        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::types::fingerprint;
    use crate::config::MonitorConfig;

    fn engine() -> AlertEngine {
        let config = MonitorConfig::default();
        AlertEngine::new(&config.thresholds, &config.stability)
    }

    fn summary(region: &str, total: u64, active: u64, avg_latency: f64) -> RegionSummary {
        let ratio = active as f64 / total as f64;
        RegionSummary {
            region: region.to_string(),
            total_nodes: total,
            active_nodes: active,
            sync_percentage: ratio * 100.0,
            avg_latency,
            avg_stability: 0.0431,
            health: HealthClass::from_active_ratio(ratio),
        }
    }

    fn healthy_global() -> GlobalMetrics {
        GlobalMetrics {
            target_nodes: 1000,
            active_nodes: 900,
            synced_nodes: 900,
            sync_percentage: 90.0,
            aggregate_stability: 0.0431,
            avg_latency: 40.0,
            consensus_strength: 0.9,
        }
    }

    #[test]
    fn test_degraded_alert_exact_boundary() {
        let engine = engine();
        let global = healthy_global();

        // Ratio exactly 0.80 is Degraded (boundary falls to the lower class).
        let at_boundary = vec![summary("edge", 100, 80, 30.0)];
        let alerts = engine.evaluate(&at_boundary, &global);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Warning);
        assert!(alerts[0].message.contains("edge"));
        assert!(alerts[0].message.contains("80.00%"));

        // One node above the boundary: no alert.
        let above = vec![summary("edge", 100, 81, 30.0)];
        assert!(engine.evaluate(&above, &global).is_empty());
    }

    #[test]
    fn test_latency_alert_names_region_and_value() {
        let engine = engine();
        let regional = vec![summary("slow", 100, 95, 150.5)];
        let alerts = engine.evaluate(&regional, &healthy_global());

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].scope, Scope::Region("slow".to_string()));
        assert!(alerts[0].message.contains("150.50ms"));

        // At the threshold exactly: no alert (rule is strict greater-than).
        let at = vec![summary("slow", 100, 95, 100.0)];
        assert!(engine.evaluate(&at, &healthy_global()).is_empty());
    }

    #[test]
    fn test_rules_are_non_exclusive() {
        let engine = engine();
        // Degraded *and* slow: both warnings fire for the same region.
        let regional = vec![summary("bad", 100, 50, 200.0)];
        let alerts = engine.evaluate(&regional, &healthy_global());
        assert_eq!(alerts.len(), 2);
    }

    #[test]
    fn test_stability_deviation_is_critical_and_global() {
        let engine = engine();
        let mut global = healthy_global();
        global.aggregate_stability = 0.0431 + 0.0011;

        let alerts = engine.evaluate(&[], &global);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Critical);
        assert_eq!(alerts[0].scope, Scope::Global);

        // Within tolerance: quiet.
        global.aggregate_stability = 0.0431 + 0.0009;
        assert!(engine.evaluate(&[], &global).is_empty());
    }

    #[test]
    fn test_fingerprint_ignores_timestamps() {
        let engine = engine();
        let regional = vec![summary("bad", 100, 50, 200.0)];
        let first = engine.evaluate(&regional, &healthy_global());
        std::thread::sleep(std::time::Duration::from_millis(5));
        let second = engine.evaluate(&regional, &healthy_global());

        assert_ne!(first[0].timestamp, second[0].timestamp);
        assert_eq!(fingerprint(&first), fingerprint(&second));
    }
}
