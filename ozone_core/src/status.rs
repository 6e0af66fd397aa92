//! Operator-facing status derived from a tick's metrics.

use crate::process::ProcessMetrics;

/// Residual ozone below this is considered safe, mg/L.
pub const RESIDUAL_SAFE: f64 = 0.4;
/// Quality above this, together with a safe residual, reads as normal.
pub const QUALITY_SAFE: f64 = 90.0;
/// Quality above this means the control loops are holding.
pub const QUALITY_STABLE: f64 = 88.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyState {
    Normal,
    AtRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stable,
    NeedsCorrection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
}

/// Snapshot of the three status indicators shown on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterStatus {
    pub safety: SafetyState,
    pub loops: LoopState,
    pub risk: RiskLevel,
}

impl WaterStatus {
    /// Derive status from the metrics of the tick that was just modeled.
    pub fn derive(m: &ProcessMetrics) -> Self {
        let safety = if m.residual < RESIDUAL_SAFE && m.quality > QUALITY_SAFE {
            SafetyState::Normal
        } else {
            SafetyState::AtRisk
        };
        let loops = if m.quality > QUALITY_STABLE {
            LoopState::Stable
        } else {
            LoopState::NeedsCorrection
        };
        let risk = if m.residual < RESIDUAL_SAFE {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        };
        Self {
            safety,
            loops,
            risk,
        }
    }
}

impl core::fmt::Display for SafetyState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::AtRisk => write!(f, "at-risk"),
        }
    }
}

impl core::fmt::Display for LoopState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Stable => write!(f, "stable"),
            Self::NeedsCorrection => write!(f, "needs-correction"),
        }
    }
}

impl core::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(quality: f64, residual: f64) -> ProcessMetrics {
        ProcessMetrics {
            quality,
            residual,
            efficiency: 0.8,
            energy: 2.0,
            orp: 640.0,
            uv254: 2.0,
            temp: 18.0,
            ph: 7.2,
        }
    }

    #[test]
    fn normal_needs_both_quality_and_residual() {
        let s = WaterStatus::derive(&metrics(95.0, 0.2));
        assert_eq!(s.safety, SafetyState::Normal);
        assert_eq!(s.loops, LoopState::Stable);
        assert_eq!(s.risk, RiskLevel::Low);

        // High residual alone flips safety and risk but not loop stability.
        let s = WaterStatus::derive(&metrics(95.0, 0.5));
        assert_eq!(s.safety, SafetyState::AtRisk);
        assert_eq!(s.loops, LoopState::Stable);
        assert_eq!(s.risk, RiskLevel::Medium);
    }

    #[test]
    fn low_quality_needs_correction() {
        let s = WaterStatus::derive(&metrics(70.0, 0.2));
        assert_eq!(s.safety, SafetyState::AtRisk);
        assert_eq!(s.loops, LoopState::NeedsCorrection);
        assert_eq!(s.risk, RiskLevel::Low);
    }
}
