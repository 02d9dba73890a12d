use crate::config;

/// Externally owned fidelity setting. Budgets and expensive rendering
/// branches key off this tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualQuality {
    Low,
    Medium,
    High,
    Ultra,
}

impl VisualQuality {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Ultra];

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Ultra => "Ultra",
        }
    }

    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "med" | "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "ultra" => Some(Self::Ultra),
            _ => None,
        }
    }

    /// Star placement budget for this tier.
    pub fn star_budget(self) -> usize {
        match self {
            Self::Low => config::STARS_LOW,
            Self::Medium => config::STARS_MEDIUM,
            Self::High => config::STARS_HIGH,
            Self::Ultra => config::STARS_ULTRA,
        }
    }

    /// Number of offset silhouette copies for the soft penumbra.
    pub fn silhouette_layers(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Medium => 2,
            Self::High | Self::Ultra => 3,
        }
    }
}

/// Per-frame feature gates derived from the quality tier. The tier itself is
/// pushed in from outside (settings UI or CLI); individual toggles can be
/// overridden from the settings panel for debugging.
#[derive(Clone, Copy, Debug)]
pub struct VisualSettings {
    pub quality: VisualQuality,
    pub shadows_enabled: bool,
    pub fringe_enabled: bool,
    pub outlines_enabled: bool,
    pub nebula_enabled: bool,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self::with_quality(VisualQuality::High)
    }
}

impl VisualSettings {
    pub fn with_quality(quality: VisualQuality) -> Self {
        let mut settings = Self {
            quality,
            shadows_enabled: true,
            fringe_enabled: true,
            outlines_enabled: true,
            nebula_enabled: true,
        };

        if quality == VisualQuality::Low {
            settings.shadows_enabled = false;
            settings.fringe_enabled = false;
        }

        settings
    }

    pub fn set_quality_preset(&mut self, quality: VisualQuality) {
        *self = Self::with_quality(quality);
    }
}
