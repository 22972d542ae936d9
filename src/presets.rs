use serde::{Deserialize, Serialize};

use crate::input::{CalculatorInput, DirectCosts};

/// A named template of quote, cost and day figures taken from a past job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPreset {
    pub key: String,
    pub label: String,
    pub revenue: f64,
    pub crew: f64,
    pub travel: f64,
    pub equipment: f64,
    pub outsourcing: f64,
    pub other: f64,
    pub days: f64,
}

impl JobPreset {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        revenue: f64,
        crew: f64,
        travel: f64,
        equipment: f64,
        outsourcing: f64,
        other: f64,
        days: f64,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            revenue,
            crew,
            travel,
            equipment,
            outsourcing,
            other,
            days,
        }
    }

    pub fn direct_costs(&self) -> DirectCosts {
        DirectCosts::new(
            self.crew,
            self.travel,
            self.equipment,
            self.outsourcing,
            self.other,
        )
    }
}

/// Ordered catalogue of presets, looked up by key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetCatalogue {
    presets: Vec<JobPreset>,
}

impl PresetCatalogue {
    pub fn new(presets: Vec<JobPreset>) -> Self {
        Self { presets }
    }

    pub fn presets(&self) -> &[JobPreset] {
        &self.presets
    }

    pub fn get(&self, key: &str) -> Option<&JobPreset> {
        self.presets.iter().find(|p| p.key == key)
    }

    /// Applies the preset named `key`, or returns `None` when no such preset exists.
    pub fn apply(&self, key: &str, input: CalculatorInput) -> Option<CalculatorInput> {
        self.get(key).map(|preset| input.apply_preset(preset))
    }
}

impl Default for PresetCatalogue {
    fn default() -> Self {
        Self::new(vec![
            JobPreset::new("blank", "Start Fresh", 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0),
            JobPreset::new(
                "brand-video-large",
                "Brand Video (Large), e.g. HGI Kyoto ¥3.4M",
                3_400_000.0,
                400_000.0,
                200_000.0,
                100_000.0,
                150_000.0,
                50_000.0,
                8.0,
            ),
            JobPreset::new(
                "brand-video-medium",
                "Brand Video (Medium), e.g. Hilton MICE ¥2M",
                2_000_000.0,
                150_000.0,
                100_000.0,
                50_000.0,
                80_000.0,
                20_000.0,
                5.0,
            ),
            JobPreset::new(
                "event-coverage",
                "Event / Conference, e.g. Fukuoka F&B ¥955K",
                950_000.0,
                150_000.0,
                100_000.0,
                30_000.0,
                50_000.0,
                20_000.0,
                3.0,
            ),
            JobPreset::new(
                "small-video",
                "Small Project, e.g. Seeds ¥825K",
                825_000.0,
                60_000.0,
                50_000.0,
                20_000.0,
                20_000.0,
                10_000.0,
                2.0,
            ),
            JobPreset::new(
                "multi-day-shoot",
                "Multi-Day Shoot, e.g. Alan Watts ¥1.5M",
                1_500_000.0,
                200_000.0,
                150_000.0,
                80_000.0,
                80_000.0,
                40_000.0,
                5.0,
            ),
        ])
    }
}
