//! Chart series structures and the index-driven palette.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub border_color: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutout: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Visual role of a series; decides the palette and per-role hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartRole {
    /// Filled line chart.
    Area,
    Bar,
    Pie,
    Doughnut,
}

struct Tone {
    saturation: u32,
    lightness: u32,
    alpha: f64,
}

impl ChartRole {
    fn fill_tone(self) -> Tone {
        match self {
            ChartRole::Area => Tone {
                saturation: 70,
                lightness: 60,
                alpha: 0.2,
            },
            ChartRole::Bar => Tone {
                saturation: 70,
                lightness: 55,
                alpha: 0.6,
            },
            ChartRole::Pie | ChartRole::Doughnut => Tone {
                saturation: 75,
                lightness: 55,
                alpha: 0.8,
            },
        }
    }

    fn border_tone(self) -> Tone {
        match self {
            ChartRole::Area => Tone {
                saturation: 70,
                lightness: 45,
                alpha: 1.0,
            },
            ChartRole::Bar => Tone {
                saturation: 70,
                lightness: 40,
                alpha: 1.0,
            },
            ChartRole::Pie | ChartRole::Doughnut => Tone {
                saturation: 0,
                lightness: 100,
                alpha: 1.0,
            },
        }
    }
}

/// `hue = 360 * index / count`, formatted as a CSS `hsla()` color.
fn hsla(index: usize, count: usize, tone: &Tone) -> String {
    let hue = if count == 0 {
        0.0
    } else {
        360.0 * index as f64 / count as f64
    };
    format!(
        "hsla({:.1}, {}%, {}%, {})",
        hue, tone.saturation, tone.lightness, tone.alpha
    )
}

/// One color per category, evenly spaced around the wheel.
pub fn palette(count: usize, role: ChartRole) -> Vec<String> {
    let tone = role.fill_tone();
    (0..count).map(|i| hsla(i, count, &tone)).collect()
}

fn border_palette(count: usize, role: ChartRole) -> Vec<String> {
    let tone = role.border_tone();
    (0..count).map(|i| hsla(i, count, &tone)).collect()
}

impl Dataset {
    /// A dataset over `data.len()` categories styled for `role`.
    pub fn styled(label: impl Into<String>, data: Vec<f64>, role: ChartRole) -> Self {
        let n = data.len();
        let mut dataset = Self {
            label: label.into(),
            background_color: palette(n, role),
            border_color: border_palette(n, role),
            border_width: Some(1),
            data,
            fill: None,
            tension: None,
            cutout: None,
        };
        match role {
            ChartRole::Area => {
                dataset.fill = Some(true);
                dataset.tension = Some(0.4);
            }
            ChartRole::Doughnut => dataset.cutout = Some("50%".to_string()),
            ChartRole::Bar | ChartRole::Pie => {}
        }
        dataset
    }
}

impl ChartSeries {
    /// Single-dataset series from label/count pairs, in the tally's order.
    pub fn from_tally(tally: &IndexMap<String, usize>, label: &str, role: ChartRole) -> Self {
        let labels: Vec<String> = tally.keys().cloned().collect();
        let data: Vec<f64> = tally.values().map(|&c| c as f64).collect();
        Self {
            labels,
            datasets: vec![Dataset::styled(label, data, role)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Every dataset has one value per label.
    pub fn is_aligned(&self) -> bool {
        self.datasets.iter().all(|d| d.data.len() == self.labels.len())
    }

    /// Sum of the first dataset's values.
    pub fn total(&self) -> f64 {
        self.datasets
            .first()
            .map(|d| d.data.iter().sum())
            .unwrap_or(0.0)
    }

    /// Value of `label` in the first dataset.
    pub fn value_of(&self, label: &str) -> Option<f64> {
        let idx = self.labels.iter().position(|l| l == label)?;
        self.datasets.first().and_then(|d| d.data.get(idx).copied())
    }
}
