use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Stable,
}

impl TrendDirection {
    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Up => "up",
            TrendDirection::Down => "down",
            TrendDirection::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub next_value: u64,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordinary least squares over x = 1..=n.
pub fn fit_line(values: &[u64]) -> Option<LinearFit> {
    if values.is_empty() {
        return None;
    }

    let n = values.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for (idx, value) in values.iter().enumerate() {
        let x = (idx + 1) as f64;
        let y = *value as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    // zero when n == 1
    let denominator = (n * sum_xx - sum_x * sum_x).max(1.0);
    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Some(LinearFit { slope, intercept })
}

pub fn forecast_next(values: &[u64]) -> u64 {
    match values {
        [] => 0,
        [only] => *only,
        _ => {
            let Some(fit) = fit_line(values) else {
                return 0;
            };
            let next = fit.at((values.len() + 1) as f64);
            if next.is_nan() {
                return values[values.len() - 1];
            }
            next.max(0.0).round() as u64
        }
    }
}

pub fn predict(values: &[u64]) -> Prediction {
    let next_value = forecast_next(values);
    let last = values.last().copied().unwrap_or(0);
    let trend = if next_value > last {
        TrendDirection::Up
    } else if next_value < last {
        TrendDirection::Down
    } else {
        TrendDirection::Stable
    };

    Prediction { next_value, trend }
}
