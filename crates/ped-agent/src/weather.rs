//! Weather conditions and their effect on walking speed.

/// Walking speed never drops below this fraction of the agent's baseline,
/// however severe the conditions.
pub const MIN_SPEED_FACTOR: f64 = 0.3;

/// Categorical weather label (informational; the numeric fields drive the
/// speed model).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherKind {
    #[default]
    Clear,
    Rain,
    Snow,
    Fog,
    Windy,
}

/// Process-wide weather parameters.
///
/// Mutable mid-run via the engine's weather setter, which rescales every
/// live agent's speed from its stored ceiling and sensitivity.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherConditions {
    pub temperature_c: f64,
    /// Precipitation intensity in [0, 1].
    pub precipitation: f64,
    pub wind_speed_mps: f64,
    /// Visibility in [0, 1]; 1.0 is clear.
    pub visibility: f64,
    pub kind: WeatherKind,
}

impl Default for WeatherConditions {
    /// Mild, clear conditions: no speed penalty for any agent.
    fn default() -> Self {
        Self {
            temperature_c: 20.0,
            precipitation: 0.0,
            wind_speed_mps: 0.0,
            visibility: 1.0,
            kind: WeatherKind::Clear,
        }
    }
}

impl WeatherConditions {
    /// Multiplicative walking-speed factor for an agent with the given
    /// sensitivity.
    ///
    /// Four independent penalties — temperature outside the 0–30 °C comfort
    /// band, precipitation, wind above 10 m/s, visibility below 0.8 — each
    /// scaled by the agent's sensitivity, with a hard floor of
    /// [`MIN_SPEED_FACTOR`].
    pub fn speed_factor(&self, sensitivity: f64) -> f64 {
        let s = sensitivity.clamp(0.0, 1.0);
        let mut factor = 1.0;

        if self.temperature_c < 0.0 {
            factor *= 1.0 - 0.25 * s;
        } else if self.temperature_c > 30.0 {
            factor *= 1.0 - 0.15 * s;
        }

        let precip = self.precipitation.clamp(0.0, 1.0);
        if precip > 0.0 {
            factor *= 1.0 - 0.4 * precip * s;
        }

        if self.wind_speed_mps > 10.0 {
            let excess = ((self.wind_speed_mps - 10.0) / 10.0).min(1.0);
            factor *= 1.0 - 0.3 * excess * s;
        }

        let vis = self.visibility.clamp(0.0, 1.0);
        if vis < 0.8 {
            factor *= 1.0 - 0.25 * ((0.8 - vis) / 0.8) * s;
        }

        factor.max(MIN_SPEED_FACTOR)
    }
}
