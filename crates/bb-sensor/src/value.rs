//! Sensor readings.

/// One reading from a sensor channel.
///
/// Each variant carries the unit its driver reports; behaviors pull out the
/// variant they expect through the `as_*` accessors and treat a mismatch as
/// "no reading".
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorValue {
    /// Distance to the nearest obstacle in centimeters.
    Distance(f64),
    /// Reflectance samples across the IR array; 0.0 = black, 1.0 = white.
    Reflectance(Vec<f64>),
    /// Fraction of camera pixels matching the target color, in `[0, 1]`.
    ColorMatch(f64),
}

impl SensorValue {
    pub fn as_distance(&self) -> Option<f64> {
        match self {
            SensorValue::Distance(cm) => Some(*cm),
            _ => None,
        }
    }

    pub fn as_color_match(&self) -> Option<f64> {
        match self {
            SensorValue::ColorMatch(f) => Some(*f),
            _ => None,
        }
    }

    /// The darkest reflectance sample, i.e. the strongest line signal.
    ///
    /// `None` for non-reflectance readings or an empty array.
    pub fn darkest(&self) -> Option<f64> {
        match self {
            SensorValue::Reflectance(samples) => samples.iter().copied().reduce(f64::min),
            _ => None,
        }
    }
}
