use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const UNIT_CELSIUS: &str = "°C";
pub const UNIT_FAHRENHEIT: &str = "°F";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureScale {
    #[default]
    Celsius,
    Fahrenheit,
}

impl std::fmt::Display for TemperatureScale {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        fmt.write_str(self.unit_of_measurement())
    }
}

impl TemperatureScale {
    pub fn unit_of_measurement(&self) -> &'static str {
        match self {
            Self::Celsius => UNIT_CELSIUS,
            Self::Fahrenheit => UNIT_FAHRENHEIT,
        }
    }
}

impl FromStr for TemperatureScale {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<TemperatureScale> {
        match s.trim() {
            "c" | "C" | "°c" | "°C" | "Celsius" | "celsius" => Ok(Self::Celsius),
            "f" | "F" | "°f" | "°F" | "Fahrenheit" | "fahrenheit" => Ok(Self::Fahrenheit),
            _ => anyhow::bail!("Unknown temperature scale {s}"),
        }
    }
}

/// Convert fahrenheit to celsius
pub fn ftoc(f: f64) -> f64 {
    (f - 32.) * 5. / 9.
}

/// Convert celsius to fahrenheit
pub fn ctof(c: f64) -> f64 {
    (c * 9. / 5.) + 32.
}

/// A temperature reading tagged with the scale it was reported in.
/// The platform API reports `sensorTemperature` in fahrenheit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureValue {
    scale: TemperatureScale,
    value: f64,
}

impl std::fmt::Display for TemperatureValue {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{}{}", self.value, self.scale)
    }
}

impl TemperatureValue {
    pub fn new(value: f64, scale: TemperatureScale) -> Self {
        Self { value, scale }
    }

    pub fn with_fahrenheit(value: f64) -> Self {
        Self::new(value, TemperatureScale::Fahrenheit)
    }

    pub fn as_scale(&self, scale: TemperatureScale) -> Self {
        let value = match (self.scale, scale) {
            (TemperatureScale::Celsius, TemperatureScale::Fahrenheit) => ctof(self.value),
            (TemperatureScale::Fahrenheit, TemperatureScale::Celsius) => ftoc(self.value),
            (TemperatureScale::Celsius, TemperatureScale::Celsius)
            | (TemperatureScale::Fahrenheit, TemperatureScale::Fahrenheit) => self.value,
        };
        Self { scale, value }
    }

    pub fn as_fahrenheit(&self) -> f64 {
        self.as_scale(TemperatureScale::Fahrenheit).value
    }

    /// Convert to `scale` and round to a single decimal place,
    /// which is the precision the sensors actually have
    pub fn rounded(&self, scale: TemperatureScale) -> Self {
        let converted = self.as_scale(scale);
        Self {
            scale,
            value: (converted.value * 10.).round() / 10.,
        }
    }
}
