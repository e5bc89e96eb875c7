use serde::{Deserialize, Serialize};

/// Number of features the classifier is trained on.
pub const FEATURE_COUNT: usize = 4;

/// Field state entered on the advisor form.
///
/// Feature order is fixed: temperature, humidity, ph, rainfall.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

impl Conditions {
    pub fn new(temperature: f64, humidity: f64, ph: f64, rainfall: f64) -> Self {
        Self {
            temperature,
            humidity,
            ph,
            rainfall,
        }
    }

    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.temperature, self.humidity, self.ph, self.rainfall]
    }

    pub fn get(&self, field: ConditionField) -> f64 {
        match field {
            ConditionField::Temperature => self.temperature,
            ConditionField::Humidity => self.humidity,
            ConditionField::Ph => self.ph,
            ConditionField::Rainfall => self.rainfall,
        }
    }

    /// Set a field, clamped to the form range.
    pub fn set(&mut self, field: ConditionField, value: f64) {
        let (min, max) = field.range();
        let value = field.round_to_step(value.clamp(min, max));
        match field {
            ConditionField::Temperature => self.temperature = value,
            ConditionField::Humidity => self.humidity = value,
            ConditionField::Ph => self.ph = value,
            ConditionField::Rainfall => self.rainfall = value,
        }
    }

    /// Move a field by a number of steps (negative steps decrease).
    pub fn nudge(&mut self, field: ConditionField, steps: i32) {
        let current = self.get(field);
        self.set(field, current + field.step() * steps as f64);
    }
}

impl Default for Conditions {
    fn default() -> Self {
        Self {
            temperature: ConditionField::Temperature.default_value(),
            humidity: ConditionField::Humidity.default_value(),
            ph: ConditionField::Ph.default_value(),
            rainfall: ConditionField::Rainfall.default_value(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionField {
    Temperature,
    Humidity,
    Ph,
    Rainfall,
}

impl ConditionField {
    pub fn all() -> &'static [ConditionField] {
        &[
            ConditionField::Temperature,
            ConditionField::Humidity,
            ConditionField::Ph,
            ConditionField::Rainfall,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConditionField::Temperature => "Temperature (°C)",
            ConditionField::Humidity => "Humidity (%)",
            ConditionField::Ph => "Soil pH",
            ConditionField::Rainfall => "Rainfall (mm)",
        }
    }

    /// Column name in the training CSV.
    pub fn column(&self) -> &'static str {
        match self {
            ConditionField::Temperature => "temperature",
            ConditionField::Humidity => "humidity",
            ConditionField::Ph => "ph",
            ConditionField::Rainfall => "rainfall",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            ConditionField::Temperature => "°C",
            ConditionField::Humidity => "%",
            ConditionField::Ph => "",
            ConditionField::Rainfall => " mm",
        }
    }

    /// Inclusive range accepted by the form.
    pub fn range(&self) -> (f64, f64) {
        match self {
            ConditionField::Temperature => (10.0, 45.0),
            ConditionField::Humidity => (30.0, 100.0),
            ConditionField::Ph => (4.0, 8.5),
            ConditionField::Rainfall => (50.0, 300.0),
        }
    }

    pub fn step(&self) -> f64 {
        match self {
            ConditionField::Ph => 0.1,
            _ => 1.0,
        }
    }

    pub fn precision(&self) -> usize {
        match self {
            ConditionField::Ph => 1,
            _ => 0,
        }
    }

    pub fn default_value(&self) -> f64 {
        match self {
            ConditionField::Temperature => 25.0,
            ConditionField::Humidity => 70.0,
            ConditionField::Ph => 6.5,
            ConditionField::Rainfall => 150.0,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ConditionField::Temperature => ConditionField::Humidity,
            ConditionField::Humidity => ConditionField::Ph,
            ConditionField::Ph => ConditionField::Rainfall,
            ConditionField::Rainfall => ConditionField::Temperature,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ConditionField::Temperature => ConditionField::Rainfall,
            ConditionField::Humidity => ConditionField::Temperature,
            ConditionField::Ph => ConditionField::Humidity,
            ConditionField::Rainfall => ConditionField::Ph,
        }
    }

    // Avoids drift like 6.6000000001 after repeated 0.1 steps
    fn round_to_step(&self, value: f64) -> f64 {
        let scale = 10f64.powi(self.precision() as i32);
        (value * scale).round() / scale
    }
}

impl std::fmt::Display for ConditionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
