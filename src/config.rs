/// One of the two A/D inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// VAD input, reported in volts
    A,
    /// Second input, reported in raw ADC counts
    B,
}

/// Upper bound of a calibrated current, in amperes
pub const CURRENT_LIMIT: f32 = 30.0;

/// Linear transform from a raw channel value to a current
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub coefficient: f32,
    pub offset: f32,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration {
            coefficient: 1.0,
            offset: 0.0,
        }
    }
}

impl Calibration {
    pub const fn new(coefficient: f32, offset: f32) -> Self {
        Calibration {
            coefficient,
            offset,
        }
    }

    /// `raw * coefficient + offset`, or 0 outside of `0..=CURRENT_LIMIT`
    pub fn apply(&self, raw: f32) -> f32 {
        let current = raw * self.coefficient + self.offset;
        if current < 0.0 || current > CURRENT_LIMIT {
            0.0
        } else {
            current
        }
    }
}

/// Per channel calibration, set once by `Ds2438::begin`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub channel_a: Calibration,
    pub channel_b: Calibration,
}

impl Config {
    pub const fn new(coefficient_a: f32, offset_a: f32, coefficient_b: f32, offset_b: f32) -> Self {
        Config {
            channel_a: Calibration::new(coefficient_a, offset_a),
            channel_b: Calibration::new(coefficient_b, offset_b),
        }
    }

    pub fn calibration(&self, channel: Channel) -> &Calibration {
        match channel {
            Channel::A => &self.channel_a,
            Channel::B => &self.channel_b,
        }
    }
}
