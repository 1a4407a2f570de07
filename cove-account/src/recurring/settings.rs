//! Recurring-swap configuration and namespaced state.

use cove_core::serialization::{deserialize, serialize};
use cove_core::U256;
use serde::{Deserialize, Serialize};

use crate::error::ModuleError;

/// Seconds in one schedule day.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Install-time configuration, decoded from the init payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringConfig {
    /// The exchange venue to swap through.
    pub venue: [u8; 20],
    /// Asset sold each period.
    pub input_asset: [u8; 20],
    /// Asset bought each period.
    pub output_asset: [u8; 20],
    /// Period length in days.
    pub period_length_days: u64,
    /// Input amount sold per period.
    pub amount_per_period: U256,
    /// First instant of the schedule window, unix seconds.
    pub window_start: u64,
    /// Last instant of the schedule window, unix seconds.
    pub window_end: u64,
}

impl RecurringConfig {
    /// Validate the configuration at install time.
    pub fn validate(&self, now: u64) -> Result<(), ModuleError> {
        if self.venue == [0u8; 20] {
            return Err(ModuleError::InvalidVenue);
        }
        if self.input_asset == [0u8; 20]
            || self.output_asset == [0u8; 20]
            || self.input_asset == self.output_asset
        {
            return Err(ModuleError::InvalidAsset);
        }
        if self.period_length_days == 0 {
            return Err(ModuleError::InvalidPeriodLength);
        }
        if self.amount_per_period.is_zero() {
            return Err(ModuleError::InvalidAmount);
        }
        if self.window_start < now || self.window_end <= self.window_start {
            return Err(ModuleError::InvalidWindow);
        }
        Ok(())
    }
}

/// The module's namespaced state: the configuration plus the progress
/// marker. Created on install, mutated only by the trigger, dropped with
/// the namespace on uninstall.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurringSettings {
    /// The exchange venue to swap through.
    pub venue: [u8; 20],
    /// Asset sold each period.
    pub input_asset: [u8; 20],
    /// Asset bought each period.
    pub output_asset: [u8; 20],
    /// Period length in days.
    pub period_length_days: u64,
    /// Input amount sold per period.
    pub amount_per_period: U256,
    /// First instant of the schedule window, unix seconds.
    pub window_start: u64,
    /// Last instant of the schedule window, unix seconds.
    pub window_end: u64,
    /// Highest period number that has executed; zero before the first
    /// trigger. Jumps to the current period, skipping missed ones.
    pub last_period_executed: u64,
}

impl RecurringSettings {
    /// Initial settings for a validated configuration.
    pub fn from_config(config: &RecurringConfig) -> Self {
        RecurringSettings {
            venue: config.venue,
            input_asset: config.input_asset,
            output_asset: config.output_asset,
            period_length_days: config.period_length_days,
            amount_per_period: config.amount_per_period,
            window_start: config.window_start,
            window_end: config.window_end,
            last_period_executed: 0,
        }
    }

    /// The period number `now` falls in, counting from 1 at the window
    /// start. Callers must ensure `now >= window_start`.
    pub fn current_period(&self, now: u64) -> u64 {
        (now - self.window_start) / (self.period_length_days * SECONDS_PER_DAY) + 1
    }

    /// Encode for the module namespace.
    pub fn encode(&self) -> Vec<u8> {
        serialize(self).expect("settings serialization should not fail")
    }

    /// Decode from the module namespace.
    pub fn decode(bytes: &[u8]) -> Result<Self, ModuleError> {
        deserialize(bytes).map_err(|e| ModuleError::MalformedPayload(e.to_string()))
    }
}
