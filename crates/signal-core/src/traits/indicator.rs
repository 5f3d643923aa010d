//! Indicator trait definitions.

use crate::error::IndicatorError;

/// Trait for technical indicators.
///
/// Indicators process a series of values and produce derived values
/// useful for signal decisions.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically closes or volumes), oldest first
    ///
    /// # Returns
    /// A vector of indicator values
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Validate that there's enough data.
    fn validate_data(&self, data: &[f64]) -> Result<(), IndicatorError> {
        if data.len() < self.period() {
            return Err(IndicatorError::InsufficientData {
                required: self.period(),
                available: data.len(),
            });
        }
        Ok(())
    }

    /// Calculate and return only the most recent value.
    fn latest(&self, data: &[f64]) -> Option<Self::Output> {
        self.calculate(data).pop()
    }
}
