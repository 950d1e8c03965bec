// =============================================================================
// Signals Module
// =============================================================================
//
// Interpretation layer on top of the indicator engine:
// - Threshold rules mapping latest indicator values to a categorical Signal
// - Diagnostic summary combining the per-indicator readings for the dashboard

pub mod diagnostic;
pub mod interpret;

pub use diagnostic::{Diagnostic, IndicatorReading};
pub use interpret::{interpret_bollinger, interpret_rsi, interpret_rsi_with};
