//! Utility module.
//!
//! - Timing: throttle and debounce wrappers for high-frequency events
//! - Validation: contact form field rules

pub mod timing;
pub mod validation;
