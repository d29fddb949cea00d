//! Full configuration validation.
//!
//! Validates the speech settings and collects every problem into a single
//! `ConfigError`. Message templates are free text; an empty one is silent.

mod speech;


use std::fmt::Display;
use std::ops::RangeInclusive;

use crate::schema::HeraldConfig;
use herald_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &HeraldConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    speech::validate_speech(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

/// Record `name = value` as an error unless it lies in `range`. NaN never
/// does.
pub(crate) fn check_range<T>(errors: &mut Vec<String>, name: &str, value: T, range: RangeInclusive<T>)
where
    T: PartialOrd + Display,
{
    if !range.contains(&value) {
        errors.push(format!(
            "{name} = {value} is out of range [{}, {}]",
            range.start(),
            range.end()
        ));
    }
}
