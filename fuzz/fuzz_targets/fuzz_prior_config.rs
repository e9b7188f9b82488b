//! Fuzz target for prior file parsing.
//!
//! Parsing and validation of JSON and TOML priors must return errors on bad
//! input, never panic.

#![no_main]

use dcat_config::{validate_prior, PriorConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(prior) = PriorConfig::from_json_str(text) {
        let _ = validate_prior(&prior);
    }
    if let Ok(prior) = PriorConfig::from_toml_str(text) {
        let _ = validate_prior(&prior);
    }
});
