//! Fuzz target for the query-text configuration parser.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use qof::SqlConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing only ever returns errors; a parsed config always validates
        if let Ok(config) = SqlConfig::from_toml_str(input) {
            assert!(config.validate().is_ok());
        }
    }
});
