//! Fuzz target: `DetectorConfig::from_bytes`
//!
//! Stored keymaps come from flash and may be corrupted.  Decoding must
//! return a typed error or a config that validates and re-encodes.
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use keydetector::DetectorConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(config) = DetectorConfig::from_bytes(data) {
        assert!(config.validate().is_ok());
        let mut buf = [0u8; 1024];
        let bytes = config.to_bytes(&mut buf).expect("decoded config must re-encode");
        assert_eq!(DetectorConfig::from_bytes(bytes), Ok(config));
    }
});
