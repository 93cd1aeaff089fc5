//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the detector against
//! mock hardware.  All tests run on the host (x86_64) with no real
//! hardware required.

mod detector_tests;
