#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz CSV import.
///
/// Feeds arbitrary bytes through decoding, parsing, unflattening and
/// validation. An accepted upload must export again without panicking.
fuzz_target!(|data: &[u8]| {
    if let Ok(collection) = ztp_tools::import_csv(data) {
        let _ = ztp_tools::export_csv(&collection);
    }
});
