#![no_main]
use libfuzzer_sys::fuzz_target;

/// Fuzz the shape validator.
///
/// Any JSON value must either be rejected with a shape error or convert into
/// a collection whose re-serialized form validates again.
fuzz_target!(|data: &[u8]| {
    if let Ok(document) = serde_json::from_slice::<serde_json::Value>(data) {
        let verdict = ztp_tools::validate(&document);
        let converted = ztp_tools::Collection::from_json(&document);
        assert_eq!(verdict.is_ok(), converted.is_ok());
        if let Ok(collection) = converted {
            assert!(ztp_tools::validate(&collection.to_json()).is_ok());
        }
    }
});
