#![no_main]

use libfuzzer_sys::fuzz_target;
use sacount::index::StoreOptions;
use sacount::index::dataset::parse_lines;

fuzz_target!(|data: &[u8]| {
    // Parsing and validation must reject bad input with an error, never panic
    if let Ok(dataset) = parse_lines(data) {
        let _ = dataset.into_workload(&StoreOptions::default());
    }
});
