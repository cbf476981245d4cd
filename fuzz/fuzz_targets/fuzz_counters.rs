#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sacount::index::{DatasetBuilder, StoreOptions};
use sacount::search::{CounterKind, LcpMaintenance, SearchOptions};

#[derive(Debug, Arbitrary)]
struct Input {
    text: Vec<u8>,
    patterns: Vec<Vec<u8>>,
    incremental: bool,
}

/// Map arbitrary bytes onto a small alphabet so matches are frequent
fn to_symbols(bytes: &[u8]) -> String {
    bytes.iter().map(|b| ['a', 'b', 'c'][(b % 3) as usize]).collect()
}

fuzz_target!(|input: Input| {
    let text = to_symbols(&input.text[..input.text.len().min(512)]);
    let patterns: Vec<String> = input.patterns.iter().take(16).map(|p| to_symbols(p)).collect();

    let workload = DatasetBuilder::new(text)
        .patterns(patterns)
        .build()
        .into_workload(&StoreOptions::default())
        .unwrap();

    let options = SearchOptions {
        lcp_maintenance: if input.incremental {
            LcpMaintenance::Incremental
        } else {
            LcpMaintenance::Recompute
        },
        ..Default::default()
    };

    for pattern in &workload.patterns {
        let counts: Vec<usize> = CounterKind::ALL
            .iter()
            .map(|kind| kind.counter(&workload.store, &options).count(pattern).unwrap())
            .collect();
        assert!(counts.windows(2).all(|w| w[0] == w[1]), "{:?}", counts);
    }
});
