//! Fuzz target for inline severity spec parsing and classification.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sevcount::SeveritySpec;

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    spec: &'a str,
    scores: Vec<i64>,
}

fuzz_target!(|input: Input<'_>| {
    if let Ok(spec) = input.spec.parse::<SeveritySpec>() {
        for score in input.scores {
            let label = spec.classify(score);
            assert!(label == sevcount::OUT_OF_RANGE || spec.labels().any(|l| l == label));
        }
    }
});
