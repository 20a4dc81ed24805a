//! Classify command - print the severity label of each score.

use colored::Colorize;
use sevcount::{classify, OUT_OF_RANGE};

use super::load_spec;

pub fn run(spec: &str, scores: &[i64]) -> Result<(), Box<dyn std::error::Error>> {
    let spec = load_spec(spec)?;

    for &score in scores {
        let label = classify(score, &spec);
        let label = if label == OUT_OF_RANGE {
            label.yellow()
        } else {
            label.green().bold()
        };
        println!("{:>8}  {}", score, label);
    }

    Ok(())
}
