//! CLI command implementations.

pub mod annotate;
pub mod classify;
pub mod count;

use std::path::Path;

use sevcount::SeveritySpec;

/// Load a severity spec from a JSON file, or parse it inline if no such file exists.
pub fn load_spec(spec: &str) -> Result<SeveritySpec, Box<dyn std::error::Error>> {
    let path = Path::new(spec);
    let parsed = if path.is_file() {
        tracing::debug!(path = %path.display(), "loading severity spec file");
        SeveritySpec::load(path)?
    } else {
        spec.parse::<SeveritySpec>()?
    };
    Ok(parsed)
}
