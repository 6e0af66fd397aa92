//! Human-readable error descriptions and structured JSON error formatting.

/// Map an eyre::Report to a human-readable explanation with likely causes
/// and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    use ozone_core::BuildError;

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingSetpoints => {
                "What happened: No initial setpoints were provided to the simulation builder.\nLikely causes: The scenario lookup failed or the builder was not configured.\nHow to fix: Pass a known scenario via --scenario or rely on the nominal defaults.".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Out-of-range values in the TOML or CLI overrides.\nHow to fix: Edit the config file or overrides, then rerun. See README for a sample."
            ),
        };
    }

    // Alternate formatting includes the cause chain, not just the outermost
    // context line.
    let msg = format!("{err:#}");
    let lower = msg.to_ascii_lowercase();
    if lower.contains("toml") || lower.contains("parse") {
        return format!(
            "What happened: The config file could not be parsed ({msg}).\nLikely causes: A typo or a wrong value type in the TOML.\nHow to fix: Fix the reported line, or delete the file to run with defaults."
        );
    }

    format!(
        "What happened: {msg}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
    )
}

/// Structured error line for `--json` consumers.
pub fn json_error(err: &eyre::Report) -> String {
    serde_json::json!({
        "error": format!("{err:#}"),
    })
    .to_string()
}
