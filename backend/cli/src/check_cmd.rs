//! `ppeguard check` — config doctor.
//!
//! Prints the effective configuration with the API key masked, then the
//! validation report. Returns false when the config would prevent startup.

use ppeguard_config::GatewayConfig;

pub fn run(config: &GatewayConfig) -> bool {
    println!("ppeguard configuration");
    println!("  bind address     : {}:{}", config.bind_address, config.port);
    println!("  provider         : {}", config.provider);
    println!("  model            : {}", config.model);
    println!("  api key ({})     : {}", config.provider.api_key_var(), config.redacted_key());
    println!("  max upload bytes : {}", config.max_upload_bytes);
    println!();

    let report = ppeguard_config::validate(config);

    for warning in &report.warnings {
        println!("warning: {} — {}", warning.path, warning.message);
    }
    for error in &report.errors {
        println!("error: {} — {}", error.path, error.message);
    }

    if report.is_valid() {
        println!("configuration OK");
        true
    } else {
        println!("configuration has {} error(s)", report.errors.len());
        false
    }
}
