//! Providers command

use anyhow::Result;
use slidecraft_gen::{Backend, SlideCraftConfig};

pub fn run() -> Result<()> {
    let config = SlideCraftConfig::load()?;

    println!("{} provider(s):\n", Backend::ALL.len());
    for backend in Backend::ALL {
        let name = backend.name();
        let settings = config.provider_settings(backend);
        let status = if !config.is_enabled(name) {
            "disabled"
        } else if config.api_key(name).is_some() {
            "ready"
        } else {
            "no API key"
        };
        let marker = if name == config.default_provider() { "*" } else { " " };
        println!(
            "{} {:<8} {:<12} {}",
            marker, name, status, settings.model
        );
    }
    println!("\n* default provider");
    Ok(())
}
