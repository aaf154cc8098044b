//! Parse command

use anyhow::{Context, Result};
use slidecraft_gen::ResponseParser;

pub fn run(path: &str) -> Result<()> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
    let slides = ResponseParser::parse(&text);
    if slides.is_empty() {
        eprintln!("Warning: no slides found in {}", path);
    }
    println!("{}", serde_json::to_string_pretty(&slides)?);
    Ok(())
}
