//! Score command

use anyhow::{Context, Result};
use slidecraft_gen::{load_slides_json, QualityScorer};
use std::path::Path;

pub fn run(path: &str, detail: bool) -> Result<()> {
    let slides =
        load_slides_json(Path::new(path)).with_context(|| format!("Failed to load {}", path))?;
    let scorer = QualityScorer::new();

    if detail {
        for (i, slide) in slides.iter().enumerate() {
            println!("{:>3}. {:.3}  {}", i + 1, scorer.score_slide(slide), slide.title);
        }
        println!();
    }

    println!(
        "{} slide(s), quality score {:.3}",
        slides.len(),
        scorer.score(&slides)
    );
    Ok(())
}
