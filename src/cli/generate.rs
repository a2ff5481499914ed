//! `fission generate` and `fission deeper` commands.

use anyhow::{Context, Result};

use fission::config::Config;
use fission::types::{DeeperRequest, DeeperResponse, GenerateRequest, GenerateResponse};

use super::build_generator;

/// Generate names for a prompt and print the response as JSON.
pub(crate) async fn cmd_generate(
    config: Config,
    prompt: String,
    num_results: u32,
    style: String,
    categories: Vec<String>,
) -> Result<()> {
    let generator = build_generator(&config)?;

    let mut request = GenerateRequest::new(prompt)
        .with_num_results(num_results)
        .with_style(style);
    if !categories.is_empty() {
        request = request.with_categories(categories);
    }

    let generation = generator.generate(&request).await?;
    let response = GenerateResponse::new(request.prompt, generation.payload, generation.source);
    print_json(&response)
}

/// Explore a name and print the response as JSON.
pub(crate) async fn cmd_deeper(
    config: Config,
    name: String,
    context: String,
    dimensions: Vec<String>,
) -> Result<()> {
    let generator = build_generator(&config)?;

    let mut request = DeeperRequest::new(name).with_context(context);
    if !dimensions.is_empty() {
        request = request.with_dimensions(dimensions);
    }

    let generation = generator.go_deeper(&request).await?;
    print_json(&DeeperResponse::new(generation.payload, generation.source))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render response")?;
    println!("{}", rendered);
    Ok(())
}
