//! Vet command handler

use anyhow::{Context, Result};

use crate::config::Config;
use crate::output::print_vet_result;

/// Check a prompt without submitting anything
pub async fn vet_prompt(config: &Config, prompt: &str) -> Result<()> {
    let client = config.client()?;

    let result = client
        .vet_prompt(prompt)
        .await
        .context("Failed to vet prompt")?;

    print_vet_result(&result);
    Ok(())
}
