//! Terminal rendering for jobs and policy verdicts

use colored::*;
use kino_core::domain::job::{Job, JobStatus};
use kino_core::dto::vet::VetResult;

/// Print a one-job summary block
pub fn print_job_summary(job: &Job) {
    println!("  {} Job {}", "▸".cyan(), job.id.dimmed());
    println!("    Kind:     {}", job.kind);
    println!("    Status:   {}", colorize_status(&job.status));
    if let Some(prompt) = job.prompt() {
        println!("    Prompt:   {}", truncate(prompt, 60));
    }
    println!(
        "    Created:  {}",
        job.created_at
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
            .dimmed()
    );
    println!();
}

/// Print detailed job information
pub fn print_job_details(job: &Job) {
    println!("{}", "Job Details:".bold());
    println!("  ID:          {}", job.id.cyan());
    println!("  Kind:        {}", job.kind);
    if let Some(service_id) = job.service_id {
        println!("  Service:     {}", service_id);
    }
    println!("  Status:      {}", colorize_status(&job.status));
    println!("  Created:     {}", job.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("  Updated:     {}", job.updated_at.format("%Y-%m-%d %H:%M:%S"));

    if job.status.is_terminal() {
        let seconds = job
            .updated_at
            .signed_duration_since(job.created_at)
            .num_seconds();
        println!("  Duration:    {}s", seconds);
    }

    if !job.input_data.is_empty() {
        println!("\n{}", "Input:".bold());
        let mut keys: Vec<_> = job.input_data.keys().collect();
        keys.sort();
        for key in keys {
            println!("  {} = {}", key.cyan(), job.input_data[key]);
        }
    }

    if let Some(output) = &job.output {
        println!("\n{}", "Output:".bold());
        match serde_json::to_string_pretty(output) {
            Ok(pretty) => println!("{}", pretty),
            Err(_) => println!("{:?}", output),
        }
    }

    if let Some(error) = &job.error_message {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }

    if job.status == JobStatus::Stalled {
        println!(
            "\n{}",
            "Gave up waiting for this job; run `kino get` later to check again.".yellow()
        );
    }
}

/// Print a content policy verdict
pub fn print_vet_result(result: &VetResult) {
    if result.allowed {
        println!("{} Prompt allowed", "✓".green());
        return;
    }

    println!("{} Prompt rejected by content policy", "✗".red());
    if !result.violations.is_empty() {
        println!("  Violations: {}", result.violations.join(", ").red());
    }
    if !result.safe_alternatives.is_empty() {
        println!("\n{}", "Suggested alternatives:".bold());
        for alternative in &result.safe_alternatives {
            println!("  {} {}", "▸".cyan(), alternative.prompt);
            if !alternative.notes.is_empty() {
                println!("    {}", alternative.notes.dimmed());
            }
        }
    }
}

/// Colorize job status for display
pub fn colorize_status(status: &JobStatus) -> ColoredString {
    let label = status.as_str();
    match status {
        JobStatus::Pending => label.yellow(),
        JobStatus::Processing => label.cyan(),
        JobStatus::Completed => label.green(),
        JobStatus::Failed => label.red(),
        JobStatus::Stalled => label.magenta(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
