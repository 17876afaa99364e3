//! Submit command handlers
//!
//! Builds typed job input from flags, submits it through the tracker and
//! optionally follows the job until it finishes.

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use colored::*;
use kino_core::domain::input::{ImageInput, VideoInput};
use kino_core::domain::job::Job;
use kino_tracker::{PollScheduler, SubmitError, Tracker};
use std::sync::Arc;

use crate::config::Config;
use crate::output::{print_job_details, print_vet_result};

/// Submit subcommands
#[derive(Subcommand)]
pub enum SubmitCommands {
    /// Submit a video generation job
    Video {
        /// Prompt describing the video
        #[arg(short, long)]
        prompt: String,

        /// Resolution (e.g., 720p, 1080p)
        #[arg(short, long)]
        resolution: Option<String>,

        /// Things the video should avoid
        #[arg(long)]
        negative_prompt: Option<String>,

        /// Reference image to animate
        #[arg(long)]
        image_url: Option<String>,

        /// Clip length in seconds
        #[arg(short, long)]
        duration: Option<u32>,

        /// Aspect ratio (e.g., 16:9)
        #[arg(long)]
        aspect_ratio: Option<String>,

        #[arg(long)]
        seed: Option<u64>,

        /// Skip the content policy pre-check (also off when KINO_VET_VIDEO=false)
        #[arg(long)]
        no_vet: bool,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Submit an image generation job
    Image {
        /// Prompt describing the image
        #[arg(short, long)]
        prompt: String,

        /// Aspect ratio (e.g., 1:1, 16:9)
        #[arg(long)]
        aspect_ratio: Option<String>,

        /// Output format (e.g., png, jpeg)
        #[arg(short, long)]
        output_format: Option<String>,

        /// Moderation strictness, lower is stricter
        #[arg(long)]
        safety_tolerance: Option<u8>,

        #[command(flatten)]
        common: CommonArgs,
    },
}

/// Flags shared by every submit subcommand
#[derive(Args)]
pub struct CommonArgs {
    /// Generation service to run the job on
    #[arg(short, long)]
    service_id: i64,

    /// Keep polling until the job finishes
    #[arg(short, long)]
    watch: bool,
}

/// Handle submit commands
pub async fn handle_submit_command(command: SubmitCommands, config: &Config) -> Result<()> {
    let mut tracker_config = config.tracker_config()?;

    let (tracker, result, common) = match command {
        SubmitCommands::Video {
            prompt,
            resolution,
            negative_prompt,
            image_url,
            duration,
            aspect_ratio,
            seed,
            no_vet,
            common,
        } => {
            tracker_config.vet_video_prompts &= !no_vet;
            let tracker = Tracker::new(tracker_config, Arc::new(config.client()?));

            let mut input = VideoInput::new(prompt);
            input.resolution = resolution;
            input.negative_prompt = negative_prompt;
            input.image_url = image_url;
            input.duration = duration;
            input.aspect_ratio = aspect_ratio;
            input.seed = seed;

            let result = tracker.submit_video(common.service_id, input).await;
            (tracker, result, common)
        }
        SubmitCommands::Image {
            prompt,
            aspect_ratio,
            output_format,
            safety_tolerance,
            common,
        } => {
            let tracker = Tracker::new(tracker_config, Arc::new(config.client()?));

            let mut input = ImageInput::new(prompt);
            input.aspect_ratio = aspect_ratio;
            input.output_format = output_format;
            input.safety_tolerance = safety_tolerance;

            let result = tracker.submit_image(common.service_id, input).await;
            (tracker, result, common)
        }
    };

    let job = match result {
        Ok(job) => job,
        Err(SubmitError::PolicyViolation(verdict)) => {
            print_vet_result(&verdict);
            return Err(anyhow!("Submission blocked by content policy"));
        }
        Err(e) => return Err(e.into()),
    };

    println!("{} Submitted {} job {}", "✓".green(), job.kind, job.id.cyan());

    if common.watch {
        follow(&tracker, &job).await;
    }

    Ok(())
}

/// Poll the submitted job until it leaves the tracked set, then show it
async fn follow(tracker: &Tracker, job: &Job) {
    println!("{}", "Waiting for the job to finish...".dimmed());
    PollScheduler::new(tracker.clone()).run_until_idle().await;

    println!();
    if let Some(latest) = tracker.get(&job.id) {
        print_job_details(&latest);
    }
}
