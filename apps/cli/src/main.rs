use std::{
    io::IsTerminal,
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Result;
use clap::Parser;
use console::{Term, style};
use indicatif::{ProgressBar, ProgressStyle};
use jiff::Timestamp;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use ytharvest_core::{
    ApiConfig, HarvestEvent, HarvestOptions, HarvestOutcome, YouTubeClient, YtTranscriptSource,
    default_export_dir, export_path, harvest, save_rows,
};

use crate::format::{format_duration, format_row_details, render_table};

mod format;

const MAX_CELL_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "ytharvest")]
#[command(
    about = "Search YouTube, then tabulate recent comments and transcripts of the matching videos"
)]
struct Cli {
    /// Search term. Asked for interactively when omitted.
    query: Option<String>,

    /// Number of videos to retrieve
    #[arg(short = 'n', long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    videos: u32,

    /// Number of comments to retrieve for each video
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    comments: u32,

    /// How many years back to search for videos
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    years: u32,

    /// YouTube Data API key. Defaults to the YOUTUBE_API_KEY environment variable.
    #[arg(long)]
    api_key: Option<String>,

    /// Print the full comments and transcript of every video after the table
    #[arg(short, long)]
    details: bool,

    /// Save the rows as JSON, optionally into DIR
    #[arg(short, long, value_name = "DIR", num_args = 0..=1)]
    save: Option<Option<PathBuf>>,

    /// More log output (-v, -vv, -vvv). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn prompt_query() -> Result<String> {
    let term = Term::stderr();
    term.write_str(&format!(
        "{} ",
        style("Enter a search term for YouTube:").cyan().bold()
    ))?;
    Ok(term.read_line()?)
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Validate API key early
    let config = ApiConfig::resolve(cli.api_key).unwrap_or_else(|e| fail(e));

    let query = match cli.query {
        Some(query) => query,
        None => prompt_query()?,
    };
    let query = query.trim().to_string();
    if query.is_empty() {
        fail("the search term must not be empty");
    }

    let options = HarvestOptions {
        query,
        max_videos: cli.videos,
        max_comments: cli.comments,
        years_back: cli.years,
    };

    println!(
        "\n{}  {}\n",
        style("ytharvest").cyan().bold(),
        style("YouTube Data Fetcher").dim()
    );

    let youtube = YouTubeClient::new(config);
    let transcripts = YtTranscriptSource::new()?;

    let total_start = Instant::now();
    let spinner = create_spinner("Searching YouTube...");
    let mut step_start = Instant::now();

    let outcome = harvest(&youtube, &transcripts, &options, Timestamp::now(), |event| {
        match event {
            HarvestEvent::Searching {
                query,
                published_after,
            } => {
                spinner.set_message(format!(
                    "Searching YouTube for {} (published after {})...",
                    style(query).yellow(),
                    published_after
                ));
            }
            HarvestEvent::SearchCompleted { count } => {
                spinner.println(format!(
                    "{} Found {} videos {}",
                    style("✓").green().bold(),
                    count,
                    style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
                ));
            }
            HarvestEvent::FetchingComments {
                serial,
                total,
                video,
            } => {
                step_start = Instant::now();
                spinner.set_message(format!(
                    "[{serial}/{total}] {}: fetching comments...",
                    video.title
                ));
            }
            HarvestEvent::FetchingTranscript {
                serial,
                total,
                video,
            } => {
                spinner.set_message(format!(
                    "[{serial}/{total}] {}: fetching transcript...",
                    video.title
                ));
            }
            HarvestEvent::VideoFinished {
                serial,
                total,
                comment_count,
                row,
            } => {
                spinner.println(format!(
                    "{} [{serial}/{total}] {} {} {}",
                    style("✓").green().bold(),
                    row.video_name,
                    style(format!("({comment_count} comments)")).dim(),
                    style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
                ));
            }
        }
    })
    .await;
    spinner.finish_and_clear();

    let rows = match outcome {
        Ok(HarvestOutcome::Rows(rows)) => rows,
        Ok(HarvestOutcome::NoVideos) => {
            println!("{} No videos found.", style("⚠").yellow().bold());
            return Ok(());
        }
        Err(e) => fail(e),
    };

    println!("{}", style("─".repeat(60)).dim());
    print!("{}", render_table(&rows, MAX_CELL_WIDTH));

    if cli.details {
        println!("{}", style("─".repeat(60)).dim());
        for row in &rows {
            println!("{}", format_row_details(row));
        }
    }

    if let Some(dir) = cli.save {
        let dir = dir.unwrap_or_else(default_export_dir);
        let path = export_path(&dir, &options.query);
        save_rows(&rows, &path).await?;
        println!(
            "\n{} {}",
            style("Saved:").dim(),
            style(path.display()).cyan()
        );
    }

    println!(
        "\n{} {}\n",
        style("Total time:").dim(),
        style(format_duration(total_start.elapsed())).cyan().bold()
    );

    Ok(())
}
