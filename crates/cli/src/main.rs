use anyhow::Context;
use clap::Parser;
use ordsky_core::{
    Credentials, FetchConfig, Pipeline, PipelineConfig, StopwordFilter, TwitterClient, WcloudRenderer,
};
use owo_colors::OwoColorize;

mod echo;

use echo::{print_banner, print_error, print_info, print_step, print_success, print_warning};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fixed-path credentials file, read only when posting is requested.
const SECRETS_PATH: &str = "SECRETS.json";

/// Fixed-path stopword list, read once at startup.
const STOPWORDS_PATH: &str = "boring_words.txt";

/// Render word-cloud images from the article text of news pages
#[derive(Parser, Debug)]
#[command(name = "ordsky")]
#[command(author = "Ordsky Contributors")]
#[command(version = VERSION)]
#[command(about = "Render word-cloud images from news articles", long_about = None)]
struct Args {
    /// URL, bare hostname, or local HTML file to render; example: vg.no
    #[arg(value_name = "URL", required = true, num_args = 1..)]
    urls: Vec<String>,

    /// Post each rendered cloud to the configured Twitter account
    #[arg(long)]
    post: bool,

    /// Render one combined cloud from all inputs instead of one per input
    #[arg(long)]
    combine: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    if args.verbose {
        print_step(1, 3, &format!("Loading stopword list from {}", STOPWORDS_PATH.bright_white()));
    }

    let stopwords = StopwordFilter::from_file(STOPWORDS_PATH).context("Failed to load stopword list")?;

    let publisher = if args.post {
        if args.verbose {
            print_step(2, 3, &format!("Loading credentials from {}", SECRETS_PATH.bright_white()));
        }
        let credentials = Credentials::from_file(SECRETS_PATH).context("Failed to load Twitter credentials")?;
        Some(TwitterClient::new(credentials))
    } else {
        if args.verbose {
            print_step(2, 3, "Posting disabled, skipping credentials");
        }
        None
    };

    let config = PipelineConfig {
        fetch: FetchConfig { timeout: args.timeout, ..Default::default() },
        ..Default::default()
    };
    let pipeline = Pipeline::new(config, stopwords, Box::new(WcloudRenderer::default()), publisher);

    if args.verbose {
        let mode = if args.combine { "combined" } else { "per input" };
        print_step(
            3,
            3,
            &format!("Rendering {} ({})", pluralize(args.urls.len(), "input"), mode),
        );
        eprintln!();
    }

    let summary = pipeline.run(&args.urls, args.combine).await.context("Run failed")?;

    for artifact in &summary.artifacts {
        print_success(&format!("Wrote {}", artifact.display().bright_white()));
    }

    if args.post && summary.failures.is_empty() {
        print_info(&format!("Posted {}", pluralize(summary.artifacts.len(), "cloud")));
    }

    if !summary.failures.is_empty() {
        for (input, err) in &summary.failures {
            print_warning(&format!("Skipped {}: {}", input.bright_white(), err));
        }
        let message = format!(
            "{} of {} failed",
            pluralize(summary.failures.len(), "input"),
            args.urls.len()
        );
        print_error(&message);
        anyhow::bail!(message);
    }

    Ok(())
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
