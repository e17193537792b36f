mod api;
mod server;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use engagement_insights::best_time::PlatformBestTime;
use engagement_insights::config::EngineConfig;
use engagement_insights::replies::{suggest_reply, ReplyTone};
use engagement_insights::sample::{generate_sample_events, generate_sample_posts, MAX_SAMPLE_DAYS};
use engagement_insights::store::{save_summary, StoredSummary, SummaryStore};
use engagement_insights::{
    analyze_engagement, best_posting_times, decode_records, format_float, format_hour,
    format_number, EngagementEvent, EngagementReport, HistoricalPost,
};

#[derive(Parser)]
#[command(
    name = "engagement-insights",
    about = "Engagement analytics and posting-time recommendations"
)]
struct Cli {
    /// Path to an engine config TOML file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    BestTimes(BestTimesArgs),
    Reply(ReplyArgs),
    Sample(SampleArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// JSON array of engagement events
    #[arg(long)]
    events: PathBuf,
    /// JSON array of historical posts
    #[arg(long)]
    posts: Option<PathBuf>,
    #[arg(long = "platform")]
    platforms: Vec<String>,
    /// Summary store file; overrides the configured path
    #[arg(long)]
    store: Option<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct BestTimesArgs {
    #[arg(long)]
    posts: PathBuf,
    #[arg(long = "platform")]
    platforms: Vec<String>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct ReplyArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long, default_value = "friendly")]
    tone: String,
}

#[derive(Args, Debug, Clone)]
struct SampleArgs {
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(
        long,
        default_value_t = 14,
        value_parser = clap::value_parser!(u32).range(1..=MAX_SAMPLE_DAYS as i64)
    )]
    days: u32,
    /// Reference time (RFC 3339); defaults to now
    #[arg(long)]
    now: Option<String>,
    #[arg(long, default_value = "sample")]
    out: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long)]
    web_root: Option<String>,
    #[arg(long)]
    store: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    summary_id: Option<String>,
    report: &'a EngagementReport,
    best_times: &'a BTreeMap<String, PlatformBestTime>,
    warnings: &'a [String],
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = EngineConfig::load(cli.config)?;
    if let Some(path) = config_path.as_ref().filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded engine config");
    }

    match cli.command {
        Command::Analyze(args) => run_analyze(args, &config).await,
        Command::BestTimes(args) => run_best_times(args, &config),
        Command::Reply(args) => run_reply(args),
        Command::Sample(args) => run_sample(args, &config),
        Command::Serve(args) => server::serve(args, config).await,
    }
}

async fn run_analyze(args: AnalyzeArgs, config: &EngineConfig) -> Result<(), String> {
    let mut warnings = Vec::new();
    let events: Vec<EngagementEvent> = read_records(&args.events, "events", &mut warnings)?;
    let posts: Vec<HistoricalPost> = match args.posts.as_ref() {
        Some(path) => read_records(path, "posts", &mut warnings)?,
        None => Vec::new(),
    };

    let report = analyze_engagement(&events, config);
    let best_times = best_posting_times(&posts, &args.platforms, config);

    let summary_id = match args.store.or_else(|| config.store.path.clone()) {
        Some(path) => match SummaryStore::load(path.into()).await {
            Ok(store) => {
                let summary = StoredSummary::new(Some(&report), best_times.clone(), Utc::now());
                save_summary(&store, summary, &mut warnings).await
            }
            Err(err) => {
                warnings.push(format!("summary store unavailable: {}", err));
                None
            }
        },
        None => None,
    };

    if args.json {
        let output = AnalyzeOutput {
            summary_id,
            report: &report,
            best_times: &best_times,
            warnings: &warnings,
        };
        return print_json(&output);
    }

    print_report(&report);
    if !best_times.is_empty() {
        println!();
        print_best_times(&best_times);
    }
    if let Some(id) = summary_id {
        println!("\nSaved summary {}", id);
    }
    print_warnings(&warnings);
    Ok(())
}

fn run_best_times(args: BestTimesArgs, config: &EngineConfig) -> Result<(), String> {
    let mut warnings = Vec::new();
    let posts: Vec<HistoricalPost> = read_records(&args.posts, "posts", &mut warnings)?;
    let best_times = best_posting_times(&posts, &args.platforms, config);

    if args.json {
        return print_json(&best_times);
    }
    print_best_times(&best_times);
    print_warnings(&warnings);
    Ok(())
}

fn run_reply(args: ReplyArgs) -> Result<(), String> {
    let tone = ReplyTone::from_str(&args.tone)
        .ok_or_else(|| format!("invalid tone: {}", args.tone))?;
    let text = read_text(args.text)?;
    let suggestion = suggest_reply(&text, tone);
    println!("Sentiment: {:?} (score {})", suggestion.bucket, suggestion.score);
    println!("Suggested reply: {}", suggestion.reply);
    Ok(())
}

fn run_sample(args: SampleArgs, config: &EngineConfig) -> Result<(), String> {
    let now = match args.now.as_deref() {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map_err(|err| format!("invalid --now: {}", err))?
            .with_timezone(&Utc),
        None => Utc::now(),
    };
    let events = generate_sample_events(args.seed, args.days, now);
    let posts = generate_sample_posts(args.seed, &config.best_time.default_platforms, now);

    std::fs::create_dir_all(&args.out)
        .map_err(|err| format!("failed to create sample dir: {}", err))?;
    write_json(&args.out.join("events.json"), &events)?;
    write_json(&args.out.join("posts.json"), &posts)?;
    println!(
        "Wrote {} events and {} posts to {}",
        format_number(events.len() as f64),
        format_number(posts.len() as f64),
        args.out.display()
    );
    Ok(())
}

fn print_report(report: &EngagementReport) {
    let totals = &report.totals;
    println!("Composite engagement score: {}/100", report.composite_score);
    println!(
        "Totals: likes {} | comments {} | shares {} across {} days",
        format_number(totals.likes as f64),
        format_number(totals.comments as f64),
        format_number(totals.shares as f64),
        report.series.labels.len()
    );
    println!(
        "Next period: likes {} ({}) | comments {} ({}) | shares {} ({})",
        report.predictions.likes.next_value,
        report.predictions.likes.trend.label(),
        report.predictions.comments.next_value,
        report.predictions.comments.trend.label(),
        report.predictions.shares.next_value,
        report.predictions.shares.trend.label()
    );

    let sentiment = &report.sentiment;
    println!(
        "Sentiment: average {} | positive {} | neutral {} | negative {}",
        format_float(sentiment.average_score, 2),
        sentiment.distribution.positive,
        sentiment.distribution.neutral,
        sentiment.distribution.negative
    );
    if !sentiment.trending.is_empty() {
        let terms: Vec<String> = sentiment
            .trending
            .iter()
            .map(|keyword| format!("{} ({})", keyword.term, keyword.count))
            .collect();
        println!("Trending: {}", terms.join(", "));
    }

    if !report.recommendations.is_empty() {
        println!("\nRecommendations:");
        for recommendation in &report.recommendations {
            println!(
                "- [{}] {}: {}",
                recommendation.priority.label(),
                recommendation.title,
                recommendation.message
            );
        }
    }
}

fn print_best_times(best_times: &BTreeMap<String, PlatformBestTime>) {
    println!("Best posting times:");
    for result in best_times.values() {
        println!(
            "  {}: {} at {} (score {}, {} confidence, {} posts)",
            result.platform,
            result.recommended_day.label(),
            format_hour(result.recommended_hour),
            result.engagement_score,
            result.confidence.label(),
            result.posts_analyzed
        );
    }
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

fn read_records<T: serde::de::DeserializeOwned>(
    path: &Path,
    label: &str,
    warnings: &mut Vec<String>,
) -> Result<Vec<T>, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| format!("failed to read {}: {}", label, err))?;
    let values: Vec<serde_json::Value> = serde_json::from_str(&contents)
        .map_err(|err| format!("failed to parse {}: {}", label, err))?;
    let (records, skipped) = decode_records(values);
    if skipped > 0 {
        warnings.push(format!("skipped {} malformed {}", skipped, label));
    }
    Ok(records)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize {}: {}", path.display(), err))?;
    std::fs::write(path, payload)
        .map_err(|err| format!("failed to write {}: {}", path.display(), err))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize output: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Err("missing comment text: pass --text or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
