// Demo entry point: formats yen amounts and plays a count-up in the terminal
use anyhow::Result;
use clap::{Parser, Subcommand};
use display_engine::animation::{yen_value_formatter, CountUpAnimator, CountUpRequest, DisplaySink};
use display_engine::config::DisplaySettings;
use display_engine::formatters::YenFormatter;
use display_engine::services::{drive, TokioFrames};
use display_engine::TickOutcome;
use serde::Serialize;
use shared::models::FormattedParts;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "yen-display")]
#[command(version, about = "Japanese-yen formatting and count-up animation helpers")]
struct Cli {
    /// Path to a JSON settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format amounts in 億/万 units
    Format {
        #[arg(required = true, allow_negative_numbers = true)]
        amounts: Vec<f64>,
        /// Print one JSON object per amount
        #[arg(long)]
        json: bool,
    },
    /// Animate a number from one value to another
    CountUp {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
        /// Overrides the configured duration
        #[arg(long)]
        duration_ms: Option<f64>,
        /// Render values as yen instead of plain grouped digits
        #[arg(long)]
        yen: bool,
    },
}

#[derive(Serialize)]
struct FormatReport {
    amount: f64,
    parts: FormattedParts,
    formatted: String,
    axis_label: String,
}

// Rewrites the current terminal line on every frame.
struct TerminalSink {
    out: std::io::Stdout,
}

impl DisplaySink for TerminalSink {
    fn set_text(&mut self, text: &str) {
        let mut out = self.out.lock();
        if let Err(e) = write!(out, "\r\x1b[2K{}", text).and_then(|_| out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => DisplaySettings::load(path)?,
        None => DisplaySettings::default(),
    };

    match cli.command {
        Commands::Format { amounts, json } => format_amounts(&amounts, json)?,
        Commands::CountUp {
            from,
            to,
            duration_ms,
            yen,
        } => count_up(&settings, from, to, duration_ms, yen).await?,
    }

    Ok(())
}

fn format_amounts(amounts: &[f64], json: bool) -> Result<()> {
    let formatter = YenFormatter::new();
    for &amount in amounts {
        let parts = formatter.decompose(amount)?;
        let report = FormatReport {
            amount,
            formatted: parts.to_string(),
            axis_label: formatter.format_axis_label(amount)?,
            parts,
        };
        if json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            println!("{}\t{}\t{}", report.amount, report.formatted, report.axis_label);
        }
    }
    Ok(())
}

async fn count_up(
    settings: &DisplaySettings,
    from: f64,
    to: f64,
    duration_ms: Option<f64>,
    yen: bool,
) -> Result<()> {
    let animator = CountUpAnimator::from_settings(&settings.animation)?;
    let mut frames = TokioFrames::from_settings(&settings.animation);

    let mut request = CountUpRequest::new(from, to);
    if let Some(ms) = duration_ms {
        request = request.with_duration_ms(ms);
    }
    if yen {
        request = request.with_value_formatter(yen_value_formatter());
    }

    let sink = TerminalSink {
        out: std::io::stdout(),
    };
    let run = animator.start("terminal", Some(sink), request, &frames)?;
    let handle = run.handle();

    tokio::select! {
        result = drive(run, &mut frames) => {
            println!();
            if result.outcome == TickOutcome::Finished {
                info!("Count-up finished after {} frames", result.frames);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            handle.cancel();
            println!();
            warn!("Count-up interrupted");
        }
    }

    Ok(())
}
