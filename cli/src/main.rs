//! ocp - Object Copy
//!
//! Stream a single object out of an object store to a local file or
//! standard output, powered by ocopy.
//!
//! Usage:
//!   ocp --bucket my-bucket --key path/to/file.txt --output file.txt
//!   ocp --backend fs --bucket ./data --key file.txt
//!
//! Exit codes: 0 success, 1 source open failure, 2 output create failure,
//! 3 transfer failure, 130 cancelled.

use std::sync::Arc;

use clap::{Parser, ValueEnum};
use indicatif::ProgressBar;
use ocopy::{
    CancellationToken, CopyOptions, CopyStats, Error as OcopyError, ErrorCode, FsStore,
    ObjectStore, OutputTarget, S3Config, S3Store, SinkHandle, copy_stream, create_progress_bar,
};
use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// ocp - Streaming object copy
///
/// Copies one object from an object-store backend to a file or standard
/// output. Log output goes to stderr and is controlled by RUST_LOG.
#[derive(Parser, Debug)]
#[command(name = "ocp", version, about, long_about = None)]
struct Args {
    /// Storage backend region identifier
    #[arg(long, default_value = "us-west-2")]
    region: String,

    /// Bucket name (s3 backend) or root directory (fs backend)
    #[arg(long, default_value = "my-bucket")]
    bucket: String,

    /// Object key to read
    #[arg(long, default_value = "/path/to/file.txt")]
    key: String,

    /// Output file, "-" for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Storage backend serving the source object
    #[arg(long, value_enum, default_value = "s3")]
    backend: BackendKind,

    /// Custom endpoint for S3-compatible services (MinIO, localstack)
    #[arg(long)]
    endpoint: Option<String>,

    /// Force path-style bucket addressing
    #[arg(long)]
    path_style: bool,

    /// Copy chunk size in bytes
    #[arg(long, default_value_t = ocopy::DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Final report format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputMode,

    /// Suppress the progress bar
    #[arg(short, long)]
    quiet: bool,

    /// Do not fsync the output file (faster but less safe)
    #[arg(long)]
    no_sync: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BackendKind {
    /// S3-compatible object storage
    S3,
    /// Local directory standing in as a bucket
    Fs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputMode {
    /// Log a summary line to stderr
    Human,
    /// Emit a machine-readable JSON report
    Json,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    std::process::exit(run(args).await);
}

async fn run(args: Args) -> i32 {
    let target = OutputTarget::parse(&args.output);
    let store = build_store(&args).await;
    let cancel = install_cancel_handler();

    let mut options = CopyOptions::default()
        .with_chunk_size(args.chunk_size)
        .with_cancel_token(cancel);
    if args.no_sync {
        options = options.without_fsync();
    }

    info!("copying {} to {}", describe_source(&args), args.output);

    // Open the source before creating the sink, so a failed lookup never
    // leaves an empty output file behind.
    let source = match store.open(&args.key).await {
        Ok(source) => source,
        Err(err) => return report_failure(&args, &target, &err),
    };
    let sink = match SinkHandle::open(&target).await {
        Ok(sink) => sink,
        Err(err) => return report_failure(&args, &target, &err),
    };

    let progress = progress_bar(&args, &target, source.content_length());
    if let Some(pb) = &progress {
        let pb = pb.clone();
        options = options.with_progress(Arc::new(move |bytes| pb.set_position(bytes)));
    }

    let result = copy_stream(source, sink, &options).await;
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    match result {
        Ok(stats) => {
            report_success(&args, &target, stats);
            0
        }
        Err(err) => report_failure(&args, &target, &err),
    }
}

async fn build_store(args: &Args) -> Box<dyn ObjectStore> {
    match args.backend {
        BackendKind::Fs => Box::new(FsStore::new(&args.bucket)),
        BackendKind::S3 => {
            let config = S3Config {
                region: Some(args.region.clone()),
                endpoint: args.endpoint.clone(),
                path_style: args.path_style,
            };
            Box::new(S3Store::connect(&args.bucket, config).await)
        }
    }
}

/// Cancel the copy on Ctrl+C; a second Ctrl+C aborts immediately.
fn install_cancel_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        loop {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            if cancel.is_cancelled() {
                eprintln!("\nForce quit.");
                std::process::exit(130);
            }
            eprintln!("\nCancelling... press Ctrl+C again to abort immediately.");
            cancel.cancel();
        }
    });
    token
}

fn progress_bar(args: &Args, target: &OutputTarget, total: Option<u64>) -> Option<ProgressBar> {
    if args.quiet
        || matches!(args.format, OutputMode::Json)
        || matches!(target, OutputTarget::Stdout)
    {
        return None;
    }
    Some(create_progress_bar(total))
}

fn describe_source(args: &Args) -> String {
    let key = args.key.trim_start_matches('/');
    match args.backend {
        BackendKind::S3 => format!("s3://{}/{}", args.bucket, key),
        BackendKind::Fs => format!("{}/{}", args.bucket.trim_end_matches('/'), key),
    }
}

fn report_success(args: &Args, target: &OutputTarget, stats: CopyStats) {
    match args.format {
        OutputMode::Human => info!("copied {} bytes", stats.bytes_copied),
        OutputMode::Json => {
            let report = json!({
                "status": "ok",
                "bytes_copied": stats.bytes_copied,
            });
            emit_report(target, &report);
        }
    }
}

fn report_failure(args: &Args, target: &OutputTarget, err: &OcopyError) -> i32 {
    error!("{err}");
    if matches!(args.format, OutputMode::Json) {
        let report = json!({
            "status": "error",
            "code": err.code().as_str(),
            "error": err.to_string(),
            "bytes_copied": err.bytes_copied(),
        });
        emit_report(target, &report);
    }
    exit_code_for(err.code())
}

/// The JSON report goes to stdout, unless stdout is the copy sink; then it
/// moves to stderr so it never corrupts the copied bytes.
fn emit_report(target: &OutputTarget, report: &serde_json::Value) {
    if matches!(target, OutputTarget::Stdout) {
        eprintln!("{report}");
    } else {
        println!("{report}");
    }
}

fn exit_code_for(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::OpenFailed => 1,
        ErrorCode::CreateFailed => 2,
        ErrorCode::Cancelled => 130,
        _ => 3,
    }
}
