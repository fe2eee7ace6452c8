//! # chatview CLI
//!
//! Command-line interface for the chatview library.

use std::process;
use std::time::{Duration, Instant};

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatview::bundle::ExportBundle;
use chatview::cli::Args;
use chatview::core::{TranscriptStats, apply_filters};
use chatview::format::write_to_format;
use chatview::parser::TranscriptParser;
use chatview::streaming::StreamingConfig;
use chatview::{ChatviewError, Message};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "chatview=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatviewError> {
    let total_start = Instant::now();
    let (format, output_path) = args.resolve_output();

    println!("💬 chatview v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for input in &args.inputs {
        println!("📂 Input:   {}", input.display());
    }
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", format);
    if args.streaming {
        println!("🌊 Mode:    Streaming");
    }

    let filter_config = args.filter_config()?;
    if let Some(ref after) = args.after {
        println!("📅 After:   {}", after);
    }
    if let Some(ref before) = args.before {
        println!("📅 Before:  {}", before);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {}", from);
    }
    println!();

    // Step 1: Locate the transcript and its media
    let bundle = ExportBundle::from_paths(&args.inputs)?;
    println!("📖 Transcript: {}", bundle.transcript.display());
    println!("   {} media files collected", bundle.files.len());

    // Step 2: Parse
    let parser = TranscriptParser::with_config(args.parser_config())?;
    let (messages, parse_time) = if args.streaming {
        parse_streaming(&parser, &bundle)?
    } else {
        parse_regular(&parser, &bundle)?
    };
    let original_count = messages.len();
    println!(
        "   Found {} messages ({:.2}s)",
        original_count,
        parse_time.as_secs_f64()
    );

    // Step 3: Filter
    let messages = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filter_start = Instant::now();
        let filtered = apply_filters(messages, &filter_config);
        println!(
            "   {} messages after filtering ({:.2}s)",
            filtered.len(),
            filter_start.elapsed().as_secs_f64()
        );
        filtered
    } else {
        messages
    };

    // Step 4: Write
    println!("💾 Writing {}...", format);
    let write_start = Instant::now();
    write_to_format(&messages, &bundle.files, &output_path, format, &args.output_config())?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    print_summary(&messages, &bundle, original_count, filter_config.is_active());

    let total_time = total_start.elapsed();
    println!();
    println!("⚡ Performance:");
    println!("   Total time:  {:.2}s", total_time.as_secs_f64());
    let msgs_per_sec = original_count as f64 / total_time.as_secs_f64().max(f64::EPSILON);
    println!("   Throughput:  {:.0} messages/sec", msgs_per_sec);

    Ok(())
}

fn print_summary(messages: &[Message], bundle: &ExportBundle, original_count: usize, filtered: bool) {
    let stats = TranscriptStats::from_messages(messages);

    println!();
    println!("📊 Summary:");
    println!("   Original:  {} messages", original_count);
    if filtered {
        println!("   Filtered:  {} messages", stats.total);
    }
    println!(
        "   Kinds:     {} text, {} media, {} documents, {} calls, {} system",
        stats.text, stats.images, stats.documents, stats.calls, stats.system
    );
    if !stats.senders.is_empty() {
        println!("   Senders:   {}", stats.senders.join(", "));
    }
    if let (Some(first), Some(last)) = (&stats.first_date, &stats.last_date) {
        println!("   Range:     {} → {}", first, last);
    }

    let missing = TranscriptStats::missing_attachments(messages, &bundle.files);
    if !missing.is_empty() {
        println!("   Missing:   {} attachments not in the export", missing.len());
    }
}

/// Parse with the whole transcript in memory
fn parse_regular(
    parser: &TranscriptParser,
    bundle: &ExportBundle,
) -> Result<(Vec<Message>, Duration), ChatviewError> {
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();
    let messages = bundle.parse(parser)?;
    Ok((messages, parse_start.elapsed()))
}

/// Parse line by line (memory-efficient)
fn parse_streaming(
    parser: &TranscriptParser,
    bundle: &ExportBundle,
) -> Result<(Vec<Message>, Duration), ChatviewError> {
    println!("⏳ Streaming transcript...");
    let parse_start = Instant::now();
    let messages = parser
        .stream_file(&bundle.transcript, StreamingConfig::new())?
        .collect::<Result<Vec<_>, _>>()?;
    Ok((messages, parse_start.elapsed()))
}
