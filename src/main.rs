//! Wordcover - exact-cover word search
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::process;

use wordcover::cli::Args;
use wordcover::progress::{print_banner, print_error, print_header, print_info};
use wordcover::runner::{Runner, SearchConfig};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if !args.quiet {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Configure thread pool
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .ok();
    }

    if let Err(e) = run(args) {
        print_error(&format!("{}", e));

        // Print chain of errors
        let mut source = e.source();
        while let Some(err) = source {
            print_error(&format!("  Caused by: {}", err));
            source = err.source();
        }

        process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    if !args.quiet {
        print_banner();
    }

    validate_args(&args)?;

    let config = SearchConfig::from_args(&args)?;

    if !args.quiet && args.verbose {
        print_config(&args, &config);
    }

    Runner::new(config).run()?;

    Ok(())
}

/// Validate command-line arguments
fn validate_args(args: &Args) -> anyhow::Result<()> {
    if args.letters_input().chars().all(char::is_whitespace) {
        anyhow::bail!("No letters given: pass at least one non-whitespace character");
    }

    if let Some(ref pattern) = args.pattern {
        wordcover::filter::validate_pattern(pattern)?;
    }

    if args.min_length == Some(0) {
        anyhow::bail!("--min-length must be at least 1");
    }

    if args.threads == Some(0) {
        anyhow::bail!("--threads must be at least 1");
    }

    args.parse_timeout()?;
    args.parse_buffer_size()?;

    Ok(())
}

/// Print configuration summary
fn print_config(args: &Args, config: &SearchConfig) {
    print_header("Configuration");

    print_info(&format!("Letters:      {}", config.letters));
    print_info(&format!("Dictionary:   {:?}", config.dictionary));
    print_info(&format!("Recursive:    {}", config.recursive));
    print_info(&format!("Extensions:   {:?}", config.extensions));

    if let Some(ref pattern) = config.pattern {
        print_info(&format!("Pattern:      {}", pattern));
    }

    if let Some(min_length) = config.min_length {
        print_info(&format!("Min length:   {}", min_length));
    }

    match config.output {
        Some(ref path) => print_info(&format!("Output:       {:?}", path)),
        None => print_info("Output:       stdout"),
    }

    print_info(&format!("Format:       {:?}", config.format));
    print_info(&format!(
        "Timeout:      {}",
        config
            .timeout
            .map(|t| format!("{:?}", t))
            .unwrap_or_else(|| "none".to_string())
    ));
    print_info(&format!("Threads:      {}", args.threads.unwrap_or_else(num_cpus::get)));
}
