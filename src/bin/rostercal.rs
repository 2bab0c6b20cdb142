// Binary entry point for the command-line tool.
use anyhow::Result;
use clap::Parser;
use rostercal::cli::{Args, run};
use rostercal::context::StandardContext;
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // Logs go to stderr so that `--json` output stays clean on stdout.
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let ctx = StandardContext::new(args.root.clone());
    let report = run(&args, &ctx)?;
    print!("{}", report);
    Ok(())
}
