// File: ./src/cli.rs
//! Command-line front end: argument parsing and report rendering.

use crate::config::Config;
use crate::context::AppContext;
use crate::engine::{Schedule, parse_files};
use crate::model::Category;
use crate::stats::SummaryStats;
use anyhow::{Context, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "rostercal",
    version,
    about = "Extract one person's shifts from roster workbooks and export them as a calendar"
)]
pub struct Args {
    /// Roster workbooks (xlsx, xls, ods)
    #[arg(required = true)]
    pub workbooks: Vec<PathBuf>,

    /// Person to extract (falls back to `default_name` in the config)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Target year (falls back to the config, then the current year)
    #[arg(short, long)]
    pub year: Option<String>,

    /// Write an ICS file; a directory gets `<name>_排班.ics`
    #[arg(short = 'o', long = "ics")]
    pub ics: Option<PathBuf>,

    /// Print entries and stats as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Use a different directory for configuration
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Remember the given name and year as defaults for later runs
    #[arg(long)]
    pub save_defaults: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Name and year after applying config defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub name: String,
    pub year: String,
}

impl Request {
    pub fn resolve(args: &Args, config: &Config) -> Result<Self> {
        let name = args
            .name
            .clone()
            .or_else(|| config.default_name.clone())
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("No name given; use --name or set default_name"))?;
        let year = args
            .year
            .clone()
            .or_else(|| config.default_year.clone())
            .unwrap_or_else(|| Local::now().year().to_string());
        Ok(Self { name, year })
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    schedule: &'a Schedule,
    stats: SummaryStats,
}

pub fn render_json(schedule: &Schedule) -> Result<String> {
    let report = JsonReport {
        schedule,
        stats: schedule.stats(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Human-readable report: entries grouped by month, then the summary.
pub fn render_text(schedule: &Schedule) -> String {
    let mut out = String::new();
    if schedule.is_empty() {
        let _ = writeln!(
            out,
            "未找到 '{}' 的排班数据 (no shifts found in {})",
            schedule.person, schedule.year
        );
        return out;
    }

    for ((year, month), days) in schedule.by_month() {
        let count: usize = days.values().map(Vec::len).sum();
        let _ = writeln!(out, "{year}年{month}月 ({count})");
        for entries in days.values() {
            for entry in entries {
                let location = entry.location.to_string();
                let _ = write!(
                    out,
                    "  {} ({}) {} {}",
                    entry.date.format("%m-%d"),
                    entry.weekday_label,
                    entry.time_of_day,
                    entry.activity
                );
                if !location.is_empty() {
                    let _ = write!(out, " @ {location}");
                }
                out.push('\n');
            }
        }
        out.push('\n');
    }

    let stats = schedule.stats();
    let _ = write!(out, "总班数 {}", stats.total);
    for category in Category::iter() {
        let _ = write!(out, "  {} {}", category, stats.count(category));
    }
    out.push('\n');
    out
}

/// Runs one invocation against an already-resolved configuration.
pub fn run(args: &Args, ctx: &dyn AppContext) -> Result<String> {
    let config = Config::load(ctx).context("Failed to load configuration")?;
    let request = Request::resolve(args, &config)?;
    log::debug!("Request: {:?}", request);

    if args.save_defaults {
        let updated = Config {
            default_name: Some(request.name.clone()),
            default_year: args.year.clone().or_else(|| config.default_year.clone()),
            ..config.clone()
        };
        updated.save(ctx).context("Failed to save configuration")?;
        log::info!("Saved defaults to {}", ctx.get_config_file_path()?.display());
    }

    let schedule = parse_files(&args.workbooks, &request.name, &request.year);

    if let Some(path) = config.ics_target(args.ics.clone(), &request.name) {
        if schedule.is_empty() {
            log::warn!("No shifts found; not writing {}", path.display());
        } else {
            schedule.write_ics(&path)?;
        }
    }

    if args.json {
        render_json(&schedule)
    } else {
        Ok(render_text(&schedule))
    }
}
