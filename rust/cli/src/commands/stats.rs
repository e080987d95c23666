//! `stats`: per-category summary of result logs.
//!
//! Accepts a single `.jsonl`/`.jsonl.zst` file or a directory searched
//! recursively. Unparseable lines are counted as corrupted; an unterminated
//! final line is treated as an interrupted write and skipped.

use crate::error::CliError;
use crate::io_utils::{collect_result_files, read_text_auto};
use crate::ui;
use quartet_engine::logger::ResultRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default, Serialize)]
struct CategoryStats {
    count: u64,
    wins: u64,
    mean_score: f64,
    best_score: Option<i32>,
    #[serde(skip)]
    total_score: i64,
}

#[derive(Debug, Default, Serialize)]
struct StatsReport {
    records: u64,
    categories: BTreeMap<&'static str, CategoryStats>,
    corrupted: u64,
    skipped: u64,
}

impl StatsReport {
    fn add(&mut self, rec: &ResultRecord) {
        self.records += 1;
        let entry = self.categories.entry(rec.category.as_str()).or_default();
        entry.count += 1;
        if rec.won {
            entry.wins += 1;
        }
        entry.total_score += i64::from(rec.score);
        entry.best_score = Some(entry.best_score.map_or(rec.score, |b| b.min(rec.score)));
        entry.mean_score = entry.total_score as f64 / entry.count as f64;
    }

    fn consume(&mut self, content: &str) {
        let has_trailing_nl = content.ends_with('\n');
        let lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).collect();
        for (i, line) in lines.iter().enumerate() {
            match serde_json::from_str::<ResultRecord>(line) {
                Ok(rec) => self.add(&rec),
                Err(_) if i == lines.len() - 1 && !has_trailing_nl => self.skipped += 1,
                Err(_) => self.corrupted += 1,
            }
        }
    }
}

pub fn handle_stats_command(
    input: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut report = StatsReport::default();

    if path.is_dir() {
        for file in collect_result_files(path) {
            match read_text_auto(&file.to_string_lossy()) {
                Ok(content) => report.consume(&content),
                Err(e) => {
                    ui::display_warning(err, &format!("cannot read {}: {}", file.display(), e))?;
                    report.corrupted += 1;
                }
            }
        }
    } else {
        match read_text_auto(input) {
            Ok(s) => report.consume(&s),
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::Config(format!("Failed to read {}: {}", input, e)));
            }
        }
    }

    if report.corrupted > 0 {
        ui::write_error(err, &format!("Skipped {} corrupted record(s)", report.corrupted))?;
    }
    if report.skipped > 0 {
        ui::display_warning(
            err,
            &format!("Discarded {} incomplete final line(s)", report.skipped),
        )?;
    }

    let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json)?;
    Ok(())
}
