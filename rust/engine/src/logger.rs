use serde::{Deserialize, Serialize};

use crate::round::Round;

/// Which mode produced a result.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultCategory {
    PracticeSingles,
    PracticeDaily,
    CareerSingles,
    CareerAo3,
    TournamentAo3,
}

impl ResultCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultCategory::PracticeSingles => "practice_singles",
            ResultCategory::PracticeDaily => "practice_daily",
            ResultCategory::CareerSingles => "career_singles",
            ResultCategory::CareerAo3 => "career_ao3",
            ResultCategory::TournamentAo3 => "tournament_ao3",
        }
    }
}

/// One finished round (or aggregate) as handed to a [`ResultSink`].
/// Serialized as one JSON object per line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Unique identifier (format: YYYYMMDD-NNNNNN); empty until a logger assigns one
    #[serde(default)]
    pub result_id: String,
    pub category: ResultCategory,
    pub score: i32,
    pub won: bool,
    /// Seed the deck was shuffled with, when known
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub clears: u32,
    #[serde(default)]
    pub undos: u32,
    /// RFC3339 timestamp
    #[serde(default)]
    pub ts: Option<String>,
    /// Free-form category specific data (placement, tier, ...)
    #[serde(default)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ResultRecord {
    pub fn new(category: ResultCategory, score: i32, won: bool) -> Self {
        Self {
            result_id: String::new(),
            category,
            score,
            won,
            seed: None,
            clears: 0,
            undos: 0,
            ts: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Builds a record from a finished round. The win flag comes from the
    /// round itself, never from the score.
    pub fn from_round(category: ResultCategory, round: &Round) -> Self {
        let mut rec = Self::new(category, round.calculate_score(), round.is_won());
        rec.seed = round.seed();
        rec.clears = round.clear_count();
        rec.undos = round.undos_used();
        rec
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }
}

pub fn format_result_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Destination for finished results. Fire-and-forget: implementations deal
/// with their own failures and never report them back to the caller.
pub trait ResultSink {
    fn record_result(&mut self, record: &ResultRecord);
}

/// Keeps results in memory. Useful for tests and short-lived sessions.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub records: Vec<ResultRecord>,
}

impl ResultSink for MemorySink {
    fn record_result(&mut self, record: &ResultRecord) {
        self.records.push(record.clone());
    }
}

use chrono::{SecondsFormat, Utc};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Appends [`ResultRecord`]s to a JSONL file.
pub struct ResultLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl std::fmt::Debug for ResultLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultLogger")
            .field("date", &self.date)
            .field("seq", &self.seq)
            .finish()
    }
}

impl ResultLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Self::open(path, false)
    }

    /// Opens for appending, continuing after existing records.
    pub fn append<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        Self::open(path, true)
    }

    fn open<P: AsRef<Path>>(path: P, append: bool) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = create_dir_all(parent) {
                    tracing::warn!(error = %e, dir = %parent.display(), "failed to create result log directory");
                }
            }
        }
        let existing = if append {
            std::fs::read_to_string(path.as_ref())
                .map(|s| s.lines().filter(|l| !l.trim().is_empty()).count() as u32)
                .unwrap_or(0)
        } else {
            0
        };
        let f = if append {
            OpenOptions::new().create(true).append(true).open(path)?
        } else {
            File::create(path)?
        };
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: existing,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_result_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &ResultRecord) -> std::io::Result<()> {
        let mut rec = record.clone();
        if rec.result_id.is_empty() {
            rec.result_id = self.next_id();
        }
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}

impl ResultSink for ResultLogger {
    fn record_result(&mut self, record: &ResultRecord) {
        if let Err(e) = self.write(record) {
            tracing::warn!(error = %e, category = record.category.as_str(), "failed to record result");
        }
    }
}
