use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use csv::WriterBuilder;
use serde::Serialize;
use serde_json::json;

use crate::{AnalysisError, AnalysisReport, EmojiRegistry, format_summary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Txt,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "json",
        }
    }
}

#[derive(Serialize)]
struct CountRow<'a> {
    item: &'a str,
    count: u32,
}

#[derive(Serialize)]
struct EmojiRow<'a> {
    item: &'a str,
    name: &'a str,
    count: u32,
    share: f64,
}

/// Neutralise spreadsheet formulas: cells starting with `=`, `+`, `-`, `@`,
/// tab or carriage return get a leading `'`.
pub fn csv_safe_cell(cell: String) -> String {
    if cell.starts_with(['=', '+', '-', '@', '\t', '\r']) {
        format!("'{cell}")
    } else {
        cell
    }
}

/// Write the report to `dir` as `<stem>_<YYYYmmdd_HHMMSS>_<table>.<ext>`.
///
/// txt produces a single `summary` file; csv, tsv and json produce
/// `sentiment`, `emoji` and `wordfreq` tables. Returns the written paths.
pub fn export_report(
    report: &AnalysisReport,
    stem: &str,
    format: ExportFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>, AnalysisError> {
    let local: DateTime<Local> = Local::now();
    let prefix = format!("{stem}_{}", local.format("%Y%m%d_%H%M%S"));
    let path_for = |table: &str| dir.join(format!("{prefix}_{table}.{}", format.extension()));

    let registry = EmojiRegistry::unicode();
    let distribution = report.emoji.distribution();
    let emoji_rows: Vec<EmojiRow> = report
        .emoji
        .iter()
        .zip(distribution.iter())
        .map(|((glyph, count), (_, share))| EmojiRow {
            item: glyph,
            name: registry.name(glyph).unwrap_or(""),
            count,
            share: *share,
        })
        .collect();
    let word_rows: Vec<CountRow> = report
        .word_frequencies
        .iter()
        .map(|(w, c)| CountRow { item: w, count: *c })
        .collect();
    let sentiment_rows = [
        ("polarity", format!("{:.4}", report.sentiment.polarity)),
        ("subjectivity", format!("{:.4}", report.sentiment.subjectivity)),
        ("label", report.label.to_string()),
        ("language", report.language.clone().unwrap_or_default()),
    ];

    let mut written = Vec::new();
    match format {
        ExportFormat::Txt => {
            let path = path_for("summary");
            write_file(&path, format_summary(report).as_bytes())?;
            written.push(path);
        }
        ExportFormat::Json => {
            let sentiment = json!({
                "polarity": report.sentiment.polarity,
                "subjectivity": report.sentiment.subjectivity,
                "label": report.label,
                "language": report.language,
            });
            let tables = [
                ("sentiment", serde_json::to_vec_pretty(&sentiment)),
                ("emoji", serde_json::to_vec_pretty(&emoji_rows)),
                ("wordfreq", serde_json::to_vec_pretty(&word_rows)),
            ];
            for (table, bytes) in tables {
                let bytes = bytes.map_err(|e| AnalysisError::Export(e.to_string()))?;
                let path = path_for(table);
                write_file(&path, &bytes)?;
                written.push(path);
            }
        }
        ExportFormat::Csv | ExportFormat::Tsv => {
            let delimiter = if format == ExportFormat::Tsv { b'\t' } else { b',' };

            let path = path_for("sentiment");
            let mut wtr = csv_writer(&path, delimiter)?;
            write_record(&mut wtr, ["metric", "value"])?;
            for (metric, value) in &sentiment_rows {
                write_record(&mut wtr, [metric.to_string(), value.clone()])?;
            }
            finish(wtr, &path, &mut written)?;

            let path = path_for("emoji");
            let mut wtr = csv_writer(&path, delimiter)?;
            write_record(&mut wtr, ["item", "name", "count", "share"])?;
            for row in &emoji_rows {
                write_record(
                    &mut wtr,
                    [
                        csv_safe_cell(row.item.to_string()),
                        csv_safe_cell(row.name.to_string()),
                        row.count.to_string(),
                        format!("{:.2}", row.share),
                    ],
                )?;
            }
            finish(wtr, &path, &mut written)?;

            let path = path_for("wordfreq");
            let mut wtr = csv_writer(&path, delimiter)?;
            write_record(&mut wtr, ["item", "count"])?;
            for row in &word_rows {
                write_record(
                    &mut wtr,
                    [csv_safe_cell(row.item.to_string()), row.count.to_string()],
                )?;
            }
            finish(wtr, &path, &mut written)?;
        }
    }
    Ok(written)
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), AnalysisError> {
    let io_err = |source: std::io::Error| AnalysisError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)
}

fn csv_writer(path: &Path, delimiter: u8) -> Result<csv::Writer<std::fs::File>, AnalysisError> {
    WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|e| AnalysisError::Export(format!("Create {} failed: {e}", path.display())))
}

fn write_record<I, T>(wtr: &mut csv::Writer<std::fs::File>, record: I) -> Result<(), AnalysisError>
where
    I: IntoIterator<Item = T>,
    T: AsRef<[u8]>,
{
    wtr.write_record(record)
        .map_err(|e| AnalysisError::Export(e.to_string()))
}

fn finish(
    mut wtr: csv::Writer<std::fs::File>,
    path: &Path,
    written: &mut Vec<PathBuf>,
) -> Result<(), AnalysisError> {
    wtr.flush().map_err(|source| AnalysisError::Io {
        path: path.display().to_string(),
        source,
    })?;
    written.push(path.to_path_buf());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_cells_are_prefixed() {
        assert_eq!(csv_safe_cell("=SUM(A1)".into()), "'=SUM(A1)");
        assert_eq!(csv_safe_cell("-1".into()), "'-1");
        assert_eq!(csv_safe_cell("@cmd".into()), "'@cmd");
        assert_eq!(csv_safe_cell("😊".into()), "😊");
        assert_eq!(csv_safe_cell("'@SAFE".into()), "'@SAFE");
    }

    #[test]
    fn extensions_match_format() {
        assert_eq!(ExportFormat::Txt.extension(), "txt");
        assert_eq!(ExportFormat::Tsv.extension(), "tsv");
    }
}
