//! Command implementations behind the `logvault` subcommands.
//!
//! Each function writes user-facing output to the writers it is given and
//! returns the structured result, so tests can assert on either.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use logvault_core::{
    Classifier, History, HistoryListing, IngestReport, Intake, LogType, RawUpload, SearchBackend,
    SearchGateway, SearchResults,
};

/// Run `paths` from local disk through the intake pipeline, one file at a
/// time.
///
/// A file's name and size are screened before its content is read, so an
/// oversized or disallowed file is reported without loading it. A file that
/// cannot be read fails the command; files before it stay archived.
/// Rejections are reported, not errors.
pub fn ingest(
    intake: &Intake,
    paths: &[PathBuf],
    out: &mut impl Write,
) -> anyhow::Result<Vec<IngestReport>> {
    let mut reports = Vec::with_capacity(paths.len());
    for path in paths {
        let filename = upload_name(path);
        let size = std::fs::metadata(path)
            .with_context(|| format!("failed to read {}", path.display()))?
            .len();

        let report = match intake.screen(&filename, size) {
            Err(reason) => intake.reject(&filename, reason),
            Ok(()) => intake.ingest_one(&read_upload(path, filename)?),
        };
        writeln!(out, "{}", report.summary())?;
        reports.push(report);
    }
    Ok(reports)
}

/// Print the detected type of each file without archiving anything.
pub fn classify(
    classifier: &Classifier,
    paths: &[PathBuf],
    out: &mut impl Write,
) -> anyhow::Result<Vec<Option<LogType>>> {
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let content =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let detected = classifier.classify(&content);
        let label = detected.map_or("unknown", LogType::as_str);
        writeln!(out, "{}\t{label}", path.display())?;
        results.push(detected);
    }
    Ok(results)
}

/// Print the archive listing, as text or pretty JSON.
pub fn history(
    history: &History,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<HistoryListing> {
    let listing = history.list_by_type()?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &listing)?;
        writeln!(out)?;
        return Ok(listing);
    }

    for (log_type, entries) in &listing {
        writeln!(out, "{log_type} ({})", entries.len())?;
        for entry in entries {
            writeln!(
                out,
                "  {}  {}  {} B",
                entry.name,
                entry.timestamp.label(),
                entry.size
            )?;
        }
    }
    Ok(listing)
}

/// Run a scoped search. Hits go to `out` as JSON lines; a backend notice
/// goes to `err`. Invalid input is an error.
pub async fn search<B: SearchBackend>(
    gateway: &SearchGateway<B>,
    log_type: &str,
    query: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<SearchResults> {
    let results = gateway.search(log_type, query).await?;
    for hit in &results.hits {
        serde_json::to_writer(&mut *out, hit)?;
        writeln!(out)?;
    }
    if let Some(notice) = &results.notice {
        writeln!(err, "{notice}")?;
    }
    Ok(results)
}

/// Print the supported log types, one per line.
pub fn types(out: &mut impl Write) -> anyhow::Result<()> {
    for log_type in LogType::ALL {
        writeln!(out, "{log_type}")?;
    }
    Ok(())
}

fn upload_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_upload(path: &Path, filename: String) -> anyhow::Result<RawUpload> {
    let content =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(RawUpload::new(filename, content))
}
