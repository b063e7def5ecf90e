//! Plain-text reports of acquisition results

use crate::model::{BatchSummary, CandidateLink, DownloadReport, PipelineResult};
use std::fmt::Write;

/// Renders one pipeline result
pub fn format_pipeline_result(result: &PipelineResult) -> String {
    let mut out = String::new();
    let status = if result.success { "OK" } else { "FAILED" };

    let _ = writeln!(out, "[{}] {}", status, result.topic);
    let _ = writeln!(out, "  {}", result.message);
    for file in &result.files {
        let _ = writeln!(out, "  + {}", file);
    }
    for failure in &result.failures {
        let _ = writeln!(
            out,
            "  ! {}: {}",
            failure.url,
            failure.error_detail.as_deref().unwrap_or("unknown error")
        );
    }
    out
}

/// Renders candidate links found by a site crawl
pub fn format_candidates(candidates: &[CandidateLink]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Found {} potential PDF links.", candidates.len());
    for (index, candidate) in candidates.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {} ({})",
            index + 1,
            candidate.suggested_filename,
            candidate.url
        );
    }
    out
}

/// Renders a direct download report
pub fn format_download_report(report: &DownloadReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.message);
    for file in &report.files {
        let _ = writeln!(out, "  + {}", file);
    }
    for error in &report.errors {
        let _ = writeln!(out, "  ! {}", error);
    }
    out
}

/// Renders a batch summary followed by each topic's result
pub fn format_batch_summary(batch: &BatchSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== Batch Summary ===\n");
    let _ = writeln!(out, "Overview:");
    let _ = writeln!(out, "  Total topics: {}", batch.total_topics());
    let _ = writeln!(out, "  Completed: {}", batch.success_count());
    let _ = writeln!(out, "  Failed: {}", batch.failed_count());
    let _ = writeln!(out, "  Files saved: {}", batch.all_files.len());
    let _ = writeln!(out);

    for result in &batch.results {
        out.push_str(&format_pipeline_result(result));
    }

    let _ = writeln!(out, "\n{}", batch.message);
    out
}

pub fn print_pipeline_result(result: &PipelineResult) {
    print!("{}", format_pipeline_result(result));
}

pub fn print_candidates(candidates: &[CandidateLink]) {
    print!("{}", format_candidates(candidates));
}

pub fn print_download_report(report: &DownloadReport) {
    print!("{}", format_download_report(report));
}

pub fn print_batch_summary(batch: &BatchSummary) {
    print!("{}", format_batch_summary(batch));
}
