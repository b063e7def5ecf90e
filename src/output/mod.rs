//! Output module for console reports
//!
//! This module renders pipeline, scrape, download and batch results for the
//! command-line interface.

mod report;

pub use report::{
    format_batch_summary, format_candidates, format_download_report, format_pipeline_result,
    print_batch_summary, print_candidates, print_download_report, print_pipeline_result,
};
