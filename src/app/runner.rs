use crate::domain::model::{BuildResult, GenerationReport};
use crate::utils::error::{Result, SitemapError};
use std::future::Future;
use std::io::Write;

pub const START_MESSAGE: &str = "Generating sitemap files...";

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

/// Runs a generation job and reports it on the given console streams.
///
/// Prints a start line, then either a success line on `out` (exit code 0)
/// or the error on `err` (exit code 1). Every error kind maps to 1.
pub async fn report_generation<F, O, E>(job: F, out: &mut O, err: &mut E) -> i32
where
    F: Future<Output = Result<GenerationReport>>,
    O: Write,
    E: Write,
{
    // 主控台輸出失敗時不影響結束碼
    let _ = writeln!(out, "{}", START_MESSAGE);

    match job.await {
        Ok(report) => {
            tracing::info!("✅ Sitemap generation completed successfully!");
            let _ = writeln!(
                out,
                "✅ Sitemap generated: {} URLs in {} file(s) at {}",
                report.url_count,
                report.file_count(),
                report.output_path
            );
            if !report.files_unchanged.is_empty() {
                let _ = writeln!(
                    out,
                    "   {} file(s) unchanged: {}",
                    report.files_unchanged.len(),
                    report.files_unchanged.join(", ")
                );
            }
            EXIT_SUCCESS
        }
        Err(e) => report_failure(&e, err),
    }
}

/// Runs a dry-run plan job: prints the plan on `out` (exit code 0) or the
/// error on `err` (exit code 1).
pub async fn report_plan<F, O, E>(job: F, out: &mut O, err: &mut E) -> i32
where
    F: Future<Output = Result<BuildResult>>,
    O: Write,
    E: Write,
{
    match job.await {
        Ok(plan) => {
            let _ = print_plan(&plan, out);
            EXIT_SUCCESS
        }
        Err(e) => report_failure(&e, err),
    }
}

/// Logs a failed run and prints the user-facing message. Always returns 1.
pub fn report_failure<E: Write>(e: &SitemapError, err: &mut E) -> i32 {
    tracing::error!(
        "❌ Sitemap generation failed: {} (Category: {:?})",
        e,
        e.category()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    let _ = writeln!(err, "❌ Sitemap generation failed: {}", e.user_friendly_message());
    let _ = writeln!(err, "💡 {}", e.recovery_suggestion());
    EXIT_FAILURE
}

/// Prints what a run would write, for `--dry-run`.
pub fn print_plan<O: Write>(plan: &BuildResult, out: &mut O) -> std::io::Result<()> {
    writeln!(out, "🔍 Dry Run: nothing will be written")?;
    writeln!(out, "  URLs: {}", plan.url_count)?;
    writeln!(out, "  Excluded: {}", plan.excluded_count)?;
    writeln!(out, "  Duplicates dropped: {}", plan.duplicate_count)?;
    writeln!(out, "  Files:")?;
    for file in &plan.files {
        writeln!(
            out,
            "    {} ({:?}, {} URLs, {} bytes)",
            file.name,
            file.kind,
            file.url_count,
            file.contents.len()
        )?;
    }
    Ok(())
}
