//! Command implementations.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use surv_anomaly::AnomalyOptions;
use surv_cli::pipeline::{self, AnalysisSession, AnomalyStageResult};
use surv_cli::types::AnalyzeResult;
use surv_model::{Contamination, Disease};

use crate::cli::AnalyzeArgs;

/// Run the full analysis pipeline for one dataset.
pub fn run_analyze(args: &AnalyzeArgs) -> Result<AnalyzeResult> {
    // Parameter validation happens before any computation.
    let contamination = Contamination::new(args.contamination)?;
    let options = AnomalyOptions {
        contamination,
        seed: args.seed,
        ..Default::default()
    };

    let mut session = AnalysisSession::new();
    let ingest = pipeline::ingest(&args.data_file)?;
    let transform = pipeline::transform(&mut session, &ingest)?;
    let countries = pipeline::countries(&transform.wide);

    let anomaly = if args.no_anomaly {
        AnomalyStageResult::default()
    } else {
        let bar = progress_bar();
        let result = pipeline::anomalies(
            &mut session,
            &ingest,
            &transform.wide,
            &args.country,
            &options,
            |done, total| {
                bar.set_length(total as u64);
                bar.set_position(done as u64);
            },
        )?;
        bar.finish_and_clear();
        result
    };

    let output_dir = args.output_dir.clone().unwrap_or_else(|| {
        args.data_file
            .parent()
            .map(|dir| dir.join("output"))
            .unwrap_or_else(|| std::path::PathBuf::from("output"))
    });
    let output = pipeline::output(
        &output_dir,
        &transform,
        anomaly.combined.as_ref(),
        args.dry_run,
    )?;

    let has_errors = !output.errors.is_empty();
    Ok(AnalyzeResult {
        source: ingest.source.clone(),
        dataset: ingest.dataset.short().to_string(),
        output_dir,
        wide_rows: transform.wide.height(),
        long_rows: transform.long.len(),
        diseases: transform
            .long
            .diseases()
            .into_iter()
            .map(|disease| disease.label().to_string())
            .collect(),
        countries: countries.len(),
        scored: anomaly.scored.len(),
        skipped: anomaly.skipped.clone(),
        flagged_rows: anomaly.flagged_rows(),
        long_csv: output.long_csv,
        summary_report: output.summary_report,
        anomalies_csv: output.anomalies_csv,
        errors: output.errors,
        has_errors,
    })
}

/// Print the supported disease metrics.
pub fn run_diseases() {
    for disease in Disease::ALL {
        let kind = if disease.is_rate() {
            "rate per 100k"
        } else {
            "case count"
        };
        println!(
            "{:<18} {:<14} column: {}",
            disease.label(),
            kind,
            disease.measure_column()
        );
    }
}

fn progress_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} countries")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}
