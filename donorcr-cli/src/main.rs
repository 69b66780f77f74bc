//! DonorCr CLI — predict, batch and model listing commands.
//!
//! Commands:
//! - `predict` — one prediction from command-line measurements
//! - `batch` — predict every row of a CSV file
//! - `models` — list the nine sub-models in table order
//!
//! Logging goes to stderr, filtered by `DONORCR_LOG` (default `warn`).

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use donorcr_core::batch::run_batch;
use donorcr_core::report::{self, format_result, format_value};
use donorcr_core::{
    CalculatorConfig, InvalidInputError, PredictionBreakdown, PredictionInput, Predictor, Sex,
    SubModel,
};

#[derive(Parser)]
#[command(
    name = "donorcr",
    about = "Predicted serum creatinine one year after living kidney donation"
)]
struct Cli {
    /// TOML config supplying defaults for omitted measurements.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict from a single set of donor measurements.
    Predict {
        /// Donor body weight (kg).
        #[arg(long)]
        weight: Option<f64>,

        /// Preoperative serum creatinine (mg/dL).
        #[arg(long)]
        creatinine: Option<f64>,

        /// Non-excised kidney volume measured by CT (mL).
        #[arg(long)]
        volume: Option<f64>,

        /// Donor sex: male/female, m/f or 1/0.
        #[arg(long)]
        sex: Option<Sex>,

        /// Also print the nine sub-model values.
        #[arg(long, default_value_t = false)]
        breakdown: bool,

        /// Print the result as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Predict every row of a CSV file.
    Batch {
        /// Input CSV with body_weight_kg, creatinine_mg_dl, non_excised_kidney_volume_ml, sex.
        #[arg(long)]
        input: PathBuf,

        /// Output CSV. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List the sub-models combined by the median.
    Models,
}

/// Measurements given on the command line; `None` falls back to the config.
#[derive(Debug, Default, Clone, Copy)]
struct MeasurementArgs {
    weight: Option<f64>,
    creatinine: Option<f64>,
    volume: Option<f64>,
    sex: Option<Sex>,
}

impl MeasurementArgs {
    fn resolve(self, config: &CalculatorConfig) -> PredictionInput {
        let d = &config.defaults;
        PredictionInput::new(
            self.weight.unwrap_or(d.body_weight_kg),
            self.creatinine.unwrap_or(d.creatinine_mg_dl),
            self.volume.unwrap_or(d.non_excised_kidney_volume_ml),
            self.sex.unwrap_or(d.sex),
        )
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = CalculatorConfig::load_or_default(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Commands::Predict {
            weight,
            creatinine,
            volume,
            sex,
            breakdown,
            json,
        } => {
            let args = MeasurementArgs {
                weight,
                creatinine,
                volume,
                sex,
            };
            run_predict(args.resolve(&config), breakdown, json)
        }
        Commands::Batch { input, output } => run_batch_cmd(&input, output.as_deref()),
        Commands::Models => {
            print_models();
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DONORCR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_predict(input: PredictionInput, breakdown: bool, json: bool) -> Result<()> {
    let result = Predictor::new().predict_breakdown(&input);

    match (result, json) {
        (Ok(b), true) => {
            let out = serde_json::to_string_pretty(&JsonReport::new(&input, &b))?;
            println!("{out}");
        }
        (Ok(b), false) => print_prediction(&input, &b, breakdown),
        (Err(e), true) => {
            println!("{}", failure_output(&e, true)?);
            std::process::exit(EXIT_INVALID_INPUT);
        }
        (Err(e), false) => {
            eprintln!("{}", failure_output(&e, false)?);
            std::process::exit(EXIT_INVALID_INPUT);
        }
    }
    Ok(())
}

/// Exit status when the measurements are rejected.
const EXIT_INVALID_INPUT: i32 = 1;

/// Text printed for a rejected prediction: a JSON error object or the display message.
fn failure_output(err: &InvalidInputError, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&JsonError {
            error: err.to_string(),
            field: err.field().label(),
        })?)
    } else {
        Ok(report::error_message(err))
    }
}

fn run_batch_cmd(input: &Path, output: Option<&Path>) -> Result<()> {
    let file = File::open(input).with_context(|| format!("open {}", input.display()))?;
    let reader = BufReader::new(file);

    let summary = match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            run_batch(reader, BufWriter::new(file))?
        }
        None => run_batch(reader, io::stdout().lock())?,
    };

    eprintln!(
        "Batch: {} rows, {} predicted, {} failed",
        summary.rows, summary.succeeded, summary.failed
    );
    if let Some(path) = output {
        eprintln!("Results saved to: {}", path.display());
    }
    Ok(())
}

fn print_prediction(input: &PredictionInput, b: &PredictionBreakdown, breakdown: bool) {
    let result = b.result();
    println!();
    println!("=== {} ===", report::TITLE);
    println!(
        "Body weight:    {} {}",
        input.body_weight_kg,
        report::BODY_WEIGHT.unit
    );
    println!(
        "Creatinine:     {} {}",
        input.creatinine_mg_dl,
        report::CREATININE.unit
    );
    println!(
        "Kidney volume:  {} {}",
        input.non_excised_kidney_volume_ml,
        report::KIDNEY_VOLUME.unit
    );
    println!("Sex:            {}", input.sex);
    println!();

    if breakdown {
        println!("--- Sub-models ---");
        let median_models = b.median_models();
        for (model, value) in b.entries() {
            let marker = if median_models.contains(&model) { "  <- median" } else { "" };
            println!(
                "{:>2}. {:<24} {:>8}{marker}",
                model.index(),
                model.name(),
                format_value(value)
            );
        }
        println!();
    }

    println!("Predicted:      {}", format_result(&result));
    println!();
    println!("{}", report::success_message(&result));
    println!();
    println!("NOTE: {}", report::DISCLAIMER);
    println!();
}

fn print_models() {
    println!("{:<4} {:<24} {}", "#", "Name", "Divides by weight");
    println!("{}", "-".repeat(46));
    for model in SubModel::ALL {
        println!(
            "{:<4} {:<24} {}",
            model.index(),
            model.name(),
            if model.divides_by_weight() { "yes" } else { "no" }
        );
    }
}

#[derive(Serialize)]
struct JsonSubModel {
    index: usize,
    name: &'static str,
    value: f64,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a PredictionInput,
    predicted_creatinine_mg_dl: f64,
    formatted: String,
    sub_models: Vec<JsonSubModel>,
}

impl<'a> JsonReport<'a> {
    fn new(input: &'a PredictionInput, b: &PredictionBreakdown) -> Self {
        let result = b.result();
        Self {
            input,
            predicted_creatinine_mg_dl: result.predicted_creatinine_mg_dl,
            formatted: format_result(&result),
            sub_models: b
                .entries()
                .map(|(model, value)| JsonSubModel {
                    index: model.index(),
                    name: model.name(),
                    value,
                })
                .collect(),
        }
    }
}

#[derive(Serialize)]
struct JsonError {
    error: String,
    field: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_predict_command() {
        let cli = Cli::try_parse_from([
            "donorcr",
            "predict",
            "--weight",
            "60",
            "--creatinine",
            "0.8",
            "--volume",
            "120",
            "--sex",
            "male",
            "--breakdown",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict {
                weight,
                sex,
                breakdown,
                json,
                ..
            } => {
                assert_eq!(weight, Some(60.0));
                assert_eq!(sex, Some(Sex::Male));
                assert!(breakdown);
                assert!(!json);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn rejects_unknown_sex() {
        let parsed = Cli::try_parse_from(["donorcr", "predict", "--sex", "x"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn omitted_measurements_fall_back_to_config() {
        let config = CalculatorConfig::from_toml(
            "[defaults]\nbody_weight_kg = 70.0\nnon_excised_kidney_volume_ml = 130.0\nsex = \"female\"\n",
        )
        .unwrap();
        let args = MeasurementArgs {
            creatinine: Some(0.9),
            ..Default::default()
        };
        let input = args.resolve(&config);
        assert_eq!(input, PredictionInput::new(70.0, 0.9, 130.0, Sex::Female));
    }

    #[test]
    fn json_report_lists_all_sub_models() {
        let input = PredictionInput::new(60.0, 0.8, 120.0, Sex::Male);
        let b = Predictor::new().predict_breakdown(&input).unwrap();
        let value = serde_json::to_value(JsonReport::new(&input, &b)).unwrap();
        assert_eq!(value["sub_models"].as_array().unwrap().len(), 9);
        assert_eq!(value["formatted"], "1.28 mg/dL");
        assert_eq!(value["input"]["sex"], "male");
    }

    #[test]
    fn rejected_input_reports_field_as_json() {
        let input = PredictionInput::new(0.0, 0.8, 100.0, Sex::Male);
        let err = Predictor::new().predict_breakdown(&input).unwrap_err();

        let out = failure_output(&err, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["field"], "body weight");
        assert_eq!(value["error"], "body weight must be greater than zero");
        assert_ne!(EXIT_INVALID_INPUT, 0);
    }

    #[test]
    fn rejected_input_reports_message_as_text() {
        let input = PredictionInput::new(60.0, -1.0, 100.0, Sex::Male);
        let err = Predictor::new().predict_breakdown(&input).unwrap_err();
        assert_eq!(
            failure_output(&err, false).unwrap(),
            "An error occurred: creatinine must not be negative (got -1)"
        );
    }

    #[test]
    fn batch_command_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("donors.csv");
        let output = dir.path().join("out.csv");
        std::fs::write(
            &input,
            "body_weight_kg,creatinine_mg_dl,non_excised_kidney_volume_ml,sex\n60,0.8,120,male\n",
        )
        .unwrap();
        run_batch_cmd(&input, Some(&output)).unwrap();
        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
