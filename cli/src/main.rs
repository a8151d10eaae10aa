use base64::{Engine, engine::general_purpose};
use clap::Parser;
use forensics::{
    artifacts::collection::AnalysisSummary,
    core::{parse_toml_data, parse_toml_file, regalyzer_analysis},
    error::TomlError,
    structs::toml::{Analysis, Output, RegalyzerToml},
};
use log::info;
use std::process::exit;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Root of a mounted Windows image
    #[clap(value_parser)]
    image_root: Option<String>,

    /// Full path to TOML config
    #[clap(short, long, value_parser)]
    toml: Option<String>,

    /// Base64 encoded TOML config
    #[clap(short, long, value_parser)]
    data: Option<String>,

    /// Directory for report files and the log file
    #[clap(short, long, value_parser)]
    output: Option<String>,

    /// Report format: json or jsonl
    #[clap(short, long, default_value = "json")]
    format: String,

    /// Pre-extracted `user:rid:lm:nt:::` hash file
    #[clap(long, value_parser)]
    hashes: Option<String>,

    /// Report to run. Can be repeated. All reports run by default
    #[clap(short, long = "report", value_parser)]
    reports: Vec<String>,

    /// Log level: error, warn, info or debug
    #[clap(short, long, value_parser)]
    log_level: Option<String>,
}

fn main() {
    let args = Args::parse();
    println!("[regalyzer] Starting regalyzer analysis!");

    let results = if let Some(toml) = &args.toml {
        parse_toml_file(toml)
    } else if let Some(data) = &args.data {
        let toml_data_results = general_purpose::STANDARD.decode(data);
        match toml_data_results {
            Ok(results) => parse_toml_data(&results),
            Err(err) => {
                println!("[regalyzer] Failed to base64 decode TOML config {data}, error: {err:?}");
                exit(2);
            }
        }
    } else if let Some(config) = args_config(&args) {
        regalyzer_analysis(&config)
    } else {
        println!("[regalyzer] No image root, TOML file or data provided!");
        exit(2);
    };

    let code = finish(&results);
    println!("[regalyzer] Finished regalyzer analysis!");
    exit(code);
}

/// Build the config from command line options when no TOML is provided
fn args_config(args: &Args) -> Option<RegalyzerToml> {
    let image_root = args.image_root.clone()?;
    let reports = if args.reports.is_empty() {
        None
    } else {
        Some(args.reports.clone())
    };

    Some(RegalyzerToml {
        output: Output {
            directory: args.output.clone(),
            format: args.format.clone(),
            logging: args.log_level.clone(),
        },
        analysis: Analysis {
            image_root,
            reports,
            hashes: args.hashes.clone(),
        },
    })
}

/// Print a line per report and pick the process exit code
fn finish(results: &Result<AnalysisSummary, TomlError>) -> i32 {
    let summary = match results {
        Ok(result) => result,
        Err(err) => {
            println!("[regalyzer] Analysis failed: {err}");
            return 1;
        }
    };

    for outcome in &summary.outcomes {
        match &outcome.result {
            Ok(report) => println!(
                "[regalyzer] {}: {} records, {} diagnostics",
                report.name,
                report.record_count,
                report.diagnostics.len()
            ),
            Err(err) => println!("[regalyzer] {}: did not run ({err})", outcome.kind.name()),
        }
    }
    info!("[regalyzer] Analysis success");
    0
}

#[cfg(test)]
mod tests {
    use super::{Args, args_config};
    use clap::Parser;

    #[test]
    fn test_args_config() {
        let args = Args::parse_from([
            "regalyzer",
            "/mnt/img",
            "--output",
            "./out",
            "-r",
            "network",
            "--report",
            "storage",
            "--log-level",
            "debug",
        ]);
        let config = args_config(&args).unwrap();
        assert_eq!(config.analysis.image_root, "/mnt/img");
        assert_eq!(
            config.analysis.reports,
            Some(vec![String::from("network"), String::from("storage")])
        );
        assert_eq!(config.output.format, "json");
        assert_eq!(config.output.logging.as_deref(), Some("debug"));
    }

    #[test]
    fn test_args_without_image() {
        let args = Args::parse_from(["regalyzer", "--toml", "regalyzer.toml"]);
        assert!(args_config(&args).is_none());
    }
}
