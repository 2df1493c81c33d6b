//! orders2sql CLI - Convert a manufacturing orders CSV into a SQL script
//!
//! ```bash
//! orders2sql orders.csv                     # writes ./database.sql
//! orders2sql orders.csv -o schema.sql       # custom output path
//! orders2sql orders.csv --stdout            # print the script
//! orders2sql orders.csv --dialect mysql     # identity column syntax
//! ```
//!
//! Exit status: 0 on success, 1 when the conversion fails (nothing is
//! written), 2 on a usage error.

use clap::Parser;
use orders2sql::logs::log_error;
use orders2sql::{
    convert_file, convert_path, ConvertOptions, ConvertReport, Dialect, EmitOptions, LogFormat,
    DEFAULT_OUTPUT, DEFAULT_SEPARATOR, LOGGER,
};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orders2sql", version)]
#[command(about = "Convert a manufacturing orders CSV into a normalized SQL script", long_about = None)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Output SQL file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print the script to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Separator between module prefix and field name
    #[arg(short, long, default_value_t = DEFAULT_SEPARATOR)]
    separator: char,

    /// SQL dialect for identity columns
    #[arg(long, value_enum, default_value_t = Dialect::Postgres)]
    dialect: Dialect,

    /// Progress log format (written to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    // clap prints help/version with status 0 and usage errors with status 2
    let cli = Cli::try_parse().unwrap_or_else(|e| e.exit());
    LOGGER.configure(cli.log_format, cli.quiet);

    let result = run(cli);
    if let Err(e) = &result {
        log_error(format!("Error: {}", e));
    }
    std::process::exit(exit_code(&result));
}

/// Process status for a finished conversion.
fn exit_code<T>(result: &Result<T, Box<dyn Error>>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let options = ConvertOptions {
        delimiter: cli.delimiter,
        separator: cli.separator,
        emit: EmitOptions {
            dialect: cli.dialect,
        },
    };

    let report = if cli.stdout {
        let conversion = convert_path(&cli.input, &options)?;
        print!("{}", conversion.script.render());
        conversion.report
    } else {
        convert_file(&cli.input, &cli.output, &options)?
    };

    if !cli.quiet {
        print_summary(&report, cli.log_format)?;
    }

    Ok(())
}

fn print_summary(report: &ConvertReport, format: LogFormat) -> Result<(), Box<dyn Error>> {
    match format {
        LogFormat::Json => eprintln!("{}", serde_json::to_string(report)?),
        LogFormat::Text => {
            let modules: Vec<&str> = report.modules.iter().map(|m| m.as_str()).collect();
            eprintln!("\n📊 {} rows, {} tables", report.csv_info.row_count, report.create_tables);
            if !modules.is_empty() {
                eprintln!("   Modules: {}", modules.join(", "));
            }
            eprintln!("\n✨ Done!");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn cli(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("orders2sql").chain(args.iter().copied()))
    }

    #[test]
    fn test_usage_errors_exit_2() {
        assert_eq!(cli(&[]).err().map(|e| e.exit_code()), Some(2));
        assert_eq!(cli(&["a.csv", "b.csv"]).err().map(|e| e.exit_code()), Some(2));
        assert_eq!(cli(&["a.csv", "--dialect", "oracle"]).err().map(|e| e.exit_code()), Some(2));
        assert_eq!(cli(&["a.csv", "--stdout", "-o", "x.sql"]).err().map(|e| e.exit_code()), Some(2));
    }

    #[test]
    fn test_help_and_version_exit_0() {
        assert_eq!(cli(&["--help"]).err().map(|e| e.exit_code()), Some(0));
        assert_eq!(cli(&["--version"]).err().map(|e| e.exit_code()), Some(0));
    }

    #[test]
    fn test_defaults() {
        let parsed = cli(&["orders.csv"]).unwrap();

        assert_eq!(parsed.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(parsed.dialect, Dialect::Postgres);
        assert_eq!(parsed.separator, DEFAULT_SEPARATOR);
        assert!(parsed.delimiter.is_none());
    }

    #[test]
    fn test_missing_input_exits_1_without_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("missing.csv");
        let output = dir.path().join("out.sql");

        let parsed = cli(&["-q", input.to_str().unwrap(), "-o", output.to_str().unwrap()]).unwrap();
        let result = run(parsed);

        assert_eq!(exit_code(&result), 1);
        assert!(result.unwrap_err().to_string().contains("missing.csv"));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_header_exits_1() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("orders.csv");
        let output = dir.path().join("out.sql");
        fs::write(&input, "id,material_cost\nP1,3\n").unwrap();

        let parsed = cli(&["-q", input.to_str().unwrap(), "-o", output.to_str().unwrap()]).unwrap();

        assert_eq!(exit_code(&run(parsed)), 1);
        assert!(!output.exists());
    }

    #[test]
    fn test_successful_conversion_exits_0() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("orders.csv");
        let output = dir.path().join("out.sql");
        fs::write(&input, "id,order_id,material_cost,labor_cost,wing-labor_cost\nP1,O1,10,5,2\n").unwrap();

        let parsed = cli(&["-q", input.to_str().unwrap(), "-o", output.to_str().unwrap()]).unwrap();

        assert_eq!(exit_code(&run(parsed)), 0);
        let sql = fs::read_to_string(&output).unwrap();
        assert!(sql.starts_with("-- create product table\n"));
        assert!(sql.contains("INSERT INTO wing"));
    }
}
