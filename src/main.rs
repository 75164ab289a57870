// In: src/main.rs

//! The eigenpress command-line shell.
//!
//! All file I/O lives here; the library itself never touches the
//! filesystem. The shell reads one image, runs the byte-level compression
//! API, and writes the approximation next to the input as
//! `compressed_<name>` unless told otherwise.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use image::ImageFormat;

use eigenpress::{compress_image_bytes_as, EigenpressError, Fidelity, FidelityPreset};

const USAGE: &str = "\
usage: eigenpress <input> [options]

options:
  -o, --output <path>      output file (default: compressed_<input name>)
      --fidelity <f>       variance fraction, one of 0.8, 0.9, 0.95, 0.99
                           (default 0.95)
      --components <n>     retain exactly n components instead of a fraction
      --stats              print a JSON compression report to stdout";

struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    fidelity: Fidelity,
    print_stats: bool,
}

fn main() -> ExitCode {
    env_logger::init();

    let raw: Vec<String> = env::args().skip(1).collect();
    if raw.iter().any(|arg| arg == "-h" || arg == "--help") {
        println!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    let args = match parse_args(raw.into_iter()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("eigenpress: {message}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("eigenpress: error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), EigenpressError> {
    let bytes = fs::read(&args.input)?;
    let format = ImageFormat::from_path(&args.output).unwrap_or(ImageFormat::Png);
    let (encoded, stats) = compress_image_bytes_as(&bytes, &args.fidelity, format)?;
    fs::write(&args.output, &encoded)?;

    println!(
        "{} -> {} ({} -> {} bytes, {} of {} components retained)",
        args.input.display(),
        args.output.display(),
        stats.input_bytes,
        stats.output_bytes,
        stats.retained_components,
        stats.height.min(stats.width),
    );
    if args.print_stats {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}

//==================================================================================
// Argument Parsing
//==================================================================================

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<CliArgs, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut fidelity: Option<Fidelity> = None;
    let mut print_stats = false;

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let value = raw.next().ok_or("--output requires a path")?;
                output = Some(PathBuf::from(value));
            }
            "--fidelity" => {
                let value = raw.next().ok_or("--fidelity requires a value")?;
                set_once(&mut fidelity, parse_preset_fraction(&value)?)?;
            }
            "--components" => {
                let value = raw.next().ok_or("--components requires a count")?;
                let count: usize = value
                    .parse()
                    .map_err(|_| format!("unparseable component count {value:?}"))?;
                let parsed = Fidelity::components(count).map_err(|e| e.to_string())?;
                set_once(&mut fidelity, parsed)?;
            }
            "--stats" => print_stats = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown option {other:?}"));
            }
            _ => {
                if input.replace(PathBuf::from(&arg)).is_some() {
                    return Err(format!("unexpected extra argument {arg:?}"));
                }
            }
        }
    }

    let input = input.ok_or("missing input image path")?;
    let output = match output {
        Some(path) => path,
        None => default_output_path(&input)?,
    };
    Ok(CliArgs {
        input,
        output,
        fidelity: fidelity.unwrap_or_else(|| FidelityPreset::default().into()),
        print_stats,
    })
}

/// The CLI offers the enumerated preset fractions only; the `--components`
/// flag is the escape hatch for exact control.
fn parse_preset_fraction(value: &str) -> Result<Fidelity, String> {
    let fraction: f64 = value
        .parse()
        .map_err(|_| format!("unparseable fidelity {value:?}"))?;
    FidelityPreset::from_fraction(fraction)
        .map(Fidelity::from)
        .ok_or_else(|| format!("fidelity must be one of 0.8, 0.9, 0.95, 0.99, got {value}"))
}

fn set_once(slot: &mut Option<Fidelity>, value: Fidelity) -> Result<(), String> {
    if slot.replace(value).is_some() {
        return Err("give either --fidelity or --components, not both".to_string());
    }
    Ok(())
}

/// `compressed_<name>` next to the input, always with a lossless extension.
fn default_output_path(input: &std::path::Path) -> Result<PathBuf, String> {
    let name = input
        .file_name()
        .ok_or_else(|| format!("input path {input:?} has no file name"))?;
    let mut file_name = std::ffi::OsString::from("compressed_");
    file_name.push(name);
    let mut output = input.with_file_name(file_name);
    output.set_extension("png");
    Ok(output)
}
