use anyhow::Result;
use log::{debug, warn};
use pt_asset::{pack, utils};
use std::{fs, io, path::Path};
use structopt::StructOpt;
use walkdir::WalkDir;

// Cli arguments
#[derive(StructOpt, Debug)]
#[structopt(name = "pt_asset")]
struct CliArgs {
    /// Scene manifest, or a folder searched for `.toml` manifests
    input: String,
    /// Output directory, to place the packed scenes in
    #[structopt(short = "o", long = "output")]
    output: String,
    /// Output debug info
    #[structopt(short = "v", long = "verbose")]
    verbose: bool,
    /// Print the packed textures as tables
    #[structopt(long = "print")]
    print: bool,
}

/// Happens during setup
#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("Input does not exist: {0}")]
    InputNonExistant(String),
    #[error("Output folder could not be created: {0}")]
    ErrorCreatingOutputFolder(#[from] io::Error),
}

fn main() -> Result<()> {
    let args = CliArgs::from_args();

    if !args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    } else {
        env_logger::Builder::new()
            .filter(None, log::LevelFilter::Debug)
            .init();
    }

    prepare(args)
}

fn prepare(args: CliArgs) -> Result<()> {
    let output_path = Path::new(&args.output);
    let input_path = Path::new(&args.input);
    if !input_path.exists() {
        return Err(CliError::InputNonExistant(input_path.display().to_string()).into());
    }

    if !output_path.exists() {
        fs::create_dir_all(output_path).map_err(CliError::ErrorCreatingOutputFolder)?;
    }

    if input_path.is_file() {
        pack::process(input_path, output_path, args.print)?;
        return Ok(());
    }

    for entry in WalkDir::new(input_path).sort_by_file_name() {
        let path = match &entry {
            Err(err) => {
                warn!("Error parsing path: {}", err);
                continue;
            }
            Ok(entry) => entry.path(),
        };

        if path.is_dir() {
            continue;
        }

        if utils::has_extension(path, "toml") {
            pack::process(path, output_path, args.print)?;
        } else {
            debug!("Ignored file: {}", path.display());
        }
    }

    Ok(())
}
