mod codegen;
mod error;
mod fmt;
mod models;
mod parser;

use std::fs::File;
use std::io::{self, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use anyhow::Context;
use log::{debug, error, info};
use structopt::StructOpt;

use crate::codegen::{Config, Emit, UnnamedParams};
use crate::error::ConfigError;

#[derive(StructOpt)]
#[structopt(about = "Generates testify mocks from Go interface declarations")]
struct Opt {
    /// Go type declarations: interfaces, or structs with interface fields
    interface: String,

    /// The path of the generated file, not used if stdout is piped
    #[structopt(short, long, parse(from_os_str))]
    result: Option<PathBuf>,

    /// Output format: `go` for mock source, `json` for the parsed interfaces
    #[structopt(long, default_value = "go")]
    emit: Emit,

    /// Run the generated source through gofmt
    #[structopt(long)]
    gofmt: bool,

    /// Name unnamed parameters arg0, arg1, ... instead of reusing their type
    #[structopt(long)]
    positional_names: bool,
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", format!("{}=INFO", env!("CARGO_PKG_NAME")));
    }
    env_logger::init();

    let opts: Opt = Opt::from_args();
    info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    // The sink lives inside `run`, so it is flushed before we exit
    if let Err(e) = run(opts) {
        error!("{:#}", e);
        exit(1);
    }
}

fn run(opts: Opt) -> anyhow::Result<()> {
    let mut sink = open_sink(opts.result.as_deref(), io::stdout().is_terminal())?;

    let config = Config {
        unnamed: if opts.positional_names {
            UnnamedParams::Positional
        } else {
            UnnamedParams::TypeText
        },
    };

    let mut output = codegen::generate(&opts.interface, &config, opts.emit)?;
    if opts.gofmt && opts.emit == Emit::Go {
        debug!("Formatting output with gofmt");
        output = fmt::gofmt(&output)?;
    }

    sink.write_all(output.as_bytes()).context("Failed to write output")?;
    sink.flush().context("Failed to flush output")?;
    Ok(())
}

/// Picks the output destination: the `--result` file when stdout is a
/// terminal, stdout itself when it is piped or redirected.
fn open_sink(
    result: Option<&Path>,
    terminal: bool,
) -> anyhow::Result<BufWriter<Box<dyn Write>>> {
    if terminal {
        let path = result
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or(ConfigError::MissingResult)?;
        debug!("Writing to {:?}", path);
        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        return Ok(BufWriter::new(Box::new(file)));
    }

    debug!("stdout is piped, writing to it");
    Ok(BufWriter::new(Box::new(io::stdout())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_result(result: Option<&Path>) -> bool {
        match open_sink(result, true) {
            Ok(_) => false,
            Err(e) => matches!(e.downcast_ref::<ConfigError>(), Some(ConfigError::MissingResult)),
        }
    }

    #[test]
    fn terminal_without_result_is_a_config_error() {
        assert!(missing_result(None));
        assert!(missing_result(Some(Path::new(""))));
    }

    #[test]
    fn terminal_with_result_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mocks.go");
        {
            let mut sink = open_sink(Some(&path), true).unwrap();
            sink.write_all(b"package mocks\n").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "package mocks\n");
    }

    #[test]
    fn piped_stdout_needs_no_result() {
        assert!(open_sink(None, false).is_ok());
    }
}
