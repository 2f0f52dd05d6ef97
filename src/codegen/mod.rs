use std::str::FromStr;

use log::debug;

use crate::error::GenError;
use crate::models::GeneratedUnit;
use crate::parser;

pub mod assemble;
pub mod namer;
pub mod render;
pub mod signature;

pub use signature::UnnamedParams;

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub unnamed: UnnamedParams,
}

/// What `generate` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    /// testify mock source
    #[default]
    Go,
    /// The parsed interfaces as JSON
    Json,
}

impl FromStr for Emit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "go" => Ok(Self::Go),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format {:?}, expected go or json", s)),
        }
    }
}

/// Parses `input` and collects every interface to mock.
pub fn build_unit(input: &str, config: &Config) -> Result<GeneratedUnit, GenError> {
    let file = parser::parse_fragment(input)?;
    debug!("Parsed package {} with {} declaration(s)", file.package.name, file.decls.len());
    let interfaces = parser::interfaces(&file)
        .iter()
        .map(|found| signature::interface_decl(found, config.unnamed))
        .collect::<Vec<_>>();
    debug!("Found {} interface(s)", interfaces.len());
    Ok(GeneratedUnit { interfaces })
}

/// Renders a unit into mock source.
pub fn render_unit(unit: &GeneratedUnit) -> Result<String, GenError> {
    let mocks = unit
        .interfaces
        .iter()
        .map(assemble::assemble)
        .collect::<Vec<_>>();
    let mut out = String::new();
    render::render(&mocks, &mut out)?;
    Ok(out)
}

/// Runs the whole pipeline. Nothing is returned unless every step succeeded.
pub fn generate(input: &str, config: &Config, emit: Emit) -> Result<String, GenError> {
    let unit = build_unit(input, config)?;
    match emit {
        Emit::Go => render_unit(&unit),
        Emit::Json => {
            let mut json = serde_json::to_string_pretty(&unit)?;
            json.push('\n');
            Ok(json)
        }
    }
}
