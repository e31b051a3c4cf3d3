//! Command-line argument parsing
//!
//! Supports:
//! - `show`: print the outline of a file
//! - `at`: list the nodes starting at a line
//! - `focus`: reveal the node at a line and print the expansion changes
//! - `watch`: reprint the outline whenever the file changes
//! - `config`: print the config and log locations and the settings in effect

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::OutlineConfig;

/// Outline of documentation comments above declarations
#[derive(Parser, Debug)]
#[command(
    name = "docoutline",
    version,
    about = "Outline of documentation comments above declarations"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print the outline of FILE
    Show {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        build: BuildArgs,
        /// Print nested JSON instead of tree text
        #[arg(long)]
        json: bool,
    },
    /// List every outline node starting at LINE, innermost marked
    At {
        #[command(flatten)]
        source: SourceArgs,
        /// 1-based line number
        #[arg(value_name = "LINE")]
        line: usize,
        /// Print nested JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Reveal the node at or before LINE and print the expansion changes
    Focus {
        #[command(flatten)]
        source: SourceArgs,
        /// 1-based line number
        #[arg(value_name = "LINE")]
        line: usize,
        /// Initial expansion depth before focusing
        #[arg(long, value_name = "N")]
        depth: Option<usize>,
    },
    /// Reprint the outline every time FILE changes
    Watch {
        #[command(flatten)]
        source: SourceArgs,
        /// Keep only documented declarations
        #[arg(long)]
        only_documented: bool,
        /// Print tag lines under each node
        #[arg(long)]
        tags: bool,
        /// Prefix each row with its kind tag
        #[arg(long)]
        kinds: bool,
    },
    /// Print the config and log file locations and the settings in effect
    Config {
        /// Write the settings in effect to the config file
        #[arg(long)]
        write: bool,
    },
}

/// Where the text and the symbols come from
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Source file to outline
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Read symbols from a JSON file instead of parsing FILE
    #[arg(long, value_name = "JSON")]
    pub symbols: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Keep only documented declarations
    #[arg(long)]
    pub only_documented: bool,

    /// Initial expansion depth; collapsed nodes are shown with `+`
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Print tag lines under each node
    #[arg(long)]
    pub tags: bool,

    /// Prefix each row with its kind tag
    #[arg(long)]
    pub kinds: bool,
}

/// What to do once the outline is built
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    Show { json: bool },
    /// `line` is 0-indexed
    At { line: usize, json: bool },
    /// `line` is 0-indexed
    Focus { line: usize },
    Watch,
}

/// Config-file values the command line overrides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub only_documented: Option<bool>,
    pub expand_depth: Option<usize>,
    pub show_tooltips: Option<bool>,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut OutlineConfig) {
        if let Some(v) = self.only_documented {
            config.only_documented = v;
        }
        if let Some(v) = self.expand_depth {
            config.expand_depth = v;
        }
        if let Some(v) = self.show_tooltips {
            config.show_tooltips = v;
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: RunMode,
    pub file: PathBuf,
    pub symbols: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    /// Render with `+`/`-` markers and hide collapsed children
    pub show_expansion: bool,
    /// Prefix tree rows with kind tags
    pub show_kinds: bool,
}

/// Flags only override the config file when given
fn flag(set: bool) -> Option<bool> {
    set.then_some(true)
}

/// Convert from 1-indexed (user input) to 0-indexed (internal)
fn zero_based(line: usize) -> Result<usize, String> {
    line.checked_sub(1)
        .ok_or_else(|| "LINE is 1-based; 0 is not a valid line".to_string())
}

impl CliArgs {
    /// `Some(write)` for the `config` subcommand, which outlines no file
    pub fn config_request(&self) -> Option<bool> {
        match self.command {
            CliCommand::Config { write } => Some(write),
            _ => None,
        }
    }

    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let config = match self.command {
            CliCommand::Show {
                source,
                build,
                json,
            } => {
                if json && build.depth.is_some() {
                    return Err("--depth has no effect with --json".to_string());
                }
                if json && build.kinds {
                    return Err("--kinds has no effect with --json".to_string());
                }
                RunConfig {
                    mode: RunMode::Show { json },
                    file: source.file,
                    symbols: source.symbols,
                    show_expansion: build.depth.is_some(),
                    show_kinds: build.kinds,
                    overrides: ConfigOverrides {
                        only_documented: flag(build.only_documented),
                        expand_depth: build.depth,
                        show_tooltips: flag(build.tags),
                    },
                }
            }
            CliCommand::At { source, line, json } => RunConfig {
                mode: RunMode::At {
                    line: zero_based(line)?,
                    json,
                },
                file: source.file,
                symbols: source.symbols,
                show_expansion: false,
                show_kinds: false,
                overrides: ConfigOverrides::default(),
            },
            CliCommand::Focus {
                source,
                line,
                depth,
            } => RunConfig {
                mode: RunMode::Focus {
                    line: zero_based(line)?,
                },
                file: source.file,
                symbols: source.symbols,
                show_expansion: true,
                show_kinds: false,
                overrides: ConfigOverrides {
                    expand_depth: depth,
                    ..ConfigOverrides::default()
                },
            },
            CliCommand::Watch {
                source,
                only_documented,
                tags,
                kinds,
            } => RunConfig {
                mode: RunMode::Watch,
                file: source.file,
                symbols: source.symbols,
                show_expansion: false,
                show_kinds: kinds,
                overrides: ConfigOverrides {
                    only_documented: flag(only_documented),
                    show_tooltips: flag(tags),
                    ..ConfigOverrides::default()
                },
            },
            CliCommand::Config { .. } => {
                return Err("`config` does not outline a file".to_string());
            }
        };
        Ok(config)
    }
}
