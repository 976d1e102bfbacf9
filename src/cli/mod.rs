use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser};
use clap_complete::Shell;

use crate::config::{resolve_config, ConfigOverrides};
use crate::error::{ModgraphError, Result};
use crate::pipeline::{generate, Report};
use crate::util::{logging, output};

#[derive(Parser, Debug)]
#[command(name = "modgraph")]
#[command(
    about = "Render a module dependency graph as a transitively reduced Mermaid flowchart",
    long_about = None
)]
pub struct Cli {
    /// Module path prefix to keep and strip, e.g. `github.com/acme/`
    #[arg(short, long, env = "MODGRAPH_PREFIX")]
    pub prefix: Option<String>,
    /// TOML file with default settings
    #[arg(short, long, env = "MODGRAPH_CONFIG")]
    pub config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// URL scheme for click links
    #[arg(long)]
    pub link_scheme: Option<String>,
    #[arg(long)]
    pub no_color: bool,
    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
    /// Dependency graph dump, one `module@version dep@version` pair per line.
    /// Reads stdin when absent or `-`.
    pub input: Option<PathBuf>,
}

pub fn run() {
    let cli = Cli::parse();
    if cli.no_color {
        output::disable_colors();
    }
    if let Err(err) = dispatch(cli) {
        output::error(&err.to_string());
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    if let Some(shell) = cli.completions {
        let mut command = Cli::command();
        clap_complete::generate(shell, &mut command, "modgraph", &mut io::stdout());
        return Ok(());
    }

    let config = resolve_config(ConfigOverrides {
        prefix: cli.prefix,
        config_path: cli.config,
        verbose: cli.verbose,
        link_scheme: cli.link_scheme,
    })?;
    logging::init_tracing(config.verbosity, !cli.no_color);

    let report = match input_path(cli.input.as_deref()) {
        Some(path) => {
            let file = File::open(path).map_err(ModgraphError::Input)?;
            generate(BufReader::new(file), &config)?
        }
        None => generate(io::stdin().lock(), &config)?,
    };
    write_report(&report)
}

fn input_path(input: Option<&Path>) -> Option<&Path> {
    input.filter(|path| *path != Path::new("-"))
}

fn write_report(report: &Report) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(report.diagram.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use clap::{CommandFactory, Parser};

    use crate::cli::{input_path, Cli};

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags_and_input() {
        let cli = Cli::try_parse_from([
            "modgraph",
            "--prefix",
            "github.com/acme/",
            "-vv",
            "--link-scheme",
            "http",
            "graph.txt",
        ])
        .expect("parse");
        assert_eq!(cli.prefix.as_deref(), Some("github.com/acme/"));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.link_scheme.as_deref(), Some("http"));
        assert_eq!(cli.input, Some(PathBuf::from("graph.txt")));
    }

    #[test]
    fn dash_means_stdin() {
        assert_eq!(input_path(Some(Path::new("-"))), None);
        assert_eq!(input_path(None), None);
        assert_eq!(
            input_path(Some(Path::new("deps.txt"))),
            Some(Path::new("deps.txt"))
        );
    }
}
