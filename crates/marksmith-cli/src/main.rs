use anyhow::{Context, Result};
use clap::Parser;
use marksmith_config::Config;
use marksmith_engine::{AstRenderer, Markdown, RenderOptions};
use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

/// Render markdown to HTML, or to a JSON syntax tree with `--ast`.
#[derive(Debug, Parser)]
#[command(name = "marksmith")]
#[command(version)]
struct Cli {
    /// Markdown file to render. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Print the syntax tree as pretty JSON instead of HTML
    #[arg(long)]
    ast: bool,

    /// Config file to use instead of ~/.config/marksmith/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Pass raw HTML through instead of escaping it
    #[arg(long)]
    no_escape: bool,

    /// Self-close void elements (<br />, <hr />, <img />)
    #[arg(long)]
    xhtml: bool,

    /// Turn every newline inside a paragraph into a line break
    #[arg(long)]
    hard_wrap: bool,
}

impl Cli {
    /// Render options from the config file, with flags taking precedence.
    fn options(&self, config: Option<Config>) -> RenderOptions {
        let mut options = config.map(RenderOptions::from).unwrap_or_default();
        if self.no_escape {
            options.escape = false;
        }
        if self.xhtml {
            options.use_xhtml = true;
        }
        if self.hard_wrap {
            options.hard_wrap = true;
        }
        options
    }

    fn load_config(&self) -> Result<Option<Config>> {
        let config_path = match &self.config {
            Some(path) => Config::expand_path(path),
            None => Config::config_path(),
        };
        log::debug!("Config path: {}", config_path.display());

        let config = Config::load_from_path(&config_path)?;
        if config.is_none() && self.config.is_some() {
            anyhow::bail!("Config file not found: {}", config_path.display());
        }
        Ok(config)
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn render(cli: &Cli, options: &RenderOptions, input: &str) -> Result<String> {
    if cli.ast {
        let markdown = Markdown::new(AstRenderer, options)?;
        let tree = markdown.render(input);
        let mut json = serde_json::to_string_pretty(&tree)?;
        json.push('\n');
        Ok(json)
    } else {
        Ok(Markdown::html(options)?.render(input))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let options = cli.options(cli.load_config()?);
    log::debug!("Render options: {options:?}");

    let input = read_input(cli.file.as_deref())?;
    let output = render(&cli, &options, &input)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
