use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use clap_mangen::Man;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

use devindex::config::{Config, PageConfig};
use devindex::core::index::IndexGenerator;
use devindex::core::render::CGI_HEADER;
use devindex::logging::create_subscriber;
use devindex::symbols::*;

#[derive(Parser)]
#[command(name = "devindex")]
#[command(about = "A CLI utility to render the coverage, statistics and test log index page")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (overrides config file)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum)]
    completions: Option<Shell>,

    /// Generate man page
    #[arg(long)]
    man: bool,

    /// Show detailed information about the tool
    #[arg(long)]
    info: bool,

    /// Print the JSON schema of the config file
    #[arg(long)]
    schema: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the index page (default command)
    Render {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Write the page to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Embed entry names without HTML escaping
        #[arg(long)]
        no_escape: bool,

        /// Prefix the page with a CGI header block
        #[arg(long, conflicts_with = "output")]
        cgi: bool,
    },
    /// List the entries that would be indexed
    List {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Print the entries as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
struct SelectionArgs {
    /// Directory to index (overrides config file)
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Glob pattern selecting the entries (overrides config file)
    #[arg(short, long)]
    pattern: Option<String>,
}

impl SelectionArgs {
    /// CLI values take precedence over the config file
    fn apply(self, config: &mut Config) {
        if let Some(dir) = self.dir {
            config.directory = Some(dir);
        }
        if let Some(pattern) = self.pattern {
            config.pattern = Some(pattern);
        }
    }
}

fn print_info() {
    println!(
        "{SYMBOL_TOOL_CONFIG} devindex v{}",
        env!("CARGO_PKG_VERSION")
    );
    println!("{SYMBOL_DOC_NOTE} {}", env!("CARGO_PKG_DESCRIPTION"));
    println!(
        "{SYMBOL_SCOPE_GLOBAL} Repository: {}",
        env!("CARGO_PKG_REPOSITORY")
    );
    println!("{SYMBOL_CONTENT_FILE} License: {}", env!("CARGO_PKG_LICENSE"));
    println!("{SYMBOL_DOC_TAG}  Keywords: coverage, html, index, test-results, cli");
    println!();
    println!("{SYMBOL_ACTION_LAUNCH} Usage:");
    println!("   devindex render [OPTIONS]  # Print the index page");
    println!("   devindex list [OPTIONS]    # List the indexed entries");
    println!("   Use --help for detailed options");
    println!();
    println!("{SYMBOL_TOOL_CONFIG} Shell Completions:");
    println!("   devindex --completions bash > /usr/local/etc/bash_completion.d/devindex");
    println!("   devindex --completions zsh > ~/.zfunc/_devindex");
    println!();
    println!("{SYMBOL_DOC_BOOK} Man Page:");
    println!("   devindex --man > /usr/local/share/man/man1/devindex.1");
}

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Instant::now();
    let args = Args::parse();

    // Handle --completions flag early
    if let Some(shell) = args.completions {
        let mut app = Args::command();
        generate(shell, &mut app, "devindex", &mut io::stdout());
        return Ok(());
    }

    // Handle --man flag early
    if args.man {
        let app = Args::command();
        let man = Man::new(app);
        man.render(&mut io::stdout())?;
        return Ok(());
    }

    if args.info {
        print_info();
        return Ok(());
    }

    if args.schema {
        println!("{}", Config::json_schema()?);
        return Ok(());
    }

    // Load configuration
    let config = if let Some(config_path) = &args.config {
        Config::load_from_file(config_path).await?
    } else {
        Config::load().await?
    };

    // Determine verbose setting
    let verbose = args.verbose || config.is_verbose_default();
    let time_format = config.get_time_format();

    // Initialize logging
    let subscriber = create_subscriber(verbose, &time_format)?;
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set default subscriber")?;

    if let Some(config_path) = &args.config {
        info!(
            "{SYMBOL_INDICATOR_INFO} Using custom config file: {}",
            config_path.display()
        );
    }

    let result = match args.command {
        Some(Commands::Render {
            selection,
            output,
            no_escape,
            cgi,
        }) => {
            handle_render_command(selection, output, no_escape, cgi, config, start_time).await
        }
        Some(Commands::List { selection, json }) => handle_list_command(selection, json, config),
        // Default behavior: render the index of the configured directory
        None => {
            handle_render_command(
                SelectionArgs::default(),
                None,
                false,
                false,
                config,
                start_time,
            )
            .await
        }
    };

    if let Err(e) = result {
        error!("{SYMBOL_INDICATOR_ERROR} {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Build the generator for the effective settings
fn build_generator(
    selection: SelectionArgs,
    no_escape: bool,
    mut config: Config,
) -> Result<IndexGenerator> {
    selection.apply(&mut config);
    if no_escape {
        config
            .page
            .get_or_insert_with(PageConfig::default)
            .escape_names = Some(false);
    }

    IndexGenerator::from_config(&config)
}

async fn handle_render_command(
    selection: SelectionArgs,
    output: Option<PathBuf>,
    no_escape: bool,
    cgi: bool,
    config: Config,
    start_time: Instant,
) -> Result<()> {
    let generator = build_generator(selection, no_escape, config)?;

    match output {
        Some(path) => {
            let written = generator.generate_to_file(&path).await?;
            info!(
                "{SYMBOL_INDICATOR_SUCCESS} Index page written to {} ({} bytes)",
                path.display(),
                written
            );
        }
        None => {
            let page = generator.generate()?;
            let mut stdout = io::stdout().lock();
            if cgi {
                stdout.write_all(CGI_HEADER.as_bytes())?;
            }
            stdout
                .write_all(page.as_bytes())
                .context("Failed to write index page to stdout")?;
            stdout.flush()?;
        }
    }

    info!(
        "{SYMBOL_EXPERIENCE_TIME}  Execution time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn handle_list_command(selection: SelectionArgs, json: bool, config: Config) -> Result<()> {
    let generator = build_generator(selection, false, config)?;
    let entries = generator.entries()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        info!(
            "No entries matching '{}' in {}",
            generator.lister().pattern(),
            generator.lister().directory().display()
        );
    }
    for entry in entries {
        println!("{}", entry.name);
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main/mod.rs"]
mod tests;
