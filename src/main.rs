use anyhow::{Context, anyhow};
use clap::{ArgAction, Parser, Subcommand};
use parts_inventory::config::Config;
use parts_inventory::handlers::{OutputFormat, PartChanges, PartHandler};
use parts_inventory::{PartDraft, PartLocalStorage};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "parts-inventory")]
#[command(bin_name = "parts-inventory")]
#[command(version, about, long_about = None)]
struct Opts {
    #[command(subcommand)]
    command: Command,

    /// Database file, overrides PARTS_DATABASE
    #[arg(long, global = true, value_name = "PATH")]
    database: Option<PathBuf>,

    /// More log output, repeat for trace
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help(true))]
enum Command {
    /// Create a new database file
    New {
        path: PathBuf,
    },
    /// Check that a database file exists and has a parts table
    Open {
        path: PathBuf,
    },
    /// Print every part
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print parts whose name, part number or description contains TERM
    Search {
        term: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a part
    #[command(allow_negative_numbers = true)]
    Add {
        #[arg(long)]
        name: String,

        /// Unique part number, e.g. 'B-100'
        #[arg(long, default_value = "")]
        part_number: String,

        #[arg(long)]
        quantity: i64,

        #[arg(long)]
        price: f64,

        #[arg(long, default_value = "")]
        supplier: String,

        #[arg(long, default_value = "")]
        description: String,
    },
    /// Change fields of a part; omitted fields keep their value
    #[command(allow_negative_numbers = true)]
    Edit {
        id: i64,

        #[arg(long)]
        name: Option<String>,

        /// New part number, an empty value removes it
        #[arg(long)]
        part_number: Option<String>,

        #[arg(long)]
        quantity: Option<i64>,

        #[arg(long)]
        price: Option<f64>,

        #[arg(long)]
        supplier: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a part
    Delete {
        id: i64,

        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Print a part as a tab separated clipboard line
    Copy {
        id: i64,
    },
    /// Add a part from a clipboard line, read from stdin when LINE is omitted
    Paste {
        line: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    let config = Config::from_env()?;

    configure_tracing(&config, opts.verbose, opts.quiet)?;
    debug!("{:?}", opts);

    let database_path = opts.database.unwrap_or(config.database_path);
    let handler = PartHandler::new(PartLocalStorage::new(&database_path));
    let mut stdout = io::stdout().lock();

    match opts.command {
        Command::New { path } => {
            PartLocalStorage::new(&path).create_database()?;
            writeln!(stdout, "Created {}", path.display())?;
        }
        Command::Open { path } => {
            let storage = PartLocalStorage::new(&path);
            storage.open_database()?;
            writeln!(stdout, "Opened {}, {} parts", path.display(), storage.count()?)?;
        }
        Command::List { json } => {
            handler.list(&mut stdout, output_format(json))?;
        }
        Command::Search { term, json } => {
            handler.search(&term, &mut stdout, output_format(json))?;
        }
        Command::Add {
            name,
            part_number,
            quantity,
            price,
            supplier,
            description,
        } => {
            let draft = PartDraft::new(name, part_number, quantity, price, supplier, description);
            let id = handler.add(&draft)?;
            writeln!(stdout, "Added part {}", id)?;
        }
        Command::Edit {
            id,
            name,
            part_number,
            quantity,
            price,
            supplier,
            description,
        } => {
            let changes = PartChanges {
                name,
                part_number,
                quantity,
                price,
                supplier,
                description,
            };
            let part = handler.edit(id, changes)?;
            writeln!(stdout, "Updated part {}", part.id)?;
        }
        Command::Delete { id, yes } => {
            handler.delete(id, yes)?;
            writeln!(stdout, "Deleted part {}", id)?;
        }
        Command::Copy { id } => {
            writeln!(stdout, "{}", handler.copy(id)?)?;
        }
        Command::Paste { line } => {
            let text = match line {
                Some(line) => line,
                None => {
                    let mut text = String::new();
                    io::stdin()
                        .read_to_string(&mut text)
                        .context("Reading clipboard line from stdin")?;
                    text
                }
            };
            let id = handler.paste(&text)?;
            writeln!(stdout, "Added part {}", id)?;
        }
    }

    debug!("Done. database: {}", database_path.display());
    Ok(())
}

fn output_format(json: bool) -> OutputFormat {
    if json { OutputFormat::Json } else { OutputFormat::Table }
}

fn configure_tracing(config: &Config, verbose: u8, quiet: bool) -> anyhow::Result<()> {
    let filter = match (quiet, verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::try_new(&config.log_filter)?,
        (false, 1) => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow!("setting default subscriber failed: {}", err))?;

    Ok(())
}
