//! SlotDB CLI
//!
//! Command-line front end: opens the database file, runs one verb, persists
//! after mutating verbs, and prints records as `id name email`.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use slotdb::ops::{self, Command, Output};
use slotdb::{Config, Connection, ImageFormat, OpenMode, Record, TextPolicy};
use tracing_subscriber::{fmt, EnvFilter};

/// SlotDB CLI
#[derive(Parser, Debug)]
#[command(name = "slotdb")]
#[command(about = "Fixed-record flat-file database")]
#[command(version)]
struct Args {
    /// Image format of the database file
    #[arg(short, long, value_enum, default_value = "framed")]
    format: FormatArg,

    /// Fail `set` on oversized text instead of truncating it
    #[arg(long)]
    reject_oversized: bool,

    /// Database file
    dbfile: PathBuf,

    #[command(subcommand)]
    action: Action,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    /// Header + records + CRC32 footer
    Framed,
    /// Headerless records only
    Raw,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Create (or wipe) the database file
    Create,

    /// Print one record
    Get {
        /// The id to get
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Fill a free slot
    Set {
        /// The id to set
        #[arg(allow_negative_numbers = true)]
        id: i64,

        /// Name to store
        name: OsString,

        /// Email to store
        email: OsString,
    },

    /// Free a slot
    Del {
        /// The id to delete
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },

    /// Print every occupied record
    List,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Get { .. } => "get",
            Action::Set { .. } => "set",
            Action::Del { .. } => "delete",
            Action::List => "list",
        }
    }

    /// Validate ids and build the library command
    fn into_command(self, max_rows: usize) -> slotdb::Result<Command> {
        Ok(match self {
            Action::Create => Command::Create,
            Action::Get { id } => Command::Get {
                id: ops::validate_id(id, max_rows)?,
            },
            Action::Set { id, name, email } => Command::Set {
                id: ops::validate_id(id, max_rows)?,
                name: text_arg("name", name),
                email: text_arg("email", email),
            },
            Action::Del { id } => Command::Delete {
                id: ops::validate_id(id, max_rows)?,
            },
            Action::List => Command::List,
        })
    }
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout only carries records
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,slotdb=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let verb = args.action.name();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {} failed: {}", verb, e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> slotdb::Result<()> {
    let config = Config::builder()
        .format(match args.format {
            FormatArg::Framed => ImageFormat::Framed,
            FormatArg::Raw => ImageFormat::Raw,
        })
        .text_policy(if args.reject_oversized {
            TextPolicy::Reject
        } else {
            TextPolicy::Truncate
        })
        .build();

    let mode = match args.action {
        Action::Create => OpenMode::Create,
        _ => OpenMode::Edit,
    };
    let command = args.action.into_command(config.max_rows)?;
    let mutating = command.is_mutating();

    let mut conn = Connection::open(&args.dbfile, mode, config)?;

    match ops::execute(&mut conn, command)? {
        Output::None => {}
        Output::Record(record) => print_record(&record),
        Output::Records(records) => records.iter().for_each(print_record),
    }

    if mutating {
        conn.persist()?;
    }

    conn.close();
    Ok(())
}

/// Argument text; bytes that are not UTF-8 become U+FFFD
fn text_arg(field: &'static str, arg: OsString) -> String {
    match arg.into_string() {
        Ok(text) => text,
        Err(raw) => {
            tracing::warn!(field, "argument is not valid UTF-8, invalid bytes replaced");
            raw.to_string_lossy().into_owned()
        }
    }
}

fn print_record(record: &Record) {
    println!("{} {} {}", record.id(), record.name(), record.email());
}
