//! uuidtool command-line entry point
//!
//! Parses arguments, dispatches to the library, prints results to stdout and errors to stderr,
//! and exits with non-zero status on failure.

use std::io::{self, BufWriter, Write};
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::Level;
use uuidtool::generator::{self, Fields};
use uuidtool::{input, time, Field, Order, Uuid};

const EPILOG: &str = "\
Some documentation about UUIDs:
- RFC 9562: https://datatracker.ietf.org/doc/html/rfc9562
- RFC 4122: https://datatracker.ietf.org/doc/html/rfc4122 (obsolete)
- UUIDv2: https://pubs.opengroup.org/onlinepubs/9696989899/chap5.htm#tagcjh_08_02_01_01";

/// UUIDTool - A tool to manipulate UUIDs
#[derive(Parser, Debug)]
#[command(name = "uuidtool")]
#[command(version, about, long_about = None, after_help = EPILOG)]
struct Cli {
    /// Log defaulted fields and computed bounds to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Display information about a UUID
    Info {
        /// UUID to display information about
        uuid: Uuid,
    },

    /// Edit the fields of a UUID, keeping its version
    Edit {
        /// UUID to edit
        uuid: Uuid,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Generate a new UUID
    New {
        /// UUID version (1 to 8)
        #[arg(short, long, default_value_t = 4)]
        version: u8,

        #[command(flatten)]
        fields: FieldArgs,

        /// Name for UUID v3 or v5
        #[arg(long)]
        name: Option<String>,

        /// Namespace for UUID v3 or v5 (a UUID, or one of @dns, @url, @oid, @x500)
        #[arg(long)]
        namespace: Option<String>,
    },

    /// Print UUIDs whose timestamp is close to the timestamp of a given UUID
    Range {
        /// UUID to center the range on
        uuid: Uuid,

        /// Number of UUIDs to generate
        count: u64,

        /// Sort mode for the UUID range (asc, desc or alt)
        #[arg(short, long, default_value_t = Order::Alt)]
        sort: Order,
    },

    /// Print all UUIDs whose timestamp is between those of the two given UUIDs
    Sandwich {
        /// First UUID, whose other fields are copied
        uuid1: Uuid,

        /// Second UUID
        uuid2: Uuid,

        /// Sort mode for the UUID range (asc, desc or alt)
        #[arg(short, long, default_value_t = Order::Alt)]
        sort: Order,
    },
}

/// Field values shared by `edit` and `new`
#[derive(Args, Debug)]
struct FieldArgs {
    /// Time for UUID v1, v2, v6 or v7 (ISO 8601 read as UTC when it has no offset, or seconds /
    /// nanoseconds since the Unix epoch)
    #[arg(short, long)]
    time: Option<String>,

    /// Clock sequence for UUID v1, v2 or v6
    #[arg(short, long)]
    clock_sequence: Option<String>,

    /// Node (MAC address, hex) for UUID v1, v2 or v6
    #[arg(short, long)]
    node: Option<String>,

    /// Local ID for UUID v2
    #[arg(long)]
    local_id: Option<String>,

    /// Local domain for UUID v2 (0 person, 1 group, 2 org)
    #[arg(long)]
    local_domain: Option<String>,

    /// Custom field A (hex, 48 bits) for UUID v8
    #[arg(long)]
    custom_a: Option<String>,

    /// Custom field B (hex, 12 bits) for UUID v8
    #[arg(long)]
    custom_b: Option<String>,

    /// Custom field C (hex, 62 bits) for UUID v8
    #[arg(long)]
    custom_c: Option<String>,
}

impl FieldArgs {
    fn to_fields(&self) -> uuidtool::Result<Fields> {
        let decimal = |field, value: &Option<String>| {
            value
                .as_deref()
                .map(|v| input::parse_decimal(field, v))
                .transpose()
        };
        let hex = |field, value: &Option<String>| {
            value
                .as_deref()
                .map(|v| input::parse_hex(field, v))
                .transpose()
        };

        Ok(Fields {
            time: self.time.as_deref().map(time::parse_time).transpose()?,
            clock_sequence: decimal(Field::ClockSequence, &self.clock_sequence)?,
            node: hex(Field::Node, &self.node)?,
            local_id: decimal(Field::LocalId, &self.local_id)?,
            local_domain: decimal(Field::LocalDomain, &self.local_domain)?,
            custom_a: hex(Field::CustomA, &self.custom_a)?,
            custom_b: hex(Field::CustomB, &self.custom_b)?,
            custom_c: hex(Field::CustomC, &self.custom_c)?,
            ..Default::default()
        })
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Info { uuid } => println!("{}", uuidtool::info(uuid)),
        Command::Edit { uuid, fields } => {
            println!("{}", uuidtool::edit(uuid, &fields.to_fields()?)?);
        }
        Command::New {
            version,
            fields,
            name,
            namespace,
        } => {
            let fields = Fields {
                namespace: namespace
                    .as_deref()
                    .map(generator::resolve_namespace)
                    .transpose()?,
                name,
                ..fields.to_fields()?
            };
            println!("{}", uuidtool::new_uuid(version, &fields)?);
        }
        Command::Range { uuid, count, sort } => {
            print_all(uuidtool::range(uuid, count, sort)?)?;
        }
        Command::Sandwich { uuid1, uuid2, sort } => {
            print_all(uuidtool::sandwich(uuid1, uuid2, sort)?)?;
        }
    }
    Ok(())
}

/// Prints one UUID per line, stopping quietly if the reader goes away.
fn print_all(uuids: impl Iterator<Item = Uuid>) -> io::Result<()> {
    match write_lines(uuids) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

fn write_lines(uuids: impl Iterator<Item = Uuid>) -> io::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    for uuid in uuids {
        writeln!(out, "{}", uuid)?;
    }
    out.flush()
}
