use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use stocksheet::api::ItemInput;
use stocksheet::query::StatusFilter;

#[derive(Parser, Debug)]
#[command(name = "stocksheet")]
#[command(version, about = "Daily stock sheet for the canteen", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the sheet (defaults to the user data directory)
    #[arg(long, global = true, env = "STOCKSHEET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items, optionally searched and filtered by status
    #[command(alias = "ls")]
    List {
        /// Search name, category, unit, status and remarks
        #[arg(short, long)]
        search: Option<String>,

        /// ALL, OK, Reorder or "Out of Stock"
        #[arg(short = 'f', long = "status", default_value = "ALL")]
        status: StatusFilter,
    },

    /// Add an item
    #[command(alias = "n")]
    Add {
        #[command(flatten)]
        fields: ItemFields,
    },

    /// Edit an item; only the given fields change
    #[command(alias = "e")]
    Edit {
        /// Item id
        id: String,

        #[command(flatten)]
        fields: ItemFields,
    },

    /// Show one item in full
    #[command(alias = "v")]
    Show {
        /// Item id
        id: String,
    },

    /// Delete an item
    #[command(alias = "rm")]
    Delete {
        /// Item id
        id: String,
    },

    /// Export the whole sheet as CSV
    Export {
        /// Directory to write the file to (defaults to the configured export dir)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the CSV instead of writing a file
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },

    /// Show or set the report date (YYYY-MM-DD)
    Date {
        value: Option<String>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (export-dir, default-category, default-unit)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct ItemFields {
    /// Item name
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub unit: Option<String>,

    /// Opening stock
    #[arg(long, allow_hyphen_values = true)]
    pub opening: Option<String>,

    /// Stock received
    #[arg(long = "in", allow_hyphen_values = true)]
    pub stock_in: Option<String>,

    /// Stock dispensed
    #[arg(long = "out", allow_hyphen_values = true)]
    pub stock_out: Option<String>,

    /// Reorder level (0 disables the Reorder status)
    #[arg(long, allow_hyphen_values = true)]
    pub reorder: Option<String>,

    #[arg(long)]
    pub remarks: Option<String>,
}

impl From<ItemFields> for ItemInput {
    fn from(fields: ItemFields) -> Self {
        ItemInput {
            id: None,
            name: fields.name,
            category: fields.category,
            unit: fields.unit,
            opening: fields.opening,
            stock_in: fields.stock_in,
            stock_out: fields.stock_out,
            reorder: fields.reorder,
            remarks: fields.remarks,
        }
    }
}
