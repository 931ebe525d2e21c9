use clap::{ArgAction, ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rInvoicer
/// CLI assistant for attendance timesheets, monthly invoices and Telegram delivery
#[derive(Parser)]
#[command(
    name = "rinvoicer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Log attendance in monthly timesheets, build invoices and send them via Telegram",
    long_about = None
)]
pub struct Cli {
    /// Override the work directory holding timesheets and invoices
    #[arg(global = true, long = "dir", value_name = "DIR")]
    pub dir: Option<String>,

    /// Increase diagnostic output (-v, -vv, -vvv)
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration directory, config file and profile
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// View or update the profile used for invoices
    Profile {
        #[arg(long = "print", help = "Print the stored profile")]
        print: bool,

        #[arg(long = "set-name", value_name = "NAME")]
        name: Option<String>,

        #[arg(long = "set-employee-id", value_name = "ID")]
        employee_id: Option<String>,

        #[arg(long = "set-department", value_name = "DEPT")]
        department: Option<String>,

        #[arg(long = "set-rate", value_name = "AMOUNT", help = "Daily pay rate")]
        rate: Option<f64>,

        #[arg(
            long = "set-opening-leaves",
            value_name = "N",
            allow_negative_numbers = true,
            help = "Leave balance before the first invoiced month"
        )]
        opening_leaves: Option<i32>,
    },

    /// Show timesheet rows
    #[command(group(ArgGroup::new("source").args(["month", "file"])))]
    Show {
        #[arg(long, short, help = "Month to show (YYYY-MM, name or number); default: current")]
        month: Option<String>,

        #[arg(long, value_name = "FILE", help = "Explicit timesheet file (.xlsx or .csv)")]
        file: Option<String>,

        #[arg(
            long,
            short,
            help = "Filter by today, week, month, YYYY-MM-DD, YYYY-MM, YYYY or START:END"
        )]
        period: Option<String>,

        #[arg(long = "summary", help = "Show per-status counts")]
        summary: bool,
    },

    /// Add or update the row for a date
    Mark {
        /// Date of the row (YYYY-MM-DD)
        date: String,

        /// Status code: P, HL, L, WO, H
        status: String,

        /// Short remarks (up to five words)
        remarks: Vec<String>,

        #[arg(long, value_name = "FILE", help = "Timesheet file; default: timesheet_<month>.xlsx")]
        file: Option<String>,
    },

    /// Generate the monthly invoice, or write one from a JSON data file
    Invoice {
        #[arg(long, short, conflicts_with = "data")]
        month: Option<String>,

        #[arg(
            long = "date",
            value_name = "YYYY-MM-DD",
            help = "Issue date printed on the invoice; default: today"
        )]
        issue_date: Option<String>,

        #[arg(long, value_name = "JSON_FILE", requires = "file", help = "Invoice data as JSON")]
        data: Option<String>,

        #[arg(long, value_name = "OUT", help = "Output document name (with --data)")]
        file: Option<String>,
    },

    /// Send the month's timesheet and invoice to the Telegram chat
    Send {
        #[arg(long, short)]
        month: Option<String>,

        #[arg(long, value_name = "FILE")]
        xlsx: Option<String>,

        #[arg(long, value_name = "FILE")]
        docx: Option<String>,
    },

    /// Run a named tool with JSON arguments
    Tool {
        name: String,

        #[arg(long, value_name = "JSON", default_value = "{}")]
        args: String,
    },

    /// List the available tools with their parameter schemas
    Tools,
}
