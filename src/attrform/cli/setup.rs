use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "attrform", bin_name = "attrform", version)]
#[command(about = "Build display forms from a file's typed attributes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the form for a file
    Show {
        /// File (or, with --dump, attribute dump) to read
        path: PathBuf,

        /// Read attributes from a JSON dump instead of extended attributes
        #[arg(long)]
        dump: bool,

        /// Use this type instead of the file's own
        #[arg(short = 't', long = "type", value_name = "TYPE")]
        type_id: Option<String>,

        /// Print the form as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the merged attribute schema for a type
    Schema {
        /// Type identifier, e.g. text/x-person
        #[arg(value_name = "TYPE")]
        type_id: String,

        /// Print the schema as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration
    Config,
}
