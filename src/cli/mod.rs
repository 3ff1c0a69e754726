//! `iup-admin` command line: list screens, forms and viewers as subcommands.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand, ValueEnum};

/// Business administration client for islands, territories, IUPs and quotations.
#[derive(Parser, Debug)]
#[command(name = "iup-admin", version, about = "Business administration CLI")]
pub struct Cli {
    /// Print raw JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the token
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// List one page of a resource
    List {
        resource: ResourceKind,
        #[arg(long, default_value_t = 1)]
        page: i64,
        /// Page size (default from DEFAULT_PAGE_SIZE)
        #[arg(long)]
        limit: Option<i64>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Extra filter as key=value, repeatable
        #[arg(long = "filter", short = 'f', value_parser = parse_key_value)]
        filters: Vec<(String, String)>,
    },

    /// Show one record
    Get { resource: ResourceKind, id: String },

    /// Create a record from a JSON body
    Create {
        resource: ResourceKind,
        #[arg(long = "json", conflicts_with = "file")]
        json_body: Option<String>,
        #[arg(long, short = 'F')]
        file: Option<String>,
    },

    /// Update a record from a JSON body
    Update {
        resource: ResourceKind,
        id: String,
        #[arg(long = "json", conflicts_with = "file")]
        json_body: Option<String>,
        #[arg(long, short = 'F')]
        file: Option<String>,
    },

    /// Delete a record
    Delete { resource: ResourceKind, id: String },

    /// Show the territory tree
    Territory {
        #[arg(long)]
        island_id: Option<String>,
        #[arg(long)]
        search: Option<String>,
        /// Node to expand as <type>:<id>, repeatable
        #[arg(long = "expand", short = 'e')]
        expand: Vec<String>,
        #[arg(long)]
        expand_all: bool,
    },

    /// Generate the printable PDF of a quotation
    QuotationPdf {
        id: String,
        /// Output directory (default from PDF_OUTPUT_DIR)
        #[arg(long)]
        out: Option<String>,
    },

    /// Show recorded locations and a route summary
    Track {
        #[arg(long)]
        user_id: Option<String>,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<chrono::NaiveDate>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Island,
    Brand,
    Iup,
    Group,
    Area,
    IupZone,
    IupSegmentation,
    Quotation,
    Product,
    TermCondition,
}

impl ResourceKind {
    /// Id and display-name fields used as the leading table columns
    pub fn key_fields(&self) -> (&'static str, &'static str) {
        match self {
            ResourceKind::Island => ("island_id", "island_name"),
            ResourceKind::Brand => ("brand_id", "brand_name"),
            ResourceKind::Iup => ("iup_id", "iup_name"),
            ResourceKind::Group => ("group_id", "group_name"),
            ResourceKind::Area => ("area_id", "area_name"),
            ResourceKind::IupZone => ("iup_zone_id", "iup_zone_name"),
            ResourceKind::IupSegmentation => ("iup_segmentation_id", "iup_segmentation_name"),
            ResourceKind::Quotation => ("quotation_id", "quotation_no"),
            ResourceKind::Product => ("product_id", "product_name"),
            ResourceKind::TermCondition => ("term_condition_id", "term_condition_name"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Asc,
    Desc,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{}'", raw));
    }
    Ok((key.to_string(), value.trim().to_string()))
}
