//! Clap derive structures for the `getaway` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.
//! Only clap, clap_complete and chrono may be used here: the build script
//! includes this file to render man pages.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// getaway -- vacation-package storefront from the command line
#[derive(Debug, Parser)]
#[command(
    name = "getaway",
    version,
    about = "Browse vacation-package offers and manage your booking cart",
    long_about = "Browse a storefront's vacation-package offers, pick travel dates and\n\
        manage the booking cart from the command line.\n\n\
        Talks to the Storefront GraphQL API with a public storefront token.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Storefront profile to use
    #[arg(long, short = 'p', env = "GETAWAY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Shop URL (overrides profile)
    #[arg(long, short = 's', env = "GETAWAY_SHOP", global = true)]
    pub shop: Option<String>,

    /// Storefront access token
    #[arg(long, env = "GETAWAY_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Buyer country code for localized prices (e.g. US)
    #[arg(long, env = "GETAWAY_COUNTRY", global = true)]
    pub country: Option<String>,

    /// Buyer language code (e.g. EN)
    #[arg(long, env = "GETAWAY_LANGUAGE", global = true)]
    pub language: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GETAWAY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates (local dev proxies)
    #[arg(long, short = 'k', env = "GETAWAY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "GETAWAY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse vacation-package offers
    #[command(alias = "o")]
    Offers(OffersArgs),

    /// View and change the booking cart
    #[command(alias = "c")]
    Cart(CartArgs),

    /// Bonus add-ons for the cart
    Bonus(BonusArgs),

    /// Pick check-in / check-out dates on a month calendar
    Dates(DatesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  OFFERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct OffersArgs {
    #[command(subcommand)]
    pub command: OffersCommand,
}

/// Catalog tab.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Tab {
    Popular,
    Hotels,
    Cruise,
    /// Exclusive deals
    #[value(alias = "exclusive-deals")]
    Exclusive,
}

#[derive(Debug, Subcommand)]
pub enum OffersCommand {
    /// List the offers of one catalog tab
    #[command(alias = "ls")]
    List {
        /// Tab to list (defaults to popular)
        #[arg(long, short = 't')]
        tab: Option<Tab>,

        /// List the whole collection, ignoring tabs
        #[arg(long, short = 'a', conflicts_with = "tab")]
        all: bool,
    },

    /// Show one offer with its highlights
    Get {
        /// Product handle, title or id
        offer: String,
    },

    /// Recently updated offers
    Recommended,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CART
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: CartCommand,
}

/// Traveler details recorded on the booking line.
#[derive(Debug, Default, Args)]
pub struct TravelerArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Number of adults
    #[arg(long)]
    pub adults: Option<String>,

    /// Number of kids
    #[arg(long)]
    pub kids: Option<String>,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_in: Option<NaiveDate>,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub check_out: Option<NaiveDate>,
}

#[derive(Debug, Subcommand)]
pub enum CartCommand {
    /// Show the cart with its active offer and hold countdown
    Show,

    /// Book an offer: adds one line carrying the offer and traveler details
    Add {
        /// Product handle, title or id
        offer: String,

        #[command(flatten)]
        traveler: TravelerArgs,
    },

    /// Remove lines by id
    #[command(alias = "rm")]
    Remove {
        /// Cart line ids
        #[arg(required = true)]
        line_ids: Vec<String>,
    },

    /// Remove every line
    Clear,

    /// Follow the hold countdown of the active offer until it expires
    Watch,

    /// Apply a url-encoded booking form (reads stdin when no body is given)
    Submit {
        /// Form body, e.g. "variantId=...&offerTitle=..."
        body: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BONUS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BonusArgs {
    #[command(subcommand)]
    pub command: BonusCommand,
}

#[derive(Debug, Subcommand)]
pub enum BonusCommand {
    /// List bonus choices
    #[command(alias = "ls")]
    List,

    /// Add a bonus choice to the cart
    Select {
        /// Choice letter ("A"), label ("Choice A") or product title
        choice: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DATES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DatesArgs {
    /// Days to click, in order (YYYY-MM-DD)
    #[arg(value_name = "DAY")]
    pub days: Vec<NaiveDate>,

    /// Months to page forward (negative pages back)
    #[arg(long, short = 'm', default_value = "0", allow_negative_numbers = true)]
    pub months: i32,

    /// Date the calendar opens on (defaults to today)
    #[arg(long, value_name = "DATE")]
    pub today: Option<NaiveDate>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a configuration value on the active profile
    Set {
        /// Profile key (e.g., "shop", "collection", "country")
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store the storefront token in the system keyring
    SetToken {
        /// Profile name
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
