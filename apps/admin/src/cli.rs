//! # Command Line
//!
//! One subcommand per dashboard screen.
//!
//! ```text
//! tiffin-admin [--json] [--config FILE] [-v] [-y] <COMMAND>
//!
//!   auth         send-otp | verify | login | logout | status
//!   menu         list the screens
//!   open         show a screen's default view by tab id
//!   dashboard    show | store open|close
//!   items        list | sync | stock | image
//!   banners      list | upload | delete
//!   coupons      list | create | delete | enable | disable
//!   notifications send | history
//!   points       list | add | delete | quote
//!   settlements  list | settle | set-upi
//!   extra-settlements list | settle | set-percentage
//!   qrcodes      list | link | generate
//!   refund       --phone --points
//!   config       init | show | path
//! ```

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "tiffin-admin", author, version, about = "Admin console for the Tiffin storefront")]
pub struct Cli {
    /// Print raw JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true, env = "TIFFIN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v debug, -vv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Answer yes to confirmation prompts.
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with an OTP, sign out, or check the session.
    #[command(subcommand)]
    Auth(AuthCommand),

    /// List the screens in tab order.
    Menu,

    /// Show a screen by tab id (unknown ids open the dashboard).
    Open {
        screen: Option<String>,
    },

    /// Orders, revenue and store status.
    #[command(subcommand)]
    Dashboard(DashboardCommand),

    /// Menu catalog: browse, sync, stock and images.
    #[command(subcommand)]
    Items(ItemsCommand),

    #[command(subcommand)]
    Banners(BannersCommand),

    #[command(subcommand)]
    Coupons(CouponsCommand),

    /// Push notifications.
    #[command(subcommand)]
    Notifications(NotificationsCommand),

    /// Loyalty-point tiers.
    #[command(subcommand)]
    Points(PointsCommand),

    /// Merchant balances and settlement.
    #[command(subcommand)]
    #[command(alias = "merchant-settlements")]
    Settlements(SettlementsCommand),

    /// Merchant extra cash and extra percentage.
    #[command(subcommand)]
    #[command(alias = "merchant-extra-settlements")]
    ExtraSettlements(ExtraSettlementsCommand),

    /// Merchant onboarding QR codes.
    #[command(subcommand)]
    #[command(alias = "merchant-qrcodes")]
    Qrcodes(QrCommand),

    /// Credit loyalty points back to a customer.
    Refund(RefundArgs),

    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Command {
    /// Whether the command needs a signed-in session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Command::Auth(_) | Command::Menu | Command::Config(_))
    }
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum AuthCommand {
    /// Text a login OTP to an allowed phone.
    SendOtp {
        #[arg(long)]
        phone: String,
    },
    /// Verify an OTP and start a session.
    Verify {
        #[arg(long)]
        phone: String,
        #[arg(long)]
        otp: String,
    },
    /// Send an OTP, then read it from stdin and verify.
    Login {
        #[arg(long)]
        phone: String,
    },
    Logout,
    Status,
}

// =============================================================================
// Dashboard
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum DashboardCommand {
    Show,
    /// Open or close the store.
    Store {
        #[arg(value_enum)]
        state: StoreState,
        /// Shown to customers while closed.
        #[arg(long)]
        reason: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Open,
    Close,
}

// =============================================================================
// Items
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ItemsCommand {
    /// Category tree of the latest menu.
    List {
        #[arg(long, short, default_value = "")]
        search: String,
        #[arg(long)]
        out_of_stock: bool,
    },
    /// Pull the menu from the upstream provider.
    Sync,
    /// Mark an item in or out of stock.
    Stock {
        item_id: String,
        #[command(flatten)]
        change: StockFlags,
    },
    /// Set an item's image URL.
    Image { item_id: String, url: String },
}

#[derive(Args, Debug, Clone, Copy)]
#[group(required = true, multiple = false)]
pub struct StockFlags {
    #[arg(long = "in")]
    pub in_stock: bool,
    #[arg(long = "out")]
    pub out_of_stock: bool,
    #[arg(long)]
    pub toggle: bool,
}

impl StockFlags {
    /// The new stock flag given the current one.
    pub fn resolve(&self, current: bool) -> bool {
        if self.toggle {
            !current
        } else {
            self.in_stock
        }
    }
}

// =============================================================================
// Banners / Coupons / Notifications / Points
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum BannersCommand {
    List,
    Upload {
        file: PathBuf,
        #[arg(long)]
        redirect: Option<String>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum CouponsCommand {
    List,
    Create(CreateCouponArgs),
    Delete { id: String },
    Enable { id: String },
    Disable { id: String },
}

#[derive(Args, Debug)]
pub struct CreateCouponArgs {
    #[arg(long)]
    pub code: String,
    /// Percentage number, or a label such as FLAT50.
    #[arg(long, default_value = "")]
    pub discount: String,
    #[arg(long, default_value_t = 0.0)]
    pub min_order: f64,
    #[arg(long)]
    pub max_value: Option<f64>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub expiry: String,
}

#[derive(Subcommand, Debug)]
pub enum NotificationsCommand {
    Send {
        #[arg(long)]
        title: String,
        #[arg(long)]
        message: String,
    },
    /// Notifications sent from this machine, newest first.
    History,
}

#[derive(Subcommand, Debug)]
pub enum PointsCommand {
    List,
    Add {
        #[arg(long)]
        lower: i64,
        #[arg(long)]
        upper: i64,
        #[arg(long)]
        points: i64,
        /// Refuse a range that overlaps an existing tier instead of warning.
        #[arg(long)]
        strict: bool,
    },
    Delete { id: String },
    /// Points an order of this many rupees earns.
    Quote { amount: f64 },
}

// =============================================================================
// Merchants
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum SettlementsCommand {
    List,
    /// Settle all of a merchant's transactions against a payout reference.
    Settle {
        merchant_id: String,
        #[arg(long)]
        settlement_id: String,
    },
    SetUpi { merchant_id: String, upi: String },
}

#[derive(Subcommand, Debug)]
pub enum ExtraSettlementsCommand {
    List,
    Settle {
        merchant_id: String,
        #[arg(long)]
        settlement_id: String,
    },
    /// 0-100, up to two decimals.
    SetPercentage { merchant_id: String, percentage: String },
}

#[derive(Subcommand, Debug)]
pub enum QrCommand {
    List,
    /// Print a merchant's deep link.
    Link { merchant_id: String },
    /// Render poster PNGs (all merchants when none are named).
    Generate {
        merchant_ids: Vec<String>,
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct RefundArgs {
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub points: i64,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write the config file: its own settings, or defaults when it is
    /// missing or unreadable, plus any TIFFIN_* overrides.
    Init {
        #[arg(long)]
        force: bool,
    },
    Show,
    Path,
}
