//! The administrator's command-line gateway.
//!
//! Connects directly to the ledger database named by `DPG_DATABASE_URL`. Anyone who can run this binary on the
//! host is the administrator; there is no separate admin credential.

use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
mod formatting;

use commands::{
    add_balance,
    add_package,
    approve_order,
    create_user,
    disable_package,
    list_packages,
    pending_orders,
    reject_order,
    set_package_name,
    set_package_price,
    user_info,
};

#[derive(Parser, Debug)]
#[command(version, about = "Administration tools for the DataPack gateway")]
pub struct Arguments {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register a new customer. Prints the generated password exactly once.
    #[clap(name = "create-user")]
    CreateUser {
        phone: String,
        /// Password for the new account. A 6-digit password is generated when omitted.
        password: Option<String>,
    },
    /// Add to (or, with a negative amount, correct) a customer's balance.
    #[clap(name = "add-balance")]
    AddBalance {
        phone: String,
        /// The amount in LBP. Thousands separators are accepted, e.g. 1,450,000.
        amount: String,
    },
    /// Show a customer's account and recent orders.
    #[clap(name = "user-info")]
    UserInfo { phone: String },
    /// List the package catalog.
    #[clap(name = "packages")]
    Packages {
        /// Include disabled packages
        #[arg(short, long)]
        all: bool,
    },
    /// Add a new package to the catalog.
    #[clap(name = "add-package")]
    AddPackage { name: String, price: String },
    /// Change the price of a catalog entry.
    #[clap(name = "set-price")]
    SetPrice { package_id: i64, price: String },
    /// Rename a catalog entry.
    #[clap(name = "set-name")]
    SetName { package_id: i64, name: String },
    /// Hide a package from the customer-facing catalog.
    #[clap(name = "disable-package")]
    DisablePackage { package_id: i64 },
    /// List pending orders, oldest first.
    #[clap(name = "pending")]
    Pending {
        #[arg(short, long, default_value = "50")]
        limit: i64,
    },
    /// Approve a pending order, deducting the package price from the customer's balance.
    #[clap(name = "approve")]
    Approve { order_id: i64 },
    /// Reject a pending order. The customer's balance is not touched.
    #[clap(name = "reject")]
    Reject { order_id: i64 },
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::init();
    let cli = Arguments::parse();
    let result = match cli.command {
        Command::CreateUser { phone, password } => create_user(&phone, password).await,
        Command::AddBalance { phone, amount } => add_balance(&phone, &amount).await,
        Command::UserInfo { phone } => user_info(&phone).await,
        Command::Packages { all } => list_packages(all).await,
        Command::AddPackage { name, price } => add_package(&name, &price).await,
        Command::SetPrice { package_id, price } => set_package_price(package_id, &price).await,
        Command::SetName { package_id, name } => set_package_name(package_id, &name).await,
        Command::DisablePackage { package_id } => disable_package(package_id).await,
        Command::Pending { limit } => pending_orders(limit).await,
        Command::Approve { order_id } => approve_order(order_id).await,
        Command::Reject { order_id } => reject_order(order_id).await,
    };
    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
