//! # Command Line
//!
//! `storefront <command>`: each invocation restores the persisted session and
//! cart, runs one command, flushes, and prints the result.
//!
//! ```text
//! $ storefront login --email test@test.com --password 123456
//! Signed in as test@test.com
//! $ storefront add 1
//! $ storefront cart
//! iPhone 14 Pro                    x1    Rs 999.00
//! ──────────────────────────────────────────────
//! 1 item                                 Rs 999.00
//! ```
//!
//! With `--json` every result (and error) is printed as JSON instead.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use storefront_core::{Product, ProductId};

use crate::commands::cart::CartResponse;
use crate::commands::product::{ProductDetailResponse, ProductListResponse};
use crate::commands::session::SessionResponse;
use crate::commands::{cart, product, session};
use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, ConfigState};

/// Storefront command line client.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Browse the catalog and manage your cart")]
pub struct Cli {
    /// SQLite file holding the session and cart (default: platform data dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Keep session and cart in memory only
    #[arg(long, global = true, conflicts_with = "db")]
    pub ephemeral: bool,

    /// Catalog server base URL (overrides catalog.toml and STOREFRONT_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Catalog configuration file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out and empty the cart
    Logout,
    /// Show who is signed in
    Whoami,
    /// List products, optionally filtered by name
    Products {
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show one product
    Show { id: ProductId },
    /// Add one unit of a product to the cart
    Add { id: ProductId },
    /// Remove a product from the cart
    Remove { id: ProductId },
    /// Set a cart line's quantity (0 or less removes it)
    SetQty {
        id: ProductId,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Show the cart
    Cart,
    /// Empty the cart
    Clear,
    /// Add a product to the catalog
    NewProduct {
        #[arg(long)]
        name: String,
        /// Price in major units, e.g. 49.99
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: String,
        /// Image URL (http or https)
        #[arg(long)]
        image: String,
    },
}

/// Result of one command, ready to render.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Session(SessionResponse),
    Products(ProductListResponse),
    Product(ProductDetailResponse),
    Created(Product),
    Cart(CartResponse),
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one command against the state.
pub async fn execute(state: &AppState, command: Command) -> ApiResult<Output> {
    let output = match command {
        Command::Login { email, password } => {
            Output::Session(session::login(state, &email, &password).await?)
        }
        Command::Logout => Output::Session(session::logout(state).await),
        Command::Whoami => Output::Session(session::whoami(state)),
        Command::Products { query } => {
            Output::Products(product::list_products(state, query.as_deref()).await?)
        }
        Command::Show { id } => Output::Product(product::get_product(state, id).await?),
        Command::Add { id } => Output::Cart(cart::add_to_cart(state, id).await?),
        Command::Remove { id } => Output::Cart(cart::remove_from_cart(state, id)?),
        Command::SetQty { id, quantity } => {
            Output::Cart(cart::update_cart_item(state, id, quantity)?)
        }
        Command::Cart => Output::Cart(cart::get_cart(state)?),
        Command::Clear => Output::Cart(cart::clear_cart(state)?),
        Command::NewProduct {
            name,
            price,
            description,
            image,
        } => Output::Created(
            product::create_product(state, &name, price, &description, &image).await?,
        ),
    };

    Ok(output)
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders a command result for the terminal.
pub fn render(output: &Output, config: &ConfigState, json: bool) -> ApiResult<String> {
    if json {
        return serde_json::to_string_pretty(output)
            .map_err(|e| ApiError::internal(format!("Could not encode output: {}", e)));
    }

    let text = match output {
        Output::Session(s) => render_session(s),
        Output::Products(list) => render_products(list, config),
        Output::Product(detail) => render_detail(&detail.product, detail.in_cart, config),
        Output::Created(p) => format!("Created product {}: {}", p.id, p.name),
        Output::Cart(c) => render_cart(c, config),
    };

    Ok(text)
}

/// Renders an error for the terminal.
pub fn render_error(error: &ApiError, json: bool) -> String {
    if json {
        if let Ok(encoded) = serde_json::to_string_pretty(error) {
            return encoded;
        }
    }
    format!("error: {}", error.message)
}

fn render_session(session: &SessionResponse) -> String {
    match &session.email {
        Some(email) => format!("Signed in as {}", email),
        None => "Not signed in".to_string(),
    }
}

fn render_products(list: &ProductListResponse, config: &ConfigState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({} catalog)", config.store_name, list.source);

    if list.products.is_empty() {
        let _ = write!(out, "No products match \"{}\"", list.query);
        return out;
    }

    for p in &list.products {
        let _ = writeln!(
            out,
            "{:>4}  {:<32} {:>14}",
            p.id,
            p.name,
            config.format_currency(p.price)
        );
    }
    out.truncate(out.trim_end().len());
    out
}

fn render_detail(product: &Product, in_cart: u32, config: &ConfigState) -> String {
    let mut out = format!(
        "{}\n{}\n\n{}\n{}",
        product.name,
        config.format_currency(product.price),
        product.description,
        product.image
    );
    if in_cart > 0 {
        let _ = write!(out, "\n\nIn cart: {}", in_cart);
    }
    out
}

fn render_cart(cart: &CartResponse, config: &ConfigState) -> String {
    if cart.lines.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = String::new();
    for line in &cart.lines {
        let _ = writeln!(
            out,
            "{:<32} x{:<4} {:>14}",
            line.name,
            line.quantity,
            config.format_currency(line.line_total)
        );
    }
    let _ = writeln!(out, "{}", "─".repeat(54));

    let items = if cart.total_items == 1 { "item" } else { "items" };
    let _ = write!(
        out,
        "{:<38} {:>14}",
        format!("{} {}", cart.total_items, items),
        config.format_currency(cart.total_price)
    );
    out
}
