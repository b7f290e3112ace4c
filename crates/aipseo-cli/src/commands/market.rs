//! `aipseo market ...`

use clap::Subcommand;
use seo_api::{NewListing, SearchFilters};
use std::path::{Path, PathBuf};

use super::str_field;
use crate::context::Context;
use crate::error::Result;
use crate::output::{check_response, format_usd};

#[derive(Subcommand, Debug)]
pub enum MarketAction {
    /// List available backlinks on the marketplace.
    List {
        /// Minimum domain rating
        #[arg(long)]
        dr_min: Option<i64>,
        /// Maximum price in USD
        #[arg(long)]
        price_max: Option<f64>,
        /// Topic to filter by
        #[arg(long)]
        topic: Option<String>,
    },
    /// Buy a backlink from the marketplace.
    Buy {
        /// Path to wallet file
        #[arg(long)]
        wallet: Option<PathBuf>,
        /// ID of the listing to buy
        #[arg(long)]
        listing_id: String,
    },
    /// List a backlink for sale on the marketplace.
    Sell {
        /// Path to wallet file
        #[arg(long)]
        wallet: Option<PathBuf>,
        /// URL of the page containing the backlink
        #[arg(long)]
        source_url: String,
        /// URL the backlink points to
        #[arg(long)]
        target_url: String,
        /// Price in USD
        #[arg(long)]
        price: f64,
        /// Anchor text for the backlink
        #[arg(long)]
        anchor: Option<String>,
        /// Rel attribute for the backlink (e.g. nofollow)
        #[arg(long)]
        rel: Option<String>,
    },
}

pub async fn run(ctx: &mut Context, action: MarketAction) -> Result<()> {
    match action {
        MarketAction::List {
            dr_min,
            price_max,
            topic,
        } => {
            let filters = SearchFilters {
                dr_min,
                price_max,
                topic,
            };
            list(ctx, &filters).await
        }
        MarketAction::Buy { wallet, listing_id } => buy(ctx, wallet.as_deref(), &listing_id).await,
        MarketAction::Sell {
            wallet,
            source_url,
            target_url,
            price,
            anchor,
            rel,
        } => {
            let listing = NewListing {
                source_url,
                target_url,
                price_usd: price,
                anchor,
                rel,
            };
            sell(ctx, wallet.as_deref(), &listing).await
        }
    }
}

pub async fn list(ctx: &mut Context, filters: &SearchFilters) -> Result<()> {
    let listings = ctx.api.search_marketplace(filters).await;
    ctx.output.listings(&listings)
}

pub async fn buy(ctx: &mut Context, wallet: Option<&Path>, listing_id: &str) -> Result<()> {
    let path = ctx.wallet_path(wallet);
    let wallet_id = ctx.unlock_wallet(&path).await?;

    let response = ctx.api.buy_listing(wallet_id.expose(), listing_id).await;
    check_response(&response)?;

    if ctx.output.is_json() {
        return ctx.output.json(&response);
    }

    ctx.output.line("Purchase successful")?;
    ctx.output.field("Listing ID", listing_id)?;
    ctx.output.field("Status", str_field(&response, "status")?)?;
    ctx.output.field("Escrow ID", str_field(&response, "escrow_id")?)?;
    Ok(())
}

pub async fn sell(ctx: &mut Context, wallet: Option<&Path>, listing: &NewListing) -> Result<()> {
    let path = ctx.wallet_path(wallet);
    let wallet_id = ctx.unlock_wallet(&path).await?;

    let response = ctx.api.list_backlink(wallet_id.expose(), listing).await;
    check_response(&response)?;

    if ctx.output.is_json() {
        return ctx.output.json(&response);
    }

    ctx.output.line("Backlink listed for sale")?;
    ctx.output.field("Listing ID", str_field(&response, "listing_id")?)?;
    ctx.output.field("Source URL", &listing.source_url)?;
    ctx.output.field("Target URL", &listing.target_url)?;
    ctx.output.field("Price", format_usd(listing.price_usd))?;
    if let Some(anchor) = &listing.anchor {
        ctx.output.field("Anchor Text", anchor)?;
    }
    if let Some(rel) = &listing.rel {
        ctx.output.field("Rel", rel)?;
    }
    if let Some(status) = response.get("status").and_then(|s| s.as_str()) {
        ctx.output.field("Status", status)?;
    }
    Ok(())
}
