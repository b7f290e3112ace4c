//! `aipseo wallet ...`

use clap::Subcommand;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use wallet_core::{WalletStore, DEFAULT_WALLET_PATH};

use super::{number_field, str_field};
use crate::context::Context;
use crate::error::{CliError, Result};
use crate::output::{check_response, format_usd};

#[derive(Subcommand, Debug)]
pub enum WalletAction {
    /// Create a new aipseo wallet.
    Create {
        /// Name for the wallet
        #[arg(long)]
        name: Option<String>,
        /// Output file path for the wallet
        #[arg(long, default_value = DEFAULT_WALLET_PATH)]
        output: PathBuf,
        /// Overwrite existing wallet file
        #[arg(long)]
        force: bool,
    },
    /// Check the balance of your wallet.
    Balance {
        /// Path to wallet file
        #[arg(long)]
        wallet: Option<PathBuf>,
    },
    /// Deposit funds into your wallet.
    Deposit {
        /// Path to wallet file
        #[arg(long)]
        wallet: Option<PathBuf>,
        /// Amount to deposit in USD
        #[arg(long)]
        amount: f64,
        /// Print the checkout URL without opening a browser
        #[arg(long)]
        no_browser: bool,
    },
    /// Withdraw funds from your wallet.
    Withdraw {
        /// Path to wallet file
        #[arg(long)]
        wallet: Option<PathBuf>,
        /// Amount to withdraw in USD
        #[arg(long)]
        amount: f64,
        /// Destination account
        #[arg(long)]
        dest: String,
    },
}

pub async fn run(ctx: &mut Context, action: WalletAction) -> Result<()> {
    match action {
        WalletAction::Create {
            name,
            output,
            force,
        } => create(ctx, name.as_deref(), &output, force).await,
        WalletAction::Balance { wallet } => balance(ctx, wallet.as_deref()).await,
        WalletAction::Deposit {
            wallet,
            amount,
            no_browser,
        } => deposit(ctx, wallet.as_deref(), amount, no_browser).await,
        WalletAction::Withdraw {
            wallet,
            amount,
            dest,
        } => withdraw(ctx, wallet.as_deref(), amount, &dest).await,
    }
}

pub async fn create(ctx: &mut Context, name: Option<&str>, output: &Path, force: bool) -> Result<()> {
    if WalletStore::exists(output) && !force {
        return Err(CliError::FileExists(output.to_path_buf()));
    }

    let password = ctx.new_password()?;

    let response = ctx.api.create_wallet(name).await;
    check_response(&response)?;
    let wallet_id = str_field(&response, "wallet_id")?;

    ctx.wallets.write(output, wallet_id, password.expose()).await?;
    info!("Created wallet file {:?}", output);

    if ctx.output.is_json() {
        return ctx.output.json(&response);
    }

    let deposit_address = str_field(&response, "deposit_address")?;
    ctx.output.line("Wallet created successfully")?;
    ctx.output.field("Wallet ID", wallet_id)?;
    ctx.output.field("Deposit Address", deposit_address)?;
    let saved_to = ctx.output.bold(output.display().to_string());
    ctx.output.line(format!("Wallet saved to '{}'", saved_to))?;
    Ok(())
}

pub async fn balance(ctx: &mut Context, wallet: Option<&Path>) -> Result<()> {
    let path = ctx.wallet_path(wallet);
    let wallet_id = ctx.unlock_wallet(&path).await?;

    let response = ctx.api.get_balance(wallet_id.expose()).await;
    check_response(&response)?;

    if ctx.output.is_json() {
        return ctx.output.json(&response);
    }

    let tokens = response
        .get("tokens")
        .ok_or(CliError::MalformedResponse("tokens"))?;
    let usd = number_field(&response, "usd")?;

    ctx.output.line("Wallet Balance")?;
    ctx.output.field("Wallet ID", wallet_id.expose())?;
    ctx.output.field("Tokens", tokens)?;
    ctx.output.line(format!("USD Value: {}", format_usd(usd)))?;
    Ok(())
}

pub async fn deposit(
    ctx: &mut Context,
    wallet: Option<&Path>,
    amount: f64,
    no_browser: bool,
) -> Result<()> {
    let path = ctx.wallet_path(wallet);
    let wallet_id = ctx.unlock_wallet(&path).await?;

    let response = ctx.api.deposit(wallet_id.expose(), amount).await;
    check_response(&response)?;
    let checkout_url = str_field(&response, "stripe_checkout_url")?;

    if ctx.output.is_json() {
        ctx.output.json(&response)?;
    } else {
        ctx.output
            .line(format!("Opening Stripe checkout for {}", format_usd(amount)))?;
        ctx.output.line(checkout_url)?;
    }

    if !no_browser {
        if let Err(e) = ctx.open_browser(checkout_url) {
            warn!("Could not open a browser: {}", e);
        }
    }
    Ok(())
}

pub async fn withdraw(ctx: &mut Context, wallet: Option<&Path>, amount: f64, dest: &str) -> Result<()> {
    let path = ctx.wallet_path(wallet);
    let wallet_id = ctx.unlock_wallet(&path).await?;

    let response = ctx.api.withdraw(wallet_id.expose(), amount, dest).await;
    check_response(&response)?;

    if ctx.output.is_json() {
        return ctx.output.json(&response);
    }

    ctx.output.line("Withdrawal initiated")?;
    ctx.output.field("Amount", format_usd(amount))?;
    ctx.output.field("Destination", dest)?;
    ctx.output.field("Status", str_field(&response, "status")?)?;
    ctx.output
        .field("Transaction ID", str_field(&response, "transaction_id")?)?;
    Ok(())
}
