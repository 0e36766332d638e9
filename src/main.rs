use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;

use reloadly_giftcards::config::{CliArgs, Command, Config};
use reloadly_giftcards::{GiftCardClient, OrderRequest, ProductsParams};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();
    let config = Config::from_args(&args)?;
    config.validate()?;

    // Initialize logging with the configured level
    let log_level = config.log_level.to_lowercase();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        sandbox = config.client.test_mode,
        api_version = config.client.api_version,
        "Starting reloadly-gc"
    );

    let client = GiftCardClient::with_config(
        config.client_id.clone(),
        config.client_secret.clone(),
        config.client.clone(),
    )
    .context("Failed to create gift card client")?;

    let result = run(&client, args.command)
        .await
        .context("Gift card API request failed")?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Execute one subcommand against the API
async fn run(client: &GiftCardClient, command: Command) -> reloadly_giftcards::Result<Value> {
    match command {
        Command::Balance => client.balance().await,
        Command::Countries => client.countries().await,
        Command::Country { iso_code } => client.country_by_iso_code(&iso_code).await,
        Command::Products {
            size,
            page,
            product_name,
            country_code,
            include_range,
            include_fixed,
        } => {
            let params = ProductsParams {
                size,
                page,
                product_name,
                country_code,
                include_range,
                include_fixed,
            };
            client.products(&params).await
        }
        Command::Product { product_id } => client.product_by_id(product_id).await,
        Command::CountryProducts { iso_code } => client.products_by_iso_code(&iso_code).await,
        Command::RedeemInstructions { brand_id: None } => client.redeem_instructions().await,
        Command::RedeemInstructions {
            brand_id: Some(brand_id),
        } => client.redeem_instructions_by_id(brand_id).await,
        Command::Discounts { size, page } => client.discounts(size, page).await,
        Command::Discount { product_id } => client.discount_by_id(product_id).await,
        Command::Transactions {
            transaction_id: None,
        } => client.transactions().await,
        Command::Transactions {
            transaction_id: Some(id),
        } => client.transaction_by_id(id).await,
        Command::Order {
            product_id,
            quantity,
            unit_price,
            sender_name,
            country_code,
            custom_identifier,
            recipient_email,
            recipient_phone_country,
            recipient_phone,
        } => {
            let mut order = OrderRequest::new(product_id, quantity, unit_price, sender_name);
            order.country_code = country_code;
            order.custom_identifier = custom_identifier;
            order.recipient_email = recipient_email;
            if let (Some(country), Some(phone)) = (recipient_phone_country, recipient_phone) {
                order = order.with_recipient_phone(country, phone);
            }
            client.order(&order).await
        }
        Command::RedeemCode { transaction_id } => client.redeem_code(transaction_id).await,
    }
}
