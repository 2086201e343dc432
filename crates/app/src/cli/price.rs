use std::path::{Path, PathBuf};

use bookshop::cart::CartRequest;
use bookshop_app::{context::AppContext, domain::pricing::responses::PricingResponse};
use clap::Args;
use jiff::Timestamp;
use serde::Serialize;
use tokio::io::AsyncReadExt;

#[derive(Debug, Args)]
pub(crate) struct PriceArgs {
    /// Cart request JSON file, or `-` for standard input
    #[arg(long, default_value = "-")]
    cart: PathBuf,

    /// Point in time to price at (RFC 3339); defaults to now
    #[arg(long)]
    at: Option<String>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,
}

/// Document printed for a priced or rejected cart.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Output {
    Priced(PricingResponse),
    Rejected { rejected: String },
}

#[expect(clippy::print_stdout, reason = "response document written to stdout")]
pub(crate) async fn run(context: &AppContext, args: PriceArgs) -> Result<(), String> {
    let point_in_time = parse_at(args.at.as_deref())?.unwrap_or_else(Timestamp::now);

    let raw = read_cart(&args.cart).await?;

    let request: CartRequest =
        serde_json::from_str(&raw).map_err(|error| format!("invalid cart request: {error}"))?;

    let output = respond(context, &request, point_in_time).await;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }
    .map_err(|error| format!("failed to serialize response: {error}"))?;

    println!("{rendered}");

    match output {
        Output::Priced(_) => Ok(()),
        Output::Rejected { rejected } => Err(format!("cart rejected: {rejected}")),
    }
}

async fn respond(context: &AppContext, request: &CartRequest, point_in_time: Timestamp) -> Output {
    match context.pricing.calculate_price(request, point_in_time).await {
        Ok(result) => Output::Priced(result.into()),
        Err(failure) => Output::Rejected {
            rejected: failure.to_string(),
        },
    }
}

async fn read_cart(path: &Path) -> Result<String, String> {
    if path == Path::new("-") {
        let mut raw = String::new();

        tokio::io::stdin()
            .read_to_string(&mut raw)
            .await
            .map_err(|error| format!("failed to read cart from stdin: {error}"))?;

        return Ok(raw);
    }

    tokio::fs::read_to_string(path)
        .await
        .map_err(|error| format!("failed to read cart {}: {error}", path.display()))
}

fn parse_at(raw: Option<&str>) -> Result<Option<Timestamp>, String> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|error| format!("invalid at timestamp: {error}"))
    })
    .transpose()
}
