mod extract;
mod fetch;
mod server;
mod urls;
mod verdict;

use std::sync::Arc;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "amz_verdict", about = "Amazon product reseller verdicts via ScraperAPI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP verdict API
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
    /// Fetch one product page and print its verdict record as JSON
    Check {
        /// Amazon product URL (must be a /dp/ or /gp/product/ page)
        url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port } => {
            let client = Arc::new(fetch::FetchClient::from_env()?);
            server::serve(port, client).await
        }
        Commands::Check { url } => {
            if !urls::is_product_url(&url) {
                anyhow::bail!("not an Amazon product URL: {url}");
            }
            let client = fetch::FetchClient::from_env()?;
            let html = client.fetch_rendered(&url).await?;
            let data = extract::extract_product(&html);
            let response = server::VerdictResponse::from_extraction(data);
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
    }
}
