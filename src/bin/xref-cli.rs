use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "xref-cli")]
#[command(about = "Query a running filter cross-reference proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the proxy is up
    Health,
    /// Run a cross-reference search
    Search {
        #[arg(value_enum)]
        vendor: VendorArg,
        /// Part number or free text
        q: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// e.g. OIL_FILTER, AIR_FILTER
        #[arg(short, long)]
        filter: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum VendorArg {
    Mann,
    Wix,
}

impl VendorArg {
    fn path(&self) -> &'static str {
        match self {
            VendorArg::Mann => "/api/mann",
            VendorArg::Wix => "/api/wix",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/", base)).send().await?;
            let status = res.status();
            println!("{} {}", status, res.text().await?);
        }
        Commands::Search {
            vendor,
            q,
            page,
            filter,
        } => {
            let mut query = vec![("q", q), ("page", page.to_string())];
            if let Some(filter) = filter {
                query.push(("filterBy", filter));
            }
            let res = client
                .get(format!("{}{}", base, vendor.path()))
                .query(&query)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let upstream = res
        .headers()
        .get("x-proxy-upstream")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("?")
        .to_string();

    if !status.is_success() {
        eprintln!("Error: proxy returned status {} (upstream {})", status, upstream);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
