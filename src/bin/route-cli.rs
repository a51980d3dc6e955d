use clap::{Parser, Subcommand};
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Command-line client for the bus route browser", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the server is up
    Health,
    /// List routes starting with a letter
    Routes {
        letter: String,
    },
    /// Show every bus on one route
    Fetch {
        route: String,
        /// low_to_high or high_to_low
        #[arg(short, long, default_value = "low_to_high")]
        sort: String,
    },
    /// Run a full browse: letter, route, sort and filters
    Browse {
        #[arg(short, long)]
        letter: Option<String>,
        #[arg(short, long)]
        route: Option<String>,
        #[arg(short, long)]
        sort: Option<String>,
        /// Comma-separated star ratings, e.g. "4,4.5"
        #[arg(long)]
        ratings: Option<String>,
        /// Comma-separated bus types
        #[arg(long)]
        bus_types: Option<String>,
    },
    /// Inspect query cache counters
    Cache,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = Url::parse(&cli.url)?;

    match cli.command {
        Commands::Health => {
            let res = client.get(base.join("/health")?).send().await?;
            println!("{} {}", res.status(), res.text().await?);
        }
        Commands::Routes { letter } => {
            let res = client
                .get(base.join("/api/routes")?)
                .query(&[("letter", letter)])
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Fetch { route, sort } => {
            let mut url = base.join("/api/routes")?;
            url.path_segments_mut()
                .map_err(|_| "base url cannot carry a path")?
                .push(&route);
            let res = client.get(url).query(&[("sort", sort)]).send().await?;
            print_response(res).await?;
        }
        Commands::Browse {
            letter,
            route,
            sort,
            ratings,
            bus_types,
        } => {
            let params: Vec<(&str, String)> = [
                ("letter", letter),
                ("route", route),
                ("sort", sort),
                ("ratings", ratings),
                ("bus_types", bus_types),
            ]
            .into_iter()
            .filter_map(|(k, v)| v.map(|v| (k, v)))
            .collect();
            let res = client
                .get(base.join("/api/browse")?)
                .query(&params)
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Cache => {
            let res = client.get(base.join("/api/cache")?).send().await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
