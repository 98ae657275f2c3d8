use anyhow::{bail, Context};
use dotenvy::dotenv;
use log::{error, info};
use std::sync::Arc;

use views_client::core::{ClientConfig, LogNotifier};
use views_client::views::SortOrder;
use views_client::ViewsClient;

const USAGE: &str = "usage: views-client <command>

commands:
  search <query> [page] [per_page] [sort] [asc|desc]
  get <view-id>
  delete <view-id>
  for-value
  refresh-interval";

fn arg_or<T: std::str::FromStr>(args: &[String], idx: usize, default: T) -> anyhow::Result<T> {
    match args.get(idx) {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid argument: {raw}")),
        None => Ok(default),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let config = ClientConfig::load().context("Failed to load configuration")?;
    info!("Using API at {}", config.server_url);

    let client = ViewsClient::new(config, Arc::new(LogNotifier))?;

    let Some(command) = args.get(1) else {
        bail!("{USAGE}");
    };

    match command.as_str() {
        "search" => {
            let params = client.search_params(args.get(2).cloned().unwrap_or_default());
            let per_page = arg_or(&args, 4, params.per_page)?;
            let params = params
                .page(arg_or(&args, 3, 1)?)
                .per_page(per_page)
                .sort(
                    args.get(5).cloned().unwrap_or_else(|| "title".to_string()),
                    arg_or(&args, 6, SortOrder::Asc)?,
                );
            let response = client.views.search(&params).await?;
            print_json(&response)
        }
        "get" => {
            let Some(id) = args.get(2) else {
                bail!("{USAGE}");
            };
            let view = client.views.get(id).await?;
            print_json(&view)
        }
        "delete" => {
            let Some(id) = args.get(2) else {
                bail!("{USAGE}");
            };
            let view = client.views.get(id).await?;
            client.views.delete(&view).await?;
            info!("Deleted view {id}");
            Ok(())
        }
        "for-value" => {
            let views = client.views.for_value().await?;
            print_json(&views)
        }
        "refresh-interval" => {
            let interval = client.system_config.minimum_refresh_interval().await?;
            println!("{}", interval.as_secs_f64());
            Ok(())
        }
        other => bail!("unknown command: {other}\n\n{USAGE}"),
    }
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .write_style(env_logger::WriteStyle::Always)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if let Err(e) = run(args).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}
