use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use mc_server_api::{
    download::Manager,
    metadata::hangar::{Project, SearchPage},
    plugin::{PluginDirectory, CURATED_PLUGINS},
    resources,
};
use reqwest::Client;
use tokio::{task, time};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Discover and download PaperMC server plugins and builds")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search the plugin directory
    Search {
        query: String,
        /// Results per page
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
        /// Keep paging until this many results are gathered
        #[arg(long, conflicts_with_all = ["limit", "offset"])]
        all: Option<usize>,
    },
    /// Show the curated plugin set
    List,
    /// Download plugin jars (the curated set when no names are given)
    Fetch {
        names: Vec<String>,
        /// Only accept releases declaring this game version
        #[arg(short, long)]
        version: Option<String>,
        #[arg(short, long, default_value = "plugins")]
        output_dir: PathBuf,
        /// Redownload files that already exist
        #[arg(long)]
        force: bool,
        #[arg(long, default_value_t = 4)]
        concurrency: usize,
    },
    /// List known versions
    Versions {
        #[arg(value_enum, default_value = "game")]
        source: VersionSource,
    },
    /// Download a server jar
    Server {
        #[arg(value_enum)]
        flavor: ServerFlavor,
        /// Game version, defaulting to the newest one the API reports
        #[arg(short, long)]
        version: Option<String>,
        #[arg(short, long, default_value = "server")]
        output_dir: PathBuf,
        #[arg(long)]
        force: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum VersionSource {
    Game,
    Paper,
    Fabric,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ServerFlavor {
    Paper,
    Fabric,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let client = Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    match args.command {
        Command::Search {
            query,
            limit,
            offset,
            all,
        } => {
            let directory = PluginDirectory::new(client);
            let projects = match all {
                Some(wanted) => directory.search_collect(&query, wanted).await?,
                None => {
                    let page = directory.search(&query, SearchPage { limit, offset }).await?;
                    println!(
                        "{} of {} matching plugins\n",
                        page.result.len(),
                        page.pagination.count
                    );
                    page.result
                }
            };
            for project in &projects {
                render_project(project);
            }
        }
        Command::List => {
            let directory = PluginDirectory::new(client);
            for project in &directory.curated().await? {
                render_project(project);
            }
        }
        Command::Fetch {
            names,
            version,
            output_dir,
            force,
            concurrency,
        } => {
            let directory = PluginDirectory::new(client.clone());
            let names = if names.is_empty() {
                CURATED_PLUGINS.iter().map(|name| name.to_string()).collect()
            } else {
                names
            };

            let mut items = Vec::new();
            for name in &names {
                let Some(project) = directory.find(name).await? else {
                    eprintln!("{} no plugin named {}", style("skip:").yellow(), name);
                    continue;
                };
                match directory
                    .download_item(&project, &output_dir, version.as_deref())
                    .await?
                {
                    Some(item) => items.push(item),
                    None => eprintln!(
                        "{} {} has no matching artifact",
                        style("skip:").yellow(),
                        name
                    ),
                }
            }

            let downloader = Arc::new(Manager::new(client));
            let total: u64 = items.iter().filter_map(|item| item.size).sum();
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::with_template(
                    "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes}",
                )?
                .progress_chars("#>-"),
            );
            let pb_update_task = {
                let pb = pb.clone();
                let downloader = Arc::clone(&downloader);
                task::spawn(async move {
                    loop {
                        pb.set_position(downloader.downloaded_bytes());
                        time::sleep(Duration::from_millis(100)).await;
                    }
                })
            };

            directory
                .download_all(&items, &downloader, concurrency, force)
                .await?;
            pb_update_task.abort();
            pb.finish_and_clear();

            println!(
                "Fetched {} plugins ({}KB) into {}",
                items.len(),
                downloader.downloaded_bytes() / 1024,
                output_dir.display()
            );
        }
        Command::Versions { source } => match source {
            VersionSource::Game => {
                let manifest = resources::fetch_manifest(&client).await?;
                for version in manifest.releases() {
                    println!("{}", version.id);
                }
            }
            VersionSource::Paper => {
                let project = resources::fetch_paper_project(&client, "paper").await?;
                for version in project.versions.iter().rev() {
                    println!("{}", version);
                }
            }
            VersionSource::Fabric => {
                let versions = resources::fetch_game_versions(&client).await?;
                for version in versions.iter().filter(|version| version.stable) {
                    println!("{}", version.version);
                }
            }
        },
        Command::Server {
            flavor,
            version,
            output_dir,
            force,
        } => {
            let downloader = Manager::new(client.clone());
            let dest = match flavor {
                ServerFlavor::Paper => {
                    let project = resources::fetch_paper_project(&client, "paper").await?;
                    let version = match version {
                        Some(version) if project.has_version(&version) => version,
                        Some(version) => {
                            return Err(mc_server_api::Error::UnknownVersion(version).into())
                        }
                        None => project
                            .newest_version()
                            .context("no versions reported for paper")?
                            .to_owned(),
                    };
                    let builds = resources::fetch_paper_builds(&client, "paper", &version).await?;
                    let build = builds
                        .latest()
                        .ok_or_else(|| mc_server_api::Error::UnknownVersion(version.clone()))?;
                    let file = build
                        .application()
                        .context("build has no application artifact")?;
                    let url =
                        resources::paper_download_url("paper", &version, build.build, &file.name);
                    let dest = output_dir.join(&file.name);
                    downloader
                        .download_file_if_absent(&url, &dest, None, force)
                        .await?;
                    dest
                }
                ServerFlavor::Fabric => {
                    let games = resources::fetch_game_versions(&client).await?;
                    let version = match version {
                        Some(version) if games.iter().any(|game| game.version == version) => {
                            version
                        }
                        Some(version) => {
                            return Err(mc_server_api::Error::UnknownVersion(version).into())
                        }
                        None => games
                            .iter()
                            .find(|game| game.stable)
                            .context("no stable game version reported")?
                            .version
                            .clone(),
                    };
                    let loaders = resources::fetch_loader_versions(&client).await?;
                    let loader = loaders
                        .iter()
                        .find(|loader| loader.stable)
                        .context("no stable loader version reported")?;
                    let installers = resources::fetch_installer_versions(&client).await?;
                    let installer = installers
                        .iter()
                        .find(|installer| installer.stable)
                        .context("no stable installer version reported")?;
                    let url = resources::fabric_server_jar_url(
                        &version,
                        &loader.version,
                        &installer.version,
                    );
                    let dest = output_dir.join(format!(
                        "fabric-server-mc.{}-loader.{}-launcher.{}.jar",
                        version, loader.version, installer.version
                    ));
                    downloader
                        .download_file_if_absent(&url, &dest, None, force)
                        .await?;
                    dest
                }
            };
            println!("{} {}", style("Saved").green().bold(), dest.display());
        }
    }

    Ok(())
}

/// Fixed terminal layout for one plugin; any missing field skips the entry.
fn render_project(project: &Project) {
    let (Some(name), Some(desc), Some(category), Some(created), Some(updated), Some(stats)) = (
        project.name.as_deref(),
        project.description.as_deref(),
        project.category,
        project.created_at,
        project.last_updated,
        project.stats,
    ) else {
        return;
    };

    println!("{} - {}", style(name).green().bold(), desc);
    println!("  Updated: {}", style(format_date(updated)).red());
    println!("  Created: {}", style(format_date(created)).red());
    println!(
        "  downloads: {} views: {} stars: {}",
        style(stats.downloads).yellow(),
        style(stats.views).yellow(),
        style(stats.stars).yellow()
    );
    println!("  Category: {}", style(category.as_str()).yellow());
    println!();
}

fn format_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S %:z")
        .to_string()
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Args::command().debug_assert();
    }
}
