// Vachanamrut Reader - offline-first reader core
// Copyright (C) 2026 Vachanamrut Reader contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Desktop testing tool for the reader core

use anyhow::Context;
use clap::{Parser, Subcommand};
use vachanamrut_core::cache::{CacheStore, CacheWorker};
use vachanamrut_core::content::{ContentLoader, Language};
use vachanamrut_core::fetch::HttpFetcher;
use vachanamrut_core::storage::{Database, Preferences};

#[derive(Parser)]
#[command(name = "vachan-cli")]
#[command(about = "Vachanamrut reader core - desktop testing tool", long_about = None)]
struct Cli {
    /// App origin the relative resource paths resolve against
    #[arg(long, default_value = "http://localhost:8080/")]
    origin: String,

    /// Preferences database path
    #[arg(long, default_value = "./reader.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the corpus and list sections with their counts
    Sections {
        /// Content language
        #[arg(short, long, default_value = "gujarati")]
        lang: String,
    },
    /// Load the corpus and print one discourse
    Show {
        /// Discourse id (1-based)
        id: u32,
        #[arg(short, long, default_value = "gujarati")]
        lang: String,
    },
    /// Install the offline cache for a version and activate it
    InstallCache {
        /// Cache version string (the sole upgrade signal)
        #[arg(short, long)]
        version: String,
        /// Cache root directory
        #[arg(long, default_value = "./cache")]
        root: String,
    },
    /// List persisted favorites and the bookmark
    Saved,
}

fn parse_language(token: &str) -> anyhow::Result<Language> {
    Language::from_token(token).with_context(|| format!("unknown language: {token}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let fetcher = HttpFetcher::new(&cli.origin)?;

    match cli.command {
        Commands::Sections { lang } => {
            let store = ContentLoader::new(fetcher)
                .load(parse_language(&lang)?)
                .await?;
            println!("{} discourses loaded", store.len());
            for section in store.sections() {
                println!("  {} ({})", section.name, section.count());
            }
        }
        Commands::Show { id, lang } => {
            let store = ContentLoader::new(fetcher)
                .load(parse_language(&lang)?)
                .await?;
            let discourse = store
                .discourse(id)
                .with_context(|| format!("no discourse with id {id}"))?;
            println!("{}", discourse.label);
            if let Some(title) = &discourse.title {
                println!("{title}");
            }
            if let Some(setting) = &discourse.setting {
                println!("\n{setting}");
            }
            for paragraph in discourse.paragraphs() {
                println!("\n{paragraph}");
            }
        }
        Commands::InstallCache { version, root } => {
            let mut worker = CacheWorker::new(version, CacheStore::new(root), fetcher);
            worker.install().await.context("cache install failed")?;
            worker.activate().await.context("cache activation failed")?;
            println!("cache version {} installed and active", worker.version());
        }
        Commands::Saved => {
            let prefs = Preferences::new(Database::new(&cli.db).await?);
            match prefs.bookmark().await? {
                Some(id) => println!("bookmark: {id}"),
                None => println!("bookmark: none"),
            }
            let favorites = prefs.favorites().await?;
            println!("favorites: {favorites:?}");
        }
    }

    Ok(())
}
