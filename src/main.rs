//! CLI entry point for blog-index

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blog_index::commands;
use blog_index::search::FacetFilter;
use blog_index::Blog;

#[derive(Parser)]
#[command(name = "blog-index")]
#[command(author = "Yukang Chen")]
#[command(version = "0.1.0")]
#[command(about = "Index, search and syndicate a markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, tags or topics
    List {
        /// Type of content to list (posts, tags, topics)
        #[arg(default_value = "posts")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show a single post
    Show {
        slug: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Fuzzy search the posts
    #[command(alias = "s")]
    Search {
        /// Free-text query; empty lists every post
        #[arg(default_value = "")]
        query: String,

        /// Only keep posts carrying this tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Only keep posts in this topic (repeatable)
        #[arg(long = "topic")]
        topics: Vec<String>,

        /// Maximum number of results to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Read queries from stdin
        #[arg(short, long)]
        interactive: bool,
    },

    /// Print the auto-hashtags of a content file
    Hashtags { file: PathBuf },

    /// Write sitemap.xml and rss.xml
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Topic of the new post (repeatable)
        #[arg(long = "topic")]
        topics: Vec<String>,
    },

    /// Remove the generated feeds
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_index=debug,info"
    } else {
        "blog_index=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let blog = Blog::new(&base_dir)?;

    match cli.command {
        Commands::List { r#type, json } => {
            commands::list::run(&blog, &r#type, json)?;
        }

        Commands::Show { slug, json } => {
            commands::show::run(&blog, &slug, json)?;
        }

        Commands::Search {
            query,
            tags,
            topics,
            limit,
            interactive,
        } => {
            let filter = FacetFilter::new(tags, topics);
            if interactive {
                commands::search::interactive(&blog, filter, limit).await?;
            } else {
                commands::search::run(&blog, &query, &filter, limit)?;
            }
        }

        Commands::Hashtags { file } => {
            let file = if file.is_absolute() {
                file
            } else {
                base_dir.join(file)
            };
            commands::hashtags::run(&blog, &file)?;
        }

        Commands::Generate { watch } => {
            tracing::info!("Generating feeds...");
            commands::generate::run(&blog)?;
            println!("Generated successfully!");

            if watch {
                commands::generate::watch(&blog).await?;
            }
        }

        Commands::New { title, topics } => {
            tracing::info!("Creating new post with title: {}", title);
            let path = commands::new::create_post(&blog, &title, &topics)?;
            println!("Created: {:?}", path);
        }

        Commands::Clean => {
            tracing::info!("Cleaning generated feeds...");
            commands::clean::run(&blog)?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
