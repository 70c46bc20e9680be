//! Generate the sitemap and the feed

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::generator::FeedGenerator;
use crate::Blog;

/// Delay before a burst of file events triggers a rebuild
const WATCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Index the content root and write both feed documents
///
/// Unlike the in-process index, a missing content root is an error here.
pub fn run(blog: &Blog) -> Result<()> {
    let start = std::time::Instant::now();

    let index = blog.try_load_index()?;
    for collision in index.collisions() {
        println!(
            "Warning: slug '{}' is used by both {:?} and {:?}",
            collision.slug, collision.first, collision.second
        );
    }

    FeedGenerator::new(blog).generate(&index)?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Rebuild whenever a content file or the config changes
pub async fn watch(blog: &Blog) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(WATCH_DEBOUNCE, tx)?;

    debouncer
        .watcher()
        .watch(&blog.content_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", blog.content_dir);

    let config_path = blog.base_dir.join("_config.yml");
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        let name = e.path.to_string_lossy();
                        !name.contains(".git") && !name.ends_with('~')
                    })
                    .collect();
                if relevant.is_empty() {
                    continue;
                }

                for event in &relevant {
                    println!("File changed: {}", event.path.display());
                }

                // re-read the config so edits to it take effect
                let result = Blog::new(&blog.base_dir).and_then(|blog| run(&blog));
                match result {
                    Ok(()) => println!("Regenerated successfully!"),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}
