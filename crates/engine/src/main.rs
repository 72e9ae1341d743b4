//! Guisebook Engine - Main entry point.
//!
//! Seeds the in-memory adapters and logs the derived sheet of every record.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use guisebook_engine::infrastructure::{
    clock::SystemClock,
    memory::{InMemoryCatalog, InMemoryChatLog, InMemoryRecordStore, SeedFile},
};
use guisebook_engine::{App, EngineConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "guisebook_engine=debug,guisebook_domain=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Guisebook Engine");

    let config = EngineConfig::from_env();
    tracing::info!(
        move_pack = %config.move_pack,
        seed_path = ?config.seed_path,
        speaker = %config.speaker,
        "Configuration loaded"
    );

    let store = InMemoryRecordStore::new();
    let catalog = InMemoryCatalog::new();
    if let Some(path) = &config.seed_path {
        let seed = SeedFile::load(path).await?;
        tracing::info!(path = %path.display(), records = seed.records.len(), "Seeding store");
        seed.install(&store, &catalog).await;
    }

    let app = App::new(
        config,
        Arc::new(store),
        Arc::new(catalog),
        Arc::new(InMemoryChatLog::new()),
        Arc::new(SystemClock::new()),
    );

    for id in app.sheets.list_ids().await? {
        let Some(record) = app.sheets.load(id).await? else {
            continue;
        };
        match &record.derived {
            Some(sheet) => tracing::info!(
                character_id = %id,
                name = %record.name,
                level = %sheet.level,
                tier = %sheet.tier,
                spark_slots = sheet.spark_slots,
                max_deck = sheet.gambits.max_deck_size,
                max_draw = sheet.gambits.max_draw_size,
                max_equip = sheet.gambits.max_equip,
                pending = record.flags.pending.total(),
                "Character sheet"
            ),
            None => tracing::info!(character_id = %id, name = %record.name, "Group record"),
        }
    }

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
