use clap::Parser;
use recommender::{
    api::{create_router, AppState},
    cli::{commands, Cli, Commands},
    config::{categories::CategoryTable, Settings},
    Error, RecommendationEngine, Result,
};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recommender=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration, CLI arguments take precedence
    let mut settings = Settings::from_env()?;
    if let Some(dataset) = cli.dataset {
        settings.dataset.path = dataset;
    }
    if let Some(sample_size) = cli.sample_size {
        settings.dataset.sample_size = sample_size;
    }
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Recommend { query, top_n } => {
            let engine = commands::load_engine(&settings)?;
            let top_n = top_n.unwrap_or(settings.recommend.default_top_n);
            commands::recommend(&mut io::stdout(), &engine, &query, top_n)?;
        }
        Commands::Show { name } => {
            let engine = commands::load_engine(&settings)?;
            commands::show(&mut io::stdout(), &engine, &name)?;
        }
        Commands::Interactive => {
            let engine = commands::load_engine(&settings)?;
            commands::interactive(
                &engine,
                &mut io::stdin().lock(),
                &mut io::stdout(),
                settings.recommend.default_top_n,
            )?;
        }
        Commands::Categories => {
            let table = match &settings.recommend.category_config_path {
                Some(path) => CategoryTable::from_file(path)?,
                None => CategoryTable::default(),
            };
            commands::categories(&mut io::stdout(), &table)?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting recipe recommendation server");
    info!("Dataset: {}", settings.dataset.path.display());

    // The index is built before the listener is bound; no query sees a partial index
    let engine: RecommendationEngine = commands::load_engine(&settings)?;
    let recipes = engine.corpus().len();

    let state = AppState {
        engine: Arc::new(engine),
        settings: settings.clone(),
    };
    let app = create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Recipe Recommender");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("Recipes: {recipes}");
    println!("\nAPI Endpoints:");
    println!("  GET  /api/recommend?q=...&top_n=5");
    println!("  GET  /api/recipes/:name");
    println!("  GET  /api/categories");
    println!("  GET  /api/stats");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}
