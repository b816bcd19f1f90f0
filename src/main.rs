use std::{process, sync::Arc};

use masthead::{
    application::{
        clock::SystemClock,
        error::AppError,
        posts::PostService,
        repos::PostStore,
    },
    config,
    infra::{
        error::InfraError,
        http::{self, HttpState},
        store::JsonFilePostStore,
        telemetry,
    },
    presentation::views::LayoutChrome,
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Init(args) => run_init(settings, args).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let store = Arc::new(JsonFilePostStore::new(settings.storage.path.clone()));

    // The file is not created implicitly; a missing dataset answers 503 until `init` runs.
    match store.load_all().await {
        Ok(posts) => info!(
            target = "masthead::serve",
            path = %settings.storage.path.display(),
            posts = posts.len(),
            "post dataset loaded"
        ),
        Err(err) => warn!(
            target = "masthead::serve",
            path = %settings.storage.path.display(),
            error = %err,
            "post dataset is not readable yet"
        ),
    }

    let state = HttpState {
        posts: Arc::new(PostService::new(store, Arc::new(SystemClock))),
        chrome: LayoutChrome::new(settings.site.title.clone()),
    };
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;

    info!(
        target = "masthead::serve",
        addr = %settings.server.addr,
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!(target = "masthead::serve", "server stopped");
    Ok(())
}

async fn run_init(settings: config::Settings, args: config::InitArgs) -> Result<(), AppError> {
    let store = JsonFilePostStore::new(settings.storage.path);

    if store.initialize(args.force).await? {
        info!(
            target = "masthead::init",
            path = %store.path().display(),
            "wrote empty post dataset"
        );
    } else {
        warn!(
            target = "masthead::init",
            path = %store.path().display(),
            "post dataset already exists; pass --force to replace it"
        );
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target = "masthead::serve", error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!(target = "masthead::serve", "shutdown signal received");
}
