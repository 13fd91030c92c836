use std::{
    io::{self, Write},
    path::Path,
    process,
};

use notion_blog::{
    application::{
        catalog::{PostCatalog, Visibility},
        error::AppError,
        render::{BlockRenderer, RenderOptions},
    },
    config::{self, CategoriesArgs, Command, NavigateArgs, PostsArgs, RenderArgs},
    domain::posts::PostFilter,
    infra::{error::InfraError, source, telemetry},
    presentation::views::{NavigationView, build_post_cards, to_json},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let summary = error.report().summary();
    if dispatcher::has_been_set() {
        error!(target = "notion_blog", error = %summary, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(target = "notion_blog", error = %summary, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli().map_err(InfraError::from)?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match cli_args.command {
        Command::Render(args) => run_render(&settings, args),
        Command::Posts(args) => run_posts(&settings, args),
        Command::Categories(args) => run_categories(&settings, args),
        Command::Navigate(args) => run_navigate(&settings, args),
    }
}

fn run_render(settings: &config::Settings, args: RenderArgs) -> Result<(), AppError> {
    let blocks = source::load_blocks(&args.file)?;
    let renderer = BlockRenderer::new(RenderOptions::from(&settings.render));
    let output = renderer.render_html(&blocks);

    info!(
        target = "notion_blog::render",
        path = %args.file.display(),
        rendered = output.rendered_blocks,
        skipped = output.skipped_blocks,
        images = output.image_count,
        "Rendered document"
    );

    let body = if args.json {
        to_json(&output)
            .map_err(|err| AppError::unexpected(format!("failed to encode output: {err}")))?
    } else {
        output.html
    };

    match args.output {
        Some(path) => write_file(&path, &body),
        None => write_stdout([body]),
    }
}

fn run_posts(settings: &config::Settings, args: PostsArgs) -> Result<(), AppError> {
    if args.category.as_deref().is_some_and(|category| category.trim().is_empty()) {
        return Err(AppError::validation("--category must not be blank"));
    }

    let visibility = if args.all {
        Visibility::All
    } else {
        Visibility::Published(&settings.content.published_status)
    };
    let catalog = PostCatalog::new(source::load_posts(&args.file)?, visibility);

    let filter = PostFilter {
        category: args.category,
        query: args.query.unwrap_or_default(),
    };
    let cards = build_post_cards(catalog.filter(&filter));

    info!(
        target = "notion_blog::posts",
        total = catalog.len(),
        matched = cards.len(),
        filtered = filter.is_active(),
        "Listed posts"
    );

    if args.json {
        let json = to_json(&cards)
            .map_err(|err| AppError::unexpected(format!("failed to encode output: {err}")))?;
        return write_stdout([json]);
    }
    write_stdout(cards.iter().map(|card| card.to_line()))
}

fn run_categories(settings: &config::Settings, args: CategoriesArgs) -> Result<(), AppError> {
    let catalog = PostCatalog::published(
        source::load_posts(&args.file)?,
        &settings.content.published_status,
    );
    write_stdout(catalog.categories())
}

fn run_navigate(settings: &config::Settings, args: NavigateArgs) -> Result<(), AppError> {
    let catalog = PostCatalog::published(
        source::load_posts(&args.file)?,
        &settings.content.published_status,
    );
    let neighbours = catalog.navigate(&args.id)?;
    write_stdout(NavigationView::new(&args.id, neighbours).to_lines())
}

fn write_stdout(lines: impl IntoIterator<Item = String>) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}").map_err(InfraError::from)?;
    }
    stdout.flush().map_err(InfraError::from)?;
    Ok(())
}

fn write_file(path: &Path, body: &str) -> Result<(), AppError> {
    std::fs::write(path, body).map_err(InfraError::from)?;
    info!(
        target = "notion_blog::render",
        path = %path.display(),
        bytes = body.len(),
        "Wrote output"
    );
    Ok(())
}
