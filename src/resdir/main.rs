use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use resdir::api::DirectoryApi;
use resdir::config::ResdirConfig;
use resdir::deeplink::DeepLinkRequest;
use resdir::error::{DirectoryError, Result};
use resdir::filter::FilterSelection;
use resdir::model::{Entity, EntityDraft};
use resdir::overrides::OverrideSets;
use resdir::store::fs::FileStore;
use resdir::store::DirectoryStore;
use resdir::supervisor::SearchState;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use unicode_width::UnicodeWidthStr;

mod args;
use args::{AddArgs, Cli, Commands, SearchArgs};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    store: FileStore,
    config: ResdirConfig,
    data_dir: PathBuf,
    verbose: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Search(search)) => handle_search(ctx, search),
        Some(Commands::Add(add)) => handle_add(ctx, add),
        Some(Commands::Stats) => handle_stats(ctx),
        Some(Commands::Init) => handle_init(ctx),
        None => handle_search(ctx, SearchArgs::default()),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = ResdirConfig::load(&data_dir).unwrap_or_default();
    let store = FileStore::new(data_dir.join(&config.catalog_file));

    Ok(AppContext {
        store,
        config,
        data_dir,
        verbose: cli.verbose,
    })
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Ok(dir) = std::env::var("RESDIR_DATA") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let proj_dirs = ProjectDirs::from("com", "resdir", "resdir")
        .ok_or_else(|| DirectoryError::Store("Could not determine data dir".to_string()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

fn handle_search(ctx: AppContext, args: SearchArgs) -> Result<()> {
    let deep_link = args
        .locate
        .as_deref()
        .map(DeepLinkRequest::from_query)
        .unwrap_or_default();

    let mut filter = FilterSelection::new();
    filter.set_service_category(args.service);
    filter.set_need_category(args.need);
    filter.set_kind(args.kind);
    filter.set_keyword(args.keyword);

    let mut overrides = OverrideSets::new();
    for id in args.pin {
        overrides.pin(id);
    }
    for id in args.hide {
        overrides.hide(id);
    }

    let api = DirectoryApi::with_session(ctx.store, filter, overrides, deep_link);

    match api.state() {
        SearchState::AwaitingInput => {
            println!("Please select search filters to view results.");
        }
        SearchState::NoResults => {
            println!("No results found. Please try different search criteria.");
        }
        SearchState::Failed(reason) => {
            return Err(DirectoryError::Store(reason.clone()));
        }
        // The synchronous driver settles every cycle before returning.
        SearchState::Loading => {}
        SearchState::Results(_) => {
            println!("{}", format!("{} results found", api.results().len()).dimmed());
            if ctx.verbose {
                print_full_entities(&api);
            } else {
                print_entities(&api);
            }
        }
    }

    if let Some(target) = args.export {
        let path = target.unwrap_or_else(|| PathBuf::from(&ctx.config.export_file));
        let mut file = std::fs::File::create(&path)?;
        api.write_export(&mut file)?;
        println!(
            "{}",
            format!(
                "Exported {} results to {}",
                api.results().len(),
                path.display()
            )
            .green()
        );
    }

    Ok(())
}

fn handle_add(ctx: AppContext, args: AddArgs) -> Result<()> {
    let mut api = DirectoryApi::new(ctx.store);
    let entity = api.add_entity(EntityDraft {
        name: args.name,
        description: args.description,
        website: args.website,
        phone: args.phone,
        email: args.email,
        location_zip: args.zip,
        service_category: args.service,
        need_category: args.need,
        kind: args.kind,
    })?;

    println!(
        "{}",
        format!("Added {} ({})", entity.name, entity.id).green()
    );
    Ok(())
}

fn handle_stats(ctx: AppContext) -> Result<()> {
    let stats = ctx.store.stats()?;
    println!(
        "{} zip codes, {} services, and {} organizations... and growing.",
        stats.zip_codes, stats.services, stats.entities
    );
    Ok(())
}

fn handle_init(ctx: AppContext) -> Result<()> {
    ctx.config.save(&ctx.data_dir)?;
    if ctx.store.init()? {
        println!(
            "{}",
            format!(
                "Initialized empty catalog at {}",
                ctx.store.catalog_path().display()
            )
            .green()
        );
    } else {
        println!(
            "Catalog already exists at {}",
            ctx.store.catalog_path().display()
        );
    }
    Ok(())
}

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const DETAIL_WIDTH: usize = 30;
const PIN_MARKER: &str = "⚲";
const HIGHLIGHT_MARKER: &str = "➔";

fn print_entities(api: &DirectoryApi<FileStore>) {
    let entities = api.results();

    let has_pinned = entities.iter().any(|e| api.is_pinned(&e.id));
    if has_pinned {
        println!();
    }

    let mut last_was_pinned = false;
    for entity in entities {
        let is_pinned = api.is_pinned(&entity.id);

        if last_was_pinned && !is_pinned {
            println!();
        }
        last_was_pinned = is_pinned;

        let marker = if api.highlight() == Some(entity.id.as_str()) {
            HIGHLIGHT_MARKER
        } else if is_pinned {
            PIN_MARKER
        } else {
            " "
        };
        let left_prefix = format!(" {} ", marker);

        let detail = format!(
            "{} · {}",
            entity.service_category.label(),
            entity.location_zip
        );
        let detail_padded = format!("{:<width$}", detail, width = DETAIL_WIDTH);

        let fixed_width = left_prefix.width() + DETAIL_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let name_display = truncate_to_width(&entity.name, available);
        let padding = available.saturating_sub(name_display.width());

        let name_colored = if api.highlight() == Some(entity.id.as_str()) {
            name_display.bold()
        } else if is_pinned {
            name_display.yellow()
        } else {
            name_display.normal()
        };

        println!(
            "{}{}{}{}{}",
            left_prefix,
            name_colored,
            " ".repeat(padding),
            detail_padded.dimmed(),
            format_time_ago(entity.created_at).dimmed()
        );
    }
}

fn print_full_entities(api: &DirectoryApi<FileStore>) {
    for (i, entity) in api.results().iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        print_entity_block(entity, api.is_pinned(&entity.id), api.highlight());
    }
}

fn print_entity_block(entity: &Entity, is_pinned: bool, highlight: Option<&str>) {
    let mut header = format!("{} ({})", entity.name, entity.kind.label());
    if is_pinned {
        header = format!("{} {}", PIN_MARKER, header);
    }
    if highlight == Some(entity.id.as_str()) {
        header = format!("{} {}", HIGHLIGHT_MARKER, header);
    }
    println!("{}", header.bold());
    println!("--------------------------------");
    println!("{}", entity.description);
    if let Some(website) = &entity.website {
        println!("Website: {}", website);
    }
    if let Some(phone) = &entity.phone {
        println!("Phone: {}", phone);
    }
    if let Some(email) = &entity.email {
        println!("Email: {}", email);
    }
    println!(
        "{}",
        format!(
            "{} · {} · {}",
            entity.service_category.label(),
            entity.need_category.label(),
            entity.location_zip
        )
        .dimmed()
    );
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut out = String::with_capacity(s.len());
    let mut used = 0;

    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            out.push('…');
            break;
        }
        out.push(c);
        used += w;
    }

    out
}

fn format_time_ago(timestamp: chrono::DateTime<chrono::Utc>) -> String {
    let now = chrono::Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
