use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;
use stocksheet::api::{ConfigAction, ItemInput, StockApi};
use stocksheet::config::StockConfig;
use stocksheet::error::{Result, StockError};
use stocksheet::query::StatusFilter;
use stocksheet::store::fs::FileStore;
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands};
use print::{print_config, print_full_line, print_lines, print_messages, print_summary};

const MIN_ID_PREFIX: usize = 4;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so exported CSV on stdout stays clean.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

struct AppContext {
    api: StockApi<FileStore>,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { search, status }) => {
            handle_list(&ctx, search.as_deref().unwrap_or(""), status)
        }
        Some(Commands::Add { fields }) => handle_add(&mut ctx, fields.into()),
        Some(Commands::Edit { id, fields }) => handle_edit(&mut ctx, &id, fields.into()),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id),
        Some(Commands::Export { output, stdout }) => handle_export(&ctx, output, stdout),
        Some(Commands::Date { value }) => handle_date(&mut ctx, value),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, "", StatusFilter::All),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let config = StockConfig::load(&data_dir)?;
    let store = FileStore::new(data_dir.clone());
    Ok(AppContext {
        api: StockApi::new(store, data_dir, config),
    })
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "kolapasi", "stocksheet")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| StockError::Config("Could not determine a data directory; pass --data-dir".into()))
}

/// Accepts a full id or an unambiguous prefix of one, as shown in the list.
/// Anything else is passed through unchanged.
fn resolve_id(ctx: &AppContext, given: &str) -> Result<String> {
    let lines = ctx.api.list_items("", StatusFilter::All)?.listed_lines;
    if lines.iter().any(|l| l.item.id == given) || given.len() < MIN_ID_PREFIX {
        return Ok(given.to_string());
    }
    let mut candidates = lines.iter().filter(|l| l.item.id.starts_with(given));
    match (candidates.next(), candidates.next()) {
        (Some(only), None) => Ok(only.item.id.clone()),
        (Some(_), Some(_)) => Err(StockError::Validation(format!(
            "Id prefix {} matches more than one item",
            given
        ))),
        _ => Ok(given.to_string()),
    }
}

fn handle_list(ctx: &AppContext, search: &str, status: StatusFilter) -> Result<()> {
    let result = ctx.api.list_items(search, status)?;
    print_lines(&result.listed_lines);
    if let Some(summary) = &result.summary {
        print_summary(summary);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_add(ctx: &mut AppContext, input: ItemInput) -> Result<()> {
    let result = ctx.api.upsert_item(&input)?;
    print_messages(&result.messages);
    for item in &result.affected_items {
        println!("{}", item.id);
    }
    Ok(())
}

fn handle_edit(ctx: &mut AppContext, id: &str, changes: ItemInput) -> Result<()> {
    let id = resolve_id(ctx, id)?;
    let result = ctx.api.edit_item(&id, &changes)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_show(ctx: &AppContext, id: &str) -> Result<()> {
    let id = resolve_id(ctx, id)?;
    let result = ctx.api.show_item(&id)?;
    for line in &result.listed_lines {
        print_full_line(line);
    }
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let id = resolve_id(ctx, id)?;
    let result = ctx.api.delete_item(&id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, output: Option<PathBuf>, stdout: bool) -> Result<()> {
    if stdout {
        let result = ctx.api.export_csv()?;
        if let Some(csv) = &result.csv {
            print!("{}", csv);
        }
        for message in &result.messages {
            tracing::warn!("{}", message.content);
        }
        return Ok(());
    }

    let result = ctx.api.export_file(output.as_deref())?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_date(ctx: &mut AppContext, value: Option<String>) -> Result<()> {
    let result = match value {
        Some(v) => ctx.api.set_report_date(&v)?,
        None => ctx.api.report_date()?,
    };
    if result.messages.is_empty() {
        if let Some(date) = &result.report_date {
            println!("{}", date);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
