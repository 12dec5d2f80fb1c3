mod cli;

use anyhow::Context;
use clap::{CommandFactory, Parser};

use cli::{CacheCommands, Cli, Commands, PresetCommands, SavedCommands, SearchArgs};
use wiki_search_builder_lib::commands::{self, search::SearchOptions, AppState};
use wiki_search_builder_lib::config::AppConfig;
use wiki_search_builder_lib::logger;
use wiki_search_builder_lib::presentation::{self as view, OutputFormat};
use wiki_search_builder_lib::query_builder::SearchFieldSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command_line = Cli::parse();

    let mut cfg = AppConfig::load(command_line.config.as_deref()).context("Load configuration error")?;
    if let Some(lang) = &command_line.lang {
        cfg.ui_language = lang.trim().to_string();
        cfg.validate().context("Invalid --lang")?;
    }

    let paths = cfg.paths();
    let mut log_config = cfg.log.clone();
    if log_config.log_dir.is_none() {
        match paths.ensure_exist() {
            Ok(()) => log_config.log_dir = Some(paths.log_directory()),
            Err(e) => eprintln!(
                "Warning: file logging disabled, cannot create {}: {}",
                paths.data_dir.display(),
                e
            ),
        }
    }
    log_config.level = log_config.level.raised_by(command_line.verbose);
    logger::initialize_logging_with_config(log_config)?;

    let Some(command) = command_line.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let state = AppState::new(cfg);
    let format = OutputFormat::from_json_flag(command_line.json);
    let output = run(&state, command, format).await.map_err(anyhow::Error::msg)?;
    print!("{}", output);
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}

async fn run(state: &AppState, command: Commands, format: OutputFormat) -> Result<String, String> {
    let ctx = &state.i18n;
    match command {
        Commands::Generate { fields } => {
            let fields = SearchFieldSet::from(fields);
            let generated = commands::search::generate_query(state, &fields);
            match format {
                OutputFormat::Json => view::to_json(&generated),
                OutputFormat::Text => Ok(view::render_generated(ctx, &generated)),
            }
        }
        Commands::Search { fields, search } => run_search(state, &SearchFieldSet::from(fields), search, format).await,
        Commands::Presets { command } => match command {
            PresetCommands::List => {
                let catalog = commands::presets::list_presets(state);
                match format {
                    OutputFormat::Json => view::to_json(catalog),
                    OutputFormat::Text => Ok(view::render_preset_catalog(ctx, catalog)),
                }
            }
            PresetCommands::Show { category, preset } => {
                let applied = commands::presets::apply_preset(state, &category, &preset)?;
                match format {
                    OutputFormat::Json => view::to_json(&applied),
                    OutputFormat::Text => {
                        let title = format!("{} / {}", applied.category_name, applied.preset_name);
                        Ok(view::render_preset(ctx, &title, &applied.fields, &applied.generated))
                    }
                }
            }
            PresetCommands::Apply {
                category,
                preset,
                search,
                options,
            } => {
                let applied = commands::presets::apply_preset(state, &category, &preset)?;
                if search {
                    run_search(state, &applied.fields, options, format).await
                } else {
                    match format {
                        OutputFormat::Json => view::to_json(&applied.generated),
                        OutputFormat::Text => Ok(view::render_generated(ctx, &applied.generated)),
                    }
                }
            }
        },
        Commands::Saved { command } => match command {
            SavedCommands::Save { name, fields } => {
                let saved = commands::saved::save_search(state, &name, &SearchFieldSet::from(fields))?;
                match format {
                    OutputFormat::Json => view::to_json(&saved),
                    OutputFormat::Text => Ok(ctx.format("msg-saved", "Saved search \"{name}\".", &[("name", saved.name.as_str())])),
                }
            }
            SavedCommands::List => {
                let searches = commands::saved::list_saved_searches(state)?;
                match format {
                    OutputFormat::Json => view::to_json(&searches),
                    OutputFormat::Text => Ok(view::render_saved_list(ctx, &searches)),
                }
            }
            SavedCommands::Show { name } => {
                let applied = commands::saved::apply_saved_search(state, &name)?;
                match format {
                    OutputFormat::Json => view::to_json(&applied.saved),
                    OutputFormat::Text => Ok(view::render_saved(ctx, &applied.saved, &applied.generated)),
                }
            }
            SavedCommands::Delete { name } => {
                commands::saved::delete_saved_search(state, &name)?;
                match format {
                    OutputFormat::Json => view::to_json(&serde_json::json!({ "deleted": name })),
                    OutputFormat::Text => Ok(ctx.format("msg-deleted", "Deleted saved search \"{name}\".", &[("name", name.as_str())])),
                }
            }
            SavedCommands::Apply { name, search, options } => {
                let applied = commands::saved::apply_saved_search(state, &name)?;
                if search {
                    run_search(state, &applied.saved.fields, options, format).await
                } else {
                    match format {
                        OutputFormat::Json => view::to_json(&applied.generated),
                        OutputFormat::Text => Ok(view::render_generated(ctx, &applied.generated)),
                    }
                }
            }
        },
        Commands::Languages => {
            let languages = commands::system::list_languages(state);
            match format {
                OutputFormat::Json => view::to_json(&languages),
                OutputFormat::Text => Ok(view::render_languages(ctx, &languages)),
            }
        }
        Commands::Cache { command } => match command {
            CacheCommands::Clear => {
                let count = commands::system::clear_cache(state)?;
                match format {
                    OutputFormat::Json => view::to_json(&serde_json::json!({ "removed": count })),
                    OutputFormat::Text => {
                        let count = count.to_string();
                        Ok(ctx.format("msg-cache-cleared", "Removed {count} cached responses.", &[("count", count.as_str())]))
                    }
                }
            }
        },
    }
}

async fn run_search(
    state: &AppState,
    fields: &SearchFieldSet,
    args: SearchArgs,
    format: OutputFormat,
) -> Result<String, String> {
    let options = SearchOptions {
        target_language: args.target_lang,
        limit: args.limit,
        skip_summaries: args.no_summaries,
    };

    if format == OutputFormat::Text {
        eprintln!("{}", state.i18n.text("msg-searching", "Searching..."));
    }
    let result = commands::search::search(state, fields, &options).await?;

    match format {
        OutputFormat::Json => view::to_json(&result),
        OutputFormat::Text => Ok(view::render_search(&state.i18n, &result)),
    }
}
