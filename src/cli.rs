use clap::builder::PossibleValuesParser;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use wiki_search_builder_lib::query_builder::{SearchFieldSet, CATEGORY_OPTIONS};

#[derive(Parser, Debug)]
#[command(name = "wiki-search", version, about = "Build and run Wikipedia advanced-search queries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Increase verbosity. Can be used multiple times (e.g., -v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// UI language for messages and labels
    #[arg(long, global = true, env = "WIKI_SEARCH_LANG")]
    pub lang: Option<String>,

    /// Configuration file (YAML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the search string for the given fields
    Generate {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Generate the search string and run it against Wikipedia
    Search {
        #[command(flatten)]
        fields: FieldArgs,
        #[command(flatten)]
        search: SearchArgs,
    },
    /// Browse and apply built-in presets
    Presets {
        #[command(subcommand)]
        command: PresetCommands,
    },
    /// Manage saved searches
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
    /// List wiki languages and their search help pages
    Languages,
    /// Manage the API response cache
    Cache {
        #[command(subcommand)]
        command: CacheCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum PresetCommands {
    /// List preset categories and presets
    List,
    /// Show a preset's fields and query
    Show { category: String, preset: String },
    /// Fill the form from a preset, optionally searching right away
    Apply {
        category: String,
        preset: String,
        #[arg(long)]
        search: bool,
        #[command(flatten)]
        options: SearchArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SavedCommands {
    /// Save the given fields under a name (replaces an existing one)
    Save {
        name: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// List saved searches, newest first
    List,
    /// Show a saved search
    Show { name: String },
    /// Delete a saved search
    Delete { name: String },
    /// Load a saved search, optionally searching right away
    Apply {
        name: String,
        #[arg(long)]
        search: bool,
        #[command(flatten)]
        options: SearchArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Remove all cached API responses
    Clear,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Wiki language to search (e.g. de, en)
    #[arg(long = "target-lang")]
    pub target_lang: Option<String>,
    /// Maximum number of results
    #[arg(long)]
    pub limit: Option<usize>,
    /// Skip fetching article summaries
    #[arg(long)]
    pub no_summaries: bool,
}

/// Search form fields.
#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    /// Main search terms
    #[arg(long, short = 'q')]
    pub query: Option<String>,
    /// Restrict the main terms to page titles
    #[arg(long)]
    pub intitle: bool,
    /// Exact phrase
    #[arg(long)]
    pub exact: Option<String>,
    /// Words that must not appear
    #[arg(long)]
    pub without: Option<String>,
    /// At least one of these words
    #[arg(long)]
    pub any: Option<String>,
    #[arg(long)]
    pub incategory: Option<String>,
    /// Category including its subcategories
    #[arg(long)]
    pub deepcat: Option<String>,
    /// Pages linking to this page
    #[arg(long)]
    pub linksto: Option<String>,
    /// Category from the fixed list
    #[arg(long, value_parser = PossibleValuesParser::new(CATEGORY_OPTIONS))]
    pub category: Option<String>,
    /// Text or /regex/ in the wikitext
    #[arg(long)]
    pub insource: Option<String>,
    #[arg(long)]
    pub hastemplate: Option<String>,
    #[arg(long)]
    pub filetype: Option<String>,
    #[arg(long = "filesize-min")]
    pub filesize_min: Option<String>,
    #[arg(long = "filesize-max")]
    pub filesize_max: Option<String>,
    #[arg(long)]
    pub subpageof: Option<String>,
    #[arg(long)]
    pub prefix: Option<String>,
}

impl From<FieldArgs> for SearchFieldSet {
    fn from(args: FieldArgs) -> Self {
        SearchFieldSet {
            main_query: args.query.unwrap_or_default(),
            exact_phrase: args.exact.unwrap_or_default(),
            without_words: args.without.unwrap_or_default(),
            any_words: args.any.unwrap_or_default(),
            in_category: args.incategory.unwrap_or_default(),
            deep_category: args.deepcat.unwrap_or_default(),
            link_from: args.linksto.unwrap_or_default(),
            category: args.category.unwrap_or_default(),
            in_source: args.insource.unwrap_or_default(),
            has_template: args.hastemplate.unwrap_or_default(),
            file_type: args.filetype.unwrap_or_default(),
            file_size_min: args.filesize_min.unwrap_or_default(),
            file_size_max: args.filesize_max.unwrap_or_default(),
            subpage_of: args.subpageof.unwrap_or_default(),
            prefix: args.prefix.unwrap_or_default(),
            title_only: args.intitle,
        }
    }
}
