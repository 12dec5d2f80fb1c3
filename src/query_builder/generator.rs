use serde::{Deserialize, Serialize};

use super::fields::SearchFieldSet;

/// Shown in place of the query when no field contributed a token.
pub const NO_PARAMETERS_MESSAGE: &str = "No parameters entered.";

/// What to do with a `"` typed into a field that is emitted inside quotes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteHandling {
    /// Emit `\\` and `\"` so the quoted token stays closed.
    #[default]
    Escape,
    /// Pass the value through untouched.
    Verbatim,
}

/// Result of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedQuery {
    pub query: String,
}

impl GeneratedQuery {
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }

    /// Text for display: the query, or [`NO_PARAMETERS_MESSAGE`] when empty.
    pub fn display(&self) -> &str {
        self.display_or(NO_PARAMETERS_MESSAGE)
    }

    /// Like [`display`](Self::display) with a caller-supplied (e.g. translated) fallback.
    pub fn display_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.query.is_empty() {
            fallback
        } else {
            &self.query
        }
    }

    /// The query, or `None` when no field contributed a token.
    pub fn into_option(self) -> Option<String> {
        if self.query.is_empty() {
            None
        } else {
            Some(self.query)
        }
    }
}

/// Maps a [`SearchFieldSet`] to a CirrusSearch query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryBuilder {
    quote_handling: QuoteHandling,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote_handling(mut self, quote_handling: QuoteHandling) -> Self {
        self.quote_handling = quote_handling;
        self
    }

    pub fn quote_handling(&self) -> QuoteHandling {
        self.quote_handling
    }

    /// Ordered tokens contributed by the non-blank fields.
    ///
    /// A negation group (`-a -b`) counts as a single token.
    pub fn tokens(&self, fields: &SearchFieldSet) -> Vec<String> {
        let mut tokens = Vec::new();

        let main_query = fields.main_query.trim();
        if !main_query.is_empty() {
            if fields.title_only {
                tokens.push(format!("intitle:{}", self.quoted(main_query)));
            } else {
                tokens.push(main_query.to_string());
            }
        }

        let exact_phrase = fields.exact_phrase.trim();
        if !exact_phrase.is_empty() {
            tokens.push(self.quoted(exact_phrase));
        }

        let excluded: Vec<String> = fields
            .without_words
            .split_whitespace()
            .map(|word| format!("-{}", word))
            .collect();
        if !excluded.is_empty() {
            tokens.push(excluded.join(" "));
        }

        let alternatives: Vec<&str> = fields.any_words.split_whitespace().collect();
        if !alternatives.is_empty() {
            tokens.push(format!("({})", alternatives.join(" OR ")));
        }

        self.push_quoted(&mut tokens, "incategory:", &fields.in_category);
        self.push_quoted(&mut tokens, "deepcat:", &fields.deep_category);
        self.push_quoted(&mut tokens, "linksto:", &fields.link_from);
        // The dropdown is additive with the free-text category field.
        self.push_quoted(&mut tokens, "incategory:", &fields.category);
        push_bare(&mut tokens, "insource:", &fields.in_source);
        self.push_quoted(&mut tokens, "hastemplate:", &fields.has_template);
        push_bare(&mut tokens, "filetype:", &fields.file_type);
        push_bare(&mut tokens, "filesize:>=", &fields.file_size_min);
        push_bare(&mut tokens, "filesize:<=", &fields.file_size_max);
        self.push_quoted(&mut tokens, "subpageof:", &fields.subpage_of);
        // prefix: swallows the rest of the query, so it goes last.
        push_bare(&mut tokens, "prefix:", &fields.prefix);

        tokens
    }

    /// Generate the query string; empty when nothing was entered.
    pub fn generate(&self, fields: &SearchFieldSet) -> String {
        self.tokens(fields).join(" ").trim().to_string()
    }

    pub fn build(&self, fields: &SearchFieldSet) -> GeneratedQuery {
        GeneratedQuery {
            query: self.generate(fields),
        }
    }

    fn quoted(&self, value: &str) -> String {
        match self.quote_handling {
            QuoteHandling::Escape => format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")),
            QuoteHandling::Verbatim => format!("\"{}\"", value),
        }
    }

    fn push_quoted(&self, tokens: &mut Vec<String>, operator: &str, value: &str) {
        let value = value.trim();
        if !value.is_empty() {
            tokens.push(format!("{}{}", operator, self.quoted(value)));
        }
    }
}

fn push_bare(tokens: &mut Vec<String>, operator: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        tokens.push(format!("{}{}", operator, value));
    }
}

/// Generate with the default builder.
pub fn generate(fields: &SearchFieldSet) -> String {
    QueryBuilder::default().generate(fields)
}
