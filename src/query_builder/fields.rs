use serde::{Deserialize, Serialize};

/// Text inputs of the search form, in the order their tokens are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    MainQuery,
    ExactPhrase,
    WithoutWords,
    AnyWords,
    InCategory,
    DeepCategory,
    LinkFrom,
    Category,
    InSource,
    HasTemplate,
    FileType,
    FileSizeMin,
    FileSizeMax,
    SubpageOf,
    Prefix,
}

impl SearchField {
    pub const ALL: [SearchField; 15] = [
        SearchField::MainQuery,
        SearchField::ExactPhrase,
        SearchField::WithoutWords,
        SearchField::AnyWords,
        SearchField::InCategory,
        SearchField::DeepCategory,
        SearchField::LinkFrom,
        SearchField::Category,
        SearchField::InSource,
        SearchField::HasTemplate,
        SearchField::FileType,
        SearchField::FileSizeMin,
        SearchField::FileSizeMax,
        SearchField::SubpageOf,
        SearchField::Prefix,
    ];

    /// Identifier of the form input; also the prefix of its translation keys.
    pub fn form_id(&self) -> &'static str {
        match self {
            SearchField::MainQuery => "search-query",
            SearchField::ExactPhrase => "exact-phrase",
            SearchField::WithoutWords => "without-words",
            SearchField::AnyWords => "any-words",
            SearchField::InCategory => "incategory-value",
            SearchField::DeepCategory => "deepcat-value",
            SearchField::LinkFrom => "linkfrom-value",
            SearchField::Category => "category-select",
            SearchField::InSource => "insource-value",
            SearchField::HasTemplate => "hastemplate-value",
            SearchField::FileType => "filetype-value",
            SearchField::FileSizeMin => "filesize-min",
            SearchField::FileSizeMax => "filesize-max",
            SearchField::SubpageOf => "subpageof-value",
            SearchField::Prefix => "prefix-value",
        }
    }

    pub fn from_form_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|field| field.form_id() == id)
    }
}

/// Form id of the title-only checkbox.
pub const TITLE_ONLY_FORM_ID: &str = "option-intitle";

/// Options offered by the category dropdown. Labels come from `category-<value>` translations.
pub const CATEGORY_OPTIONS: [&str; 8] = [
    "Science",
    "History",
    "Geography",
    "Art",
    "Technology",
    "Sports",
    "Music",
    "Literature",
];

/// Every input of the search form.
///
/// Values are stored as typed; trimming happens at generation time so that a
/// snapshot keeps exactly what the user entered. Deserialization accepts both
/// the snake_case names and the form ids (`search-query`, `option-intitle`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFieldSet {
    #[serde(alias = "search-query")]
    pub main_query: String,
    #[serde(alias = "exact-phrase")]
    pub exact_phrase: String,
    #[serde(alias = "without-words")]
    pub without_words: String,
    #[serde(alias = "any-words")]
    pub any_words: String,
    #[serde(alias = "incategory-value")]
    pub in_category: String,
    #[serde(alias = "deepcat-value")]
    pub deep_category: String,
    #[serde(alias = "linkfrom-value")]
    pub link_from: String,
    #[serde(alias = "category-select")]
    pub category: String,
    #[serde(alias = "insource-value")]
    pub in_source: String,
    #[serde(alias = "hastemplate-value")]
    pub has_template: String,
    #[serde(alias = "filetype-value")]
    pub file_type: String,
    #[serde(alias = "filesize-min")]
    pub file_size_min: String,
    #[serde(alias = "filesize-max")]
    pub file_size_max: String,
    #[serde(alias = "subpageof-value")]
    pub subpage_of: String,
    #[serde(alias = "prefix-value")]
    pub prefix: String,
    #[serde(alias = "option-intitle")]
    pub title_only: bool,
}

impl SearchFieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, field: SearchField) -> &str {
        match field {
            SearchField::MainQuery => &self.main_query,
            SearchField::ExactPhrase => &self.exact_phrase,
            SearchField::WithoutWords => &self.without_words,
            SearchField::AnyWords => &self.any_words,
            SearchField::InCategory => &self.in_category,
            SearchField::DeepCategory => &self.deep_category,
            SearchField::LinkFrom => &self.link_from,
            SearchField::Category => &self.category,
            SearchField::InSource => &self.in_source,
            SearchField::HasTemplate => &self.has_template,
            SearchField::FileType => &self.file_type,
            SearchField::FileSizeMin => &self.file_size_min,
            SearchField::FileSizeMax => &self.file_size_max,
            SearchField::SubpageOf => &self.subpage_of,
            SearchField::Prefix => &self.prefix,
        }
    }

    fn text_mut(&mut self, field: SearchField) -> &mut String {
        match field {
            SearchField::MainQuery => &mut self.main_query,
            SearchField::ExactPhrase => &mut self.exact_phrase,
            SearchField::WithoutWords => &mut self.without_words,
            SearchField::AnyWords => &mut self.any_words,
            SearchField::InCategory => &mut self.in_category,
            SearchField::DeepCategory => &mut self.deep_category,
            SearchField::LinkFrom => &mut self.link_from,
            SearchField::Category => &mut self.category,
            SearchField::InSource => &mut self.in_source,
            SearchField::HasTemplate => &mut self.has_template,
            SearchField::FileType => &mut self.file_type,
            SearchField::FileSizeMin => &mut self.file_size_min,
            SearchField::FileSizeMax => &mut self.file_size_max,
            SearchField::SubpageOf => &mut self.subpage_of,
            SearchField::Prefix => &mut self.prefix,
        }
    }

    pub fn set_text(&mut self, field: SearchField, value: impl Into<String>) {
        *self.text_mut(field) = value.into();
    }

    /// Builder-style setter, handy for tests and presets.
    pub fn with(mut self, field: SearchField, value: impl Into<String>) -> Self {
        self.set_text(field, value);
        self
    }

    pub fn with_title_only(mut self, title_only: bool) -> Self {
        self.title_only = title_only;
        self
    }

    /// Apply `f` to every text field, keeping the flags.
    pub fn map_text<F>(&self, mut f: F) -> Self
    where
        F: FnMut(SearchField, &str) -> String,
    {
        let mut mapped = self.clone();
        for field in SearchField::ALL {
            let value = f(field, self.text(field));
            mapped.set_text(field, value);
        }
        mapped
    }

    /// True when no text field holds anything but whitespace.
    ///
    /// The title-only flag alone does not make a field set non-blank.
    pub fn is_blank(&self) -> bool {
        SearchField::ALL
            .iter()
            .all(|field| self.text(*field).trim().is_empty())
    }

    /// Fields holding a non-blank value, in emission order.
    pub fn populated_fields(&self) -> Vec<SearchField> {
        SearchField::ALL
            .iter()
            .copied()
            .filter(|field| !self.text(*field).trim().is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_id_lookup() {
        for field in SearchField::ALL {
            assert_eq!(SearchField::from_form_id(field.form_id()), Some(field));
        }
        assert_eq!(SearchField::from_form_id("option-wildcard"), None);
    }

    #[test]
    fn test_deserialize_from_form_ids() {
        let json = r#"{
            "search-query": "Rome",
            "option-intitle": true,
            "incategory-value": "Ancient Rome"
        }"#;
        let fields: SearchFieldSet = serde_json::from_str(json).unwrap();
        assert_eq!(fields.main_query, "Rome");
        assert!(fields.title_only);
        assert_eq!(fields.in_category, "Ancient Rome");
        assert!(fields.exact_phrase.is_empty());
    }

    #[test]
    fn test_blank_detection() {
        assert!(SearchFieldSet::new().is_blank());
        assert!(SearchFieldSet::new().with_title_only(true).is_blank());
        assert!(SearchFieldSet::new().with(SearchField::AnyWords, "  \t ").is_blank());
        assert!(!SearchFieldSet::new().with(SearchField::Prefix, "Help:").is_blank());
    }

    #[test]
    fn test_populated_fields_follow_emission_order() {
        let fields = SearchFieldSet::new()
            .with(SearchField::FileType, "png")
            .with(SearchField::MainQuery, "moon");
        assert_eq!(
            fields.populated_fields(),
            vec![SearchField::MainQuery, SearchField::FileType]
        );
    }
}
