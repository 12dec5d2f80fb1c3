// Integration tests for query string generation

use rstest::rstest;
use wiki_search_builder_lib::query_builder::{
    generate, QueryBuilder, QuoteHandling, SearchField, SearchFieldSet, NO_PARAMETERS_MESSAGE,
};

fn single(field: SearchField, value: &str) -> SearchFieldSet {
    SearchFieldSet::new().with(field, value)
}

/// Every field populated, in form order.
fn full_form() -> SearchFieldSet {
    SearchFieldSet::new()
        .with(SearchField::MainQuery, "Rome")
        .with(SearchField::ExactPhrase, "Julius Caesar")
        .with(SearchField::WithoutWords, "film")
        .with(SearchField::AnyWords, "empire republic")
        .with(SearchField::InCategory, "Ancient Rome")
        .with(SearchField::DeepCategory, "History")
        .with(SearchField::LinkFrom, "Caesar")
        .with(SearchField::Category, "History")
        .with(SearchField::InSource, "consul")
        .with(SearchField::HasTemplate, "Infobox")
        .with(SearchField::FileType, "bitmap")
        .with(SearchField::FileSizeMin, "100")
        .with(SearchField::FileSizeMax, "500")
        .with(SearchField::SubpageOf, "Portal:Rome")
        .with(SearchField::Prefix, "Rom")
}

#[rstest]
#[case(SearchField::MainQuery, "Rome", "Rome")]
#[case(SearchField::ExactPhrase, "Julius Caesar", "\"Julius Caesar\"")]
#[case(SearchField::WithoutWords, "cat", "-cat")]
#[case(SearchField::AnyWords, "red", "(red)")]
#[case(SearchField::InCategory, "Physics", "incategory:\"Physics\"")]
#[case(SearchField::DeepCategory, "Science", "deepcat:\"Science\"")]
#[case(SearchField::LinkFrom, "Einstein", "linksto:\"Einstein\"")]
#[case(SearchField::Category, "Music", "incategory:\"Music\"")]
#[case(SearchField::InSource, "/foo.*bar/", "insource:/foo.*bar/")]
#[case(SearchField::HasTemplate, "Infobox person", "hastemplate:\"Infobox person\"")]
#[case(SearchField::FileType, "drawing", "filetype:drawing")]
#[case(SearchField::FileSizeMin, "100", "filesize:>=100")]
#[case(SearchField::FileSizeMax, "500", "filesize:<=500")]
#[case(SearchField::SubpageOf, "Wikipedia:Help", "subpageof:\"Wikipedia:Help\"")]
#[case(SearchField::Prefix, "Help:", "prefix:Help:")]
fn test_single_field_yields_its_token(#[case] field: SearchField, #[case] value: &str, #[case] expected: &str) {
    assert_eq!(generate(&single(field, value)), expected);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t \n")]
fn test_blank_input_generates_nothing(#[case] blank: &str) {
    let mut fields = SearchFieldSet::new();
    for field in SearchField::ALL {
        fields.set_text(field, blank);
    }
    let generated = QueryBuilder::new().build(&fields);
    assert_eq!(generated.query, "");
    assert_eq!(generated.display(), NO_PARAMETERS_MESSAGE);
}

#[test]
fn test_full_form_follows_fixed_order() {
    assert_eq!(
        generate(&full_form()),
        "Rome \"Julius Caesar\" -film (empire OR republic) incategory:\"Ancient Rome\" \
         deepcat:\"History\" linksto:\"Caesar\" incategory:\"History\" insource:consul \
         hastemplate:\"Infobox\" filetype:bitmap filesize:>=100 filesize:<=500 \
         subpageof:\"Portal:Rome\" prefix:Rom"
    );
}

#[test]
fn test_order_does_not_depend_on_population_order() {
    let mut reversed = SearchFieldSet::new();
    let reference = full_form();
    for field in SearchField::ALL.iter().rev() {
        reversed.set_text(*field, reference.text(*field));
    }
    assert_eq!(generate(&reversed), generate(&reference));

    let tokens = QueryBuilder::new().tokens(&reference);
    assert_eq!(tokens.len(), SearchField::ALL.len());
    assert_eq!(tokens.last().map(String::as_str), Some("prefix:Rom"));
}

#[test]
fn test_without_words_become_negations() {
    let query = generate(&single(SearchField::WithoutWords, "  cat   dog "));
    assert_eq!(query, "-cat -dog");
}

#[test]
fn test_any_words_become_or_group() {
    let fields = SearchFieldSet::new()
        .with(SearchField::MainQuery, "paint")
        .with(SearchField::AnyWords, "red blue");
    assert!(generate(&fields).contains("(red OR blue)"));
}

#[test]
fn test_title_only_wraps_main_query() {
    let fields = single(SearchField::MainQuery, "Rome").with_title_only(true);
    assert_eq!(generate(&fields), "intitle:\"Rome\"");
}

#[test]
fn test_title_only_without_main_query_emits_nothing() {
    let fields = single(SearchField::ExactPhrase, "Colosseum").with_title_only(true);
    let query = generate(&fields);
    assert_eq!(query, "\"Colosseum\"");
    assert!(!query.contains("intitle"));
}

#[test]
fn test_category_field_and_dropdown_are_not_merged() {
    let fields = SearchFieldSet::new()
        .with(SearchField::InCategory, "Physics")
        .with(SearchField::Category, "Science");
    assert_eq!(generate(&fields), "incategory:\"Physics\" incategory:\"Science\"");

    let same = SearchFieldSet::new()
        .with(SearchField::InCategory, "Science")
        .with(SearchField::Category, "Science");
    assert_eq!(generate(&same), "incategory:\"Science\" incategory:\"Science\"");
}

#[test]
fn test_quotes_are_escaped_unless_verbatim() {
    let fields = single(SearchField::ExactPhrase, "the \"best\" pizza");
    assert_eq!(generate(&fields), "\"the \\\"best\\\" pizza\"");

    let verbatim = QueryBuilder::new().with_quote_handling(QuoteHandling::Verbatim);
    assert_eq!(verbatim.generate(&fields), "\"the \"best\" pizza\"");
}

#[rstest]
#[case(SearchField::InCategory, "Foo\\", r#"incategory:"Foo\\" filetype:png"#)]
#[case(SearchField::ExactPhrase, r#"a\"b"#, r#""a\\\"b" filetype:png"#)]
#[case(SearchField::SubpageOf, r#"C:\dir"#, r#"filetype:png subpageof:"C:\\dir""#)]
fn test_backslashes_keep_quoted_tokens_closed(
    #[case] field: SearchField,
    #[case] value: &str,
    #[case] expected: &str,
) {
    let fields = single(field, value).with(SearchField::FileType, "png");
    assert_eq!(generate(&fields), expected);
}

#[test]
fn test_generation_is_idempotent() {
    let fields = full_form().with_title_only(true);
    let builder = QueryBuilder::new();
    assert_eq!(builder.generate(&fields), builder.generate(&fields));
    assert_eq!(generate(&fields), builder.generate(&fields));
}

#[test]
fn test_field_set_accepts_form_ids() {
    let json = r#"{"search-query": "Mars", "option-intitle": true, "filesize-min": "10"}"#;
    let fields: SearchFieldSet = serde_json::from_str(json).unwrap();
    assert_eq!(generate(&fields), "intitle:\"Mars\" filesize:>=10");
}
