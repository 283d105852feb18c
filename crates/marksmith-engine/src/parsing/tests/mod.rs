//! Integration tests for the parsing module.
//!
//! Fixture documents (.md) sit next to their expected HTML (.html) in
//! `fixtures/`. Block trees are compared as outlines from `normalize`.


use pretty_assertions::assert_eq;

use crate::{
    markdown::{Markdown, RenderOptions},
    parsing::blocks::{Align, Block, BlockGrammar, BlockParser, Table},
    state::{DEFAULT_MAX_DEPTH, ParseState},
};

use normalize::outline;

// Fixture-based tests

#[test]
fn fixture_paragraphs() {
    assert_fixture("paragraphs");
}

#[test]
fn fixture_nested_quote_list() {
    assert_fixture("nested_quote_list");
}

#[test]
fn fixture_code_and_headings() {
    assert_fixture("code_and_headings");
}

#[test]
fn fixture_aligned_table() {
    assert_fixture("aligned_table");
}

#[test]
fn fixture_references_and_footnotes() {
    assert_fixture("references_and_footnotes");
}

fn assert_fixture(name: &str) {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    let md = std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap();
    let expected = std::fs::read_to_string(format!("{fixtures_dir}/{name}.html")).unwrap();

    let markdown = Markdown::html(&RenderOptions::default()).unwrap();
    let (blocks, _) = markdown.parse(&md);
    invariants::check(&blocks, DEFAULT_MAX_DEPTH);

    assert_eq!(markdown.render(&md), expected);
}

fn parse_with_depth(text: &str, max_depth: usize) -> (Vec<Block>, ParseState) {
    let grammar = BlockGrammar::new().unwrap();
    let mut state = ParseState::new(max_depth);
    let blocks = BlockParser::new(&grammar).parse(text, &mut state);
    invariants::check(&blocks, max_depth);
    (blocks, state)
}

fn parse(text: &str) -> Vec<Block> {
    parse_with_depth(text, DEFAULT_MAX_DEPTH).0
}

// Block structure tests

#[test]
fn empty_document() {
    assert!(parse("").is_empty());
}

#[test]
fn blank_lines_only() {
    assert_eq!(parse("\n\n\n"), vec![Block::Newline]);
}

#[test]
fn quote_holds_list_and_nested_quote() {
    let blocks = parse("> Quote with a list:\n>\n> - one\n> - two\n>\n> > inner\n");
    assert_eq!(
        outline(&blocks),
        vec![
            "quote",
            "  paragraph \"Quote with a list:\"",
            "  newline",
            "  ul",
            "    item",
            "      text \"one\"",
            "    item",
            "      text \"two\"",
            "  quote",
            "    paragraph \"inner\"",
        ]
    );
}

#[test]
fn lazy_quote_continuation_stops_at_blank_line() {
    let blocks = parse("> a\nb\n\nc\n");
    assert_eq!(
        outline(&blocks),
        vec!["quote", "  paragraph \"a\\nb\"", "paragraph \"c\""]
    );
}

#[test]
fn loose_ordered_list_keeps_start_and_paragraphs() {
    let blocks = parse("3. first\n\n4. second\n");
    assert_eq!(
        outline(&blocks),
        vec![
            "ol 3",
            "  item",
            "    paragraph \"first\"",
            "  item",
            "    paragraph \"second\"",
        ]
    );
}

#[test]
fn nested_tight_lists() {
    let blocks = parse("- a\n  - b\n  - c\n- d\n");
    assert_eq!(
        outline(&blocks),
        vec![
            "ul",
            "  item",
            "    text \"a\"",
            "    ul",
            "      item",
            "        text \"b\"",
            "      item",
            "        text \"c\"",
            "  item",
            "    text \"d\"",
        ]
    );
}

#[test]
fn quotes_past_the_limit_become_paragraphs() {
    let (blocks, _) = parse_with_depth(">>>>>>>>>> deep", 2);
    assert_eq!(
        outline(&blocks),
        vec!["quote", "  quote", "    paragraph \">>>>>>> deep\""]
    );
}

#[test]
fn lists_past_the_limit_keep_items_flat() {
    let (blocks, _) = parse_with_depth("- a\n  - b\n    - c\n", 1);
    assert_eq!(
        outline(&blocks),
        vec![
            "ul",
            "  item",
            "    text \"a\"",
            "    ul",
            "      item",
            "        text \"b\\n- c\"",
        ]
    );
}

#[test]
fn definitions_leave_no_blocks_and_first_wins() {
    let (blocks, state) = parse_with_depth("[a]: /x\n\npara\n\n[A]: /y\n", DEFAULT_MAX_DEPTH);
    assert_eq!(outline(&blocks), vec!["paragraph \"para\"", "newline"]);
    assert_eq!(state.links.len(), 1);
    assert_eq!(state.links.get("a").map(|d| d.url.as_str()), Some("/x"));
}

#[test]
fn list_items_do_not_register_definitions() {
    let (blocks, state) = parse_with_depth("- [k]: /u\n", DEFAULT_MAX_DEPTH);
    assert_eq!(outline(&blocks), vec!["ul", "  item", "    text \"[k]: /u\""]);
    assert!(state.links.is_empty());
}

#[test]
fn pipeless_table() {
    let blocks = parse("a | b\n--|--:\n1 | 2\n");
    assert_eq!(
        blocks,
        vec![Block::Table(Table {
            header: vec!["a".into(), "b".into()],
            aligns: vec![None, Some(Align::Right)],
            rows: vec![vec!["1".into(), "2".into()]],
        })]
    );
}

#[test]
fn setext_heading_beats_hrule() {
    assert_eq!(outline(&parse("Title\n---\n")), vec!["h2 \"Title\""]);
}

#[test]
fn fence_content_is_not_parsed() {
    let blocks = parse("```\n> not a quote\n```\n");
    assert_eq!(outline(&blocks), vec!["code None \"> not a quote\\n\""]);
}

#[test]
fn block_html_runs_to_blank_line() {
    let blocks = parse("<div>\n*x*\n</div>\n\nafter\n");
    assert_eq!(
        outline(&blocks),
        vec!["html \"<div>\\n*x*\\n</div>\"", "paragraph \"after\""]
    );
}

#[test]
fn footnote_bodies_are_parsed_with_the_document() {
    let (blocks, state) =
        parse_with_depth("x\n\n[^n]: > quoted\n\n    [k]: /u\n", DEFAULT_MAX_DEPTH);
    assert_eq!(outline(&blocks), vec!["paragraph \"x\"", "newline"]);
    let note = state.footnotes.get("n").unwrap();
    assert_eq!(outline(&note.blocks), vec!["quote", "  paragraph \"quoted\""]);
    assert!(state.links.contains("k"));
}

#[test]
fn outer_footnote_wins_over_same_key_in_its_body() {
    let (_, state) = parse_with_depth("[^n]: outer\n    [^n]: inner\n", DEFAULT_MAX_DEPTH);
    let note = state.footnotes.get("n").unwrap();
    assert_eq!(note.text, "outer\n[^n]: inner");
    assert_eq!(state.footnotes.len(), 1);
}
