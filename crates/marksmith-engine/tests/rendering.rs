use insta::assert_snapshot;
use marksmith_engine::{AstRenderer, Markdown, RenderOptions, render};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;

fn html_with(options: RenderOptions) -> Markdown {
    Markdown::html(&options).unwrap()
}

// Escaping

#[rstest]
#[case("<script>alert(1)</script>", "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>\n")]
#[case("a <b>bold</b> & c", "<p>a &lt;b&gt;bold&lt;/b&gt; &amp; c</p>\n")]
#[case("[x](javascript:alert(1))", "<p><a href=\"\">x</a></p>\n")]
#[case("Tom &amp; Jerry", "<p>Tom &amp; Jerry</p>\n")]
fn raw_html_is_escaped_by_default(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(render(input), expected);
}

#[test]
fn raw_html_passes_through_when_escaping_is_off() {
    let md = html_with(RenderOptions {
        escape: false,
        ..RenderOptions::default()
    });
    assert_eq!(md.render("a <b>bold</b> & c"), "<p>a <b>bold</b> &amp; c</p>\n");
    assert_eq!(md.render("<div>\nhi\n</div>"), "<div>\nhi\n</div>\n");
}

#[rstest]
#[case("<img src=x onerror=alert(1)>")]
#[case("> <script>x</script>")]
#[case("- <iframe src=\"x\">")]
#[case("| <b> |\n|---|\n| <i> |")]
fn escaped_output_has_no_raw_tags(#[case] input: &str) {
    let html = render(input);
    for tag in ["<script", "<img", "<iframe", "<b>", "<i>"] {
        assert!(!html.contains(tag), "{tag} leaked into {html:?}");
    }
}

#[test]
fn backslash_escapes_suppress_emphasis() {
    assert_eq!(render(r"\*not em\*"), "<p>*not em*</p>\n");
}

// Depth bound

#[test]
fn ten_thousand_nested_quotes_terminate() {
    let input = format!("{}x", "> ".repeat(10_000));
    let html = render(&input);
    assert_eq!(html.matches("<blockquote>").count(), 6);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
fn quote_depth_follows_option(#[case] max_depth: usize) {
    let md = html_with(RenderOptions {
        max_depth,
        ..RenderOptions::default()
    });
    let html = md.render(&format!("{}x", ">".repeat(50)));
    assert_eq!(html.matches("<blockquote>").count(), max_depth);
}

#[test]
fn ten_thousand_nested_lists_terminate() {
    let input = format!("{}x", "- ".repeat(10_000));
    let html = render(&input);
    assert!(html.matches("<ul>").count() <= 7);
}

// References

#[test]
fn references_resolve_regardless_of_order() {
    let before = render("[a]: /u\n\n[a]");
    let after = render("[a]\n\n[a]: /u");
    assert_eq!(before, after);
    assert_eq!(after, "<p><a href=\"/u\">a</a></p>\n");
}

#[test]
fn first_definition_wins() {
    assert_eq!(
        render("[x]\n\n[x]: /first\n[X]: /second\n"),
        "<p><a href=\"/first\">x</a></p>\n"
    );
}

#[test]
fn unresolved_references_stay_literal() {
    assert_eq!(
        render("[a][b] and ![c] here"),
        "<p>[a][b] and ![c] here</p>\n"
    );
}

#[test]
fn empty_reference_key_stays_in_literal_text() {
    assert_eq!(render("[t][] and [t][ ]"), "<p>[t][] and [t][ ]</p>\n");
    assert_eq!(
        render("[t][]\n\n[t]: /u"),
        "<p><a href=\"/u\">t</a></p>\n"
    );
}

#[test]
fn definitions_inside_footnotes_resolve_everywhere() {
    let html = render("[x] see[^a]\n\n[^a]: note [x]\n    [x]: /u\n");
    assert!(html.starts_with("<p><a href=\"/u\">x</a> see<sup"), "{html}");
    assert!(html.contains("<li id=\"fn-1\"><p>note <a href=\"/u\">x</a>"), "{html}");
}

#[test]
fn nested_link_keeps_only_its_text() {
    assert_eq!(render("[a [b](/b)](/a)"), "<p><a href=\"/a\">a b</a></p>\n");
}

// Code spans

#[rstest]
#[case("``a`b``", "<p><code>a`b</code></p>\n")]
#[case("`` `x` ``", "<p><code>`x`</code></p>\n")]
#[case("`<tag>`", "<p><code>&lt;tag&gt;</code></p>\n")]
#[case("``a`", "<p>``a`</p>\n")]
fn code_spans_match_run_length(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(render(input), expected);
}

// Emphasis

#[rstest]
#[case("*a*", "<p><em>a</em></p>\n")]
#[case("**a**", "<p><strong>a</strong></p>\n")]
#[case("***a***", "<p><strong><em>a</em></strong></p>\n")]
#[case("__a__", "<p><strong>a</strong></p>\n")]
#[case("**a*", "<p>**a*</p>\n")]
#[case("a*b*c", "<p>a<em>b</em>c</p>\n")]
#[case("_snake_case_ name", "<p><em>snake_case</em> name</p>\n")]
fn emphasis_levels(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(render(input), expected);
}

#[test]
fn unclosed_emphasis_stays_literal() {
    let input = "*a ".repeat(20_000);
    assert_eq!(render(&input), format!("<p>{}</p>\n", input.trim_end()));
}

#[test]
fn strikethrough() {
    assert_eq!(render("~~gone~~"), "<p><del>gone</del></p>\n");
}

// Tables

#[test]
fn table_alignment_reaches_short_and_long_rows() {
    assert_snapshot!(render("A | B\n--:| :--:\n1 |\n1 | 2 | 3\n"), @r#"
    <table>
    <thead>
    <tr>
    <th style="text-align:right">A</th>
    <th style="text-align:center">B</th>
    </tr>
    </thead>
    <tbody>
    <tr>
    <td style="text-align:right">1</td>
    </tr>
    <tr>
    <td style="text-align:right">1</td>
    <td style="text-align:center">2</td>
    <td>3</td>
    </tr>
    </tbody>
    </table>
    "#);
}

// Footnotes

#[test]
fn footnotes_follow_first_reference_order() {
    let input = "b[^2] a[^1] [^none]\n\n[^1]: first\n[^2]: second\n[^3]: unused\n";
    assert_snapshot!(render(input), @r##"
    <p>b<sup class="footnote-ref" id="fnref-1"><a href="#fn-1">1</a></sup> a<sup class="footnote-ref" id="fnref-2"><a href="#fn-2">2</a></sup> [^none]</p>
    <section class="footnotes">
    <ol>
    <li id="fn-1"><p>second<a href="#fnref-1" class="footnote">&#8617;</a></p></li>
    <li id="fn-2"><p>first<a href="#fnref-2" class="footnote">&#8617;</a></p></li>
    </ol>
    </section>
    "##);
}

#[test]
fn footnote_bodies_can_reference_footnotes() {
    let html = render("x[^a]\n\n[^a]: see[^b]\n[^b]: end\n");
    assert!(html.contains("<li id=\"fn-1\"><p>see<sup class=\"footnote-ref\" id=\"fnref-2\">"));
    assert!(html.contains("<li id=\"fn-2\"><p>end"));
}

#[test]
fn self_referencing_footnote_terminates() {
    let html = render("x[^a]\n\n[^a]: again[^a]\n");
    assert_eq!(html.matches("<li id=").count(), 1);
}

#[test]
fn duplicate_footnote_keeps_first_body() {
    let html = render("a[^n]\n\n[^n]: one\n[^N]: two\n");
    assert!(html.contains("<p>one<a href=\"#fnref-1\""));
    assert!(!html.contains("two"));
}

// Lists

#[rstest]
#[case("- a\n- b\n", "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n")]
#[case("2. x\n3. y\n", "<ol start=\"2\">\n<li>x</li>\n<li>y</li>\n</ol>\n")]
#[case("1) x\n", "<ol>\n<li>x</li>\n</ol>\n")]
#[case(
    "- a\n\n- b\n",
    "<ul>\n<li><p>a</p>\n</li>\n<li><p>b</p>\n</li>\n</ul>\n"
)]
fn lists(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(render(input), expected);
}

// Links and images

#[rstest]
#[case("<https://a.io>", "<p><a href=\"https://a.io\">https://a.io</a></p>\n")]
#[case("<me@x.io>", "<p><a href=\"mailto:me@x.io\">me@x.io</a></p>\n")]
#[case("see https://a.io/x.", "<p>see <a href=\"https://a.io/x\">https://a.io/x</a>.</p>\n")]
#[case(
    "![alt](/a.png \"T\")",
    "<p><img src=\"/a.png\" alt=\"alt\" title=\"T\"></p>\n"
)]
fn links_and_images(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(render(input), expected);
}

// Options

#[test]
fn xhtml_line_break() {
    let md = html_with(RenderOptions {
        use_xhtml: true,
        ..RenderOptions::default()
    });
    assert_eq!(md.render("a  \nb"), "<p>a<br />\nb</p>\n");
}

#[test]
fn line_endings_are_normalized() {
    assert_eq!(render("a\r\nb\rc"), render("a\nb\nc"));
}

// AST output

#[test]
fn ast_serializes_tagged_nodes() {
    let md = Markdown::new(AstRenderer, &RenderOptions::default()).unwrap();
    let tree = serde_json::to_value(md.render("# Hi *there*\n")).unwrap();
    assert_eq!(
        tree,
        json!([{
            "type": "heading",
            "level": 1,
            "children": [
                {"type": "text", "text": "Hi "},
                {"type": "emphasis", "level": 1, "children": [
                    {"type": "text", "text": "there"}
                ]}
            ]
        }])
    );
}

#[test]
fn ast_keeps_newlines_and_raw_text() {
    let md = Markdown::new(AstRenderer, &RenderOptions::default()).unwrap();
    let tree = serde_json::to_value(md.render("a & b\n\nc")).unwrap();
    assert_eq!(
        tree,
        json!([
            {"type": "paragraph", "children": [{"type": "text", "text": "a & b"}]},
            {"type": "newline"},
            {"type": "paragraph", "children": [{"type": "text", "text": "c"}]}
        ])
    );
}

// Concurrency

#[test]
fn one_instance_renders_from_many_threads() {
    let md = html_with(RenderOptions::default());
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let md = &md;
                s.spawn(move || md.render(&format!("[r]\n\n[r]: /{i}")))
            })
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(
                handle.join().unwrap(),
                format!("<p><a href=\"/{i}\">r</a></p>\n")
            );
        }
    });
}
