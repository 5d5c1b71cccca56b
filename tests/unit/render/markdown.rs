use super::*;

#[test]
fn renders_headings_and_lists() {
    let html = CommonMark::default().to_html("# title\n\n- a\n- b\n");
    assert!(html.contains("<h1>title</h1>"));
    assert!(html.contains("<li>a</li>"));
}

#[test]
fn raw_html_is_escaped() {
    let html = CommonMark::default().to_html("<style>body{color:red}</style>\n\nhi <b>x</b>");
    assert!(!html.contains("<style>"));
    assert!(html.contains("&lt;style&gt;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn tables_are_enabled() {
    let html = CommonMark::default().to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
    assert!(html.contains("<table>"));
}
