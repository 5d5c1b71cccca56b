use super::*;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mdslides-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn page_names_are_one_based() {
    assert_eq!(page_file_name(0, "png"), "slide-1.png");
    assert_eq!(page_file_name(9, "html"), "slide-10.html");
}

#[test]
fn memory_sink_receives_pages_in_order() {
    let mut deck = Deck::default();
    let second = deck.add_section();
    deck.update_content(second, "second page").unwrap();

    let mut sink = MemorySink::default();
    let n = export_pages(&deck, &Viewer::default(), &mut sink).unwrap();
    assert_eq!(n, 2);
    assert!(sink.pages[0].contains("<h1>title</h1>"));
    assert!(sink.pages[1].contains("second page"));
    assert!(sink.pages.iter().all(|p| p.contains("width:1920px;height:1080px")));
}

#[test]
fn html_dir_sink_writes_numbered_documents() {
    let dir = scratch_dir("export");
    let mut deck = Deck::default();
    deck.add_section();

    let mut sink = HtmlDirSink::new(dir.clone());
    export_pages(&deck, &Viewer::default(), &mut sink).unwrap();

    assert_eq!(sink.written().len(), 2);
    assert!(dir.join("slide-1.html").is_file());
    assert!(dir.join("slide-2.html").is_file());
    let doc = std::fs::read_to_string(dir.join("slide-2.html")).unwrap();
    assert!(doc.contains("<title>slide 2</title>"));
    let _ = std::fs::remove_dir_all(&dir);
}
