use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mdslides", version)]
struct Cli {
    /// Store directory holding the deck blobs.
    #[arg(long, global = true, default_value = ".mdslides")]
    store: PathBuf,

    /// Editor configuration JSON; missing fields use defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the deck as one HTML document.
    Render(RenderArgs),
    /// Export every section as `slide-<n>.html` at full resolution.
    Export(ExportArgs),
    /// Write the stored blobs as a portable save file.
    Bundle(BundleArgs),
    /// Replace the stored deck with a save file.
    Import(ImportArgs),
    /// Load the deck, check its invariants and print a summary.
    Check,
    /// Add an image file to a section.
    AddImage(AddImageArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output HTML path.
    #[arg(long)]
    out: PathBuf,

    /// Page width in pixels.
    #[arg(long, default_value_t = mdslides::RenderOpts::EXPORT_WIDTH)]
    width: f64,

    /// Emit looping animations.
    #[arg(long)]
    animate: bool,

    /// Document title.
    #[arg(long, default_value = "slides")]
    title: String,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct BundleArgs {
    /// Output path.
    #[arg(long, default_value = mdslides::BUNDLE_FILE_NAME)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ImportArgs {
    /// Save file written by `bundle`.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct AddImageArgs {
    /// Image file (PNG, JPEG, GIF, WebP, BMP, ICO or SVG).
    #[arg(long)]
    image: PathBuf,

    /// Target section id; defaults to the active section.
    #[arg(long)]
    section: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let storage = mdslides::DirStorage::open(&cli.store)
        .with_context(|| format!("open store '{}'", cli.store.display()))?;
    let workspace = mdslides::Workspace::open(storage, config)
        .with_context(|| format!("load deck from '{}'", cli.store.display()))?;

    match cli.cmd {
        Command::Render(args) => cmd_render(&workspace, args),
        Command::Export(args) => cmd_export(&workspace, args),
        Command::Bundle(args) => cmd_bundle(&workspace, args),
        Command::Import(args) => cmd_import(workspace, args),
        Command::Check => cmd_check(&workspace),
        Command::AddImage(args) => cmd_add_image(workspace, args),
    }
}

type Workspace = mdslides::Workspace<mdslides::DirStorage>;

fn load_config(path: Option<&Path>) -> anyhow::Result<mdslides::EditorConfig> {
    match path {
        Some(path) => Ok(mdslides::EditorConfig::from_json_file(path)?),
        None => Ok(mdslides::EditorConfig::default()),
    }
}

fn viewer_for(workspace: &Workspace) -> mdslides::Viewer {
    mdslides::Viewer::with_canvas(workspace.deck().config().canvas)
}

fn write_output(path: &Path, contents: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("write '{}'", path.display()))
}

fn cmd_render(workspace: &Workspace, args: RenderArgs) -> anyhow::Result<()> {
    let opts = mdslides::RenderOpts {
        output_width: args.width,
        animate: args.animate,
    };
    let pages = mdslides::render_deck(workspace.deck(), &viewer_for(workspace), &opts);
    let failed = pages.iter().filter(|p| !p.is_ok()).count();
    let doc = mdslides::render_presentation_document(&args.title, &pages);
    write_output(&args.out, &doc)?;

    eprintln!(
        "wrote {} ({} pages, {} failed)",
        args.out.display(),
        pages.len(),
        failed
    );
    Ok(())
}

fn cmd_export(workspace: &Workspace, args: ExportArgs) -> anyhow::Result<()> {
    let mut sink = mdslides::HtmlDirSink::new(&args.out);
    let n = mdslides::export_pages(workspace.deck(), &viewer_for(workspace), &mut sink)?;
    eprintln!("wrote {n} pages to {}", args.out.display());
    Ok(())
}

fn cmd_bundle(workspace: &Workspace, args: BundleArgs) -> anyhow::Result<()> {
    let bundle = workspace.export_bundle()?;
    write_output(&args.out, &bundle)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_import(mut workspace: Workspace, args: ImportArgs) -> anyhow::Result<()> {
    let bundle = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("read bundle '{}'", args.in_path.display()))?;
    workspace.import_bundle(&bundle)?;
    eprintln!(
        "imported {} sections from {}",
        workspace.deck().order().len(),
        args.in_path.display()
    );
    Ok(())
}

fn cmd_check(workspace: &Workspace) -> anyhow::Result<()> {
    let deck = workspace.deck();
    deck.validate()?;
    println!("sections: {}", deck.order().len());
    println!("assets: {}", deck.assets().len());
    println!("active: {}", deck.active_id());
    for (index, (id, section)) in deck.ordered_sections().enumerate() {
        let title = section.content.lines().next().unwrap_or("");
        println!(
            "{:>3}. section {id}: {} asset(s), {title}",
            index + 1,
            section.assets.len()
        );
    }
    Ok(())
}

fn cmd_add_image(mut workspace: Workspace, args: AddImageArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let section = args
        .section
        .map(mdslides::SectionId)
        .unwrap_or_else(|| workspace.deck().active_id());
    let asset = workspace.mutate(|deck| deck.add_image(section, &bytes))?;
    println!("{asset}");
    eprintln!("added asset {asset} to section {section}");
    Ok(())
}
