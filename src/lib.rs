//! mdslides is the document core of a markdown slide editor.
//!
//! A deck is an ordered list of markdown sections, each carrying positioned image assets
//! that may loop through layered animations. The crate covers:
//!
//! - Editing a [`Deck`], with every multi-store edit applied as one unit of work
//! - Placing assets with center snapping ([`snap`])
//! - Composing animation directives into transform layers ([`compose`])
//! - Rendering sections to scaled, style-isolated HTML ([`Viewer`], [`render_deck`],
//!   [`export_pages`])
//! - Persisting decks as versioned blobs in a key/value [`Storage`] ([`Workspace`])
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
/// Editor configuration.
pub mod config;
pub(crate) mod deck;
pub(crate) mod layout;
pub(crate) mod model;
pub(crate) mod persist;
pub(crate) mod render;

pub use crate::foundation::core::{
    Affine, AssetId, Axis, Canvas, SectionId, VIRTUAL_HEIGHT, VIRTUAL_WIDTH, Vec2, next_id,
};
pub use crate::foundation::error::{EntityKind, SlidesError, SlidesResult};

pub use crate::animation::compose::{
    AnimationChain, TransformLayer, VIBRATE_SAMPLES, compose, vibrate_waveform,
};
pub use crate::animation::directive::{AnimationDirective, AnimationField, AnimationKind};
pub use crate::animation::ease::Ease;
pub use crate::config::EditorConfig;
pub use crate::deck::deck::Deck;
pub use crate::deck::ingest::{PendingUpload, sniff_mime, to_data_uri};
pub use crate::deck::presentation::Presentation;
pub use crate::layout::snap::{SNAP_THRESHOLD, magnet, snap, snap_axis, snap_point};
pub use crate::model::asset::{Asset, AssetField, AssetStore, DEFAULT_ASSET_SIZE};
pub use crate::model::order::{DeckOrder, move_item};
pub use crate::model::section::{DEFAULT_SECTION_CONTENT, Section, SectionStore};
pub use crate::persist::bundle::{BUNDLE_FILE_NAME, export_bundle, import_bundle};
pub use crate::persist::migrate::{
    ASSETS_VERSION, PAGE_SETTING_VERSION, SECTIONS_VERSION, migrate_assets,
};
pub use crate::persist::snapshot::{
    ASSETS_KEY, PAGE_SETTING_KEY, SECTIONS_KEY, STORE_KEYS, Snapshot, load_deck, save_deck,
};
pub use crate::persist::storage::{DirStorage, MemoryStorage, Storage};
pub use crate::persist::workspace::Workspace;
pub use crate::render::export::{HtmlDirSink, MemorySink, PageSink, export_pages, page_file_name};
pub use crate::render::markdown::{CommonMark, MarkdownRenderer};
pub use crate::render::pages::{
    RenderedPage, render_deck, render_presentation_document, render_section,
};
pub use crate::render::viewer::{RenderOpts, RenderedSection, Viewer};
