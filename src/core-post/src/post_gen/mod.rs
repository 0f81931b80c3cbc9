//! # Release post generation
//!
//! Scrapes scikit-learn release documentation and renders a social-media post.
//!
//! Two pages feed a single run: the release-notes page (changelog entries,
//! contributor list) and the release-highlights page (short feature blurbs).
//! Everything here is heuristic pattern matching against the documentation
//! site's current markup conventions; there are no correctness guarantees on
//! arbitrary HTML, and extraction failures degrade to empty/zero results
//! rather than errors.
//!
//! ## Example
//!
//! ```no_run
//! use core_post::post_gen::{
//!     ScrapeOptions, fetch_document, generate_post, release_highlights_url, release_notes_url,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ScrapeOptions::default();
//!     let version = "1.8";
//!
//!     let notes_url = release_notes_url(&options.base_url, version)?;
//!     let notes = fetch_document(&notes_url, options.timeout).await?;
//!
//!     let highlights_url = release_highlights_url(&options.base_url, version)?;
//!     let highlights_page = fetch_document(&highlights_url, options.timeout).await.ok();
//!
//!     let post = generate_post(version, &notes, highlights_page.as_ref(), &notes_url, &highlights_url);
//!     println!("{post}");
//!     Ok(())
//! }
//! ```

// Module declarations
mod classifier;
mod config;
mod contributors;
pub mod dom;
mod errors;
mod fetch;
mod generator;
mod highlights;
mod render;
mod section;
mod urls;

// Public API re-exports
pub use classifier::{CATEGORY_LABELS, TagCounts, count_tags};
pub use config::{DEFAULT_BASE_URL, ScrapeOptions, ScrapeOptionsBuilder};
pub use contributors::count_contributors;
pub use errors::{PostGenError, Result};
pub use fetch::{fetch_document, fetch_html};
pub use generator::generate_post;
pub use highlights::{extract_highlights, extract_highlights_from_notes};
pub use render::render_post;
pub use section::{SectionBoundary, find_version_section, legend_items};
pub use urls::{release_highlights_url, release_notes_url};
