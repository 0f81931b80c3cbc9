use clap::Parser;
use core_post::common::logging::setup_logging;
use core_post::post_gen::{
    ScrapeOptions, fetch_document, generate_post, release_highlights_url, release_notes_url,
};

#[derive(Parser)]
#[command(name = "core-post")]
#[command(about = "Generate a release announcement post from scikit-learn documentation", long_about = None)]
struct PostCli {
    /// Release version to scrape, e.g. "1.8"
    version: String,

    /// Documentation root to scrape
    #[arg(long, default_value = core_post::post_gen::DEFAULT_BASE_URL, value_parser = validate_url)]
    base_url: String,
}

fn validate_url(s: &str) -> Result<String, String> {
    url::Url::parse(s)
        .map(|_| s.to_string())
        .map_err(|e| format!("Invalid URL: {}", e))
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    setup_logging("core_post=info");

    let cli = PostCli::parse();
    let options = ScrapeOptions::builder().base_url(cli.base_url).build();

    let notes_url = match release_notes_url(&options.base_url, &cli.version) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Error building release notes URL: {e}");
            std::process::exit(1)
        }
    };

    // The notes page is the primary source: without it there is no post.
    let notes = match fetch_document(&notes_url, options.timeout).await {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error fetching {notes_url}: {e}");
            std::process::exit(1)
        }
    };

    // The highlights page may not exist yet; that is fine.
    let highlights_url = match release_highlights_url(&options.base_url, &cli.version) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("Error building release highlights URL: {e}");
            std::process::exit(1)
        }
    };
    let highlights_page = match fetch_document(&highlights_url, options.timeout).await {
        Ok(page) => Some(page),
        Err(e) => {
            tracing::warn!(url = %highlights_url, error = %e, "highlights page unavailable, using release notes");
            None
        }
    };

    let post = generate_post(
        &cli.version,
        &notes,
        highlights_page.as_ref(),
        &notes_url,
        &highlights_url,
    );
    println!("{post}");
}
