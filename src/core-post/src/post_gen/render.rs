//! Rendering counts and highlights into the fixed post template.

use crate::post_gen::classifier::TagCounts;
use regex::Regex;
use std::sync::LazyLock;

// Applied in sequence, so stacked markers ("* - text") are both removed.
static LEADING_STAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\s*").expect("valid pattern"));
static LEADING_DASH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-\s*").expect("valid pattern"));

/// Renders the post text.
///
/// Zero-count statistic lines are omitted; an empty highlight list produces
/// a post with an empty highlights block rather than an error.
pub fn render_post(
    version: &str,
    counts: &TagCounts,
    contributor_count: usize,
    highlights: &[String],
    notes_url: &str,
    highlights_url: &str,
) -> String {
    let mut lines: Vec<String> = vec![
        format!("🚀 scikit-learn {version} is out 🚀"),
        String::new(),
        "A big shoutout to the community of contributors who continue to push open-source machine learning forward ❤️"
            .to_string(),
        String::new(),
        "✨ Key Highlights:".to_string(),
        String::new(),
    ];

    for highlight in highlights.iter().take(6) {
        let highlight = LEADING_STAR_RE.replace(highlight.trim(), "");
        let highlight = LEADING_DASH_RE.replace(&highlight, "");
        if !highlight.is_empty() {
            lines.push(format!("▶️ {highlight}"));
        }
    }

    lines.extend([
        String::new(),
        format!("🔗 Check the full release highlights: {highlights_url}"),
        String::new(),
        format!("Discover scikit-learn {version} and its:"),
        String::new(),
    ]);

    let major_features = counts.get("Major Feature");
    let features = counts.get("Feature");
    if major_features > 0 {
        let mut parts = vec![pluralize(major_features, "new major feature")];
        if features > 0 {
            parts.push(pluralize(features, "new feature"));
        }
        lines.push(format!("🟢 {}", parts.join(" and ")));
    } else if features > 0 {
        lines.push(format!("🟢 {}", pluralize(features, "new feature")));
    }

    let efficiency = counts.get("Efficiency");
    let enhancements = counts.get("Enhancement");
    if efficiency + enhancements > 0 {
        let mut parts = Vec::new();
        if efficiency > 0 {
            parts.push(pluralize(efficiency, "efficiency improvement"));
        }
        if enhancements > 0 {
            parts.push(pluralize(enhancements, "enhancement"));
        }
        lines.push(format!("🔵 {}", parts.join(" & ")));
    }

    let api_changes = counts.get("API Change");
    if api_changes > 0 {
        lines.push(format!("🟡 {}", pluralize(api_changes, "API change")));
    }

    let fixes = counts.get("Fix");
    if fixes > 0 {
        let noun = if fixes == 1 { "fix" } else { "fixes" };
        lines.push(format!("🔴 {fixes} {noun}"));
    }

    if contributor_count > 0 {
        lines.push(format!(
            "👥 {} (thank you all!)",
            pluralize(contributor_count, "contributor")
        ));
    }

    lines.extend([
        String::new(),
        format!("📖 More details in the changelog: {notes_url}"),
        String::new(),
        "You can upgrade with pip as usual:".to_string(),
        String::new(),
        "pip install -U scikit-learn".to_string(),
        String::new(),
        "Using conda-forge builds:".to_string(),
        String::new(),
        "conda install -c conda-forge scikit-learn".to_string(),
        String::new(),
        "#scikitlearn #MachineLearning #opensource #DataScience #Python #ML".to_string(),
    ]);

    lines.join("\n")
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
