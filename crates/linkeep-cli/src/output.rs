//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use linkeep_core::{Bookmark, CheckStatus};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Print a single bookmark
    pub fn print_bookmark(&self, bookmark: &Bookmark) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", bookmark.id);
                println!("Name:    {}", bookmark.name);
                println!("URL:     {}", bookmark.url);
                if !bookmark.tags.is_empty() {
                    println!("Tags:    {}", bookmark.tags.join(", "));
                }
                println!("Created: {}", bookmark.created_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(bookmark).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", bookmark.id);
            }
        }
    }

    /// Print a list of bookmarks
    pub fn print_bookmarks(&self, bookmarks: &[Bookmark]) {
        match self.format {
            OutputFormat::Human => {
                if bookmarks.is_empty() {
                    println!("No bookmarks found.");
                    return;
                }
                for bookmark in bookmarks {
                    println!(
                        "{:3}: {} - {}{}",
                        bookmark.id,
                        bookmark.name,
                        bookmark.url,
                        tags_suffix(bookmark)
                    );
                }
                println!("\n{} bookmark(s)", bookmarks.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(bookmarks).unwrap());
            }
            OutputFormat::Quiet => {
                for bookmark in bookmarks {
                    println!("{}", bookmark.id);
                }
            }
        }
    }

    /// Print one result from a liveness check
    ///
    /// In quiet mode only dead links are printed, id-only, so the output
    /// pipes straight into `linkeep delete`.
    pub fn print_check_result(&self, bookmark: &Bookmark, status: &CheckStatus) {
        match self.format {
            OutputFormat::Human => {
                if status.alive {
                    println!("  ✓ {:3}: {} is OK", bookmark.id, bookmark.name);
                } else {
                    println!(
                        "  ✗ {:3}: {} returned {}",
                        bookmark.id, bookmark.name, status.detail
                    );
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "id": bookmark.id,
                        "name": bookmark.name,
                        "url": bookmark.url,
                        "alive": status.alive,
                        "detail": status.detail
                    })
                );
            }
            OutputFormat::Quiet => {
                if !status.alive {
                    println!("{}", bookmark.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

/// Render tags as a bracketed suffix, empty when there are none
fn tags_suffix(bookmark: &Bookmark) -> String {
    if bookmark.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", bookmark.tags.join(", "))
    }
}
