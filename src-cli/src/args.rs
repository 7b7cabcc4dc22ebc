use clap::Parser;
use smexport_core::FailurePolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smexport")]
#[command(about = "Export Session Manager sessions to an HTML bookmarks file", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding the .session files
    #[arg(value_name = "PATH", value_parser = existing_path)]
    pub path: PathBuf,

    /// Bookmarks document to write [default: exported_bookmarks.html]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Diagnostic log file [default: session_manager_exporter.log]
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// TOML file with export settings; flags take precedence
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// What to do with a session that has no readable tabs (abort|skip)
    #[arg(long, value_name = "POLICY")]
    pub on_shape_error: Option<FailurePolicy>,

    /// Process session files in file-name order
    #[arg(long)]
    pub sorted: bool,

    /// HTML-escape folder names, URLs and titles
    #[arg(long)]
    pub escape_html: bool,
}

fn existing_path(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path does not exist: {}", s))
    }
}
