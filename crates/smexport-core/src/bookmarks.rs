//! Netscape bookmarks document writer
//!
//! One folder per session record, one link per tab of the record's first
//! window. Every date in a folder is the first tab's `lastAccessed`.

use serde::Serialize;
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use smexport_session::{SessionRecord, ShapeError, TabView};

use crate::config::FailurePolicy;
use crate::Result;

const DOCUMENT_HEADER: &str = concat!(
    r#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">"#,
    "<TITLE>Bookmarks</TITLE>",
    "<H1>Imported Bookmarks</H1>",
    " ",
    "<DL><p>\n",
);
const DOCUMENT_FOOTER: &str = "</DL>";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bookmark {
    pub title: String,
    pub url: String,
}

impl Bookmark {
    /// Resolve a tab to the page it shows.
    ///
    /// A tab with no history entries uses the address typed into it for both
    /// URL and title. Otherwise the first entry is used, titled by its URL
    /// when it has no `title` key.
    pub fn from_tab(tab: &TabView<'_>) -> std::result::Result<Self, ShapeError> {
        let entries = tab.entries()?;
        match entries.first() {
            None => {
                let typed = tab.user_typed_value()?.to_string();
                Ok(Self {
                    title: typed.clone(),
                    url: typed,
                })
            }
            Some(page) => {
                let url = page.url()?;
                let title = page.title()?.unwrap_or(url);
                Ok(Self {
                    title: title.to_string(),
                    url: url.to_string(),
                })
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Folder {
    pub name: String,
    /// Used as both ADD_DATE and LAST_MODIFIED for the folder and its links
    pub date: String,
    pub bookmarks: Vec<Bookmark>,
}

impl Folder {
    /// Resolve a whole record before anything is written.
    pub fn from_record(record: &SessionRecord) -> std::result::Result<Self, ShapeError> {
        let plan = plan_folder(record)?;
        let bookmarks = plan
            .tabs
            .iter()
            .map(Bookmark::from_tab)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            name: plan.name,
            date: plan.date,
            bookmarks,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterOptions {
    pub on_shape_error: FailurePolicy,
    pub escape_markup: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
    pub folders: usize,
    pub bookmarks: usize,
    /// Records dropped under [`FailurePolicy::Skip`]
    pub skipped: usize,
}

struct FolderPlan<'r> {
    name: String,
    date: String,
    tabs: Vec<TabView<'r>>,
}

fn plan_folder(record: &SessionRecord) -> std::result::Result<FolderPlan<'_>, ShapeError> {
    let name = record.display_name();
    let window = record.window()?;

    let windows = record.window_count();
    if windows > 1 {
        tracing::warn!(
            folder = %name,
            windows,
            "Session has several windows, exporting only the first"
        );
    }

    let tabs = window.tabs()?;
    let first = tabs.first().ok_or_else(|| ShapeError::EmptySequence {
        path: format!("{}.tabs", window.path()),
    })?;
    let date = first.last_accessed()?.to_string();
    tracing::debug!(
        folder = %name,
        folder_date = %date,
        accessed_at = ?first.last_accessed_at(),
        tab_count = tabs.len(),
        "Resolved folder"
    );

    Ok(FolderPlan { name, date, tabs })
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

struct Markup {
    escape: bool,
}

impl Markup {
    fn text<'s>(&self, s: &'s str) -> Cow<'s, str> {
        if self.escape {
            Cow::Owned(escape_html(s))
        } else {
            Cow::Borrowed(s)
        }
    }

    fn folder_open<W: Write>(&self, out: &mut W, name: &str, date: &str) -> std::io::Result<()> {
        writeln!(
            out,
            r#"    <DT><H3 ADD_DATE="{date}" LAST_MODIFIED="{date}">{}</H3>    <DL><p>"#,
            self.text(name)
        )
    }

    fn entry<W: Write>(&self, out: &mut W, bookmark: &Bookmark, date: &str) -> std::io::Result<()> {
        writeln!(
            out,
            r#"       <DT><A HREF="{}" ADD_DATE="{date}" LAST_MODIFIED="{date}">{}</A>"#,
            self.text(&bookmark.url),
            self.text(&bookmark.title)
        )
    }

    fn folder_close<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(b"    </DL>\n")
    }

    fn folder<W: Write>(&self, out: &mut W, folder: &Folder) -> std::io::Result<()> {
        self.folder_open(out, &folder.name, &folder.date)?;
        for bookmark in &folder.bookmarks {
            self.entry(out, bookmark, &folder.date)?;
        }
        self.folder_close(out)
    }
}

/// Write the folder header first, then resolve and write tabs one by one, so
/// a failing tab leaves the folder open in the output.
fn write_record_streaming<W: Write>(
    record: &SessionRecord,
    out: &mut W,
    markup: &Markup,
    stats: &mut WriteStats,
) -> Result<()> {
    let plan = plan_folder(record)?;
    markup.folder_open(out, &plan.name, &plan.date)?;

    for tab in &plan.tabs {
        tracing::debug!(tab = tab.index(), "Reading tab");
        let bookmark = Bookmark::from_tab(tab)?;
        markup.entry(out, &bookmark, &plan.date)?;
        stats.bookmarks += 1;
    }

    markup.folder_close(out)?;
    stats.folders += 1;
    Ok(())
}

/// Write the complete document for `records`, in order.
///
/// Under [`FailurePolicy::Abort`] the first shape error is returned and the
/// output stops where it occurred, without a footer.
pub fn write_document<W: Write>(
    records: &[SessionRecord],
    out: &mut W,
    options: WriterOptions,
) -> Result<WriteStats> {
    let markup = Markup {
        escape: options.escape_markup,
    };
    let mut stats = WriteStats::default();

    out.write_all(DOCUMENT_HEADER.as_bytes())?;

    for record in records {
        tracing::info!(folder = %record.display_name(), "Writing folder");

        match options.on_shape_error {
            FailurePolicy::Abort => write_record_streaming(record, out, &markup, &mut stats)?,
            FailurePolicy::Skip => match Folder::from_record(record) {
                Ok(folder) => {
                    markup.folder(out, &folder)?;
                    stats.folders += 1;
                    stats.bookmarks += folder.bookmarks.len();
                }
                Err(e) => {
                    tracing::error!(
                        folder = %record.display_name(),
                        source = ?record.source,
                        "Skipping session: {}",
                        e
                    );
                    stats.skipped += 1;
                }
            },
        }
    }

    out.write_all(DOCUMENT_FOOTER.as_bytes())?;
    Ok(stats)
}

/// Render into memory. Partial output is discarded on failure.
pub fn render_document(records: &[SessionRecord], options: WriterOptions) -> Result<String> {
    let mut out = Vec::new();
    write_document(records, &mut out, options)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Write the document to `path`. The file is flushed and closed on every
/// path, so a failed run leaves whatever was written before the failure.
pub fn export_to_file(
    records: &[SessionRecord],
    path: &Path,
    options: WriterOptions,
) -> Result<WriteStats> {
    let mut out = BufWriter::new(File::create(path)?);
    let result = write_document(records, &mut out, options);
    let flushed = out.flush();

    let stats = result?;
    flushed?;
    Ok(stats)
}
