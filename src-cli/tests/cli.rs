use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A sessions directory plus a separate working directory for outputs
struct TestFixture {
    _temp_dir: TempDir,
    sessions: PathBuf,
    work: PathBuf,
}

impl TestFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let sessions = temp_dir.path().join("sessions");
        let work = temp_dir.path().join("work");
        fs::create_dir_all(&sessions).expect("Failed to create sessions dir");
        fs::create_dir_all(&work).expect("Failed to create work dir");

        Self {
            _temp_dir: temp_dir,
            sessions,
            work,
        }
    }

    fn add_session(&self, file_name: &str, name: &str, url: &str, last_accessed: i64) {
        let content = format!(
            "[SessionManager v2]\nname={name}\ntimestamp=1565101862012\nautosave=false\tcount=1/1\tgroup=\n\
             {{\"windows\":[{{\"tabs\":[{{\"entries\":[{{\"url\":\"{url}\",\"title\":\"{name} page\"}}],\
             \"lastAccessed\":{last_accessed},\"hidden\":false}}],\"selected\":1}}],\"selectedWindow\":1}}\n"
        );
        fs::write(self.sessions.join(file_name), content).expect("Failed to write session");
    }

    fn add_raw(&self, file_name: &str, content: &str) {
        fs::write(self.sessions.join(file_name), content).expect("Failed to write session");
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("smexport").expect("Failed to find smexport binary");
        cmd.current_dir(&self.work);
        cmd
    }

    fn output(&self) -> PathBuf {
        self.work.join("exported_bookmarks.html")
    }

    fn log(&self) -> PathBuf {
        self.work.join("session_manager_exporter.log")
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).expect("Failed to read output")
}

#[test]
fn test_exports_two_sessions_and_ignores_backups() {
    let fixture = TestFixture::new();
    fixture.add_session("work.session", "Work", "https://work.example/", 1000);
    fixture.add_session("home.session", "Home", "https://home.example/", 2000);
    fixture.add_session("backup-foo.session", "Backup", "https://backup.example/", 3000);
    fs::create_dir(fixture.sessions.join("nested")).unwrap();

    fixture
        .command()
        .arg(&fixture.sessions)
        .arg("--sorted")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 bookmarks in 2 folders"));

    let doc = read(&fixture.output());
    assert!(doc.starts_with(
        "<META HTTP-EQUIV=\"Content-Type\" CONTENT=\"text/html; charset=UTF-8\">\
         <TITLE>Bookmarks</TITLE><H1>Imported Bookmarks</H1> <DL><p>\n"
    ));
    assert!(doc.ends_with("</DL>"));
    assert!(!doc.contains("Backup"));

    let home = doc
        .find("<DT><H3 ADD_DATE=\"2000\" LAST_MODIFIED=\"2000\">Home</H3>    <DL><p>\n")
        .expect("Home folder");
    let work = doc
        .find("<DT><H3 ADD_DATE=\"1000\" LAST_MODIFIED=\"1000\">Work</H3>    <DL><p>\n")
        .expect("Work folder");
    assert!(home < work);
    assert!(doc.contains(
        "       <DT><A HREF=\"https://work.example/\" ADD_DATE=\"1000\" LAST_MODIFIED=\"1000\">Work page</A>\n"
    ));

    let log = read(&fixture.log());
    assert!(log.contains("Searching for session data"));
    assert!(log.contains("backup-foo.session"));
    assert!(log.contains("Parsing session file"));
}

#[test]
fn test_missing_directory_fails_before_logging() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg(fixture.sessions.join("does-not-exist"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));

    assert!(!fixture.log().exists());
    assert!(!fixture.output().exists());
}

#[test]
fn test_file_instead_of_directory() {
    let fixture = TestFixture::new();
    fixture.add_session("work.session", "Work", "https://work.example/", 1000);

    fixture
        .command()
        .arg(fixture.sessions.join("work.session"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error: "));
}

#[test]
fn test_malformed_session_aborts_by_default() {
    let fixture = TestFixture::new();
    fixture.add_raw(
        "broken.session",
        "[SessionManager v2]\nname=Broken\n\n\n{\"windows\":[{\"tabs\":[\n",
    );

    fixture
        .command()
        .arg(&fixture.sessions)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: "));

    let log = read(&fixture.log());
    assert!(log.contains("line 1"));
}

#[test]
fn test_malformed_session_skipped_on_request() {
    let fixture = TestFixture::new();
    fixture.add_session("good.session", "Good", "https://good.example/", 1000);
    fixture.add_raw(
        "broken.session",
        "[SessionManager v2]\nname=Broken\n\n\n{\"windows\":[{\"tabs\":[\n",
    );

    fixture
        .command()
        .arg(&fixture.sessions)
        .args(["--on-shape-error", "skip"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 sessions skipped, 1 decode failures"));

    let doc = read(&fixture.output());
    assert!(doc.contains(">Good</H3>"));
    assert!(!doc.contains(">Broken</H3>"));
}

#[test]
fn test_custom_output_and_config_file() {
    let fixture = TestFixture::new();
    fixture.add_session("amp.session", "R&D <team>", "https://a.example/?x=1&y=2", 5);
    let config = fixture.work.join("smexport.toml");
    fs::write(&config, "escape_markup = true\nlog_path = \"custom.log\"\n").unwrap();

    fixture
        .command()
        .arg(&fixture.sessions)
        .arg("--config")
        .arg(&config)
        .args(["--output", "out.html"])
        .assert()
        .success();

    let doc = read(&fixture.work.join("out.html"));
    assert!(doc.contains(">R&amp;D &lt;team&gt;</H3>"));
    assert!(doc.contains("HREF=\"https://a.example/?x=1&amp;y=2\""));
    assert!(fixture.work.join("custom.log").exists());
    assert!(!fixture.output().exists());
}

#[test]
fn test_unknown_policy_is_usage_error() {
    let fixture = TestFixture::new();

    fixture
        .command()
        .arg(&fixture.sessions)
        .args(["--on-shape-error", "retry"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown failure policy"));
}
