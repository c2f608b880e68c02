// UI layer: everything the user sees on the terminal. Kept apart from
// `api` so the import itself never prints.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::api::{ApiClient, ImportOutcome};
use crate::config::{BuildInfo, ImportConfig};
use crate::error::Result;
use crate::transport::Transport;

pub const COMPLETED_MESSAGE: &str = "apifox import completed.";

pub fn print_version(out: &mut impl Write, info: &BuildInfo) -> io::Result<()> {
    writeln!(out, "git_version: {}", info.git_version)?;
    writeln!(out, "build_time: {}", info.build_time)
}

/// Import `file` with a spinner on stderr while the request is in flight.
/// The spinner is cleared on success and failure alike. Log lines are only
/// written before it starts or after it is cleared.
pub fn run_import<T: Transport>(
    api: &ApiClient<T>,
    file: &Path,
    config: &ImportConfig,
) -> Result<ImportOutcome> {
    debug!(file = %file.display(), project = %config.project_id, "starting import");

    // indicatif hides the spinner by itself when stderr is not a terminal.
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Uploading {}...", file.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let res = api.import_file(file, config);
    spinner.finish_and_clear();

    let outcome = res?;
    info!(
        status = outcome.status,
        bytes = outcome.body.len(),
        "import response received"
    );
    Ok(outcome)
}

/// Print the raw body (when verbose) and the completion line.
pub fn report(out: &mut impl Write, outcome: &ImportOutcome, verbose: bool) -> io::Result<()> {
    if verbose {
        writeln!(out, "Result: {}", outcome.body_text())?;
    }
    writeln!(out, "{COMPLETED_MESSAGE}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{BoxError, HttpRequest, HttpResponse};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct Answer(u16);

    impl Transport for Answer {
        fn execute(&self, _request: HttpRequest) -> std::result::Result<HttpResponse, BoxError> {
            Ok(HttpResponse {
                status: self.0,
                body: Box::new(io::Cursor::new(b"{}".to_vec())),
            })
        }
    }

    fn outcome() -> ImportOutcome {
        ImportOutcome {
            status: 200,
            body: b"{\"data\":{\"counters\":{}}}".to_vec(),
        }
    }

    #[test]
    fn report_is_quiet_by_default() {
        let mut out = Vec::new();
        report(&mut out, &outcome(), false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "apifox import completed.\n");
    }

    #[test]
    fn report_echoes_body_when_verbose() {
        let mut out = Vec::new();
        report(&mut out, &outcome(), true).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Result: {\"data\":{\"counters\":{}}}\napifox import completed.\n"
        );
    }

    #[test]
    fn run_import_logs_status_after_the_upload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swagger.yaml");
        std::fs::write(&path, "openapi: 3.0.0\n").unwrap();
        let config = ImportConfig {
            project_id: "12345".into(),
            token: "abc".into(),
            ..ImportConfig::default()
        };

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let outcome = tracing::subscriber::with_default(subscriber, || {
            run_import(&ApiClient::new(Answer(502)), &path, &config)
        })
        .unwrap();

        assert_eq!(outcome.status, 502);
        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let started = logs.find("starting import").unwrap();
        let received = logs.find("import response received").unwrap();
        assert!(started < received);
        assert!(logs.contains("status=502"));
    }

    #[test]
    fn version_lists_git_version_and_build_time() {
        let mut out = Vec::new();
        let info = BuildInfo {
            git_version: "v1.2.3".into(),
            build_time: "2024-05-01T10:00:00Z".into(),
        };
        print_version(&mut out, &info).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "git_version: v1.2.3\nbuild_time: 2024-05-01T10:00:00Z\n"
        );
    }
}
