//! Shared helpers for integration tests

#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Buffer collecting everything the test subscriber writes
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    /// Captured log output so far
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Captured lines containing the given level marker (e.g. "ERROR")
    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(level))
            .map(str::to_string)
            .collect()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route this thread's tracing output into a buffer
///
/// Only events emitted on the current thread are captured, so use it from
/// `#[tokio::test]` (current-thread runtime).
pub fn capture_logs() -> (LogCapture, DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}

/// Write an executable shell script standing in for the database client
///
/// Returns once the script has been executed successfully, so a write handle
/// inherited by a process forked concurrently can no longer cause
/// "Text file busy" for the caller.
#[cfg(unix)]
pub fn stub_client(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    const ETXTBSY: i32 = 26;
    const READY_FLAG: &str = "--stub-ready";

    let path = dir.join(name);
    std::fs::write(
        &path,
        format!("#!/bin/sh\n[ \"$1\" = \"{READY_FLAG}\" ] && exit 0\n{body}\n"),
    )
    .unwrap();
    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    std::fs::set_permissions(&path, permissions).unwrap();

    for _ in 0..100 {
        match std::process::Command::new(&path).arg(READY_FLAG).status() {
            Ok(status) => {
                assert!(status.success(), "stub client {name} not runnable");
                return path;
            }
            Err(e) if e.raw_os_error() == Some(ETXTBSY) => {
                std::thread::sleep(std::time::Duration::from_millis(10));
            }
            Err(e) => panic!("stub client {name} not runnable: {e}"),
        }
    }
    panic!("stub client {name} stayed busy");
}

/// Build an in-memory zip archive from `(name, content)` pairs
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::FileOptions;
    use zip::ZipWriter;

    let mut writer = ZipWriter::new(io::Cursor::new(Vec::new()));
    for (name, content) in entries {
        if name.ends_with('/') {
            writer.add_directory(*name, FileOptions::default()).unwrap();
        } else {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}
