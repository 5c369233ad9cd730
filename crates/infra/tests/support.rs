#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use recipebox_common::MemoryCredentialStore;
use recipebox_infra::RequestGateway;
use tracing::subscriber::DefaultGuard;
use wiremock::MockServer;

/// Gateway against `server` holding `token` in a fresh in-memory store.
pub fn signed_in_gateway(
    server: &MockServer,
    token: &str,
) -> (Arc<RequestGateway>, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::with_token(token));
    let gateway = RequestGateway::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .credentials(Arc::clone(&store) as Arc<dyn recipebox_common::CredentialStore>)
        .build()
        .expect("gateway should build");

    (Arc::new(gateway), store)
}

/// Handle for inspecting formatted log output captured during a test.
#[derive(Clone, Default)]
pub struct LogHandle {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogHandle {
    /// All captured output as text.
    pub fn output(&self) -> String {
        let guard = self.buffer.lock().expect("log mutex poisoned");
        String::from_utf8_lossy(&guard).into_owned()
    }

    /// Check whether a line at `level` mentions `needle`.
    pub fn contains(&self, level: &str, needle: &str) -> bool {
        self.output().lines().any(|line| line.contains(level) && line.contains(needle))
    }
}

impl io::Write for LogHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().expect("log mutex poisoned").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Capture tracing output on the current thread until the guard drops.
///
/// Use with `#[tokio::test]` (current-thread runtime) so spawned-free async
/// code logs on the same thread.
pub fn capture_logs() -> (LogHandle, DefaultGuard) {
    let handle = LogHandle::default();
    let writer = handle.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let guard = tracing::subscriber::set_default(subscriber);
    (handle, guard)
}
