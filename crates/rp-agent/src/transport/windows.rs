//! Named pipe dialing

use std::time::Duration;

use tokio::net::windows::named_pipe::{ClientOptions, NamedPipeClient};

pub(crate) type RawStream = NamedPipeClient;

/// ERROR_PIPE_BUSY: the pipe exists but all instances are in use
const ERROR_PIPE_BUSY: i32 = 231;

const BUSY_RETRY_DELAY: Duration = Duration::from_millis(50);

pub(crate) async fn dial(address: &str) -> std::io::Result<RawStream> {
    // The caller's connect timeout bounds this loop
    loop {
        match ClientOptions::new().open(address) {
            Err(e) if e.raw_os_error() == Some(ERROR_PIPE_BUSY) => {
                tracing::trace!(address, "Named pipe busy, waiting");
                tokio::time::sleep(BUSY_RETRY_DELAY).await;
            }
            result => return result,
        }
    }
}
