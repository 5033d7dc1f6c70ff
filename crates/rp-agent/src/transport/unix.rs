//! Unix domain socket dialing

use tokio::net::UnixStream;

pub(crate) type RawStream = UnixStream;

pub(crate) async fn dial(address: &str) -> std::io::Result<RawStream> {
    UnixStream::connect(address).await
}
