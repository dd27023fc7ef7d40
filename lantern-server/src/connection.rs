//! Per-connection protocol state machine.
//!
//! A connection moves Handshake -> Serving -> Closed. The handshake
//! sends exactly one `Setup`; serving reads one `Query` and writes one
//! `Answer` at a time, never reading ahead of an unsent answer. Every
//! failure is classified where it happens and ends the connection; it
//! never touches the listener, the refresh cycle or other connections.
//!
//! The snapshot handed in at accept time is the only corpus state the
//! connection ever sees.

use crate::framing::{read_frame, write_frame, FrameError};
use crate::protocol::{Answer, Query, Setup};
use crate::snapshot::CorpusSnapshot;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::net::TcpStream;
use tracing::debug;

/// Why a connection ended, other than the peer closing cleanly.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed frame: {0}")]
    Frame(FrameError),
    #[error("malformed message: {0}")]
    Message(#[from] serde_json::Error),
    #[error("query rejected: {0}")]
    Query(#[from] lantern_pir::PirError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConnState {
    Handshake,
    Serving,
    Closed,
}

/// Runs one connection to completion.
pub(crate) async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    snapshot: Arc<CorpusSnapshot>,
) -> Result<(), ConnectionError> {
    let (read_half, write_half) = stream.into_split();
    let result = drive(BufReader::new(read_half), write_half, &snapshot).await;
    debug!("connection closed: {}", addr);
    result
}

/// The state machine proper, over any byte stream.
///
/// Returning `Err` is the Closed transition for the failure cases; the
/// caller drops the stream and the pinned snapshot either way.
async fn drive<R, W>(
    mut reader: R,
    mut writer: W,
    snapshot: &CorpusSnapshot,
) -> Result<(), ConnectionError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut state = ConnState::Handshake;
    loop {
        state = match state {
            ConnState::Handshake => {
                send_setup(&mut writer, snapshot).await?;
                debug!("handshake complete at generation {}", snapshot.generation);
                ConnState::Serving
            }
            ConnState::Serving => match serve_one(&mut reader, &mut writer, snapshot).await? {
                Some(()) => ConnState::Serving,
                None => ConnState::Closed,
            },
            ConnState::Closed => return Ok(()),
        };
    }
}

async fn send_setup<W>(writer: &mut W, snapshot: &CorpusSnapshot) -> Result<(), ConnectionError>
where
    W: AsyncWrite + Unpin,
{
    let payload = serde_json::to_vec(&Setup::for_snapshot(snapshot))?;
    write_frame(writer, &payload).await?;
    Ok(())
}

/// Handles one query/answer exchange. `Ok(None)` means the peer closed.
async fn serve_one<R, W>(
    reader: &mut R,
    writer: &mut W,
    snapshot: &CorpusSnapshot,
) -> Result<Option<()>, ConnectionError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let payload = match read_frame(reader).await {
        Ok(Some(payload)) => payload,
        Ok(None) => return Ok(None),
        Err(FrameError::Io(e)) => return Err(ConnectionError::Io(e)),
        Err(e) => return Err(ConnectionError::Frame(e)),
    };

    let query: Query = serde_json::from_slice(&payload)?;
    let answer = lantern_pir::answer(&query.query, &snapshot.matrix, snapshot.params.q)?;
    let payload = serde_json::to_vec(&Answer { answer })?;
    write_frame(writer, &payload).await?;
    Ok(Some(()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::io::AsyncWriteExt;

    fn snapshot(texts: &[&str]) -> Arc<CorpusSnapshot> {
        let articles: Vec<String> = texts.iter().map(|t| t.to_string()).collect();
        Arc::new(CorpusSnapshot::from_articles(&articles, 1).unwrap())
    }

    /// Wires `drive` to an in-memory duplex stream and returns the client
    /// side split into halves.
    fn spawn_driver(
        snapshot: Arc<CorpusSnapshot>,
    ) -> (
        tokio::io::ReadHalf<tokio::io::DuplexStream>,
        tokio::io::WriteHalf<tokio::io::DuplexStream>,
        tokio::task::JoinHandle<Result<(), ConnectionError>>,
    ) {
        let (client, server) = tokio::io::duplex(1 << 20);
        let handle = tokio::spawn(async move {
            let (read, write) = tokio::io::split(server);
            drive(BufReader::new(read), write, &snapshot).await
        });
        let (client_read, client_write) = tokio::io::split(client);
        (client_read, client_write, handle)
    }

    async fn recv_json(
        reader: &mut BufReader<tokio::io::ReadHalf<tokio::io::DuplexStream>>,
    ) -> Value {
        let payload = read_frame(reader).await.unwrap().expect("stream closed");
        serde_json::from_slice(&payload).unwrap()
    }

    #[tokio::test]
    async fn test_setup_sent_first_and_only_once() {
        let (client_read, mut client_write, handle) = spawn_driver(snapshot(&["cat", "dog", "owl"]));
        let mut reader = BufReader::new(client_read);

        let setup = recv_json(&mut reader).await;
        assert_eq!(setup["num_articles"], Value::from(3));
        assert_eq!(setup["params"]["m"], Value::from(3));

        // Closing without ever querying is a graceful end; no second
        // setup or other trailing frame shows up.
        client_write.shutdown().await.unwrap();
        assert!(read_frame(&mut reader).await.unwrap().is_none());
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_queries_answered_in_order() {
        let (client_read, mut client_write, _handle) = spawn_driver(snapshot(&["cat", "dog", "owl"]));
        let mut reader = BufReader::new(client_read);
        recv_json(&mut reader).await;

        write_frame(&mut client_write, br#"{"query": [1, 0, 0]}"#)
            .await
            .unwrap();
        write_frame(&mut client_write, br#"{"query": [0, 1, 0]}"#)
            .await
            .unwrap();

        let first = recv_json(&mut reader).await;
        assert_eq!(first["answer"], serde_json::json!([99, 97, 116]));
        let second = recv_json(&mut reader).await;
        assert_eq!(second["answer"], serde_json::json!([100, 111, 103]));
    }

    #[tokio::test]
    async fn test_bad_length_header_is_frame_error() {
        let (client_read, mut client_write, handle) = spawn_driver(snapshot(&["cat"]));
        let mut reader = BufReader::new(client_read);
        recv_json(&mut reader).await;

        client_write.write_all(b"not-a-number\n").await.unwrap();
        client_write.flush().await.unwrap();
        drop(client_write);

        assert!(matches!(
            handle.await.unwrap(),
            Err(ConnectionError::Frame(FrameError::BadHeader(_)))
        ));
    }

    #[tokio::test]
    async fn test_undecodable_payload_is_message_error() {
        let (client_read, mut client_write, handle) = spawn_driver(snapshot(&["cat"]));
        let mut reader = BufReader::new(client_read);
        recv_json(&mut reader).await;

        write_frame(&mut client_write, b"{\"wrong\": true}").await.unwrap();
        drop(client_write);

        assert!(matches!(
            handle.await.unwrap(),
            Err(ConnectionError::Message(_))
        ));
    }

    #[tokio::test]
    async fn test_wrong_length_query_is_rejected() {
        let (client_read, mut client_write, handle) = spawn_driver(snapshot(&["cat", "dog", "owl"]));
        let mut reader = BufReader::new(client_read);
        recv_json(&mut reader).await;

        write_frame(&mut client_write, br#"{"query": [1, 0]}"#)
            .await
            .unwrap();
        drop(client_write);

        assert!(matches!(
            handle.await.unwrap(),
            Err(ConnectionError::Query(_))
        ));
    }

    #[tokio::test]
    async fn test_peer_close_mid_payload_is_io_error() {
        let (client_read, mut client_write, handle) = spawn_driver(snapshot(&["cat"]));
        let mut reader = BufReader::new(client_read);
        recv_json(&mut reader).await;

        client_write.write_all(b"50\n{\"query\"").await.unwrap();
        client_write.flush().await.unwrap();
        client_write.shutdown().await.unwrap();

        assert!(matches!(
            handle.await.unwrap(),
            Err(ConnectionError::Io(_))
        ));
    }
}
