//! Newline-delimited JSON-RPC server over stdio.
//!
//! Each inbound line is one message. Requests are handled on their own
//! task so a slow upstream call never blocks the reader; responses are
//! funnelled through a single writer task, one line per response, in
//! completion order.

use super::handlers::McpHandlers;
use super::protocol::{JsonRpcRequest, JsonRpcResponse, RequestId, RpcError};
use featurebase_domain::util::preview;
use futures::StreamExt;
use serde_json::Value;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{debug, error, info, trace, warn};

/// Longest inbound line accepted before it is rejected.
const MAX_LINE_LENGTH: usize = 8 * 1024 * 1024;

pub struct McpServer {
    handlers: Arc<McpHandlers>,
}

impl McpServer {
    pub fn new(handlers: McpHandlers) -> Self {
        Self {
            handlers: Arc::new(handlers),
        }
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn run(&self) -> io::Result<()> {
        info!("MCP server listening on stdio");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve on arbitrary streams. Returns once `reader` reaches EOF and
    /// every in-flight request has been answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> io::Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let writer_task = tokio::spawn(write_lines(writer, rx));

        let mut lines = FramedRead::new(reader, LinesCodec::new_with_max_length(MAX_LINE_LENGTH));
        let mut in_flight = JoinSet::new();

        while let Some(frame) = lines.next().await {
            let line = match frame {
                Ok(line) => line,
                Err(LinesCodecError::MaxLineLengthExceeded) => {
                    warn!(max = MAX_LINE_LENGTH, "Inbound line too long, discarded");
                    let error = RpcError::parse_error("Message too long");
                    send(&tx, &JsonRpcResponse::error(None, error));
                    continue;
                }
                Err(LinesCodecError::Io(e)) => {
                    error!(error = %e, "Failed to read stdin");
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            trace!(line = %preview(line, 512), "Inbound message");

            match decode(line) {
                Ok(request) => {
                    let handlers = Arc::clone(&self.handlers);
                    let tx = tx.clone();
                    in_flight.spawn(async move {
                        if let Some(response) = handlers.handle(request).await {
                            send(&tx, &response);
                        }
                    });
                }
                Err(response) => send(&tx, &response),
            }

            while let Some(joined) = in_flight.try_join_next() {
                log_join(joined);
            }
        }

        debug!(pending = in_flight.len(), "Input closed, draining in-flight requests");
        while let Some(joined) = in_flight.join_next().await {
            log_join(joined);
        }

        drop(tx);
        writer_task.await.map_err(io::Error::other)?
    }
}

/// Decode one line into a request, or the error response to send instead.
fn decode(line: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(line).map_err(|e| {
        JsonRpcResponse::error(None, RpcError::parse_error(format!("Parse error: {}", e)))
    })?;

    // Recover the id, if any, so a malformed request still gets a matched reply.
    let id = value
        .get("id")
        .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok());

    serde_json::from_value(value).map_err(|e| {
        JsonRpcResponse::error(id, RpcError::invalid_request(format!("Invalid request: {}", e)))
    })
}

fn send(tx: &mpsc::UnboundedSender<String>, response: &JsonRpcResponse) {
    match serde_json::to_string(response) {
        Ok(line) => {
            if tx.send(line).is_err() {
                warn!("Writer closed, response dropped");
            }
        }
        Err(e) => error!(error = %e, "Failed to serialize response"),
    }
}

fn log_join(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        error!(error = %e, "Request task failed");
    }
}

async fn write_lines<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<String>) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
