//! Async line loop driving a [`QueryServer`].
//!
//! Reads commands line by line until EOF and writes every reply as a
//! single JSON line, flushing after each command so CouchDB never waits
//! on a buffered answer. Lines are read as raw bytes: input that is not
//! UTF-8 is answered with a `bad_request` error like any other unparsable
//! line, and the loop carries on.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use super::{QueryServer, Stats};
use crate::error::DocviewsError;

pub async fn serve<R, W>(
    mut reader: R,
    mut writer: W,
    server: &mut QueryServer,
) -> Result<Stats, DocviewsError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }
        if line.trim_ascii().is_empty() {
            continue;
        }
        for out in server.handle_bytes(&line) {
            let mut buf = serde_json::to_vec(&out)?;
            buf.push(b'\n');
            writer.write_all(&buf).await?;
        }
        writer.flush().await?;
    }
    Ok(server.stats())
}

/// Serve on the process's stdin and stdout.
pub async fn serve_stdio(server: &mut QueryServer) -> Result<Stats, DocviewsError> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(stdin, stdout, server).await
}
