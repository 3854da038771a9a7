//! Line-delimited transport for MCP.
//!
//! Per the [MCP stdio transport](https://modelcontextprotocol.io/specification/2024-11-05/basic/transports),
//! every message is one complete JSON-RPC object on a single line:
//!
//! ```text
//! {"jsonrpc":"2.0","id":1,"method":"initialize","params":{...}}\n
//! {"jsonrpc":"2.0","id":1,"result":{...}}\n
//! ```
//!
//! Stdout carries protocol traffic only; logs go to stderr.

use std::io::{BufRead, BufReader, BufWriter, Stdin, Stdout, Write};

use crate::StmsResult;

use super::protocol::{JsonRpcRequest, JsonRpcResponse};

/// Transport over any buffered reader and writer.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

/// Transport bound to the process stdin and stdout.
pub type StdioTransport = LineTransport<BufReader<Stdin>, BufWriter<Stdout>>;

impl StdioTransport {
    /// Creates a transport over stdin/stdout.
    pub fn stdio() -> Self {
        LineTransport::new(
            BufReader::new(std::io::stdin()),
            BufWriter::new(std::io::stdout()),
        )
    }
}

impl<R: BufRead, W: Write> LineTransport<R, W> {
    /// Creates a transport over the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Reads the next request.
    ///
    /// Returns `Ok(None)` at end of input. Blank lines are skipped. A line
    /// that is not a valid JSON-RPC request, including one that is not valid
    /// UTF-8, yields [`crate::StmsError::Json`].
    pub fn read_message(&mut self) -> StmsResult<Option<JsonRpcRequest>> {
        loop {
            let mut line = Vec::new();
            let bytes_read = self.reader.read_until(b'\n', &mut line)?;

            if bytes_read == 0 {
                return Ok(None);
            }

            let trimmed = line.trim_ascii();
            if trimmed.is_empty() {
                continue;
            }

            let request: JsonRpcRequest = serde_json::from_slice(trimmed)?;

            tracing::debug!(
                method = %request.method,
                id = ?request.id,
                "Received request"
            );

            return Ok(Some(request));
        }
    }

    /// Writes a response as compact JSON followed by `\n`, then flushes.
    pub fn write_response(&mut self, response: &JsonRpcResponse) -> StmsResult<()> {
        let body = serde_json::to_string(response)?;

        self.writer.write_all(body.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        tracing::debug!(
            id = ?response.id,
            is_error = response.is_error(),
            "Sent response"
        );

        Ok(())
    }

    /// Consumes the transport, returning the writer.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
