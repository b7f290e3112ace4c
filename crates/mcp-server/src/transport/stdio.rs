//! stdio transport for MCP

use seo_api::ApiClient;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::error::Result;
use crate::protocol::{McpError, McpMessage, RequestHandler};

/// stdio transport for MCP protocol
pub struct StdioTransport {
    handler: RequestHandler,
}

impl StdioTransport {
    /// Create a new stdio transport
    pub fn new(client: ApiClient) -> Self {
        Self {
            handler: RequestHandler::new(client),
        }
    }

    /// Serve requests from stdin until EOF
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting MCP server on stdio");
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve newline-delimited JSON-RPC messages from `reader` until EOF
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();

            let bytes_read = reader.read_line(&mut line).await?;
            if bytes_read == 0 {
                info!("EOF received, shutting down");
                break;
            }

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("Received: {}", line);

            let response = match serde_json::from_str::<McpMessage>(line) {
                Ok(message) => self.handler.handle(message).await,
                Err(e) => {
                    error!("Failed to parse message: {}", e);
                    Some(McpMessage::error_response(None, McpError::parse_error()))
                }
            };

            if let Some(response) = response {
                let response_line = serde_json::to_string(&response)?;
                debug!("Sending: {}", response_line);
                writer.write_all(response_line.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seo_api::MockBackend;
    use serde_json::Value;
    use std::sync::Arc;

    async fn run_session(input: &str) -> Vec<Value> {
        let mut transport = StdioTransport::new(ApiClient::new(Arc::new(MockBackend::seeded(4))));
        let mut output = Vec::new();
        transport.serve(input.as_bytes(), &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_session() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"t","version":"1"}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_spam_score","arguments":{"url":"example.com"}}}"#,
            "\n",
        );

        let responses = run_session(input).await;
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["result"]["tools"].as_array().unwrap().len(), 4);
        assert_eq!(responses[2]["id"], 3);
        assert!(responses[2]["result"]["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("risk_level"));
    }

    #[tokio::test]
    async fn test_parse_error() {
        let responses = run_session("not json\n").await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert!(responses[0].get("id").is_none());
    }
}
