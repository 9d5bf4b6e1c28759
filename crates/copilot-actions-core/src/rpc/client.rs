//! JSON-RPC client for reaching the editor
//!
//! Uses the LSP-style protocol with Content-Length headers over a Unix
//! socket (a named pipe on Windows). Every call opens its own connection so
//! concurrent pipelines never share a stream.
//!
//! The API is async only: it runs inside the Node.js extension host and must
//! not block the event loop.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::logging;

/// Errors that can occur during RPC operations
#[derive(Error, Debug)]
pub enum RpcError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type RpcResult<T> = Result<T, RpcError>;

/// JSON-RPC client
pub struct RpcClient {
    socket_path: String,
    auth_token: String,
    request_id: AtomicU64,
}

impl RpcClient {
    /// Create a new RPC client
    pub fn new(socket_path: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            socket_path: socket_path.into(),
            auth_token: auth_token.into(),
            request_id: AtomicU64::new(0),
        }
    }

    pub fn socket_path(&self) -> &str {
        &self.socket_path
    }

    /// Make a JSON-RPC request
    pub async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> RpcResult<R> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": self.with_auth(serde_json::to_value(params)?),
        });

        logging::debug("rpc::client", &format!("Sending request: method={}, id={}", method, id));

        let response = self.send_request(&request).await.map_err(|e| {
            logging::error("rpc::client", &format!("Request {} failed: {}", method, e));
            e
        })?;
        parse_response(response)
    }

    /// Attach the auth token to the request params
    fn with_auth(&self, params: Value) -> Value {
        match params {
            Value::Object(mut map) => {
                map.insert("auth".to_string(), json!(self.auth_token));
                Value::Object(map)
            }
            Value::Null => json!({ "auth": self.auth_token }),
            other => json!({ "auth": self.auth_token, "data": other }),
        }
    }

    #[cfg(unix)]
    async fn send_request(&self, request: &Value) -> RpcResult<Value> {
        let stream = tokio::net::UnixStream::connect(&self.socket_path)
            .await
            .map_err(|e| RpcError::ConnectionFailed(e.to_string()))?;
        exchange(stream, request).await
    }

    #[cfg(windows)]
    async fn send_request(&self, request: &Value) -> RpcResult<Value> {
        let pipe = tokio::net::windows::named_pipe::ClientOptions::new()
            .open(&self.socket_path)
            .map_err(|e| RpcError::ConnectionFailed(e.to_string()))?;
        exchange(pipe, request).await
    }

    /// Check if the endpoint is reachable
    pub async fn ping(&self) -> RpcResult<bool> {
        // Fast-fail: check if socket file exists first
        #[cfg(unix)]
        if !std::path::Path::new(&self.socket_path).exists() {
            return Err(RpcError::ConnectionFailed("Socket does not exist".to_string()));
        }

        #[derive(Deserialize)]
        struct PingResult {
            ok: bool,
        }

        // Ping doesn't need auth for basic connectivity check
        let request = json!({
            "jsonrpc": "2.0",
            "id": 0,
            "method": "lifecycle/ping",
            "params": {}
        });

        let response = self.send_request(&request).await?;
        let result: PingResult = parse_response(response)?;
        Ok(result.ok)
    }

    /// Execute an editor command (`commands/execute`) and return its result
    pub async fn execute_command(&self, command: &str, args: Option<Value>) -> RpcResult<Value> {
        #[derive(Serialize)]
        struct Params<'a> {
            command: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            args: Option<Value>,
        }

        #[derive(Deserialize)]
        struct Response {
            #[serde(default)]
            result: Value,
        }

        let response: Response = self.call("commands/execute", Params { command, args }).await?;
        Ok(response.result)
    }
}

/// Write one framed request and read one framed response
async fn exchange<S>(stream: S, request: &Value) -> RpcResult<Value>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let content = serde_json::to_string(request)?;
    let message = format!("Content-Length: {}\r\n\r\n{}", content.len(), content);

    let mut reader = BufReader::new(stream);
    reader.get_mut().write_all(message.as_bytes()).await?;
    reader.get_mut().flush().await?;

    read_response(&mut reader).await
}

async fn read_response<R: AsyncBufRead + Unpin>(reader: &mut R) -> RpcResult<Value> {
    let mut content_length: Option<usize> = None;
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            return Err(RpcError::InvalidResponse("Connection closed".to_string()));
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            // End of headers
            break;
        }

        if let Some(len_str) = trimmed.strip_prefix("Content-Length:") {
            content_length = Some(
                len_str
                    .trim()
                    .parse()
                    .map_err(|_| RpcError::InvalidResponse("Invalid Content-Length".to_string()))?,
            );
        }
    }

    let length = content_length
        .ok_or_else(|| RpcError::InvalidResponse("Missing Content-Length header".to_string()))?;

    let mut content = vec![0u8; length];
    reader.read_exact(&mut content).await?;

    Ok(serde_json::from_slice(&content)?)
}

fn parse_response<R: DeserializeOwned>(response: Value) -> RpcResult<R> {
    if let Some(error) = response.get("error") {
        let code = error.get("code").and_then(|c| c.as_i64()).unwrap_or(-1);
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        return Err(RpcError::RpcError { code, message });
    }

    let result = response
        .get("result")
        .ok_or_else(|| RpcError::InvalidResponse("Missing result field".to_string()))?;

    serde_json::from_value(result.clone()).map_err(|e| e.into())
}
