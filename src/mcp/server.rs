use crate::common::errors::AppError;
use crate::mcp::dispatcher::Dispatcher;
use crate::mcp::protocol::{JsonRpcRequest, JsonRpcResponse, PARSE_ERROR};
use std::io::{self, BufRead, Write};
use tracing::{debug, error};

pub struct McpServer;

impl McpServer {
    pub fn run_stdio() -> Result<(), AppError> {
        let stdin = io::stdin();
        let mut stdout = io::stdout().lock();
        Self::serve(stdin.lock(), &mut stdout)
    }

    /// Serves requests until `input` is exhausted.
    pub fn serve(input: impl BufRead, output: &mut impl Write) -> Result<(), AppError> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = Self::handle_line(&line) {
                Self::write_response(output, &response)?;
            }
        }

        Ok(())
    }

    fn handle_line(line: &str) -> Option<JsonRpcResponse> {
        // Protocol is line-oriented: one JSON-RPC request per stdin line.
        let request: Result<JsonRpcRequest, _> = serde_json::from_str(line);
        match request {
            Ok(req) => {
                debug!(method = %req.method, "request");
                let notification = req.is_notification();
                let result = Dispatcher::dispatch(&req.method, req.params);

                if notification {
                    if let Err(err) = result {
                        error!("notification handling error: {err}");
                    }
                    return None;
                }

                Some(match result {
                    Ok(result) => JsonRpcResponse::success(req.id, result),
                    Err(err) => {
                        debug!(code = err.code(), "request failed: {err}");
                        JsonRpcResponse::failure(req.id, err.code(), err.to_string())
                    }
                })
            }
            Err(err) => Some(JsonRpcResponse::failure(
                None,
                PARSE_ERROR,
                format!("invalid json-rpc request: {err}"),
            )),
        }
    }

    fn write_response(output: &mut impl Write, response: &JsonRpcResponse) -> Result<(), AppError> {
        let line =
            serde_json::to_string(response).map_err(|e| AppError::InvalidInput(e.to_string()))?;
        if let Err(e) = writeln!(output, "{line}") {
            error!("failed to write response: {e}");
            return Err(AppError::IoError(e.to_string()));
        }
        output.flush()?;
        Ok(())
    }
}
