use crate::common::errors::AppError;
use crate::tools;
use serde_json::{json, Value};

pub struct Dispatcher;

impl Dispatcher {
    pub fn dispatch(method: &str, params: Option<Value>) -> Result<Value, AppError> {
        match method {
            // MCP initialization handshake.
            "initialize" => Ok(Self::initialize_result()),
            // Notification can arrive with or without namespace depending on the client.
            "initialized" | "notifications/initialized" => Ok(Value::Null),
            "tools/list" => Ok(Self::tools_list_result()),
            "tools/call" => Self::dispatch_tools_call(params),
            // Direct tool-name calls for manual CLI testing.
            _ => Self::dispatch_direct_tool(method, params.unwrap_or(Value::Null)),
        }
    }

    fn dispatch_tools_call(params: Option<Value>) -> Result<Value, AppError> {
        let payload = params.ok_or_else(|| AppError::InvalidInput("missing params".to_string()))?;
        let name = payload
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::InvalidInput("missing tool name".to_string()))?;
        let arguments = payload.get("arguments").cloned().unwrap_or(Value::Null);

        let result = Self::dispatch_direct_tool(name, arguments)?;
        let text = serde_json::to_string_pretty(&result)
            .unwrap_or_else(|_| "{\"error\":\"failed to render tool result\"}".to_string());

        Ok(json!({
            "content": [
                {
                    "type": "text",
                    "text": text
                }
            ],
            "structuredContent": result,
            "isError": false
        }))
    }

    fn dispatch_direct_tool(tool_name: &str, args: Value) -> Result<Value, AppError> {
        match tool_name {
            "create_ods" => tools::create_ods::handle(args),
            "get_sheets" => tools::get_sheets::handle(args),
            "get_sheet_content" => tools::get_sheet_content::handle(args),
            "set_active_sheet" => tools::set_active_sheet::handle(args),
            "find_record" => tools::find_record::handle(args),
            "next_record" => tools::next_record::handle(args),
            "validate_template" => tools::validate_template::handle(args),
            "update_cell" => tools::update_cell::handle(args),
            "insert_row_after_group" => tools::insert_row::handle(args),
            _ => Err(AppError::InvalidInput(format!(
                "unknown method/tool: {tool_name}"
            ))),
        }
    }

    fn initialize_result() -> Value {
        json!({
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "ods-records",
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn tools_list_result() -> Value {
        json!({
            "tools": [
                {
                    "name": "create_ods",
                    "description": "Create an ODS file with one sheet and an optional template header row.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "overwrite": { "type": "boolean", "default": false },
                            "initial_sheet_name": { "type": "string", "default": "Sheet1" },
                            "headers": { "type": "array", "items": { "type": "string" } }
                        },
                        "required": ["path"]
                    }
                },
                {
                    "name": "get_sheets",
                    "description": "Return sheets in tab order with row counts and the active tab.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" }
                        },
                        "required": ["path"]
                    }
                },
                {
                    "name": "get_sheet_content",
                    "description": "Return a sheet as a 2D matrix of display texts.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "sheet": Self::sheet_selector_schema(),
                            "start_row": { "type": "integer", "minimum": 1, "default": 1 },
                            "mode": { "type": "string", "enum": ["matrix"] },
                            "max_rows": { "type": "integer" },
                            "max_cols": { "type": "integer" },
                            "include_empty_trailing": { "type": "boolean" }
                        },
                        "required": ["path"]
                    }
                },
                {
                    "name": "set_active_sheet",
                    "description": "Select the sheet tab shown when the file is opened.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "sheet": Self::sheet_selector_schema()
                        },
                        "required": ["path", "sheet"]
                    }
                },
                {
                    "name": "find_record",
                    "description": "Find the record set of rows for an id or a person's name.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "sheet": Self::sheet_selector_schema(),
                            "first_row": { "type": "integer", "minimum": 1, "default": 2 },
                            "last_row": { "type": "integer", "minimum": 1 },
                            "lookup": {
                                "oneOf": [
                                    {
                                        "type": "object",
                                        "properties": {
                                            "by": { "const": "id" },
                                            "column": Self::column_schema(),
                                            "id": { "type": "string" },
                                            "suffix_fallback": { "type": "boolean", "default": false }
                                        },
                                        "required": ["by", "column", "id"]
                                    },
                                    {
                                        "type": "object",
                                        "properties": {
                                            "by": { "const": "name" },
                                            "name": Self::name_lookup_schema(),
                                            "candidates": {
                                                "type": "array",
                                                "items": {
                                                    "type": "object",
                                                    "properties": {
                                                        "first_name": { "type": "string" },
                                                        "last_name": { "type": "string" }
                                                    }
                                                }
                                            },
                                            "similar_fallback": { "type": "boolean", "default": true }
                                        },
                                        "required": ["by", "name", "candidates"]
                                    }
                                ]
                            }
                        },
                        "required": ["path", "lookup"]
                    }
                },
                {
                    "name": "next_record",
                    "description": "Step from the record set containing a row to the next entity's record set.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "sheet": Self::sheet_selector_schema(),
                            "row": { "type": "integer", "minimum": 1 },
                            "lookup": Self::lookup_spec_schema(),
                            "conditions": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "column": Self::column_schema(),
                                        "test": { "type": "string", "enum": ["non_empty", "empty", "equals", "contains"] },
                                        "value": { "type": "string" }
                                    },
                                    "required": ["column", "test"]
                                }
                            },
                            "last_row": { "type": "integer", "minimum": 1 }
                        },
                        "required": ["path", "row", "lookup"]
                    }
                },
                {
                    "name": "validate_template",
                    "description": "Check that the header row carries the expected labels.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "sheet": Self::sheet_selector_schema(),
                            "header_row": { "type": "integer", "minimum": 1, "default": 1 },
                            "columns": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "column": Self::column_schema(),
                                        "label": { "type": "string" }
                                    },
                                    "required": ["column", "label"]
                                }
                            }
                        },
                        "required": ["path", "columns"]
                    }
                },
                {
                    "name": "update_cell",
                    "description": "Update value, fill, number format, font or note of one existing cell.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "sheet": Self::sheet_selector_schema(),
                            "cell": { "type": "string" },
                            "update": {
                                "type": "object",
                                "properties": {
                                    "value": {
                                        "type": "object",
                                        "properties": {
                                            "type": { "type": "string", "enum": ["string", "number", "boolean", "date", "formula", "empty"] },
                                            "data": {}
                                        },
                                        "required": ["type"]
                                    },
                                    "fill": { "type": "string" },
                                    "num_fmt": { "type": "string" },
                                    "bold": { "type": "boolean" },
                                    "font_color": { "type": "string" },
                                    "note": { "type": "string" },
                                    "clear_note": { "type": "boolean" }
                                }
                            }
                        },
                        "required": ["path", "cell", "update"]
                    }
                },
                {
                    "name": "insert_row_after_group",
                    "description": "Insert a blank row directly below the group of populated rows containing a row.",
                    "inputSchema": {
                        "type": "object",
                        "properties": {
                            "path": { "type": "string" },
                            "sheet": Self::sheet_selector_schema(),
                            "row": { "type": "integer", "minimum": 1 },
                            "column": Self::column_schema(),
                            "first_row": { "type": "integer", "minimum": 1, "default": 2 }
                        },
                        "required": ["path", "row", "column"]
                    }
                }
            ]
        })
    }

    fn column_schema() -> Value {
        json!({
            "oneOf": [
                { "type": "string", "description": "Column letters such as \"A\" or \"AB\"" },
                { "type": "integer", "minimum": 1 }
            ]
        })
    }

    fn name_lookup_schema() -> Value {
        json!({
            "oneOf": [
                {
                    "type": "object",
                    "properties": {
                        "kind": { "const": "split" },
                        "first_name": Self::column_schema(),
                        "last_name": Self::column_schema()
                    },
                    "required": ["kind", "first_name", "last_name"]
                },
                {
                    "type": "object",
                    "properties": {
                        "kind": { "const": "combined" },
                        "name": Self::column_schema(),
                        "order": { "type": "string", "enum": ["FIRST_NAME_LAST_NAME", "LAST_NAME_FIRST_NAME"] },
                        "delimiter": { "type": "string", "default": " " }
                    },
                    "required": ["kind", "name", "order"]
                }
            ]
        })
    }

    fn lookup_spec_schema() -> Value {
        json!({
            "oneOf": [
                {
                    "type": "object",
                    "properties": {
                        "by": { "const": "id" },
                        "column": Self::column_schema()
                    },
                    "required": ["by", "column"]
                },
                {
                    "type": "object",
                    "properties": {
                        "by": { "const": "name" },
                        "name": Self::name_lookup_schema()
                    },
                    "required": ["by", "name"]
                }
            ]
        })
    }

    fn sheet_selector_schema() -> Value {
        json!({
            "description": "Defaults to the active sheet when omitted.",
            "oneOf": [
                {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" }
                    },
                    "required": ["name"]
                },
                {
                    "type": "object",
                    "properties": {
                        "index": { "type": "integer", "minimum": 0 }
                    },
                    "required": ["index"]
                },
                {
                    "type": "string",
                    "description": "Sheet name or JSON string like {\"name\":\"Sheet1\"} or {\"index\":0}"
                }
            ]
        })
    }
}
