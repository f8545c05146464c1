//! CouchDB query-server protocol.
//!
//! CouchDB drives an external view server over stdio: each input line is
//! a JSON array whose first element names a command, and each command is
//! answered by exactly one JSON line, optionally preceded by `["log", ...]`
//! lines. [`QueryServer`] implements the command handling as a pure state
//! machine over lines; [`stdio::serve`] wires it to async streams.
//!
//! Map functions are registered with `add_fun` using the textual
//! [`ViewKind`] form stored in the design document.

pub mod stdio;

use serde_json::{json, Value};

use crate::views::{self, Document, View, ViewKind};

/// Counters reported when the server shuts down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub commands: u64,
    pub documents: u64,
    pub map_failures: u64,
    pub errors: u64,
}

struct Function {
    source: String,
    view: Box<dyn View>,
}

#[derive(Default)]
pub struct QueryServer {
    functions: Vec<Function>,
    stats: Stats,
}

fn error(kind: &str, reason: impl Into<String>) -> Value {
    let reason: String = reason.into();
    json!(["error", kind, reason])
}

fn log(message: String) -> Value {
    json!(["log", message])
}

impl QueryServer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn stats(&self) -> Stats {
        self.stats
    }

    /// Sources of the currently registered map functions, in order.
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.source.as_str())
    }

    /// Handle one protocol line. The last returned value is the reply;
    /// any before it are log lines.
    pub fn handle_line(&mut self, line: &str) -> Vec<Value> {
        self.stats.commands += 1;
        let reply = match serde_json::from_str::<Value>(line) {
            Ok(Value::Array(items)) => self.handle_command(&items),
            Ok(_) => vec![error("bad_request", "command must be a JSON array")],
            Err(e) => vec![error("bad_request", format!("invalid JSON: {e}"))],
        };
        if reply
            .last()
            .and_then(|v| v.get(0))
            .is_some_and(|head| head == "error")
        {
            self.stats.errors += 1;
        }
        reply
    }

    /// Handle one raw input line, answering non-UTF-8 bytes with a
    /// `bad_request` error.
    pub fn handle_bytes(&mut self, line: &[u8]) -> Vec<Value> {
        match std::str::from_utf8(line) {
            Ok(line) => self.handle_line(line),
            Err(e) => {
                self.stats.commands += 1;
                self.stats.errors += 1;
                tracing::warn!(error = %e, "input line is not valid UTF-8");
                vec![error("bad_request", format!("line is not valid UTF-8: {e}"))]
            }
        }
    }

    fn handle_command(&mut self, items: &[Value]) -> Vec<Value> {
        let Some(command) = items.first().and_then(Value::as_str) else {
            return vec![error("bad_request", "missing command name")];
        };
        tracing::trace!(command, "query server command");

        match command {
            "reset" => {
                self.functions.clear();
                vec![Value::Bool(true)]
            }
            "add_lib" => vec![Value::Bool(true)],
            "add_fun" => vec![self.add_fun(items.get(1))],
            "map_doc" => self.map_doc(items.get(1)),
            "reduce" | "rereduce" => vec![error(
                "not_implemented",
                format!("'{command}' is not supported; use a built-in reduce such as _count"),
            )],
            other => vec![error(
                "unknown_command",
                format!("unknown command '{other}'"),
            )],
        }
    }

    fn add_fun(&mut self, source: Option<&Value>) -> Value {
        let Some(source) = source.and_then(Value::as_str) else {
            return error("compilation_error", "add_fun expects a source string");
        };
        match source.parse::<ViewKind>() {
            Ok(kind) => {
                tracing::debug!(%kind, "map function registered");
                self.functions.push(Function {
                    source: source.to_string(),
                    view: views::build(&kind),
                });
                Value::Bool(true)
            }
            Err(reason) => error("compilation_error", reason),
        }
    }

    fn map_doc(&mut self, doc: Option<&Value>) -> Vec<Value> {
        let Some(doc) = doc.cloned().and_then(Document::from_value) else {
            return vec![error("bad_request", "map_doc expects a document object")];
        };
        self.stats.documents += 1;

        let mut out = Vec::new();
        let mut results = Vec::with_capacity(self.functions.len());
        for function in &self.functions {
            match function.view.map(&doc) {
                Ok(emits) => {
                    results.push(Value::Array(emits.iter().map(|e| e.to_pair()).collect()));
                }
                Err(e) => {
                    self.stats.map_failures += 1;
                    let id = doc.id().unwrap_or("<no _id>");
                    tracing::warn!(doc_id = id, function = %function.source, error = %e, "map failed");
                    out.push(log(format!(
                        "function '{}' raised an error for document {id}: {e}",
                        function.source
                    )));
                    results.push(Value::Array(Vec::new()));
                }
            }
        }
        out.push(Value::Array(results));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(server: &mut QueryServer, line: &str) -> Value {
        server.handle_line(line).pop().unwrap()
    }

    #[test]
    fn reset_clears_functions() {
        let mut server = QueryServer::new();
        assert_eq!(reply(&mut server, r#"["add_fun", "identity"]"#), json!(true));
        assert_eq!(reply(&mut server, r#"["reset", {"reduce_limit": true}]"#), json!(true));
        assert_eq!(server.sources().count(), 0);
        assert_eq!(reply(&mut server, r#"["map_doc", {"_id": "a"}]"#), json!([]));
    }

    #[test]
    fn map_doc_returns_one_list_per_function() {
        let mut server = QueryServer::new();
        reply(&mut server, r#"["add_fun", "identity"]"#);
        reply(&mut server, r#"["add_fun", "tags"]"#);
        let doc = json!({"_id": "f1", "tags": ["a", "b"]});
        let out = reply(&mut server, &json!(["map_doc", doc]).to_string());
        assert_eq!(
            out,
            json!([
                [["f1", doc]],
                [["a", doc], ["b", doc]],
            ])
        );
    }

    #[test]
    fn failing_function_logs_and_yields_empty() {
        let mut server = QueryServer::new();
        reply(&mut server, r#"["add_fun", "tags"]"#);
        reply(&mut server, r#"["add_fun", "identity"]"#);
        let lines = server.handle_line(r#"["map_doc", {"_id": "s1", "tags": "core"}]"#);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0], "log");
        assert!(lines[0][1].as_str().unwrap().contains("s1"));
        assert_eq!(lines[1][0], json!([]));
        assert_eq!(lines[1][1][0][0], "s1");
        assert_eq!(server.stats().map_failures, 1);
    }

    #[test]
    fn bad_source_is_compilation_error() {
        let mut server = QueryServer::new();
        let out = reply(&mut server, r#"["add_fun", "function(doc) { emit(doc._id, doc); }"]"#);
        assert_eq!(out[0], "error");
        assert_eq!(out[1], "compilation_error");
        assert_eq!(server.sources().count(), 0);
    }

    #[test]
    fn reduce_is_not_implemented() {
        let mut server = QueryServer::new();
        let out = reply(&mut server, r#"["reduce", ["_count"], []]"#);
        assert_eq!(out[1], "not_implemented");
        assert_eq!(server.stats().errors, 1);
    }

    #[test]
    fn malformed_lines_are_bad_requests() {
        let mut server = QueryServer::new();
        assert_eq!(reply(&mut server, "not json")[1], "bad_request");
        assert_eq!(reply(&mut server, r#"{"cmd": "reset"}"#)[1], "bad_request");
        assert_eq!(reply(&mut server, "[]")[1], "bad_request");
        assert_eq!(reply(&mut server, r#"["map_doc", 3]"#)[1], "bad_request");
        assert_eq!(reply(&mut server, r#"["ddoc", "new"]"#)[1], "unknown_command");
    }

    #[test]
    fn invalid_utf8_is_a_bad_request() {
        let mut server = QueryServer::new();
        let out = server.handle_bytes(b"[\"map_doc\", {\"_id\": \"\xff\"}]\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0][1], "bad_request");
        assert_eq!(server.stats().errors, 1);
        assert_eq!(server.handle_bytes(b"[\"reset\"]\n"), vec![json!(true)]);
        assert_eq!(server.stats().commands, 2);
    }

    #[test]
    fn add_lib_is_accepted() {
        let mut server = QueryServer::new();
        assert_eq!(reply(&mut server, r#"["add_lib", {"utils": ""}]"#), json!(true));
    }
}
