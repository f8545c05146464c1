//! CouchDB connection strings.
//!
//! Connection strings are `;`-separated `key=value` pairs such as
//! `driver=couchdb;server=localhost;uid=root;pwd=admin`. Later keys
//! override earlier ones. Only the `couchdb` driver is accepted, and a
//! bare `localhost` server means `http://localhost:5984`.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

pub const COUCHDB_DRIVER: &str = "couchdb";
pub const DEFAULT_PORT: u16 = 5984;

#[derive(Clone, PartialEq, Eq)]
pub struct Connection {
    pub driver: String,
    pub server: Url,
    pub uid: Option<String>,
    pub pwd: Option<String>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("driver", &self.driver)
            .field("server", &self.server.as_str())
            .field("uid", &self.uid)
            .field("pwd", &self.pwd.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Split a connection string into its key/value pairs.
pub fn parse_pairs(input: &str) -> Result<BTreeMap<String, String>, String> {
    let mut pairs = BTreeMap::new();
    for elem in input.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((key, value)) = elem.split_once('=') else {
            return Err(format!("'{elem}' is not a key=value pair"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("'{elem}' has an empty key"));
        }
        pairs.insert(key.to_ascii_lowercase(), value.trim().to_string());
    }
    Ok(pairs)
}

/// Resolve the `server` value: a full URL, a host, or `host:port`.
pub fn parse_server(server: &str) -> Result<Url, String> {
    let server = if server.is_empty() { "localhost" } else { server };
    let candidate = if server.contains("://") {
        server.to_string()
    } else if server.contains(':') {
        format!("http://{server}")
    } else {
        format!("http://{server}:{DEFAULT_PORT}")
    };
    let url = Url::parse(&candidate).map_err(|_| format!("'{server}' is not a valid server"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!(
            "unsupported scheme '{scheme}' (expected http or https)"
        )),
    }
}

impl Connection {
    /// A passwordless connection to the local CouchDB.
    pub fn local() -> Result<Self, String> {
        Self::parse("driver=couchdb;server=localhost")
    }

    pub fn parse(input: &str) -> Result<Self, String> {
        let mut pairs = parse_pairs(input)?;
        let driver = pairs
            .remove("driver")
            .ok_or_else(|| "missing 'driver' key".to_string())?;
        if driver != COUCHDB_DRIVER {
            return Err(format!(
                "unsupported driver '{driver}' (expected '{COUCHDB_DRIVER}')"
            ));
        }
        let server = parse_server(pairs.remove("server").as_deref().unwrap_or(""))?;
        let uid = pairs.remove("uid").filter(|s| !s.is_empty());
        let pwd = pairs.remove("pwd").filter(|s| !s.is_empty());
        if let Some(unknown) = pairs.keys().next() {
            return Err(format!("unknown key '{unknown}'"));
        }
        Ok(Self {
            driver,
            server,
            uid,
            pwd,
        })
    }
}
