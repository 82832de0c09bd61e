// Agent identity: who is reporting

use serde::{Deserialize, Serialize};
use sysinfo::System;

/// Host, agent version and process id; populated once when the session is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentIdentity {
    pub host: String,
    pub version: String,
    pub pid: u32,
}

impl AgentIdentity {
    pub fn new(host: impl Into<String>, version: impl Into<String>, pid: u32) -> Self {
        Self {
            host: host.into(),
            version: version.into(),
            pid,
        }
    }

    /// Identity of the current process, reporting `version` as the agent version.
    pub fn discover(version: impl Into<String>) -> Self {
        let host = System::host_name()
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| "localhost".to_string());
        Self::new(host, version, std::process::id())
    }
}
