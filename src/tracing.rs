//! Diagnostic tracing for the refresh loop
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=docoutline::update=debug` - module-level filtering
//! - `RUST_LOG=docoutline::outline=trace` - builder and expansion detail
//!
//! # Log Files
//!
//! Logs are written to `~/.config/docoutline/logs/docoutline.log` with daily
//! rotation. File logging uses debug level regardless of RUST_LOG.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::model::OutlineModel;
use crate::outline::NodeKey;

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr so it never mixes with outline output on
/// stdout, and respects RUST_LOG (default `warn`).
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of the current generation for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineSnapshot {
    pub revision: Option<u64>,
    pub node_count: usize,
    pub expanded: Vec<NodeKey>,
    pub highlighted: Option<NodeKey>,
}

impl OutlineSnapshot {
    pub fn from_model(model: &OutlineModel) -> Self {
        let Some(generation) = model.current.as_ref() else {
            return Self {
                revision: None,
                node_count: 0,
                expanded: Vec::new(),
                highlighted: None,
            };
        };

        let index = &generation.index;
        Self {
            revision: Some(generation.revision),
            node_count: index.len(),
            expanded: generation
                .expansion
                .expanded()
                .into_iter()
                .map(|id| index.node(id).key())
                .collect(),
            highlighted: model.highlighted.map(|id| index.node(id).key()),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &OutlineSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.revision != other.revision {
            changes.push(format!(
                "generation: {:?} → {:?} ({} → {} nodes)",
                self.revision, other.revision, self.node_count, other.node_count
            ));
        }

        let opened = other
            .expanded
            .iter()
            .filter(|k| !self.expanded.contains(k))
            .count();
        let closed = self
            .expanded
            .iter()
            .filter(|k| !other.expanded.contains(k))
            .count();
        if opened > 0 || closed > 0 {
            changes.push(format!("expanded +{} -{}", opened, closed));
        }

        if self.highlighted != other.highlighted {
            let describe = |key: &Option<NodeKey>| match key {
                Some(k) => format!("{}:{}", k.line + 1, k.label),
                None => "none".to_string(),
            };
            changes.push(format!(
                "highlight: {} → {}",
                describe(&self.highlighted),
                describe(&other.highlighted)
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(line: usize, label: &str) -> NodeKey {
        NodeKey {
            line,
            label: label.to_string(),
        }
    }

    #[test]
    fn test_identical_snapshots_have_no_diff() {
        let snap = OutlineSnapshot {
            revision: Some(1),
            node_count: 2,
            expanded: vec![key(0, "Util")],
            highlighted: None,
        };
        assert_eq!(snap.diff(&snap.clone()), None);
    }

    #[test]
    fn test_diff_reports_expansion_and_highlight() {
        let before = OutlineSnapshot {
            revision: Some(1),
            node_count: 3,
            expanded: vec![key(0, "Util"), key(8, "Other")],
            highlighted: None,
        };
        let after = OutlineSnapshot {
            revision: Some(1),
            node_count: 3,
            expanded: vec![key(0, "Util"), key(2, "Inner")],
            highlighted: Some(key(2, "Inner")),
        };
        let diff = before.diff(&after).unwrap();
        assert!(diff.contains("expanded +1 -1"), "{}", diff);
        assert!(diff.contains("highlight: none → 3:Inner"), "{}", diff);
    }
}
