use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};

use docoutline::commands::Cmd;
use docoutline::fs_watcher::FileWatcher;
use docoutline::messages::{Msg, OutlineMsg};
use docoutline::model::OutlineModel;
use docoutline::outline::ExpandInstruction;
use docoutline::symbols::{SymbolRequest, SymbolSource};
use docoutline::update::update;

/// How long a one-shot command waits for the symbol source
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Poll interval of the watch loop
const WATCH_TICK: Duration = Duration::from_millis(100);

pub struct App {
    model: OutlineModel,
    source: Arc<dyn SymbolSource>,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Expansion changes not yet taken by the caller
    pending_expansion: Vec<ExpandInstruction>,
    /// Most recent symbol source failure and the revision it answered
    last_error: Option<(u64, String)>,
}

impl App {
    pub fn new(model: OutlineModel, source: Arc<dyn SymbolSource>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            source,
            msg_tx,
            msg_rx,
            pending_expansion: Vec::new(),
            last_error: None,
        }
    }

    pub fn model(&self) -> &OutlineModel {
        &self.model
    }

    /// Dispatch a message through the update loop
    ///
    /// Returns whether the outline should be shown again.
    pub fn dispatch(&mut self, msg: Msg) -> bool {
        if let Msg::Outline(OutlineMsg::SymbolsLoaded {
            revision,
            result: Err(e),
        }) = &msg
        {
            self.last_error = Some((*revision, e.clone()));
        }

        match update(&mut self.model, msg) {
            Some(cmd) => {
                let needs_redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                needs_redraw
            }
            None => false,
        }
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::OutlineChanged => {}
            Cmd::FetchSymbols {
                revision,
                path,
                source,
                language,
            } => {
                let tx = self.msg_tx.clone();
                let symbol_source = Arc::clone(&self.source);
                std::thread::spawn(move || {
                    let request = SymbolRequest::new(path, language, source);
                    let result = symbol_source
                        .symbols(&request)
                        .map_err(|e| format!("{:#}", e));
                    let _ = tx.send(Msg::Outline(OutlineMsg::SymbolsLoaded { revision, result }));
                });
            }
            Cmd::ApplyExpansion(instructions) => {
                self.pending_expansion.extend(instructions);
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    /// Handle every message workers have sent so far
    pub fn process_async_messages(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            if self.dispatch(msg) {
                needs_redraw = true;
            }
        }
        needs_redraw
    }

    /// Whether the current generation answers the latest refresh request
    fn is_current(&self) -> bool {
        self.model
            .current
            .as_ref()
            .is_some_and(|g| g.revision == self.model.requested_revision)
    }

    /// Request a refresh and block until it has been applied
    pub fn load(&mut self, timeout: Duration) -> Result<()> {
        self.dispatch(Msg::refresh());
        self.wait_for_outline(timeout)
    }

    /// Block until the latest refresh request has been answered
    ///
    /// Fails if the symbol source reported an error for that request.
    pub fn wait_for_outline(&mut self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_current() {
                return Ok(());
            }
            if let Some((revision, e)) = &self.last_error {
                if *revision == self.model.requested_revision {
                    bail!("symbol source '{}' failed: {}", self.source.name(), e);
                }
            }

            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.msg_rx.recv_timeout(remaining) {
                Ok(msg) => {
                    self.dispatch(msg);
                }
                Err(RecvTimeoutError::Timeout) => bail!(
                    "symbol source '{}' did not answer within {:?}",
                    self.source.name(),
                    timeout
                ),
                Err(RecvTimeoutError::Disconnected) => bail!("symbol worker channel closed"),
            }
        }
    }

    /// Take the expansion changes produced since the last call
    pub fn take_expansion(&mut self) -> Vec<ExpandInstruction> {
        std::mem::take(&mut self.pending_expansion)
    }

    /// Refresh on every change the watcher reports until it shuts down
    ///
    /// The watcher's first target is the document; any other target (a
    /// symbol file) only triggers a refresh. `redraw` runs after every
    /// applied generation.
    pub fn watch(
        &mut self,
        watcher: &FileWatcher,
        mut redraw: impl FnMut(&OutlineModel),
    ) -> Result<()> {
        let document_path: Option<PathBuf> = watcher.targets().first().cloned();

        loop {
            if self.process_async_messages() {
                redraw(&self.model);
            }

            let Some(changed) = watcher.wait_for_change(WATCH_TICK) else {
                tracing::info!("File watcher closed, leaving watch loop");
                return Ok(());
            };

            for path in changed {
                if Some(&path) == document_path.as_ref() {
                    match std::fs::read_to_string(&path) {
                        Ok(text) => {
                            self.dispatch(Msg::document_changed(text));
                        }
                        // Deleted or mid-rename; the next event brings it back
                        Err(e) => tracing::warn!("Could not reload {}: {}", path.display(), e),
                    }
                } else {
                    tracing::debug!("{} changed, refreshing symbols", path.display());
                    self.dispatch(Msg::refresh());
                }
            }
        }
    }
}
