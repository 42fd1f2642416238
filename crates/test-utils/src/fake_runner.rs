use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;
use doctask::engine::TaskOutcome;
use doctask::errors::Result;
use doctask::exec::{CommandInvocation, CommandRunner};

/// A fake command runner that:
/// - records every invocation it is asked to run
/// - optionally reports each invocation on a channel as it starts
/// - optionally waits before "finishing"
/// - reports `Success` unless the command was registered with `fail_with`.
#[derive(Clone, Default)]
pub struct FakeRunner {
    executed: Arc<Mutex<Vec<CommandInvocation>>>,
    failures: Arc<Mutex<HashMap<String, i32>>>,
    started_tx: Option<mpsc::UnboundedSender<CommandInvocation>>,
    delay: Option<Duration>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report each invocation on `tx` when it starts.
    pub fn with_notify(mut self, tx: mpsc::UnboundedSender<CommandInvocation>) -> Self {
        self.started_tx = Some(tx);
        self
    }

    /// Make every command take `delay` before completing.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make `command` exit with `code`.
    pub fn fail_with(self, command: &str, code: i32) -> Self {
        self.failures.lock().unwrap().insert(command.to_string(), code);
        self
    }

    pub fn executed(&self) -> Vec<CommandInvocation> {
        self.executed.lock().unwrap().clone()
    }

    /// Just the command strings, in execution order.
    pub fn commands(&self) -> Vec<String> {
        self.executed().into_iter().map(|i| i.command).collect()
    }
}

impl CommandRunner for FakeRunner {
    fn run(
        &mut self,
        invocation: CommandInvocation,
    ) -> Pin<Box<dyn Future<Output = Result<TaskOutcome>> + Send + '_>> {
        let executed = Arc::clone(&self.executed);
        let failures = Arc::clone(&self.failures);
        let started_tx = self.started_tx.clone();
        let delay = self.delay;

        Box::pin(async move {
            executed.lock().unwrap().push(invocation.clone());
            let failure = failures.lock().unwrap().get(&invocation.command).copied();

            if let Some(tx) = started_tx {
                let _ = tx.send(invocation);
            }

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            Ok(match failure {
                Some(code) => TaskOutcome::Failed(code),
                None => TaskOutcome::Success,
            })
        })
    }
}
