use crate::Result;
use log::debug;
use std::fmt;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Monotonic token identifying one issued fetch. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) struct Completion<T> {
    pub(crate) ticket: FetchTicket,
    pub(crate) key: String,
    pub(crate) outcome: Result<T>,
}

struct InFlight {
    ticket: FetchTicket,
    key: String,
    handle: JoinHandle<()>,
}

/// Runs at most one fetch that matters at a time.
///
/// Issuing aborts the previous task and bumps the ticket. A task that finished before it
/// could be aborted may still have queued a completion; `accept` drops it because its ticket
/// is no longer the one in flight.
pub(crate) struct LatestFetch<T> {
    label: &'static str,
    issued: u64,
    in_flight: Option<InFlight>,
    tx: mpsc::UnboundedSender<Completion<T>>,
    rx: mpsc::UnboundedReceiver<Completion<T>>,
}

impl<T: Send + 'static> LatestFetch<T> {
    pub(crate) fn new(label: &'static str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            label,
            issued: 0,
            in_flight: None,
            tx,
            rx,
        }
    }

    pub(crate) fn issue<F>(&mut self, key: String, fetch: F) -> FetchTicket
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        self.abort_in_flight("superseded");

        self.issued += 1;
        let ticket = FetchTicket(self.issued);
        let tx = self.tx.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let outcome = fetch.await;
            // The receiver lives as long as the owner; a send error only means it is gone.
            let _ = tx.send(Completion {
                ticket,
                key: task_key,
                outcome,
            });
        });

        debug!("{} fetch {ticket} issued for {key:?}", self.label);
        self.in_flight = Some(InFlight {
            ticket,
            key,
            handle,
        });
        ticket
    }

    /// Forget the in-flight fetch; its result will never be applied.
    pub(crate) fn cancel(&mut self) -> bool {
        self.abort_in_flight("cancelled")
    }

    fn abort_in_flight(&mut self, why: &str) -> bool {
        let Some(prev) = self.in_flight.take() else {
            return false;
        };
        prev.handle.abort();
        debug!(
            "{} fetch {} for {:?} {why}",
            self.label, prev.ticket, prev.key
        );
        true
    }

    /// Keep `completion` only if it belongs to the fetch currently in flight.
    pub(crate) fn accept(&mut self, completion: Completion<T>) -> Option<Completion<T>> {
        match &self.in_flight {
            Some(current) if current.ticket == completion.ticket => {
                self.in_flight = None;
                Some(completion)
            }
            _ => {
                debug!(
                    "{} fetch {} for {:?} resolved after being superseded; dropped",
                    self.label, completion.ticket, completion.key
                );
                None
            }
        }
    }

    /// Wait for the in-flight fetch to resolve. Returns `None` right away when nothing is in
    /// flight. Cancel-safe: dropping the future loses no accepted completion.
    pub(crate) async fn next(&mut self) -> Option<Completion<T>> {
        while self.in_flight.is_some() {
            let completion = self.rx.recv().await?;
            if let Some(accepted) = self.accept(completion) {
                return Some(accepted);
            }
        }
        None
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }

    pub(crate) fn pending_ticket(&self) -> Option<FetchTicket> {
        self.in_flight.as_ref().map(|f| f.ticket)
    }

    pub(crate) fn last_issued(&self) -> Option<FetchTicket> {
        (self.issued > 0).then_some(FetchTicket(self.issued))
    }

    /// Completions queued but not yet looked at, stale ones included
    pub(crate) fn queued(&self) -> usize {
        self.rx.len()
    }
}

impl<T> Drop for LatestFetch<T> {
    fn drop(&mut self) {
        if let Some(prev) = self.in_flight.take() {
            prev.handle.abort();
        }
    }
}
