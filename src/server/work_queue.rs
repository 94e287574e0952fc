//! Serialized access to state that must stay on one thread.

use std::panic::{self, AssertUnwindSafe};
use std::thread;
use log::{debug, error};
use tokio::sync::{mpsc, oneshot};

use crate::server::error::Error;

type Job<S> = Box<dyn FnOnce(&mut S) + Send>;

/// A dedicated worker thread that owns `S` and runs posted closures against it
/// one at a time, in posting order.
///
/// Player hosts expect their API to be called from a single thread; handlers
/// reach the player through a `WorkQueue` instead of sharing it directly.
/// The worker stops once every handle has been dropped.
pub struct WorkQueue<S> {
    sender: mpsc::Sender<Job<S>>,
}

impl<S> Clone for WorkQueue<S> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

impl<S: Send + 'static> WorkQueue<S> {
    /// Start a worker thread named `name` that owns `state`.
    ///
    /// # Arguments
    ///
    /// * `name` - Thread name, also used in log messages
    /// * `state` - The value every posted job receives
    /// * `capacity` - How many jobs may wait before `post` starts waiting too
    pub fn spawn(name: &str, state: S, capacity: usize) -> Result<Self, Error> {
        let (sender, mut receiver) = mpsc::channel::<Job<S>>(capacity.max(1));
        let thread_name = name.to_string();

        thread::Builder::new()
            .name(thread_name.clone())
            .spawn(move || {
                let mut state = state;
                while let Some(job) = receiver.blocking_recv() {
                    // A panicking job fails its own caller only
                    if panic::catch_unwind(AssertUnwindSafe(|| job(&mut state))).is_err() {
                        error!("Job on work queue {thread_name} panicked");
                    }
                }
                debug!("Work queue {thread_name} stopped");
            })?;

        debug!("Work queue {name} started");
        Ok(Self { sender })
    }

    /// Run `job` on the worker thread and wait for its result.
    ///
    /// Fails with [`Error::WorkQueueClosed`] if the worker is gone or `job`
    /// panics. The worker keeps serving later jobs after a panic.
    pub async fn post<T, F>(&self, job: F) -> Result<T, Error>
    where
        F: FnOnce(&mut S) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (result_tx, result_rx) = oneshot::channel();
        let job: Job<S> = Box::new(move |state| {
            let _ = result_tx.send(job(state));
        });

        if self.sender.send(job).await.is_err() {
            error!("Posting to a stopped work queue");
            return Err(Error::WorkQueueClosed);
        }

        result_rx.await.map_err(|_| Error::WorkQueueClosed)
    }
}
