use log::*;
use std::sync::mpsc;

/// Upper bound of tasks run per drain, so a task that keeps re-dispatching
/// itself cannot starve the draw loop.
///
const MAX_TASKS_PER_DRAIN: usize = 256;

type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Capability to schedule work onto the UI thread. Cloneable and usable from
/// any thread; the work runs when the UI thread drains its `UiQueue`.
///
#[derive(Clone)]
pub struct UiExecutor {
    tx: mpsc::Sender<UiTask>,
}

/// UI-thread side of the executor channel.
///
pub struct UiQueue {
    rx: mpsc::Receiver<UiTask>,
}

impl UiExecutor {
    /// Return a connected executor and queue pair.
    ///
    pub fn channel() -> (UiExecutor, UiQueue) {
        let (tx, rx) = mpsc::channel();
        (UiExecutor { tx }, UiQueue { rx })
    }

    /// Schedule a task. Returns false when the UI queue no longer exists.
    ///
    pub fn dispatch<F>(&self, task: F) -> bool
    where
        F: FnOnce() + Send + 'static,
    {
        match self.tx.send(Box::new(task)) {
            Ok(_) => true,
            Err(_) => {
                debug!("UI queue closed, dropping dispatched task");
                false
            }
        }
    }
}

impl UiQueue {
    /// Run pending tasks in dispatch order on the calling thread. Returns the
    /// number of tasks run.
    ///
    pub fn drain(&self) -> usize {
        let mut ran = 0;
        while ran < MAX_TASKS_PER_DRAIN {
            match self.rx.try_recv() {
                Ok(task) => {
                    task();
                    ran += 1;
                }
                Err(_) => break,
            }
        }
        if ran == MAX_TASKS_PER_DRAIN {
            warn!("UI queue drain limit reached, deferring remaining tasks");
        }
        ran
    }
}
