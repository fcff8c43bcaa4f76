//! UI-Affine Dispatcher
//!
//! A single dedicated thread that owns all view-tree mutations and
//! controller state transitions. Work is marshalled onto it with
//! [`UiHandler::post`] and [`UiHandler::post_delayed`]; everything it runs
//! is serialized, so consumers never need locks for ordering, only for
//! Rust aliasing.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use tracing::{debug, warn};

use crate::error::{Result, VelaError};

type Job = Box<dyn FnOnce() + Send + 'static>;

enum Message {
    Post(Job),
    PostDelayed(Duration, Job),
    Shutdown,
}

struct TimedJob {
    due: Instant,
    seq: u64,
    job: Job,
}

impl PartialEq for TimedJob {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for TimedJob {}

impl PartialOrd for TimedJob {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimedJob {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Cloneable handle for posting work onto the UI thread
#[derive(Clone)]
pub struct UiHandler {
    tx: Sender<Message>,
}

impl UiHandler {
    /// Run a task on the UI thread as soon as the queue reaches it
    pub fn post<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self.tx.send(Message::Post(Box::new(job))).is_err() {
            warn!("UI dispatcher is gone, dropping posted task");
        }
    }

    /// Run a task on the UI thread after at least `delay` has elapsed
    pub fn post_delayed<F>(&self, delay: Duration, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if self
            .tx
            .send(Message::PostDelayed(delay, Box::new(job)))
            .is_err()
        {
            warn!("UI dispatcher is gone, dropping delayed task");
        }
    }
}

/// Owner of the UI dispatcher thread
///
/// Dropping the `UiThread` shuts the dispatcher down; queued tasks that
/// have not run yet are discarded.
pub struct UiThread {
    handler: UiHandler,
    join: Option<JoinHandle<()>>,
}

impl UiThread {
    /// Spawn the dispatcher thread
    pub fn spawn() -> Result<Self> {
        let (tx, rx) = unbounded();
        let join = thread::Builder::new()
            .name("vela-ui".to_string())
            .spawn(move || run_loop(rx))
            .map_err(VelaError::Io)?;

        Ok(Self {
            handler: UiHandler { tx },
            join: Some(join),
        })
    }

    /// Get a handle for posting work
    pub fn handler(&self) -> UiHandler {
        self.handler.clone()
    }
}

impl Drop for UiThread {
    fn drop(&mut self) {
        let _ = self.handler.tx.send(Message::Shutdown);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

fn run_loop(rx: Receiver<Message>) {
    let mut timers: BinaryHeap<Reverse<TimedJob>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    debug!("UI dispatcher started");
    loop {
        // run every timer that has come due before blocking again
        loop {
            match timers.peek() {
                Some(Reverse(next)) if next.due <= Instant::now() => {}
                _ => break,
            }
            if let Some(Reverse(timed)) = timers.pop() {
                (timed.job)();
            }
        }

        let message = match timers.peek() {
            Some(Reverse(next)) => match rx.recv_deadline(next.due) {
                Ok(message) => message,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            },
            None => match rx.recv() {
                Ok(message) => message,
                Err(_) => break,
            },
        };

        match message {
            Message::Post(job) => job(),
            Message::PostDelayed(delay, job) => {
                seq += 1;
                timers.push(Reverse(TimedJob {
                    due: Instant::now() + delay,
                    seq,
                    job,
                }));
            }
            Message::Shutdown => break,
        }
    }
    debug!("UI dispatcher stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_posted_tasks_run_in_order() {
        let ui = UiThread::spawn().unwrap();
        let handler = ui.handler();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done_rx) = unbounded();

        for i in 0..3 {
            let order = Arc::clone(&order);
            handler.post(move || order.lock().unwrap().push(i));
        }
        handler.post(move || {
            let _ = done_tx.send(());
        });

        done_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("dispatcher did not drain the queue");
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_delayed_task_runs_after_immediate_tasks() {
        let ui = UiThread::spawn().unwrap();
        let handler = ui.handler();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done_rx) = unbounded();

        {
            let order = Arc::clone(&order);
            handler.post_delayed(Duration::from_millis(30), move || {
                order.lock().unwrap().push("delayed");
                let _ = done_tx.send(());
            });
        }
        {
            let order = Arc::clone(&order);
            handler.post(move || order.lock().unwrap().push("immediate"));
        }

        done_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("delayed task never fired");
        assert_eq!(*order.lock().unwrap(), vec!["immediate", "delayed"]);
    }

    #[test]
    fn test_delayed_tasks_fire_in_deadline_order() {
        let ui = UiThread::spawn().unwrap();
        let handler = ui.handler();
        let order = Arc::new(Mutex::new(Vec::new()));
        let (done_tx, done_rx) = unbounded();

        {
            let order = Arc::clone(&order);
            handler.post_delayed(Duration::from_millis(60), move || {
                order.lock().unwrap().push("late");
                let _ = done_tx.send(());
            });
        }
        {
            let order = Arc::clone(&order);
            handler.post_delayed(Duration::from_millis(10), move || {
                order.lock().unwrap().push("early");
            });
        }

        done_rx
            .recv_timeout(Duration::from_secs(1))
            .expect("delayed tasks never fired");
        assert_eq!(*order.lock().unwrap(), vec!["early", "late"]);
    }

    #[test]
    fn test_post_after_shutdown_is_dropped() {
        let ui = UiThread::spawn().unwrap();
        let handler = ui.handler();
        drop(ui);

        // must not panic or block
        handler.post(|| {});
    }
}
