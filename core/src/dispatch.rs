//! # Dispatch & Aggregation
//!
//! Launches one lookup task per target and funnels every result through a single
//! channel.
//!
//! * Every target produces exactly one record, failed lookups included.
//! * A supervising task joins all producers, then drops the last sender. That
//!   drop is the only way the channel closes.
//! * The channel holds a single record: a producer parks until the consumer has
//!   taken the previous one.
//! * Fan-out is unbounded unless a concurrency limit is configured.
//!
//! Records arrive in completion order. [`Delivery::InputOrder`] buffers them and
//! releases them in target order instead.

use std::collections::BTreeMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Context;
use futures::FutureExt;
use ipintel_common::config::Config;
use ipintel_common::network::target::Target;
use ipintel_common::record::LookupRecord;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error};

use crate::lookup::IntelSource;

const RESULT_CHANNEL_CAPACITY: usize = 1;

type ProgressCallback = Box<dyn Fn(usize) + Send + Sync>;

/// Order in which the consumer sees records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delivery {
    /// As lookups finish. Not reproducible across runs.
    #[default]
    Completion,
    /// In the order the targets were given.
    InputOrder,
}

pub struct Dispatcher {
    source: Arc<dyn IntelSource>,
    concurrency: Option<usize>,
    delivery: Delivery,
    on_record: Option<ProgressCallback>,
}

impl Dispatcher {
    pub fn new(source: Arc<dyn IntelSource>) -> Self {
        Self {
            source,
            concurrency: None,
            delivery: Delivery::Completion,
            on_record: None,
        }
    }

    pub fn from_config(source: Arc<dyn IntelSource>, cfg: &Config) -> Self {
        let delivery = if cfg.ordered {
            Delivery::InputOrder
        } else {
            Delivery::Completion
        };

        Self::new(source)
            .concurrency_limit(cfg.concurrency)
            .delivery(delivery)
    }

    /// Caps the number of lookups in flight. `None` or `0` leaves fan-out unbounded.
    ///
    /// Limits above [`Semaphore::MAX_PERMITS`] are clamped to it.
    pub fn concurrency_limit(mut self, limit: Option<usize>) -> Self {
        self.concurrency = limit
            .filter(|n| *n > 0)
            .map(|n| n.min(Semaphore::MAX_PERMITS));
        self
    }

    pub fn delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = delivery;
        self
    }

    /// Called on the consumer side with the running count of received records.
    pub fn on_record(mut self, callback: impl Fn(usize) + Send + Sync + 'static) -> Self {
        self.on_record = Some(Box::new(callback));
        self
    }

    /// Spawns the lookups and returns the consuming end.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(self, targets: Vec<Target>) -> Aggregation {
        let expected = targets.len();
        let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        let limiter = self.concurrency.map(|n| Arc::new(Semaphore::new(n)));

        debug!(
            "dispatching {expected} lookups (limit: {})",
            self.concurrency
                .map_or_else(|| "none".to_string(), |n| n.to_string())
        );

        let supervisor = tokio::spawn(supervise(self.source, targets, limiter, tx));

        Aggregation {
            rx,
            expected,
            received: 0,
            delivery: self.delivery,
            pending: BTreeMap::new(),
            next_index: 0,
            on_record: self.on_record,
            supervisor,
        }
    }
}

async fn supervise(
    source: Arc<dyn IntelSource>,
    targets: Vec<Target>,
    limiter: Option<Arc<Semaphore>>,
    tx: mpsc::Sender<(usize, LookupRecord)>,
) {
    let mut producers = JoinSet::new();

    for (idx, target) in targets.into_iter().enumerate() {
        let source = Arc::clone(&source);
        let limiter = limiter.clone();
        let tx = tx.clone();

        producers.spawn(async move {
            let record = produce(source.as_ref(), &target, limiter).await;
            if tx.send((idx, record)).await.is_err() {
                debug!("result for {target} dropped, consumer is gone");
            }
        });
    }

    while let Some(joined) = producers.join_next().await {
        if let Err(e) = joined {
            error!("lookup task failed: {e}");
        }
    }

    drop(tx);
}

/// Runs one lookup. A panicking source still yields a record.
async fn produce(
    source: &dyn IntelSource,
    target: &Target,
    limiter: Option<Arc<Semaphore>>,
) -> LookupRecord {
    // Released before the send so parked producers don't hold slots.
    let _permit = match limiter {
        Some(semaphore) => semaphore.acquire_owned().await.ok(),
        None => None,
    };

    match AssertUnwindSafe(source.lookup(target)).catch_unwind().await {
        Ok(record) => record,
        Err(_) => {
            error!("lookup for {target} panicked");
            LookupRecord::empty()
        }
    }
}

/// The consuming end of a dispatch. Yields exactly one record per target.
pub struct Aggregation {
    rx: mpsc::Receiver<(usize, LookupRecord)>,
    expected: usize,
    received: usize,
    delivery: Delivery,
    pending: BTreeMap<usize, LookupRecord>,
    next_index: usize,
    on_record: Option<ProgressCallback>,
    supervisor: JoinHandle<()>,
}

impl Aggregation {
    pub fn expected(&self) -> usize {
        self.expected
    }

    pub fn received(&self) -> usize {
        self.received
    }

    /// The next record, or `None` once all `expected()` records were handed out.
    pub async fn next(&mut self) -> Option<LookupRecord> {
        if self.received == self.expected {
            return None;
        }

        let record = match self.delivery {
            Delivery::Completion => self.rx.recv().await.map(|(_, record)| record)?,
            Delivery::InputOrder => self.next_in_order().await?,
        };

        self.received += 1;
        if let Some(callback) = &self.on_record {
            callback(self.received);
        }

        Some(record)
    }

    async fn next_in_order(&mut self) -> Option<LookupRecord> {
        loop {
            if let Some(record) = self.pending.remove(&self.next_index) {
                self.next_index += 1;
                return Some(record);
            }
            let (idx, record) = self.rx.recv().await?;
            self.pending.insert(idx, record);
        }
    }

    /// Drains every remaining record, then waits for the channel to close.
    pub async fn collect(mut self) -> anyhow::Result<Vec<LookupRecord>> {
        let mut records = Vec::with_capacity(self.expected - self.received);
        while let Some(record) = self.next().await {
            records.push(record);
        }
        self.finish().await?;
        Ok(records)
    }

    /// Waits for the supervisor to join every producer and close the channel.
    pub async fn finish(self) -> anyhow::Result<()> {
        let Self {
            rx,
            expected,
            received,
            supervisor,
            ..
        } = self;
        drop(rx);

        supervisor.await.context("joining lookup supervisor")?;

        if received != expected {
            anyhow::bail!("received {received} of {expected} lookup results");
        }
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
