//! Worker pool evaluating hypotheses in parallel.
//!
//! One coordinator (the calling thread) feeds a bounded job queue; a fixed
//! number of scoped worker threads drain it, each fitting its own model
//! instance and keeping a local best. Coordination uses only the bounded job
//! and result queues plus one cancellation [`Signal`] shared by everybody.

use std::thread;
use std::time::Instant;

use crossbeam_channel::{at, bounded, never, select, Receiver, Sender, TryRecvError};
use log::{debug, trace};

use crate::choices::HypothesisStream;
use crate::core::{Model, WorkerModel};
use crate::scoring::{consensus, WorkerResult};
use crate::termination::Termination;
use crate::types::{Dataset, Hypothesis, Number};

/// Cooperative cancellation shared by the submission loop and the workers.
///
/// Fires when the `stop` channel disconnects (the coordinator dropped its
/// end) or when the optional deadline passes.
#[derive(Debug, Clone)]
pub(crate) struct Signal {
    stop: Receiver<()>,
    deadline: Option<Instant>,
}

impl Signal {
    pub(crate) fn new(stop: Receiver<()>, deadline: Option<Instant>) -> Self {
        Self { stop, deadline }
    }

    /// Non-blocking check.
    pub(crate) fn is_cancelled(&self) -> bool {
        matches!(self.stop.try_recv(), Err(TryRecvError::Disconnected)) || self.expired()
    }

    pub(crate) fn expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Per-thread timer channel that becomes ready at the deadline.
    fn timer(&self) -> Receiver<Instant> {
        self.deadline.map(at).unwrap_or_else(never)
    }
}

/// What the pool hands back to the aggregator.
#[derive(Debug, Default)]
pub(crate) struct PoolOutcome {
    /// One entry per worker, in the order they finished.
    pub results: Vec<WorkerResult>,
    pub submitted: usize,
    pub timed_out: bool,
}

/// Why the submission loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Submission {
    CapReached,
    Exhausted,
    Cancelled,
    WorkersGone,
}

/// Evaluate `hypotheses` with one worker per entry of `models` until the
/// stream ends, the iteration cap is reached, or the deadline passes.
pub(crate) fn run<R, M>(
    data: &Dataset<R>,
    models: Vec<WorkerModel<'_, M>>,
    hypotheses: HypothesisStream,
    termination: &Termination,
    start: Instant,
) -> PoolOutcome
where
    R: Number,
    M: Model<R> + Send,
{
    let workers = models.len();
    let (job_tx, job_rx) = bounded::<Hypothesis>(workers);
    let (result_tx, result_rx) = bounded::<WorkerResult>(workers);
    // Nothing is ever sent on `stop`; dropping the sender is the cancellation.
    let (stop_tx, stop_rx) = bounded::<()>(0);
    let signal = Signal::new(stop_rx, termination.deadline(start));

    let (submitted, reason) = thread::scope(|scope| {
        let handles: Vec<_> = models
            .into_iter()
            .enumerate()
            .map(|(id, model)| {
                let jobs = job_rx.clone();
                let results = result_tx.clone();
                let signal = signal.clone();
                scope.spawn(move || work(id, data, model, jobs, results, signal))
            })
            .collect();
        drop(job_rx);
        drop(result_tx);

        let (submitted, reason) = submit(hypotheses, job_tx, &signal, termination);
        debug!("submission ended after {submitted} hypotheses: {reason:?}");
        if reason == Submission::Cancelled {
            // Queued work is abandoned; make sure nobody picks it up.
            drop(stop_tx);
        }

        for handle in handles {
            if let Err(panic) = handle.join() {
                std::panic::resume_unwind(panic);
            }
        }
        (submitted, reason)
    });

    PoolOutcome {
        results: result_rx.try_iter().collect(),
        submitted,
        timed_out: reason == Submission::Cancelled || signal.expired(),
    }
}

/// Push hypotheses onto the job queue, honoring the iteration cap and the
/// shared deadline. Closes the queue (by dropping `jobs`) when done.
fn submit(
    hypotheses: HypothesisStream,
    jobs: Sender<Hypothesis>,
    signal: &Signal,
    termination: &Termination,
) -> (usize, Submission) {
    let timer = signal.timer();
    let mut submitted = 0usize;

    for hypothesis in hypotheses {
        if signal.is_cancelled() {
            return (submitted, Submission::Cancelled);
        }
        select! {
            send(jobs, hypothesis) -> res => {
                if res.is_err() {
                    return (submitted, Submission::WorkersGone);
                }
            }
            recv(timer) -> _ => return (submitted, Submission::Cancelled),
        }
        submitted += 1;

        if termination.reached(submitted) {
            return (submitted, Submission::CapReached);
        }
    }
    (submitted, Submission::Exhausted)
}

fn work<R, M>(
    id: usize,
    data: &Dataset<R>,
    mut model: WorkerModel<'_, M>,
    jobs: Receiver<Hypothesis>,
    results: Sender<WorkerResult>,
    signal: Signal,
) where
    R: Number,
    M: Model<R>,
{
    let timer = signal.timer();
    let mut best = WorkerResult::default();
    let mut sample: Vec<&[R]> = Vec::with_capacity(Model::<R>::minimal_sample_size(&model));

    loop {
        // Checked on its own first so a backlog of queued jobs cannot starve
        // cancellation.
        if signal.is_cancelled() {
            break;
        }
        let hypothesis = select! {
            recv(signal.stop) -> _ => break,
            recv(timer) -> _ => break,
            recv(jobs) -> job => match job {
                Ok(hypothesis) => hypothesis,
                Err(_) => break,
            },
        };

        data.select_into(&hypothesis, &mut sample);
        model.fit(&sample);
        let score = consensus(&model, data);
        best.offer(hypothesis, score);
    }

    trace!(
        "worker {id} exiting: evaluated {}, best score {}",
        best.evaluated,
        best.score
    );
    // Capacity equals the worker count, so this never blocks.
    let _ = results.send(best);
}
