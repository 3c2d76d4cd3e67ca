/// ----- WORKERS MODULE -----
/// Runs every car on its own thread. Each worker owns its car outright and
/// takes commands over a channel, so a car's queues and state are only ever
/// touched by one thread. Emergencies travel on a separate channel that the
/// worker's timer also listens to, which lets an emergency cut a running
/// batch short in the middle of a travel or dwell phase.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use log::{debug, info, warn};

use shared_resources::car_status::{CarEvent, CarKind, CarStatus};
use shared_resources::config::TimingConfig;
use shared_resources::error::DispatchError;
use shared_resources::request::Submission;

use super::car::{BatchReport, Elevator};
use super::factory::{Car, CarFactory};
use super::timer::Timer;

enum Command {
    Submit(Submission),
    RunBatch(Sender<BatchReport>),
    Status(Sender<CarStatus>),
    Shutdown,
}

struct Worker {
    kind: CarKind,
    command_tx: Sender<Command>,
    emergency_tx: Sender<()>,
    ack_rx: Receiver<CarStatus>,
    handle: Option<JoinHandle<()>>,
}

pub struct DispatchWorkers {
    workers: Vec<Worker>,
}

impl DispatchWorkers {
    /// Start one worker per car tag. Repeated tags start a single worker.
    pub fn spawn(
        car_tags: &[String],
        timing: TimingConfig,
        events_tx: Option<Sender<CarEvent>>,
    ) -> Result<Self, DispatchError> {
        let factory = CarFactory::new();
        let mut workers: Vec<Worker> = Vec::new();

        for tag in car_tags {
            let mut car = factory.create_from_tag(tag)?;
            let kind = car.kind();
            if workers.iter().any(|worker| worker.kind == kind) {
                warn!("{} car listed twice, skipping...", kind);
                continue;
            }
            if let Some(events_tx) = &events_tx {
                car.attach_events(events_tx.clone());
            }

            let (command_tx, command_rx) = unbounded();
            let (emergency_tx, emergency_rx) = unbounded();
            let (ack_tx, ack_rx) = unbounded();
            let handle = thread::Builder::new()
                .name(format!("{}_car", kind))
                .spawn(move || main(car, timing, command_rx, emergency_rx, ack_tx))
                .map_err(|e| DispatchError::WorkerSpawn(kind, e.to_string()))?;
            info!("{} car worker started", kind);

            workers.push(Worker {
                kind: kind,
                command_tx: command_tx,
                emergency_tx: emergency_tx,
                ack_rx: ack_rx,
                handle: Some(handle),
            });
        }
        Ok(DispatchWorkers { workers: workers })
    }

    pub fn kinds(&self) -> Vec<CarKind> {
        self.workers.iter().map(|worker| worker.kind).collect()
    }

    pub fn has(&self, kind: CarKind) -> bool {
        self.workers.iter().any(|worker| worker.kind == kind)
    }

    /// Queue a submission on the car it targets. Queued work is only picked
    /// up by the next batch started after this call.
    pub fn submit(&self, submission: Submission) -> Result<(), DispatchError> {
        let worker = self.worker(submission.target())?;
        worker.send(Command::Submit(submission))
    }

    /// Start a batch without waiting for it. The report arrives on the
    /// returned channel once the batch finishes or is interrupted.
    pub fn start_batch(&self, kind: CarKind) -> Result<Receiver<BatchReport>, DispatchError> {
        let worker = self.worker(kind)?;
        let (report_tx, report_rx) = bounded(1);
        worker.send(Command::RunBatch(report_tx))?;
        Ok(report_rx)
    }

    pub fn run_batch(&self, kind: CarKind) -> Result<BatchReport, DispatchError> {
        self.start_batch(kind)?
            .recv()
            .map_err(|_| DispatchError::WorkerGone(kind))
    }

    /// Snapshot of a car, taken between batches.
    pub fn status(&self, kind: CarKind) -> Result<CarStatus, DispatchError> {
        let worker = self.worker(kind)?;
        let (status_tx, status_rx) = bounded(1);
        worker.send(Command::Status(status_tx))?;
        status_rx.recv().map_err(|_| DispatchError::WorkerGone(kind))
    }

    /// Reset every car and wait until all of them have confirmed. Returns
    /// each car's status right after its reset.
    pub fn trigger_emergency(&self) -> Result<Vec<CarStatus>, DispatchError> {
        warn!("EMERGENCY: resetting all cars");
        for worker in &self.workers {
            worker
                .emergency_tx
                .send(())
                .map_err(|_| DispatchError::WorkerGone(worker.kind))?;
        }
        let mut statuses = Vec::with_capacity(self.workers.len());
        for worker in &self.workers {
            let status = worker
                .ack_rx
                .recv()
                .map_err(|_| DispatchError::WorkerGone(worker.kind))?;
            statuses.push(status);
        }
        Ok(statuses)
    }

    fn worker(&self, kind: CarKind) -> Result<&Worker, DispatchError> {
        self.workers
            .iter()
            .find(|worker| worker.kind == kind)
            .ok_or(DispatchError::NoSuchCar(kind))
    }
}

impl Worker {
    fn send(&self, command: Command) -> Result<(), DispatchError> {
        self.command_tx
            .send(command)
            .map_err(|_| DispatchError::WorkerGone(self.kind))
    }
}

impl Drop for DispatchWorkers {
    fn drop(&mut self) {
        for worker in &self.workers {
            // already gone -> nothing to stop
            let _ = worker.command_tx.send(Command::Shutdown);
        }
        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                if handle.join().is_err() {
                    warn!("{} car worker panicked", worker.kind);
                }
            }
        }
    }
}

fn main(
    mut car: Car,
    timing: TimingConfig,
    command_rx: Receiver<Command>,
    emergency_rx: Receiver<()>,
    ack_tx: Sender<CarStatus>,
) {
    let kind = car.kind();
    let mut timer = Timer::interruptible(timing, emergency_rx.clone());

    loop {
        let keep_running = select! {
            recv(command_rx) -> msg => match msg {
                Ok(Command::Submit(submission)) => {
                    if let Err(e) = car.submit(submission) {
                        warn!("{} car: dropping submission, {}", kind, e);
                    }
                    true
                },
                Ok(Command::RunBatch(report_tx)) => {
                    let report = car.process_all(&mut timer);
                    // an interrupted batch means the timer consumed the emergency signal
                    let keep_running = !report.interrupted || emergency(&mut car, &command_rx, &ack_tx);
                    if report_tx.send(report).is_err() {
                        debug!("{} car: batch report was not collected", kind);
                    }
                    keep_running
                },
                Ok(Command::Status(status_tx)) => {
                    if status_tx.send(car.status()).is_err() {
                        debug!("{} car: status was not collected", kind);
                    }
                    true
                },
                Ok(Command::Shutdown) | Err(_) => false,
            },
            recv(emergency_rx) -> msg => match msg {
                Ok(()) => emergency(&mut car, &command_rx, &ack_tx),
                Err(_) => false,
            },
        };
        if !keep_running {
            break;
        }
    }
    info!("{} car worker stopped", kind);
}

/// Reset the car and acknowledge. Commands that were already waiting when
/// the emergency arrived belong to the work being discarded: submissions
/// are dropped and batches are reported as interrupted.
fn emergency(car: &mut Car, command_rx: &Receiver<Command>, ack_tx: &Sender<CarStatus>) -> bool {
    let kind = car.kind();
    let mut keep_running = true;

    for command in command_rx.try_iter() {
        match command {
            Command::Submit(submission) => {
                debug!("{} car: discarding {:?} queued before the emergency", kind, submission);
            }
            Command::RunBatch(report_tx) => {
                let report = BatchReport {
                    interrupted: true,
                    ..BatchReport::default()
                };
                if report_tx.send(report).is_err() {
                    debug!("{} car: batch report was not collected", kind);
                }
            }
            Command::Status(status_tx) => {
                if status_tx.send(car.status()).is_err() {
                    debug!("{} car: status was not collected", kind);
                }
            }
            Command::Shutdown => keep_running = false,
        }
    }

    car.process_emergency();
    if ack_tx.send(car.status()).is_err() {
        debug!("{} car: nobody is waiting for the emergency acknowledgement", kind);
    }
    keep_running
}
