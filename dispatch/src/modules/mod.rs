use std::error::Error;
use std::thread;

use crossbeam_channel::unbounded;
use log::{info, warn};

use shared_resources::car_status::CarKind;
use shared_resources::config::Config;
use shared_resources::error::DispatchError;
use shared_resources::request::{Request, Submission};

use crate::utilities::debug;

pub mod car;
pub mod controller;
pub mod doors;
pub mod factory;
pub mod passenger;
pub mod service;
pub mod timer;
pub mod workers;

use workers::DispatchWorkers;

pub fn run() -> Result<(), Box<dyn Error>> {
    // READ CONFIGURATION
    let config = Config::get()?;

    // INITIALIZE THREAD FOR STATUS OUTPUT
    let (events_tx, events_rx) = unbounded();
    let output = config.output;
    let debug_handle = thread::Builder::new()
        .name("debug".to_string())
        .spawn(move || debug::main(output, events_rx))?;

    // INITIALIZE ONE WORKER PER CAR
    let workers = DispatchWorkers::spawn(&config.cars, config.timing, Some(events_tx))?;

    replay_demo_day(&workers)?;

    // workers hold the last event senders -> debug thread stops after this
    drop(workers);
    match debug_handle.join() {
        Ok(result) => result?,
        Err(_) => warn!("status output thread panicked"),
    }
    Ok(())
}

/// Demo traffic: two rounds of passenger traffic, one round of
/// service trips, then an emergency.
fn replay_demo_day(workers: &DispatchWorkers) -> Result<(), DispatchError> {
    if workers.has(CarKind::Passenger) {
        workers.submit(Submission::Up(Request::external(1, 5)?))?;
        workers.submit(Submission::Down(Request::external(4, 2)?))?;
        workers.submit(Submission::Up(Request::external(3, 6)?))?;
        let report = workers.run_batch(CarKind::Passenger)?;
        info!("passenger batch: {:?}", report);

        workers.submit(Submission::Up(Request::external(1, 9)?))?;
        workers.submit(Submission::Down(Request::internal(5)))?;
        workers.submit(Submission::Up(Request::external(4, 12)?))?;
        workers.submit(Submission::Down(Request::external(10, 2)?))?;
        let report = workers.run_batch(CarKind::Passenger)?;
        info!("passenger batch: {:?}", report);
    }

    if workers.has(CarKind::Service) {
        info!("Now processing service requests");
        workers.submit(Submission::Service(Request::internal(13)))?;
        workers.submit(Submission::Service(Request::external(13, 2)?))?;
        workers.submit(Submission::Service(Request::external(13, 15)?))?;
        let report = workers.run_batch(CarKind::Service)?;
        info!("service batch: {:?}", report);
    }

    for status in workers.trigger_emergency()? {
        info!("{} car after emergency: {:?}", status.kind, status);
    }
    Ok(())
}
