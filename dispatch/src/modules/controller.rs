/// ----- CONTROLLER MODULE -----
/// Single-threaded entry point. Owns exactly one passenger car and one
/// service car, routes requests to them and runs their batches on the
/// caller's thread. Callers are expected to keep enqueueing and processing
/// separate; nothing here runs concurrently.

use crossbeam_channel::Sender;
use log::{info, warn};

use shared_resources::car_status::{CarEvent, CarKind};
use shared_resources::error::DispatchError;
use shared_resources::request::{Request, Submission};

use super::car::{BatchReport, Elevator};
use super::factory::{Car, CarFactory};
use super::timer::{NoDelay, Pacer};

pub struct DispatchController {
    passenger: Car,
    service: Car,
    pacer: Box<dyn Pacer + Send>,
}

impl DispatchController {
    /// Controller whose phases complete instantly.
    pub fn new(factory: &CarFactory) -> Self {
        DispatchController::with_pacer(factory, Box::new(NoDelay))
    }

    pub fn with_pacer(factory: &CarFactory, pacer: Box<dyn Pacer + Send>) -> Self {
        DispatchController {
            passenger: factory.create(CarKind::Passenger),
            service: factory.create(CarKind::Service),
            pacer: pacer,
        }
    }

    /// Narrate both cars' phases on `events_tx`.
    pub fn subscribe(&mut self, events_tx: Sender<CarEvent>) {
        self.passenger.attach_events(events_tx.clone());
        self.service.attach_events(events_tx);
    }

    pub fn route_up(&mut self, request: Request) -> Result<(), DispatchError> {
        self.route(Submission::Up(request))
    }

    pub fn route_down(&mut self, request: Request) -> Result<(), DispatchError> {
        self.route(Submission::Down(request))
    }

    pub fn route_service(&mut self, request: Request) -> Result<(), DispatchError> {
        self.route(Submission::Service(request))
    }

    pub fn route(&mut self, submission: Submission) -> Result<(), DispatchError> {
        match submission.target() {
            CarKind::Passenger => self.passenger.submit(submission),
            CarKind::Service => self.service.submit(submission),
        }
    }

    pub fn run_passenger_batch(&mut self) -> BatchReport {
        info!("Processing passenger requests...");
        self.passenger.process_all(self.pacer.as_mut())
    }

    pub fn run_service_batch(&mut self) -> BatchReport {
        info!("Processing service requests...");
        self.service.process_all(self.pacer.as_mut())
    }

    /// Reset both cars. There is no way back from this short of building a
    /// new controller.
    pub fn trigger_emergency(&mut self) {
        warn!("EMERGENCY: resetting all cars");
        self.passenger.process_emergency();
        self.service.process_emergency();
    }

    pub fn passenger(&self) -> &Car {
        &self.passenger
    }

    pub fn service(&self) -> &Car {
        &self.service
    }

    pub fn car(&self, kind: CarKind) -> &Car {
        match kind {
            CarKind::Passenger => &self.passenger,
            CarKind::Service => &self.service,
        }
    }
}
