/// ----- CAR MODULE -----
/// The state machine shared by every car type: current floor, motion,
/// doors and the emergency flag. Schedulers decide which stop comes next;
/// this module moves the car there, one phase at a time, and narrates each
/// completed phase on the car's event channel.

use crossbeam_channel::Sender;
use log::{debug, warn};

use shared_resources::car_status::{CarEvent, CarKind, CarStatus, DoorState, Phase};
use shared_resources::direction::Direction;
use shared_resources::request::{Floor, Stop, StopPurpose};

use super::doors;
use super::timer::{Delay, Flow, Pacer};

/// Floor every car starts on and returns to on an emergency reset.
pub const GROUND_FLOOR: Floor = 1;

#[derive(Debug, Clone)]
pub struct CarState {
    kind: CarKind,
    floor: Floor,
    motion: Direction,
    door: DoorState,
    emergency: bool,
    events_tx: Option<Sender<CarEvent>>,
}

impl CarState {
    pub(crate) fn new(kind: CarKind) -> Self {
        CarState {
            kind: kind,
            floor: GROUND_FLOOR,
            motion: Direction::Idle,
            door: DoorState::Closed,
            emergency: false,
            events_tx: None,
        }
    }

    pub fn kind(&self) -> CarKind {
        self.kind
    }

    pub fn current_floor(&self) -> Floor {
        self.floor
    }

    pub fn motion(&self) -> Direction {
        self.motion
    }

    pub fn door(&self) -> DoorState {
        self.door
    }

    pub fn emergency_active(&self) -> bool {
        self.emergency
    }

    pub fn status(&self) -> CarStatus {
        CarStatus {
            kind: self.kind,
            floor: self.floor,
            motion: self.motion,
            door: self.door,
            emergency: self.emergency,
        }
    }

    pub(crate) fn attach_events(&mut self, events_tx: Sender<CarEvent>) {
        self.events_tx = Some(events_tx);
    }

    pub(crate) fn set_door(&mut self, door: DoorState) {
        self.door = door;
    }

    pub(crate) fn emit(&self, phase: Phase, purpose: Option<StopPurpose>) {
        if let Some(events_tx) = &self.events_tx {
            let event = CarEvent {
                phase: phase,
                purpose: purpose,
                status: self.status(),
            };
            if events_tx.send(event).is_err() {
                debug!("{} car: event receiver is gone, dropping {:?}", self.kind, phase);
            }
        }
    }

    /// Travel to `stop`, then run a full door cycle there. The floor only
    /// changes once the travel phase has completed; `heading`, if given,
    /// becomes the motion state together with the new floor.
    pub(crate) fn serve(&mut self, stop: &Stop, heading: Option<Direction>, pacer: &mut dyn Pacer) -> Flow {
        let from = self.floor;
        if self.door == DoorState::Open {
            // left open by an emergency reset
            self.door = DoorState::Closed;
            self.emit(Phase::DoorsClosed { floor: from }, None);
        }
        debug!("{} car: the current floor is {}. Next stop: {}", self.kind, from, stop.floor);
        self.emit(Phase::Departing { from: from, to: stop.floor }, Some(stop.purpose));

        if pacer.wait(Delay::Travel) == Flow::Interrupted {
            return Flow::Interrupted;
        }
        self.floor = stop.floor;
        if let Some(heading) = heading {
            self.motion = heading;
        }
        debug!("{} car: arrived at {}", self.kind, self.floor);
        self.emit(Phase::Arrived { floor: self.floor }, Some(stop.purpose));

        doors::cycle(self, stop.purpose, pacer)
    }

    pub(crate) fn skip(&self, stop: &Stop) {
        debug!(
            "{} car: currently on floor {}. No movement as destination is the same.",
            self.kind, self.floor
        );
        self.emit(Phase::Skipped { floor: stop.floor }, Some(stop.purpose));
    }

    pub(crate) fn finish_batch(&mut self) {
        self.motion = Direction::Idle;
        self.emit(Phase::BatchFinished, None);
    }

    pub(crate) fn reset(&mut self) {
        self.floor = GROUND_FLOOR;
        self.motion = Direction::Idle;
        self.door = DoorState::Open;
        self.emergency = true;
        warn!(
            "{} car: queues cleared, current floor is {}. Doors are {}",
            self.kind,
            self.floor,
            self.door.as_string()
        );
        self.emit(Phase::EmergencyReset, None);
    }
}

/// Outcome of one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    /// Stops the car travelled to.
    pub served: usize,
    /// Stops dropped because the car was already on that floor.
    pub skipped: usize,
    /// The run was abandoned because an emergency signal arrived.
    pub interrupted: bool,
}

/// Behaviour every car type provides to the controller and workers.
pub trait Elevator {
    fn state(&self) -> &CarState;

    /// Number of stops still queued.
    fn pending(&self) -> usize;

    /// Drain everything queued so far. Runs to completion unless the pacer
    /// reports an interruption.
    fn process_all(&mut self, pacer: &mut dyn Pacer) -> BatchReport;

    /// Drop all queued work and return to the ground floor with the doors
    /// open. The emergency flag stays set for the lifetime of the car.
    fn process_emergency(&mut self);

    fn status(&self) -> CarStatus {
        self.state().status()
    }
}
