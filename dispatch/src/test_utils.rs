//! Helpers shared by the unit and integration tests.

use crossbeam_channel::{unbounded, Receiver};

use shared_resources::car_status::{CarEvent, CarKind, Phase};
use shared_resources::request::{Floor, Request, StopPurpose};

use crate::modules::controller::DispatchController;
use crate::modules::factory::CarFactory;

/// Controller with instant phases, narrating into the returned receiver.
pub fn recorded_controller() -> (DispatchController, Receiver<CarEvent>) {
    let (events_tx, events_rx) = unbounded();
    let mut controller = DispatchController::new(&CarFactory::new());
    controller.subscribe(events_tx);
    (controller, events_rx)
}

pub fn external(origin_floor: Floor, destination_floor: Floor) -> Request {
    Request::external(origin_floor, destination_floor).expect("origin and destination differ")
}

pub fn drain(events_rx: &Receiver<CarEvent>) -> Vec<CarEvent> {
    events_rx.try_iter().collect()
}

/// Floors a car arrived at, in order.
pub fn arrivals(events: &[CarEvent], kind: CarKind) -> Vec<Floor> {
    stops(events, kind).into_iter().map(|(floor, _)| floor).collect()
}

/// Arrivals together with the purpose of each stop.
pub fn stops(events: &[CarEvent], kind: CarKind) -> Vec<(Floor, Option<StopPurpose>)> {
    events
        .iter()
        .filter(|event| event.status.kind == kind)
        .filter_map(|event| match event.phase {
            Phase::Arrived { floor } => Some((floor, event.purpose)),
            _ => None,
        })
        .collect()
}

pub fn phases(events: &[CarEvent], kind: CarKind) -> Vec<Phase> {
    events
        .iter()
        .filter(|event| event.status.kind == kind)
        .map(|event| event.phase)
        .collect()
}
