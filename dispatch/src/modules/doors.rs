/// ----- DOORS MODULE -----
/// Runs the door cycle at a stop: open the doors, hold them for the dwell
/// time, close them again.

use log::debug;

use shared_resources::car_status::{DoorState, Phase};
use shared_resources::request::StopPurpose;

use super::car::CarState;
use super::timer::{Delay, Flow, Pacer};

pub(crate) fn cycle(car: &mut CarState, purpose: StopPurpose, pacer: &mut dyn Pacer) -> Flow {
    let floor = car.current_floor();

    car.set_door(DoorState::Open);
    debug!("{} car: doors are OPEN on floor {}", car.kind(), floor);
    car.emit(Phase::DoorsOpened { floor: floor }, Some(purpose));

    // interrupted while loading -> doors stay open
    if pacer.wait(Delay::Dwell) == Flow::Interrupted {
        return Flow::Interrupted;
    }

    car.set_door(DoorState::Closed);
    debug!("{} car: doors are CLOSED", car.kind());
    car.emit(Phase::DoorsClosed { floor: floor }, Some(purpose));
    Flow::Continue
}
