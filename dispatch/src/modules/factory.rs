/// ----- FACTORY MODULE -----
/// Builds cars by type, all starting idle on the ground floor with the
/// doors closed.

use crossbeam_channel::Sender;

use shared_resources::car_status::{CarEvent, CarKind};
use shared_resources::error::DispatchError;
use shared_resources::request::Submission;

use super::car::{BatchReport, CarState, Elevator};
use super::passenger::PassengerCar;
use super::service::ServiceCar;
use super::timer::Pacer;

#[derive(Debug, Clone)]
pub enum Car {
    Passenger(PassengerCar),
    Service(ServiceCar),
}

impl Car {
    pub fn kind(&self) -> CarKind {
        self.state().kind()
    }

    /// Queue a submission on this car. Submissions meant for the other car
    /// type are refused with [`DispatchError::NoSuchCar`].
    pub fn submit(&mut self, submission: Submission) -> Result<(), DispatchError> {
        match (self, submission) {
            (Car::Passenger(car), Submission::Up(request)) => car.enqueue_up(request),
            (Car::Passenger(car), Submission::Down(request)) => car.enqueue_down(request),
            (Car::Service(car), Submission::Service(request)) => car.enqueue(request),
            (_, submission) => return Err(DispatchError::NoSuchCar(submission.target())),
        }
        Ok(())
    }

    pub fn attach_events(&mut self, events_tx: Sender<CarEvent>) {
        match self {
            Car::Passenger(car) => car.state_mut().attach_events(events_tx),
            Car::Service(car) => car.state_mut().attach_events(events_tx),
        }
    }

    pub fn as_passenger(&self) -> Option<&PassengerCar> {
        match self {
            Car::Passenger(car) => Some(car),
            Car::Service(_) => None,
        }
    }
}

impl Elevator for Car {
    fn state(&self) -> &CarState {
        match self {
            Car::Passenger(car) => car.state(),
            Car::Service(car) => car.state(),
        }
    }

    fn pending(&self) -> usize {
        match self {
            Car::Passenger(car) => car.pending(),
            Car::Service(car) => car.pending(),
        }
    }

    fn process_all(&mut self, pacer: &mut dyn Pacer) -> BatchReport {
        match self {
            Car::Passenger(car) => car.process_all(pacer),
            Car::Service(car) => car.process_all(pacer),
        }
    }

    fn process_emergency(&mut self) {
        match self {
            Car::Passenger(car) => car.process_emergency(),
            Car::Service(car) => car.process_emergency(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CarFactory;

impl CarFactory {
    pub fn new() -> Self {
        CarFactory
    }

    pub fn create(&self, kind: CarKind) -> Car {
        let state = CarState::new(kind);
        match kind {
            CarKind::Passenger => Car::Passenger(PassengerCar::new(state)),
            CarKind::Service => Car::Service(ServiceCar::new(state)),
        }
    }

    pub fn create_from_tag(&self, tag: &str) -> Result<Car, DispatchError> {
        Ok(self.create(tag.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use shared_resources::car_status::DoorState;
    use shared_resources::direction::Direction;
    use shared_resources::request::Request;

    use crate::modules::car::GROUND_FLOOR;

    #[test]
    fn creates_each_kind_in_initial_state() {
        let factory = CarFactory::new();
        for kind in CarKind::iter() {
            let car = factory.create(kind);
            assert_eq!(car.kind(), kind);
            let status = car.status();
            assert_eq!(status.floor, GROUND_FLOOR);
            assert_eq!(status.motion, Direction::Idle);
            assert_eq!(status.door, DoorState::Closed);
            assert!(!status.emergency);
            assert_eq!(car.pending(), 0);
        }
    }

    #[test]
    fn creates_from_tag() {
        let factory = CarFactory::new();
        assert!(matches!(factory.create_from_tag("passenger"), Ok(Car::Passenger(_))));
        assert!(matches!(factory.create_from_tag("service"), Ok(Car::Service(_))));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = CarFactory::new().create_from_tag("freight").unwrap_err();
        assert_eq!(err, DispatchError::UnknownCarType(String::from("freight")));
    }

    #[test]
    fn submissions_for_the_other_car_are_refused() {
        let factory = CarFactory::new();
        let request = Request::internal(4);

        let mut service = factory.create(CarKind::Service);
        assert_eq!(
            service.submit(Submission::Up(request)),
            Err(DispatchError::NoSuchCar(CarKind::Passenger))
        );
        assert_eq!(service.submit(Submission::Service(request)), Ok(()));
        assert_eq!(service.pending(), 1);

        let mut passenger = factory.create(CarKind::Passenger);
        assert_eq!(
            passenger.submit(Submission::Service(request)),
            Err(DispatchError::NoSuchCar(CarKind::Service))
        );
        assert_eq!(passenger.pending(), 0);
    }
}
