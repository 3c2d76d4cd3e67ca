/// ----- SERVICE CAR MODULE -----
/// Strict arrival-order scheduling for the service car. No pickup stops,
/// no reordering, no same-floor skipping: every request is one trip and one
/// door cycle.

use std::collections::VecDeque;

use log::info;

use shared_resources::request::{Request, Stop};

use super::car::{BatchReport, CarState, Elevator};
use super::timer::{Flow, Pacer};

#[derive(Debug, Clone)]
pub struct ServiceCar {
    car: CarState,
    queue: VecDeque<Stop>,
}

impl ServiceCar {
    pub(crate) fn new(car: CarState) -> Self {
        ServiceCar {
            car: car,
            queue: VecDeque::new(),
        }
    }

    pub(crate) fn state_mut(&mut self) -> &mut CarState {
        &mut self.car
    }

    pub fn enqueue(&mut self, request: Request) {
        self.queue.push_back(request.destination_stop());
    }
}

impl Elevator for ServiceCar {
    fn state(&self) -> &CarState {
        &self.car
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }

    fn process_all(&mut self, pacer: &mut dyn Pacer) -> BatchReport {
        let mut report = BatchReport::default();

        while let Some(stop) = self.queue.pop_front() {
            let heading = stop.request.direction_from(self.car.current_floor());
            if self.car.serve(&stop, Some(heading), pacer) == Flow::Interrupted {
                report.interrupted = true;
                return report;
            }
            report.served += 1;
        }

        self.car.finish_batch();
        info!("All requests have been fulfilled, service car is now idle");
        report
    }

    fn process_emergency(&mut self) {
        self.queue.clear();
        self.car.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossbeam_channel::{unbounded, Receiver};

    use shared_resources::car_status::{CarEvent, CarKind, DoorState, Phase};
    use shared_resources::direction::Direction;
    use shared_resources::request::Floor;

    use crate::modules::car::GROUND_FLOOR;
    use crate::modules::timer::NoDelay;

    fn service_car() -> (ServiceCar, Receiver<CarEvent>) {
        let (events_tx, events_rx) = unbounded();
        let mut state = CarState::new(CarKind::Service);
        state.attach_events(events_tx);
        (ServiceCar::new(state), events_rx)
    }

    #[test]
    fn serves_in_arrival_order() {
        let (mut car, events_rx) = service_car();
        car.enqueue(Request::internal(13));
        car.enqueue(Request::external(13, 2).unwrap());
        car.enqueue(Request::external(13, 15).unwrap());
        let report = car.process_all(&mut NoDelay);

        let floors: Vec<Floor> = events_rx
            .try_iter()
            .filter_map(|event| match event.phase {
                Phase::Arrived { floor } => Some(floor),
                _ => None,
            })
            .collect();
        assert_eq!(floors, vec![13, 2, 15]);
        assert_eq!(report.served, 3);
        assert_eq!(car.state().current_floor(), 15);
        assert_eq!(car.state().motion(), Direction::Idle);
    }

    #[test]
    fn motion_is_set_per_stop() {
        let (mut car, events_rx) = service_car();
        car.enqueue(Request::internal(6));
        car.enqueue(Request::external(9, 2).unwrap());
        car.process_all(&mut NoDelay);

        let motions: Vec<(Phase, Direction)> = events_rx
            .try_iter()
            .filter(|event| matches!(event.phase, Phase::Departing { .. } | Phase::Arrived { .. }))
            .map(|event| (event.phase, event.status.motion))
            .collect();
        // the heading shows up together with the new floor
        assert_eq!(
            motions,
            vec![
                (Phase::Departing { from: 1, to: 6 }, Direction::Idle),
                (Phase::Arrived { floor: 6 }, Direction::Up),
                (Phase::Departing { from: 6, to: 2 }, Direction::Up),
                (Phase::Arrived { floor: 2 }, Direction::Down),
            ]
        );
    }

    #[test]
    fn same_floor_request_still_cycles_doors() {
        let (mut car, events_rx) = service_car();
        car.enqueue(Request::internal(GROUND_FLOOR));
        let report = car.process_all(&mut NoDelay);

        let phases: Vec<Phase> = events_rx.try_iter().map(|event| event.phase).collect();
        assert!(phases.contains(&Phase::DoorsOpened { floor: GROUND_FLOOR }));
        assert_eq!(report.skipped, 0);
        assert_eq!(report.served, 1);
    }

    #[test]
    fn emergency_clears_the_queue() {
        let (mut car, _events) = service_car();
        car.enqueue(Request::internal(8));
        car.enqueue(Request::internal(4));
        car.process_emergency();

        assert_eq!(car.pending(), 0);
        assert_eq!(car.state().current_floor(), GROUND_FLOOR);
        assert_eq!(car.state().door(), DoorState::Open);
        assert!(car.state().emergency_active());
        assert_eq!(car.process_all(&mut NoDelay), BatchReport::default());
    }
}
