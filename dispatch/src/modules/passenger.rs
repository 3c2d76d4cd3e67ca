/// ----- PASSENGER CAR MODULE -----
/// Sweep scheduling for the passenger car. Stops are kept in two queues:
/// the up queue sorted by ascending floor and the down queue sorted by
/// descending floor. A batch drains the up queue completely before reversing
/// into the down queue. The car reports no heading while sweeping; its motion
/// state stays idle.
///
/// Queue membership is decided by the caller when the request is routed and
/// is never re-evaluated, even if the car has since passed the floor.

use std::collections::VecDeque;

use log::{debug, info};

use shared_resources::direction::Direction;
use shared_resources::request::{Floor, Request, Stop};

use super::car::{BatchReport, CarState, Elevator};
use super::timer::{Flow, Pacer};

#[derive(Debug, Clone)]
pub struct PassengerCar {
    car: CarState,
    up_queue: VecDeque<Stop>,
    down_queue: VecDeque<Stop>,
}

impl PassengerCar {
    pub(crate) fn new(car: CarState) -> Self {
        PassengerCar {
            car: car,
            up_queue: VecDeque::new(),
            down_queue: VecDeque::new(),
        }
    }

    pub(crate) fn state_mut(&mut self) -> &mut CarState {
        &mut self.car
    }

    /// Queue `request` for the upward sweep. External requests first get a
    /// pickup stop at the floor they were made on.
    pub fn enqueue_up(&mut self, request: Request) {
        self.enqueue(Direction::Up, request);
    }

    pub fn enqueue_down(&mut self, request: Request) {
        self.enqueue(Direction::Down, request);
    }

    /// Floors queued for the given sweep, in the order they will be visited.
    pub fn queued_floors(&self, sweep: Direction) -> Vec<Floor> {
        match sweep {
            Direction::Up => self.up_queue.iter().map(|stop| stop.floor).collect(),
            Direction::Down => self.down_queue.iter().map(|stop| stop.floor).collect(),
            Direction::Idle => Vec::new(),
        }
    }

    fn enqueue(&mut self, sweep: Direction, request: Request) {
        debug!(
            "passenger car: {} request to floor {} queued for the {} sweep",
            request.origin().as_string(),
            request.destination_floor(),
            sweep.as_string()
        );
        let queue = self.queue_mut(sweep);
        if let Some(pickup) = request.pickup_stop() {
            insert_sorted(queue, pickup, sweep);
        }
        insert_sorted(queue, request.destination_stop(), sweep);
    }

    fn queue_mut(&mut self, sweep: Direction) -> &mut VecDeque<Stop> {
        match sweep {
            Direction::Down => &mut self.down_queue,
            Direction::Up | Direction::Idle => &mut self.up_queue,
        }
    }

    fn sweep(&mut self, sweep: Direction, pacer: &mut dyn Pacer, report: &mut BatchReport) -> Flow {
        while let Some(stop) = self.queue_mut(sweep).pop_front() {
            if stop.floor == self.car.current_floor() {
                self.car.skip(&stop);
                report.skipped += 1;
                continue;
            }
            if self.car.serve(&stop, None, pacer) == Flow::Interrupted {
                return Flow::Interrupted;
            }
            report.served += 1;
        }
        info!("Finished processing all the {} requests.", sweep.as_string());
        Flow::Continue
    }
}

/// Insert keeping the queue sorted for `sweep`; equal floors keep their
/// insertion order.
fn insert_sorted(queue: &mut VecDeque<Stop>, stop: Stop, sweep: Direction) {
    let index = match sweep {
        Direction::Down => queue.partition_point(|queued| queued.floor >= stop.floor),
        Direction::Up | Direction::Idle => queue.partition_point(|queued| queued.floor <= stop.floor),
    };
    queue.insert(index, stop);
}

impl Elevator for PassengerCar {
    fn state(&self) -> &CarState {
        &self.car
    }

    fn pending(&self) -> usize {
        self.up_queue.len() + self.down_queue.len()
    }

    fn process_all(&mut self, pacer: &mut dyn Pacer) -> BatchReport {
        let mut report = BatchReport::default();

        for sweep in [Direction::Up, Direction::Down] {
            if self.queue_mut(sweep).is_empty() {
                continue;
            }
            if self.sweep(sweep, pacer, &mut report) == Flow::Interrupted {
                report.interrupted = true;
                return report;
            }
        }

        self.car.finish_batch();
        info!("All requests have been fulfilled, passenger car is now idle");
        report
    }

    fn process_emergency(&mut self) {
        self.up_queue.clear();
        self.down_queue.clear();
        self.car.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossbeam_channel::unbounded;

    use shared_resources::car_status::{CarEvent, CarKind, DoorState, Phase};
    use shared_resources::request::StopPurpose;

    use crate::modules::car::GROUND_FLOOR;
    use crate::modules::timer::NoDelay;

    fn passenger_car() -> (PassengerCar, crossbeam_channel::Receiver<CarEvent>) {
        let (events_tx, events_rx) = unbounded();
        let mut state = CarState::new(CarKind::Passenger);
        state.attach_events(events_tx);
        (PassengerCar::new(state), events_rx)
    }

    fn arrivals(events_rx: &crossbeam_channel::Receiver<CarEvent>) -> Vec<(Floor, Option<StopPurpose>)> {
        events_rx
            .try_iter()
            .filter_map(|event| match event.phase {
                Phase::Arrived { floor } => Some((floor, event.purpose)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn up_queue_is_sorted_ascending() {
        let (mut car, _events) = passenger_car();
        car.enqueue_up(Request::internal(7));
        car.enqueue_up(Request::internal(3));
        car.enqueue_up(Request::external(2, 5).unwrap());
        assert_eq!(car.queued_floors(Direction::Up), vec![2, 3, 5, 7]);
        assert!(car.queued_floors(Direction::Down).is_empty());
    }

    #[test]
    fn down_queue_is_sorted_descending() {
        let (mut car, _events) = passenger_car();
        car.enqueue_down(Request::internal(2));
        car.enqueue_down(Request::external(10, 2).unwrap());
        car.enqueue_down(Request::internal(5));
        assert_eq!(car.queued_floors(Direction::Down), vec![10, 5, 2, 2]);
    }

    #[test]
    fn equal_floors_keep_insertion_order() {
        let (mut car, _events) = passenger_car();
        let first = Request::internal(4);
        let second = Request::external(2, 4).unwrap();
        car.enqueue_up(first);
        car.enqueue_up(second);
        let fours: Vec<Request> = car.up_queue.iter().filter(|stop| stop.floor == 4).map(|stop| stop.request).collect();
        assert_eq!(fours, vec![first, second]);
    }

    #[test]
    fn equal_floors_keep_insertion_order_going_down() {
        let (mut car, _events) = passenger_car();
        let first = Request::external(9, 3).unwrap();
        let second = Request::internal(3);
        let third = Request::external(7, 3).unwrap();
        car.enqueue_down(first);
        car.enqueue_down(second);
        car.enqueue_down(third);
        assert_eq!(car.queued_floors(Direction::Down), vec![9, 7, 3, 3, 3]);
        let threes: Vec<Request> = car.down_queue.iter().filter(|stop| stop.floor == 3).map(|stop| stop.request).collect();
        assert_eq!(threes, vec![first, second, third]);
    }

    #[test]
    fn external_request_stops_at_pickup_before_destination() {
        let (mut car, events_rx) = passenger_car();
        car.enqueue_up(Request::external(3, 6).unwrap());
        let report = car.process_all(&mut NoDelay);

        assert_eq!(
            arrivals(&events_rx),
            vec![(3, Some(StopPurpose::Pickup)), (6, Some(StopPurpose::Destination))]
        );
        assert_eq!(report, BatchReport { served: 2, skipped: 0, interrupted: false });
    }

    #[test]
    fn stop_on_current_floor_is_skipped() {
        let (mut car, events_rx) = passenger_car();
        car.enqueue_up(Request::external(1, 5).unwrap());
        let report = car.process_all(&mut NoDelay);

        let events: Vec<CarEvent> = events_rx.try_iter().collect();
        assert_eq!(events[0].phase, Phase::Skipped { floor: 1 });
        assert_eq!(report.skipped, 1);
        assert_eq!(report.served, 1);
        assert_eq!(car.state().current_floor(), 5);
    }

    #[test]
    fn sweeps_up_then_down() {
        let (mut car, events_rx) = passenger_car();
        car.enqueue_up(Request::external(1, 5).unwrap());
        car.enqueue_down(Request::external(4, 2).unwrap());
        car.enqueue_up(Request::external(3, 6).unwrap());
        car.process_all(&mut NoDelay);

        let floors: Vec<Floor> = arrivals(&events_rx).into_iter().map(|(floor, _)| floor).collect();
        assert_eq!(floors, vec![3, 5, 6, 4, 2]);
        assert_eq!(car.state().current_floor(), 2);
        assert_eq!(car.state().motion(), Direction::Idle);
        assert_eq!(car.pending(), 0);
    }

    #[test]
    fn motion_stays_idle_while_draining() {
        let (mut car, events_rx) = passenger_car();
        car.enqueue_up(Request::internal(4));
        car.enqueue_down(Request::internal(2));
        car.process_all(&mut NoDelay);

        let events: Vec<CarEvent> = events_rx.try_iter().collect();
        assert_eq!(events.len(), 9);
        for event in &events {
            assert_eq!(event.status.motion, Direction::Idle, "{:?}", event.phase);
        }
        assert_eq!(car.state().motion(), Direction::Idle);
    }

    #[test]
    fn up_queue_is_drained_before_down_queue() {
        let (mut car, events_rx) = passenger_car();
        car.enqueue_down(Request::internal(6));
        car.enqueue_up(Request::internal(8));
        car.process_all(&mut NoDelay);

        let floors: Vec<Floor> = arrivals(&events_rx).into_iter().map(|(floor, _)| floor).collect();
        assert_eq!(floors, vec![8, 6]);
    }

    #[test]
    fn routing_is_never_reevaluated() {
        let (mut car, events_rx) = passenger_car();
        car.enqueue_up(Request::internal(9));
        car.process_all(&mut NoDelay);
        let _ = arrivals(&events_rx);

        // below the car now, but still served from the up queue
        car.enqueue_up(Request::internal(3));
        car.enqueue_up(Request::internal(5));
        car.process_all(&mut NoDelay);
        let floors: Vec<Floor> = arrivals(&events_rx).into_iter().map(|(floor, _)| floor).collect();
        assert_eq!(floors, vec![3, 5]);
    }

    #[test]
    fn empty_batch_is_a_noop() {
        let (mut car, _events) = passenger_car();
        let report = car.process_all(&mut NoDelay);
        assert_eq!(report, BatchReport::default());
        assert_eq!(car.state().current_floor(), GROUND_FLOOR);
        assert_eq!(car.state().motion(), Direction::Idle);
    }

    #[test]
    fn emergency_drops_both_queues() {
        let (mut car, _events) = passenger_car();
        car.enqueue_up(Request::external(2, 8).unwrap());
        car.enqueue_down(Request::external(7, 3).unwrap());
        car.process_emergency();

        assert_eq!(car.pending(), 0);
        assert_eq!(car.state().current_floor(), GROUND_FLOOR);
        assert_eq!(car.state().door(), DoorState::Open);
        assert!(car.state().emergency_active());
        assert_eq!(car.process_all(&mut NoDelay), BatchReport::default());
        assert_eq!(car.state().current_floor(), GROUND_FLOOR);
    }
}
