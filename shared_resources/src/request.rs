use crate::car_status::CarKind;
use crate::direction::Direction;
use crate::error::DispatchError;
use crate::origin::Origin;

pub type Floor = i32;

/// A request for a car to carry someone to `destination_floor`.
///
/// External requests come from a hall panel and carry the floor they were
/// made on; the direction is fixed at construction. Internal requests come
/// from inside the car and stay `Idle` until compared against the car's
/// floor when they are processed.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    origin: Origin,
    origin_floor: Option<Floor>,
    destination_floor: Floor,
    direction: Direction,
}

impl Request {
    pub fn external(origin_floor: Floor, destination_floor: Floor) -> Result<Self, DispatchError> {
        if origin_floor == destination_floor {
            return Err(DispatchError::InvalidRequest(format!(
                "external request from floor {} to the same floor",
                origin_floor
            )));
        }
        Ok(Request {
            origin: Origin::External,
            origin_floor: Some(origin_floor),
            destination_floor: destination_floor,
            direction: Direction::between(origin_floor, destination_floor),
        })
    }

    pub fn internal(destination_floor: Floor) -> Self {
        Request {
            origin: Origin::Internal,
            origin_floor: None,
            destination_floor: destination_floor,
            direction: Direction::Idle,
        }
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    pub fn origin_floor(&self) -> Option<Floor> {
        self.origin_floor
    }

    pub fn destination_floor(&self) -> Floor {
        self.destination_floor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction this request takes a car standing at `floor`. Internal
    /// requests have no direction of their own until now.
    pub fn direction_from(&self, floor: Floor) -> Direction {
        match self.direction {
            Direction::Idle => Direction::between(floor, self.destination_floor),
            direction => direction,
        }
    }

    /// Stop at the requester's floor, for external requests only.
    pub fn pickup_stop(&self) -> Option<Stop> {
        self.origin_floor.map(|floor| Stop {
            floor: floor,
            purpose: StopPurpose::Pickup,
            request: *self,
        })
    }

    pub fn destination_stop(&self) -> Stop {
        Stop {
            floor: self.destination_floor,
            purpose: StopPurpose::Destination,
            request: *self,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPurpose {
    Pickup,
    Destination,
}

impl StopPurpose {
    pub fn as_string(self) -> String {
        match self {
            StopPurpose::Pickup => String::from("pickup"),
            StopPurpose::Destination => String::from("destination"),
        }
    }
}

/// One queued floor a car has to visit, and the request it belongs to.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    pub floor: Floor,
    pub purpose: StopPurpose,
    pub request: Request,
}

/// A request together with the queue it is meant for.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Up(Request),
    Down(Request),
    Service(Request),
}

impl Submission {
    pub fn target(&self) -> CarKind {
        match self {
            Submission::Up(_) | Submission::Down(_) => CarKind::Passenger,
            Submission::Service(_) => CarKind::Service,
        }
    }

    pub fn request(&self) -> &Request {
        match self {
            Submission::Up(request) | Submission::Down(request) | Submission::Service(request) => request,
        }
    }
}
