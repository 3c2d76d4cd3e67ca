use std::fmt;
use std::str::FromStr;

use crate::direction::Direction;
use crate::error::DispatchError;
use crate::request::{Floor, StopPurpose};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CarKind {
    Passenger,
    Service,
}

impl CarKind {
    pub fn iter() -> impl Iterator<Item = CarKind> {
        [CarKind::Passenger, CarKind::Service].iter().copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CarKind::Passenger => "passenger",
            CarKind::Service => "service",
        }
    }
}

impl fmt::Display for CarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarKind {
    type Err = DispatchError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "passenger" => Ok(CarKind::Passenger),
            "service" => Ok(CarKind::Service),
            _ => Err(DispatchError::UnknownCarType(tag.to_string())),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorState {
    Open,
    #[default]
    Closed,
}

impl DoorState {
    pub fn as_string(self) -> String {
        match self {
            DoorState::Open => String::from("open"),
            DoorState::Closed => String::from("closed"),
        }
    }
}

/// Read-only snapshot of a car.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarStatus {
    pub kind: CarKind,
    pub floor: Floor,
    pub motion: Direction,
    pub door: DoorState,
    pub emergency: bool,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Departing { from: Floor, to: Floor },
    Arrived { floor: Floor },
    DoorsOpened { floor: Floor },
    DoorsClosed { floor: Floor },
    Skipped { floor: Floor },
    BatchFinished,
    EmergencyReset,
}

impl Phase {
    pub fn as_string(&self) -> String {
        match self {
            Phase::Departing { from, to } => format!("moving {} -> {}", from, to),
            Phase::Arrived { floor } => format!("arrived at {}", floor),
            Phase::DoorsOpened { floor } => format!("doors open at {}", floor),
            Phase::DoorsClosed { floor } => format!("doors closed at {}", floor),
            Phase::Skipped { floor } => format!("already at {}", floor),
            Phase::BatchFinished => String::from("all requests served"),
            Phase::EmergencyReset => String::from("emergency reset"),
        }
    }
}

/// Narration of one completed phase. `status` is taken after the phase.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarEvent {
    pub phase: Phase,
    pub purpose: Option<StopPurpose>,
    pub status: CarStatus,
}
