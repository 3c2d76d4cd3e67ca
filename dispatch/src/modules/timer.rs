/// ----- TIMER MODULE -----
/// Simulated durations for the travel and door dwell phases. A car asks its
/// pacer to wait once per phase; the pacer decides whether that wait takes
/// real time and whether it can be cut short by an emergency.

use std::thread;
use std::time::Duration;

use crossbeam_channel::{never, select, Receiver};

use shared_resources::config::TimingConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delay {
    Travel,
    Dwell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Interrupted,
}

pub trait Pacer {
    fn wait(&mut self, delay: Delay) -> Flow;
}

/// Completes every phase immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn wait(&mut self, _delay: Delay) -> Flow {
        Flow::Continue
    }
}

/// Blocks for the configured phase durations.
#[derive(Debug, Clone)]
pub struct Timer {
    timing: TimingConfig,
    interrupt_rx: Receiver<()>,
}

impl Timer {
    pub fn new(timing: TimingConfig) -> Self {
        Timer {
            timing: timing,
            interrupt_rx: never(),
        }
    }

    /// A timer whose waits end early with [`Flow::Interrupted`] when a
    /// signal arrives on `interrupt_rx`. The signal is consumed.
    pub fn interruptible(timing: TimingConfig, interrupt_rx: Receiver<()>) -> Self {
        Timer {
            timing: timing,
            interrupt_rx: interrupt_rx,
        }
    }

    fn duration(&self, delay: Delay) -> Duration {
        match delay {
            Delay::Travel => self.timing.travel,
            Delay::Dwell => self.timing.dwell,
        }
    }
}

impl Pacer for Timer {
    fn wait(&mut self, delay: Delay) -> Flow {
        let duration = self.duration(delay);
        let signalled = select! {
            recv(self.interrupt_rx) -> msg => Some(msg.is_ok()),
            default(duration) => None,
        };
        match signalled {
            Some(true) => Flow::Interrupted,
            Some(false) => {
                // nobody can interrupt us anymore
                self.interrupt_rx = never();
                thread::sleep(duration);
                Flow::Continue
            }
            None => Flow::Continue,
        }
    }
}
