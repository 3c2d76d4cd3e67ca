/// ----- DEBUG MODULE -----
/// Narrates car events while the system runs: either as a status board
/// redrawn in place, as JSON lines, or through the logger.

use std::collections::HashMap;
use std::io::{self, stdout, Write};

use crossbeam_channel::Receiver;
use crossterm::{cursor, terminal, ExecutableCommand};
use log::info;

use shared_resources::car_status::{CarEvent, CarKind, CarStatus, Phase};
use shared_resources::config::OutputMode;

const DIVIDER: &str = "+------------+------------+------------+------------+------------+--------------------------+";

pub struct Board<W: Write> {
    out: W,
    cars: HashMap<CarKind, (CarStatus, Phase)>,
    lines_drawn: u16,
}

impl<W: Write> Board<W> {
    pub fn new(out: W) -> Self {
        Board {
            out: out,
            cars: HashMap::new(),
            lines_drawn: 0,
        }
    }

    pub fn print_status(&mut self, event: &CarEvent) -> io::Result<()> {
        self.cars.insert(event.status.kind, (event.status, event.phase));

        if self.lines_drawn > 0 {
            self.out.execute(cursor::MoveUp(self.lines_drawn))?;
            self.out.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;
        }

        writeln!(self.out, "{}", DIVIDER)?;
        writeln!(
            self.out,
            "| {0:<10} | {1:<10} | {2:<10} | {3:<10} | {4:<10} | {5:<24} |",
            "CAR", "FLOOR", "MOTION", "DOORS", "EMERGENCY", "LAST PHASE"
        )?;
        writeln!(self.out, "{}", DIVIDER)?;
        let mut lines = 3;
        for kind in CarKind::iter() {
            if let Some((status, phase)) = self.cars.get(&kind) {
                writeln!(
                    self.out,
                    "| {0:<10} | {1:<10} | {2:<10} | {3:<10} | {4:<10} | {5:<24} |",
                    kind.as_str(),
                    status.floor,
                    status.motion.as_string(),
                    status.door.as_string(),
                    status.emergency,
                    phase.as_string(),
                )?;
                writeln!(self.out, "{}", DIVIDER)?;
                lines += 2;
            }
        }
        self.lines_drawn = lines;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn main(output: OutputMode, events_rx: Receiver<CarEvent>) -> io::Result<()> {
    let mut board = Board::new(stdout());

    for event in events_rx.iter() {
        match output {
            OutputMode::Board => board.print_status(&event)?,
            OutputMode::Json => {
                let mut out = stdout().lock();
                serde_json::to_writer(&mut out, &event)?;
                writeln!(out)?;
            }
            OutputMode::Log => {
                let purpose = event.purpose.map(|purpose| purpose.as_string()).unwrap_or_default();
                info!("{} car: {} {}", event.status.kind, event.phase.as_string(), purpose);
            }
        }
    }
    Ok(())
}
