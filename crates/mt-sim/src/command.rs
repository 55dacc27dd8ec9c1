//! Mutation commands and their dispatch.
//!
//! Every mutation a host can issue is a [`SimCommand`] variant; adding one
//! forces a new arm in [`Engine::apply`].

use mt_core::{LineId, PassengerId, Point, StationId, StationType, TrainId};
use mt_network::Router;
use mt_policy::PolicyKind;

use crate::{Engine, SimResult, SpawnOutcome};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimCommand {
    AddStation {
        kind:     StationType,
        position: Option<Point>,
    },
    RemoveStation(StationId),
    AddLine,
    RemoveLine(LineId),
    AddStationToLine {
        line:    LineId,
        station: StationId,
        /// `None` appends.
        index:   Option<usize>,
    },
    /// `None` capacity or speed takes the configured default.  With
    /// `start`, the train leaves IDLE immediately.
    AddTrain {
        line:     LineId,
        capacity: Option<usize>,
        speed:    Option<f32>,
        start:    bool,
    },
    StartTrain(TrainId),
    SpawnPassenger {
        station:     StationId,
        destination: StationType,
    },
    SetBoardingPolicy(PolicyKind),
}

/// What a successfully applied command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    StationAdded(StationId),
    StationRemoved(StationId),
    LineAdded(LineId),
    LineRemoved(LineId),
    StationAddedToLine { line: LineId, station: StationId, index: usize },
    TrainAdded(TrainId),
    TrainStarted(TrainId),
    PassengerSpawned(PassengerId),
    /// The spawn hit a full queue (or a failed network).
    SpawnRejected(StationId),
    PolicySet(PolicyKind),
}

impl<R: Router> Engine<R> {
    /// Apply one command completely, or reject it and change nothing.
    pub fn apply(&mut self, command: SimCommand) -> SimResult<CommandOutcome> {
        Ok(match command {
            SimCommand::AddStation { kind, position } => {
                CommandOutcome::StationAdded(self.add_station_at(kind, position.unwrap_or_default())?)
            }
            SimCommand::RemoveStation(id) => {
                self.remove_station(id)?;
                CommandOutcome::StationRemoved(id)
            }
            SimCommand::AddLine => CommandOutcome::LineAdded(self.add_line()?),
            SimCommand::RemoveLine(id) => {
                self.remove_line(id)?;
                CommandOutcome::LineRemoved(id)
            }
            SimCommand::AddStationToLine { line, station, index } => {
                let index = self.add_station_to_line(line, station, index)?;
                CommandOutcome::StationAddedToLine { line, station, index }
            }
            SimCommand::AddTrain { line, capacity, speed, start } => {
                let capacity = capacity.unwrap_or(self.config.train_capacity);
                let speed = speed.unwrap_or(self.config.train_speed);
                let id = self.add_train(line, capacity, speed)?;
                if start {
                    self.start_train(id)?;
                }
                CommandOutcome::TrainAdded(id)
            }
            SimCommand::StartTrain(id) => {
                self.start_train(id)?;
                CommandOutcome::TrainStarted(id)
            }
            SimCommand::SpawnPassenger { station, destination } => {
                match self.spawn_passenger_at(station, destination)? {
                    SpawnOutcome::Spawned(id) => CommandOutcome::PassengerSpawned(id),
                    SpawnOutcome::Rejected => CommandOutcome::SpawnRejected(station),
                }
            }
            SimCommand::SetBoardingPolicy(kind) => {
                self.set_boarding_policy(kind);
                CommandOutcome::PolicySet(kind)
            }
        })
    }
}
