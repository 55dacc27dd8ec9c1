//! Unit tests for mt-transit state machines.

#[cfg(test)]
mod passenger {
    use mt_core::{PassengerId, StationId, StationType, Tick, TrainId};
    use crate::{Passenger, PassengerState, TransitionError};

    fn waiting() -> Passenger {
        Passenger::new(PassengerId(1), StationId(1), StationType::Circle, StationType::Square, Tick(0))
            .unwrap()
    }

    #[test]
    fn starts_waiting_at_origin() {
        let p = waiting();
        assert_eq!(p.state, PassengerState::Waiting);
        assert_eq!(p.station, Some(StationId(1)));
        assert_eq!(p.train, None);
        assert_eq!(p.age, 0);
    }

    #[test]
    fn same_type_rejected() {
        let err = Passenger::new(
            PassengerId(1),
            StationId(1),
            StationType::Circle,
            StationType::Circle,
            Tick(0),
        )
        .unwrap_err();
        assert_eq!(err, TransitionError::SameOriginDestination(StationType::Circle));
    }

    #[test]
    fn full_journey_with_transfer() {
        let mut p = waiting();
        p.board(TrainId(1)).unwrap();
        assert_eq!((p.state, p.train, p.station), (PassengerState::OnTrain, Some(TrainId(1)), None));

        p.transfer_at(StationId(2)).unwrap();
        assert_eq!(
            (p.state, p.train, p.station),
            (PassengerState::Transferring, None, Some(StationId(2)))
        );

        p.reboard(TrainId(2)).unwrap();
        assert_eq!(p.train, Some(TrainId(2)));

        p.complete().unwrap();
        assert_eq!((p.state, p.train, p.station), (PassengerState::Completed, None, None));
    }

    #[test]
    fn illegal_transitions_leave_passenger_untouched() {
        let mut p = waiting();
        let before = p.clone();
        assert!(matches!(p.complete(), Err(TransitionError::Passenger { action: "complete", .. })));
        assert!(p.transfer_at(StationId(3)).is_err());
        assert!(p.reboard(TrainId(1)).is_err());
        assert_eq!(p, before);

        p.board(TrainId(1)).unwrap();
        assert!(p.board(TrainId(2)).is_err());
        assert_eq!(p.train, Some(TrainId(1)));
    }

    #[test]
    fn completed_is_terminal() {
        let mut p = waiting();
        p.board(TrainId(1)).unwrap();
        p.complete().unwrap();
        assert!(p.board(TrainId(1)).is_err());
        assert!(p.complete().is_err());
        assert!(p.transfer_at(StationId(1)).is_err());
    }

    #[test]
    fn enter_dispatches_on_state() {
        let mut p = waiting();
        p.enter(TrainId(1)).unwrap();
        p.transfer_at(StationId(2)).unwrap();
        p.enter(TrainId(2)).unwrap();
        assert_eq!(p.state, PassengerState::OnTrain);
    }
}

#[cfg(test)]
mod train {
    use mt_core::{LineId, StationId, TrainId};
    use crate::{Direction, Train, TrainState, TransitionError};

    fn idle() -> Train {
        Train::new(TrainId(1), LineId(1), &[StationId(1), StationId(2), StationId(3)], 2, 0.5)
    }

    #[test]
    fn starts_idle_at_first_station() {
        let t = idle();
        assert_eq!(t.state, TrainState::Idle);
        assert_eq!((t.current_station, t.next_station), (StationId(1), StationId(2)));
        assert_eq!(t.station_index, 0);
        assert_eq!(t.direction, Direction::Forward);
        assert_eq!(t.free_seats(), 2);
    }

    #[test]
    fn dwell_cycle() {
        let mut t = idle();
        t.start().unwrap();
        t.finish_alighting().unwrap();
        t.finish_boarding().unwrap();
        assert_eq!(t.state, TrainState::Moving);

        t.progress = 1.0;
        t.arrive().unwrap();
        assert_eq!(t.state, TrainState::Alighting);
        assert_eq!(t.progress, 0.0);
    }

    #[test]
    fn start_is_one_shot() {
        let mut t = idle();
        t.start().unwrap();
        assert!(matches!(t.start(), Err(TransitionError::Train { action: "start", .. })));
    }

    #[test]
    fn early_arrival_rejected() {
        let mut t = idle();
        t.start().unwrap();
        t.finish_alighting().unwrap();
        t.finish_boarding().unwrap();
        t.progress = 0.5;
        assert_eq!(t.arrive().unwrap_err(), TransitionError::EarlyArrival(TrainId(1)));
        assert_eq!(t.state, TrainState::Moving);
    }

    #[test]
    fn out_of_order_phases_rejected() {
        let mut t = idle();
        assert!(t.finish_alighting().is_err());
        assert!(t.finish_boarding().is_err());
        assert!(t.arrive().is_err());
        assert_eq!(t.state, TrainState::Idle);
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::Forward.sign(), 1);
        assert_eq!(Direction::Backward.sign(), -1);
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
    }
}

#[cfg(test)]
mod store {
    use mt_core::{PassengerId, StationId, StationType, Tick, TrainId};
    use crate::{PassengerState, PassengerStore};

    #[test]
    fn spawn_allocates_sequential_ids() {
        let mut s = PassengerStore::new();
        let a = s.spawn(StationId(1), StationType::Circle, StationType::Square, Tick(0)).unwrap();
        let b = s.spawn(StationId(1), StationType::Circle, StationType::Star, Tick(0)).unwrap();
        assert_eq!((a, b), (PassengerId(1), PassengerId(2)));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn rejected_spawn_consumes_no_id() {
        let mut s = PassengerStore::new();
        assert!(s.spawn(StationId(1), StationType::Circle, StationType::Circle, Tick(0)).is_err());
        let id = s.spawn(StationId(1), StationType::Circle, StationType::Square, Tick(0)).unwrap();
        assert_eq!(id, PassengerId(1));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn only_station_passengers_age() {
        let mut s = PassengerStore::new();
        let a = s.spawn(StationId(1), StationType::Circle, StationType::Square, Tick(0)).unwrap();
        let b = s.spawn(StationId(1), StationType::Circle, StationType::Square, Tick(0)).unwrap();
        s.get_mut(b).unwrap().board(TrainId(1)).unwrap();

        s.age_waiting();
        s.age_waiting();

        assert_eq!(s.get(a).unwrap().age, 2);
        assert_eq!(s.get(b).unwrap().age, 0);
        assert_eq!(s.count_in(PassengerState::OnTrain), 1);
    }

    #[test]
    fn ids_are_not_reused() {
        let mut s = PassengerStore::new();
        let a = s.spawn(StationId(1), StationType::Circle, StationType::Square, Tick(0)).unwrap();
        s.remove(a);
        let b = s.spawn(StationId(1), StationType::Circle, StationType::Square, Tick(0)).unwrap();
        assert_ne!(a, b);
    }
}
