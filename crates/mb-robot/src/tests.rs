//! Unit tests for mb-robot: slot invariants, the state machine, and the
//! traffic board's collision rules.

use mb_core::{DeliveryError, DeliverySink, Floor, MailId, MailItem, Mailroom, RobotId, Tick};

use crate::{Robot, RobotError, RobotState, TrafficBoard, SLOT_MAX_WEIGHT_GRAMS};

// ── Helpers ───────────────────────────────────────────────────────────────────

const MAILROOM: Floor = Floor::GROUND;

fn item(id: u32, dest: u32, weight: u32) -> MailItem {
    MailItem::new(MailId(id), Tick::ZERO, Floor(dest), weight, false)
}

fn fragile(id: u32, dest: u32, weight: u32) -> MailItem {
    MailItem::new(MailId(id), Tick::ZERO, Floor(dest), weight, true)
}

/// A fragile-aware, caution-enabled robot parked at the mailroom.
fn robot(id: u32) -> Robot {
    Robot::new(RobotId(id), MAILROOM, true, true)
}

fn board(robot_count: usize) -> TrafficBoard {
    TrafficBoard::new(robot_count, MAILROOM)
}

/// Records every delivery and rejection without enforcing exactly-once.
#[derive(Default)]
struct RecordingSink {
    delivered: Vec<(Tick, MailItem)>,
    rejected:  Vec<(Tick, MailItem)>,
}

impl DeliverySink for RecordingSink {
    fn deliver(&mut self, now: Tick, item: MailItem) -> Result<(), DeliveryError> {
        self.delivered.push((now, item));
        Ok(())
    }

    fn reject(&mut self, now: Tick, item: MailItem) -> Result<(), DeliveryError> {
        self.rejected.push((now, item));
        Ok(())
    }
}

/// Records pool traffic from returning robots.
#[derive(Default)]
struct RecordingRoom {
    returned: Vec<MailItem>,
    idle:     Vec<RobotId>,
}

impl Mailroom for RecordingRoom {
    fn put_back(&mut self, item: MailItem) {
        self.returned.push(item);
    }

    fn register_idle(&mut self, robot: RobotId) {
        self.idle.push(robot);
    }
}

/// Step `robot` once with throwaway tick numbering.
fn step(
    robot: &mut Robot,
    board: &mut TrafficBoard,
    room:  &mut RecordingRoom,
    sink:  &mut RecordingSink,
) {
    robot.step(Tick::ZERO, board, room, sink).unwrap();
}

// ── Slot mutators ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod slots {
    use super::*;

    #[test]
    fn overweight_item_rejected_slot_unchanged() {
        let mut r = robot(0);
        let heavy = item(0, 3, SLOT_MAX_WEIGHT_GRAMS + 1);
        let err = r.load_hand(heavy).unwrap_err();
        assert!(matches!(err, RobotError::ItemTooHeavy { .. }));
        assert!(r.hand_empty(), "failed load must leave the slot unchanged");

        let err = r.load_special(fragile(1, 3, 9000)).unwrap_err();
        assert!(matches!(err, RobotError::ItemTooHeavy { .. }));
        assert!(r.special_empty());
    }

    #[test]
    fn weight_limit_is_inclusive() {
        let mut r = robot(0);
        r.load_hand(item(0, 3, SLOT_MAX_WEIGHT_GRAMS)).unwrap();
        assert!(!r.hand_empty());
    }

    #[test]
    fn fragile_refused_by_hand_and_tube() {
        let mut r = robot(0);
        let err = r.load_hand(fragile(0, 3, 100)).unwrap_err();
        assert!(matches!(err, RobotError::FragileInCarrySlot(MailId(0))));

        r.load_hand(item(1, 3, 100)).unwrap();
        let err = r.load_tube(fragile(2, 3, 100)).unwrap_err();
        assert!(matches!(err, RobotError::FragileInCarrySlot(MailId(2))));
        assert!(r.tube_empty());
    }

    #[test]
    fn fragile_accepted_by_special() {
        let mut r = robot(0);
        r.load_special(fragile(0, 3, 100)).unwrap();
        assert!(!r.special_empty());
    }

    #[test]
    fn tube_requires_loaded_hand() {
        let mut r = robot(0);
        let err = r.load_tube(item(0, 3, 100)).unwrap_err();
        assert!(matches!(err, RobotError::TubeWithoutHand(RobotId(0))));
    }

    #[test]
    fn occupied_slot_refuses_second_item() {
        let mut r = robot(0);
        r.load_hand(item(0, 3, 100)).unwrap();
        let err = r.load_hand(item(1, 4, 100)).unwrap_err();
        assert!(matches!(err, RobotError::SlotOccupied { .. }));
        // The original occupant survives.
        assert_eq!(r.hand().unwrap().id(), MailId(0));
    }
}

// ── State machine: ordinary deliveries ────────────────────────────────────────

#[cfg(test)]
mod state_machine {
    use super::*;

    #[test]
    fn fresh_robot_registers_idle() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        step(&mut r, &mut b, &mut room, &mut sink);
        assert_eq!(r.state(), RobotState::Waiting);
        assert_eq!(room.idle, vec![RobotId(0)]);
    }

    #[test]
    fn waiting_without_dispatch_stays_put() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        step(&mut r, &mut b, &mut room, &mut sink);
        r.load_hand(item(0, 2, 100)).unwrap();
        // Loaded but never dispatched.
        step(&mut r, &mut b, &mut room, &mut sink);
        assert_eq!(r.state(), RobotState::Waiting);
    }

    #[test]
    fn two_item_trip_delivers_hand_then_tube() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        step(&mut r, &mut b, &mut room, &mut sink);

        r.load_hand(item(10, 2, 100)).unwrap();
        r.load_tube(item(11, 1, 100)).unwrap();
        r.dispatch();

        step(&mut r, &mut b, &mut room, &mut sink); // Waiting -> Delivering
        assert_eq!(r.state(), RobotState::Delivering);
        assert_eq!(b.destination_of(RobotId(0)), Floor(2));

        step(&mut r, &mut b, &mut room, &mut sink); // F0 -> F1
        step(&mut r, &mut b, &mut room, &mut sink); // F1 -> F2
        assert_eq!(b.floor_of(RobotId(0)), Floor(2));

        step(&mut r, &mut b, &mut room, &mut sink); // deliver hand, tube -> hand
        assert_eq!(sink.delivered.len(), 1);
        assert_eq!(r.state(), RobotState::Delivering);
        assert_eq!(b.destination_of(RobotId(0)), Floor(1));
        assert!(r.tube_empty());

        step(&mut r, &mut b, &mut room, &mut sink); // F2 -> F1
        step(&mut r, &mut b, &mut room, &mut sink); // deliver second item
        assert_eq!(r.state(), RobotState::Returning);

        step(&mut r, &mut b, &mut room, &mut sink); // F1 -> F0
        step(&mut r, &mut b, &mut room, &mut sink); // re-register
        assert_eq!(r.state(), RobotState::Waiting);

        let delivered: Vec<MailId> = sink.delivered.iter().map(|(_, i)| i.id()).collect();
        assert_eq!(delivered, vec![MailId(10), MailId(11)], "hand before tube");
        assert_eq!(room.idle, vec![RobotId(0), RobotId(0)]);
    }

    #[test]
    fn hand_always_loaded_while_tube_occupied() {
        // Slot-exclusivity property over a whole trip.
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        step(&mut r, &mut b, &mut room, &mut sink);
        r.load_hand(item(0, 3, 100)).unwrap();
        r.load_tube(item(1, 2, 100)).unwrap();
        r.dispatch();
        for _ in 0..12 {
            step(&mut r, &mut b, &mut room, &mut sink);
            assert!(r.tube_empty() || !r.hand_empty());
        }
    }

    #[test]
    fn reaching_mailroom_runs_dispatch_check_same_tick() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        // Loaded and dispatched while still Returning: one step must both
        // register the robot and start the route.
        r.load_hand(item(0, 4, 100)).unwrap();
        r.dispatch();
        step(&mut r, &mut b, &mut room, &mut sink);
        assert_eq!(r.state(), RobotState::Delivering);
        assert_eq!(room.idle, vec![RobotId(0)]);
        assert_eq!(b.destination_of(RobotId(0)), Floor(4));
    }

    #[test]
    fn stranded_tube_item_returns_to_pool() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        r.load_hand(item(0, 2, 100)).unwrap();
        r.load_tube(item(1, 5, 100)).unwrap();
        // Returning at the mailroom with a full tube: the tube load goes
        // back to the pool before the robot re-registers.
        step(&mut r, &mut b, &mut room, &mut sink);
        assert_eq!(room.returned.len(), 1);
        assert_eq!(room.returned[0].id(), MailId(1));
        assert!(r.tube_empty());
        assert!(!r.hand_empty());
    }

    #[test]
    fn returning_moves_one_floor_per_tick() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        b.place(RobotId(0), Floor(3));
        step(&mut r, &mut b, &mut room, &mut sink);
        assert_eq!(b.floor_of(RobotId(0)), Floor(2));
        assert_eq!(r.state(), RobotState::Returning);
    }

    #[test]
    fn fourth_delivery_without_redispatch_faults() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        step(&mut r, &mut b, &mut room, &mut sink);

        // Destination = mailroom floor, so every step is a delivery; the
        // tube is refilled mid-trip so the counter never resets.
        r.load_hand(item(0, 0, 100)).unwrap();
        r.load_tube(item(1, 0, 100)).unwrap();
        r.dispatch();
        step(&mut r, &mut b, &mut room, &mut sink); // -> Delivering
        for id in 2..4 {
            step(&mut r, &mut b, &mut room, &mut sink); // deliver, tube -> hand
            r.load_tube(item(id, 0, 100)).unwrap();
        }
        step(&mut r, &mut b, &mut room, &mut sink); // third delivery — still legal
        assert_eq!(sink.delivered.len(), 3);

        let err = r
            .step(Tick::ZERO, &mut b, &mut room, &mut sink)
            .unwrap_err();
        assert!(matches!(err, RobotError::ExcessiveDelivery { count: 4, .. }));
    }
}

// ── State machine: fragile flow ───────────────────────────────────────────────

#[cfg(test)]
mod fragile_flow {
    use super::*;

    #[test]
    fn wrap_takes_two_ticks_then_reserves() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        step(&mut r, &mut b, &mut room, &mut sink);
        r.load_special(fragile(7, 3, 200)).unwrap();
        r.dispatch();

        step(&mut r, &mut b, &mut room, &mut sink); // -> Delivering
        assert_eq!(b.destination_of(RobotId(0)), Floor(3));

        step(&mut r, &mut b, &mut room, &mut sink); // wrap pre-empts movement
        assert_eq!(r.state(), RobotState::WrapStage1);
        assert_eq!(b.floor_of(RobotId(0)), MAILROOM, "no movement while wrapping");
        assert!(!r.special().unwrap().is_wrapped());

        step(&mut r, &mut b, &mut room, &mut sink); // latency tick
        assert_eq!(r.state(), RobotState::WrapStage2);
        assert_eq!(b.floor_of(RobotId(0)), MAILROOM);
        assert!(!r.special().unwrap().is_wrapped());

        step(&mut r, &mut b, &mut room, &mut sink); // wrap completes
        assert_eq!(r.state(), RobotState::Delivering);
        assert!(r.special().unwrap().is_wrapped());
        assert_eq!(b.reserved_floor(RobotId(0)), Some(Floor(3)));
        assert!(b.has_floor_priority(RobotId(0), Floor(3)));
    }

    #[test]
    fn fragile_trip_delivers_unwrapped_and_releases() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        step(&mut r, &mut b, &mut room, &mut sink);
        r.load_special(fragile(7, 2, 200)).unwrap();
        r.dispatch();

        step(&mut r, &mut b, &mut room, &mut sink); // -> Delivering
        step(&mut r, &mut b, &mut room, &mut sink); // -> WrapStage1
        step(&mut r, &mut b, &mut room, &mut sink); // -> WrapStage2
        step(&mut r, &mut b, &mut room, &mut sink); // wrap completes -> Delivering
        for _ in 0..2 {
            step(&mut r, &mut b, &mut room, &mut sink); // F0 -> F1 -> F2
            assert!(r.special().unwrap().is_wrapped(), "wrapped for the whole ride");
        }
        assert_eq!(b.floor_of(RobotId(0)), Floor(2));

        step(&mut r, &mut b, &mut room, &mut sink); // at destination -> DeliverFragile
        assert_eq!(r.state(), RobotState::DeliverFragile);

        step(&mut r, &mut b, &mut room, &mut sink); // hand-off
        assert_eq!(sink.delivered.len(), 1);
        assert!(!sink.delivered[0].1.is_wrapped(), "unwrapped before hand-off");
        assert_eq!(b.reserved_floor(RobotId(0)), None);
        assert!(!b.has_floor_priority(RobotId(0), Floor(2)));
        assert_eq!(r.state(), RobotState::Returning);
    }

    #[test]
    fn hand_item_still_delivered_after_fragile_handoff() {
        let mut r = robot(0);
        let (mut b, mut room, mut sink) = (board(1), RecordingRoom::default(), RecordingSink::default());
        step(&mut r, &mut b, &mut room, &mut sink);
        r.load_special(fragile(1, 1, 200)).unwrap();
        r.load_hand(item(2, 3, 200)).unwrap();
        r.dispatch();

        // Route targets the special item's floor first.
        step(&mut r, &mut b, &mut room, &mut sink);
        assert_eq!(b.destination_of(RobotId(0)), Floor(1));

        // Wrap (3 ticks), move (1 tick), switch state (1 tick), hand off.
        for _ in 0..6 {
            step(&mut r, &mut b, &mut room, &mut sink);
        }
        assert_eq!(sink.delivered.len(), 1);
        assert_eq!(sink.delivered[0].1.id(), MailId(1));
        // The robot re-routes to the hand item instead of returning.
        assert_eq!(r.state(), RobotState::Delivering);
        assert_eq!(b.destination_of(RobotId(0)), Floor(3));

        for _ in 0..3 {
            step(&mut r, &mut b, &mut room, &mut sink); // F1 -> F2 -> F3, deliver
        }
        assert_eq!(sink.delivered.len(), 2);
        assert_eq!(sink.delivered[1].1.id(), MailId(2));
        assert_eq!(r.state(), RobotState::Returning);
    }
}

// ── Traffic board: movement + collision arbitration ───────────────────────────

#[cfg(test)]
mod movement {
    use super::*;

    #[test]
    fn advance_steps_toward_target() {
        let mut b = board(1);
        assert!(b.try_advance(RobotId(0), Floor(3)));
        assert_eq!(b.floor_of(RobotId(0)), Floor(1));
    }

    #[test]
    fn advance_at_target_is_a_no_op() {
        let mut b = board(1);
        b.place(RobotId(0), Floor(3));
        assert!(!b.try_advance(RobotId(0), Floor(3)));
        assert_eq!(b.floor_of(RobotId(0)), Floor(3));
    }

    #[test]
    fn predicted_next_ignores_collisions() {
        let mut b = board(2);
        b.place(RobotId(0), Floor(2));
        b.set_destination(RobotId(0), Floor(5));
        assert_eq!(b.predicted_next(RobotId(0)), Floor(3));
        b.set_destination(RobotId(0), Floor(2));
        assert_eq!(b.predicted_next(RobotId(0)), Floor(2));
    }

    #[test]
    fn occupied_floor_with_priority_holder_blocks() {
        let mut b = board(2);
        // Robot 1 stands on its reserved destination with priority.
        b.place(RobotId(1), Floor(3));
        b.set_destination(RobotId(1), Floor(3));
        b.set_priority(RobotId(1), true);

        b.place(RobotId(0), Floor(2));
        b.set_destination(RobotId(0), Floor(5));
        assert!(!b.try_advance(RobotId(0), Floor(5)));
        assert_eq!(b.floor_of(RobotId(0)), Floor(2));
    }

    #[test]
    fn own_priority_blocks_entering_occupied_destination() {
        let mut b = board(2);
        // Robot 1 simply stands on floor 3, no claims.
        b.place(RobotId(1), Floor(3));
        // Robot 0 is delivering a fragile item to floor 3.
        b.place(RobotId(0), Floor(2));
        b.set_destination(RobotId(0), Floor(3));
        b.set_priority(RobotId(0), true);
        assert!(!b.try_advance(RobotId(0), Floor(3)), "waits for the floor to clear");
    }

    #[test]
    fn occupied_floor_without_any_priority_is_passable() {
        let mut b = board(2);
        b.place(RobotId(1), Floor(3));
        b.place(RobotId(0), Floor(2));
        b.set_destination(RobotId(0), Floor(5));
        assert!(b.try_advance(RobotId(0), Floor(5)));
        assert_eq!(b.floor_of(RobotId(0)), Floor(3));
    }

    /// Synthetic head-on scenario: two fragile deliveries converging on the
    /// same floor under symmetric conditions.  The lower id always moves.
    #[test]
    fn symmetric_convergence_lower_id_wins() {
        let mut b = board(2);
        for (id, from) in [(RobotId(0), Floor(2)), (RobotId(1), Floor(4))] {
            b.place(id, from);
            b.set_destination(id, Floor(3));
            b.set_priority(id, true);
            b.reserve(id, Floor(3));
        }

        assert!(b.try_advance(RobotId(0), Floor(3)), "lower id moves");
        assert_eq!(b.floor_of(RobotId(0)), Floor(3));

        assert!(!b.try_advance(RobotId(1), Floor(3)), "higher id holds");
        assert_eq!(b.floor_of(RobotId(1)), Floor(4));
    }

    #[test]
    fn priority_beats_lower_id() {
        let mut b = board(2);
        // Robot 1 converges on its reserved floor 3 with priority.
        b.place(RobotId(1), Floor(4));
        b.set_destination(RobotId(1), Floor(3));
        b.set_priority(RobotId(1), true);
        b.reserve(RobotId(1), Floor(3));
        // Robot 0 is merely passing through floor 3.
        b.place(RobotId(0), Floor(2));
        b.set_destination(RobotId(0), Floor(6));

        assert!(!b.try_advance(RobotId(0), Floor(6)), "priority holder goes first");
        assert_eq!(b.floor_of(RobotId(0)), Floor(2));
    }

    #[test]
    fn reservation_without_convergence_does_not_block() {
        let mut b = board(2);
        // Robot 1 reserved floor 3 but is walking away from it this tick.
        b.place(RobotId(1), Floor(5));
        b.set_destination(RobotId(1), Floor(7));
        b.reserve(RobotId(1), Floor(3));

        b.place(RobotId(0), Floor(2));
        b.set_destination(RobotId(0), Floor(4));
        assert!(b.try_advance(RobotId(0), Floor(4)));
    }
}
