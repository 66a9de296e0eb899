//! The delivery robot: three item slots and a six-state machine.
//!
//! # States
//!
//! ```text
//! Returning ──at mailroom──▶ Waiting ──dispatched──▶ Delivering
//!     ▲                                                  │
//!     │                    unwrapped special ─▶ WrapStage1 ─▶ WrapStage2 ─┐
//!     │                                                  ◀───────────────┘
//!     └── tube empty ── deliver hand ◀── at destination ──▶ DeliverFragile
//! ```
//!
//! One `step` call per tick processes exactly one state's logic, with a
//! single documented exception: a robot reaching the mailroom runs the
//! Waiting dispatch check in the same tick (an explicit two-phase step).
//!
//! # Slots
//!
//! `hand` and `tube` carry ordinary mail — hand is always loaded first and
//! delivered first.  `special` is the only slot that may hold a fragile
//! item, and a fragile item in flight is wrapped for the whole stretch
//! between the wrap stages and the hand-off.

use mb_core::{DeliverySink, Floor, MailItem, Mailroom, RobotId, Tick};

use crate::{RobotError, RobotResult, TrafficBoard};

/// Heaviest item any single slot accepts, in grams.
pub const SLOT_MAX_WEIGHT_GRAMS: u32 = 2000;

/// Deliveries one robot may make between dispatches: hand + tube + special.
pub const TRIP_DELIVERY_LIMIT: u32 = 3;

// ── Slots ─────────────────────────────────────────────────────────────────────

/// Names a robot's three item-holding positions, for diagnostics.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Slot {
    Hand,
    Tube,
    Special,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Slot::Hand    => "hand",
            Slot::Tube    => "tube",
            Slot::Special => "special",
        })
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

/// The robot's delivery state.  No terminal state — the machine cycles for
/// the life of the run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RobotState {
    /// Heading back to the mailroom.
    Returning,
    /// At the mailroom, registered idle, waiting for a dispatch.
    Waiting,
    /// Carrying a load toward the current destination.
    Delivering,
    /// First wrapping tick — pure latency.
    WrapStage1,
    /// Second wrapping tick — wraps the item and reserves its floor.
    WrapStage2,
    /// At the reserved floor, handing over the fragile item.
    DeliverFragile,
}

/// One delivery robot.
///
/// Slots and the state machine live here; current floor, destination,
/// floor-priority, and the fragile-floor reservation live in the shared
/// [`TrafficBoard`] so other robots can read them during movement planning.
pub struct Robot {
    id: RobotId,
    state: RobotState,
    mailroom: Floor,

    hand:    Option<MailItem>,
    tube:    Option<MailItem>,
    special: Option<MailItem>,

    dispatch_pending: bool,
    trip_deliveries:  u32,

    caution_enabled: bool,
    fragile_enabled: bool,
}

impl Robot {
    /// Create a robot parked at the mailroom in `Returning` state.
    ///
    /// `caution_enabled` and `fragile_enabled` are fixed for the robot's
    /// lifetime.
    pub fn new(id: RobotId, mailroom: Floor, caution_enabled: bool, fragile_enabled: bool) -> Self {
        Self {
            id,
            state: RobotState::Returning,
            mailroom,
            hand: None,
            tube: None,
            special: None,
            dispatch_pending: false,
            trip_deliveries: 0,
            caution_enabled,
            fragile_enabled,
        }
    }

    // ── Capability queries (read by the allocator) ────────────────────────

    #[inline]
    pub fn id(&self) -> RobotId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> RobotState {
        self.state
    }

    #[inline]
    pub fn caution_enabled(&self) -> bool {
        self.caution_enabled
    }

    #[inline]
    pub fn fragile_enabled(&self) -> bool {
        self.fragile_enabled
    }

    pub fn hand_empty(&self) -> bool {
        self.hand.is_none()
    }

    pub fn tube_empty(&self) -> bool {
        self.tube.is_none()
    }

    pub fn special_empty(&self) -> bool {
        self.special.is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.hand.is_none() && self.tube.is_none() && self.special.is_none()
    }

    pub fn hand(&self) -> Option<&MailItem> {
        self.hand.as_ref()
    }

    pub fn tube(&self) -> Option<&MailItem> {
        self.tube.as_ref()
    }

    pub fn special(&self) -> Option<&MailItem> {
        self.special.as_ref()
    }

    // ── Slot mutators (called by the allocator) ───────────────────────────

    /// Load an ordinary item into the hand.
    pub fn load_hand(&mut self, item: MailItem) -> RobotResult<()> {
        if self.hand.is_some() {
            return Err(RobotError::SlotOccupied { robot: self.id, slot: Slot::Hand });
        }
        Self::reject_fragile(&item)?;
        Self::check_weight(&item)?;
        self.hand = Some(item);
        Ok(())
    }

    /// Load an ordinary item into the tube.  The hand must already be full.
    pub fn load_tube(&mut self, item: MailItem) -> RobotResult<()> {
        if self.tube.is_some() {
            return Err(RobotError::SlotOccupied { robot: self.id, slot: Slot::Tube });
        }
        if self.hand.is_none() {
            return Err(RobotError::TubeWithoutHand(self.id));
        }
        Self::reject_fragile(&item)?;
        Self::check_weight(&item)?;
        self.tube = Some(item);
        Ok(())
    }

    /// Load an item into the special slot — the only slot fragile mail may
    /// occupy.
    pub fn load_special(&mut self, item: MailItem) -> RobotResult<()> {
        if self.special.is_some() {
            return Err(RobotError::SlotOccupied { robot: self.id, slot: Slot::Special });
        }
        Self::check_weight(&item)?;
        self.special = Some(item);
        Ok(())
    }

    /// Tell a loaded, waiting robot to begin its route on its next step.
    pub fn dispatch(&mut self) {
        self.dispatch_pending = true;
    }

    /// `true` between [`Robot::dispatch`] and the step that consumes it.
    pub fn dispatch_pending(&self) -> bool {
        self.dispatch_pending
    }

    fn reject_fragile(item: &MailItem) -> RobotResult<()> {
        if item.is_fragile() {
            return Err(RobotError::FragileInCarrySlot(item.id()));
        }
        Ok(())
    }

    fn check_weight(item: &MailItem) -> RobotResult<()> {
        if item.weight_grams() > SLOT_MAX_WEIGHT_GRAMS {
            return Err(RobotError::ItemTooHeavy {
                mail:         item.id(),
                weight_grams: item.weight_grams(),
            });
        }
        Ok(())
    }

    // ── Per-tick step ─────────────────────────────────────────────────────

    /// Advance the state machine by one tick.
    pub fn step<M: Mailroom, D: DeliverySink>(
        &mut self,
        now:   Tick,
        board: &mut TrafficBoard,
        pool:  &mut M,
        sink:  &mut D,
    ) -> RobotResult<()> {
        match self.state {
            RobotState::Returning => {
                if board.floor_of(self.id) == self.mailroom {
                    // A stranded tube load goes back into the pool before the
                    // robot re-registers.
                    if let Some(stranded) = self.tube.take() {
                        pool.put_back(stranded);
                    }
                    pool.register_idle(self.id);
                    self.state = RobotState::Waiting;
                    // Two-phase step: the dispatch check runs in the same
                    // tick the robot reaches the mailroom.
                    self.check_dispatch(board);
                } else {
                    board.try_advance(self.id, self.mailroom);
                }
            }

            RobotState::Waiting => self.check_dispatch(board),

            RobotState::Delivering => self.delivering_step(now, board, sink)?,

            RobotState::WrapStage1 => {
                // Pure wrapping latency; the work happens next tick.
                self.state = RobotState::WrapStage2;
            }

            RobotState::WrapStage2 => {
                let item = self.special.as_mut().ok_or(RobotError::SlotEmpty {
                    robot: self.id,
                    slot:  Slot::Special,
                })?;
                item.wrap()?;
                let destination = board.destination_of(self.id);
                board.reserve(self.id, destination);
                board.set_priority(self.id, true);
                self.state = RobotState::Delivering;
            }

            RobotState::DeliverFragile => {
                let mut item = self.special.take().ok_or(RobotError::SlotEmpty {
                    robot: self.id,
                    slot:  Slot::Special,
                })?;
                item.unwrap_wrapping()?;
                sink.deliver(now, item)?;
                self.count_delivery()?;
                board.release(self.id);
                board.set_priority(self.id, false);
                match self.route_destination() {
                    Some(dest) => {
                        board.set_destination(self.id, dest);
                        self.state = RobotState::Delivering;
                    }
                    None => self.state = RobotState::Returning,
                }
            }
        }
        Ok(())
    }

    /// The `Waiting` check: consume a pending dispatch, reset the trip
    /// counter, and route toward the load.
    fn check_dispatch(&mut self, board: &mut TrafficBoard) {
        if self.is_empty() || !self.dispatch_pending {
            return;
        }
        self.dispatch_pending = false;
        self.trip_deliveries = 0;
        if let Some(dest) = self.route_destination() {
            board.set_destination(self.id, dest);
            self.state = RobotState::Delivering;
        }
    }

    fn delivering_step<D: DeliverySink>(
        &mut self,
        now:   Tick,
        board: &mut TrafficBoard,
        sink:  &mut D,
    ) -> RobotResult<()> {
        // An unwrapped fragile load pre-empts movement and delivery.
        if self.special.as_ref().is_some_and(|item| !item.is_wrapped()) {
            self.state = RobotState::WrapStage1;
            return Ok(());
        }

        let destination = board.destination_of(self.id);
        if board.floor_of(self.id) != destination {
            board.try_advance(self.id, destination);
            return Ok(());
        }

        // Fragile hand-offs get their own state (and tick).
        if self.special.is_some() {
            self.state = RobotState::DeliverFragile;
            return Ok(());
        }

        let item = self.hand.take().ok_or(RobotError::SlotEmpty {
            robot: self.id,
            slot:  Slot::Hand,
        })?;
        sink.deliver(now, item)?;
        self.count_delivery()?;

        match self.tube.take() {
            None => self.state = RobotState::Returning,
            Some(next) => {
                board.set_destination(self.id, next.destination());
                self.hand = Some(next);
            }
        }
        Ok(())
    }

    /// The route target: the special item's floor when present, else the
    /// hand item's.
    fn route_destination(&self) -> Option<Floor> {
        self.special
            .as_ref()
            .or(self.hand.as_ref())
            .map(MailItem::destination)
    }

    fn count_delivery(&mut self) -> RobotResult<()> {
        self.trip_deliveries += 1;
        if self.trip_deliveries > TRIP_DELIVERY_LIMIT {
            return Err(RobotError::ExcessiveDelivery {
                robot: self.id,
                count: self.trip_deliveries,
            });
        }
        Ok(())
    }
}
