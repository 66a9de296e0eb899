use mb_core::{DeliveryError, RobotId};
use mb_robot::RobotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PoolError {
    /// A robot registered as idle while still carrying items.  Robots only
    /// register after unloading, so this flags a broken state machine.
    #[error("robot {0} registered idle while still loaded")]
    IdleNotEmpty(RobotId),

    #[error(transparent)]
    Robot(#[from] RobotError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

pub type PoolResult<T> = Result<T, PoolError>;
