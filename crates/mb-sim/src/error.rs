use mb_pool::PoolError;
use mb_robot::RobotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Robot(#[from] RobotError),
}

pub type SimResult<T> = Result<T, SimError>;
