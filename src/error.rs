/// failure kinds surfaced by the planner. all of them are fatal for the
/// planning step that raised them; the driver decides whether to replan,
/// reseed the belief, or give up.
#[derive(Debug)]
pub enum Error {
    /// the belief holds zero particles consistent with the real trajectory,
    /// so no amount of resampling can recover a posterior
    ParticleDeprivation,
    /// a particle-filter operation was invoked on a histogram belief
    BeliefMismatch,
    /// the tree's recorded history disagrees with the agent's history
    InvalidHistory,
    /// propagated from the domain models
    Domain(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::ParticleDeprivation => write!(f, "particle deprivation"),
            Error::BeliefMismatch => write!(f, "belief is not represented in particles"),
            Error::InvalidHistory => write!(f, "tree history disagrees with agent history"),
            Error::Domain(e) => write!(f, "domain failure: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Domain(e) => e.source(),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        Error::Domain(e)
    }
}
