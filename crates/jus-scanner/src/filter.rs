use crate::error::Result;
use jus_core::StateCode;
use jus_gazette::{GazetteRegistry, GazetteSite};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateFilter {
    All,
    States(Vec<StateCode>),
}

impl StateFilter {
    /// Parse raw state codes. An empty list means every site.
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        if codes.is_empty() {
            return Ok(Self::All);
        }

        let states = codes
            .iter()
            .map(StateCode::new)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self::States(states))
    }

    pub fn matches(&self, site: &GazetteSite) -> bool {
        match self {
            Self::All => true,
            Self::States(states) => states.contains(&site.state),
        }
    }

    /// Sites to scan, in registry order.
    pub fn apply(&self, registry: &GazetteRegistry) -> Vec<GazetteSite> {
        match self {
            Self::All => registry.get_all(),
            Self::States(states) if states.is_empty() => registry.get_all(),
            Self::States(states) => registry.filter_by_states(states),
        }
    }
}
