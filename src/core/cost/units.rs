use std::fmt;
use std::str::FromStr;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Convert a per-token price to a per-million-tokens price.
pub fn per_token_to_per_million(price: f64) -> f64 {
    price * TOKENS_PER_MILLION
}

/// Convert a per-million-tokens price to a per-token price.
pub fn per_million_to_per_token(price: f64) -> f64 {
    price / TOKENS_PER_MILLION
}

/// Unit an operator types prices in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceUnit {
    PerToken,
    #[default]
    PerMillion,
}

impl PriceUnit {
    /// Normalize a price in this unit to the per-million unit models are stored in.
    pub fn to_per_million(self, price: f64) -> f64 {
        match self {
            Self::PerToken => per_token_to_per_million(price),
            Self::PerMillion => price,
        }
    }
}

impl FromStr for PriceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "token" | "per-token" | "per_token" => Ok(Self::PerToken),
            "million" | "per-million" | "per_million" | "mtok" => Ok(Self::PerMillion),
            other => Err(format!(
                "invalid price unit '{}' (must be 'token' or 'million')",
                other
            )),
        }
    }
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerToken => write!(f, "per-token"),
            Self::PerMillion => write!(f, "per-million"),
        }
    }
}
