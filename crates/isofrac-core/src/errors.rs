use crate::FloatValue;
use thiserror::Error;

/// Error type for invalid model inputs and numerical failures.
#[derive(Error, Debug)]
pub enum IsoFracError {
    /// Physically invalid input, e.g. `h_eff >= 1` or a sublimation fraction outside `[0, 1]`.
    #[error("Invalid input: {0}")]
    Domain(String),
    #[error("Temperature {0} °C is at or below absolute zero")]
    BelowAbsoluteZero(FloatValue),
    /// A denominator vanished or a humidity reached zero part way through a calculation.
    #[error("Numerical failure: {0}")]
    Numerical(String),
    #[error("Could not parse parameters: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IsoFracError {
    pub fn domain(message: impl Into<String>) -> Self {
        IsoFracError::Domain(message.into())
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        IsoFracError::Numerical(message.into())
    }

    /// True for errors caused by physically invalid inputs.
    pub fn is_domain(&self) -> bool {
        matches!(
            self,
            IsoFracError::Domain(_) | IsoFracError::BelowAbsoluteZero(_)
        )
    }

    /// True for errors raised by vanishing denominators or exhausted vapour.
    pub fn is_numerical(&self) -> bool {
        matches!(self, IsoFracError::Numerical(_))
    }
}

/// Convenience type for `Result<T, IsoFracError>`.
pub type IsoFracResult<T> = Result<T, IsoFracError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(IsoFracError::domain("h_eff >= 1").is_domain());
        assert!(IsoFracError::BelowAbsoluteZero(-300.0).is_domain());
        assert!(IsoFracError::numerical("q = 0").is_numerical());
        assert!(!IsoFracError::numerical("q = 0").is_domain());
    }

    #[test]
    fn test_messages() {
        let err = IsoFracError::BelowAbsoluteZero(-280.0);
        assert_eq!(
            err.to_string(),
            "Temperature -280 °C is at or below absolute zero"
        );
        let err = IsoFracError::domain("sublimation fraction 1.5 is outside [0, 1]");
        assert_eq!(
            err.to_string(),
            "Invalid input: sublimation fraction 1.5 is outside [0, 1]"
        );
    }
}
