use simpack_core::Simpack;

use super::InvalidSimpack;

/// Which of the four step-function slots a simpack fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub simple_non_history_step_defined: bool,
    pub non_history_step_generator_defined: bool,
    pub simple_history_step_defined: bool,
    pub history_step_generator_defined: bool,
}

impl Capabilities {
    /// Reads the filled slots of a simpack.
    #[must_use]
    pub fn of<S>(simpack: &Simpack<S>) -> Self {
        Self {
            simple_non_history_step_defined: simpack.step().is_some(),
            non_history_step_generator_defined: simpack.step_generator().is_some(),
            simple_history_step_defined: simpack.history_step().is_some(),
            history_step_generator_defined: simpack.history_step_generator().is_some(),
        }
    }

    #[must_use]
    pub fn non_history_step_defined(&self) -> bool {
        self.simple_non_history_step_defined || self.non_history_step_generator_defined
    }

    #[must_use]
    pub fn history_step_defined(&self) -> bool {
        self.simple_history_step_defined || self.history_step_generator_defined
    }

    #[must_use]
    pub fn simple_step_defined(&self) -> bool {
        self.simple_non_history_step_defined || self.simple_history_step_defined
    }

    #[must_use]
    pub fn step_generator_defined(&self) -> bool {
        self.non_history_step_generator_defined || self.history_step_generator_defined
    }

    /// Returns `true` if the simpack's steps consult history.
    #[must_use]
    pub fn history_dependent(&self) -> bool {
        self.history_step_defined()
    }

    /// Checks that the slots describe a usable simpack.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSimpack`] if both history-dependent and
    /// history-independent slots are filled, or if no slot is.
    pub fn validate(&self, simpack: &str) -> Result<(), InvalidSimpack> {
        if self.history_step_defined() && self.non_history_step_defined() {
            return Err(InvalidSimpack::MixedHistoryDependence {
                simpack: simpack.to_owned(),
            });
        }
        if !self.simple_step_defined() && !self.step_generator_defined() {
            return Err(InvalidSimpack::NoStepFunction {
                simpack: simpack.to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_flags() {
        let caps = Capabilities {
            non_history_step_generator_defined: true,
            ..Capabilities::default()
        };

        assert!(caps.non_history_step_defined());
        assert!(caps.step_generator_defined());
        assert!(!caps.simple_step_defined());
        assert!(!caps.history_dependent());
        assert!(caps.validate("gen").is_ok());

        let caps = Capabilities {
            simple_history_step_defined: true,
            ..Capabilities::default()
        };

        assert!(caps.history_dependent());
        assert!(caps.simple_step_defined());
        assert!(caps.validate("hist").is_ok());
    }

    #[test]
    fn rejects_mixed_and_empty() {
        let mixed = Capabilities {
            simple_non_history_step_defined: true,
            history_step_generator_defined: true,
            ..Capabilities::default()
        };

        assert_eq!(
            mixed.validate("mixed"),
            Err(InvalidSimpack::MixedHistoryDependence {
                simpack: "mixed".into()
            })
        );
        assert_eq!(
            Capabilities::default().validate("empty"),
            Err(InvalidSimpack::NoStepFunction {
                simpack: "empty".into()
            })
        );
    }
}
