//! Resource bounds for a single parse.

/// Fuel limits for parse execution.
///
/// Exec fuel counts rule applications across the whole parse. The recursion
/// limit bounds how deeply rule applications nest. Hitting either aborts the
/// parse with the matching [`ParseError`](super::ParseError).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuelLimits {
    /// Maximum rule applications (default: unlimited).
    pub(crate) exec_fuel: Option<u32>,
    /// Maximum nesting depth (default: 1,024).
    pub(crate) recursion_limit: u32,
}

impl Default for FuelLimits {
    fn default() -> Self {
        Self {
            exec_fuel: None,
            recursion_limit: 1024,
        }
    }
}

impl FuelLimits {
    /// Create new fuel limits with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution fuel limit.
    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = Some(fuel);
        self
    }

    /// Remove the execution fuel limit.
    pub fn unlimited_exec_fuel(mut self) -> Self {
        self.exec_fuel = None;
        self
    }

    /// Set the recursion limit.
    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_exec_fuel(&self) -> Option<u32> {
        self.exec_fuel
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}
