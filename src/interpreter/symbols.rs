use std::collections::HashMap;

use tracing::warn;

use crate::error::FatalError;

/// A user-defined function: the line index where its body starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Function {
    /// Index of the first line after the `invoke` line.
    pub start:      usize,
    /// Index of the `invoke` line itself.
    pub definition: usize,
}

/// Maps function names to their bodies.
///
/// A second definition of the same name replaces the first.
#[derive(Debug, Default, Clone)]
pub struct FunctionTable {
    functions: HashMap<String, Function>,
}

impl FunctionTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`. A previous definition of the same name is shadowed.
    ///
    /// # Errors
    /// `MemoryExhaustion` if the table cannot grow.
    pub fn define(&mut self, name: &str, function: Function) -> Result<(), FatalError> {
        if let Some(previous) = self.functions.get_mut(name) {
            warn!(name,
                  previous = previous.definition + 1,
                  line = function.definition + 1,
                  "function redefined; the later definition wins");
            *previous = function;
            return Ok(());
        }

        self.functions
            .try_reserve(1)
            .map_err(|_| FatalError::MemoryExhaustion { line: function.definition + 1 })?;
        self.functions.insert(name.to_string(), function);
        Ok(())
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    /// Number of distinct function names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Returns `true` if no function is defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

/// The single global variable namespace.
///
/// Values are always strings. Defining an existing name overwrites its value
/// in place.
#[derive(Debug, Default, Clone)]
pub struct VariableTable {
    variables: HashMap<String, String>,
}

impl VariableTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `name` or overwrites its value.
    ///
    /// # Errors
    /// `MemoryExhaustion` if the table cannot grow; `line` is used for the
    /// report.
    ///
    /// # Example
    /// ```
    /// use orthoc::interpreter::symbols::VariableTable;
    ///
    /// let mut variables = VariableTable::new();
    /// variables.define("x", "1", 1).unwrap();
    /// variables.define("x", "2", 2).unwrap();
    /// assert_eq!(variables.len(), 1);
    /// assert_eq!(variables.get("x"), Some("2"));
    /// ```
    pub fn define(&mut self, name: &str, value: &str, line: usize) -> Result<(), FatalError> {
        if let Some(existing) = self.variables.get_mut(name) {
            value.clone_into(existing);
            return Ok(());
        }

        self.variables
            .try_reserve(1)
            .map_err(|_| FatalError::MemoryExhaustion { line })?;
        self.variables.insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Returns the value of `name`, if declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// Number of declared variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
