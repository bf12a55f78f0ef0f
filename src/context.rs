use crate::errors::{EvalError, Result};
use crate::functions::builtins::{Chain, IgnoreKeys, Tolerance};
use crate::functions::Customizer;
use crate::value::Value;
use serde::Deserialize;
use std::path::Path;

/// A comparator bound to a receiver. The receiver is passed explicitly as the
/// first argument on every call.
pub struct Bound<'c, Ctx: ?Sized, F> {
    context: &'c Ctx,
    compare: F,
}

impl<'c, Ctx: ?Sized, F> Bound<'c, Ctx, F>
where
    F: FnMut(&Ctx, &Value, &Value, Option<&str>) -> Option<bool>,
{
    pub fn new(context: &'c Ctx, compare: F) -> Self {
        Self { context, compare }
    }
}

impl<'c, Ctx: ?Sized, F> Customizer for Bound<'c, Ctx, F>
where
    F: FnMut(&Ctx, &Value, &Value, Option<&str>) -> Option<bool>,
{
    fn customize(&mut self, a: &Value, b: &Value, key: Option<&str>) -> Option<bool> {
        (self.compare)(self.context, a, b, key)
    }

    fn name(&self) -> &str {
        "bound"
    }
}

/// Comparison knobs shared by the CLI and config files.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    /// Keys whose values are always considered equal.
    pub ignore_keys: Vec<String>,
    /// Numeric tolerance; `None` keeps same-value semantics for numbers.
    pub epsilon: Option<f64>,
    /// Log and report every pair handed to the customizer.
    pub explain: bool,
}

impl CompareOptions {
    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| EvalError::Options(e.to_string()))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EvalError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Layer `other` on top: keys accumulate, `epsilon` is replaced when set,
    /// `explain` is sticky.
    pub fn merge(mut self, other: CompareOptions) -> Self {
        for key in other.ignore_keys {
            if !self.ignore_keys.contains(&key) {
                self.ignore_keys.push(key);
            }
        }
        if other.epsilon.is_some() {
            self.epsilon = other.epsilon;
        }
        self.explain |= other.explain;
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.epsilon {
            Some(e) if !e.is_finite() || e < 0.0 => Err(EvalError::Options(format!(
                "epsilon must be a finite, non-negative number (got {e})"
            ))),
            _ => Ok(()),
        }
    }

    /// Build the customizer chain these options describe. An empty chain never
    /// rules, which leaves every decision to identity.
    pub fn customizer(&self) -> Result<Chain> {
        self.validate()?;
        let mut chain = Chain::new();
        if !self.ignore_keys.is_empty() {
            chain.push(IgnoreKeys::new(self.ignore_keys.iter().cloned()));
        }
        if let Some(epsilon) = self.epsilon {
            chain.push(Tolerance { epsilon });
        }
        Ok(chain)
    }
}
