use crate::value::Value;
use std::collections::HashSet;
use tracing::debug;

/// A caller-supplied override of the equality decision.
///
/// `customize` is handed the top-level pair with `key == None`, then each key
/// pair. `Some(_)` rules on the pair; `None` declines and lets identity decide.
pub trait Customizer {
    fn customize(&mut self, a: &Value, b: &Value, key: Option<&str>) -> Option<bool>;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Customizer for F
where
    F: FnMut(&Value, &Value, Option<&str>) -> Option<bool>,
{
    fn customize(&mut self, a: &Value, b: &Value, key: Option<&str>) -> Option<bool> {
        self(a, b, key)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// One customizer invocation, as seen by a [`builtins::Recorder`].
#[derive(Debug, Clone)]
pub struct Call {
    pub a: Value,
    pub b: Value,
    pub key: Option<String>,
}

pub mod builtins {
    use super::*;
    use crate::comparison::same_value;

    /// Declares the listed keys equal no matter what they hold.
    #[derive(Debug, Clone, Default)]
    pub struct IgnoreKeys {
        keys: HashSet<String>,
    }

    impl IgnoreKeys {
        pub fn new<I, S>(keys: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self { keys: keys.into_iter().map(Into::into).collect() }
        }
    }

    impl Customizer for IgnoreKeys {
        fn customize(&mut self, _a: &Value, _b: &Value, key: Option<&str>) -> Option<bool> {
            key.filter(|k| self.keys.contains(*k)).map(|_| true)
        }

        fn name(&self) -> &str {
            "ignore_keys"
        }
    }

    /// Numbers within `epsilon` of each other are equal; anything else is
    /// left to identity.
    #[derive(Debug, Clone, Copy)]
    pub struct Tolerance {
        pub epsilon: f64,
    }

    impl Customizer for Tolerance {
        fn customize(&mut self, a: &Value, b: &Value, _key: Option<&str>) -> Option<bool> {
            match (a, b) {
                (Value::Number(x), Value::Number(y)) => {
                    Some(same_value(a, b) || (x - y).abs() <= self.epsilon)
                }
                _ => None,
            }
        }

        fn name(&self) -> &str {
            "tolerance"
        }
    }

    /// Keeps every call it sees and never rules.
    #[derive(Debug, Clone, Default)]
    pub struct Recorder {
        pub calls: Vec<Call>,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::default()
        }
    }

    impl Customizer for Recorder {
        fn customize(&mut self, a: &Value, b: &Value, key: Option<&str>) -> Option<bool> {
            self.calls.push(Call { a: a.clone(), b: b.clone(), key: key.map(str::to_owned) });
            None
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    /// Logs every pair at debug level, then defers to the inner customizer.
    pub struct Traced<C> {
        pub inner: C,
    }

    impl<C: Customizer> Customizer for Traced<C> {
        fn customize(&mut self, a: &Value, b: &Value, key: Option<&str>) -> Option<bool> {
            let verdict = self.inner.customize(a, b, key);
            debug!(
                customizer = self.inner.name(),
                key = key.unwrap_or("<root>"),
                left = %a,
                right = %b,
                ?verdict,
                "compared pair"
            );
            verdict
        }

        fn name(&self) -> &str {
            self.inner.name()
        }
    }

    /// Consults each customizer in order until one rules.
    #[derive(Default)]
    pub struct Chain {
        links: Vec<Box<dyn Customizer>>,
    }

    impl Chain {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with<C: Customizer + 'static>(mut self, c: C) -> Self {
            self.push(c);
            self
        }

        pub fn push<C: Customizer + 'static>(&mut self, c: C) {
            self.links.push(Box::new(c));
        }

        pub fn is_empty(&self) -> bool {
            self.links.is_empty()
        }
    }

    impl Customizer for Chain {
        fn customize(&mut self, a: &Value, b: &Value, key: Option<&str>) -> Option<bool> {
            self.links.iter_mut().find_map(|c| c.customize(a, b, key))
        }

        fn name(&self) -> &str {
            "chain"
        }
    }

    /// Adapts a closure returning an arbitrary value; `None` declines.
    ///
    /// On the top-level pair `Some(v)` rules by the truthiness of `v`. On a key
    /// pair only `false` itself rejects; any other value accepts the pair.
    pub struct Truthy<F>(pub F);

    impl<F> Customizer for Truthy<F>
    where
        F: FnMut(&Value, &Value, Option<&str>) -> Option<Value>,
    {
        fn customize(&mut self, a: &Value, b: &Value, key: Option<&str>) -> Option<bool> {
            let verdict = (self.0)(a, b, key)?;
            Some(match key {
                None => verdict.is_truthy(),
                Some(_) => !matches!(verdict, Value::Bool(false)),
            })
        }

        fn name(&self) -> &str {
            "truthy"
        }
    }
}
