use crate::{Actor, ActorError, Context, GetValue, Getter, Outcome};
use quay_types::Body;
use serde::{Deserialize, Serialize};
use std::any::Any;
use tracing::trace;

/// A signed accumulator.
///
/// Starts at zero and moves by the signed delta of each `Add` or
/// `Subtract`. The value may go negative. A delta that would take the value
/// outside the `i64` range is rejected and the value is left untouched.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    value: i64,
}

impl Counter {
    /// The code tag for counters.
    pub const CODE: &'static str = "counter";

    /// Create a counter at zero.
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// `getCounter()`
    pub const fn counter(&self) -> i64 {
        self.value
    }

    /// Add `number` to the counter, returning the new value.
    pub fn add(&mut self, number: i64) -> Result<i64, ActorError> {
        self.value =
            self.value.checked_add(number).ok_or(ActorError::ArithmeticOverflow { op: "add" })?;
        Ok(self.value)
    }

    /// Subtract `number` from the counter, returning the new value.
    pub fn subtract(&mut self, number: i64) -> Result<i64, ActorError> {
        self.value = self
            .value
            .checked_sub(number)
            .ok_or(ActorError::ArithmeticOverflow { op: "subtract" })?;
        Ok(self.value)
    }
}

impl Actor for Counter {
    fn code(&self) -> &'static str {
        Self::CODE
    }

    fn init_data(&self) -> Vec<u8> {
        Vec::new()
    }

    fn receive(&mut self, _ctx: &Context, body: &Body) -> Result<Outcome, ActorError> {
        let query_id = body.query_id();
        match body {
            Body::Deploy(_) => return Ok(Outcome::DeployOk { query_id }),
            Body::Add(m) => self.add(m.number)?,
            Body::Subtract(m) => self.subtract(m.number)?,
            _ => return Err(ActorError::UnhandledMessage { code: Self::CODE, kind: body.kind() }),
        };
        trace!(value = self.value, "counter updated");
        Ok(Outcome::Accepted { query_id })
    }

    fn get(&self, getter: &Getter) -> Result<GetValue, ActorError> {
        match getter {
            Getter::Counter => Ok(GetValue::Int(self.counter())),
            _ => Err(ActorError::UnhandledGetter { code: Self::CODE, getter: getter.name() }),
        }
    }

    fn save(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    fn load(&mut self, state: serde_json::Value) -> Result<(), serde_json::Error> {
        *self = serde_json::from_value(state)?;
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
