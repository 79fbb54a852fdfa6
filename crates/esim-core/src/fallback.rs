//! First-success-wins chain of strategies.
//!
//! A `FallbackChain` holds an ordered list of strategies. Running it tries each
//! strategy in turn and stops at the first success. Intermediate failures are
//! logged and dropped; only the last one survives, for reporting after the
//! chain is exhausted. Every strategy is tried at most once.

use std::fmt::{Debug, Display};

/// Successful run of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSuccess<'a, S, T> {
    /// Position of the winning strategy in the chain.
    pub index: usize,
    pub strategy: &'a S,
    pub value: T,
}

impl<S, T> ChainSuccess<'_, S, T> {
    /// Number of strategies tried, including the winner.
    pub const fn attempts(&self) -> usize {
        self.index + 1
    }
}

/// Every strategy in the chain failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainExhausted<E> {
    pub attempts: usize,
    /// Error of the last strategy tried; `None` only for an empty chain.
    pub last_error: Option<E>,
}

/// Ordered list of strategies tried until one succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain<S> {
    strategies: Vec<S>,
}

impl<S> FallbackChain<S> {
    pub const fn new(strategies: Vec<S>) -> Self {
        Self { strategies }
    }

    /// Try `attempt` with each strategy in order.
    pub fn run<T, E, F>(&self, mut attempt: F) -> Result<ChainSuccess<'_, S, T>, ChainExhausted<E>>
    where
        S: Debug,
        E: Display,
        F: FnMut(&S) -> Result<T, E>,
    {
        let mut last_error = None;
        for (index, strategy) in self.strategies.iter().enumerate() {
            match attempt(strategy) {
                Ok(value) => {
                    return Ok(ChainSuccess {
                        index,
                        strategy,
                        value,
                    });
                }
                Err(e) => {
                    tracing::debug!(index, ?strategy, error = %e, "fallback strategy failed");
                    last_error = Some(e);
                }
            }
        }

        Err(ChainExhausted {
            attempts: self.strategies.len(),
            last_error,
        })
    }
}
