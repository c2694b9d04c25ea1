//! The staking engine: collaborators plus options, shared by the state
//! aggregator and the draft builder.

use crate::chain::{AccountStore, ChainReader, TransferPipeline};

/// Engine behavior switches.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineOptions {
    /// Developer-only: pretend instant liquid withdrawal is unavailable,
    /// to exercise delayed-withdrawal UI paths.
    pub simulate_liquid_delay: bool,
}

/// Staking engine over a chain reader, a transfer pipeline and an account
/// store.
///
/// The aggregation methods live in [`crate::aggregator`], the draft
/// operations in [`crate::draft`].
pub struct StakingEngine<R, P, S> {
    pub(crate) reader: R,
    pub(crate) pipeline: P,
    pub(crate) store: S,
    pub(crate) options: EngineOptions,
}

impl<R, P, S> StakingEngine<R, P, S>
where
    R: ChainReader,
    P: TransferPipeline,
    S: AccountStore,
{
    pub fn new(reader: R, pipeline: P, store: S) -> Self {
        Self {
            reader,
            pipeline,
            store,
            options: EngineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
