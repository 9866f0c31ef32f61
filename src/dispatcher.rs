pub use controller::{
    DispatchLimits,
    Dispatcher,
    RunError,
};
pub use outcome::{
    DispatchOutcome,
    PairOutcome,
    RunReport,
    RunSummary,
};

mod controller;
mod outcome;
