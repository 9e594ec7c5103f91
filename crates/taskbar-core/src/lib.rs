pub mod attrs;
pub use attrs::AttributeResolver;

pub mod config;
pub use config::EngineConfig;

pub mod debounce;
pub use debounce::{Debouncer, Schedule};

pub mod engine;
pub use engine::{Engine, PassReport, RunTarget};

pub mod error;
pub use error::{CoreError, HostError};

pub mod host;
pub use host::{ConfigSource, Host, HostEvent, StatusItem, TaskProvider, Ui};

pub mod identity;

pub mod matcher;
pub use matcher::{MatchReport, MatchedPair, TaskMatcher};

pub mod present;
pub use present::{IndicatorSnapshot, PresentationState};

pub mod resolve;
pub use resolve::{ConfigResolver, EffectiveTaskView};

pub mod sink;
pub use sink::{Collector, DiagnosticSink};
