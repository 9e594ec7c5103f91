mod attribute;
pub use attribute::Attribute;

mod run_state;
pub use run_state::RunState;

mod policy;
pub use policy::UnmatchedPolicy;
