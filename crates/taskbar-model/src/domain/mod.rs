mod error;
pub use error::ModelError;

mod value;
pub use value::{ConfigMap, ConfigValue};

mod document;
pub use document::ConfigDocument;

mod scope;
pub use scope::{ConfigScope, FolderId};

mod platform;
pub use platform::Platform;

mod runtime_task;
pub use runtime_task::{PLACEHOLDER_TYPES, RuntimeTask, TaskDefinition, TaskSource};

mod identity;
pub use identity::{SEPARATOR, TaskIdentity};

mod indicator;
pub use indicator::{IndicatorColor, IndicatorCommand, IndicatorDescriptor, IndicatorLook, PickEntry};

mod diagnostic;
pub use diagnostic::{Diagnostic, DiagnosticKind};
