pub mod bindings;
pub mod context;
pub mod error;
pub mod generator;
pub mod registry;
pub mod traits;

// Language emitters
pub mod emitters;

// Re-exports
pub use bindings::{Bindings, ErrorBinding, PACKAGE_NAME};
pub use context::EmitContext;
pub use error::CodegenError;
pub use generator::{CodeGenerator, GeneratedFile};
pub use registry::{EmitterRegistry, Language};
pub use traits::ErrorCodeEmitter;
