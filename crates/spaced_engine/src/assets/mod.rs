//! Asset management
//!
//! The engine does not parse model or texture files itself; the asset
//! pipeline is an external collaborator. What lives here is the shared
//! model registry handing out cheap copyable handles, owned by the
//! composition root rather than hiding behind a process-wide singleton.

mod model_cache;

pub use model_cache::{ModelCache, ModelData, ModelId};
