pub mod chain;
pub mod priority;
pub mod registry;
pub mod traits;

pub use chain::{ChainState, ChangeGeneratorChain};
pub use priority::PriorityComparator;
pub use registry::{GeneratorRegistry, RegisteredGenerator};
pub use traits::{
    Capability, ChainStep, ChangeGenerator, ChangedObjectChangeGenerator, GeneratorType,
    MissingObjectChangeGenerator, UnexpectedObjectChangeGenerator,
};
