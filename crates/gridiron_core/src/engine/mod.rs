pub mod concepts;
pub mod executor;
pub mod personnel;

pub use concepts::{
    ConceptType, FactorDirection, RbStyle, RunConcept, RunConceptLibrary, SuccessFactor,
    TargetGap, YardageProfile,
};
pub use executor::{FactorValue, RunConceptExecutor, RunPlayResult};
pub use personnel::{
    DefensiveCall, Formation, Matchup, Personnel, PersonnelPackage, PlayCall, PlayerSelector,
    SelectorConfig,
};
