pub mod bounce;
pub mod data;
pub mod metrics;
pub mod report;
pub mod study;

// Re-export commonly used types
pub use bounce::{BounceConfig, BounceError, TeamAnalysis, TeamMatchRecord};
pub use data::{LocalOpenData, Match, MatchSource, SeasonLoader, StatsBombClient};
pub use metrics::{PointsSamples, PpgComparison, Verdict};
pub use study::{BounceStudy, StudyConfig, StudyError, StudyResult, TeamReport};
