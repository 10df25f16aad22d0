pub mod loader;
pub mod statsbomb;
pub mod types;

pub use loader::{resolve_season, team_matches, LoaderError, SeasonId, SeasonLoader};
pub use statsbomb::{
    Competition, LocalOpenData, MatchSource, RawMatch, SourceError, StatsBombClient,
    OPEN_DATA_BASE_URL,
};
pub use types::{Match, Side};
