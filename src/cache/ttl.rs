//! TTL presets per resource type and connection-aware TTL adjustment.

use std::time::Duration;

use strum::{Display, EnumString};

const HOUR: u64 = 3600;
const DAY: u64 = 24 * HOUR;

pub const GENRES: Duration = Duration::from_secs(DAY);
pub const LANGUAGES: Duration = Duration::from_secs(DAY);
pub const MOVIE: Duration = Duration::from_secs(HOUR);
pub const MOVIE_LIST: Duration = Duration::from_secs(HOUR);
pub const SEARCH: Duration = Duration::from_secs(300);
pub const TRENDING: Duration = Duration::from_secs(HOUR);
pub const TOP_RATED: Duration = Duration::from_secs(HOUR);
pub const UPCOMING: Duration = Duration::from_secs(HOUR);
pub const NOW_PLAYING: Duration = Duration::from_secs(HOUR);

// == Connection Type ==
/// Effective connection type as reported by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ConnectionType {
    #[strum(serialize = "4g")]
    FourG,
    #[strum(serialize = "3g")]
    ThreeG,
    #[strum(serialize = "2g")]
    TwoG,
    #[strum(serialize = "slow-2g")]
    Slow2G,
}

// == Adaptive TTL ==
/// Stretches `base` for slow connections, which benefit more from cache hits.
///
/// `3g` gets 1.5x (rounded up to a whole second), `2g` and `slow-2g` get 2x.
/// Anything else, including an unknown connection, keeps `base`. Very large
/// bases saturate at `u64::MAX` seconds instead of overflowing.
pub fn adaptive_ttl(base: Duration, connection: Option<ConnectionType>) -> Duration {
    let secs = base.as_secs();
    match connection {
        // ceil(1.5 * secs) == secs + ceil(secs / 2)
        Some(ConnectionType::ThreeG) => {
            Duration::from_secs(secs.saturating_add(secs.div_ceil(2)))
        }
        Some(ConnectionType::TwoG | ConnectionType::Slow2G) => {
            Duration::from_secs(secs.saturating_mul(2))
        }
        Some(ConnectionType::FourG) | None => base,
    }
}
