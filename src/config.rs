use crate::model::Category;

/// Runtime settings for the `fleetres` binary, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub metrics_port: Option<u16>,
    pub sedans: usize,
    pub suvs: usize,
    pub vans: usize,
    /// Make `remove_unit` commands purge the unit's reservations too.
    pub cascade_removal: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let count = |key: &str| -> usize {
            lookup(key).and_then(|s| s.parse().ok()).unwrap_or(0)
        };
        Self {
            metrics_port: lookup("FLEETRES_METRICS_PORT").and_then(|s| s.parse().ok()),
            sedans: count("FLEETRES_SEDANS"),
            suvs: count("FLEETRES_SUVS"),
            vans: count("FLEETRES_VANS"),
            cascade_removal: lookup("FLEETRES_CASCADE_REMOVAL")
                .is_some_and(|s| matches!(s.trim(), "1" | "true" | "TRUE" | "yes")),
        }
    }

    /// Initial unit count per category.
    pub fn initial_units(&self) -> [(Category, usize); 3] {
        [
            (Category::Sedan, self.sedans),
            (Category::Suv, self.suvs),
            (Category::Van, self.vans),
        ]
    }
}
