/// One weather reading for a watched location, as returned by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherObservation {
    /// The location name that was queried, not the provider's canonical name.
    pub location: String,
    pub description: String,
}
