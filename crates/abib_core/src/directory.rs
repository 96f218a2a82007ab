//! Observer location directory.
//!
//! Coordinates are stored in the public convention ([`Location`]: +N latitude,
//! +E longitude, signed UTC offset); the engine-frame conversion happens in
//! one place, inside `Location`.

use abib_types::{AbibError, Location};

/// Named-location lookup. The built-in table covers the cities the
/// calculations historically shipped with; other sources (user settings,
/// a config file) implement the same trait.
pub trait LocationDirectory {
    /// All location names, in directory order.
    fn names(&self) -> Vec<&str>;

    /// Resolves a name to its coordinates.
    fn get(&self, name: &str) -> Result<Location, AbibError>;
}

/// Name, latitude (+N), longitude (+E), UTC offset hours.
type Entry = (&'static str, f64, f64, f64);

static BUILTIN: [Entry; 32] = [
    ("Jerusalem, Israel", 31.7833333333333, 35.2166666666667, 2.0),
    ("Lennon, Michigan, USA", 42.95, -83.95, -4.0),
    ("New York, New York, USA", 40.7333333333333, -73.9166666666667, -5.0),
    ("Chicago, Illinois, USA", 41.85, -87.65, -6.0),
    ("Houston, Texas, USA", 29.75, -95.3833333333333, -6.0),
    ("Los Angeles, California, USA", 34.0833333333333, -118.366666666667, -8.0),
    ("Honolulu, Hawaii, USA", 21.3166666666667, -157.833333333333, -10.0),
    ("Perth, Australia", -31.9666666666667, 115.816666666667, 8.0),
    ("Melbourne, Australia", -37.82, 144.97, 10.0),
    ("Brisbane, Australia", -27.5, 153.0, 10.0),
    ("Sydney, Australia", -33.9166666666667, 151.283333333333, 10.0),
    ("Ottawa, Ontario, Canada", 45.4166666666667, -75.7166666666667, -5.0),
    ("Vancouver, Canada", 49.2166666666667, -123.1, -8.0),
    ("Greenwich Observatory, England", 51.4666666666667, 0.0, 0.0),
    ("Berlin, Germany", 52.5, 13.0166666666667, 1.0),
    ("Kinshasa, Congo Dem.Rep.", -4.3, 15.3, 1.0),
    ("Paris, France", 48.85, 2.33333333333333, 1.0),
    ("Rome, Italy", 41.8666666666667, 12.6166666666667, 1.0),
    ("StockHolm, Sweden", 59.03, 18.05, 1.0),
    ("Cairo, Egypt", 30.0, 31.2833333333333, 2.0),
    ("Johannesburg, South Africa", -26.1999972222222, 28.0799972222222, 2.0),
    ("Moscow, Russia", 55.75, 37.6166666666667, 3.0),
    ("Rio de Janeiro, Brazil", -22.45, -42.7166666666667, -3.0),
    ("Lima, Lima, Peru", -12.1, -76.9166666666667, -5.0),
    ("Bombay, India", 18.9333333333333, 72.85, 5.5),
    ("Calcutta, India", 22.5166666666667, 88.3666666666667, 5.5),
    ("Mexico City, Mexico", 19.4666666666667, -99.15, -6.0),
    ("Jakarta, Java, Indonesia", -6.13333333333333, 106.75, 7.0),
    ("Beijing, China", 39.9166666666667, 116.383333333333, 8.0),
    ("Manila, Philippines", 14.6166666666667, 121.0, 8.0),
    ("Seoul, South Korea", 37.5833333333333, 127.05, 9.0),
    ("Tokyo, Japan", 35.6833333333333, 139.733333333333, 9.0),
];

/// The built-in city table.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinDirectory;

impl LocationDirectory for BuiltinDirectory {
    fn names(&self) -> Vec<&str> {
        BUILTIN.iter().map(|e| e.0).collect()
    }

    fn get(&self, name: &str) -> Result<Location, AbibError> {
        BUILTIN
            .iter()
            .find(|e| e.0.eq_ignore_ascii_case(name))
            .map(|&(_, lat, lon, offset)| Location { latitude: lat, longitude: lon, utc_offset_hours: offset })
            .ok_or(AbibError::UnknownLocation { name: name.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_is_a_valid_location() {
        let dir = BuiltinDirectory;
        for name in dir.names() {
            let loc = dir.get(name).expect("listed name resolves");
            Location::new(loc.latitude, loc.longitude, loc.utc_offset_hours)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
        }
    }

    #[test]
    fn test_jerusalem_matches_preset() {
        let loc = BuiltinDirectory.get("Jerusalem, Israel").expect("present");
        assert!((loc.latitude - 31.7833).abs() < 0.001);
        assert!((loc.longitude - 35.2167).abs() < 0.001);
        assert_eq!(loc.utc_offset_hours, 2.0);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert!(BuiltinDirectory.get("tokyo, japan").is_ok());
        assert!(matches!(
            BuiltinDirectory.get("Atlantis"),
            Err(AbibError::UnknownLocation { .. })
        ));
    }

    #[test]
    fn test_hemispheres() {
        let perth = BuiltinDirectory.get("Perth, Australia").expect("present");
        assert!(perth.latitude < 0.0 && perth.longitude > 0.0 && perth.utc_offset_hours > 0.0);
        let ny = BuiltinDirectory.get("New York, New York, USA").expect("present");
        assert!(ny.latitude > 0.0 && ny.longitude < 0.0 && ny.utc_offset_hours < 0.0);
    }
}
