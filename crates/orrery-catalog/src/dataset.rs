//! Built-in solar system dataset.

use crate::Planet;

/// The eight planets of the solar system, innermost first.
///
/// Orbital periods are in Earth days, surface gravity in m/s².
pub fn solar_system() -> Vec<Planet> {
    vec![
        Planet::new(1, "Mercury", 88.0, 3.7),
        Planet::new(2, "Venus", 225.0, 8.87),
        Planet::new(3, "Earth", 365.25, 9.81),
        Planet::new(4, "Mars", 687.0, 3.721),
        Planet::new(5, "Jupiter", 4333.0, 24.79),
        Planet::new(6, "Saturn", 10759.0, 10.44),
        Planet::new(7, "Uranus", 30687.0, 8.69),
        Planet::new(8, "Neptune", 60190.0, 11.15),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_planets;

    #[test]
    fn test_solar_system_is_a_valid_catalog() {
        let planets = solar_system();
        assert_eq!(planets.len(), 8);
        assert!(validate_planets(&planets).is_ok());
    }

    #[test]
    fn test_solar_system_is_ordered_innermost_first() {
        let periods: Vec<f64> = solar_system()
            .iter()
            .map(|p| p.orbital_period.unwrap())
            .collect();
        assert!(periods.windows(2).all(|w| w[0] < w[1]));
    }
}
