use chrono::{DateTime, FixedOffset, Offset, Utc};
use clap::ValueEnum;
use cityweather_core::{Location, WeatherResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TemperatureUnit {
    #[value(name = "c")]
    Celsius,
    #[value(name = "f")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub fn convert(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    pub fn format(&self, celsius: f64) -> String {
        format!("{:.1}°{}", self.convert(celsius), self.symbol())
    }
}

pub const NO_RESULTS: &str = "No cities found.\n\
    Try searching with just the city name (e.g., Mumbai, Delhi)\n\
    or add ', India' to your search.";

pub fn location_line(location: &Location) -> String {
    if location.has_coordinates() {
        format!(
            "{} ({:.4}, {:.4})",
            location.display_name(),
            location.latitude,
            location.longitude
        )
    } else {
        format!("{} (coordinates unknown)", location.display_name())
    }
}

pub fn print_no_results() {
    println!("{NO_RESULTS}");
}

pub fn print_locations(locations: &[Location]) {
    if locations.is_empty() {
        print_no_results();
        return;
    }

    for (index, location) in locations.iter().enumerate() {
        println!("{:>3}. {}", index + 1, location_line(location));
    }
}

fn location_offset(offset_s: i32) -> FixedOffset {
    FixedOffset::east_opt(offset_s).unwrap_or_else(|| Utc.fix())
}

/// Clock time at the observed location.
fn local_time(time: DateTime<Utc>, offset_s: i32) -> String {
    time.with_timezone(&location_offset(offset_s))
        .format("%-I:%M %p")
        .to_string()
}

pub fn weather_lines(
    location: &Location,
    weather: &WeatherResponse,
    unit: TemperatureUnit,
) -> Vec<String> {
    let date = weather
        .observation_time
        .with_timezone(&location_offset(weather.timezone_offset_s))
        .format("%A, %b %-d");

    vec![
        format!("{} ({})", location.display_name(), date),
        format!(
            "{} (feels like {}), {}",
            unit.format(weather.temperature_c),
            unit.format(weather.feels_like_c),
            weather.description
        ),
        format!(
            "Low {} / High {}",
            unit.format(weather.temp_min_c),
            unit.format(weather.temp_max_c)
        ),
        format!(
            "Humidity {}%  Pressure {} hPa  Visibility {:.1} km",
            weather.humidity_pct,
            weather.pressure_hpa,
            f64::from(weather.visibility_m) / 1000.0
        ),
        format!(
            "Wind {:.1} m/s {}",
            weather.wind_speed_mps,
            weather.wind_direction()
        ),
        format!(
            "Sunrise {}  Sunset {}",
            local_time(weather.sunrise, weather.timezone_offset_s),
            local_time(weather.sunset, weather.timezone_offset_s)
        ),
    ]
}

pub fn print_weather(location: &Location, weather: &WeatherResponse, unit: TemperatureUnit) {
    for line in weather_lines(location, weather, unit) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_weather() -> WeatherResponse {
        WeatherResponse {
            provider: "openweather".into(),
            location_name: "Mumbai".into(),
            country_code: "IN".into(),
            temperature_c: 30.0,
            feels_like_c: 35.0,
            temp_min_c: 28.0,
            temp_max_c: 31.0,
            condition: "Clear".into(),
            description: "clear sky".into(),
            icon: "01d".into(),
            humidity_pct: 70,
            pressure_hpa: 1008,
            visibility_m: 10000,
            wind_speed_mps: 3.5,
            wind_deg: 270,
            observation_time: DateTime::from_timestamp(1717052400, 0).unwrap(),
            sunrise: DateTime::from_timestamp(1717028520, 0).unwrap(),
            sunset: DateTime::from_timestamp(1717075620, 0).unwrap(),
            timezone_offset_s: 19800,
        }
    }

    #[test]
    fn fahrenheit_conversion() {
        assert_eq!(TemperatureUnit::Fahrenheit.convert(100.0), 212.0);
        assert_eq!(TemperatureUnit::Fahrenheit.format(0.0), "32.0°F");
        assert_eq!(TemperatureUnit::Celsius.format(21.56), "21.6°C");
    }

    #[test]
    fn location_line_marks_missing_coordinates() {
        let resolved = Location::new("Pune", 18.52, 73.8567, "IN", Some("Maharashtra".into()));
        assert_eq!(location_line(&resolved), "Pune, Maharashtra, IN (18.5200, 73.8567)");

        let pending = Location::unresolved("Thane", "IN");
        assert_eq!(location_line(&pending), "Thane, IN (coordinates unknown)");
    }

    #[test]
    fn weather_lines_use_local_time_and_unit() {
        let location = Location::new("Mumbai", 19.07, 72.87, "IN", None);
        let lines = weather_lines(&location, &sample_weather(), TemperatureUnit::Celsius);

        assert_eq!(lines[0], "Mumbai, IN (Thursday, May 30)");
        assert!(lines[1].starts_with("30.0°C (feels like 35.0°C)"));
        assert_eq!(lines[4], "Wind 3.5 m/s W");
        assert_eq!(lines[5], "Sunrise 5:52 AM  Sunset 6:57 PM");
    }
}
