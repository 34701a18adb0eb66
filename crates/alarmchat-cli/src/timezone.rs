use chrono_tz::Tz;
use std::str::FromStr;

/// Validates that a timezone string is a valid IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<Tz, String> {
    Tz::from_str(timezone).map_err(|_| {
        format!(
            "Invalid timezone: '{}'. Use IANA timezone names like 'America/New_York'",
            timezone
        )
    })
}

/// Detects the system timezone, falling back to UTC if detection fails
pub fn detect_system_timezone() -> String {
    // Method 1: Check TZ environment variable
    if let Ok(tz) = std::env::var("TZ") {
        if validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    // Method 2: Try to read from /etc/timezone (Linux)
    #[cfg(target_os = "linux")]
    {
        if let Ok(tz) = std::fs::read_to_string("/etc/timezone") {
            let tz = tz.trim();
            if validate_timezone(tz).is_ok() {
                return tz.to_string();
            }
        }
    }

    // Method 3: Platform timezone lookup
    if let Ok(local_tz) = iana_time_zone::get_timezone() {
        if validate_timezone(&local_tz).is_ok() {
            return local_tz;
        }
    }

    // Fallback to UTC
    "UTC".to_string()
}
