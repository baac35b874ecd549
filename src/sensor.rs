//! Device status reporting.

/// Describe a running device, e.g. `"d1 at floor1 is running. "`.
///
/// Returns an empty string unless both `device` and `location` are present
/// and non-empty.
pub fn scan(device: Option<&str>, location: Option<&str>) -> String {
    match (device, location) {
        (Some(device), Some(location)) if !device.is_empty() && !location.is_empty() => {
            format!("{device} at {location} is running. ")
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_running_device() {
        assert_eq!(scan(Some("d1"), Some("floor1")), "d1 at floor1 is running. ");
        assert_eq!(scan(Some("pump"), Some("basement")), "pump at basement is running. ");
    }

    #[test]
    fn test_scan_missing_parts() {
        assert_eq!(scan(None, Some("floor1")), "");
        assert_eq!(scan(Some("d1"), None), "");
        assert_eq!(scan(None, None), "");
        assert_eq!(scan(Some(""), Some("floor1")), "");
        assert_eq!(scan(Some("d1"), Some("")), "");
    }
}
