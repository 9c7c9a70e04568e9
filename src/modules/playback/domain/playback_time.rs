/// Render seconds as `m:ss`, or `h:mm:ss` past the hour
///
/// Negative or non-finite input renders as `0:00`.
pub fn format_playback_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Position after skipping `delta` seconds, clamped to the start
/// (and to `duration` when known)
pub fn seek_position(position: f64, delta: f64, duration: Option<f64>) -> f64 {
    let target = (position + delta).max(0.0);
    match duration {
        Some(end) if end.is_finite() && end > 0.0 => target.min(end),
        _ => target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_playback_time() {
        assert_eq!(format_playback_time(0.0), "0:00");
        assert_eq!(format_playback_time(9.7), "0:09");
        assert_eq!(format_playback_time(125.0), "2:05");
        assert_eq!(format_playback_time(3_725.0), "1:02:05");
        assert_eq!(format_playback_time(-4.0), "0:00");
        assert_eq!(format_playback_time(f64::NAN), "0:00");
    }

    #[test]
    fn test_seek_clamps() {
        assert_eq!(seek_position(5.0, -10.0, None), 0.0);
        assert_eq!(seek_position(5.0, 10.0, None), 15.0);
        assert_eq!(seek_position(95.0, 10.0, Some(100.0)), 100.0);
    }
}
