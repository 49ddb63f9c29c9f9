use std::time::Duration;

/// `HH:MM:SS` rendering used in completion log lines.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Size in megabytes, rounded to two decimals.
pub fn size_mb(bytes: u64) -> f64 {
    let mb = bytes as f64 / 1_048_576.0;
    (mb * 100.0).round() / 100.0
}

/// Transfer rate in MB/s; a zero elapsed time reports the raw size.
pub fn throughput_mb_s(bytes: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        let rate = bytes as f64 / 1_048_576.0 / secs;
        (rate * 100.0).round() / 100.0
    } else {
        size_mb(bytes)
    }
}
