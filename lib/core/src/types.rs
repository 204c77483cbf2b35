/// Current wall-clock time as milliseconds since the Unix epoch.
///
/// Token expiry claims are compared against this value. No clock-skew
/// correction is applied; the clock of the machine running the server
/// is authoritative.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
