use std::sync::Mutex;

/// Global log storage for HTTP traffic and recoverable warnings
static LOGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// Keep only the most recent entries
const MAX_LOGS: usize = 100;

fn push(line: String) {
    if let Ok(mut logs) = LOGS.lock() {
        logs.push(line);
        if logs.len() > MAX_LOGS {
            logs.remove(0);
        }
    }
}

/// Log an HTTP request
pub fn log_request(method: &str, url: &str) {
    let timestamp = chrono::Local::now().format("%H:%M:%S");
    push(format!("[{}] {} {}", timestamp, method, url));
}

/// Log an HTTP response
pub fn log_response(status: u16, url: &str) {
    let timestamp = chrono::Local::now().format("%H:%M:%S");
    push(format!("[{}] <- {} {}", timestamp, status, url));
}

/// Log a recoverable problem (dropped event, fallback activation)
pub fn log_warn(msg: impl AsRef<str>) {
    let timestamp = chrono::Local::now().format("%H:%M:%S");
    push(format!("[{}] warn: {}", timestamp, msg.as_ref()));
}

/// Get recent logs for display, newest first
pub fn get_recent_logs(count: usize) -> Vec<String> {
    if let Ok(logs) = LOGS.lock() {
        logs.iter().rev().take(count).cloned().collect()
    } else {
        Vec::new()
    }
}
