//! Best-effort parsers for the scanner's table output.
//!
//! nmap prints one whitespace-separated row per port, e.g.
//! `22/tcp open ssh`. These helpers are pure functions over single
//! lines so they can be tested against captured output without running
//! any subprocess. Lines that do not match the expected shape are
//! skipped, never treated as errors.

/// True when the line carries a `port/proto` field.
fn is_port_line(line: &str) -> bool {
    line.contains("/tcp") || line.contains("/udp")
}

/// Extract the port number from a discovery-stage line, if the line
/// reports an open port.
///
/// Shape: field 1 is `<port>/<proto>`, field 2 is the state. The state
/// must contain the substring `open` (so `open|filtered` counts, while
/// `closed` does not).
pub fn parse_open_port(line: &str) -> Option<String> {
    if !is_port_line(line) {
        return None;
    }
    let mut parts = line.split_whitespace();
    let first = parts.next()?;
    let state = parts.next()?;
    if !state.contains("open") {
        return None;
    }
    let port = first.split('/').next()?;
    Some(port.to_string())
}

/// Extract `(port, service)` from a service-detection line.
///
/// Shape: field 1 is `<port>/<proto>`, field 3 is the service name.
/// Lines with fewer than three fields are skipped.
pub fn parse_service(line: &str) -> Option<(String, String)> {
    if !is_port_line(line) {
        return None;
    }
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    let port = parts[0].split('/').next()?;
    Some((port.to_string(), parts[2].to_string()))
}

/// Scrape all open ports out of captured discovery-stage stdout, in
/// output order.
pub fn extract_open_ports(stdout: &str) -> Vec<String> {
    stdout.lines().filter_map(parse_open_port).collect()
}

/// Scrape all `(port, service)` pairs out of captured service-detection
/// stdout, in output order.
pub fn extract_services(stdout: &str) -> Vec<(String, String)> {
    stdout.lines().filter_map(parse_service).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Captured from a real discovery run; headers and prose must be ignored.
    const DISCOVERY_SAMPLE: &str = "\
Starting Nmap 7.94 ( https://nmap.org )
Nmap scan report for 10.0.0.1
Host is up (0.12s latency).

PORT     STATE    SERVICE
22/tcp   open     ssh
80/tcp   closed   http
443/tcp  open     https
8080/tcp filtered http-proxy

Nmap done: 1 IP address (1 host up) scanned in 4.21 seconds
";

    const SERVICE_SAMPLE: &str = "\
PORT    STATE  SERVICE  VERSION
22/tcp  open   ssh      OpenSSH 8.9p1
443/tcp open   https    nginx
Service detection performed.
";

    #[test]
    fn open_port_line_yields_port() {
        assert_eq!(parse_open_port("22/tcp   open     ssh"), Some("22".into()));
        assert_eq!(parse_open_port("53/udp open domain"), Some("53".into()));
    }

    #[test]
    fn closed_and_filtered_lines_are_skipped() {
        assert_eq!(parse_open_port("80/tcp   closed   http"), None);
        assert_eq!(parse_open_port("8080/tcp filtered http-proxy"), None);
    }

    #[test]
    fn open_filtered_state_still_counts() {
        // "open" as a substring of the state field is enough.
        assert_eq!(
            parse_open_port("161/udp open|filtered snmp"),
            Some("161".into())
        );
    }

    #[test]
    fn non_port_lines_are_skipped() {
        assert_eq!(parse_open_port("PORT     STATE    SERVICE"), None);
        assert_eq!(parse_open_port("Host is up (0.12s latency)."), None);
        assert_eq!(parse_open_port(""), None);
        // Port-shaped but no state field at all.
        assert_eq!(parse_open_port("22/tcp"), None);
    }

    #[test]
    fn extract_open_ports_preserves_output_order() {
        let ports = extract_open_ports(DISCOVERY_SAMPLE);
        assert_eq!(ports, vec!["22", "443"]);
    }

    #[test]
    fn service_line_yields_port_and_service() {
        assert_eq!(
            parse_service("22/tcp  open   ssh      OpenSSH 8.9p1"),
            Some(("22".into(), "ssh".into()))
        );
    }

    #[test]
    fn service_line_needs_three_fields() {
        assert_eq!(parse_service("22/tcp open"), None);
    }

    #[test]
    fn service_lines_do_not_require_open_state() {
        // The reference behavior keys service rows on shape only.
        assert_eq!(
            parse_service("80/tcp closed http"),
            Some(("80".into(), "http".into()))
        );
    }

    #[test]
    fn extract_services_from_captured_output() {
        let services = extract_services(SERVICE_SAMPLE);
        assert_eq!(
            services,
            vec![
                ("22".to_string(), "ssh".to_string()),
                ("443".to_string(), "https".to_string()),
            ]
        );
    }
}
