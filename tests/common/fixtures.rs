//! Static and generated log corpora used across harnesses.
//!
//! The generators emit well-formed content for each supported format in the
//! same shapes the upstream log producers write: MySQL slow-query blocks,
//! one-JSON-object-per-line access logs, and `<metric> <value>` lines.
//! They are deterministic so failures are reproducible.

/// Content that must never be classified as any known type.
pub const CORPUS_UNRECOGNIZED: &[&str] = &[
    "hello world",
    "",
    "2024-01-15 10:00:00 INFO  Starting application version 2.4.1",
    "Jan 15 10:00:02 myhost sshd[12345]: Failed password for invalid user admin",
    r#"{"ts":"2024-01-15T10:00:00Z","level":"INFO","message":"Server started","port":8080}"#,
    "ts=2024-01-15T10:00:01Z level=error msg=\"Connection refused\"",
    "gpu_usage 55.3",
    "cpu_usage: high",
    "# Timestamp is not a slow-query marker",
];

const ENDPOINTS: &[&str] = &["/api/users", "/api/products", "/api/orders", "/api/auth", "/api/search"];
const METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE"];
const STATUS_CODES: &[u16] = &[200, 200, 200, 200, 201, 301, 302, 400, 401, 403, 404, 500];
const SQL_QUERIES: &[&str] = &[
    "SELECT * FROM users WHERE last_login > DATE_SUB(NOW(), INTERVAL 24 HOUR)",
    "SELECT p.*, c.name FROM products p JOIN categories c ON p.category_id = c.id",
    "SELECT COUNT(*) FROM orders WHERE status = 'pending' GROUP BY user_id",
    "SELECT * FROM inventory WHERE stock < threshold ORDER BY stock ASC",
];
const METRICS: &[&str] = &[
    "cpu_usage",
    "memory_usage",
    "disk_usage",
    "network_in",
    "network_out",
    "load_average",
];

/// `n` MySQL slow-query blocks.
pub fn mysql_slow_log(n: usize) -> String {
    (0..n)
        .map(|i| {
            let rows_sent = 1 + i * 7 % 1000;
            format!(
                "# Time: 2024-01-15T10:{:02}:{:02}.000123\n\
                 # User@Host: user[user] @ localhost []\n\
                 # Query_time: {}.{:06}  Lock_time: 0.{:06} Rows_sent: {}  Rows_examined: {}\n\
                 SET timestamp={};\n\
                 {};\n",
                i / 60 % 60,
                i % 60,
                1 + i % 9,
                i * 4099 % 1_000_000,
                i * 811 % 500_000,
                rows_sent,
                rows_sent * (1 + i % 100),
                1_705_312_800 + i,
                SQL_QUERIES[i % SQL_QUERIES.len()],
            )
        })
        .collect()
}

/// `n` JSON access-log lines. Keys are written in producer order, which the
/// classifier relies on.
pub fn nginx_access_log(n: usize) -> String {
    (0..n)
        .map(|i| {
            format!(
                "{{\"timestamp\": \"2024-01-15T10:{:02}:{:02}\", \"remote_addr\": \"192.168.1.{}\", \
                 \"request_method\": \"{}\", \"request_uri\": \"{}\", \"status\": {}, \
                 \"body_bytes_sent\": {}, \"request_time\": {:.3}}}\n",
                i / 60 % 60,
                i % 60,
                1 + i % 255,
                METHODS[i % METHODS.len()],
                ENDPOINTS[i % ENDPOINTS.len()],
                STATUS_CODES[i % STATUS_CODES.len()],
                500 + i * 37 % 4500,
                0.1 + (i % 19) as f64 / 10.0,
            )
        })
        .collect()
}

/// `n` system metric snapshots, one line per metric.
pub fn system_metrics_log(n: usize) -> String {
    (0..n)
        .flat_map(|i| {
            METRICS
                .iter()
                .enumerate()
                .map(move |(j, m)| format!("{m} {:.2}\n", 20.0 + ((i * 13 + j * 7) % 75) as f64))
        })
        .collect()
}
