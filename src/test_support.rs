use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use serde_json::Value;

const SAMPLE_SALE: &str = include_str!("../tests/fixtures/sale.json");

/// A complete, valid sale document in its wire shape.
pub fn sample_sale_json() -> Value {
    serde_json::from_str(SAMPLE_SALE).expect("fixture is valid JSON")
}

pub fn sample_sale_bytes() -> Vec<u8> {
    serde_json::to_vec(&sample_sale_json()).expect("sample sale serializes")
}

/// The sample sale with the first payment's amount replaced by `raw`, written
/// verbatim into the JSON text so numbers keep every digit.
pub fn sale_bytes_with_amount(raw: &str) -> Vec<u8> {
    let text = String::from_utf8(sample_sale_bytes()).expect("utf-8 JSON");
    let original = r#""amount":"10.50""#;
    assert!(text.contains(original), "fixture amount changed");
    text.replace(original, &format!(r#""amount":{}"#, raw))
        .into_bytes()
}

/// How a fake queue store answers RESP commands.
#[derive(Debug, Clone, Copy)]
pub enum FakeStore {
    /// Replies `NOAUTH` to every command, like a password-protected Redis.
    Refusing,
    /// Replies `+OK` to everything except `RPUSH`, which never gets an answer.
    SilentOnAppend,
}

/// Serve `behavior` on a local port until the test process exits.
pub fn spawn_fake_store(behavior: FakeStore) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let port = listener.local_addr().expect("addr failed").port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || serve_fake(stream, behavior));
        }
    });
    port
}

fn serve_fake(mut stream: TcpStream, behavior: FakeStore) {
    let mut buf = [0u8; 8192];
    loop {
        let n = match stream.read(&mut buf) {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        let chunk = &buf[..n];
        // Each RESP command is an array header line starting with '*'.
        let commands = chunk
            .split(|b| *b == b'\n')
            .filter(|line| line.starts_with(b"*"))
            .count();
        let reply: &[u8] = match behavior {
            FakeStore::Refusing => b"-NOAUTH Authentication required.\r\n",
            FakeStore::SilentOnAppend if contains(chunk, b"RPUSH") => continue,
            FakeStore::SilentOnAppend => b"+OK\r\n",
        };
        for _ in 0..commands {
            if stream.write_all(reply).is_err() {
                return;
            }
        }
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
