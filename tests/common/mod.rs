use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;

/// Serve exactly one HTTP response on a loopback port, then shut down.
///
/// Returns the base URL (`http://127.0.0.1:<port>`) and the handle of the
/// serving thread. Writes are best-effort so an early client hang-up (for
/// example after an error status) cannot panic the server thread.
pub fn serve_once(status_line: &'static str, body: &'static [u8]) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");

    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        drain_request_head(&mut stream);

        let header = format!(
            "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(header.as_bytes());
        let _ = stream.write_all(body);
        let _ = stream.flush();
    });

    (format!("http://{addr}"), handle)
}

/// Read until the blank line that ends the request head.
fn drain_request_head(stream: &mut TcpStream) {
    let mut buf = [0u8; 512];
    let mut head = Vec::new();
    loop {
        let read = match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(read) => read,
        };
        head.extend_from_slice(&buf[..read]);
        if head.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }
}
