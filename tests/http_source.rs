use std::time::Duration;
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use vtu_results::config::Settings;
use vtu_results::{HttpResultSource, ResultError, ResultSource};

const INDEX_URL: &str = "https://results.vtu.ac.in/DJcbcs25/index.php";

// Serves exactly one canned response and hands back the raw request it received.
async fn serve_once(status: &'static str, content_type: &'static str, body: String) -> (HttpResultSource, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.expect("write");
        socket.shutdown().await.ok();
        request
    });

    let settings = Settings {
        api_base_url: format!("http://{}", addr),
        timeout: Duration::from_secs(5),
        ..Settings::default()
    };
    (HttpResultSource::new(&settings).expect("client"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf);
        if let Some(head_end) = text.find("\r\n\r\n") {
            let length = text[..head_end]
                .lines()
                .find_map(|l| {
                    let (name, value) = l.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length").then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);
            if buf.len() >= head_end + 4 + length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn request_body(request: &str) -> Value {
    let (_, body) = request.split_once("\r\n\r\n").expect("request body");
    serde_json::from_str(body).expect("json request body")
}

#[tokio::test]
async fn posts_identifier_and_url_as_json() {
    let page = json!({ "1AM21CS001": "<html>ok</html>" });
    let (source, server) = serve_once("200 OK", "application/json", page.to_string()).await;

    let payload = source.fetch_raw("1AM21CS001", INDEX_URL).await.expect("payload");
    let request = server.await.expect("server");

    assert_eq!(payload, page);
    assert!(request.starts_with("POST /single-post HTTP/1.1"));
    assert_eq!(request_body(&request), json!({ "usn": "1AM21CS001", "index_url": INDEX_URL }));
}

#[tokio::test]
async fn bare_html_body_becomes_a_string() {
    let (source, server) = serve_once("200 OK", "text/html", "<html><body>result</body></html>".to_string()).await;

    let payload = source.fetch_raw("1AM21CS001", INDEX_URL).await.expect("payload");
    server.await.expect("server");

    assert_eq!(payload, json!("<html><body>result</body></html>"));
}

#[tokio::test]
async fn plain_text_body_is_malformed() {
    let (source, server) = serve_once("200 OK", "text/plain", "Service warming up".to_string()).await;

    let err = source.fetch_raw("1AM21CS001", INDEX_URL).await.unwrap_err();
    server.await.expect("server");

    assert!(matches!(err, ResultError::Malformed(_)));
}

#[tokio::test]
async fn error_status_is_reported() {
    let (source, server) = serve_once("503 Service Unavailable", "text/plain", "down".to_string()).await;

    let err = source.fetch_raw("1AM21CS001", INDEX_URL).await.unwrap_err();
    server.await.expect("server");

    assert!(matches!(err, ResultError::Status(503, _)));
    assert!(!err.is_validation());
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let settings = Settings { api_base_url: format!("http://{}", addr), ..Settings::default() };
    let source = HttpResultSource::new(&settings).expect("client");

    let err = source.fetch_raw("1AM21CS001", INDEX_URL).await.unwrap_err();
    assert!(matches!(err, ResultError::Transport(_)));
}
