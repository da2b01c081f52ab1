#![allow(dead_code)]

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

pub const LISTING_PATH: &str = "/fairs/c1_trade-shows_china.html";
pub const EMPTY_PATH: &str = "/fairs/maintenance.html";
pub const GONE_PATH: &str = "/fairs/gone.html";

/// Two rows: a well-formed Canton Fair row and a row with an empty date cell.
pub const LISTING_HTML: &str = r#"<!doctype html>
<html>
  <head><title>Trade Shows in China</title></head>
  <body>
    <table class="tradeshows">
      <caption>China: 2 Trade Shows</caption>
      <thead>
        <tr><th>Trade Show</th><th>Cycle</th><th>Venue</th><th>Date</th></tr>
      </thead>
      <tbody>
        <tr>
          <td><a href="f-canton-fair-4570.html"><b>Canton Fair</b><i>China Import and Export Fair - machinery, textile, food</i></a></td>
          <td>Annual</td>
          <td><a href="pl1_trade-shows_poly-world-trade-center_2051.html">Poly World Trade Center</a><br><a href="cy1_trade-shows-guangzhou.html">Guangzhou</a></td>
          <td>04/15/2024-04/19/2024</td>
        </tr>
        <tr>
          <td><a href="f-mystery-show.html"><b>Mystery Show</b></a></td>
          <td>unknown</td>
          <td><a href="cy1_trade-shows-shanghai.html">Shanghai</a></td>
          <td></td>
        </tr>
      </tbody>
    </table>
  </body>
</html>
"#;

pub const EMPTY_HTML: &str = r#"<!doctype html>
<html><body><h1>Down for maintenance</h1></body></html>
"#;

pub fn spawn_listing_server() -> (String, mpsc::Sender<()>, thread::JoinHandle<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let addr = server.server_addr();
    let base_url = format!("http://{addr}");

    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }
            let request = match server.recv_timeout(Duration::from_millis(50)) {
                Ok(Some(req)) => req,
                Ok(None) => continue,
                Err(_) => break,
            };

            let path = request.url().split('?').next().unwrap_or(request.url());
            let (status, body) = match path {
                LISTING_PATH => (200, LISTING_HTML),
                EMPTY_PATH => (200, EMPTY_HTML),
                GONE_PATH => (404, "not found"),
                _ => (500, "boom"),
            };

            let header = tiny_http::Header::from_bytes(
                &b"Content-Type"[..],
                &b"text/html; charset=utf-8"[..],
            )
            .expect("content-type header");
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
    });

    (base_url, shutdown_tx, handle)
}
