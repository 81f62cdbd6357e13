//! Fakes shared by the unit tests: a static renderer and a tiny HTTP server.

use std::collections::HashMap;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{ImageFormat, Rgb, RgbImage};
use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::render::Renderer;
use crate::{Error, Result};

/// Serves fixed markup per URL and counts how often it was asked to render.
pub(crate) struct StaticPages {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StaticPages {
    pub(crate) fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, html)| (url.to_string(), html.to_string()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Renderer for StaticPages {
    fn render(&self, page_url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages.get(page_url).cloned().ok_or_else(|| Error::Render {
            url: page_url.to_string(),
            reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
        })
    }
}

pub(crate) struct Route {
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
}

impl Route {
    pub(crate) fn ok(content_type: &'static str, body: Vec<u8>) -> Self {
        Self {
            status: 200,
            content_type,
            body,
        }
    }
}

/// Starts an HTTP/1.1 server on a random local port. Unknown paths get a 404.
pub(crate) async fn serve(routes: Vec<(&str, Route)>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, route)| (path.to_string(), route))
            .collect(),
    );

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, reason, content_type, body) = match routes.get(path) {
                    Some(route) => (route.status, "OK", route.content_type, route.body.as_slice()),
                    None => (404, "Not Found", "text/plain", b"not found".as_slice()),
                };

                let head = format!(
                    "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes()).await;
                let _ = stream.write_all(body).await;
                let _ = stream.shutdown().await;
            });
        }
    });

    addr
}

/// A client that never goes through a system proxy, so requests reach the local server.
pub(crate) fn test_client() -> Client {
    Client::builder().no_proxy().build().unwrap()
}

pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// A valid PNG grown to exactly `len` bytes with a private ancillary chunk before `IEND`.
pub(crate) fn padded_png_bytes(len: usize) -> Vec<u8> {
    let png = png_bytes(8, 8);
    // length + type + crc
    const CHUNK_OVERHEAD: usize = 12;
    let (body, iend) = png.split_at(png.len() - CHUNK_OVERHEAD);
    let padding = vec![0u8; len - png.len() - CHUNK_OVERHEAD];

    let mut chunk = Vec::with_capacity(padding.len() + CHUNK_OVERHEAD);
    chunk.extend_from_slice(&(padding.len() as u32).to_be_bytes());
    chunk.extend_from_slice(b"paDd");
    chunk.extend_from_slice(&padding);
    let crc = crc32fast::hash(&chunk[4..]);
    chunk.extend_from_slice(&crc.to_be_bytes());

    let padded = [body, chunk.as_slice(), iend].concat();
    assert_eq!(padded.len(), len);
    padded
}
