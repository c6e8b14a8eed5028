use crate::player::PlayerError;
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Downloaded bodies kept around. The current track plus a few neighbours.
const KEEP: usize = 4;

/// Bodies of remote (http/https) tracks, downloaded off the event loop and
/// shared with the audio backend, which decodes them from memory 🌐
#[derive(Debug, Clone, Default)]
pub struct RemoteMedia {
    inner: Arc<Mutex<VecDeque<(String, Arc<[u8]>)>>>,
}

impl RemoteMedia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, src: &str) -> Option<Arc<[u8]>> {
        let entries = self.inner.lock().ok()?;
        entries
            .iter()
            .find(|(key, _)| key == src)
            .map(|(_, bytes)| bytes.clone())
    }

    pub fn contains(&self, src: &str) -> bool {
        self.get(src).is_some()
    }

    /// Store a body, evicting the oldest once more than `KEEP` are held
    pub fn insert(&self, src: &str, bytes: Vec<u8>) -> Arc<[u8]> {
        let bytes: Arc<[u8]> = bytes.into();
        if let Ok(mut entries) = self.inner.lock() {
            entries.retain(|(key, _)| key != src);
            entries.push_back((src.to_string(), bytes.clone()));
            while entries.len() > KEEP {
                entries.pop_front();
            }
        }
        bytes
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Download `src` unless it is already held. Non-2xx responses are failures.
    pub async fn fetch(&self, client: &Client, src: &str) -> Result<(), PlayerError> {
        if self.contains(src) {
            return Ok(());
        }
        let body = client
            .get(src)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        tracing::debug!(src, bytes = body.len(), "remote track downloaded");
        self.insert(src, body.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_evict_oldest() {
        let media = RemoteMedia::new();
        for i in 0..6 {
            media.insert(&format!("http://host/{}.mp3", i), vec![i as u8; 4]);
        }
        assert_eq!(media.len(), KEEP);
        assert!(!media.contains("http://host/0.mp3"));
        assert!(!media.contains("http://host/1.mp3"));
        assert_eq!(media.get("http://host/5.mp3").unwrap().as_ref(), &[5u8; 4]);
    }

    #[test]
    fn test_reinsert_refreshes_entry() {
        let media = RemoteMedia::new();
        media.insert("http://host/a.mp3", vec![1]);
        media.insert("http://host/a.mp3", vec![2, 2]);
        assert_eq!(media.len(), 1);
        assert_eq!(media.get("http://host/a.mp3").unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_stores_body_and_rejects_errors() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let n = stream.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]);
                let response: &[u8] = if head.starts_with("GET /song.mp3 ") {
                    b"HTTP/1.1 200 OK\r\nContent-Length: 3\r\nConnection: close\r\n\r\nabc"
                } else {
                    b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                };
                let _ = stream.write_all(response).await;
                let _ = stream.shutdown().await;
            }
        });

        let client = Client::builder().no_proxy().build().unwrap();
        let media = RemoteMedia::new();
        let song = format!("http://{}/song.mp3", addr);
        media.fetch(&client, &song).await.unwrap();
        assert_eq!(media.get(&song).unwrap().as_ref(), b"abc");

        let missing = format!("http://{}/gone.mp3", addr);
        assert!(matches!(
            media.fetch(&client, &missing).await,
            Err(PlayerError::Fetch(_))
        ));
        assert!(!media.contains(&missing));
    }
}
