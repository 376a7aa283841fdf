//! Integration tests for net crate

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use pagesum_errors::{Error, NetworkError};
    use pagesum_events::{ReportEvent, Reporter};
    use pagesum_net::*;
    use pagesum_types::{FailureKind, FetchOutcome};
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client_with(config: NetConfig) -> NetClient {
        NetClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_counts_body_bytes() {
        let server = MockServer::start_async().await;
        let content = "x".repeat(200);
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/page");
                then.status(200).body(&content);
            })
            .await;

        let client = NetClient::with_defaults().unwrap();
        let len = client.fetch_body_len(&server.url("/page")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(len, 200);
    }

    #[tokio::test]
    async fn test_error_status_counts_as_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404).body("Not Found");
            })
            .await;

        let (reporter, mut rx) = Reporter::channel();
        let client = NetClient::with_defaults().unwrap();
        let url = server.url("/missing");

        let outcome = process_url(&client, &url, &reporter).await;
        assert_eq!(
            outcome,
            FetchOutcome::Success {
                url: url.clone(),
                byte_length: 9
            }
        );

        let message = rx.recv().await.unwrap();
        assert_eq!(
            message.event,
            ReportEvent::PerUrl {
                url,
                byte_length: 9
            }
        );
    }

    #[tokio::test]
    async fn test_response_cap() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/exact");
                then.status(200).body("a".repeat(64));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/over");
                then.status(200).body("a".repeat(65));
            })
            .await;

        let client = client_with(NetConfig {
            max_response_bytes: 64,
            ..NetConfig::default()
        });

        assert_eq!(client.fetch_body_len(&server.url("/exact")).await.unwrap(), 64);

        let error = client
            .fetch_body_len(&server.url("/over"))
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Network(NetworkError::ResponseTooLarge { limit: 64 })
        ));

        let (reporter, _rx) = Reporter::channel();
        let outcome = process_url(&client, &server.url("/over"), &reporter).await;
        assert!(matches!(
            outcome,
            FetchOutcome::Failure {
                kind: FailureKind::Network,
                ..
            }
        ));
    }

    /// Serve one chunked response without a Content-Length header
    async fn serve_chunked(chunk_sizes: &'static [usize]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|window| window == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    return;
                }
                request.extend_from_slice(&buf[..n]);
            }

            socket
                .write_all(
                    b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\nConnection: close\r\n\r\n",
                )
                .await
                .unwrap();
            for size in chunk_sizes {
                let chunk = format!("{size:x}\r\n{}\r\n", "c".repeat(*size));
                // the client hangs up once it has seen too much
                if socket.write_all(chunk.as_bytes()).await.is_err() {
                    return;
                }
                let _ = socket.flush().await;
            }
            let _ = socket.write_all(b"0\r\n\r\n").await;
        });

        format!("http://{addr}/")
    }

    #[tokio::test]
    async fn test_streamed_body_is_counted_against_cap() {
        let client = client_with(NetConfig {
            max_response_bytes: 100,
            ..NetConfig::default()
        });

        let within = serve_chunked(&[40, 40]).await;
        assert_eq!(client.fetch_body_len(&within).await.unwrap(), 80);

        let over = serve_chunked(&[40, 40, 40]).await;
        let error = client.fetch_body_len(&over).await.unwrap_err();
        assert!(matches!(
            error,
            Error::Network(NetworkError::ResponseTooLarge { limit: 100 })
        ));
    }

    #[tokio::test]
    async fn test_timeout_is_network_failure() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200)
                    .body("late")
                    .delay(Duration::from_millis(800));
            })
            .await;

        let client = client_with(NetConfig {
            timeout: Duration::from_millis(100),
            ..NetConfig::default()
        });
        let (reporter, mut rx) = Reporter::channel();
        let url = server.url("/slow");

        let outcome = process_url(&client, &url, &reporter).await;
        let FetchOutcome::Failure { kind, message, .. } = outcome else {
            panic!("expected a failure");
        };
        assert_eq!(kind, FailureKind::Network);
        assert_eq!(message, "request timed out");

        let report = rx.recv().await.unwrap();
        assert!(matches!(
            report.event,
            ReportEvent::Error {
                kind: FailureKind::Network,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        // Reserve a port and release it so nothing is listening there
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = NetClient::with_defaults().unwrap();
        let (reporter, _rx) = Reporter::channel();
        let outcome = process_url(&client, &format!("http://127.0.0.1:{port}/"), &reporter).await;

        assert!(matches!(
            outcome,
            FetchOutcome::Failure {
                kind: FailureKind::Network,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_malformed_url_is_unexpected_failure() {
        let client = NetClient::with_defaults().unwrap();
        let (reporter, mut rx) = Reporter::channel();

        let outcome = process_url(&client, "not a url", &reporter).await;
        assert!(matches!(
            outcome,
            FetchOutcome::Failure {
                kind: FailureKind::Unexpected,
                ..
            }
        ));
        assert!(matches!(
            rx.recv().await.unwrap().event,
            ReportEvent::Error {
                kind: FailureKind::Unexpected,
                ..
            }
        ));
    }
}
