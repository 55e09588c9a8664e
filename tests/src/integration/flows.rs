//! # End-to-End Flows
//!
//! A request signed by the test signer travels through the real router and
//! verifier, with no mocks in between.
//!
//! ## Flows Tested
//!
//! 1. Unary verify: valid, tampered, unsigned, wrong key, interop signature
//! 2. Bulk NDJSON: mixed batches, chunked bodies, aborted bodies
//! 3. Full process wiring: `NodeRuntime` serving over a real TCP socket

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use axum::body::{Body, Bytes};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use futures::stream;
    use shared_types::SmsRequest;
    use sms_api_gateway::{build_router, AppState};
    use sms_signature_verification::{
        verify_request_stream, SmsVerificationApi, VerificationStatus, DEFAULT_MAX_LINE_BYTES,
    };
    use std::io::{self, Write};
    use std::sync::Arc;
    use tower::ServiceExt;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn app() -> Router {
        app_for(service())
    }

    fn app_for(service: Arc<dyn SmsVerificationApi>) -> Router {
        build_router(AppState::new(service, DEFAULT_MAX_LINE_BYTES), 1024 * 1024)
    }

    fn post(uri: &str, body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap()
    }

    async fn call(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn verify(app: Router, request: &SmsRequest) -> (StatusCode, serde_json::Value) {
        call(app, post("/api/v1/sms/verify", Body::from(to_json(request)))).await
    }

    fn ndjson(requests: &[SmsRequest]) -> String {
        requests.iter().map(|r| to_json(r) + "\n").collect()
    }

    // =========================================================================
    // UNARY FLOWS
    // =========================================================================

    #[tokio::test]
    async fn test_signed_message_is_accepted() {
        let (status, json) = verify(app(), &signed(msg_1())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["messageId"], "msg-1");
        assert_eq!(json["verified"], true);
        assert_eq!(json["status"], "VALID");
    }

    #[tokio::test]
    async fn test_openssl_signature_is_accepted() {
        let request = SmsRequest::new(msg_1(), OPENSSL_MSG_1_SIGNATURE);
        let (status, _) = verify(app(), &request).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_string_timestamp_verifies_like_numeric() {
        let mut payload = random_payload("msg-ts");
        payload.timestamp = 1_700_000_000_123;
        let signature = sign(&payload);

        let body = format!(
            r#"{{"payload":{{"messageId":"msg-ts","sender":"{}","recipient":"{}","content":"{}","timestamp":"1700000000123"}},"messageSignature":"{}"}}"#,
            payload.sender, payload.recipient, payload.content, signature
        );
        let (status, json) = call(app(), post("/api/v1/sms/verify", Body::from(body))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "VALID");
    }

    #[tokio::test]
    async fn test_tampered_content_is_rejected() {
        let mut request = signed(msg_1());
        if let Some(payload) = request.payload.as_mut() {
            payload.content = "hi, send money".to_string();
        }

        let (status, json) = verify(app(), &request).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["status"], "INVALID_SIGNATURE");
        assert_eq!(json["statusMessage"], "Signature is invalid");
    }

    #[tokio::test]
    async fn test_unsigned_message_is_rejected() {
        let (status, json) = verify(app(), &SmsRequest::new(msg_1(), "")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["status"], "MISSING_SIGNATURE");
        assert_eq!(json["messageId"], "msg-1");
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected() {
        let app = app_for(service_for(OTHER_PUBLIC_KEY_PEM));
        let (status, json) = verify(app, &signed(msg_1())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["status"], "INVALID_SIGNATURE");
    }

    #[tokio::test]
    async fn test_garbage_signature_is_verification_error() {
        let (status, json) = verify(app(), &SmsRequest::new(msg_1(), "***")).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["status"], "VERIFICATION_ERROR");
        assert!(json["statusMessage"]
            .as_str()
            .unwrap()
            .starts_with("Verification error: "));
    }

    #[tokio::test]
    async fn test_simple_verify_agrees_with_full_verify() {
        for request in [signed(msg_1()), SmsRequest::new(msg_1(), "")] {
            let (_, full) = verify(app(), &request).await;
            let (status, simple) = call(
                app(),
                post("/api/v1/sms/verify/simple", Body::from(to_json(&request))),
            )
            .await;

            assert_eq!(status, StatusCode::OK);
            assert_eq!(simple["verified"], full["verified"]);
            assert_eq!(simple["messageId"], full["messageId"]);
        }
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_service() {
        let service = service();
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let app = app_for(service.clone());
                tokio::spawn(async move {
                    let request = if i % 2 == 0 {
                        signed(payload(&format!("c{i}"), "hi"))
                    } else {
                        SmsRequest::new(payload(&format!("c{i}"), "hi"), "")
                    };
                    verify(app, &request).await.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let expected = if i % 2 == 0 {
                StatusCode::OK
            } else {
                StatusCode::UNAUTHORIZED
            };
            assert_eq!(handle.await.unwrap(), expected);
        }
    }

    // =========================================================================
    // BULK FLOWS
    // =========================================================================

    #[tokio::test]
    async fn test_bulk_two_valid_one_unsigned() {
        let body = ndjson(&[
            signed(payload("a", "one")),
            SmsRequest::new(payload("b", "two"), ""),
            signed(payload("c", "three")),
        ]);

        let (status, json) = call(app(), post("/api/v1/sms/verify/bulk", Body::from(body))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalProcessed"], 3);
        assert_eq!(json["verified"], 2);
        assert_eq!(json["failed"], 1);
        assert_eq!(json["failedMessageIds"], serde_json::json!(["b"]));
    }

    #[tokio::test]
    async fn test_bulk_streamed_in_small_chunks() {
        let requests: Vec<_> = (0..10)
            .map(|i| {
                let request = signed(random_payload(&format!("s{i}")));
                if i % 3 == 0 {
                    SmsRequest::new(random_payload(&format!("s{i}")), request.message_signature)
                } else {
                    request
                }
            })
            .collect();
        let bytes = ndjson(&requests).into_bytes();
        let chunks: Vec<Result<Bytes, io::Error>> = bytes
            .chunks(13)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();

        let (status, json) = call(
            app(),
            post("/api/v1/sms/verify/bulk", Body::from_stream(stream::iter(chunks))),
        )
        .await;

        // i = 0, 3, 6, 9 carry a signature for different content
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalProcessed"], 10);
        assert_eq!(json["verified"], 6);
        assert_eq!(json["failedMessageIds"], serde_json::json!(["s0", "s3", "s6", "s9"]));
    }

    #[tokio::test]
    async fn test_bulk_aborted_body_returns_partial() {
        let first = ndjson(&[signed(payload("a", "x")), SmsRequest::new(payload("b", "x"), "")]);
        let chunks: Vec<Result<Bytes, io::Error>> = vec![
            Ok(Bytes::from(first)),
            Err(io::Error::new(io::ErrorKind::ConnectionAborted, "client went away")),
        ];

        let (status, json) = call(
            app(),
            post("/api/v1/sms/verify/bulk", Body::from_stream(stream::iter(chunks))),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "BULK_STREAM_ABORTED");
        assert_eq!(json["partial"]["totalProcessed"], 2);
        assert_eq!(json["partial"]["verified"], 1);
        assert_eq!(json["partial"]["failedMessageIds"], serde_json::json!(["b"]));
    }

    #[tokio::test]
    async fn test_bulk_malformed_line_does_not_stop_stream() {
        let body = format!(
            "{}{{\"payload\":\n{}",
            ndjson(&[signed(payload("a", "x"))]),
            ndjson(&[signed(payload("c", "x"))])
        );

        let (status, json) = call(app(), post("/api/v1/sms/verify/bulk", Body::from(body))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["totalProcessed"], 3);
        assert_eq!(json["verified"], 2);
        assert_eq!(json["failedMessageIds"], serde_json::json!(["unknown"]));
    }

    #[tokio::test]
    async fn test_typed_stream_driver_with_real_service() {
        let service = service();
        let items = vec![
            Ok::<_, io::Error>(signed(payload("t1", "x"))),
            Ok(SmsRequest {
                payload: None,
                message_signature: sign(&payload("t2", "x")),
            }),
            Ok(signed(payload("t3", "x"))),
        ];

        let summary = verify_request_stream(service.as_ref(), stream::iter(items))
            .await
            .unwrap();

        assert_eq!(summary.total_processed(), 3);
        assert_eq!(summary.verified_count(), 2);
        assert_eq!(summary.failed_message_ids(), ["unknown"]);
    }

    #[test]
    fn test_bulk_session_matches_unary_results() {
        let service = service();
        let requests = [
            signed(payload("u1", "x")),
            SmsRequest::new(payload("u2", "x"), "AAECAwQFBgcICQoLDA0ODw=="),
            signed(payload("u3", "x")),
        ];

        let mut session = sms_signature_verification::BulkSession::new(service.as_ref());
        for request in &requests {
            let status = session.on_message(request).unwrap();
            assert_eq!(status, service.verify_request(request).status());
        }

        let summary = session.on_complete().unwrap();
        assert_eq!(summary.failed_message_ids(), ["u2"]);
        assert_eq!(
            service.verify_request(&requests[1]).status(),
            VerificationStatus::InvalidSignature
        );
    }

    // =========================================================================
    // PROCESS WIRING
    // =========================================================================

    #[tokio::test]
    async fn test_node_runtime_over_tcp() {
        use sms_verifier_node::config::NodeConfig;
        use sms_verifier_node::NodeRuntime;
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::{TcpListener, TcpStream};
        use tokio::sync::oneshot;

        let mut key_file = tempfile::NamedTempFile::new().unwrap();
        key_file.write_all(SIGNER_PUBLIC_KEY_PEM.as_bytes()).unwrap();

        let config = NodeConfig::from_lookup(|name| match name {
            "SV_PUBLIC_KEY_PATH" => Some(key_file.path().display().to_string()),
            "SV_HTTP_HOST" => Some("127.0.0.1".to_string()),
            _ => None,
        });
        let runtime = NodeRuntime::new(config).unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let server = tokio::spawn(async move {
            runtime
                .gateway()
                .serve(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let body = to_json(&signed(msg_1()));
        let request = format!(
            "POST /api/v1/sms/verify HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();

        assert!(response.starts_with("HTTP/1.1 200"), "{response}");
        assert!(response.contains(r#""status":"VALID""#));

        shutdown_tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
