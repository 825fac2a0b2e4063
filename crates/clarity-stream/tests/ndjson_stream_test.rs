use clarity_stream::{decode_ndjson_stream, drive_into_sink, CallbackSink, DecodedEvent};
use futures::{stream, StreamExt};

fn body(chunks: &[&str]) -> Vec<Result<Vec<u8>, String>> {
    chunks
        .iter()
        .map(|chunk| Ok(chunk.as_bytes().to_vec()))
        .collect()
}

#[tokio::test]
async fn test_stream_decodes_and_flushes() {
    let events: Vec<DecodedEvent> = decode_ndjson_stream(stream::iter(body(&[
        "{\"response\":\"Hel",
        "lo\"}\n{\"response\":\" there\"}\n{\"resp",
        "onse\":\"!\"}",
    ])))
    .collect()
    .await;

    assert_eq!(
        events,
        vec![
            DecodedEvent::content("Hello"),
            DecodedEvent::content(" there"),
            DecodedEvent::content("!"),
        ]
    );
}

#[tokio::test]
async fn test_transport_error_stops_reading_then_flushes() {
    let chunks: Vec<Result<Vec<u8>, String>> = vec![
        Ok(b"{\"response\":\"partial\"}\n{\"response\":\"tail\"}".to_vec()),
        Err("connection reset".to_string()),
        Ok(b"\"}\n".to_vec()),
    ];

    let events: Vec<DecodedEvent> = decode_ndjson_stream(stream::iter(chunks))
        .collect()
        .await;

    assert_eq!(
        events,
        vec![
            DecodedEvent::content("partial"),
            DecodedEvent::failure("Stream error: connection reset"),
            DecodedEvent::content("tail"),
        ]
    );
}

#[tokio::test]
async fn test_multibyte_split_across_chunks() {
    let record = "{\"response\":\"ação\"}\n".as_bytes().to_vec();
    let chunks: Vec<Result<Vec<u8>, String>> =
        record.chunks(1).map(|b| Ok(b.to_vec())).collect();

    let events: Vec<DecodedEvent> = decode_ndjson_stream(stream::iter(chunks))
        .collect()
        .await;

    assert_eq!(events, vec![DecodedEvent::content("ação")]);
}

#[tokio::test]
async fn test_drive_into_callback_sink() {
    let events = decode_ndjson_stream(stream::iter(body(&[
        "{\"response\":\"a\"}\n",
        "{\"error\":\"b\"}\n",
        "garbage\n",
    ])));

    let mut chunks = Vec::new();
    let mut errors = Vec::new();
    let dispatched = {
        let mut sink = CallbackSink::with_error(
            |text: &str| chunks.push(text.to_string()),
            |message: &str| errors.push(message.to_string()),
        );
        drive_into_sink(events, &mut sink).await
    };

    assert_eq!(dispatched, 3);
    assert_eq!(chunks, vec!["a"]);
    assert_eq!(errors, vec!["b", "Error parsing server response"]);
}

#[tokio::test]
async fn test_empty_body() {
    let events: Vec<DecodedEvent> = decode_ndjson_stream(stream::iter(body(&[])))
        .collect()
        .await;

    assert!(events.is_empty());
}
