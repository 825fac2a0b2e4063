use clarity_stream::{DecodedEvent, StreamDecoder, PARSE_FAILURE_MESSAGE};

const DOCUMENT: &str = concat!(
    "{\"response\":\"Hello\"}\n",
    "{\"foo\":\"bar\"}\n",
    "not-json\n",
    "{\"error\":\"slow down\"}\n",
    "{\"response\":\" wörld ✓\"}\n",
    "{\"response\":\"end\"}",
);

fn decode_all<'a>(chunks: impl IntoIterator<Item = &'a str>) -> Vec<DecodedEvent> {
    let mut decoder = StreamDecoder::new();
    let mut events = Vec::new();

    for chunk in chunks {
        events.extend(decoder.feed(chunk));
    }
    events.extend(decoder.flush());

    events
}

#[test]
fn test_split_record_emitted_after_second_feed() {
    let mut decoder = StreamDecoder::new();

    assert!(decoder.feed("{\"respo").is_empty());
    assert_eq!(
        decoder.feed("nse\":\"hi\"}\n"),
        vec![DecodedEvent::Content { text: "hi".to_string() }]
    );
}

#[test]
fn test_multiple_records_in_one_chunk() {
    let mut decoder = StreamDecoder::new();

    let events = decoder.feed("{\"response\":\"a\"}\n{\"response\":\"b\"}\n");
    assert_eq!(
        events,
        vec![DecodedEvent::content("a"), DecodedEvent::content("b")]
    );
}

#[test]
fn test_trailing_partial_flushed() {
    let mut decoder = StreamDecoder::new();

    let events = decoder.feed("{\"response\":\"x\"}\n{\"response\":\"y\"}");
    assert_eq!(events, vec![DecodedEvent::content("x")]);

    assert_eq!(decoder.flush(), Some(DecodedEvent::content("y")));
}

#[test]
fn test_malformed_line() {
    let mut decoder = StreamDecoder::new();

    let events = decoder.feed("not-json\n");
    assert_eq!(
        events,
        vec![DecodedEvent::Failure {
            message: PARSE_FAILURE_MESSAGE.to_string()
        }]
    );
    assert_eq!(PARSE_FAILURE_MESSAGE, "Error parsing server response");
}

#[test]
fn test_malformed_line_does_not_stop_stream() {
    let mut decoder = StreamDecoder::new();

    let events = decoder.feed("{bad\n{\"response\":\"still here\"}\n");
    assert_eq!(
        events,
        vec![
            DecodedEvent::parse_failure(),
            DecodedEvent::content("still here")
        ]
    );
}

#[test]
fn test_in_band_error_field() {
    let mut decoder = StreamDecoder::new();

    let events = decoder.feed("{\"error\":\"rate limited\"}\n");
    assert_eq!(events, vec![DecodedEvent::failure("rate limited")]);
}

#[test]
fn test_empty_flush_is_idempotent() {
    let mut decoder = StreamDecoder::new();
    assert_eq!(decoder.flush(), None);
    assert_eq!(decoder.flush(), None);

    let mut decoder = StreamDecoder::new();
    assert!(decoder.feed(" \t ").is_empty());
    assert_eq!(decoder.flush(), None);
    assert_eq!(decoder.flush(), None);
}

#[test]
fn test_flush_malformed_tail() {
    let mut decoder = StreamDecoder::new();
    decoder.feed("{\"response\":");

    assert_eq!(decoder.flush(), Some(DecodedEvent::parse_failure()));
    assert_eq!(decoder.flush(), None);
}

#[test]
fn test_record_without_known_fields_is_dropped() {
    let mut decoder = StreamDecoder::new();

    assert!(decoder.feed("{\"foo\":\"bar\"}\n").is_empty());
    assert_eq!(decoder.flush(), None);
}

#[test]
fn test_order_preserved_for_every_two_cut_partition() {
    let expected = decode_all([DOCUMENT]);
    assert_eq!(
        expected,
        vec![
            DecodedEvent::content("Hello"),
            DecodedEvent::parse_failure(),
            DecodedEvent::failure("slow down"),
            DecodedEvent::content(" wörld ✓"),
            DecodedEvent::content("end"),
        ]
    );

    let boundaries: Vec<usize> = DOCUMENT
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(DOCUMENT.len()))
        .collect();

    for (n, &first) in boundaries.iter().enumerate() {
        for &second in &boundaries[n..] {
            let chunks = [
                &DOCUMENT[..first],
                &DOCUMENT[first..second],
                &DOCUMENT[second..],
            ];
            assert_eq!(
                decode_all(chunks),
                expected,
                "cuts at {} and {}",
                first,
                second
            );
        }
    }
}

#[test]
fn test_order_preserved_for_single_byte_chunks() {
    let expected = decode_all([DOCUMENT]);

    let mut decoder = StreamDecoder::new();
    let mut events = Vec::new();
    for byte in DOCUMENT.as_bytes() {
        events.extend(decoder.feed_bytes(std::slice::from_ref(byte)));
    }
    events.extend(decoder.flush());

    assert_eq!(events, expected);
}

#[test]
fn test_long_unterminated_record_fed_byte_by_byte() {
    let text = "ab".repeat(200_000);
    let record = format!("{{\"response\":\"{}\"}}", text);

    let mut decoder = StreamDecoder::new();
    for byte in record.as_bytes() {
        assert!(decoder.feed_bytes(std::slice::from_ref(byte)).is_empty());
    }

    assert_eq!(decoder.pending().len(), record.len());
    assert_eq!(decoder.flush(), Some(DecodedEvent::content(text)));
}
