use crate::events::DecodedEvent;

/// Consumer of decoded events, split into reply text and failures
pub trait EventSink {
    /// A fragment of reply text
    fn on_chunk(&mut self, text: &str);

    /// An in-band, malformed-record or transport failure
    fn on_error(&mut self, message: &str);

    /// Route an event to the matching callback
    fn dispatch(&mut self, event: DecodedEvent) {
        match event {
            DecodedEvent::Content { text } => self.on_chunk(&text),
            DecodedEvent::Failure { message } => self.on_error(&message),
        }
    }
}

impl EventSink for Vec<DecodedEvent> {
    fn on_chunk(&mut self, text: &str) {
        self.push(DecodedEvent::content(text));
    }

    fn on_error(&mut self, message: &str) {
        self.push(DecodedEvent::failure(message));
    }

    fn dispatch(&mut self, event: DecodedEvent) {
        self.push(event);
    }
}

/// Sink built from an `on_chunk` closure and an optional `on_error` closure
///
/// Failures are discarded when no error callback is installed.
pub struct CallbackSink<C, E = fn(&str)>
where
    C: FnMut(&str),
    E: FnMut(&str),
{
    on_chunk: C,
    on_error: Option<E>,
}

impl<C> CallbackSink<C>
where
    C: FnMut(&str),
{
    pub fn new(on_chunk: C) -> Self {
        Self {
            on_chunk,
            on_error: None,
        }
    }
}

impl<C, E> CallbackSink<C, E>
where
    C: FnMut(&str),
    E: FnMut(&str),
{
    pub fn with_error(on_chunk: C, on_error: E) -> Self {
        Self {
            on_chunk,
            on_error: Some(on_error),
        }
    }
}

impl<C, E> EventSink for CallbackSink<C, E>
where
    C: FnMut(&str),
    E: FnMut(&str),
{
    fn on_chunk(&mut self, text: &str) {
        (self.on_chunk)(text);
    }

    fn on_error(&mut self, message: &str) {
        match self.on_error.as_mut() {
            Some(callback) => callback(message),
            None => tracing::debug!("No error callback installed, dropping: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_routing() {
        let mut chunks = Vec::new();
        let mut errors = Vec::new();

        {
            let mut sink = CallbackSink::with_error(
                |text: &str| chunks.push(text.to_string()),
                |message: &str| errors.push(message.to_string()),
            );
            sink.dispatch(DecodedEvent::content("a"));
            sink.dispatch(DecodedEvent::failure("b"));
            sink.dispatch(DecodedEvent::content("c"));
        }

        assert_eq!(chunks, vec!["a", "c"]);
        assert_eq!(errors, vec!["b"]);
    }

    #[test]
    fn test_missing_error_callback() {
        let mut chunks = Vec::new();

        {
            let mut sink = CallbackSink::new(|text: &str| chunks.push(text.to_string()));
            sink.dispatch(DecodedEvent::failure("ignored"));
            sink.dispatch(DecodedEvent::content("kept"));
        }

        assert_eq!(chunks, vec!["kept"]);
    }

    #[test]
    fn test_vec_sink_preserves_events() {
        let mut events: Vec<DecodedEvent> = Vec::new();
        events.dispatch(DecodedEvent::content("x"));
        events.on_error("y");

        assert_eq!(
            events,
            vec![DecodedEvent::content("x"), DecodedEvent::failure("y")]
        );
    }
}
