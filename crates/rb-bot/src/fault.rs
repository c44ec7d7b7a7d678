//! Diagnostics for failures at the message-handling boundary.

use std::any::Any;
use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::sync::{LazyLock, Mutex, Once};

use tokio::task;

use rb_protocol::{InboundEvent, Reply};

/// Name of the attachment carrying the error chain.
pub const TRACE_FILENAME: &str = "Stacktrace.txt";

/// Backtraces of panicked tasks, waiting to be collected by the boundary.
static PANIC_TRACES: LazyLock<Mutex<HashMap<task::Id, String>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

static HOOK: Once = Once::new();

/// Install a panic hook that records a backtrace for panics inside tokio
/// tasks, keyed by task id. The previous hook still runs. Idempotent.
pub fn install_panic_hook() {
    HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            if let Some(id) = task::try_id() {
                let trace = Backtrace::force_capture().to_string();
                if let Ok(mut traces) = PANIC_TRACES.lock() {
                    traces.insert(id, trace);
                }
            }
            previous(info);
        }));
    });
}

/// Remove and return the backtrace recorded for a panicked task.
pub fn take_panic_trace(id: task::Id) -> Option<String> {
    PANIC_TRACES.lock().ok()?.remove(&id)
}

/// What went wrong while handling one event.
#[derive(Debug, Clone)]
pub struct FaultReport {
    pub sender: String,
    pub channel: String,
    pub content: String,
    pub trace: String,
}

impl FaultReport {
    pub fn new(event: &InboundEvent, trace: impl Into<String>) -> Self {
        Self {
            sender: event
                .sender_name
                .clone()
                .unwrap_or_else(|| event.sender_id.clone()),
            channel: event.channel.to_string(),
            content: event.text.clone(),
            trace: trace.into(),
        }
    }

    /// From a handler error, with its full cause chain.
    pub fn from_error(event: &InboundEvent, error: &anyhow::Error) -> Self {
        Self::new(event, format!("{error:?}"))
    }

    /// From a panic payload caught at the task boundary, plus the backtrace
    /// recorded by the panic hook when one is installed.
    pub fn from_panic(
        event: &InboundEvent,
        payload: &(dyn Any + Send),
        backtrace: Option<String>,
    ) -> Self {
        let mut trace = format!("panic: {}", panic_message(payload));
        if let Some(backtrace) = backtrace {
            trace.push_str("\n\nstack backtrace:\n");
            trace.push_str(&backtrace);
        }
        Self::new(event, trace)
    }

    /// Diagnostic text for the admin conversation.
    pub fn message(&self) -> String {
        format!(
            "*Failed to handle message:*\nfrom: {}\nchannel: {}\ncontent: {}",
            self.sender, self.channel, self.content
        )
    }

    pub fn replies(&self) -> [Reply; 2] {
        [
            Reply::text(self.message()),
            Reply::file(TRACE_FILENAME, self.trace.clone()),
        ]
    }
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use rb_protocol::ChannelRef;

    fn event() -> InboundEvent {
        InboundEvent::new("U1", false, ChannelRef::new("C-ids"), "<@U0BOT> table kunde")
    }

    #[test]
    fn message_names_sender_channel_content() {
        let report = FaultReport::new(&event(), "boom");
        assert_eq!(
            report.message(),
            "*Failed to handle message:*\nfrom: U1\nchannel: C-ids\ncontent: <@U0BOT> table kunde"
        );
    }

    #[test]
    fn sender_name_preferred_over_id() {
        let mut event = event();
        event.sender_name = Some("Jordan".into());
        assert_eq!(FaultReport::new(&event, "").sender, "Jordan");
    }

    #[test]
    fn error_chain_lands_in_trace() {
        let error = Err::<(), _>(std::io::Error::other("disk gone"))
            .context("loading dataset")
            .unwrap_err();
        let report = FaultReport::from_error(&event(), &error);
        assert!(report.trace.contains("loading dataset"));
        assert!(report.trace.contains("disk gone"));

        let [text, file] = report.replies();
        assert!(text.as_text().is_some());
        assert!(matches!(file, Reply::File { filename, .. } if filename == TRACE_FILENAME));
    }

    #[test]
    fn panic_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("index out of bounds");
        assert_eq!(panic_message(payload.as_ref()), "index out of bounds");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }

    #[test]
    fn panic_trace_carries_backtrace_when_present() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        let bare = FaultReport::from_panic(&event(), payload.as_ref(), None);
        assert_eq!(bare.trace, "panic: boom");

        let full = FaultReport::from_panic(&event(), payload.as_ref(), Some("0: handle".into()));
        assert_eq!(full.trace, "panic: boom\n\nstack backtrace:\n0: handle");
    }

    #[tokio::test]
    async fn hook_records_backtrace_per_task() {
        install_panic_hook();
        install_panic_hook();

        let handle: task::JoinHandle<()> = tokio::spawn(async { panic!("lookup exploded") });
        let join_error = handle.await.unwrap_err();
        assert!(join_error.is_panic());

        let trace = take_panic_trace(join_error.id()).unwrap();
        assert!(!trace.is_empty());
        assert!(take_panic_trace(join_error.id()).is_none());
    }
}
