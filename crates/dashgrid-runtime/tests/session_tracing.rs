//! Structured log output of interaction sessions and breakpoint switches.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use dashgrid_core::{BreakpointConfig, GridConfig, PixelPoint, Widget};
use dashgrid_layout::{Breakpoints, RESOLVE_PASS_LIMIT, resolve_collisions_report};
use dashgrid_runtime::{BreakpointManager, Dashboard, DragEngine, LayoutHost, WidgetSpec};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use web_time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    fields: HashMap<String, String>,
}

impl CapturedEvent {
    fn message(&self) -> &str {
        self.fields.get("message").map_or("", String::as_str)
    }
}

struct EventCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for EventCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }
}

fn with_captured_tracing<F: FnOnce()>(f: F) -> Vec<CapturedEvent> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = EventCapture {
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().unwrap().clone();
    captured
}

fn find<'a>(events: &'a [CapturedEvent], message: &str) -> &'a CapturedEvent {
    events
        .iter()
        .find(|e| e.message() == message)
        .unwrap_or_else(|| panic!("no `{message}` event in {events:?}"))
}

#[test]
fn drag_lifecycle_is_logged_with_fields() {
    let events = with_captured_tracing(|| {
        let mut board = Dashboard::new(GridConfig::default()).unwrap();
        board.add_widget(WidgetSpec::new("chart", 4, 2));
        let mut drag = DragEngine::default();
        let pointer = PixelPoint::new(50.0, 20.0);
        let rect = board.metrics().pixel_rect(board.widget("chart").unwrap().rect());
        assert!(drag.start(&mut board, "chart", pointer, rect));
        drag.update(&mut board, PixelPoint::new(450.0, 20.0), Instant::now());
        drag.end(&mut board);
    });

    let start = find(&events, "drag start");
    assert_eq!(start.level, tracing::Level::DEBUG);
    assert_eq!(start.fields["widget"], "chart");
    assert_eq!(start.fields["x"], "0");

    let end = find(&events, "drag end");
    assert_eq!(end.fields["moved"], "true");
    assert_eq!(end.fields["x"], "4");
    find(&events, "layout committed");
}

#[test]
fn breakpoint_switch_logs_at_info() {
    let events = with_captured_tracing(|| {
        let mut board = Dashboard::new(GridConfig::default()).unwrap();
        let mut manager = BreakpointManager::new(
            Breakpoints::new([
                ("sm", BreakpointConfig::new(576, 4)),
                ("lg", BreakpointConfig::new(992, 12)),
            ]),
            Duration::from_millis(150),
        );
        manager.check(&mut board, 1024.0);
        manager.check(&mut board, 600.0);
    });

    let switches: Vec<_> = events
        .iter()
        .filter(|e| e.message() == "breakpoint switch")
        .collect();
    assert_eq!(switches.len(), 2);
    assert!(switches.iter().all(|e| e.level == tracing::Level::INFO));
    assert_eq!(switches[1].fields["breakpoint"], "sm");
    assert_eq!(switches[1].fields["previous"], "lg");
    assert_eq!(switches[1].fields["columns"], "4");
}

#[test]
fn refused_start_is_logged_without_events() {
    let events = with_captured_tracing(|| {
        let mut board = Dashboard::new(GridConfig::default()).unwrap();
        board.add_widget(WidgetSpec::new("pinned", 2, 2).locked(true));
        board.drain_events();
        let mut drag = DragEngine::default();
        assert!(!drag.start(
            &mut board,
            "pinned",
            PixelPoint::default(),
            Default::default()
        ));
        assert!(board.events().is_empty());
    });
    assert_eq!(find(&events, "drag start refused").fields["widget"], "pinned");
}

#[test]
fn resolution_pass_limit_logs_a_warning() {
    let events = with_captured_tracing(|| {
        let stack: Vec<Widget> = (0..150u32)
            .rev()
            .map(|i| Widget::new(format!("s{i}"), 0, i, 1, 1))
            .collect();
        let report = resolve_collisions_report(&Widget::new("drop", 0, 0, 1, 1), &stack);
        assert!(!report.converged);
    });

    let warning = events
        .iter()
        .find(|e| e.level == tracing::Level::WARN)
        .unwrap_or_else(|| panic!("no warning in {events:?}"));
    assert!(warning.message().contains("pass limit"));
    assert_eq!(warning.fields["widget"], "drop");
    assert_eq!(warning.fields["passes"], RESOLVE_PASS_LIMIT.to_string());
}
