//! End-to-end session scenarios driven through the public API.

use std::sync::Arc;
use std::time::Duration;

use teleprompt::audio::frame::AudioFrame;
use teleprompt::audio::ingress::{ChannelIngress, MockIngress};
use teleprompt::clock::{Clock, MockClock};
use teleprompt::config::SessionConfig;
use teleprompt::stt::MockTranscriber;
use teleprompt::suggest::MockSuggester;
use teleprompt::{SessionEvent, SessionPhase, SessionPipeline};
use tokio::sync::mpsc;

fn frame(samples: Vec<i16>) -> AudioFrame {
    AudioFrame::new(samples, 16000, 1)
}

fn driven_pipeline(
    active_checks: usize,
    transcriber: MockTranscriber,
    suggester: MockSuggester,
) -> (
    SessionPipeline<Arc<MockIngress>, Arc<MockTranscriber>, Arc<MockSuggester>>,
    Arc<MockIngress>,
    Arc<MockSuggester>,
    MockClock,
    mpsc::Receiver<SessionEvent>,
) {
    let ingress = Arc::new(MockIngress::active_for(active_checks));
    let suggester = Arc::new(suggester);
    let clock = MockClock::new();
    let (tx, rx) = mpsc::channel(256);

    let pipeline = SessionPipeline::new(
        ingress.clone(),
        Arc::new(transcriber),
        suggester.clone(),
        &SessionConfig::default(),
        tx,
    )
    .with_clock(Box::new(clock.clone()));

    (pipeline, ingress, suggester, clock, rx)
}

fn collect(rx: &mut mpsc::Receiver<SessionEvent>) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn capture_never_activates_exits_silently() {
    let (pipeline, _ingress, suggester, _clock, mut rx) =
        driven_pipeline(0, MockTranscriber::new(), MockSuggester::new());

    let export = pipeline.run().await;

    assert!(export.is_none());
    assert!(collect(&mut rx).is_empty());
    assert_eq!(suggester.call_count(), 0);
}

#[tokio::test]
async fn hello_world_lands_in_history_and_context() {
    let (mut pipeline, ingress, _suggester, clock, mut rx) = driven_pipeline(
        1,
        MockTranscriber::new().then_text("hello world"),
        MockSuggester::new(),
    );
    ingress.push_batch(vec![frame(vec![1i16; 160])]);

    let phase = pipeline.tick(clock.now()).await;
    assert_eq!(phase, SessionPhase::Active);

    let state = pipeline.state();
    let state = state.lock().unwrap();
    assert_eq!(state.transcript_lines().len(), 1);
    assert!(state.transcript_lines()[0].ends_with(": hello world"));
    assert_eq!(state.context(), "hello world\n");

    let events = collect(&mut rx);
    assert_eq!(events[0], SessionEvent::CaptureActive(true));
    assert!(matches!(&events[1], SessionEvent::Transcript(_)));
}

#[tokio::test]
async fn cadence_window_fires_once_then_waits_for_new_context() {
    // t=0: transcript "hello" arrives. t=16: suggestion succeeds.
    // t=17: interval has passed only once; everything is consumed, no call.
    // Next eligible success is strictly after t=31.
    let (mut pipeline, ingress, suggester, clock, _rx) = driven_pipeline(
        8,
        MockTranscriber::new().then_text("hello"),
        MockSuggester::new().then_tip("Tip: X").then_tip("Tip: Z"),
    );
    ingress.push_batch(vec![frame(vec![1i16; 160])]);

    pipeline.tick(clock.now()).await; // t=0
    assert_eq!(suggester.call_count(), 0);

    clock.advance(Duration::from_secs(16)); // t=16
    pipeline.tick(clock.now()).await;
    assert_eq!(suggester.call_count(), 1);
    assert_eq!(suggester.received_contexts(), vec!["hello\n".to_string()]);
    assert_eq!(pipeline.state().lock().unwrap().tips(), ["Tip: X"]);

    clock.advance(Duration::from_secs(1)); // t=17
    pipeline.tick(clock.now()).await;
    assert_eq!(suggester.call_count(), 1);

    // New context arrives but the window from t=16 has not elapsed at t=31.
    ingress.push_batch(vec![frame(vec![2i16; 160])]);
    clock.advance(Duration::from_secs(14)); // t=31
    pipeline.tick(clock.now()).await;
    assert_eq!(suggester.call_count(), 1);

    clock.advance(Duration::from_secs(1)); // t=32
    pipeline.tick(clock.now()).await;
    // The earlier batch produced no transcription (script exhausted → no
    // speech), so the unconsumed slice is still empty: no second call.
    assert_eq!(suggester.call_count(), 1);
}

#[tokio::test]
async fn suggestion_failure_retries_same_cursor_with_grown_slice() {
    let (mut pipeline, ingress, suggester, clock, _rx) = driven_pipeline(
        6,
        MockTranscriber::new().then_text("hello").then_text("world"),
        MockSuggester::new().then_failure("llm down").then_tip("Tip: Y"),
    );

    ingress.push_batch(vec![frame(vec![1i16; 160])]);
    pipeline.tick(clock.now()).await; // t=0: "hello"

    clock.advance(Duration::from_secs(16));
    pipeline.tick(clock.now()).await; // fails; cursor stays at 0
    assert!(pipeline.state().lock().unwrap().tips().is_empty());

    ingress.push_batch(vec![frame(vec![2i16; 160])]);
    clock.advance(Duration::from_secs(16));
    pipeline.tick(clock.now()).await; // "world" arrives, then retry succeeds

    assert_eq!(
        suggester.received_contexts(),
        vec!["hello\n".to_string(), "hello\nworld\n".to_string()]
    );
    assert_eq!(pipeline.state().lock().unwrap().tips(), ["Tip: Y"]);
}

#[tokio::test]
async fn transcription_failure_changes_nothing_and_loop_continues() {
    let (mut pipeline, ingress, _suggester, clock, _rx) = driven_pipeline(
        2,
        MockTranscriber::new().then_failure("stt down"),
        MockSuggester::new(),
    );
    ingress.push_batch(vec![frame(vec![1i16; 160])]);

    let phase = pipeline.tick(clock.now()).await;
    assert_eq!(phase, SessionPhase::Active);

    let state = pipeline.state();
    {
        let state = state.lock().unwrap();
        assert!(state.transcript_lines().is_empty());
        assert_eq!(state.context(), "");
    }

    // The loop keeps going: another tick is still Active.
    assert_eq!(pipeline.tick(clock.now()).await, SessionPhase::Active);
}

#[tokio::test]
async fn deactivation_exports_both_histories_verbatim_exactly_once() {
    let (mut pipeline, ingress, _suggester, clock, mut rx) = driven_pipeline(
        2,
        MockTranscriber::new().then_text("hello"),
        MockSuggester::new().then_tip("Tip: X"),
    );
    ingress.push_batch(vec![frame(vec![1i16; 160])]);

    pipeline.tick(clock.now()).await;
    clock.advance(Duration::from_secs(16));
    pipeline.tick(clock.now()).await;

    // Activity checks exhausted: this tick finalizes.
    let phase = pipeline.tick(clock.now()).await;
    assert_eq!(phase, SessionPhase::Finalized);

    let events = collect(&mut rx);
    let exports: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::Export(export) => Some(export.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(exports.len(), 1);
    assert_eq!(exports[0].transcript.len(), 1);
    assert!(exports[0].transcript[0].ends_with(": hello"));
    assert_eq!(exports[0].ai_tips, ["Tip: X"]);

    // Terminal: further ticks emit nothing.
    pipeline.tick(clock.now()).await;
    assert!(collect(&mut rx).is_empty());
}

#[tokio::test]
async fn host_fed_session_runs_to_export() {
    let (handle, ingress) = ChannelIngress::channel();
    let (tx, mut rx) = mpsc::channel(256);

    let pipeline = SessionPipeline::new(
        Arc::new(ingress),
        Arc::new(
            MockTranscriber::new()
                .then_text("good morning")
                .then_text("let me check pricing"),
        ),
        Arc::new(MockSuggester::new()),
        &SessionConfig {
            frame_batch_timeout_ms: 20,
            ..SessionConfig::default()
        },
        tx,
    );

    handle.set_active(true);
    handle.push_frame(frame(vec![1i16; 160]));

    let run = tokio::spawn(pipeline.run());

    // Wait for the first transcript, feed one more batch, then wait again.
    let mut transcripts = Vec::new();
    while transcripts.is_empty() {
        match rx.recv().await {
            Some(SessionEvent::Transcript(line)) => transcripts.push(line),
            Some(_) => {}
            None => panic!("event channel closed early"),
        }
    }
    handle.push_frame(frame(vec![2i16; 160]));
    while transcripts.len() < 2 {
        match rx.recv().await {
            Some(SessionEvent::Transcript(line)) => transcripts.push(line),
            Some(_) => {}
            None => panic!("event channel closed early"),
        }
    }

    handle.set_active(false);
    let export = run.await.unwrap().expect("export expected");

    assert_eq!(export.transcript, transcripts);
    assert!(export.transcript[0].ends_with(": good morning"));
    assert!(export.transcript[1].ends_with(": let me check pricing"));
}

#[tokio::test]
async fn duration_events_flow_while_session_runs() {
    let (handle, ingress) = ChannelIngress::channel();
    let (tx, mut rx) = mpsc::channel(256);

    let pipeline = SessionPipeline::new(
        Arc::new(ingress),
        Arc::new(MockTranscriber::new()),
        Arc::new(MockSuggester::new()),
        &SessionConfig {
            frame_batch_timeout_ms: 20,
            ..SessionConfig::default()
        },
        tx,
    );

    handle.set_active(true);
    let run = tokio::spawn(pipeline.run());

    // The tracker publishes its first elapsed value almost immediately.
    let mut saw_duration = false;
    for _ in 0..50 {
        match tokio::time::timeout(Duration::from_millis(200), rx.recv()).await {
            Ok(Some(SessionEvent::Duration(_))) => {
                saw_duration = true;
                break;
            }
            Ok(Some(_)) => {}
            _ => break,
        }
    }
    assert!(saw_duration);

    handle.set_active(false);
    let export = run.await.unwrap();
    assert!(export.is_none());
}
