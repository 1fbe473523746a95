use std::time::{Duration, Instant};

use anyhow::Result;
use bidifix_config::BidifixConfig;
use bidifix_dom::Selector;
use bidifix_engine::{Engine, FieldEvent, MutationNotice, PassTrigger};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

const CHAT_PAGE: &str = r#"
<html><body>
    <div class="chat-message"><p id="msg">שלום עולם, how are you?</p></div>
    <textarea id="composer"></textarea>
</body></html>
"#;

#[test]
fn load_runs_the_initial_pass() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    let outcome = engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", Instant::now());

    assert_eq!(outcome.trigger, PassTrigger::InitialLoad);
    assert_eq!(outcome.report.containers, 1);
    assert!(outcome.report.styled > 0);
    assert_eq!(engine.platform(), Some("Claude"));
    assert!(engine.html().contains("direction: rtl"));
    Ok(())
}

#[test]
fn catch_up_and_rescans_fall_due_over_time() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    let t0 = Instant::now();
    engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", t0);

    assert!(engine.run_due(t0 + ms(500)).is_empty());

    let outcomes = engine.run_due(t0 + ms(1000));
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].trigger, PassTrigger::CatchUp);
    assert_eq!(
        outcomes[0].report.styled, 0,
        "a stable document is not restyled"
    );

    let outcomes = engine.run_due(t0 + ms(2000));
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].trigger, PassTrigger::IntervalRescan);
    Ok(())
}

#[test]
fn irrelevant_mutations_schedule_nothing() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    let t0 = Instant::now();
    engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", t0);

    assert!(!engine.note_mutation(&MutationNotice::new("12:34"), t0 + ms(10)));
    assert!(
        engine.run_due(t0 + ms(200)).is_empty(),
        "neutral-only mutations must not trigger a pass"
    );
    Ok(())
}

#[test]
fn relevant_mutations_run_a_debounced_pass() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    let t0 = Instant::now();
    engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", t0);

    assert!(engine.note_mutation(&MutationNotice::new("עוד טקסט"), t0 + ms(10)));
    assert!(engine.run_due(t0 + ms(50)).is_empty(), "debounce window");

    let outcomes = engine.run_due(t0 + ms(110));
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].trigger, PassTrigger::Mutation);
    Ok(())
}

#[test]
fn field_events_apply_immediately() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", Instant::now());

    let selector = Selector::parse("#composer").unwrap();
    let composer = engine.page().select_ids(&selector)[0];

    assert!(engine.field_event(&FieldEvent::new(composer, "שאלה חדשה")));
    assert_eq!(
        engine.page().style_property(composer, "direction").as_deref(),
        Some("rtl")
    );

    assert!(!engine.field_event(&FieldEvent::new(composer, "")));
    assert_eq!(engine.page().style_property(composer, "direction"), None);
    Ok(())
}

#[test]
fn path_changes_trigger_a_settle_pass() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    let t0 = Instant::now();
    engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", t0);

    // Too early: the poll cadence gates the comparison entirely.
    assert!(!engine.observe_path("/chat/xyz", t0 + ms(100)));

    // At the poll slot with an unchanged path, nothing happens.
    assert!(!engine.observe_path("/chat/abc", t0 + ms(1000)));

    // Next slot sees the change and schedules the settle pass.
    assert!(engine.observe_path("/chat/xyz", t0 + ms(2000)));
    let outcomes = engine.run_due(t0 + ms(3000));
    assert!(
        outcomes
            .iter()
            .any(|outcome| outcome.trigger == PassTrigger::Navigation),
        "expected a navigation pass after the settle delay"
    );

    // The new path is now current; observing it again is a no-op.
    assert!(!engine.observe_path("/chat/xyz", t0 + ms(4000)));
    Ok(())
}

#[test]
fn annotate_now_runs_outside_the_scheduler() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    let t0 = Instant::now();
    engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", t0);

    let report = engine.annotate_now();
    assert_eq!(report.styled, 0, "an unchanged document stays stable");
    assert!(
        engine.run_due(t0 + ms(500)).is_empty(),
        "the forced pass consumed no scheduled deadline"
    );
    Ok(())
}

#[test]
fn load_resets_annotation_state() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    let t0 = Instant::now();
    let first = engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", t0);
    assert_eq!(first.report.containers, 1);

    // Loading again rediscovers everything; old markers are gone.
    let second = engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", t0 + ms(10));
    assert_eq!(second.report.containers, 1);
    assert!(second.report.styled > 0);
    Ok(())
}

#[test]
fn config_timings_and_options_are_honored() -> Result<()> {
    let mut config = BidifixConfig::default();
    config.scheduler.mutation_debounce_ms = 10;
    config.annotator.input_fields = false;

    let mut engine = Engine::new(&config);
    let t0 = Instant::now();
    engine.load(CHAT_PAGE, "https://claude.ai/chat/abc", t0);

    let selector = Selector::parse("#composer").unwrap();
    let composer = engine.page().select_ids(&selector)[0];
    assert!(
        !engine.field_event(&FieldEvent::new(composer, "שלום")),
        "field handling is off"
    );

    engine.note_mutation(&MutationNotice::new("טקסט"), t0 + ms(1));
    let outcomes = engine.run_due(t0 + ms(12));
    assert_eq!(outcomes.len(), 1, "shortened debounce applies");
    assert_eq!(outcomes[0].trigger, PassTrigger::Mutation);
    Ok(())
}

#[test]
fn unknown_hosts_run_with_the_generic_profile() -> Result<()> {
    let mut engine = Engine::new(&BidifixConfig::default());
    let outcome = engine.load(CHAT_PAGE, "https://chat.example.org/", Instant::now());

    assert_eq!(engine.platform(), None);
    assert_eq!(
        outcome.report.containers, 1,
        "discovery works the same on unknown hosts"
    );
    Ok(())
}
