use super::*;
use crate::registry::{CodecLabels, CodecRegistry};
use crate::test_support::{tiled_and_linear, EngineCall, FakeEngine};

const ALL_INTENTS: [UiIntent; 12] = [
    UiIntent::Width(Step::Backward),
    UiIntent::Width(Step::Forward),
    UiIntent::Height(Step::Backward),
    UiIntent::Height(Step::Forward),
    UiIntent::Content(Step::Backward),
    UiIntent::Content(Step::Forward),
    UiIntent::Byte(Step::Backward),
    UiIntent::Byte(Step::Forward),
    UiIntent::Bit(Step::Backward),
    UiIntent::Bit(Step::Forward),
    UiIntent::Row {
        step: Step::Backward,
        fast: false,
    },
    UiIntent::Row {
        step: Step::Forward,
        fast: true,
    },
];

#[test]
fn intents_without_session_issue_nothing() {
    let engine = FakeEngine::new(tiled_and_linear());
    let log = engine.log();
    let mut lifecycle = SessionLifecycle::new(engine);

    for intent in ALL_INTENTS {
        assert_eq!(dispatch_intent(&mut lifecycle, intent), Dispatch::Ignored);
    }
    assert!(log.calls().is_empty());
}

#[test]
fn content_step_follows_navigation_mode() {
    assert_eq!(
        UiIntent::Content(Step::Forward).to_command(NavigationMode::Tiled),
        EngineCommand::StepTile(Step::Forward)
    );
    assert_eq!(
        UiIntent::Content(Step::Backward).to_command(NavigationMode::Linear),
        EngineCommand::StepPixel(Step::Backward)
    );
}

#[test]
fn mode_independent_intents_map_identically() {
    for intent in ALL_INTENTS
        .into_iter()
        .filter(|intent| !matches!(intent, UiIntent::Content(_)))
    {
        assert_eq!(
            intent.to_command(NavigationMode::Tiled),
            intent.to_command(NavigationMode::Linear)
        );
    }
}

#[test]
fn issued_command_is_followed_by_redraw() {
    let engine = FakeEngine::new(tiled_and_linear());
    let registry = CodecRegistry::load(&engine, &CodecLabels::curated());
    let log = engine.log();
    let mut lifecycle = SessionLifecycle::new(engine);
    lifecycle.open_file(&registry, vec![0; 64]).expect("open");
    log.clear();

    let dispatch = dispatch_intent(
        &mut lifecycle,
        UiIntent::Row {
            step: Step::Forward,
            fast: true,
        },
    );

    assert_eq!(
        dispatch,
        Dispatch::Issued(EngineCommand::StepRow {
            step: Step::Forward,
            fast: true
        })
    );
    assert_eq!(
        log.calls(),
        vec![
            EngineCall::StepRow(1, Step::Forward, true),
            EngineCall::Render(1),
            EngineCall::RefreshStatus(1),
        ]
    );
}

#[test]
fn every_intent_reaches_its_engine_call() {
    let engine = FakeEngine::new(tiled_and_linear());
    let registry = CodecRegistry::load(&engine, &CodecLabels::curated());
    let log = engine.log();
    let mut lifecycle = SessionLifecycle::new(engine);
    lifecycle.open_file(&registry, vec![0; 64]).expect("open");
    log.clear();

    for intent in ALL_INTENTS {
        dispatch_intent(&mut lifecycle, intent);
    }

    assert_eq!(
        log.commands(),
        vec![
            EngineCall::StepWidth(1, Step::Backward),
            EngineCall::StepWidth(1, Step::Forward),
            EngineCall::StepHeight(1, Step::Backward),
            EngineCall::StepHeight(1, Step::Forward),
            EngineCall::StepTile(1, Step::Backward),
            EngineCall::StepTile(1, Step::Forward),
            EngineCall::StepByte(1, Step::Backward),
            EngineCall::StepByte(1, Step::Forward),
            EngineCall::StepBit(1, Step::Backward),
            EngineCall::StepBit(1, Step::Forward),
            EngineCall::StepRow(1, Step::Backward, false),
            EngineCall::StepRow(1, Step::Forward, true),
        ]
    );
}

#[test]
fn controls_toggle_with_mode() {
    assert_eq!(
        NavigationControls::for_mode(Some(NavigationMode::Tiled)),
        NavigationControls {
            tile_stepping: true,
            pixel_stepping: false
        }
    );
    assert_eq!(
        NavigationControls::for_mode(Some(NavigationMode::Linear)),
        NavigationControls {
            tile_stepping: false,
            pixel_stepping: true
        }
    );
    assert_eq!(NavigationControls::for_mode(None), NavigationControls::default());
}

#[test]
fn fast_row_jump_has_its_own_command_name() {
    assert_eq!(
        EngineCommand::StepRow {
            step: Step::Forward,
            fast: false
        }
        .name(),
        "step_row"
    );
    assert_eq!(
        EngineCommand::StepRow {
            step: Step::Forward,
            fast: true
        }
        .name(),
        "step_row_fast"
    );
    assert_eq!(EngineCommand::JumpToOffset(3).name(), "jump_to_offset");
}
