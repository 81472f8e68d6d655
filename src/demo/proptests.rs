//! Property-based tests for the demo state machine
//!
//! These verify the key invariants hold across all possible inputs.

use super::*;
use crate::gateway::{AnalysisResult, Citation, IntelligenceResult};
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_mode() -> impl Strategy<Value = DemoMode> {
    prop_oneof![Just(DemoMode::Intelligence), Just(DemoMode::Analysis)]
}

fn arb_citation() -> impl Strategy<Value = Citation> {
    ("[a-zA-Z ]{0,20}", "[a-z]{3,10}").prop_map(|(title, host)| Citation {
        title,
        url: format!("https://{host}.example.com"),
    })
}

fn arb_intelligence_result() -> impl Strategy<Value = IntelligenceResult> {
    (
        "[a-zA-Z0-9 .]{0,60}",
        proptest::collection::vec(arb_citation(), 0..4),
    )
        .prop_map(|(summary_text, citations)| IntelligenceResult {
            summary_text,
            citations,
        })
}

fn arb_analysis_result() -> impl Strategy<Value = AnalysisResult> {
    "[a-zA-Z0-9 .:]{0,60}".prop_map(|report_text| AnalysisResult {
        report_text,
    })
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        arb_intelligence_result().prop_map(Outcome::Intelligence),
        arb_analysis_result().prop_map(Outcome::Analysis),
    ]
}

fn arb_request_state() -> impl Strategy<Value = RequestState> {
    prop_oneof![
        Just(RequestState::Idle),
        arb_mode().prop_map(|mode| RequestState::InFlight { mode }),
    ]
}

fn arb_snapshot() -> impl Strategy<Value = DemoSnapshot> {
    (
        arb_mode(),
        arb_request_state(),
        proptest::option::of(arb_intelligence_result()),
        proptest::option::of(arb_analysis_result()),
    )
        .prop_map(
            |(active_mode, request_state, intelligence, analysis)| DemoSnapshot {
                active_mode,
                request_state,
                intelligence,
                analysis,
            },
        )
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (arb_mode(), "[a-zA-Z0-9 ]{0,30}")
            .prop_map(|(mode, input)| Event::Submit { mode, input }),
        arb_mode().prop_map(|mode| Event::SelectMode { mode }),
        arb_outcome().prop_map(|outcome| Event::Settled { outcome }),
    ]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// An accepted submission always goes InFlight and carries exactly one
    /// gateway-call effect.
    #[test]
    fn accepted_submit_dispatches_exactly_one_call(
        snapshot in arb_snapshot(),
        mode in arb_mode(),
        input in "[a-zA-Z0-9 ]{1,30}",
    ) {
        if let Ok(result) = transition(&snapshot, Event::Submit { mode, input }) {
            prop_assert_eq!(result.snapshot.request_state, RequestState::InFlight { mode });
            let calls = result
                .effects
                .iter()
                .filter(|e| matches!(e, Effect::CallGateway { .. }))
                .count();
            prop_assert_eq!(calls, 1);
        }
    }

    /// While InFlight, every submission is rejected as Busy.
    #[test]
    fn in_flight_rejects_every_submit(
        snapshot in arb_snapshot(),
        mode in arb_mode(),
        input in "[a-zA-Z0-9 ]{0,30}",
    ) {
        prop_assume!(snapshot.request_state.is_in_flight());
        let result = transition(&snapshot, Event::Submit { mode, input });
        prop_assert_eq!(result, Err(TransitionError::Busy));
    }

    /// An accepted settle always lands back in Idle with the matching slot
    /// replaced and the other slot untouched.
    #[test]
    fn settle_returns_to_idle(snapshot in arb_snapshot(), outcome in arb_outcome()) {
        if let Ok(result) = transition(&snapshot, Event::Settled { outcome: outcome.clone() }) {
            prop_assert_eq!(result.snapshot.request_state, RequestState::Idle);
            match outcome {
                Outcome::Intelligence(r) => {
                    prop_assert_eq!(result.snapshot.intelligence, Some(r));
                    prop_assert_eq!(result.snapshot.analysis, snapshot.analysis);
                }
                Outcome::Analysis(r) => {
                    prop_assert_eq!(result.snapshot.analysis, Some(r));
                    prop_assert_eq!(result.snapshot.intelligence, snapshot.intelligence);
                }
            }
        }
    }

    /// Every accepted transition broadcasts the new snapshot.
    #[test]
    fn every_transition_broadcasts(snapshot in arb_snapshot(), event in arb_event()) {
        if let Ok(result) = transition(&snapshot, event) {
            prop_assert!(result.effects.contains(&Effect::Broadcast));
        }
    }

    /// Mode selection never touches request state or result slots.
    #[test]
    fn select_mode_only_changes_active_mode(snapshot in arb_snapshot(), mode in arb_mode()) {
        let result = transition(&snapshot, Event::SelectMode { mode }).unwrap();
        prop_assert_eq!(result.snapshot.active_mode, mode);
        prop_assert_eq!(result.snapshot.request_state, snapshot.request_state);
        prop_assert_eq!(result.snapshot.intelligence, snapshot.intelligence);
        prop_assert_eq!(result.snapshot.analysis, snapshot.analysis);
    }
}
