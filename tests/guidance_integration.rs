//! Integration tests for advice, scripts and session history
//!
//! Tests the presentation-side flow: resolve/advise → SessionEvent → snapshot

use guardian360::core::{
    accountability_script, resolve, AdvisoryMatcher, ScriptSheet,
};
use guardian360::types::{
    AdviceResult, AudienceCategory, FamilyProfile, GraceLevel, HistoryKind, ReasonCode,
    SessionEvent, SessionState,
};

#[test]
fn test_advice_topics_cover_common_situations() {
    let advisor = AdvisoryMatcher::default();

    let result = advisor.advise("She asked her dad after I said no");
    assert!(matches!(result, AdviceResult::Topic { ref topic, .. } if topic == "said no"));

    let result = advisor.advise("I lost my cool at breakfast");
    let advice = result.advice().unwrap();
    assert_eq!(advice.tiers.gentle, accountability_script());
}

#[test]
fn test_advice_is_deterministic() {
    let advisor = AdvisoryMatcher::default();
    let input = "We keep arguing about screen time";
    assert_eq!(advisor.advise(input), advisor.advise(input));
}

#[test]
fn test_advice_safety_gate() {
    let advisor = AdvisoryMatcher::default();
    let result = advisor.advise("My partner hit me during an argument about custody");
    assert_eq!(result.reason(), ReasonCode::R101_SAFETY_OVERRIDE);
    assert!(result.advice().is_none());
}

#[test]
fn test_session_records_resolutions_and_advice() {
    let advisor = AdvisoryMatcher::default();
    let profile = FamilyProfile::new("Dad", "Riley");

    let mut session = SessionState::new(profile);
    for (input, audience) in [
        ("stop running", AudienceCategory::Child),
        ("he was late", AudienceCategory::Teen),
        ("he hit me", AudienceCategory::Teen),
    ] {
        let result = resolve(input, audience);
        session = session.reduce(SessionEvent::Resolved {
            input: input.to_string(),
            audience,
            result,
        });
    }
    let question = "we disagree on chores";
    session = session.reduce(SessionEvent::Advised {
        input: question.to_string(),
        result: advisor.advise(question),
    });

    let reasons: Vec<ReasonCode> = session.history().map(|e| e.reason).collect();
    assert_eq!(
        reasons,
        vec![
            ReasonCode::R102_TRIGGER_MATCHED,
            ReasonCode::R102_TRIGGER_MATCHED,
            ReasonCode::R101_SAFETY_OVERRIDE,
            ReasonCode::R151_TOPIC_MATCHED,
        ]
    );
    assert_eq!(session.safety_override_count(), 1);

    let last = session.history().last().unwrap();
    assert_eq!(last.kind, HistoryKind::Advise);
    assert!(last.audience.is_none());
}

#[test]
fn test_script_sheet_follows_session() {
    let session = SessionState::new(FamilyProfile::new("Mom", "Casey"))
        .reduce(SessionEvent::GraceChanged(GraceLevel::Meltdown));
    let sheet = ScriptSheet::new(&session.profile, session.grace);
    assert!(sheet.grace_alert.is_some());
    assert!(sheet.unified_front.iter().all(|e| e.script.contains("Casey")));

    let calmer = session.reduce(SessionEvent::GraceChanged(GraceLevel::Calm));
    let sheet = ScriptSheet::new(&calmer.profile, calmer.grace);
    assert!(sheet.grace_alert.is_none());
}

#[test]
fn test_profile_update_changes_scripts() {
    let session = SessionState::default()
        .reduce(SessionEvent::ProfileUpdated(FamilyProfile::new("Mom", "Taylor")));
    let sheet = ScriptSheet::new(&session.profile, session.grace);
    assert_eq!(sheet.caption, "Logged in as: Mom | Unified Front with: Taylor");
}

#[test]
fn test_session_snapshot_serializes() {
    let session = SessionState::default().reduce(SessionEvent::Resolved {
        input: "quiet please".to_string(),
        audience: AudienceCategory::Child,
        result: resolve("quiet please", AudienceCategory::Child),
    });
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["grace"], "calm");
    assert_eq!(json["history"][0]["reason"], "R102_TRIGGER_MATCHED");
    assert_eq!(json["history"][0]["audience"], "child");
}
