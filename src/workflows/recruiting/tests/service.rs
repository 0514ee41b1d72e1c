use std::sync::Arc;

use super::common::{
    build_service, candidate, finance_pool, FailingEmbeddings, FailingGenerator,
    KeywordEmbeddings, ScriptedGenerator, COMPLIANT_EMAIL, JOB_DESCRIPTION, SOFT_SKILL_DRAFT,
};
use crate::workflows::recruiting::service::RecruitingServiceError;

#[test]
fn blank_job_description_is_rejected_before_any_call() {
    let embeddings = Arc::new(KeywordEmbeddings::default());
    let generation = Arc::new(ScriptedGenerator::new(&[COMPLIANT_EMAIL]));
    let service = build_service(embeddings.clone(), generation.clone());

    let err = service.rank("   \n ", &finance_pool()).expect_err("rank fails");
    assert!(matches!(err, RecruitingServiceError::EmptyJobDescription));

    let err = service
        .recruiter_feedback("", "CPA bookkeeping services")
        .expect_err("feedback fails");
    assert!(matches!(err, RecruitingServiceError::EmptyJobDescription));

    assert_eq!(embeddings.calls(), 0);
    assert_eq!(generation.calls(), 0);
}

#[test]
fn blank_resume_is_rejected_for_pair_operations() {
    let generation = Arc::new(ScriptedGenerator::new(&[COMPLIANT_EMAIL]));
    let service = build_service(Arc::new(KeywordEmbeddings::default()), generation.clone());

    for result in [
        service.fit_score(JOB_DESCRIPTION, "  ").map(|_| ()),
        service.recruiter_feedback(JOB_DESCRIPTION, "").map(|_| ()),
        service.applicant_feedback(JOB_DESCRIPTION, "\n").map(|_| ()),
        service.rewrite_resume(JOB_DESCRIPTION, " ").map(|_| ()),
    ] {
        assert!(matches!(
            result.expect_err("blank resume must fail"),
            RecruitingServiceError::EmptyResume
        ));
    }
    assert_eq!(generation.calls(), 0);
}

#[test]
fn pool_with_only_blank_resumes_is_rejected() {
    let embeddings = Arc::new(KeywordEmbeddings::default());
    let service = build_service(
        embeddings.clone(),
        Arc::new(ScriptedGenerator::new(&[COMPLIANT_EMAIL])),
    );

    let pool = vec![candidate("Avery", "  "), candidate("Blake", "")];
    let err = service.rank(JOB_DESCRIPTION, &pool).expect_err("rank fails");

    assert!(matches!(err, RecruitingServiceError::NoCandidates));
    assert_eq!(embeddings.calls(), 0);
}

#[test]
fn blank_resumes_are_dropped_from_mixed_pools() {
    let service = build_service(
        Arc::new(KeywordEmbeddings::default()),
        Arc::new(ScriptedGenerator::new(&[COMPLIANT_EMAIL])),
    );

    let pool = vec![
        candidate("Avery", "CPA with corporate finance and audit background"),
        candidate("Blank", "   "),
    ];
    let ranking = service.rank(JOB_DESCRIPTION, &pool).expect("rank succeeds");

    assert_eq!(ranking.candidates.len(), 1);
    assert_eq!(ranking.candidates[0].name, "Avery");
}

#[test]
fn rank_orders_the_pool_through_the_facade() {
    let service = build_service(
        Arc::new(KeywordEmbeddings::default()),
        Arc::new(ScriptedGenerator::new(&[COMPLIANT_EMAIL])),
    );

    let ranking = service
        .rank(JOB_DESCRIPTION, &finance_pool())
        .expect("rank succeeds");
    let entries = ranking.entries();

    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].position, 1);
    assert_eq!(entries[0].name, "Avery");
    assert_eq!(entries[2].name, "Blake");
    assert!((entries[1].score_percent - 70.7).abs() < 0.1);
}

#[test]
fn embedding_outage_surfaces_as_ranking_error() {
    let service = build_service(
        Arc::new(FailingEmbeddings::default()),
        Arc::new(ScriptedGenerator::new(&[COMPLIANT_EMAIL])),
    );

    let err = service
        .rank(JOB_DESCRIPTION, &finance_pool())
        .expect_err("rank fails");
    assert!(matches!(err, RecruitingServiceError::Ranking(_)));
}

#[test]
fn screen_and_sanitize_pass_through_to_the_screener() {
    let service = build_service(
        Arc::new(KeywordEmbeddings::default()),
        Arc::new(ScriptedGenerator::new(&[COMPLIANT_EMAIL])),
    );

    let verdict = service.screen(SOFT_SKILL_DRAFT);
    assert!(!verdict.compliant);

    let sanitized = service.sanitize(SOFT_SKILL_DRAFT);
    assert!(!sanitized.contains("team player"));
}

#[test]
fn recruiter_feedback_honors_configured_retries() {
    let generation = Arc::new(ScriptedGenerator::new(&[SOFT_SKILL_DRAFT]));
    let service = build_service(Arc::new(KeywordEmbeddings::default()), generation.clone())
        .with_max_retries(1);

    let draft = service
        .recruiter_feedback(JOB_DESCRIPTION, "CPA bookkeeping services")
        .expect("draft returned");

    assert!(draft.requires_human_review());
    assert_eq!(draft.attempts_used, 2);
    assert_eq!(generation.calls(), 2);
}

#[test]
fn advisor_errors_surface_as_gateway_errors() {
    let service = build_service(
        Arc::new(KeywordEmbeddings::default()),
        Arc::new(FailingGenerator::default()),
    );

    let err = service
        .applicant_feedback(JOB_DESCRIPTION, "CPA bookkeeping services")
        .expect_err("advice fails");
    assert!(matches!(err, RecruitingServiceError::Gateway(_)));

    let err = service
        .rewrite_resume(JOB_DESCRIPTION, "CPA bookkeeping services")
        .expect_err("rewrite fails");
    assert!(matches!(err, RecruitingServiceError::Gateway(_)));
}
