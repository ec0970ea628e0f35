//! End-to-end tests for the salary advance lifecycle, driven through
//! `AdvanceService` over the in-memory store.

use std::sync::Arc;

use rust_decimal_macros::dec;

use core_kernel::{ApplicationId, CustomerId};
use domain_lending::{
    AdvanceService, CollectionStatus, DisbursementStatus, InMemoryApplicationStore,
    LendingError, RepaymentStatus, RiskCategory, Stage, VideoKycStatus,
};

fn service() -> AdvanceService {
    AdvanceService::new(Arc::new(InMemoryApplicationStore::new()))
}

fn credit_dates(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| format!("2025-{:02}-01", (i % 12) + 1))
        .collect()
}

#[tokio::test]
async fn test_full_happy_path_closes_application() {
    let service = service();
    let customer = CustomerId::new_v7();

    let app = service
        .create_application(customer, Some("Asha Rao".to_string()))
        .await
        .unwrap();
    assert_eq!(app.current_stage, Stage::Apply);
    assert_eq!(app.timeline.len(), 1);
    assert_eq!(app.timeline[0].step, "Apply");

    let app = service
        .submit_kyc(app.id, "ABCDE1234F", "123456789012", true)
        .await
        .unwrap();
    assert_eq!(app.current_stage, Stage::IncomeCheck);
    assert!(app.kyc.pan_verified);
    assert!(app.kyc.aadhaar_verified);
    assert!(app.kyc.face_match_passed);

    let app = service
        .submit_income(app.id, "Acme Industries", dec!(60000), credit_dates(12))
        .await
        .unwrap();
    assert_eq!(app.current_stage, Stage::RiskScoring);
    assert_eq!(app.income.stability_score, Some(dec!(100)));

    let app = service.score_risk(app.id).await.unwrap();
    assert_eq!(app.current_stage, Stage::Offer);
    assert_eq!(app.risk.bureau_score, Some(780));
    assert_eq!(app.risk.risk_category, Some(RiskCategory::Low));

    let app = service.generate_offer(app.id).await.unwrap();
    let amount = app.offer.amount.unwrap();
    assert_eq!(amount.amount(), dec!(36000.00));
    assert_eq!(app.offer.processing_fee.unwrap().amount(), dec!(720.00));
    assert_eq!(app.offer.interest_rate_annual, Some(dec!(24.0)));
    assert!(app.offer.repayment_date.is_some());

    let app = service.accept_offer(app.id, "en").await.unwrap();
    assert_eq!(app.current_stage, Stage::Consent);
    assert!(app.consent.accepted);
    assert_eq!(app.consent.language.as_deref(), Some("en"));

    let app = service.complete_video_kyc(app.id).await.unwrap();
    assert_eq!(app.current_stage, Stage::VideoKyc);
    assert_eq!(app.video_kyc.status, VideoKycStatus::Completed);

    let app = service.disburse(app.id).await.unwrap();
    assert_eq!(app.current_stage, Stage::Repayment);
    assert_eq!(app.disbursement.status, DisbursementStatus::Done);
    assert_eq!(app.disbursement.amount, Some(amount));
    assert!(app
        .disbursement
        .reference_id
        .as_deref()
        .unwrap()
        .starts_with("NEFT-"));
    assert_eq!(app.repayment.status, RepaymentStatus::Due);
    assert_eq!(app.repayment.due_date, app.offer.repayment_date);

    let app = service.record_repayment(app.id, dec!(0)).await.unwrap();
    assert_eq!(app.current_stage, Stage::Closed);
    assert_eq!(app.repayment.status, RepaymentStatus::Paid);
    assert!(app.repayment.paid_date.is_some());
    assert_eq!(app.collection.status, CollectionStatus::None);

    // One audit event per successful transition, in order
    let steps: Vec<&str> = app.timeline.iter().map(|e| e.step.as_str()).collect();
    assert_eq!(
        steps,
        vec![
            "Apply",
            "KYC",
            "Income Check",
            "Risk Scoring",
            "Offer",
            "Consent",
            "Video KYC",
            "Disbursement",
            "Repayment",
        ]
    );
}

#[tokio::test]
async fn test_late_repayment_marks_collection_settled() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    service
        .submit_kyc(app.id, "ABCDE1234F", "123456789012", true)
        .await
        .unwrap();
    service
        .submit_income(app.id, "Acme", dec!(45000), credit_dates(6))
        .await
        .unwrap();
    service.score_risk(app.id).await.unwrap();
    service.generate_offer(app.id).await.unwrap();
    service.accept_offer(app.id, "hi").await.unwrap();
    service.disburse(app.id).await.unwrap();

    let app = service.record_repayment(app.id, dec!(250)).await.unwrap();
    assert_eq!(app.repayment.status, RepaymentStatus::Paid);
    assert_eq!(app.repayment.late_fee.unwrap().amount(), dec!(250.00));
    assert_eq!(app.collection.status, CollectionStatus::Settled);
}

#[tokio::test]
async fn test_medium_risk_offer_sizing() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    service
        .submit_income(app.id, "Acme", dec!(40000), credit_dates(3))
        .await
        .unwrap();
    let app = service.score_risk(app.id).await.unwrap();
    assert_eq!(app.risk.bureau_score, Some(730));
    assert_eq!(app.risk.risk_category, Some(RiskCategory::Medium));

    let app = service.generate_offer(app.id).await.unwrap();
    assert_eq!(app.offer.amount.unwrap().amount(), dec!(16000.00));
    assert_eq!(app.offer.processing_fee.unwrap().amount(), dec!(320.00));
}

#[tokio::test]
async fn test_kyc_normalizes_pan() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();

    let app = service
        .submit_kyc(app.id, "  abcde1234f  ", "123456789012", false)
        .await
        .unwrap();
    assert_eq!(app.kyc.pan.as_deref(), Some("ABCDE1234F"));
    assert!(!app.kyc.selfie_captured);
}

#[tokio::test]
async fn test_invalid_kyc_leaves_stored_state_untouched() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();

    let err = service
        .submit_kyc(app.id, "SHORT", "123456789012", true)
        .await
        .unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));

    let err = service
        .submit_kyc(app.id, "ABCDE1234F", "12345", true)
        .await
        .unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));

    let err = service
        .submit_kyc(app.id, "ABCDE1234F", "12345678901x", true)
        .await
        .unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));

    let stored = service.get_application(app.id).await.unwrap();
    assert_eq!(stored.current_stage, Stage::Apply);
    assert_eq!(stored.timeline.len(), 1);
    assert!(stored.kyc.pan.is_none());
}

#[tokio::test]
async fn test_income_rejects_non_positive_salary() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();

    for salary in [dec!(0), dec!(-1000)] {
        let err = service
            .submit_income(app.id, "Acme", salary, credit_dates(3))
            .await
            .unwrap_err();
        assert!(matches!(err, LendingError::Validation(_)));
    }

    let stored = service.get_application(app.id).await.unwrap();
    assert!(stored.income.avg_net_salary.is_none());
}

#[tokio::test]
async fn test_risk_scoring_requires_income() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();

    let err = service.score_risk(app.id).await.unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));
}

#[tokio::test]
async fn test_offer_requires_risk_profile() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    service
        .submit_income(app.id, "Acme", dec!(30000), credit_dates(3))
        .await
        .unwrap();

    let err = service.generate_offer(app.id).await.unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));
}

#[tokio::test]
async fn test_consent_requires_offer() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();

    let err = service.accept_offer(app.id, "en").await.unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));
}

#[tokio::test]
async fn test_disbursement_requires_consent() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    service
        .submit_income(app.id, "Acme", dec!(60000), credit_dates(6))
        .await
        .unwrap();
    service.score_risk(app.id).await.unwrap();
    service.generate_offer(app.id).await.unwrap();

    let err = service.disburse(app.id).await.unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));

    let stored = service.get_application(app.id).await.unwrap();
    assert_eq!(stored.disbursement.status, DisbursementStatus::Pending);
}

#[tokio::test]
async fn test_repayment_requires_disbursement() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();

    let err = service.record_repayment(app.id, dec!(0)).await.unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));
}

#[tokio::test]
async fn test_repayment_cannot_be_recorded_twice() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    service
        .submit_income(app.id, "Acme", dec!(60000), credit_dates(6))
        .await
        .unwrap();
    service.score_risk(app.id).await.unwrap();
    service.generate_offer(app.id).await.unwrap();
    service.accept_offer(app.id, "en").await.unwrap();
    service.disburse(app.id).await.unwrap();
    service.record_repayment(app.id, dec!(0)).await.unwrap();

    let err = service.record_repayment(app.id, dec!(0)).await.unwrap_err();
    assert!(matches!(err, LendingError::Validation(_)));
}

#[tokio::test]
async fn test_unknown_application_is_not_found() {
    let service = service();

    let err = service
        .get_application(ApplicationId::new_v7())
        .await
        .unwrap_err();
    assert!(matches!(err, LendingError::NotFound(_)));
}

#[tokio::test]
async fn test_current_application_picks_latest_for_customer() {
    let service = service();
    let customer = CustomerId::new_v7();

    service.create_application(customer, None).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = service.create_application(customer, None).await.unwrap();
    service
        .create_application(CustomerId::new_v7(), None)
        .await
        .unwrap();

    let current = service.current_application(customer).await.unwrap();
    assert_eq!(current.id, second.id);
}

#[tokio::test]
async fn test_current_application_not_found_for_new_customer() {
    let service = service();

    let err = service
        .current_application(CustomerId::new_v7())
        .await
        .unwrap_err();
    assert!(matches!(err, LendingError::NotFound(_)));
}

#[tokio::test]
async fn test_list_applications_newest_first() {
    let service = service();

    let first = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = service.create_application(CustomerId::new_v7(), None).await.unwrap();

    let all = service.list_applications().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);
}

#[tokio::test]
async fn test_out_of_order_call_does_not_roll_stage_back() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    service
        .submit_income(app.id, "Acme", dec!(60000), credit_dates(6))
        .await
        .unwrap();
    service.score_risk(app.id).await.unwrap();
    service.generate_offer(app.id).await.unwrap();
    service.accept_offer(app.id, "en").await.unwrap();
    let app = service.disburse(app.id).await.unwrap();
    assert_eq!(app.current_stage, Stage::Repayment);

    // Late KYC resubmission is accepted but the pointer keeps the
    // furthest stage reached
    let app = service
        .submit_kyc(app.id, "ABCDE1234F", "123456789012", true)
        .await
        .unwrap();
    assert_eq!(app.current_stage, Stage::Repayment);
    assert!(app.kyc.pan_verified);
}

#[tokio::test]
async fn test_risk_timeline_event_carries_category() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    service
        .submit_income(app.id, "Acme", dec!(25000), credit_dates(4))
        .await
        .unwrap();

    let app = service.score_risk(app.id).await.unwrap();
    assert_eq!(app.risk.risk_category, Some(RiskCategory::High));

    let event = app.timeline.last().unwrap();
    assert_eq!(event.step, "Risk Scoring");
    assert_eq!(
        event.status,
        "Bureau score 680, risk category HIGH (simulated)"
    );
}

#[tokio::test]
async fn test_offer_event_meta_carries_terms() {
    let service = service();
    let app = service.create_application(CustomerId::new_v7(), None).await.unwrap();
    service
        .submit_income(app.id, "Acme", dec!(50000), credit_dates(6))
        .await
        .unwrap();
    service.score_risk(app.id).await.unwrap();

    let app = service.generate_offer(app.id).await.unwrap();
    let event = app.timeline.last().unwrap();
    assert_eq!(event.step, "Offer");
    assert!(event.meta.get("amount").is_some());
    assert!(event.meta.get("processing_fee").is_some());
    assert!(event.meta.get("repayment_date").is_some());
}
