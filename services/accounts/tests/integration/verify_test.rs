use chrono::{Duration, Utc};

use orzu_accounts::error::AccountsError;
use orzu_accounts::usecase::verify::{CheckVerifyInput, CheckVerifyUseCase, ResendCodeUseCase};
use orzu_auth_types::token::validate_access_token;
use orzu_domain::account::AuthStatus;

use crate::helpers::{
    FailingNotifier, MockAccountRepo, MockVerifyCodeRepo, RecordingNotifier, TEST_JWT_SECRET,
    test_email_account, test_phone_account, test_verify_code,
};

// ── CheckVerifyUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_advance_new_account_on_first_confirm() {
    let account = test_phone_account();
    let code = test_verify_code(account.id);

    let repo = MockAccountRepo::new(vec![account.clone()]);
    let accounts_handle = repo.accounts_handle();
    let codes = MockVerifyCodeRepo::new(vec![code]);
    let codes_handle = codes.codes_handle();

    let uc = CheckVerifyUseCase {
        repo,
        codes,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = uc
        .execute(
            account.id,
            CheckVerifyInput {
                code: "4821".to_owned(),
            },
        )
        .await
        .unwrap();

    assert_eq!(out.auth_status, AuthStatus::CodeVerified);

    // The fresh pair reflects the advanced status.
    let info = validate_access_token(&out.pair.access_token, TEST_JWT_SECRET).unwrap();
    assert_eq!(info.auth_status, AuthStatus::CodeVerified.as_i16());

    let accounts = accounts_handle.lock().unwrap();
    assert_eq!(accounts[0].auth_status, AuthStatus::CodeVerified);

    let stored_codes = codes_handle.lock().unwrap();
    assert!(stored_codes[0].is_confirmed, "code should be confirmed");
}

#[tokio::test]
async fn should_fail_second_confirm_with_same_code() {
    let account = test_phone_account();
    let code = test_verify_code(account.id);

    let repo = MockAccountRepo::new(vec![account.clone()]);
    let codes = MockVerifyCodeRepo::new(vec![code]);

    let uc = CheckVerifyUseCase {
        repo,
        codes,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    uc.execute(
        account.id,
        CheckVerifyInput {
            code: "4821".to_owned(),
        },
    )
    .await
    .unwrap();

    // Codes confirm exactly once.
    let result = uc
        .execute(
            account.id,
            CheckVerifyInput {
                code: "4821".to_owned(),
            },
        )
        .await;

    assert!(
        matches!(result, Err(AccountsError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_not_advance_status_past_code_verified() {
    let mut account = test_phone_account();
    account.auth_status = AuthStatus::CodeVerified;
    let code = test_verify_code(account.id);

    let repo = MockAccountRepo::new(vec![account.clone()]);
    let accounts_handle = repo.accounts_handle();
    let codes = MockVerifyCodeRepo::new(vec![code]);
    let codes_handle = codes.codes_handle();

    let uc = CheckVerifyUseCase {
        repo,
        codes,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = uc
        .execute(
            account.id,
            CheckVerifyInput {
                code: "4821".to_owned(),
            },
        )
        .await
        .unwrap();

    // Confirming while already verified marks the code but leaves status.
    assert_eq!(out.auth_status, AuthStatus::CodeVerified);
    assert_eq!(
        accounts_handle.lock().unwrap()[0].auth_status,
        AuthStatus::CodeVerified
    );
    assert!(codes_handle.lock().unwrap()[0].is_confirmed);
}

#[tokio::test]
async fn should_reject_expired_code() {
    let account = test_phone_account();
    let mut code = test_verify_code(account.id);
    code.expires_at = Utc::now() - Duration::seconds(1);

    let uc = CheckVerifyUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes: MockVerifyCodeRepo::new(vec![code]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(
            account.id,
            CheckVerifyInput {
                code: "4821".to_owned(),
            },
        )
        .await;

    assert!(
        matches!(result, Err(AccountsError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_wrong_code() {
    let account = test_phone_account();
    let code = test_verify_code(account.id);

    let uc = CheckVerifyUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes: MockVerifyCodeRepo::new(vec![code]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(
            account.id,
            CheckVerifyInput {
                code: "0000".to_owned(),
            },
        )
        .await;

    assert!(
        matches!(result, Err(AccountsError::InvalidOrExpiredCode)),
        "expected InvalidOrExpiredCode, got {result:?}"
    );
}

#[tokio::test]
async fn should_confirm_all_rows_for_duplicate_issuance() {
    let account = test_phone_account();
    let first = test_verify_code(account.id);
    let second = test_verify_code(account.id);

    let codes = MockVerifyCodeRepo::new(vec![first, second]);
    let codes_handle = codes.codes_handle();

    let uc = CheckVerifyUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    uc.execute(
        account.id,
        CheckVerifyInput {
            code: "4821".to_owned(),
        },
    )
    .await
    .unwrap();

    let stored = codes_handle.lock().unwrap();
    assert!(
        stored.iter().all(|c| c.is_confirmed),
        "every matching row should be confirmed"
    );
}

// ── ResendCodeUseCase ────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_and_deliver_new_code() {
    let account = test_phone_account();

    let codes = MockVerifyCodeRepo::empty();
    let codes_handle = codes.codes_handle();
    let notifier = RecordingNotifier::empty();
    let sent_handle = notifier.sent_handle();

    let uc = ResendCodeUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes,
        notifier,
    };

    uc.execute(account.id).await.unwrap();

    let stored = codes_handle.lock().unwrap();
    assert_eq!(stored.len(), 1, "expected exactly one code issued");
    assert_eq!(stored[0].user_id, account.id);
    assert_eq!(stored[0].code.len(), 4, "code should be 4 digits");
    assert!(!stored[0].is_confirmed);
    assert!(stored[0].expires_at > Utc::now());

    let sent = sent_handle.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "+998901234567");
    assert_eq!(sent[0].1, stored[0].code);
}

#[tokio::test]
async fn should_throttle_resend_while_code_active() {
    let account = test_phone_account();
    let active = test_verify_code(account.id);

    let uc = ResendCodeUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes: MockVerifyCodeRepo::new(vec![active]),
        notifier: RecordingNotifier::empty(),
    };

    let result = uc.execute(account.id).await;

    assert!(
        matches!(result, Err(AccountsError::CodeStillValid)),
        "expected CodeStillValid, got {result:?}"
    );
}

#[tokio::test]
async fn should_throttle_again_after_successful_resend() {
    let account = test_phone_account();

    let uc = ResendCodeUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes: MockVerifyCodeRepo::empty(),
        notifier: RecordingNotifier::empty(),
    };

    uc.execute(account.id).await.unwrap();
    let result = uc.execute(account.id).await;

    assert!(
        matches!(result, Err(AccountsError::CodeStillValid)),
        "expected CodeStillValid, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_resend_for_email_channel() {
    let account = test_email_account();

    let uc = ResendCodeUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes: MockVerifyCodeRepo::empty(),
        notifier: RecordingNotifier::empty(),
    };

    let result = uc.execute(account.id).await;

    assert!(
        matches!(result, Err(AccountsError::UnsupportedChannel)),
        "expected UnsupportedChannel, got {result:?}"
    );
}

#[tokio::test]
async fn should_report_throttle_before_channel() {
    // An email account with an active code reports the throttle, not the
    // unsupported channel.
    let account = test_email_account();
    let active = test_verify_code(account.id);

    let uc = ResendCodeUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes: MockVerifyCodeRepo::new(vec![active]),
        notifier: RecordingNotifier::empty(),
    };

    let result = uc.execute(account.id).await;

    assert!(
        matches!(result, Err(AccountsError::CodeStillValid)),
        "expected CodeStillValid, got {result:?}"
    );
}

#[tokio::test]
async fn delivery_failure_does_not_roll_back_issuance() {
    let account = test_phone_account();

    let codes = MockVerifyCodeRepo::empty();
    let codes_handle = codes.codes_handle();

    let uc = ResendCodeUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes,
        notifier: FailingNotifier,
    };

    uc.execute(account.id)
        .await
        .expect("delivery failure must not fail the resend");

    assert_eq!(
        codes_handle.lock().unwrap().len(),
        1,
        "code should be persisted despite delivery failure"
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_user() {
    let uc = ResendCodeUseCase {
        repo: MockAccountRepo::empty(),
        codes: MockVerifyCodeRepo::empty(),
        notifier: RecordingNotifier::empty(),
    };

    let result = uc.execute(uuid::Uuid::new_v4()).await;

    assert!(
        matches!(result, Err(AccountsError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
