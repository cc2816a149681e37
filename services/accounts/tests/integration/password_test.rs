use orzu_accounts::error::AccountsError;
use orzu_accounts::usecase::password::{
    ForgotPasswordInput, ForgotPasswordUseCase, ResetPasswordInput, ResetPasswordUseCase,
    verify_secret,
};
use orzu_domain::account::AuthStatus;

use crate::helpers::{
    MockAccountRepo, MockVerifyCodeRepo, RecordingNotifier, TEST_JWT_SECRET, test_email_account,
    test_phone_account, test_verify_code,
};

// ── ForgotPasswordUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_code_and_credentials_for_phone_identity() {
    let account = test_phone_account();

    let codes = MockVerifyCodeRepo::empty();
    let codes_handle = codes.codes_handle();
    let notifier = RecordingNotifier::empty();
    let sent_handle = notifier.sent_handle();

    let uc = ForgotPasswordUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes,
        notifier,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = uc
        .execute(ForgotPasswordInput {
            identity: "+998901234567".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.user_id, account.id);
    assert_eq!(out.auth_status, AuthStatus::New);
    assert!(!out.pair.access_token.is_empty());
    assert!(!out.pair.refresh_token.is_empty());

    let stored = codes_handle.lock().unwrap();
    assert_eq!(stored.len(), 1, "expected a reset code for phone identity");

    let sent = sent_handle.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "+998901234567");
}

#[tokio::test]
async fn should_skip_code_issuance_for_email_identity() {
    // Documented asymmetry: email-classified identities get no code but the
    // call still succeeds and returns credentials.
    let account = test_email_account();

    let codes = MockVerifyCodeRepo::empty();
    let codes_handle = codes.codes_handle();
    let notifier = RecordingNotifier::empty();
    let sent_handle = notifier.sent_handle();

    let uc = ForgotPasswordUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        codes,
        notifier,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = uc
        .execute(ForgotPasswordInput {
            identity: "user@example.com".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(out.user_id, account.id);
    assert!(!out.pair.access_token.is_empty());
    assert!(codes_handle.lock().unwrap().is_empty(), "no code expected");
    assert!(sent_handle.lock().unwrap().is_empty(), "nothing delivered");
}

#[tokio::test]
async fn should_honor_active_code_guard_on_forgot() {
    let account = test_phone_account();
    let active = test_verify_code(account.id);

    let uc = ForgotPasswordUseCase {
        repo: MockAccountRepo::new(vec![account]),
        codes: MockVerifyCodeRepo::new(vec![active]),
        notifier: RecordingNotifier::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(ForgotPasswordInput {
            identity: "+998901234567".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AccountsError::CodeStillValid)),
        "expected CodeStillValid, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_for_unknown_identity() {
    let uc = ForgotPasswordUseCase {
        repo: MockAccountRepo::empty(),
        codes: MockVerifyCodeRepo::empty(),
        notifier: RecordingNotifier::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(ForgotPasswordInput {
            identity: "+998901234567".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AccountsError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_identity() {
    let uc = ForgotPasswordUseCase {
        repo: MockAccountRepo::empty(),
        codes: MockVerifyCodeRepo::empty(),
        notifier: RecordingNotifier::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(ForgotPasswordInput {
            identity: "???".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(AccountsError::ValidationFailed)),
        "expected ValidationFailed, got {result:?}"
    );
}

// ── ResetPasswordUseCase ─────────────────────────────────────────────────────

#[tokio::test]
async fn should_set_password_and_return_fresh_pair() {
    let account = test_phone_account();

    let repo = MockAccountRepo::new(vec![account.clone()]);
    let accounts_handle = repo.accounts_handle();

    let uc = ResetPasswordUseCase {
        repo,
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let out = uc
        .execute(
            account.id,
            ResetPasswordInput {
                new_secret: "correct horse battery".to_owned(),
            },
        )
        .await
        .unwrap();

    assert_eq!(out.auth_status, AuthStatus::New);
    assert!(!out.pair.access_token.is_empty());

    let accounts = accounts_handle.lock().unwrap();
    let hash = accounts[0].password_hash.as_deref().expect("hash stored");
    assert!(verify_secret("correct horse battery", hash));
}

#[tokio::test]
async fn should_reject_short_secret() {
    let account = test_phone_account();

    let uc = ResetPasswordUseCase {
        repo: MockAccountRepo::new(vec![account.clone()]),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(
            account.id,
            ResetPasswordInput {
                new_secret: "short".to_owned(),
            },
        )
        .await;

    assert!(
        matches!(result, Err(AccountsError::ValidationFailed)),
        "expected ValidationFailed, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_not_found_when_account_deleted() {
    let uc = ResetPasswordUseCase {
        repo: MockAccountRepo::empty(),
        jwt_secret: TEST_JWT_SECRET.to_owned(),
    };

    let result = uc
        .execute(
            uuid::Uuid::new_v4(),
            ResetPasswordInput {
                new_secret: "correct horse battery".to_owned(),
            },
        )
        .await;

    assert!(
        matches!(result, Err(AccountsError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
