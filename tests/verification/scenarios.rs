//! Indexer responses run through the full verifier.

use super::fixtures::{
    native_response, token_response, transfer_call, GATEWAY_HEX, PAYER_HEX, USDT_HEX, USDT_TEXT,
};
use tronpay::{
    parse_trongrid_response, AddressCodec, ExpectedPayment, Reason, TokenKind,
    TransactionVerifier, VerifierConfig,
};

fn verifier() -> TransactionVerifier {
    TransactionVerifier::from_config(&VerifierConfig::default()).unwrap()
}

fn gateway_text() -> String {
    AddressCodec::default().hex_to_text(GATEWAY_HEX).unwrap()
}

#[test]
fn test_native_payment_accepted() {
    let verifier = verifier();
    let json = native_response("a1", PAYER_HEX, GATEWAY_HEX, 12_500_000, "SUCCESS");
    let record = parse_trongrid_response(&json).unwrap();

    let expected =
        ExpectedPayment::for_request(gateway_text(), "12.5", TokenKind::Trx, verifier.contracts())
            .unwrap();
    let verdict = verifier.verify_by_id("a1", record.as_ref(), &expected);

    assert!(verdict.valid, "{:?}", verdict.messages());
    let details = verdict.details.unwrap();
    assert_eq!(details.to, gateway_text());
    assert_eq!(details.display_amount(), "12.5");
    assert_eq!(
        details.received_at().unwrap().timestamp_millis(),
        1_700_000_000_000
    );
}

#[test]
fn test_usdt_payment_accepted() {
    let verifier = verifier();
    // 25 USDT
    let call = transfer_call(GATEWAY_HEX, "17d7840");
    let record = parse_trongrid_response(&token_response("b2", USDT_HEX, &call)).unwrap();

    let expected =
        ExpectedPayment::for_request(GATEWAY_HEX, "25", TokenKind::Usdt, verifier.contracts())
            .unwrap();
    let verdict = verifier.verify_by_id("b2", record.as_ref(), &expected);

    assert!(verdict.valid, "{:?}", verdict.messages());
    let details = verdict.details.unwrap();
    assert_eq!(details.token_kind, TokenKind::Usdt);
    assert_eq!(details.amount.to_string(), "25000000");
}

#[test]
fn test_usdt_contract_given_in_text_form_still_resolves() {
    let verifier = verifier();
    let call = transfer_call(GATEWAY_HEX, "1f4");
    let record = parse_trongrid_response(&token_response("b3", USDT_TEXT, &call))
        .unwrap()
        .unwrap();

    let expected = ExpectedPayment::new(gateway_text(), 500u32.into(), TokenKind::Usdt);
    let verdict = verifier.verify(&record, &expected);
    assert!(verdict.valid, "{:?}", verdict.messages());
}

#[test]
fn test_amount_beyond_u64_is_exact() {
    let verifier = verifier();
    let call = transfer_call(GATEWAY_HEX, "ffffffffffffffffffffffff");
    let record = parse_trongrid_response(&token_response("c3", USDT_HEX, &call))
        .unwrap()
        .unwrap();

    let amount = "79228162514264337593543950335".parse().unwrap();
    let exact = ExpectedPayment::new(gateway_text(), amount, TokenKind::Usdt);
    assert!(verifier.verify(&record, &exact).valid);

    let off_by_one = ExpectedPayment::new(
        gateway_text(),
        "79228162514264337593543950334".parse().unwrap(),
        TokenKind::Usdt,
    );
    let verdict = verifier.verify(&record, &off_by_one);
    assert_eq!(verdict.reasons.len(), 1);
    assert_eq!(verdict.reasons[0].code(), "amount_mismatch");
}

#[test]
fn test_reverted_transaction() {
    let json = native_response("d4", PAYER_HEX, GATEWAY_HEX, 1, "REVERT");
    let record = parse_trongrid_response(&json).unwrap();

    let expected = ExpectedPayment::new(gateway_text(), 1u32.into(), TokenKind::Trx);
    let verdict = verifier().verify_by_id("d4", record.as_ref(), &expected);

    assert!(!verdict.valid);
    assert_eq!(verdict.messages(), vec!["transaction not found or failed"]);
    assert!(verdict.details.is_none());
}

#[test]
fn test_unknown_transaction() {
    let record = parse_trongrid_response("{}").unwrap();
    let expected = ExpectedPayment::new(gateway_text(), 1u32.into(), TokenKind::Trx);
    let verdict = verifier().verify_by_id("e5", record.as_ref(), &expected);

    assert_eq!(verdict.reasons, vec![Reason::TransactionNotFoundOrFailed]);
}

#[test]
fn test_replayed_record_for_other_id() {
    let json = native_response("f6", PAYER_HEX, GATEWAY_HEX, 1, "SUCCESS");
    let record = parse_trongrid_response(&json).unwrap();
    let expected = ExpectedPayment::new(gateway_text(), 1u32.into(), TokenKind::Trx);

    let verdict = verifier().verify_by_id("other", record.as_ref(), &expected);
    assert_eq!(
        verdict.reasons,
        vec![Reason::TransactionIdMismatch {
            requested: "other".to_string(),
            actual: "f6".to_string(),
        }]
    );
}

#[test]
fn test_gateway_paying_itself() {
    let json = native_response("g7", GATEWAY_HEX, GATEWAY_HEX, 1_000_000, "SUCCESS");
    let record = parse_trongrid_response(&json).unwrap().unwrap();
    let expected = ExpectedPayment::new(gateway_text(), 1_000_000u32.into(), TokenKind::Trx);

    let verdict = verifier().verify(&record, &expected);
    assert!(!verdict.valid);
    assert_eq!(verdict.reasons, vec![Reason::SelfPayment]);
    assert!(verdict.details.is_some());
}

#[test]
fn test_wrong_amount_and_token_reported_together() {
    let json = native_response("h8", PAYER_HEX, GATEWAY_HEX, 1_000_000, "SUCCESS");
    let record = parse_trongrid_response(&json).unwrap().unwrap();
    let expected = ExpectedPayment::new(gateway_text(), 2_000_000u32.into(), TokenKind::Usdt);

    let verdict = verifier().verify(&record, &expected);
    let codes: Vec<_> = verdict.reasons.iter().map(Reason::code).collect();
    assert_eq!(codes, vec!["amount_mismatch", "token_kind_mismatch"]);
}

#[test]
fn test_fake_token_contract() {
    let fake = "41000000000000000000000000000000000000dead";
    let call = transfer_call(GATEWAY_HEX, "1f4");
    let record = parse_trongrid_response(&token_response("i9", fake, &call))
        .unwrap()
        .unwrap();

    let verifier = verifier();
    let expected =
        ExpectedPayment::for_request(GATEWAY_HEX, "0.0005", TokenKind::Usdt, verifier.contracts())
            .unwrap();
    let verdict = verifier.verify(&record, &expected);

    let codes: Vec<_> = verdict.reasons.iter().map(Reason::code).collect();
    assert_eq!(codes, vec!["token_kind_mismatch", "contract_mismatch"]);
    assert_eq!(verdict.details.unwrap().token_kind, TokenKind::Other);
}

#[test]
fn test_approve_call_is_not_a_payment() {
    let call = transfer_call(GATEWAY_HEX, "1f4").replacen("a9059cbb", "095ea7b3", 1);
    let record = parse_trongrid_response(&token_response("j0", USDT_HEX, &call))
        .unwrap()
        .unwrap();

    let expected = ExpectedPayment::new(gateway_text(), 500u32.into(), TokenKind::Usdt);
    let verdict = verifier().verify(&record, &expected);

    assert_eq!(verdict.reasons.len(), 1);
    assert_eq!(verdict.reasons[0].code(), "call_data_rejected");
    assert!(verdict.details.is_none());
}

#[test]
fn test_verdict_serializes_for_callers() {
    let json = native_response("k1", PAYER_HEX, GATEWAY_HEX, 1, "SUCCESS");
    let record = parse_trongrid_response(&json).unwrap().unwrap();
    let expected = ExpectedPayment::new(gateway_text(), 2u32.into(), TokenKind::Trx);

    let verdict = verifier().verify(&record, &expected);
    let value = serde_json::to_value(&verdict).unwrap();

    assert_eq!(value["valid"], false);
    assert_eq!(value["reasons"][0]["code"], "amount_mismatch");
    assert_eq!(value["reasons"][0]["expected"], "2");
    assert_eq!(value["details"]["from"], AddressCodec::default().hex_to_text(PAYER_HEX).unwrap());
}
