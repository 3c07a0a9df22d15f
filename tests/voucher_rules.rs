use chrono::{Duration, Utc};
use kuota_store_api::models::{
    DiscountType, QuotaType, TransactionStatus, Voucher, format_rupiah,
};
use kuota_store_api::services::voucher_service::{apply_voucher, compute_discount};
use uuid::Uuid;

fn voucher(
    discount_type: DiscountType,
    discount_value: i64,
    min_purchase: i64,
    max_usage: Option<i32>,
    current_usage: i32,
) -> Voucher {
    Voucher {
        id: Uuid::new_v4(),
        code: "TEST".into(),
        discount_type,
        discount_value,
        min_purchase,
        max_usage,
        current_usage,
        expires_at: Some(Utc::now() + Duration::days(7)),
        is_active: true,
        created_by: None,
        created_at: Utc::now(),
    }
}

#[test]
fn percentage_discount_never_exceeds_amount() {
    assert_eq!(compute_discount(DiscountType::Percentage, 10, 60000), 6000);
    assert_eq!(compute_discount(DiscountType::Percentage, 100, 60000), 60000);
    // A misconfigured 150% voucher still cannot push the price negative.
    assert_eq!(compute_discount(DiscountType::Percentage, 150, 60000), 60000);
}

#[test]
fn fixed_discount_capped_at_amount() {
    assert_eq!(compute_discount(DiscountType::Fixed, 5000, 50000), 5000);
    assert_eq!(compute_discount(DiscountType::Fixed, 10000, 8000), 8000);
}

#[test]
fn percentage_discount_uses_whole_rupiah() {
    // 10% of 5.555 floors to 555.
    assert_eq!(compute_discount(DiscountType::Percentage, 10, 5555), 555);
}

#[test]
fn welcome_voucher_prices_sixty_thousand() {
    let v = voucher(DiscountType::Percentage, 10, 50000, Some(100), 0);
    let quote = apply_voucher(&v, 60000).expect("voucher should validate");
    assert!(quote.valid);
    assert_eq!(quote.original_amount, 60000);
    assert_eq!(quote.discount_amount, 6000);
    assert_eq!(quote.final_amount, 54000);
    assert_eq!(quote.voucher.code, "TEST");
}

#[test]
fn final_amount_never_negative() {
    let v = voucher(DiscountType::Fixed, 10000, 0, None, 0);
    let quote = apply_voucher(&v, 8000).expect("voucher should validate");
    assert_eq!(quote.discount_amount, 8000);
    assert_eq!(quote.final_amount, 0);
}

#[test]
fn minimum_purchase_message_groups_digits() {
    let v = voucher(DiscountType::Fixed, 5000, 30000, Some(50), 0);
    let err = apply_voucher(&v, 25000).expect_err("below minimum purchase");
    assert_eq!(err.to_string(), "Minimum purchase amount is Rp 30.000");
}

#[test]
fn exhausted_voucher_rejected() {
    let v = voucher(DiscountType::Fixed, 5000, 0, Some(50), 50);
    let err = apply_voucher(&v, 50000).expect_err("usage cap reached");
    assert_eq!(err.to_string(), "Voucher usage limit reached");
}

#[test]
fn unlimited_voucher_ignores_usage_count() {
    let v = voucher(DiscountType::Fixed, 5000, 0, None, 9999);
    assert!(apply_voucher(&v, 50000).is_ok());
}

#[test]
fn format_rupiah_groups_thousands() {
    assert_eq!(format_rupiah(0), "0");
    assert_eq!(format_rupiah(500), "500");
    assert_eq!(format_rupiah(30000), "30.000");
    assert_eq!(format_rupiah(85000), "85.000");
    assert_eq!(format_rupiah(1234567), "1.234.567");
    assert_eq!(format_rupiah(-45000), "-45.000");
}

#[test]
fn admin_vocabulary_round_trips() {
    let all = [
        TransactionStatus::Pending,
        TransactionStatus::Verified,
        TransactionStatus::Rejected,
        TransactionStatus::Completed,
    ];
    for status in all {
        assert_eq!(TransactionStatus::parse_admin(status.admin_label()), Some(status));
        assert_eq!(TransactionStatus::parse_admin(status.as_str()), Some(status));
        assert_eq!(TransactionStatus::parse_storage(status.as_str()), Some(status));
    }
}

#[test]
fn admin_labels_translate_both_directions() {
    assert_eq!(
        TransactionStatus::parse_admin("confirmed"),
        Some(TransactionStatus::Verified)
    );
    assert_eq!(
        TransactionStatus::parse_admin("cancelled"),
        Some(TransactionStatus::Rejected)
    );
    assert_eq!(TransactionStatus::Verified.admin_label(), "confirmed");
    assert_eq!(TransactionStatus::Rejected.admin_label(), "cancelled");
    assert_eq!(TransactionStatus::Verified.as_str(), "verified");
    assert_eq!(TransactionStatus::Rejected.as_str(), "rejected");
}

#[test]
fn unknown_statuses_rejected() {
    assert_eq!(TransactionStatus::parse_admin("paid"), None);
    assert_eq!(TransactionStatus::parse_admin(""), None);
    // The admin aliases are not storage spellings.
    assert_eq!(TransactionStatus::parse_storage("confirmed"), None);
    assert_eq!(TransactionStatus::parse_storage("cancelled"), None);
}

#[test]
fn quota_type_parses_exact_labels() {
    assert_eq!(QuotaType::parse("L"), Some(QuotaType::L));
    assert_eq!(QuotaType::parse("XL"), Some(QuotaType::Xl));
    assert_eq!(QuotaType::parse("XXL"), Some(QuotaType::Xxl));
    assert_eq!(QuotaType::parse("xl"), None);
    assert_eq!(QuotaType::parse("XS"), None);
    assert_eq!(QuotaType::Xl.as_str(), "XL");
}
