use chrono::{TimeZone, Utc};
use insta::assert_snapshot;
use merchant_core::domain::{Profile, Transaction, TransactionStatus, Withdrawal};

#[test]
fn transaction_json_layout() {
    let txn = Transaction {
        id: "txn-0001".into(),
        customer_name: "John Smith".into(),
        amount: 45.99,
        date: Utc.with_ymd_and_hms(2025, 8, 1, 11, 45, 0).unwrap(),
        status: TransactionStatus::Completed,
    };
    let json = serde_json::to_string_pretty(&txn).unwrap();
    assert_snapshot!(json, @r###"
    {
      "id": "txn-0001",
      "customerName": "John Smith",
      "amount": 45.99,
      "date": "2025-08-01T11:45:00Z",
      "status": "completed"
    }
    "###);
}

#[test]
fn withdrawal_json_layout() {
    let withdrawal = Withdrawal {
        id: "wd-0001".into(),
        amount: 100.0,
        date: Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
    };
    let json = serde_json::to_string(&withdrawal).unwrap();
    assert_snapshot!(json, @r###"{"id":"wd-0001","amount":100.0,"date":"2025-08-01T12:00:00Z"}"###);
}

#[test]
fn profile_json_layout() {
    let profile = Profile::default().with_identity("Siti Aminah", "880202-10-1234");
    let json = serde_json::to_string(&profile).unwrap();
    assert_snapshot!(json, @r###"{"name":"Siti Aminah","icNumber":"880202-10-1234","phoneNumber":"","businessName":"","email":""}"###);
}
