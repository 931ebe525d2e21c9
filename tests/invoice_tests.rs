use predicates::str::contains;
use std::fs;

mod common;
use common::{Sandbox, docx_text};

fn july_with_twenty_days(sb: &Sandbox) {
    for day in 1..=20 {
        sb.mark(&format!("2025-07-{day:02}"), "P");
    }
    sb.mark("2025-07-21", "L");
    sb.mark("2025-07-22", "HL");
}

#[test]
fn monthly_invoice_needs_a_complete_profile() {
    let sb = Sandbox::new();
    sb.mark("2025-07-01", "P");

    sb.cmd()
        .args(["invoice", "--month", "2025-07"])
        .assert()
        .failure()
        .stderr(contains(
            "invoice could not be generated due to missing data: name, employee_id, department, daily_rate",
        ));
}

#[test]
fn monthly_invoice_is_written_and_ledger_updated() {
    let sb = Sandbox::new();
    sb.with_profile("1250");
    july_with_twenty_days(&sb);

    sb.cmd()
        .args(["invoice", "--month", "2025-07", "--date", "2025-07-31"])
        .assert()
        .success()
        .stdout(contains("Invoice for July 2025 written to"))
        .stdout(contains("Working days : 20"))
        .stdout(contains("25,000/-"))
        .stdout(contains("Rs. Twenty Five Thousand Only"))
        .stdout(contains("My remaining leaves after July are 1."));

    let xml = docx_text(&sb.work_path("invoice_july.docx"));
    assert!(xml.contains("INVOICE"));
    assert!(xml.contains("NAME: Jane Doe"));
    assert!(xml.contains("Date: 2025-07-31"));
    assert!(xml.contains("25,000/-"));
    assert!(xml.contains("Balance Leaves"));

    let profile = fs::read_to_string(sb.home.path().join(".rinvoicer/profile.yml")).unwrap();
    let profile: serde_yaml::Value = serde_yaml::from_str(&profile).unwrap();
    assert_eq!(profile["leave_history"]["2025-07"], serde_yaml::Value::from(1));

    // August carries July's balance forward
    sb.mark("2025-08-01", "P");
    sb.cmd()
        .args(["invoice", "--month", "2025-08"])
        .assert()
        .success()
        .stdout(contains("My remaining leaves after August are 3."));
}

#[test]
fn missing_timesheet_is_reported() {
    let sb = Sandbox::new();
    sb.with_profile("1000");

    sb.cmd()
        .args(["invoice", "--month", "2025-03"])
        .assert()
        .failure()
        .stderr(contains("No timesheet found for this month"));
}

#[test]
fn invoice_from_json_data_accepts_legacy_detail_lines() {
    let sb = Sandbox::new();
    let data = r#"{
        "name": "NAME: John & Co",
        "date": "Date: 2025-07-31",
        "bill_to": ["ACME <India>", "Bangalore"],
        "salary_description": "Salary for the month of \"July 2025\" payroll",
        "details": [
            {"description": "Working Days", "amount": "20"},
            "Cumulative Leaves Taken: 1",
            "Note without colon"
        ],
        "total": "20,000/-",
        "total_words": "Rs. Twenty Thousand Only"
    }"#;
    fs::write(sb.work_path("data.json"), data).unwrap();

    sb.cmd()
        .args(["invoice", "--data", "data.json", "--file", "custom"])
        .assert()
        .success()
        .stdout(contains("Invoice successfully written to"));

    let xml = docx_text(&sb.work_path("custom.docx"));
    assert!(xml.contains("NAME: John &amp; Co"));
    assert!(xml.contains("ACME &lt;India&gt;"));
    assert!(xml.contains("Cumulative Leaves Taken"));
    assert!(xml.contains("Note without colon"));
    assert!(xml.contains("Rs. Twenty Thousand Only"));
}
