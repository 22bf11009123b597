use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_cli_session_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("vending-engine"));
    cmd.arg("--stock")
        .arg("tests/fixtures/stock.csv")
        .arg("--coins")
        .arg("tests/fixtures/coins.csv")
        .arg("run")
        .arg("tests/fixtures/session.csv");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Selected A1, please insert £1.99"))
        .stdout(predicate::str::contains(
            "Insufficient funds, please insert at least 0.99",
        ))
        .stdout(predicate::str::contains(
            "Enough change in machine, dispensing Crisps and £0.01 being returned",
        ))
        .stdout(predicate::str::contains("Balance: £0.00"))
        .stdout(predicate::str::contains(
            "Not enough change in machine, inserted coins being returned",
        ))
        .stdout(predicate::str::contains(
            "Any selection cancelled and any money returned",
        ))
        .stderr(predicate::str::contains("Item B1 is out of stock"))
        .stderr(predicate::str::contains(
            "Selected product code is not valid: Z9",
        ));

    Ok(())
}

#[test]
fn test_cli_show_stock_is_ordered() {
    let mut cmd = Command::new(cargo_bin!("vending-engine"));
    cmd.arg("--stock")
        .arg("tests/fixtures/stock.csv")
        .arg("show-stock");

    cmd.assert().success().stdout(predicate::eq(
        "code,name,cost,quantity\nA1,Crisps,1.99,10\nA2,Cola,1.20,5\nB1,Gum,0.50,0\n",
    ));
}

#[test]
fn test_cli_show_change_is_largest_first() {
    let mut cmd = Command::new(cargo_bin!("vending-engine"));
    cmd.arg("--coins")
        .arg("tests/fixtures/coins.csv")
        .arg("show-change");

    cmd.assert().success().stdout(predicate::eq(
        "denomination,quantity\n0.50,1\n0.10,2\n0.01,5\n",
    ));
}

#[test]
fn test_cli_missing_script_fails() {
    let mut cmd = Command::new(cargo_bin!("vending-engine"));
    cmd.arg("run").arg("tests/fixtures/does_not_exist.csv");

    cmd.assert().failure();
}
