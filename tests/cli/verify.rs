use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

fn setup_wallet(test: &CliTest) -> Result<()> {
    test.write_module(
        "wallet.ts",
        &[("wallet.send", "Send"), ("wallet.title", "Wallet")],
    )?;
    test.write_table("en", &[("wallet.send", "Send"), ("wallet.title", "Wallet")])?;
    test.write_table("fr", &[("wallet.send", "Envoyer"), ("wallet.title", "Portefeuille")])
}

#[test]
fn test_verify_clean_project() -> Result<()> {
    let test = CliTest::new()?;
    setup_wallet(&test)?;
    test.write_file(
        "src/app.tsx",
        "export const App = () => <p>{t(\"wallet.send\")} {i18n.t('wallet.title')}</p>;\n",
    )?;

    assert_cmd_snapshot!(test.verify_command(), @r#"
success: true
exit_code: 0
----- stdout -----
✓ Checked 1 source file, 1 module file, 2 table files - no issues found

----- stderr -----
"#);
    Ok(())
}

#[test]
fn test_verify_reports_missing_key() -> Result<()> {
    let test = CliTest::new()?;
    setup_wallet(&test)?;
    test.write_file("src/app.tsx", "const label = t(\"wallet.gone\");\n")?;

    assert_cmd_snapshot!(test.verify_command(), @r#"
success: false
exit_code: 1
----- stdout -----
error: "wallet.gone"  missing-key
  --> ./src/app.tsx:1:15
  |
1 | const label = t("wallet.gone");
  |               ^
  = note: referenced via t(…) but not declared in any module

✘ 1 problems (1 error, 0 warnings)

----- stderr -----
"#);
    Ok(())
}

#[test]
fn test_verify_warnings_do_not_fail() -> Result<()> {
    let test = CliTest::new()?;
    setup_wallet(&test)?;
    test.write_file(
        "src/app.tsx",
        "t(\"wallet.send\");\nt(\"wallet.title\");\nconst label = t(name);\n",
    )?;
    test.write_table(
        "en",
        &[("wallet.send", "Send"), ("wallet.title", "Wallet"), ("wallet.stale", "Old")],
    )?;

    assert_cmd_snapshot!(test.verify_command(), @r#"
success: true
exit_code: 0
----- stdout -----
warning: "dynamic key in t(…)"  dynamic-key
  --> ./src/app.tsx:3:15
  |
3 | const label = t(name);
  |               ^
  = note: keys built at runtime are invisible to prune and dedupe

warning: "wallet.stale"  table-drift
  --> ./src/i18n/locales/en.json:4:1
  = note: in the canonical table but declared by no module

✘ 2 problems (0 errors, 2 warnings)

----- stderr -----
"#);
    Ok(())
}

#[test]
fn test_verify_reports_unrecognized_module_line() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        "src/i18n/modules/wallet.ts",
        "export default {\n  \"wallet.send\": \"Send\",\n  wallet_title: \"Wallet\",\n};\n",
    )?;
    test.write_table("en", &[("wallet.send", "Send")])?;
    test.write_file("src/app.tsx", "t(\"wallet.send\");\n")?;

    assert_cmd_snapshot!(test.verify_command(), @r#"
success: true
exit_code: 0
----- stdout -----
warning: "wallet_title: "Wallet","  unrecognized-line
  --> ./src/i18n/modules/wallet.ts:3:3
  |
3 |   wallet_title: "Wallet",
  |   ^
  = hint: declare keys as `"key": "value",` or split key and value over two lines

✘ 1 problems (0 errors, 1 warning)

----- stderr -----
"#);
    Ok(())
}

#[test]
fn test_verify_malformed_table_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    setup_wallet(&test)?;
    test.write_file("src/i18n/locales/fr.json", "{ \"wallet.send\": ")?;

    insta::with_settings!({filters => vec![(r"at line \d+ column \d+", "[POSITION]")]}, {
        assert_cmd_snapshot!(test.verify_command(), @r#"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
Error: Failed to parse table file: ./src/i18n/locales/fr.json (expected a flat object of string values): EOF while parsing a value [POSITION]
"#);
    });
    Ok(())
}

#[test]
fn test_verify_duplicate_declaration_is_fatal() -> Result<()> {
    let test = CliTest::new()?;
    setup_wallet(&test)?;
    test.write_module("extra.ts", &[("wallet.send", "Send again")])?;

    assert_cmd_snapshot!(test.verify_command(), @r#"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
Error: Key 'wallet.send' is declared twice: ./src/i18n/modules/extra.ts:2 and ./src/i18n/modules/wallet.ts:2
"#);
    Ok(())
}

#[test]
fn test_verify_missing_modules_dir() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.verify_command(), @r#"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
Error: Modules directory './src/i18n/modules' does not exist.
Hint: Check the 'modulesRoot' setting in .keywardrc.json.
"#);
    Ok(())
}
