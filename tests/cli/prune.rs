use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, MODULES_DIR};

const WALLET: &str = "export default {\n  \"wallet.send\": \"Send\",\n  \"wallet.legacyNotice\":\n    \"This wallet uses the old format\",\n  \"wallet.title\": \"Wallet\",\n} as const;\n";

fn setup(test: &CliTest) -> Result<()> {
    test.write_file(&format!("{}/wallet.ts", MODULES_DIR), WALLET)?;
    test.write_table(
        "en",
        &[
            ("wallet.send", "Send"),
            ("wallet.legacyNotice", "This wallet uses the old format"),
            ("wallet.title", "Wallet"),
        ],
    )?;
    test.write_file(
        "src/app.tsx",
        "t(\"wallet.send\");\n<Trans i18nKey=\"wallet.title\" />\n",
    )
}

#[test]
fn test_prune_report_mode() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    assert_cmd_snapshot!(test.prune_command(), @r#"
success: true
exit_code: 0
----- stdout -----
warning: "wallet.legacyNotice"  unused-key
  --> ./src/i18n/modules/wallet.ts:3:1
  |
3 |   "wallet.legacyNotice":
  | ^
  = note: ("This wallet uses the old format")

✘ 1 problems (0 errors, 1 warning)
Would delete 1 declaration(s) in 1 file(s).
Run with --dry-run to see the full plan, or --apply to delete these declarations.

----- stderr -----
"#);
    assert_eq!(test.read_file(&format!("{}/wallet.ts", MODULES_DIR))?, WALLET);
    Ok(())
}

#[test]
fn test_prune_dry_run() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let mut cmd = test.prune_command();
    cmd.arg("--dry-run");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
./src/i18n/modules/wallet.ts
  - wallet.legacyNotice (line 3-4)
Would delete 1 declaration(s) in 1 file(s).
Run with --apply to delete these declarations.

----- stderr -----
"#);
    assert_eq!(test.read_file(&format!("{}/wallet.ts", MODULES_DIR))?, WALLET);
    Ok(())
}

#[test]
fn test_prune_apply_removes_exactly_its_lines() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let mut cmd = test.prune_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
Deleted 1 declaration(s) in 1 file(s).

----- stderr -----
"#);
    assert_eq!(
        test.read_file(&format!("{}/wallet.ts", MODULES_DIR))?,
        "export default {\n  \"wallet.send\": \"Send\",\n  \"wallet.title\": \"Wallet\",\n} as const;\n"
    );
    Ok(())
}

#[test]
fn test_prune_apply_removes_non_adjacent_declarations() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        &format!("{}/menu.ts", MODULES_DIR),
        "export default {\n  \"menu.old\": \"Old\",\n  \"menu.home\": \"Home\",\n  \"menu.legacyHint\":\n    \"Use the new menu\",\n  \"menu.about\": \"About\",\n} as const;\n",
    )?;
    test.write_table(
        "en",
        &[
            ("menu.old", "Old"),
            ("menu.home", "Home"),
            ("menu.legacyHint", "Use the new menu"),
            ("menu.about", "About"),
        ],
    )?;
    test.write_file("src/menu.tsx", "t(\"menu.home\");\nt(\"menu.about\");\n")?;

    let mut cmd = test.prune_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
Deleted 2 declaration(s) in 1 file(s).

----- stderr -----
"#);
    assert_eq!(
        test.read_file(&format!("{}/menu.ts", MODULES_DIR))?,
        "export default {\n  \"menu.home\": \"Home\",\n  \"menu.about\": \"About\",\n} as const;\n"
    );
    Ok(())
}

#[test]
fn test_prune_sees_dollar_function_references() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keywardrc.json", "{ \"translationFunctions\": [\"$t\"] }\n")?;
    test.write_module("menu.ts", &[("menu.home", "Home"), ("menu.old", "Old")])?;
    test.write_table("en", &[("menu.home", "Home"), ("menu.old", "Old")])?;
    test.write_file(
        "src/App.vue",
        "<template>\n  <p>{{ $t(\"menu.home\") }}</p>\n</template>\n",
    )?;

    let mut cmd = test.prune_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
Deleted 1 declaration(s) in 1 file(s).

----- stderr -----
"#);
    assert_eq!(
        test.read_file(&format!("{}/menu.ts", MODULES_DIR))?,
        crate::module(&[("menu.home", "Home")])
    );
    Ok(())
}

#[test]
fn test_prune_notes_dynamic_references() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_file("src/dynamic.tsx", "const label = t(`wallet.${kind}`);\n")?;

    assert_cmd_snapshot!(test.prune_command(), @r#"
success: true
exit_code: 0
----- stdout -----
warning: "wallet.legacyNotice"  unused-key
  --> ./src/i18n/modules/wallet.ts:3:1
  |
3 |   "wallet.legacyNotice":
  | ^
  = note: ("This wallet uses the old format")

✘ 1 problems (0 errors, 1 warning)
Would delete 1 declaration(s) in 1 file(s).
Run with --dry-run to see the full plan, or --apply to delete these declarations.
note: 1 dynamic reference(s) found; keys used only through them are not tracked

----- stderr -----
"#);
    Ok(())
}

#[test]
fn test_prune_nothing_unused() -> Result<()> {
    let test = CliTest::new()?;
    test.write_module("wallet.ts", &[("wallet.send", "Send")])?;
    test.write_table("en", &[("wallet.send", "Send")])?;
    test.write_file("src/app.tsx", "t(\"wallet.send\");\n")?;

    let mut cmd = test.prune_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
✓ No unused keys found

----- stderr -----
"#);
    Ok(())
}
