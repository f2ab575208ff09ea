use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, LOCALES_DIR, table};

fn setup(test: &CliTest) -> Result<()> {
    test.write_module("app.ts", &[("app.brand", "Keyward"), ("app.hello", "Hello")])?;
    test.write_table("en", &[("app.brand", "Keyward"), ("app.hello", "Hello")])?;
    test.write_table("fr", &[("app.brand", "Keyward"), ("app.hello", "Bonjour")])
}

fn artifact_path() -> String {
    format!("{}/untranslated.json", LOCALES_DIR)
}

#[test]
fn test_untranslated_report_mode() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    assert_cmd_snapshot!(test.untranslated_command(), @r#"
success: true
exit_code: 0
----- stdout -----
warning: "app.brand"  untranslated
  --> ./src/i18n/locales/en.json:2:1
  = note: ("Keyward") identical in: fr

✘ 1 problems (0 errors, 1 warning)
Would write 1 key(s) to ./src/i18n/locales/untranslated.json.
Run with --dry-run to see the full plan, or --apply to write the report.

----- stderr -----
"#);
    assert!(!test.root().join(artifact_path()).exists());
    Ok(())
}

#[test]
fn test_untranslated_dry_run_lists_entries() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let mut cmd = test.untranslated_command();
    cmd.arg("--dry-run");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
./src/i18n/locales/untranslated.json
  + app.brand: "Keyward"
Would write 1 key(s) to ./src/i18n/locales/untranslated.json.
Run with --apply to write the report.

----- stderr -----
"#);
    assert!(!test.root().join(artifact_path()).exists());
    Ok(())
}

#[test]
fn test_untranslated_apply_writes_artifact() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let mut cmd = test.untranslated_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
Wrote 1 untranslated key(s) to ./src/i18n/locales/untranslated.json.

----- stderr -----
"#);
    assert_eq!(
        test.read_file(&artifact_path())?,
        table(&[("app.brand", "Keyward")])
    );
    Ok(())
}

#[test]
fn test_artifact_is_not_read_as_locale() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    test.untranslated_command().arg("--apply").output()?;

    let mut cmd = test.untranslated_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
✓ ./src/i18n/locales/untranslated.json is up to date (1 key(s)).

----- stderr -----
"#);
    assert_cmd_snapshot!(test.sync_command(), @r#"
success: true
exit_code: 0
----- stdout -----
✓ 1 locale table in sync with the canonical table

----- stderr -----
"#);
    Ok(())
}

#[test]
fn test_canonical_table_alone_is_a_warning() -> Result<()> {
    let test = CliTest::new()?;
    test.write_module("app.ts", &[("app.brand", "Keyward")])?;
    test.write_table("en", &[("app.brand", "Keyward")])?;

    let mut cmd = test.untranslated_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----

----- stderr -----
warning: only the canonical table was found; nothing to compare against
"#);
    assert!(!test.root().join(artifact_path()).exists());
    Ok(())
}
