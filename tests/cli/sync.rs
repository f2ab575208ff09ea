use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, table};

fn setup(test: &CliTest) -> Result<()> {
    test.write_module("app.ts", &[("app.x", "X"), ("app.y", "Y"), ("app.z", "Z")])?;
    test.write_table("en", &[("app.x", "X"), ("app.y", "Y"), ("app.z", "Z")])?;
    test.write_table("fr", &[("app.x", "X fr"), ("app.y", "Y fr"), ("app.w", "W fr")])
}

#[test]
fn test_sync_report_mode_changes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    let before = test.read_table("fr")?;

    assert_cmd_snapshot!(test.sync_command(), @r#"
success: true
exit_code: 0
----- stdout -----
  - fr: 1 filled, 1 dropped
Would update 1 table(s): 1 key(s) filled, 1 key(s) dropped.
Run with --dry-run to see the full plan, or --apply to write these tables.

----- stderr -----
"#);
    assert_eq!(test.read_table("fr")?, before);
    Ok(())
}

#[test]
fn test_sync_dry_run_lists_keys() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let mut cmd = test.sync_command();
    cmd.arg("--dry-run");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
./src/i18n/locales/fr.json
  + app.z
  - app.w
  - fr: 1 filled, 1 dropped
Would update 1 table(s): 1 key(s) filled, 1 key(s) dropped.
Run with --apply to write these tables.

----- stderr -----
"#);
    Ok(())
}

#[test]
fn test_sync_apply_reconciles_table() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    let mut cmd = test.sync_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
  - fr: 1 filled, 1 dropped
Updated 1 table(s): 1 key(s) filled, 1 key(s) dropped.

----- stderr -----
"#);
    assert_eq!(
        test.read_table("fr")?,
        table(&[("app.x", "X fr"), ("app.y", "Y fr"), ("app.z", "Z")])
    );
    Ok(())
}

#[test]
fn test_sync_is_idempotent() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;

    test.sync_command().arg("--apply").output()?;
    let first = test.read_table("fr")?;

    let mut cmd = test.sync_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
✓ 1 locale table in sync with the canonical table

----- stderr -----
"#);
    assert_eq!(test.read_table("fr")?, first);
    Ok(())
}

#[test]
fn test_sync_reorders_to_canonical_order() -> Result<()> {
    let test = CliTest::new()?;
    setup(&test)?;
    test.write_table("de", &[("app.z", "Z de"), ("app.x", "X de"), ("app.y", "Y de")])?;

    let mut cmd = test.sync_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
  - de: 0 filled, 0 dropped, reordered
  - fr: 1 filled, 1 dropped
Updated 2 table(s): 1 key(s) filled, 1 key(s) dropped.

----- stderr -----
"#);
    assert_eq!(
        test.read_table("de")?,
        table(&[("app.x", "X de"), ("app.y", "Y de"), ("app.z", "Z de")])
    );
    Ok(())
}
