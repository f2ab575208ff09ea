use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.init_command(), @r#"
success: true
exit_code: 0
----- stdout -----
✓ Created .keywardrc.json

----- stderr -----
"#);

    let content = test.read_file(".keywardrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["canonicalLocale"], "en");
    assert_eq!(parsed["modulesRoot"], "./src/i18n/modules");
    assert_eq!(parsed["canonicalKeyPolicy"], "smallest");
    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".keywardrc.json", "{}")?;

    assert_cmd_snapshot!(test.init_command(), @r#"
success: false
exit_code: 2
----- stdout -----

----- stderr -----
Error: .keywardrc.json already exists
"#);
    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.init_command().output()?;
    test.write_module("app.ts", &[("app.title", "Title")])?;
    test.write_table("en", &[("app.title", "Title")])?;
    test.write_file("src/app.tsx", "t(\"app.title\");\n")?;

    assert_cmd_snapshot!(test.verify_command(), @r#"
success: true
exit_code: 0
----- stdout -----
✓ Checked 1 source file, 1 module file, 1 table file - no issues found

----- stderr -----
"#);
    Ok(())
}

#[test]
fn test_config_overrides_layout() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".keywardrc.json",
        r#"{ "modulesRoot": "./i18n/keys", "localesRoot": "./i18n/tables", "canonicalLocale": "de" }"#,
    )?;
    test.write_file(
        "i18n/keys/app.ts",
        "export default {\n  \"app.title\": \"Titel\",\n};\n",
    )?;
    test.write_file("i18n/tables/de.json", "{\n  \"app.title\": \"Titel\"\n}\n")?;
    test.write_file("src/app.tsx", "t(\"app.title\");\n")?;

    assert_cmd_snapshot!(test.verify_command(), @r#"
success: true
exit_code: 0
----- stdout -----
✓ Checked 1 source file, 1 module file, 1 table file - no issues found

----- stderr -----
"#);
    Ok(())
}
