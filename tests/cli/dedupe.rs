use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::{CliTest, MODULES_DIR, module, table};

fn setup_cross_namespace(test: &CliTest, fr_b: &str) -> Result<()> {
    test.write_module("a.ts", &[("a.msg", "Hello")])?;
    test.write_module("b.ts", &[("b.msg", "Hello")])?;
    test.write_table("en", &[("a.msg", "Hello"), ("b.msg", "Hello")])?;
    test.write_table("fr", &[("a.msg", "Bonjour"), ("b.msg", fr_b)])?;
    test.write_file("src/app.tsx", "t(\"a.msg\");\nt(\"b.msg\");\n")
}

fn setup_wallet(test: &CliTest) -> Result<()> {
    test.write_module(
        "wallet.ts",
        &[
            ("wallet.send", "Send"),
            ("wallet.submit", "Send"),
            ("wallet.title", "Wallet"),
        ],
    )?;
    test.write_table(
        "en",
        &[
            ("wallet.send", "Send"),
            ("wallet.submit", "Send"),
            ("wallet.title", "Wallet"),
        ],
    )?;
    test.write_table(
        "fr",
        &[
            ("wallet.send", "Envoyer"),
            ("wallet.submit", "Envoyer"),
            ("wallet.title", "Portefeuille"),
        ],
    )?;
    test.write_file(
        "src/app.tsx",
        "const a = t(\"wallet.submit\");\nconst b = i18n.t('wallet.send');\n",
    )
}

#[test]
fn test_dedupe_cross_namespace_is_only_suggested() -> Result<()> {
    let test = CliTest::new()?;
    setup_cross_namespace(&test, "Bonjour")?;

    let mut cmd = test.dedupe_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
note: "Hello" is declared in namespaces a, b (a.msg, b.msg); consider a shared key common.hello

----- stderr -----
"#);
    assert_eq!(
        test.read_file(&format!("{}/a.ts", MODULES_DIR))?,
        module(&[("a.msg", "Hello")])
    );
    assert_eq!(
        test.read_table("fr")?,
        table(&[("a.msg", "Bonjour"), ("b.msg", "Bonjour")])
    );
    Ok(())
}

#[test]
fn test_dedupe_rejects_divergent_group() -> Result<()> {
    let test = CliTest::new()?;
    setup_cross_namespace(&test, "Salut")?;

    let mut cmd = test.dedupe_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
warning: "Hello" (a.msg, b.msg) not mergeable: values differ in locale 'fr': a.msg = "Bonjour", b.msg = "Salut"

----- stderr -----
"#);
    assert_eq!(
        test.read_table("fr")?,
        table(&[("a.msg", "Bonjour"), ("b.msg", "Salut")])
    );
    Ok(())
}

#[test]
fn test_dedupe_report_mode_changes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    setup_wallet(&test)?;

    assert_cmd_snapshot!(test.dedupe_command(), @r#"
success: true
exit_code: 0
----- stdout -----
  wallet: wallet.submit -> wallet.send
Would merge 1 group(s): remove 1 declaration(s), rewrite 1 reference(s) in 4 file(s).
Run with --dry-run to see the full plan, or --apply to merge these keys.

----- stderr -----
"#);
    assert_eq!(
        test.read_file("src/app.tsx")?,
        "const a = t(\"wallet.submit\");\nconst b = i18n.t('wallet.send');\n"
    );
    Ok(())
}

#[test]
fn test_dedupe_dry_run_prints_plan() -> Result<()> {
    let test = CliTest::new()?;
    setup_wallet(&test)?;

    let mut cmd = test.dedupe_command();
    cmd.arg("--dry-run");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
merge "Send" (namespace wallet)
  keep wallet.send
  drop wallet.submit (./src/i18n/modules/wallet.ts:3)

./src/i18n/modules/wallet.ts
  - wallet.submit (line 3)
./src/i18n/locales/en.json
  - wallet.submit
./src/i18n/locales/fr.json
  - wallet.submit
./src/app.tsx
  ~ 1:11 const a = t("wallet.submit");
    wallet.submit -> wallet.send
Would merge 1 group(s): remove 1 declaration(s), rewrite 1 reference(s) in 4 file(s).
Run with --apply to merge these keys.

----- stderr -----
"#);
    assert!(test.read_file("src/app.tsx")?.contains("wallet.submit"));
    Ok(())
}

#[test]
fn test_dedupe_apply_merges_same_namespace() -> Result<()> {
    let test = CliTest::new()?;
    setup_wallet(&test)?;

    let mut cmd = test.dedupe_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
Merged 1 group(s): removed 1 declaration(s), rewrote 1 reference(s) in 4 file(s).

----- stderr -----
"#);
    assert_eq!(
        test.read_file(&format!("{}/wallet.ts", MODULES_DIR))?,
        module(&[("wallet.send", "Send"), ("wallet.title", "Wallet")])
    );
    assert_eq!(
        test.read_table("en")?,
        table(&[("wallet.send", "Send"), ("wallet.title", "Wallet")])
    );
    assert_eq!(
        test.read_table("fr")?,
        table(&[("wallet.send", "Envoyer"), ("wallet.title", "Portefeuille")])
    );
    assert_eq!(
        test.read_file("src/app.tsx")?,
        "const a = t(\"wallet.send\");\nconst b = i18n.t('wallet.send');\n"
    );

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
fn test_dedupe_apply_merges_two_groups_in_one_module() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        &format!("{}/form.ts", MODULES_DIR),
        "export default {\n  \"form.cancel\":\n    \"Cancel\",\n  \"form.save\": \"Save\",\n  \"form.abort\": \"Cancel\",\n  \"form.title\": \"Form\",\n  \"form.store\": \"Save\",\n} as const;\n",
    )?;
    test.write_table(
        "en",
        &[
            ("form.cancel", "Cancel"),
            ("form.save", "Save"),
            ("form.abort", "Cancel"),
            ("form.title", "Form"),
            ("form.store", "Save"),
        ],
    )?;
    test.write_table(
        "fr",
        &[
            ("form.cancel", "Annuler"),
            ("form.save", "Enregistrer"),
            ("form.abort", "Annuler"),
            ("form.title", "Formulaire"),
            ("form.store", "Enregistrer"),
        ],
    )?;
    test.write_file(
        "src/form.tsx",
        "t(\"form.cancel\");\nt(\"form.store\");\nt(\"form.save\");\n",
    )?;

    let mut cmd = test.dedupe_command();
    cmd.arg("--apply");

    assert_cmd_snapshot!(cmd, @r#"
success: true
exit_code: 0
----- stdout -----
Merged 2 group(s): removed 2 declaration(s), rewrote 2 reference(s) in 4 file(s).

----- stderr -----
"#);
    assert_eq!(
        test.read_file(&format!("{}/form.ts", MODULES_DIR))?,
        "export default {\n  \"form.save\": \"Save\",\n  \"form.abort\": \"Cancel\",\n  \"form.title\": \"Form\",\n} as const;\n"
    );
    assert_eq!(
        test.read_table("en")?,
        table(&[("form.save", "Save"), ("form.abort", "Cancel"), ("form.title", "Form")])
    );
    assert_eq!(
        test.read_table("fr")?,
        table(&[
            ("form.save", "Enregistrer"),
            ("form.abort", "Annuler"),
            ("form.title", "Formulaire"),
        ])
    );
    assert_eq!(
        test.read_file("src/form.tsx")?,
        "t(\"form.abort\");\nt(\"form.save\");\nt(\"form.save\");\n"
    );
    Ok(())
}

#[test]
fn test_dedupe_without_duplicates() -> Result<()> {
    let test = CliTest::new()?;
    test.write_module("wallet.ts", &[("wallet.send", "Send")])?;
    test.write_table("en", &[("wallet.send", "Send")])?;

    assert_cmd_snapshot!(test.dedupe_command(), @r#"
success: true
exit_code: 0
----- stdout -----
✓ No duplicate values found

----- stderr -----
"#);
    Ok(())
}
