//! CLI integration tests for spoutgen.
//!
//! These tests drive the binary against a synthetic checkout: a Spout source
//! tree, the interop tree, a build tree and a fake Windows SDK.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const SPOUTDX_HEADER: &str = r#"#pragma once
#define SPOUTDX_VERSION 2007

class ID3D11Foo {
public:
    virtual void Release();
};

class SpoutDX {
public:
    SpoutDX();
    bool OpenDirectX11(ID3D11Device* pDevice = nullptr);
    ID3D11Foo* GetFoo();
};

namespace std {
    class helper {};
}
"#;

/// COM interfaces the way the SDK's d3d11.h declares them.
const D3D11_HEADER: &str = r#"#pragma once
MIDL_INTERFACE("db6f6ddb-ac77-4e88-8253-819df9bbf140")
ID3D11Device : public IUnknown
{
public:
    virtual HRESULT STDMETHODCALLTYPE CreateTexture3D(
        _In_  const D3D11_TEXTURE3D_DESC *pDesc,
        _COM_Outptr_opt_  ID3D11Texture3D **ppTexture3D) = 0;
    virtual UINT STDMETHODCALLTYPE GetCreationFlags( void) = 0;
};

MIDL_INTERFACE("037e866e-f56d-4357-a8af-9dabbe6e250e")
ID3D11Texture3D : public ID3D11Resource
{
public:
    virtual void STDMETHODCALLTYPE GetDesc(
        _Out_  D3D11_TEXTURE3D_DESC *pDesc) = 0;
};
"#;

/// A synthetic checkout under a temporary directory.
struct Checkout {
    tmp: TempDir,
}

impl Checkout {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let work = tmp.path().join("work");

        let files: &[(&str, &str)] = &[
            ("Spout2/SPOUTSDK/SpoutDirectX/SpoutDX/SpoutDX.h", SPOUTDX_HEADER),
            (
                "Spout2/SPOUTSDK/SpoutDirectX/SpoutDX/SpoutDX.cpp",
                "#include \"SpoutDX.h\"\n",
            ),
            ("Spout2/SPOUTSDK/SpoutGL/SpoutCommon.h", "#define SPOUT_DLLEXP\n"),
        ];
        for (path, contents) in files {
            let path = work.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, contents).unwrap();
        }
        fs::create_dir_all(work.join("SpoutDX/generator")).unwrap();
        fs::create_dir_all(work.join("BUILD/Binaries/x64")).unwrap();

        for version in ["10.0.19041.0", "10.0.22000.0"] {
            let um = tmp.path().join("sdk/Include").join(version).join("um");
            fs::create_dir_all(&um).unwrap();
            fs::write(um.join("d3d11.h"), D3D11_HEADER).unwrap();
            fs::create_dir_all(tmp.path().join("sdk/Lib").join(version).join("um/x64")).unwrap();
        }

        // Literal TOML string, so Windows separators need no escaping
        fs::write(
            work.join("spoutgen.toml"),
            format!("[paths]\nsdk_root = '{}'\n", tmp.path().join("sdk").display()),
        )
        .unwrap();

        Checkout { tmp }
    }

    fn work(&self) -> PathBuf {
        self.tmp.path().join("work")
    }

    fn start_dir(&self) -> PathBuf {
        self.work().join("SpoutDX/generator")
    }

    /// The binary, run from inside the interop tree with an isolated home.
    fn spoutgen(&self) -> Command {
        spoutgen_in(&self.start_dir(), self.tmp.path())
    }
}

/// Get the spoutgen binary command.
fn spoutgen_in(dir: &Path, home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("spoutgen").unwrap();
    cmd.current_dir(dir)
        .env("HOME", home)
        .env_remove("SPOUTGEN_CONFIG")
        .arg("--no-color");
    cmd
}

// ============================================================================
// spoutgen locate
// ============================================================================

#[test]
fn test_locate_prints_trees_and_latest_sdk() {
    let checkout = Checkout::new();

    checkout
        .spoutgen()
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::contains("sdk version:  10.0.22000.0"))
        .stdout(predicate::str::contains("Spout2"))
        .stdout(predicate::str::contains("BUILD"));
}

#[test]
fn test_locate_json() {
    let checkout = Checkout::new();

    let output = checkout
        .spoutgen()
        .args(["locate", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["sdk_version"], "10.0.22000.0");
    assert!(json["interop_tree"].as_str().unwrap().ends_with("SpoutDX"));
}

#[test]
fn test_locate_outside_checkout_fails() {
    let tmp = TempDir::new().unwrap();

    spoutgen_in(tmp.path(), tmp.path())
        .arg("locate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory `Spout2` was not found"));
}

#[test]
fn test_start_dir_flag() {
    let checkout = Checkout::new();
    let elsewhere = TempDir::new().unwrap();

    spoutgen_in(elsewhere.path(), checkout.tmp.path())
        .arg("-C")
        .arg(checkout.start_dir())
        .arg("locate")
        .assert()
        .success()
        .stdout(predicate::str::contains("10.0.22000.0"));
}

#[test]
fn test_start_dir_parent_does_not_search_below_it() {
    let checkout = Checkout::new();
    // Only reachable by descending from `SpoutDX` into `generator`
    fs::create_dir(checkout.start_dir().join("BUILD")).unwrap();

    let output = checkout
        .spoutgen()
        .args(["-C", "..", "locate", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let expected = checkout.work().canonicalize().unwrap().join("BUILD");
    assert_eq!(json["build_tree"], expected.display().to_string());
}

#[test]
fn test_missing_start_dir_fails() {
    let checkout = Checkout::new();

    checkout
        .spoutgen()
        .args(["-C", "no-such-dir", "locate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start directory not found"));
}

// ============================================================================
// spoutgen module
// ============================================================================

#[test]
fn test_module_lists_inputs() {
    let checkout = Checkout::new();

    checkout
        .spoutgen()
        .arg("module")
        .assert()
        .success()
        .stdout(predicate::str::contains("module SpoutDX"))
        .stdout(predicate::str::contains("SpoutDX.h"))
        .stdout(predicate::str::contains("d3d11.h"))
        .stdout(predicate::str::contains("SpoutDX.cpp"))
        .stdout(predicate::str::contains("SpoutDX.lib"));
}

#[test]
fn test_module_missing_header_dir_fails() {
    let checkout = Checkout::new();
    fs::remove_dir_all(checkout.work().join("Spout2/SPOUTSDK/SpoutGL")).unwrap();

    checkout
        .spoutgen()
        .arg("module")
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory does not exist"))
        .stderr(predicate::str::contains("SpoutGL"));
}

// ============================================================================
// spoutgen check
// ============================================================================

#[test]
fn test_check_explains_decisions() {
    let checkout = Checkout::new();

    checkout
        .spoutgen()
        .args(["check", "ID3D11Device", "ID3D11Texture3D", "SpoutSender"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "retained: denied by prefix `ID3D11` but allowed by exact `ID3D11Device`",
        ))
        .stdout(predicate::str::contains("ignored: denied by prefix `ID3D11`"))
        .stdout(predicate::str::contains("retained: no deny rule matches"));
}

#[test]
fn test_check_requires_a_name() {
    let checkout = Checkout::new();

    checkout.spoutgen().arg("check").assert().failure();
}

// ============================================================================
// spoutgen passes
// ============================================================================

#[test]
fn test_passes_order() {
    let checkout = Checkout::new();

    let output = checkout.spoutgen().arg("passes").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 12);
    assert!(lines[0].ends_with("declaration-filter"));
    assert!(lines[1].ends_with("check-keyword-names"));
    assert!(lines[11].ends_with("rename-colliding-namespaces"));
}

// ============================================================================
// spoutgen generate
// ============================================================================

#[test]
fn test_generate_writes_json() {
    let checkout = Checkout::new();
    let out = checkout.tmp.path().join("out");

    checkout
        .spoutgen()
        .arg("generate")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored ID3D11Foo"))
        .stdout(predicate::str::contains("renamed namespace Std -> Spout.Std"));

    let json = fs::read_to_string(out.join("SpoutDX.json")).unwrap();
    assert!(json.contains("\"Spout.Std\""));
    assert!(json.contains("\"ID3D11Device\""));
    assert!(json.contains("\"GetCreationFlags\""));
    assert!(!json.contains("\"CreateTexture3D\""));
    assert!(!json.contains("\"ID3D11Texture3D\""));
    assert!(!json.contains("\"GetFoo\""));
}

#[test]
fn test_generate_defaults_to_interop_tree() {
    let checkout = Checkout::new();

    checkout.spoutgen().arg("generate").assert().success();

    assert!(checkout.work().join("SpoutDX/SpoutDX.json").is_file());
}

#[test]
fn test_generate_dry_run_writes_nothing() {
    let checkout = Checkout::new();
    let out = checkout.tmp.path().join("out");

    checkout
        .spoutgen()
        .args(["generate", "--dry-run", "--output"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would write"));

    assert!(!out.exists());
}

#[test]
fn test_generate_ambiguous_overload_fails() {
    let checkout = Checkout::new();
    fs::write(
        checkout.work().join("Spout2/SPOUTSDK/SpoutGL/SpoutCommon.h"),
        "struct Sender { void Send(int a); void Send(int b); };\n",
    )
    .unwrap();

    checkout
        .spoutgen()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous overload `Send`"));

    assert!(!checkout.work().join("SpoutDX/SpoutDX.json").exists());
}

// ============================================================================
// configuration
// ============================================================================

#[test]
fn test_missing_explicit_config_fails() {
    let checkout = Checkout::new();

    checkout
        .spoutgen()
        .args(["--config", "nope.toml", "locate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"))
        .stderr(predicate::str::contains("spoutgen init"));
}

#[test]
fn test_config_overrides_deny_list() {
    let checkout = Checkout::new();
    let config = checkout.tmp.path().join("custom.toml");
    fs::write(
        &config,
        "[filter]\ndeny = [\"Spout\"]\nallow = []\n",
    )
    .unwrap();

    checkout
        .spoutgen()
        .arg("--config")
        .arg(&config)
        .args(["check", "SpoutDX", "ID3D11Device"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored: denied by prefix `Spout`"))
        .stdout(predicate::str::contains("retained: no deny rule matches"));
}

// ============================================================================
// spoutgen init
// ============================================================================

#[test]
fn test_init_writes_config() {
    let tmp = TempDir::new().unwrap();

    spoutgen_in(tmp.path(), tmp.path())
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    let contents = fs::read_to_string(tmp.path().join("spoutgen.toml")).unwrap();
    assert!(contents.contains("[filter]"));
    assert!(contents.contains("ID3D11"));
}

#[test]
fn test_init_refuses_overwrite_without_force() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("spoutgen.toml"), "broken = [").unwrap();

    spoutgen_in(tmp.path(), tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    spoutgen_in(tmp.path(), tmp.path())
        .args(["init", "--force"])
        .assert()
        .success();
}

// ============================================================================
// spoutgen completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    spoutgen_in(tmp.path(), tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spoutgen"));
}
