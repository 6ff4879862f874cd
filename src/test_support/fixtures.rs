//! On-disk fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::util::config::{Config, PathsConfig};

/// Contents of the fixture's `SpoutDX.h`.
pub const SPOUTDX_HEADER: &str = r#"#pragma once
#include <d3d11.h>

#define SPOUTDX_VERSION 2007
#define SPOUT_MAX_SENDERS GetMaxSenders()

class ID3D11Foo {
public:
    virtual void Release();
};

class SpoutDX {
public:
    SpoutDX();
    bool OpenDirectX11(ID3D11Device* pDevice = nullptr);
    bool SendTexture(ID3D11Texture2D* pTexture, unsigned int width = 0);
    ID3D11Foo* GetFoo();
};

namespace std {
    class string_view_helper {
    public:
        int size();
    };
}
"#;

/// Contents of the fixture SDK's `d3d11.h`, shaped like the real header: COM
/// interfaces declared through `MIDL_INTERFACE`, SAL-annotated parameters
/// and the C vtable variant behind `#else`.
pub const D3D11_HEADER: &str = r#"#pragma once
#include "unknwn.h"

#if defined(__cplusplus) && !defined(CINTERFACE)

MIDL_INTERFACE("db6f6ddb-ac77-4e88-8253-819df9bbf140")
ID3D11Device : public IUnknown
{
public:
    virtual HRESULT STDMETHODCALLTYPE CreateTexture2D(
        /* [annotation] */
        _In_  const D3D11_TEXTURE2D_DESC *pDesc,
        /* [annotation] */
        _In_reads_opt_(pDesc->MipLevels) const D3D11_SUBRESOURCE_DATA *pInitialData,
        /* [annotation] */
        _COM_Outptr_opt_  ID3D11Texture2D **ppTexture2D) = 0;

    virtual HRESULT STDMETHODCALLTYPE CreateTexture3D(
        _In_  const D3D11_TEXTURE3D_DESC *pDesc,
        _COM_Outptr_opt_  ID3D11Texture3D **ppTexture3D) = 0;
};

MIDL_INTERFACE("6f15aaf2-d208-4e89-9ab4-489535d34f9c")
ID3D11Texture2D : public ID3D11Resource
{
public:
    virtual void STDMETHODCALLTYPE GetDesc(
        _Out_  D3D11_TEXTURE2D_DESC *pDesc) = 0;
};

MIDL_INTERFACE("037e866e-f56d-4357-a8af-9dabbe6e250e")
ID3D11Texture3D : public ID3D11Resource
{
public:
    virtual void STDMETHODCALLTYPE GetDesc(
        _Out_  D3D11_TEXTURE3D_DESC *pDesc) = 0;
};

#else

typedef struct ID3D11DeviceVtbl
{
    BEGIN_INTERFACE
    HRESULT ( STDMETHODCALLTYPE *QueryInterface )(
        ID3D11Device * This, REFIID riid, void **ppvObject);
    END_INTERFACE
} ID3D11DeviceVtbl;

interface ID3D11Device
{
    CONST_VTBL struct ID3D11DeviceVtbl *lpVtbl;
};

#endif
"#;

/// Builder for a temporary workspace tree.
#[derive(Debug, Clone)]
pub struct WorkspaceFixture {
    files: Vec<(PathBuf, String)>,
    dirs: Vec<PathBuf>,
    sdk_versions: Vec<String>,
}

impl WorkspaceFixture {
    /// The stock layout: headers in `SpoutDX` and `SpoutGL`, one source, a
    /// build tree and three SDK versions.
    pub fn spout() -> Self {
        WorkspaceFixture {
            files: vec![
                (
                    PathBuf::from("work/Spout2/SPOUTSDK/SpoutDirectX/SpoutDX/SpoutDX.h"),
                    SPOUTDX_HEADER.to_string(),
                ),
                (
                    PathBuf::from("work/Spout2/SPOUTSDK/SpoutDirectX/SpoutDX/SpoutDX.cpp"),
                    "#include \"SpoutDX.h\"\n".to_string(),
                ),
                (
                    PathBuf::from("work/Spout2/SPOUTSDK/SpoutDirectX/SpoutDX/README.md"),
                    "SpoutDX\n".to_string(),
                ),
                (
                    PathBuf::from("work/Spout2/SPOUTSDK/SpoutGL/SpoutCommon.h"),
                    "#define SPOUT_DLLEXP\n".to_string(),
                ),
                (
                    PathBuf::from("work/Spout2/SPOUTSDK/SpoutGL/SpoutUtils.hpp"),
                    "namespace spoututils {\n    void SpoutLog(const char* format);\n}\n"
                        .to_string(),
                ),
            ],
            dirs: vec![
                PathBuf::from("work/SpoutDX/generator"),
                PathBuf::from("work/BUILD/Binaries/x64"),
            ],
            sdk_versions: vec![
                "10.0.19041.0".to_string(),
                "10.0.22000.0".to_string(),
                "10.0.17763.0".to_string(),
            ],
        }
    }

    /// Add or replace a file, path relative to the workspace root.
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        let path = PathBuf::from("work").join(path.into());
        self.files.retain(|(p, _)| *p != path);
        self.files.push((path, contents.into()));
        self
    }

    /// Write the tree into a fresh temporary directory.
    pub fn create(self) -> FixtureWorkspace {
        let tmp = TempDir::new().expect("failed to create temp dir");
        // Resolved paths are canonical, so the fixture hands out canonical paths too
        let root = tmp.path().canonicalize().expect("failed to canonicalize temp dir");
        let base = root.as_path();

        for dir in &self.dirs {
            fs::create_dir_all(base.join(dir)).expect("failed to create fixture dir");
        }

        for (path, contents) in &self.files {
            let path = base.join(path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("failed to create fixture dir");
            }
            fs::write(&path, contents).expect("failed to write fixture file");
        }

        for version in &self.sdk_versions {
            let um = base.join("sdk/Include").join(version).join("um");
            fs::create_dir_all(&um).expect("failed to create SDK include dir");
            fs::write(um.join("d3d11.h"), D3D11_HEADER).expect("failed to write d3d11.h");
            fs::create_dir_all(base.join("sdk/Lib").join(version).join("um/x64"))
                .expect("failed to create SDK lib dir");
        }

        FixtureWorkspace {
            base: root.clone(),
            _tmp: tmp,
        }
    }
}

/// A created fixture; the tree is removed on drop.
pub struct FixtureWorkspace {
    base: PathBuf,
    _tmp: TempDir,
}

impl FixtureWorkspace {
    /// Directory holding `Spout2`, `SpoutDX` and `BUILD`.
    pub fn root(&self) -> PathBuf {
        self.base.join("work")
    }

    /// Where a run starts: a directory inside the interop tree.
    pub fn start_dir(&self) -> PathBuf {
        self.root().join("SpoutDX").join("generator")
    }

    pub fn sdk_root(&self) -> PathBuf {
        self.base.join("sdk")
    }

    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root().join(relative)
    }

    /// Path configuration pointing at the fixture SDK.
    pub fn paths_config(&self) -> PathsConfig {
        PathsConfig {
            sdk_root: self.sdk_root(),
            ..PathsConfig::default()
        }
    }

    /// Full default configuration pointing at the fixture SDK.
    pub fn config(&self) -> Config {
        Config {
            paths: self.paths_config(),
            ..Config::default()
        }
    }
}
