//! Writing and bundling the generated program
//!
//! The generated source is staged under `<project>/.temp`, bundled into a
//! single `index.cjs`, then made executable with a node shebang.

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, warn};

/// Shebang prepended to the bundled artifact
pub const SHEBANG: &str = "#!/usr/bin/env node\n\n";

/// Turns a staged entry file into one self-contained script
pub trait Bundler {
    fn bundle(&self, entry: &Path, outfile: &Path, minify: bool) -> Result<()>;
}

/// `npx -y esbuild <entry> --bundle --outfile=<out> --platform=node [--minify]`
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    /// Launcher executable, `npx` unless overridden
    pub launcher: String,
}

impl Default for EsbuildBundler {
    fn default() -> Self {
        Self {
            launcher: "npx".to_string(),
        }
    }
}

impl EsbuildBundler {
    pub fn args(entry: &Path, outfile: &Path, minify: bool) -> Vec<OsString> {
        let mut outfile_arg = OsString::from("--outfile=");
        outfile_arg.push(outfile);

        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "esbuild".into(),
            entry.as_os_str().to_owned(),
            "--bundle".into(),
            outfile_arg,
            "--platform=node".into(),
        ];
        if minify {
            args.push("--minify".into());
        }
        args
    }
}

impl Bundler for EsbuildBundler {
    fn bundle(&self, entry: &Path, outfile: &Path, minify: bool) -> Result<()> {
        let args = Self::args(entry, outfile, minify);
        debug!(launcher = %self.launcher, ?args, "invoking bundler");

        let output = Command::new(&self.launcher)
            .args(&args)
            .output()
            .map_err(|e| Error::Write(format!("failed to run {}: {}", self.launcher, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Write(format!(
                "bundler exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}

/// Stage, bundle and finalize the generated program; returns the artifact path
pub fn write_cli(code: &str, config: &BuildConfig, bundler: &dyn Bundler) -> Result<PathBuf> {
    let staging_dir = config.staging_dir();
    let staging_file = config.staging_file();
    let out_file = config.output_file();

    fs::create_dir_all(&staging_dir)
        .map_err(|e| write_error("create", &staging_dir, e))?;
    fs::write(&staging_file, code)
        .map_err(|e| write_error("write", &staging_file, e))?;
    debug!(file = %staging_file.display(), "staged generated source");

    let out_root = config.out_root();
    let bundled = fs::create_dir_all(&out_root)
        .map_err(|e| write_error("create", &out_root, e))
        .and_then(|()| bundler.bundle(&staging_file, &out_file, config.minify));

    let cleanup = fs::remove_dir_all(&staging_dir);
    bundled?;
    if let Err(e) = cleanup {
        warn!("Failed to remove staging directory {}: {}", staging_dir.display(), e);
    }

    finalize_artifact(&out_file)?;
    info!(file = %out_file.display(), "CLI written");

    Ok(out_file)
}

/// Prepend the shebang and mark the file executable
pub fn finalize_artifact(path: &Path) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| write_error("read", path, e))?;
    fs::write(path, format!("{}{}", SHEBANG, content))
        .map_err(|e| write_error("write", path, e))?;
    make_executable(path)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| write_error("chmod", path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

fn write_error(action: &str, path: &Path, e: std::io::Error) -> Error {
    Error::Write(format!("failed to {} {}: {}", action, path.display(), e))
}
