//! System linker invocation (§4.6, §9: "spawn-and-wait with argument
//! vectors; never shell out through `sh -c`").
//!
//! LLVM's `TargetMachine` emits a relocatable object; turning that into
//! an executable still needs the host's C runtime (`crt0`, libc) linked
//! in so the generated `printf` call resolves, so the "system linker"
//! located here is the platform's C compiler driver (`cc`) rather than
//! a bare `ld` — the same indirection a C toolchain itself uses to pull
//! in startup files and libc.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{CodeGenError, Result};

pub struct Linker {
    program: PathBuf,
}

impl Linker {
    /// Locates the linker driver on `PATH`. Tries `cc` first, falling
    /// back to `gcc` and `clang`, matching what's actually available on
    /// most hosts without hard-coding a single toolchain.
    pub fn locate() -> Result<Self> {
        for candidate in ["cc", "clang", "gcc"] {
            if let Some(program) = which(candidate) {
                return Ok(Linker { program });
            }
        }
        Err(CodeGenError::LinkerNotFound("cc".to_string()))
    }

    /// Links `objects` into `output`, waiting synchronously for the
    /// linker to exit. A non-zero exit status is reported as a
    /// diagnostic-worthy error (§6: "Exit status ≠ 0 produces a
    /// diagnostic"), not a panic.
    pub fn link(&self, objects: &[PathBuf], output: &Path) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(objects);
        command.arg("-o").arg(output);

        let status = command
            .status()
            .map_err(|e| CodeGenError::LinkerSpawnFailed(self.program.display().to_string(), e))?;

        if !status.success() {
            return Err(CodeGenError::LinkerFailed(status.code().unwrap_or(-1)));
        }
        Ok(())
    }
}

fn which(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path).map(|dir| dir.join(program)).find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn which_finds_a_binary_known_to_exist_in_tests() {
        assert!(which("ls").is_some() || which("cmd.exe").is_some());
    }

    #[test]
    fn which_returns_none_for_a_nonexistent_program() {
        assert!(which("definitely-not-a-real-program-xyz").is_none());
    }
}
