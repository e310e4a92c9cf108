use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Locate an executable by name on `PATH`.
pub fn find_on_path(program: impl AsRef<OsStr>) -> Option<PathBuf> {
    let program = program.as_ref();
    if Path::new(program).components().count() > 1 {
        let candidate = PathBuf::from(program);
        return candidate.is_file().then_some(candidate);
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// First program from `candidates` present on `PATH`.
pub fn first_available<'a>(candidates: &[&'a str]) -> Option<(&'a str, PathBuf)> {
    candidates
        .iter()
        .find_map(|name| find_on_path(name).map(|path| (*name, path)))
}

/// Clamp a relative multiplier (1.0 = program default) into a signed percent
/// offset in `-100..=100`.
pub fn relative_percent(multiplier: f32) -> i32 {
    (((multiplier - 1.0) * 100.0).round() as i32).clamp(-100, 100)
}
