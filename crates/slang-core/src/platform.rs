use std::path::PathBuf;

const APP_DIR: &str = "zed-slangs";

pub fn data_dir() -> PathBuf {
    // On macOS and Linux, use ~/.local/share/zed-slangs/ (XDG standard)
    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".local")
            .join("share")
            .join(APP_DIR)
    }
    #[cfg(windows)]
    {
        // Portable installs keep their data beside the executable
        if let Some(dir) = exe_dir() {
            let portable_data = dir.join("data");
            if portable_data.exists() {
                return portable_data;
            }
        }

        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn config_dir() -> PathBuf {
    #[cfg(windows)]
    {
        if let Some(dir) = exe_dir() {
            if dir.join("config.toml").exists() {
                return dir;
            }
        }
    }

    #[cfg(unix)]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    #[cfg(windows)]
    {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }
}

pub fn temp_dir() -> PathBuf {
    std::env::temp_dir()
}

fn exe_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(|p| p.to_path_buf())
}

#[cfg(unix)]
fn player_binary_names(player: &str) -> Vec<String> {
    vec![player.to_string()]
}

#[cfg(windows)]
fn player_binary_names(player: &str) -> Vec<String> {
    vec![format!("{}.exe", player), player.to_string()]
}

fn find_beside_exe(names: &[String]) -> Option<PathBuf> {
    let dir = exe_dir()?;
    for name in names {
        let p = dir.join(name);
        if p.exists() {
            return Some(p);
        }
        let p = dir.join("external").join(name);
        if p.exists() {
            return Some(p);
        }
    }
    None
}

fn find_on_path(names: &[String]) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    for dir in std::env::split_paths(&path) {
        for name in names {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }
    None
}

/// Find the audio player binary (mpv by default).
/// An absolute or relative path is used as-is when it exists; a bare name is
/// looked up beside the current exe, then on PATH.
pub fn find_player_binary(player: &str) -> Option<PathBuf> {
    let direct = PathBuf::from(player);
    if direct.components().count() > 1 {
        return direct.exists().then_some(direct);
    }

    let names = player_binary_names(player);
    find_beside_exe(&names).or_else(|| find_on_path(&names))
}
